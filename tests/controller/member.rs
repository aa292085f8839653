use gymdesk::{
    model::member::{
        AddMemberViewDto, MemberFormDto, MemberListViewDto, MemberSearchParams, MemberViewDto,
        MembershipStatus, RenewFormDto,
    },
    server::{
        controller::member::{
            add_member, delete_member, edit_member, edit_member_page, list_members,
            renew_member, renew_member_page,
        },
        data::member::MemberRepository,
    },
};

use super::*;

fn form(name: &str, mobile: &str) -> MemberFormDto {
    MemberFormDto {
        name: name.to_string(),
        mobile: mobile.to_string(),
        plan: "Quarterly".to_string(),
        package: "Strength".to_string(),
        joined_date: "2025-01-01".to_string(),
        end_date: "2025-04-01".to_string(),
    }
}

/// The single pending flash notice, drained from the session
async fn only_flash(test: &TestContext) -> Result<FlashDto, Error> {
    let mut flashes = SessionFlash::take(&test.session).await?;
    assert_eq!(flashes.len(), 1, "Expected exactly one flash notice");

    Ok(flashes.remove(0))
}

mod add {
    use super::*;

    /// Expect the member stored and a redirect to the listing
    #[tokio::test]
    async fn adds_member() -> Result<(), Error> {
        let test = TestBuilder::new().with_gym_tables().build().await.unwrap();
        let app = test.into_app_state();
        sign_in(&test.session).await;

        let resp = add_member(
            State(app.state.clone()),
            test.session.clone(),
            Form(form("Ravi", "9876543210")),
        )
        .await?;

        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(redirect_location(&resp), "/members");
        assert_eq!(only_flash(&test).await?.message, "Member added!");
        assert_eq!(MemberRepository::new(&test.db).count_all().await?, 1);

        Ok(())
    }

    /// Expect 422 echoing the submitted values when a field is blank
    #[tokio::test]
    async fn rejects_blank_field() -> Result<(), Error> {
        let test = TestBuilder::new().with_gym_tables().build().await.unwrap();
        let app = test.into_app_state();
        sign_in(&test.session).await;

        let submitted = form("Ravi", "  ");
        let resp = add_member(
            State(app.state.clone()),
            test.session.clone(),
            Form(submitted.clone()),
        )
        .await?;

        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let view: AddMemberViewDto = read_json(resp).await;
        assert_eq!(view.form, Some(submitted));
        assert_eq!(view.flashes[0].level, FlashLevel::Warning);
        assert_eq!(view.flashes[0].message, "Please fill all fields.");
        assert_eq!(MemberRepository::new(&test.db).count_all().await?, 0);

        Ok(())
    }

    /// Expect 422 with a date notice for an unpadded end date
    #[tokio::test]
    async fn rejects_unpadded_date() -> Result<(), Error> {
        let test = TestBuilder::new().with_gym_tables().build().await.unwrap();
        let app = test.into_app_state();
        sign_in(&test.session).await;

        let mut submitted = form("Ravi", "9876543210");
        submitted.end_date = "2025-3-12".to_string();
        let resp = add_member(
            State(app.state.clone()),
            test.session.clone(),
            Form(submitted.clone()),
        )
        .await?;

        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let view: AddMemberViewDto = read_json(resp).await;
        assert_eq!(view.form, Some(submitted));
        assert_eq!(
            view.flashes[0].message,
            "Enter valid joined and end dates (YYYY-MM-DD)."
        );
        assert_eq!(MemberRepository::new(&test.db).count_all().await?, 0);

        Ok(())
    }
}

mod edit {
    use super::*;

    /// Expect all fields replaced
    #[tokio::test]
    async fn updates_member() -> Result<(), Error> {
        let mut test = TestBuilder::new().with_gym_tables().build().await.unwrap();
        let member = test.member().insert_member("Ravi", "2025-03-12").await.unwrap();
        let app = test.into_app_state();
        sign_in(&test.session).await;

        let resp = edit_member(
            State(app.state.clone()),
            test.session.clone(),
            Path(member.id),
            Form(form("Ravi Kumar", "9123456780")),
        )
        .await?;

        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(redirect_location(&resp), "/members");
        assert_eq!(only_flash(&test).await?.message, "Updated successfully!");

        let stored = MemberRepository::new(&test.db)
            .get_by_id(member.id)
            .await?
            .unwrap();
        assert_eq!(stored.name, "Ravi Kumar");
        assert_eq!(stored.mobile, "9123456780");

        Ok(())
    }

    /// Expect a redirect back to the edit view and the row left untouched
    #[tokio::test]
    async fn rejects_bad_mobile_without_writing() -> Result<(), Error> {
        let mut test = TestBuilder::new().with_gym_tables().build().await.unwrap();
        let member = test.member().insert_member("Ravi", "2025-03-12").await.unwrap();
        let app = test.into_app_state();
        sign_in(&test.session).await;

        let resp = edit_member(
            State(app.state.clone()),
            test.session.clone(),
            Path(member.id),
            Form(form("Ravi Kumar", "98765")),
        )
        .await?;

        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(redirect_location(&resp), format!("/edit/{}", member.id));
        assert_eq!(only_flash(&test).await?.message, "Mobile must be 10 digits!");

        let stored = MemberRepository::new(&test.db)
            .get_by_id(member.id)
            .await?
            .unwrap();
        assert_eq!(stored, member);

        Ok(())
    }

    /// Expect the listing with a notice for an unknown member
    #[tokio::test]
    async fn redirects_unknown_member_to_listing() -> Result<(), Error> {
        let test = TestBuilder::new().with_gym_tables().build().await.unwrap();
        let app = test.into_app_state();
        sign_in(&test.session).await;

        let resp = edit_member_page(State(app.state.clone()), test.session.clone(), Path(404))
            .await?;

        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(redirect_location(&resp), "/members");
        assert_eq!(only_flash(&test).await?.message, "Member not found!");

        Ok(())
    }

    #[tokio::test]
    async fn shows_member() -> Result<(), Error> {
        let mut test = TestBuilder::new().with_gym_tables().build().await.unwrap();
        let member = test.member().insert_member("Ravi", "2025-03-12").await.unwrap();
        let app = test.into_app_state();
        sign_in(&test.session).await;

        let resp = edit_member_page(
            State(app.state.clone()),
            test.session.clone(),
            Path(member.id),
        )
        .await?;

        assert_eq!(resp.status(), StatusCode::OK);

        let view: MemberViewDto = read_json(resp).await;
        assert_eq!(view.member.id, member.id);
        assert_eq!(view.member.name, "Ravi");

        Ok(())
    }
}

mod delete {
    use super::*;

    #[tokio::test]
    async fn deletes_member() -> Result<(), Error> {
        let mut test = TestBuilder::new().with_gym_tables().build().await.unwrap();
        let member = test.member().insert_member("Ravi", "2025-03-12").await.unwrap();
        let app = test.into_app_state();
        sign_in(&test.session).await;

        let resp =
            delete_member(State(app.state.clone()), test.session.clone(), Path(member.id)).await?;

        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(redirect_location(&resp), "/members");
        assert!(MemberRepository::new(&test.db)
            .get_by_id(member.id)
            .await?
            .is_none());

        Ok(())
    }

    /// Expect the same redirect and notice for an id that does not exist
    #[tokio::test]
    async fn redirects_for_missing_member() -> Result<(), Error> {
        let test = TestBuilder::new().with_gym_tables().build().await.unwrap();
        let app = test.into_app_state();
        sign_in(&test.session).await;

        let resp = delete_member(State(app.state.clone()), test.session.clone(), Path(99)).await?;

        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(redirect_location(&resp), "/members");

        let flash = only_flash(&test).await?;
        assert_eq!(flash.level, FlashLevel::Info);
        assert_eq!(flash.message, "Member deleted!");

        Ok(())
    }
}

mod list {
    use super::*;

    /// Expect the trimmed search echoed back and used to filter
    #[tokio::test]
    async fn filters_by_search() -> Result<(), Error> {
        let test = TestBuilder::new()
            .with_gym_tables()
            .with_member("Asha", "2025-03-12")
            .with_member("Ravi", "2025-03-13")
            .build()
            .await
            .unwrap();
        let app = test.into_app_state();
        sign_in(&test.session).await;

        let resp = list_members(
            State(app.state.clone()),
            test.session.clone(),
            Query(MemberSearchParams {
                search: Some(" rav ".to_string()),
            }),
        )
        .await?
        .into_response();

        let view: MemberListViewDto = read_json(resp).await;
        assert_eq!(view.search_query, "rav");
        assert_eq!(view.members.len(), 1);
        assert_eq!(view.members[0].name, "Ravi");

        Ok(())
    }

    /// Expect rows with unparsable end dates surfaced as Unknown
    #[tokio::test]
    async fn marks_unparsable_dates_unknown() -> Result<(), Error> {
        let test = TestBuilder::new()
            .with_gym_tables()
            .with_member("Broken", "31/12/2025")
            .build()
            .await
            .unwrap();
        let app = test.into_app_state();
        sign_in(&test.session).await;

        let resp = list_members(
            State(app.state.clone()),
            test.session.clone(),
            Query(MemberSearchParams::default()),
        )
        .await?
        .into_response();

        let view: MemberListViewDto = read_json(resp).await;
        assert_eq!(view.members[0].status, MembershipStatus::Unknown);
        assert_eq!(view.members[0].days_left, 0);

        Ok(())
    }

    #[tokio::test]
    async fn redirects_when_signed_out() {
        let test = TestBuilder::new().with_gym_tables().build().await.unwrap();
        let app = test.into_app_state();

        let result = list_members(
            State(app.state.clone()),
            test.session.clone(),
            Query(MemberSearchParams::default()),
        )
        .await;

        let resp = result.err().unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(redirect_location(&resp), "/login");
    }
}

mod renew {
    use super::*;

    #[tokio::test]
    async fn renews_member() -> Result<(), Error> {
        let mut test = TestBuilder::new().with_gym_tables().build().await.unwrap();
        let member = test.member().insert_member("Ravi", "2025-03-12").await.unwrap();
        let app = test.into_app_state();
        sign_in(&test.session).await;

        let resp = renew_member(
            State(app.state.clone()),
            test.session.clone(),
            Path(member.id),
            Form(RenewFormDto {
                joined_date: "2025-03-12".to_string(),
                end_date: "2025-06-12".to_string(),
            }),
        )
        .await?;

        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(redirect_location(&resp), "/members");
        assert_eq!(only_flash(&test).await?.message, "Renewed successfully!");

        let stored = MemberRepository::new(&test.db)
            .get_by_id(member.id)
            .await?
            .unwrap();
        assert_eq!(stored.end_date, "2025-06-12");
        assert_eq!(stored.name, member.name);

        Ok(())
    }

    /// Expect a redirect back to the renew view for a malformed date
    #[tokio::test]
    async fn rejects_invalid_date() -> Result<(), Error> {
        let mut test = TestBuilder::new().with_gym_tables().build().await.unwrap();
        let member = test.member().insert_member("Ravi", "2025-03-12").await.unwrap();
        let app = test.into_app_state();
        sign_in(&test.session).await;

        let resp = renew_member(
            State(app.state.clone()),
            test.session.clone(),
            Path(member.id),
            Form(RenewFormDto {
                joined_date: "2025-03-12".to_string(),
                end_date: "12/06/2025".to_string(),
            }),
        )
        .await?;

        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(redirect_location(&resp), format!("/renew/{}", member.id));

        let stored = MemberRepository::new(&test.db)
            .get_by_id(member.id)
            .await?
            .unwrap();
        assert_eq!(stored.end_date, "2025-03-12");

        Ok(())
    }

    #[tokio::test]
    async fn redirects_unknown_member_to_listing() -> Result<(), Error> {
        let test = TestBuilder::new().with_gym_tables().build().await.unwrap();
        let app = test.into_app_state();
        sign_in(&test.session).await;

        let resp =
            renew_member_page(State(app.state.clone()), test.session.clone(), Path(7)).await?;

        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(redirect_location(&resp), "/members");

        Ok(())
    }
}
