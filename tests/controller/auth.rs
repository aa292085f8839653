use gymdesk::{
    model::api::{LoginFormDto, LoginViewDto},
    server::{
        controller::auth::{login, login_page, logout},
        model::session::admin::SessionAdmin,
    },
};

use super::*;

fn credentials(username: &str, password: &str) -> Form<LoginFormDto> {
    Form(LoginFormDto {
        username: username.to_string(),
        password: password.to_string(),
    })
}

mod login {
    use super::*;

    /// Expect 303 to the dashboard and the admin stored in session
    #[tokio::test]
    async fn redirects_to_dashboard_on_success() -> Result<(), Error> {
        let test = TestBuilder::new()
            .with_gym_tables()
            .with_admin(TEST_ADMIN_USERNAME, TEST_ADMIN_PASSWORD)
            .build()
            .await
            .unwrap();
        let app = test.into_app_state();

        let resp = login(
            State(app.state.clone()),
            test.session.clone(),
            credentials(TEST_ADMIN_USERNAME, TEST_ADMIN_PASSWORD),
        )
        .await?;

        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(redirect_location(&resp), "/dashboard");

        let admin = SessionAdmin::get(&test.session).await?.unwrap();
        assert_eq!(admin.username, TEST_ADMIN_USERNAME);

        Ok(())
    }

    /// Expect surrounding whitespace in the username to be ignored
    #[tokio::test]
    async fn trims_username() -> Result<(), Error> {
        let test = TestBuilder::new()
            .with_gym_tables()
            .with_admin(TEST_ADMIN_USERNAME, TEST_ADMIN_PASSWORD)
            .build()
            .await
            .unwrap();
        let app = test.into_app_state();

        let resp = login(
            State(app.state.clone()),
            test.session.clone(),
            credentials(&format!("  {} ", TEST_ADMIN_USERNAME), TEST_ADMIN_PASSWORD),
        )
        .await?;

        assert_eq!(resp.status(), StatusCode::SEE_OTHER);

        Ok(())
    }

    /// Expect 401 with the same notice for a wrong password and an unknown user
    #[tokio::test]
    async fn rejects_invalid_credentials_generically() -> Result<(), Error> {
        let test = TestBuilder::new()
            .with_gym_tables()
            .with_admin(TEST_ADMIN_USERNAME, TEST_ADMIN_PASSWORD)
            .build()
            .await
            .unwrap();
        let app = test.into_app_state();

        for (username, password) in [(TEST_ADMIN_USERNAME, "wrong"), ("nobody", TEST_ADMIN_PASSWORD)] {
            let resp = login(
                State(app.state.clone()),
                test.session.clone(),
                credentials(username, password),
            )
            .await?;

            assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

            let view: LoginViewDto = read_json(resp).await;
            assert_eq!(
                view.flashes,
                vec![FlashDto {
                    level: FlashLevel::Danger,
                    message: "Invalid username or password".to_string(),
                }]
            );
        }

        assert!(SessionAdmin::get(&test.session).await?.is_none());

        Ok(())
    }
}

mod logout {
    use super::*;

    /// Expect the admin removed from session and a notice on the login view
    #[tokio::test]
    async fn clears_session_and_redirects() -> Result<(), Error> {
        let test = TestBuilder::new().build().await.unwrap();
        sign_in(&test.session).await;

        let resp = logout(test.session.clone()).await?;

        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(redirect_location(&resp), "/login");
        assert!(SessionAdmin::get(&test.session).await?.is_none());

        let resp = login_page(test.session.clone()).await?.into_response();
        let view: LoginViewDto = read_json(resp).await;
        assert_eq!(view.flashes.len(), 1);
        assert_eq!(view.flashes[0].message, "Logged out successfully.");

        Ok(())
    }

    /// Expect logout to succeed without anyone signed in
    #[tokio::test]
    async fn redirects_without_session() -> Result<(), Error> {
        let test = TestBuilder::new().build().await.unwrap();

        let resp = logout(test.session.clone()).await?;

        assert_eq!(resp.status(), StatusCode::SEE_OTHER);

        Ok(())
    }
}
