use std::time::Duration as StdDuration;

use chrono::{Duration, Local};
use gymdesk::{
    model::reminder::{GenerateImagesDto, ReminderBatchDto, ReminderBatchViewDto, ReminderSentDto},
    server::controller::reminder::{
        generate_all_images, get_reminder_batch, send_reminder, send_reminder_images,
    },
};
use uuid::Uuid;

use super::*;

fn iso_in_days(days: i64) -> String {
    (Local::now().date_naive() + Duration::days(days))
        .format("%Y-%m-%d")
        .to_string()
}

mod send_reminder {
    use super::*;

    /// Expect a count of 1 when the provider accepts the message
    #[tokio::test]
    async fn counts_accepted_reminder() -> Result<(), Error> {
        let test = TestBuilder::new()
            .with_gym_tables()
            .with_member("Ravi", iso_in_days(3))
            .with_send_message_endpoint(200, 1)
            .build()
            .await
            .unwrap();
        let app = test.into_app_state();
        sign_in(&test.session).await;

        let resp = send_reminder(State(app.state.clone()), test.session.clone()).await?;

        assert_eq!(resp.status(), StatusCode::OK);

        let sent: ReminderSentDto = read_json(resp).await;
        assert_eq!(sent.count, 1);
        test.assert_mocks();

        Ok(())
    }

    /// Expect a count of 0, not the no-candidates redirect, when the provider fails
    #[tokio::test]
    async fn reports_zero_when_provider_fails() -> Result<(), Error> {
        let test = TestBuilder::new()
            .with_gym_tables()
            .with_member("Ravi", iso_in_days(3))
            .with_send_message_endpoint(500, 1)
            .build()
            .await
            .unwrap();
        let app = test.into_app_state();
        sign_in(&test.session).await;

        let resp = send_reminder(State(app.state.clone()), test.session.clone()).await?;

        assert_eq!(resp.status(), StatusCode::OK);

        let sent: ReminderSentDto = read_json(resp).await;
        assert_eq!(sent.count, 0);
        test.assert_mocks();

        Ok(())
    }

    /// Expect a redirect with a notice and no provider calls when nobody is expiring
    #[tokio::test]
    async fn redirects_without_candidates() -> Result<(), Error> {
        let test = TestBuilder::new()
            .with_gym_tables()
            .with_member("Later", iso_in_days(5))
            .with_member("Gone", iso_in_days(-1))
            .with_send_message_endpoint(200, 0)
            .build()
            .await
            .unwrap();
        let app = test.into_app_state();
        sign_in(&test.session).await;

        let resp = send_reminder(State(app.state.clone()), test.session.clone()).await?;

        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(redirect_location(&resp), "/members");

        let flashes = SessionFlash::take(&test.session).await?;
        assert_eq!(flashes[0].message, "No members expiring soon.");
        test.assert_mocks();

        Ok(())
    }
}

mod generate_all_images {
    use super::*;

    #[tokio::test]
    async fn renders_candidates() -> Result<(), Error> {
        let mut test = TestBuilder::new()
            .with_gym_tables()
            .with_member("Later", iso_in_days(10))
            .build()
            .await
            .unwrap();
        let member = test.member().insert_member("Ravi", &iso_in_days(0)).await.unwrap();
        let app = test.into_app_state();
        sign_in(&test.session).await;

        let resp = generate_all_images(State(app.state.clone()), test.session.clone())
            .await?
            .into_response();

        let outcome: GenerateImagesDto = read_json(resp).await;
        assert_eq!(outcome, GenerateImagesDto::Generated { count: 1 });
        assert!(app.state.renderer.output_path(member.id).exists());

        Ok(())
    }

    #[tokio::test]
    async fn reports_nothing_to_generate() -> Result<(), Error> {
        let test = TestBuilder::new().with_gym_tables().build().await.unwrap();
        let app = test.into_app_state();
        sign_in(&test.session).await;

        let resp = generate_all_images(State(app.state.clone()), test.session.clone())
            .await?
            .into_response();

        let outcome: GenerateImagesDto = read_json(resp).await;
        assert_eq!(outcome, GenerateImagesDto::NothingToGenerate);

        Ok(())
    }
}

mod send_reminder_images {
    use super::*;

    /// Expect 202 with a batch, then the worker delivering it in the background
    #[tokio::test]
    async fn queues_batch_and_delivers() -> Result<(), Error> {
        let test = TestBuilder::new()
            .with_gym_tables()
            .with_member("Asha", iso_in_days(1))
            .with_member("Ravi", iso_in_days(4))
            .with_member("Later", iso_in_days(9))
            .with_upload_endpoint("https://cdn.example/tmp/invoice.jpg", 2)
            .with_send_message_endpoint(200, 2)
            .build()
            .await
            .unwrap();
        let app = test.into_app_state();
        sign_in(&test.session).await;

        let resp = send_reminder_images(State(app.state.clone()), test.session.clone()).await?;

        assert_eq!(resp.status(), StatusCode::ACCEPTED);

        let view: ReminderBatchViewDto = read_json(resp).await;
        assert_eq!(view.batch.total, 2);
        assert_eq!(view.batch.processed, 0);
        assert_eq!(view.status_url, format!("/reminders/batches/{}", view.batch.id));
        assert_eq!(
            view.flashes.last().map(|f| f.message.as_str()),
            Some("Queued reminder images for 2 members.")
        );

        app.state.worker.pool.start().await?;

        let mut batch = view.batch.clone();
        for _ in 0..1200 {
            let resp = get_reminder_batch(
                State(app.state.clone()),
                test.session.clone(),
                Path(batch.id),
            )
            .await?
            .into_response();
            batch = read_json::<ReminderBatchDto>(resp).await;

            if batch.finished {
                break;
            }
            tokio::time::sleep(StdDuration::from_millis(25)).await;
        }

        app.state.worker.pool.stop().await?;

        assert!(batch.finished, "Batch should finish");
        assert_eq!(batch.sent, 2);
        assert_eq!(batch.failed, 0);
        test.assert_mocks();

        Ok(())
    }

    #[tokio::test]
    async fn redirects_without_candidates() -> Result<(), Error> {
        let test = TestBuilder::new().with_gym_tables().build().await.unwrap();
        let app = test.into_app_state();
        sign_in(&test.session).await;

        let resp = send_reminder_images(State(app.state.clone()), test.session.clone()).await?;

        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(redirect_location(&resp), "/members");
        assert_eq!(app.state.worker.queue.len().await, 0);

        Ok(())
    }
}

mod get_reminder_batch {
    use super::*;

    #[tokio::test]
    async fn returns_not_found_for_unknown_batch() {
        let test = TestBuilder::new().with_gym_tables().build().await.unwrap();
        let app = test.into_app_state();
        sign_in(&test.session).await;

        let result = get_reminder_batch(
            State(app.state.clone()),
            test.session.clone(),
            Path(Uuid::new_v4()),
        )
        .await;

        let resp = result.err().unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
