//! Tests for the reminder WorkerPool lifecycle and job processing.

use std::time::{Duration, Instant};

use gymdesk::{
    model::reminder::ReminderBatchDto,
    server::worker::{pool::WorkerPoolConfig, Worker},
};
use gymdesk_test_utils::prelude::*;
use mockito::Matcher;
use serde_json::json;
use uuid::Uuid;

use crate::util::{test_utils::test_pool_config, TestContextExt};

/// Polls the batch until it finishes or thirty seconds pass
async fn wait_for_batch(worker: &Worker, batch_id: Uuid) -> ReminderBatchDto {
    let deadline = Instant::now() + Duration::from_secs(30);

    loop {
        let batch = worker
            .batch_status(batch_id)
            .await
            .expect("Batch should exist");

        if batch.finished || Instant::now() > deadline {
            return batch;
        }

        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

mod lifecycle {
    use super::*;

    /// Expect start to be idempotent and stop to leave the pool stopped
    #[tokio::test]
    async fn starts_and_stops() {
        let test = TestBuilder::new().with_gym_tables().build().await.unwrap();
        let app = test.into_app_state();
        let pool = &app.state.worker.pool;

        assert!(!pool.is_running().await, "Pool should start stopped");

        pool.start().await.expect("Failed to start pool");
        pool.start().await.expect("Second start should be a no-op");
        assert!(pool.is_running().await, "Pool should be running after start");

        pool.stop().await.expect("Failed to stop pool");
        assert!(!pool.is_running().await, "Pool should be stopped after stop");

        pool.stop().await.expect("Second stop should be a no-op");
    }

    /// Expect a stopped pool to leave queued jobs alone
    #[tokio::test]
    async fn does_not_process_while_stopped() {
        let mut test = TestBuilder::new().with_gym_tables().build().await.unwrap();
        let member = test.member().insert_member("Ravi", "2025-03-12").await.unwrap();
        let app = test.into_app_state();
        let worker = &app.state.worker;

        worker.enqueue_invoice_reminders(&[member.id]).await;
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert_eq!(worker.queue.len().await, 1);
    }
}

mod job_processing {
    use super::*;

    /// Expect a successful delivery counted as sent
    #[tokio::test]
    async fn delivers_invoice() {
        let mut test = TestBuilder::new()
            .with_gym_tables()
            .with_upload_endpoint("https://cdn.example/tmp/invoice.jpg", 1)
            .with_send_message_endpoint(200, 1)
            .build()
            .await
            .unwrap();
        let member = test.member().insert_member("Ravi", "2025-03-12").await.unwrap();
        let app = test.into_app_state();
        let worker = &app.state.worker;

        let batch = worker.enqueue_invoice_reminders(&[member.id]).await;
        worker.pool.start().await.unwrap();

        let batch = wait_for_batch(worker, batch.id).await;
        worker.pool.stop().await.unwrap();

        assert!(batch.finished);
        assert_eq!((batch.sent, batch.failed), (1, 0));
        test.assert_mocks();
    }

    /// Expect failures counted per job and the remaining jobs still processed
    #[tokio::test]
    async fn continues_after_failures() {
        let mut test = TestBuilder::new()
            .with_gym_tables()
            .with_upload_endpoint("https://cdn.example/tmp/invoice.jpg", 2)
            .with_mock_endpoint(|server| {
                server
                    .mock("POST", "/api/send-message")
                    .match_body(Matcher::PartialJson(json!({ "to": "+919000000001" })))
                    .with_status(500)
                    .expect(1)
                    .create()
            })
            .with_mock_endpoint(|server| {
                server
                    .mock("POST", "/api/send-message")
                    .match_body(Matcher::PartialJson(json!({ "to": "+919000000002" })))
                    .with_status(200)
                    .expect(1)
                    .create()
            })
            .build()
            .await
            .unwrap();
        let rejected = test
            .member()
            .insert_member_with_mobile("Asha", "9000000001", "2025-03-11")
            .await
            .unwrap();
        let delivered = test
            .member()
            .insert_member_with_mobile("Ravi", "9000000002", "2025-03-12")
            .await
            .unwrap();
        let app = test.into_app_state();
        let worker = &app.state.worker;

        // 999 does not exist and fails before any provider call
        let batch = worker
            .enqueue_invoice_reminders(&[rejected.id, 999, delivered.id])
            .await;
        worker.pool.start().await.unwrap();

        let batch = wait_for_batch(worker, batch.id).await;
        worker.pool.stop().await.unwrap();

        assert!(batch.finished);
        assert_eq!(batch.processed, 3);
        assert_eq!((batch.sent, batch.failed), (1, 2));
        test.assert_mocks();
    }

    /// Expect the throttle to space out consecutive jobs
    #[tokio::test]
    async fn throttles_between_jobs() {
        let mut test = TestBuilder::new().with_gym_tables().build().await.unwrap();
        let first = test.member().insert_member("Asha", "2025-03-11").await.unwrap();
        let second = test.member().insert_member("Ravi", "2025-03-12").await.unwrap();
        let app = test.into_app_state();

        let config = WorkerPoolConfig {
            throttle_ms: 300,
            ..test_pool_config()
        };
        let worker = Worker::new(
            config,
            app.state.db.clone(),
            app.state.messaging.clone(),
            app.state.renderer.clone(),
        );

        // No mocks: every upload fails, so only the throttle takes time
        let batch = worker
            .enqueue_invoice_reminders(&[first.id, second.id])
            .await;
        let started = Instant::now();
        worker.pool.start().await.unwrap();

        let batch = wait_for_batch(&worker, batch.id).await;
        let elapsed = started.elapsed();
        worker.pool.stop().await.unwrap();

        assert!(batch.finished);
        assert_eq!(batch.failed, 2);
        assert!(
            elapsed >= Duration::from_millis(300),
            "Second job should wait for the throttle, took {:?}",
            elapsed
        );
    }
}
