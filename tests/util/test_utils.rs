//! Test utilities for building an `AppState` on top of a `TestContext`.

use axum::{body::to_bytes, http::header::LOCATION, response::Response};
use gymdesk::server::{
    messaging::MessagingClient,
    model::{app::AppState, session::admin::SessionAdmin},
    service::invoice::{InvoiceConfig, InvoiceRenderer},
    worker::{pool::WorkerPoolConfig, Worker},
};
use gymdesk_test_utils::{constant::TEST_API_KEY, TestContext};
use image::{Rgb, RgbImage};
use serde::de::DeserializeOwned;
use tempfile::TempDir;
use tower_sessions::Session;

/// App state plus the temporary directory holding the invoice template and output.
///
/// The directory is removed when this is dropped.
pub struct TestState {
    pub state: AppState,
    pub dir: TempDir,
}

/// Worker pool settings fast enough for tests
pub fn test_pool_config() -> WorkerPoolConfig {
    WorkerPoolConfig {
        poll_interval_ms: 10,
        throttle_ms: 10,
        job_timeout_seconds: 60,
        shutdown_timeout_seconds: 1,
    }
}

/// Renderer with a plain white template and no logo or font, writing into `dir`
pub fn test_renderer(dir: &TempDir) -> InvoiceRenderer {
    let template_path = dir.path().join("template_invoice.jpg");
    RgbImage::from_pixel(2480, 1400, Rgb([255, 255, 255]))
        .save(&template_path)
        .expect("Failed to write invoice template");

    InvoiceRenderer::new(InvoiceConfig {
        template_path,
        logo_path: dir.path().join("instagram.png"),
        font_path: dir.path().join("font.ttf"),
        output_dir: dir.path().join("generated"),
    })
}

/// Extension trait for TestContext to create an AppState pointed at the mock provider
pub trait TestContextExt {
    /// The worker is created but not started.
    fn into_app_state(&self) -> TestState;
}

impl TestContextExt for TestContext {
    fn into_app_state(&self) -> TestState {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let messaging = MessagingClient::new(self.messaging_url(), TEST_API_KEY);
        let renderer = test_renderer(&dir);
        let worker = Worker::new(
            test_pool_config(),
            self.db.clone(),
            messaging.clone(),
            renderer.clone(),
        );

        TestState {
            state: AppState {
                db: self.db.clone(),
                messaging,
                renderer,
                worker,
            },
            dir,
        }
    }
}

/// Puts an admin into the session as a successful login would
pub async fn sign_in(session: &Session) {
    SessionAdmin::insert(
        session,
        &SessionAdmin {
            id: 1,
            username: "admin".to_string(),
        },
    )
    .await
    .expect("Failed to insert admin into session");
}

pub async fn read_json<T: DeserializeOwned>(resp: Response) -> T {
    let bytes = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");

    serde_json::from_slice(&bytes).expect("Failed to deserialize response body")
}

pub fn redirect_location(resp: &Response) -> &str {
    resp.headers()
        .get(LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}
