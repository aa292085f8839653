//! Mock endpoints for the messaging provider.
//!
//! Every mock requires the bearer token built from `TEST_API_KEY`, so a client configured with
//! the wrong key fails to match.

use mockito::{Matcher, Mock};
use serde_json::json;

use crate::{constant::TEST_API_KEY, TestContext};

impl TestContext {
    pub fn messaging<'a>(&'a mut self) -> MessagingFixtures<'a> {
        MessagingFixtures { setup: self }
    }
}

pub struct MessagingFixtures<'a> {
    setup: &'a mut TestContext,
}

fn bearer() -> String {
    format!("Bearer {}", TEST_API_KEY)
}

impl<'a> MessagingFixtures<'a> {
    /// `POST /api/send-message` answering `status` to any body.
    pub fn create_send_message_endpoint(&mut self, status: usize, expected_requests: usize) -> Mock {
        self.setup
            .server
            .mock("POST", "/api/send-message")
            .match_header("authorization", bearer().as_str())
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(json!({ "success": status == 200 }).to_string())
            .expect(expected_requests)
            .create()
    }

    /// `POST /api/send-message` answering `status` only when the JSON body matches `body`.
    pub fn create_send_message_endpoint_matching(
        &mut self,
        status: usize,
        body: serde_json::Value,
        expected_requests: usize,
    ) -> Mock {
        self.setup
            .server
            .mock("POST", "/api/send-message")
            .match_header("authorization", bearer().as_str())
            .match_body(Matcher::Json(body))
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(json!({ "success": status == 200 }).to_string())
            .expect(expected_requests)
            .create()
    }

    /// `POST /api/upload` accepting a base64 JPEG data URI and returning `public_url`.
    pub fn create_upload_endpoint(&mut self, public_url: &str, expected_requests: usize) -> Mock {
        self.setup
            .server
            .mock("POST", "/api/upload")
            .match_header("authorization", bearer().as_str())
            .match_body(Matcher::Regex(
                r#""base64"\s*:\s*"data:image/jpeg;base64,"#.to_string(),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({ "success": true, "publicUrl": public_url }).to_string())
            .expect(expected_requests)
            .create()
    }

    /// `POST /api/upload` answering 200 with `success: false`.
    pub fn create_rejected_upload_endpoint(&mut self, expected_requests: usize) -> Mock {
        self.setup
            .server
            .mock("POST", "/api/upload")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({ "success": false, "message": "Invalid file" }).to_string())
            .expect(expected_requests)
            .create()
    }
}
