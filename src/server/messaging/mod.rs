//! Client for the WhatsApp messaging provider.
//!
//! Wraps three provider calls: uploading an image to obtain a temporary public URL, sending a
//! text message and sending an image message with an optional caption. Every request carries
//! the API key as a bearer token.

pub mod number;

use std::{path::Path, time::Duration};

use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};

use crate::server::error::messaging::MessagingError;

pub use number::normalize_number;

const SEND_TIMEOUT: Duration = Duration::from_secs(30);
const UPLOAD_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Serialize)]
struct SendTextRequest<'a> {
    to: &'a str,
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SendImageRequest<'a> {
    to: &'a str,
    image_url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
}

#[derive(Serialize)]
struct UploadRequest {
    base64: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UploadResponse {
    #[serde(default)]
    success: bool,
    public_url: Option<String>,
}

#[derive(Clone)]
pub struct MessagingClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl MessagingClient {
    /// Creates a client for the provider at `base_url`, e.g. `https://wasenderapi.com`.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    fn send_url(&self) -> String {
        format!("{}/api/send-message", self.base_url)
    }

    fn upload_url(&self) -> String {
        format!("{}/api/upload", self.base_url)
    }

    /// Uploads a JPEG and returns the provider's temporary public URL for it.
    ///
    /// # Returns
    /// - `Ok(String)` - The `publicUrl` from the provider
    /// - `Err(MessagingError::ReadImage)` - The file could not be read
    /// - `Err(MessagingError::Status)` - The provider answered with a non-success status
    /// - `Err(MessagingError::UploadRejected)` - The provider reported `success: false`
    pub async fn upload_image(&self, path: &Path) -> Result<String, MessagingError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| MessagingError::ReadImage {
                path: path.display().to_string(),
                source,
            })?;

        let body = UploadRequest {
            base64: format!("data:image/jpeg;base64,{}", STANDARD.encode(&bytes)),
        };

        let resp = self
            .http
            .post(self.upload_url())
            .bearer_auth(&self.api_key)
            .timeout(UPLOAD_TIMEOUT)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;
        tracing::debug!(status = %status, "Messaging upload response");

        if !status.is_success() {
            return Err(MessagingError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let upload: UploadResponse = serde_json::from_str(&text)
            .map_err(|_| MessagingError::UploadRejected(text.clone()))?;

        match upload.public_url {
            Some(url) if upload.success => Ok(url),
            _ => Err(MessagingError::UploadRejected(text)),
        }
    }

    /// Sends a text message; true only when the provider answers `200 OK`.
    pub async fn send_text(&self, number: &str, message: &str) -> bool {
        let to = normalize_number(number);
        let body = SendTextRequest { to: &to, text: message };

        self.post_message(&to, &body).await
    }

    /// Sends an image by URL with an optional caption; true only when the provider answers
    /// `200 OK`.
    ///
    /// An empty caption omits the `text` field.
    pub async fn send_image(&self, number: &str, image_url: &str, caption: &str) -> bool {
        let to = normalize_number(number);
        let body = SendImageRequest {
            to: &to,
            image_url,
            text: (!caption.is_empty()).then_some(caption),
        };

        self.post_message(&to, &body).await
    }

    async fn post_message<T: Serialize>(&self, to: &str, body: &T) -> bool {
        let result = self
            .http
            .post(self.send_url())
            .bearer_auth(&self.api_key)
            .timeout(SEND_TIMEOUT)
            .json(body)
            .send()
            .await;

        match result {
            Ok(resp) => {
                let status = resp.status();
                if status != reqwest::StatusCode::OK {
                    tracing::warn!(to = %to, status = %status, "Messaging provider rejected message");
                }

                status == reqwest::StatusCode::OK
            }
            Err(e) => {
                tracing::warn!(to = %to, error = %e, "Failed to reach messaging provider");

                false
            }
        }
    }
}
