use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::server::error::InternalServerError;

/// Errors raised by the messaging provider client.
///
/// Only `upload_image` raises these; the send calls collapse failures into `false`.
#[derive(Error, Debug)]
pub enum MessagingError {
    #[error("Failed to read image {path}: {source}")]
    ReadImage {
        path: String,
        source: std::io::Error,
    },
    #[error("Messaging provider request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Messaging provider returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Messaging provider rejected the upload: {0}")]
    UploadRejected(String),
}

impl IntoResponse for MessagingError {
    fn into_response(self) -> Response {
        InternalServerError(self).into_response()
    }
}
