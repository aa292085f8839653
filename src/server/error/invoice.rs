use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::server::error::InternalServerError;

#[derive(Error, Debug)]
pub enum InvoiceError {
    /// The background template could not be opened or decoded.
    #[error("Failed to load invoice template {path}: {source}")]
    Template {
        path: String,
        source: image::ImageError,
    },
    #[error("Failed to create invoice output directory {path}: {source}")]
    OutputDir {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to write invoice {path}: {source}")]
    Encode {
        path: String,
        source: image::ImageError,
    },
    #[error("Invoice rendering task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl IntoResponse for InvoiceError {
    fn into_response(self) -> Response {
        InternalServerError(self).into_response()
    }
}
