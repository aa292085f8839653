//! Error types for the gymdesk server application.
//!
//! Each domain (authentication, configuration, members, messaging, invoices, the reminder
//! worker) has its own `thiserror` enum. They are aggregated into [`Error`], which the
//! controllers return and which implements `IntoResponse` for axum.

pub mod auth;
pub mod config;
pub mod invoice;
pub mod member;
pub mod messaging;
pub mod worker;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::error::{
        auth::AuthError, config::ConfigError, invoice::InvoiceError, member::MemberError,
        messaging::MessagingError, worker::WorkerError,
    },
};

/// Main error type for the gymdesk server application.
///
/// Uses `#[from]` so domain errors and library errors convert with `?`. Domain errors map to
/// their own responses; everything else becomes a logged 500.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Authentication error (no admin in session, password hashing).
    #[error(transparent)]
    AuthError(#[from] AuthError),
    /// Member validation or lookup error.
    #[error(transparent)]
    MemberError(#[from] MemberError),
    /// Messaging provider error (upload rejected, non-success status, transport).
    #[error(transparent)]
    MessagingError(#[from] MessagingError),
    /// Invoice rendering error (template, encoding, output file).
    #[error(transparent)]
    InvoiceError(#[from] InvoiceError),
    /// Reminder worker error (missing batch or member).
    #[error(transparent)]
    WorkerError(#[from] WorkerError),
    /// Database error (query failures, connection issues, constraint violations).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    /// Session error (session retrieval, storage, serialization).
    #[error(transparent)]
    SessionError(#[from] tower_sessions::session::Error),
    /// IO error (binding the listener, creating directories).
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::ConfigError(err) => err.into_response(),
            Self::AuthError(err) => err.into_response(),
            Self::MemberError(err) => err.into_response(),
            Self::WorkerError(err) => err.into_response(),
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// Logs the error and returns a generic message so implementation details are not leaked.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto {
                error: "Internal server error".to_string(),
            }),
        )
            .into_response()
    }
}
