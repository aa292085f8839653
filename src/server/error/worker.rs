//! Reminder worker error types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use uuid::Uuid;

use crate::{model::api::ErrorDto, server::error::InternalServerError};

#[derive(Error, Debug)]
pub enum WorkerError {
    /// No batch with this id has been queued since the server started.
    #[error("Reminder batch {0} not found")]
    BatchNotFound(Uuid),
    /// A job referenced a member that no longer exists.
    #[error("Member {0} no longer exists")]
    MemberMissing(i32),
}

impl IntoResponse for WorkerError {
    fn into_response(self) -> Response {
        match self {
            Self::BatchNotFound(_) => {
                tracing::debug!("{}", self);

                (
                    StatusCode::NOT_FOUND,
                    Json(ErrorDto {
                        error: "Reminder batch not found".to_string(),
                    }),
                )
                    .into_response()
            }
            err => InternalServerError(err).into_response(),
        }
    }
}
