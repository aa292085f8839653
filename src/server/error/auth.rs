use axum::response::{IntoResponse, Redirect, Response};
use thiserror::Error;

use crate::server::error::InternalServerError;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Admin is not present in session")]
    AdminNotInSession,
    #[error("Failed to hash password: {0}")]
    PasswordHash(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            Self::AdminNotInSession => {
                tracing::debug!("{}", self);

                Redirect::to("/login").into_response()
            }
            Self::PasswordHash(_) => InternalServerError(self).into_response(),
        }
    }
}
