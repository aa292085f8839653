//! Member validation and lookup errors.
//!
//! Controllers usually turn these into a flash notice plus a redirect. When one escapes to
//! the response directly it maps to a 404 or 422 JSON body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum MemberError {
    /// No member row exists with the given id.
    #[error("Member {0} not found")]
    NotFound(i32),
    /// One or more required form fields were empty after trimming.
    #[error("All fields are required")]
    MissingFields,
    /// The mobile number is not exactly 10 ASCII digits.
    #[error("Mobile number must be exactly 10 digits")]
    InvalidMobile,
    /// A renew date was empty or not an ISO `YYYY-MM-DD` date.
    #[error("Dates must be valid YYYY-MM-DD values")]
    InvalidDate,
}

impl MemberError {
    /// The notice shown to the admin after a rejected action.
    pub fn notice(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "Member not found!",
            Self::MissingFields => "Fill all fields!",
            Self::InvalidMobile => "Mobile must be 10 digits!",
            Self::InvalidDate => "Enter valid joined and end dates (YYYY-MM-DD).",
        }
    }
}

impl IntoResponse for MemberError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        let status = match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::UNPROCESSABLE_ENTITY,
        };

        (
            status,
            Json(ErrorDto {
                error: self.notice().to_string(),
            }),
        )
            .into_response()
    }
}
