use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The response when an error occurs with an API request
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorDto {
    /// The error message
    pub error: String,
}

/// Severity of a one-shot notice shown on the next rendered view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Info,
    Warning,
    Danger,
}

/// A notice stored in the session until the next view drains it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FlashDto {
    pub level: FlashLevel,
    pub message: String,
}

/// Login form view
#[derive(Serialize, Deserialize, ToSchema)]
pub struct LoginViewDto {
    pub flashes: Vec<FlashDto>,
}

/// Credentials submitted by the login form
#[derive(Clone, Deserialize, Serialize, ToSchema)]
pub struct LoginFormDto {
    pub username: String,
    pub password: String,
}
