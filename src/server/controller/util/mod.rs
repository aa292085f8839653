//! Helpers shared by controllers.

pub mod require_admin;

use axum::response::{IntoResponse, Redirect, Response};
use tower_sessions::Session;

use crate::{
    model::api::FlashLevel,
    server::{error::Error, model::session::flash::SessionFlash},
};

pub use require_admin::require_admin;

/// Stores a flash notice and answers with a `303 See Other` to `to`.
pub async fn redirect_with_flash(
    session: &Session,
    level: FlashLevel,
    message: impl Into<String>,
    to: &str,
) -> Result<Response, Error> {
    SessionFlash::push(session, level, message).await?;

    Ok(Redirect::to(to).into_response())
}
