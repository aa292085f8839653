use tower_sessions::Session;

use crate::server::{
    error::{auth::AuthError, Error},
    model::session::admin::SessionAdmin,
};

/// Retrieves the signed-in admin from the session
///
/// # Returns
/// - `Ok(SessionAdmin)`: An admin is signed in
/// - `Err(Error::AuthError(AuthError::AdminNotInSession))`: Nobody is signed in, responds with a
///   redirect to `/login`
/// - `Err(Error)`: The session could not be read
pub async fn require_admin(session: &Session) -> Result<SessionAdmin, Error> {
    let Some(admin) = SessionAdmin::get(session).await? else {
        tracing::debug!("Rejected request without a signed-in admin");

        return Err(AuthError::AdminNotInSession.into());
    };

    Ok(admin)
}
