//! The signed-in administrator.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::server::error::Error;

pub const SESSION_ADMIN_KEY: &str = "gymdesk:admin";

/// Admin identity held in the session.
///
/// Present in the session exactly when an admin is signed in.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct SessionAdmin {
    pub id: i32,
    pub username: String,
}

impl SessionAdmin {
    /// Insert admin into session
    pub async fn insert(session: &Session, admin: &SessionAdmin) -> Result<(), Error> {
        session.insert(SESSION_ADMIN_KEY, admin).await?;

        Ok(())
    }

    /// Get admin from session
    pub async fn get(session: &Session) -> Result<Option<SessionAdmin>, Error> {
        Ok(session.get::<SessionAdmin>(SESSION_ADMIN_KEY).await?)
    }
}
