//! One-shot notices carried across a redirect.
//!
//! A controller pushes a notice before redirecting; the next view drains every pending notice
//! so each is shown exactly once.

use tower_sessions::Session;

use crate::{
    model::api::{FlashDto, FlashLevel},
    server::error::Error,
};

pub const SESSION_FLASH_KEY: &str = "gymdesk:flash";

pub struct SessionFlash;

impl SessionFlash {
    /// Appends a notice to the pending list
    pub async fn push(
        session: &Session,
        level: FlashLevel,
        message: impl Into<String>,
    ) -> Result<(), Error> {
        let mut flashes = session
            .get::<Vec<FlashDto>>(SESSION_FLASH_KEY)
            .await?
            .unwrap_or_default();

        flashes.push(FlashDto {
            level,
            message: message.into(),
        });

        session.insert(SESSION_FLASH_KEY, flashes).await?;

        Ok(())
    }

    /// Removes and returns every pending notice
    pub async fn take(session: &Session) -> Result<Vec<FlashDto>, Error> {
        Ok(session
            .remove::<Vec<FlashDto>>(SESSION_FLASH_KEY)
            .await?
            .unwrap_or_default())
    }
}
