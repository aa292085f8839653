//! Admin authentication.
//!
//! Every failure to authenticate (unknown username, unparsable hash, wrong password)
//! collapses into the same `None` outcome so callers cannot tell them apart.

use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
};
use sea_orm::DatabaseConnection;

use crate::server::{
    data::admin::AdminRepository,
    error::{auth::AuthError, Error},
    model::session::admin::SessionAdmin,
};

/// Verified against when the username is unknown so both rejections cost one argon2 hash.
///
/// Uses the same parameters as `Argon2::default()`; no password matches it.
const DUMMY_PASSWORD_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$bKL8bmulXGXsPixzH9BUzw$aNU42YvQmaSbfP8ntqGPvjNXh2I1dZoyAZ1omRl52yU";

/// Hashes a password into an argon2 PHC string with a random salt.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::PasswordHash(e.to_string()))?;

    Ok(hash.to_string())
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

pub struct AuthService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AuthService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Checks the credentials of an admin.
    ///
    /// # Returns
    /// - `Ok(Some(SessionAdmin))` - Credentials match; the caller stores this in the session
    /// - `Ok(None)` - Unknown username or wrong password
    /// - `Err(Error::DbErr)` - Database lookup failed
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<SessionAdmin>, Error> {
        let admin_repo = AdminRepository::new(self.db);

        let Some(admin) = admin_repo.get_by_username(username).await? else {
            verify_password(password, DUMMY_PASSWORD_HASH);
            tracing::debug!("Login rejected for unknown admin");
            return Ok(None);
        };

        if !verify_password(password, &admin.password_hash) {
            tracing::debug!(admin_id = %admin.id, "Login rejected for wrong password");
            return Ok(None);
        }

        Ok(Some(SessionAdmin {
            id: admin.id,
            username: admin.username,
        }))
    }

    /// Creates the configured admin if no admin with that username exists yet.
    ///
    /// Returns true when a new admin was inserted.
    pub async fn bootstrap_admin(&self, username: &str, password: &str) -> Result<bool, Error> {
        let admin_repo = AdminRepository::new(self.db);

        if admin_repo.get_by_username(username).await?.is_some() {
            return Ok(false);
        }

        let password_hash = hash_password(password)?;
        admin_repo.create(username, &password_hash).await?;

        tracing::info!(username = %username, "Created bootstrap admin");

        Ok(true)
    }
}
