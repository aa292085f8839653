use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHasher,
};
use sea_orm::{ActiveValue, EntityTrait};

use crate::{error::TestError, TestContext};

impl TestContext {
    pub fn admin<'a>(&'a mut self) -> AdminFixtures<'a> {
        AdminFixtures { setup: self }
    }
}

pub struct AdminFixtures<'a> {
    setup: &'a mut TestContext,
}

impl<'a> AdminFixtures<'a> {
    /// Inserts an admin whose password is stored as an argon2 PHC string.
    pub async fn insert_admin(
        &self,
        username: &str,
        password: &str,
    ) -> Result<entity::admin::Model, TestError> {
        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| TestError::PasswordHash(e.to_string()))?
            .to_string();

        Ok(
            entity::prelude::Admin::insert(entity::admin::ActiveModel {
                username: ActiveValue::Set(username.to_string()),
                password_hash: ActiveValue::Set(password_hash),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }
}
