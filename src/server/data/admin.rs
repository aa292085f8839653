use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter,
};

pub struct AdminRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> AdminRepository<'a, C> {
    /// Creates a new instance of [`AdminRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates an admin with an already hashed password
    pub async fn create(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<entity::admin::Model, DbErr> {
        let admin = entity::admin::ActiveModel {
            username: ActiveValue::Set(username.to_string()),
            password_hash: ActiveValue::Set(password_hash.to_string()),
            ..Default::default()
        };

        admin.insert(self.db).await
    }

    pub async fn get_by_username(
        &self,
        username: &str,
    ) -> Result<Option<entity::admin::Model>, DbErr> {
        entity::prelude::Admin::find()
            .filter(entity::admin::Column::Username.eq(username))
            .one(self.db)
            .await
    }

    pub async fn count(&self) -> Result<u64, DbErr> {
        entity::prelude::Admin::find().count(self.db).await
    }
}
