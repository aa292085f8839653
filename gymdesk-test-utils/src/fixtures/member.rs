use sea_orm::{ActiveValue, EntityTrait};

use crate::{constant::TEST_MOBILE, error::TestError, TestContext};

impl TestContext {
    pub fn member<'a>(&'a mut self) -> MemberFixtures<'a> {
        MemberFixtures { setup: self }
    }
}

pub struct MemberFixtures<'a> {
    setup: &'a mut TestContext,
}

impl<'a> MemberFixtures<'a> {
    /// Inserts a member with the test mobile number, a monthly plan and the given end date.
    pub async fn insert_member(
        &self,
        name: &str,
        end_date: &str,
    ) -> Result<entity::member::Model, TestError> {
        self.insert_member_with_mobile(name, TEST_MOBILE, end_date)
            .await
    }

    pub async fn insert_member_with_mobile(
        &self,
        name: &str,
        mobile: &str,
        end_date: &str,
    ) -> Result<entity::member::Model, TestError> {
        Ok(
            entity::prelude::Member::insert(entity::member::ActiveModel {
                name: ActiveValue::Set(name.to_string()),
                mobile: ActiveValue::Set(mobile.to_string()),
                plan: ActiveValue::Set("Monthly".to_string()),
                package: ActiveValue::Set("Cardio".to_string()),
                joined_date: ActiveValue::Set("2025-01-01".to_string()),
                end_date: ActiveValue::Set(end_date.to_string()),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }
}
