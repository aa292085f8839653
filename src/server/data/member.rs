use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr, DeleteResult,
    EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::model::member::MemberFormDto;

pub struct MemberRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> MemberRepository<'a, C> {
    /// Creates a new instance of [`MemberRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(&self, form: MemberFormDto) -> Result<entity::member::Model, DbErr> {
        let member = entity::member::ActiveModel {
            name: ActiveValue::Set(form.name),
            mobile: ActiveValue::Set(form.mobile),
            plan: ActiveValue::Set(form.plan),
            package: ActiveValue::Set(form.package),
            joined_date: ActiveValue::Set(form.joined_date),
            end_date: ActiveValue::Set(form.end_date),
            ..Default::default()
        };

        member.insert(self.db).await
    }

    pub async fn get_by_id(&self, member_id: i32) -> Result<Option<entity::member::Model>, DbErr> {
        entity::prelude::Member::find_by_id(member_id)
            .one(self.db)
            .await
    }

    /// Replaces every editable field of a member
    ///
    /// Returns `None` if no member with the id exists.
    pub async fn update(
        &self,
        member_id: i32,
        form: MemberFormDto,
    ) -> Result<Option<entity::member::Model>, DbErr> {
        let member = match self.get_by_id(member_id).await? {
            Some(member) => member,
            None => return Ok(None),
        };

        let mut member_am = member.into_active_model();
        member_am.name = ActiveValue::Set(form.name);
        member_am.mobile = ActiveValue::Set(form.mobile);
        member_am.plan = ActiveValue::Set(form.plan);
        member_am.package = ActiveValue::Set(form.package);
        member_am.joined_date = ActiveValue::Set(form.joined_date);
        member_am.end_date = ActiveValue::Set(form.end_date);

        Ok(Some(member_am.update(self.db).await?))
    }

    /// Sets only the joined and end dates, used when renewing
    pub async fn update_dates(
        &self,
        member_id: i32,
        joined_date: String,
        end_date: String,
    ) -> Result<Option<entity::member::Model>, DbErr> {
        let member = match self.get_by_id(member_id).await? {
            Some(member) => member,
            None => return Ok(None),
        };

        let mut member_am = member.into_active_model();
        member_am.joined_date = ActiveValue::Set(joined_date);
        member_am.end_date = ActiveValue::Set(end_date);

        Ok(Some(member_am.update(self.db).await?))
    }

    /// Deletes a member
    ///
    /// Returns OK regardless of the member existing, to confirm the deletion result
    /// check the [`DeleteResult::rows_affected`] field.
    pub async fn delete(&self, member_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Member::delete_by_id(member_id)
            .exec(self.db)
            .await
    }

    /// Lists members ordered by soonest end date, optionally filtered by a substring of the
    /// name or mobile number
    pub async fn list(&self, search: Option<&str>) -> Result<Vec<entity::member::Model>, DbErr> {
        let mut query = entity::prelude::Member::find();

        if let Some(search) = search {
            query = query.filter(
                Condition::any()
                    .add(entity::member::Column::Name.contains(search))
                    .add(entity::member::Column::Mobile.contains(search)),
            );
        }

        query
            .order_by_asc(entity::member::Column::EndDate)
            .order_by_asc(entity::member::Column::Id)
            .all(self.db)
            .await
    }

    /// Members whose end date falls within `from..=to` (ISO dates)
    pub async fn find_ending_between(
        &self,
        from: &str,
        to: &str,
    ) -> Result<Vec<entity::member::Model>, DbErr> {
        entity::prelude::Member::find()
            .filter(entity::member::Column::EndDate.between(from, to))
            .order_by_asc(entity::member::Column::EndDate)
            .order_by_asc(entity::member::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn count_all(&self) -> Result<u64, DbErr> {
        entity::prelude::Member::find().count(self.db).await
    }

    pub async fn count_ending_on_or_after(&self, date: &str) -> Result<u64, DbErr> {
        entity::prelude::Member::find()
            .filter(entity::member::Column::EndDate.gte(date))
            .count(self.db)
            .await
    }

    pub async fn count_ending_before(&self, date: &str) -> Result<u64, DbErr> {
        entity::prelude::Member::find()
            .filter(entity::member::Column::EndDate.lt(date))
            .count(self.db)
            .await
    }

    pub async fn count_ending_between(&self, from: &str, to: &str) -> Result<u64, DbErr> {
        entity::prelude::Member::find()
            .filter(entity::member::Column::EndDate.between(from, to))
            .count(self.db)
            .await
    }
}
