//! Membership CRUD.
//!
//! Validation happens here, before any write, so a rejected form never mutates a row.

#[cfg(test)]
mod tests;

use chrono::NaiveDate;
use sea_orm::DatabaseConnection;

use crate::{
    model::member::{MemberDto, MemberFormDto, RenewFormDto},
    server::{
        data::member::MemberRepository,
        error::{member::MemberError, Error},
        util::time::{days_left, membership_status, parse_iso_date},
    },
};

/// Builds the listing row for a member, deriving days left and status from `today`.
///
/// An end date that does not parse yields `days_left == 0` and `MembershipStatus::Unknown`.
pub fn to_member_dto(member: entity::member::Model, today: NaiveDate) -> MemberDto {
    let days_left_value = days_left(&member.end_date, today).unwrap_or(0);
    let status = membership_status(&member.end_date, today);

    MemberDto {
        id: member.id,
        name: member.name,
        mobile: member.mobile,
        plan: member.plan,
        package: member.package,
        joined_date: member.joined_date,
        end_date: member.end_date,
        days_left: days_left_value,
        status,
    }
}

/// Trims every field of a submitted form.
fn trimmed(form: MemberFormDto) -> MemberFormDto {
    MemberFormDto {
        name: form.name.trim().to_string(),
        mobile: form.mobile.trim().to_string(),
        plan: form.plan.trim().to_string(),
        package: form.package.trim().to_string(),
        joined_date: form.joined_date.trim().to_string(),
        end_date: form.end_date.trim().to_string(),
    }
}

fn has_all_fields(form: &MemberFormDto) -> bool {
    [
        &form.name,
        &form.mobile,
        &form.plan,
        &form.package,
        &form.joined_date,
        &form.end_date,
    ]
    .iter()
    .all(|field| !field.is_empty())
}

fn has_valid_dates(joined_date: &str, end_date: &str) -> bool {
    parse_iso_date(joined_date).is_some() && parse_iso_date(end_date).is_some()
}

/// A valid mobile is exactly 10 ASCII digits.
pub fn is_valid_mobile(mobile: &str) -> bool {
    mobile.len() == 10 && mobile.bytes().all(|b| b.is_ascii_digit())
}

pub struct MemberService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> MemberService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Adds a member after checking that every field is present and both dates are ISO dates.
    ///
    /// The mobile number is not validated here.
    ///
    /// # Returns
    /// - `Ok(Model)` - The inserted member
    /// - `Err(Error::MemberError(MemberError::MissingFields))` - A field was empty after trimming
    /// - `Err(Error::MemberError(MemberError::InvalidDate))` - A date is not `YYYY-MM-DD`
    /// - `Err(Error::DbErr)` - The insert failed
    pub async fn add(&self, form: MemberFormDto) -> Result<entity::member::Model, Error> {
        let form = trimmed(form);

        if !has_all_fields(&form) {
            return Err(MemberError::MissingFields.into());
        }

        if !has_valid_dates(&form.joined_date, &form.end_date) {
            return Err(MemberError::InvalidDate.into());
        }

        let member = MemberRepository::new(self.db).create(form).await?;
        tracing::info!(member_id = %member.id, "Added member");

        Ok(member)
    }

    /// Replaces all fields of an existing member.
    ///
    /// Checks run in order: the member must exist, the mobile must be 10 digits, every field
    /// must be present, then both dates must be ISO dates. Nothing is written unless all
    /// checks pass.
    pub async fn edit(
        &self,
        member_id: i32,
        form: MemberFormDto,
    ) -> Result<entity::member::Model, Error> {
        let member_repo = MemberRepository::new(self.db);

        if member_repo.get_by_id(member_id).await?.is_none() {
            return Err(MemberError::NotFound(member_id).into());
        }

        let form = trimmed(form);

        if !is_valid_mobile(&form.mobile) {
            return Err(MemberError::InvalidMobile.into());
        }

        if !has_all_fields(&form) {
            return Err(MemberError::MissingFields.into());
        }

        if !has_valid_dates(&form.joined_date, &form.end_date) {
            return Err(MemberError::InvalidDate.into());
        }

        let member = member_repo
            .update(member_id, form)
            .await?
            .ok_or(MemberError::NotFound(member_id))?;
        tracing::info!(member_id = %member.id, "Updated member");

        Ok(member)
    }

    /// Deletes a member; deleting an id that does not exist is not an error.
    pub async fn delete(&self, member_id: i32) -> Result<(), Error> {
        let result = MemberRepository::new(self.db).delete(member_id).await?;

        if result.rows_affected == 0 {
            tracing::debug!(member_id = %member_id, "Delete requested for missing member");
        } else {
            tracing::info!(member_id = %member_id, "Deleted member");
        }

        Ok(())
    }

    /// Lists members ordered by end date with derived fields.
    ///
    /// The search term is trimmed; an empty term lists everyone.
    pub async fn list(
        &self,
        search: Option<&str>,
        today: NaiveDate,
    ) -> Result<Vec<MemberDto>, Error> {
        let search = search.map(str::trim).filter(|s| !s.is_empty());

        let members = MemberRepository::new(self.db).list(search).await?;

        Ok(members
            .into_iter()
            .map(|member| to_member_dto(member, today))
            .collect())
    }

    pub async fn get(&self, member_id: i32, today: NaiveDate) -> Result<MemberDto, Error> {
        let member = MemberRepository::new(self.db)
            .get_by_id(member_id)
            .await?
            .ok_or(MemberError::NotFound(member_id))?;

        Ok(to_member_dto(member, today))
    }

    /// Sets new joined and end dates.
    ///
    /// Both dates must be present and valid ISO dates; their order is not checked.
    pub async fn renew(
        &self,
        member_id: i32,
        form: RenewFormDto,
    ) -> Result<entity::member::Model, Error> {
        let member_repo = MemberRepository::new(self.db);

        if member_repo.get_by_id(member_id).await?.is_none() {
            return Err(MemberError::NotFound(member_id).into());
        }

        let joined_date = form.joined_date.trim();
        let end_date = form.end_date.trim();

        if !has_valid_dates(joined_date, end_date) {
            return Err(MemberError::InvalidDate.into());
        }

        let member = member_repo
            .update_dates(member_id, joined_date.to_string(), end_date.to_string())
            .await?
            .ok_or(MemberError::NotFound(member_id))?;
        tracing::info!(member_id = %member.id, end_date = %member.end_date, "Renewed member");

        Ok(member)
    }
}
