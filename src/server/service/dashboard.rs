use chrono::{Duration, NaiveDate};
use sea_orm::DatabaseConnection;

use crate::{
    model::dashboard::DashboardDto,
    server::{
        data::member::MemberRepository,
        error::Error,
        util::time::{to_iso_date, EXPIRING_SOON_DAYS},
    },
};

pub struct DashboardService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> DashboardService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Counts members for the dashboard tiles as of `today`.
    ///
    /// Active members end today or later, expired members ended before today, and
    /// expiring-soon members end within the reminder window. `total == active + expired`
    /// holds because the stored ISO dates compare as strings.
    pub async fn summary(&self, today: NaiveDate) -> Result<DashboardDto, Error> {
        let member_repo = MemberRepository::new(self.db);

        let today_iso = to_iso_date(today);
        let window_end = to_iso_date(today + Duration::days(EXPIRING_SOON_DAYS));

        Ok(DashboardDto {
            total_members: member_repo.count_all().await?,
            active_members: member_repo.count_ending_on_or_after(&today_iso).await?,
            expired_members: member_repo.count_ending_before(&today_iso).await?,
            expiring_soon: member_repo
                .count_ending_between(&today_iso, &window_end)
                .await?,
        })
    }
}
