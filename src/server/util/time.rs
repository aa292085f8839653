//! Calendar date helpers for membership status and reminder selection.
//!
//! Dates are stored as ISO `YYYY-MM-DD` text. Because that format orders lexicographically,
//! the data layer compares dates as strings; these helpers cover everything that needs an
//! actual calendar value.

use chrono::{Duration, Local, NaiveDate};

use crate::model::member::MembershipStatus;

/// Members whose end date is at most this many days away are "expiring soon" and receive
/// reminders.
pub const EXPIRING_SOON_DAYS: i64 = 4;

const ISO_FORMAT: &str = "%Y-%m-%d";
const DISPLAY_FORMAT: &str = "%d/%m/%Y";

/// Today's date in the server's local timezone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parses a stored `YYYY-MM-DD` date, ignoring surrounding whitespace.
///
/// Only the zero-padded form is accepted, so every date that parses also compares correctly
/// as a string in the data layer.
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    let date = NaiveDate::parse_from_str(value, ISO_FORMAT).ok()?;

    (to_iso_date(date) == value).then_some(date)
}

pub fn to_iso_date(date: NaiveDate) -> String {
    date.format(ISO_FORMAT).to_string()
}

/// Reformats an ISO date as `DD/MM/YYYY`, returning the raw value if it does not parse.
pub fn to_display_date(value: &str) -> String {
    match parse_iso_date(value) {
        Some(date) => date.format(DISPLAY_FORMAT).to_string(),
        None => value.to_string(),
    }
}

/// Days from `today` until `end_date`; `None` when the stored date does not parse.
pub fn days_left(end_date: &str, today: NaiveDate) -> Option<i64> {
    parse_iso_date(end_date).map(|end| (end - today).num_days())
}

/// Derives the membership status from the stored end date.
///
/// # Returns
/// - `Expired` - end date is in the past
/// - `ExpiringSoon` - end date is today or within [`EXPIRING_SOON_DAYS`]
/// - `Active` - end date is further out
/// - `Unknown` - end date does not parse
pub fn membership_status(end_date: &str, today: NaiveDate) -> MembershipStatus {
    match days_left(end_date, today) {
        None => MembershipStatus::Unknown,
        Some(days) if days < 0 => MembershipStatus::Expired,
        Some(days) if days <= EXPIRING_SOON_DAYS => MembershipStatus::ExpiringSoon,
        Some(_) => MembershipStatus::Active,
    }
}

/// Inclusive `(from, to)` ISO bounds of the reminder window starting at `today`.
pub fn reminder_window(today: NaiveDate) -> (String, String) {
    let to = today + Duration::days(EXPIRING_SOON_DAYS);

    (to_iso_date(today), to_iso_date(to))
}

/// A member is a reminder candidate when `today <= end_date <= today + 4`.
pub fn is_reminder_candidate(end_date: &str, today: NaiveDate) -> bool {
    matches!(days_left(end_date, today), Some(days) if (0..=EXPIRING_SOON_DAYS).contains(&days))
}
