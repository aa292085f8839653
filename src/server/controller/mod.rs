//! HTTP controller endpoints for the gymdesk admin API.
//!
//! Handlers check the session, call into the service layer and answer with a JSON view or a
//! `303 See Other` redirect carrying a flash notice. Every route except login, logout, static
//! files and the API docs requires a signed-in admin.

pub mod auth;
pub mod dashboard;
pub mod member;
pub mod reminder;
pub mod util;
