//! Data transfer objects shared by the HTTP layer.
//!
//! Every "page" of the admin interface is rendered as one of these view models.

pub mod api;
pub mod dashboard;
pub mod member;
pub mod reminder;
