//! sea-orm entities for the gymdesk database.

pub mod prelude;

pub mod admin;
pub mod member;
