//! Service layer for business logic.
//!
//! Services validate input, coordinate repositories, and call the invoice renderer and
//! messaging client. Controllers stay thin and translate service results into views,
//! flash notices and redirects.

pub mod auth;
pub mod dashboard;
pub mod invoice;
pub mod member;
pub mod reminder;
