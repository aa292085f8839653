//! Test fixtures for database rows and messaging provider mocks.
//!
//! - `admin` - admin accounts with argon2 hashed passwords
//! - `member` - gym member records
//! - `messaging` - mock send-message and upload endpoints

pub mod admin;
pub mod member;
pub mod messaging;
