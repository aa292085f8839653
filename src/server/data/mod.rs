//! Data access layer repositories.
//!
//! Repositories wrap sea-orm queries for a single table and are generic over
//! `ConnectionTrait` so they work with a plain connection or inside a transaction.

pub mod admin;
pub mod member;
