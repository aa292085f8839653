//! Session data models.
//!
//! Type-safe wrappers over tower-sessions storage. Each submodule owns one session key and
//! provides insert/get/remove style helpers for it.

pub mod admin;
pub mod flash;
