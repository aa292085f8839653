//! Server application models.
//!
//! Application state shared by handlers, typed session data, and the jobs processed by the
//! reminder worker.

pub mod app;
pub mod session;
pub mod worker;
