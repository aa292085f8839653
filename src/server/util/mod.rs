//! Utility functions shared by services, controllers and the reminder worker.

pub mod time;
