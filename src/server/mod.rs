//! Server application core modules.
//!
//! HTTP routing, admin authentication, member persistence, invoice rendering, the messaging
//! provider client and the background reminder worker.

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod messaging;
pub mod model;
pub mod router;
pub mod service;
pub mod startup;
pub mod util;
pub mod worker;
