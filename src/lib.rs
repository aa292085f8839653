//! gymdesk: gym membership administration.
//!
//! Admins sign in, manage member records, watch dashboard counts, render per-member invoice
//! images and send renewal reminders through a WhatsApp messaging provider.

pub mod model;
pub mod server;
