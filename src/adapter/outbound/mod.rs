//! Outbound adapters (driven side): bet feeds.

pub mod api;
pub mod file;
