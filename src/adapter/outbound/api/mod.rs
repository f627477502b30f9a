//! Bet-tracker REST API adapter.

mod client;
pub mod dto;

pub use client::{ApiClient, MAX_VERIFY_BATCH};
