//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! # Available Ports
//!
//! - [`BetFeed`] - Bet records from the tracker API or an exported file

pub mod outbound;

pub use outbound::bets::{BetFeed, BetQuery};
