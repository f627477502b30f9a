//! Linewise - sports-betting odds, arbitrage and expected-value toolkit.
//!
//! The crate is split the hexagonal way:
//!
//! - [`domain`] - Pure betting math: odds conversion, wagers, N-way
//!   arbitrage sizing, closing-line EV, the sharp-exposure copier, and
//!   aggregate reports over tracked bets.
//! - [`port`] - The [`port::BetFeed`] trait describing where bet records
//!   come from.
//! - [`adapter`] - The tracker REST client and JSON-file feed (outbound),
//!   plus the `linewise` command line (inbound).
//! - [`infrastructure`] - Configuration loading and logging setup.
//! - [`error`] - Error types for the crate.
//!
//! # Example
//!
//! ```
//! use linewise::domain::{ArbitrageSet, AmericanOdds, OddsQuote};
//! use rust_decimal::Decimal;
//!
//! let quotes = vec![
//!     OddsQuote::American(AmericanOdds::parse("+120").unwrap()),
//!     OddsQuote::American(AmericanOdds::parse("-110").unwrap()),
//! ];
//! let result = ArbitrageSet::from_quotes(quotes, Decimal::from(1000))
//!     .calculate()
//!     .unwrap();
//! assert!(result.is_arbitrage);
//! ```

pub mod adapter;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;
