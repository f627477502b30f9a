//! Betting math and bet-record analysis.
//!
//! Everything here is synchronous and free of I/O.

mod converter;
mod error;
mod money;
mod odds;
mod wager;

pub mod arbitrage;
pub mod bet;
pub mod ev;
pub mod filter;
pub mod sharp;
pub mod sportsbook;
pub mod stats;

// Odds and wagers
pub use converter::OddsConverter;
pub use error::DomainError;
pub use money::{percent_of, round_currency, validate_stake, Money, MAX_STAKE};
pub use odds::{AmericanOdds, DecimalOdds, FractionalOdds, ImpliedProbability, OddsFormat, OddsQuote};
pub use wager::{Wager, WagerSummary};

// Calculators
pub use arbitrage::{ArbitrageLeg, ArbitrageResult, ArbitrageSet, LegAllocation};
pub use ev::{EvAnalysis, EvCategory};
pub use sharp::{
    build_policy, LinearScaleConfig, LinearScalePolicy, PolicyKind, SharpCopier, SharpCopy,
    SharpPosition, SizingPolicy, ThresholdConfig, ThresholdPolicy,
};

// Bet records
pub use bet::{BetRecord, BetSource, BetStatus, BetType};
pub use filter::BetFilter;
pub use stats::{EvReport, PendingReport, PerformanceSummary};
