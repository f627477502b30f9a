//! Domain validation errors for betting-math types.
//!
//! These errors are returned by `try_new` constructors and parsers when an
//! input violates an odds or wager invariant. They are local, recoverable
//! rejections: callers keep their last valid state and wait for a valid
//! edit.
//!
//! # Examples
//!
//! ```
//! use linewise::domain::DomainError;
//! use linewise::domain::AmericanOdds;
//!
//! let result = AmericanOdds::try_new(50);
//! assert!(matches!(result, Err(DomainError::InvalidAmericanOdds { value: 50 })));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// American odds need a magnitude between 100 and 1,000,000.
    #[error("american odds must be between 100 and 1000000 in magnitude, got {value}")]
    InvalidAmericanOdds {
        /// The rejected value.
        value: i32,
    },

    /// Decimal odds must exceed 1.0 and stay at or below 10001.
    #[error("decimal odds must be greater than 1.0 and at most 10001, got {value}")]
    InvalidDecimalOdds {
        /// The rejected value.
        value: Decimal,
    },

    /// Fractional odds need a nonzero denominator and a positive ratio of
    /// at most 10000.
    #[error("fractional odds {numerator}/{denominator} are not valid")]
    InvalidFractionalOdds {
        /// Numerator as given.
        numerator: i64,
        /// Denominator as given.
        denominator: i64,
    },

    /// Implied probability must lie strictly between 0 and 100 percent and
    /// imply decimal odds of at most 10001.
    #[error("implied probability must be between 0 and 100 (exclusive) and at least 100/10001, got {value}")]
    ProbabilityOutOfRange {
        /// The rejected percentage.
        value: Decimal,
    },

    /// Stakes must be positive.
    #[error("stake must be positive, got {stake}")]
    NonPositiveStake {
        /// The rejected stake.
        stake: Decimal,
    },

    /// Liquidity observed on a market must be positive.
    #[error("liquidity must be positive, got {liquidity}")]
    NonPositiveLiquidity {
        /// The rejected liquidity.
        liquidity: Decimal,
    },

    /// An amount above the largest value the calculators accept.
    #[error("{field} {value} exceeds the limit of {max}")]
    ExceedsLimit {
        /// Which input was rejected.
        field: &'static str,
        /// The rejected amount.
        value: Decimal,
        /// The largest accepted amount.
        max: Decimal,
    },

    /// Text that could not be read as the requested odds format.
    #[error("cannot parse '{input}' as {format} odds")]
    Unparseable {
        /// The raw input.
        input: String,
        /// Human name of the expected format.
        format: &'static str,
    },

    /// Arbitrage sets never drop below two legs.
    #[error("an arbitrage set needs at least two legs")]
    TooFewLegs,

    /// Leg index out of range.
    #[error("no leg at index {index}")]
    NoSuchLeg {
        /// The requested index.
        index: usize,
    },
}
