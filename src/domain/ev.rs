//! Expected value measured against the closing line.
//!
//! The closing line is the market's final, sharpest estimate. A bet placed
//! at a longer price than the close has positive expected value:
//!
//! `EV = closing_prob / placed_prob − 1`, `expected_profit = stake × EV`.
//!
//! Without a closing line every EV field is `None`. Zero is a legitimate
//! EV, so absence is never encoded as zero.

use std::fmt;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Serialize, Serializer};

use super::money::Money;
use super::odds::AmericanOdds;

/// EV at or above this fraction is "High EV".
pub const HIGH_EV_THRESHOLD: Decimal = dec!(0.10);

/// EV at or above this fraction (and below high) is "Medium EV".
pub const MEDIUM_EV_THRESHOLD: Decimal = dec!(0.05);

/// Quality bucket for a bet's edge over the close.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EvCategory {
    High,
    Medium,
    /// Below 5%, including negative EV.
    Low,
    /// No closing line was recorded.
    NoClv,
}

impl EvCategory {
    /// Reporting order.
    pub const ALL: [EvCategory; 4] = [Self::High, Self::Medium, Self::Low, Self::NoClv];

    #[must_use]
    pub fn from_ev(ev: Option<Decimal>) -> Self {
        match ev {
            None => Self::NoClv,
            Some(ev) if ev >= HIGH_EV_THRESHOLD => Self::High,
            Some(ev) if ev >= MEDIUM_EV_THRESHOLD => Self::Medium,
            Some(_) => Self::Low,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "High EV",
            Self::Medium => "Medium EV",
            Self::Low => "Low EV",
            Self::NoClv => "No CLV",
        }
    }
}

impl fmt::Display for EvCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for EvCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// EV metrics for one bet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EvAnalysis {
    /// Implied probability of the placed odds, as a fraction.
    pub implied_prob: Option<Decimal>,
    /// Implied probability of the closing odds, as a fraction.
    pub clv_implied_prob: Option<Decimal>,
    /// EV as a fraction (`0.05` is 5%).
    pub ev_percent: Option<Decimal>,
    pub expected_profit: Option<Money>,
    /// The placed price was longer than the close.
    pub beat_clv: Option<bool>,
    pub category: EvCategory,
}

impl EvAnalysis {
    /// Analysis for a bet with no usable closing line.
    #[must_use]
    pub const fn no_clv() -> Self {
        Self {
            implied_prob: None,
            clv_implied_prob: None,
            ev_percent: None,
            expected_profit: None,
            beat_clv: None,
            category: EvCategory::NoClv,
        }
    }

    #[must_use]
    pub fn compute(placed: AmericanOdds, closing: Option<AmericanOdds>, stake: Money) -> Self {
        let Some(closing) = closing else {
            return Self::no_clv();
        };

        let implied = placed.to_decimal().implied_fraction();
        let closing_implied = closing.to_decimal().implied_fraction();
        let ev = closing_implied / implied - Decimal::ONE;

        Self {
            implied_prob: Some(implied),
            clv_implied_prob: Some(closing_implied),
            ev_percent: Some(ev),
            expected_profit: Some(stake.saturating_mul(ev)),
            beat_clv: Some(implied < closing_implied),
            category: EvCategory::from_ev(Some(ev)),
        }
    }

    /// Analysis from raw record fields. A missing, zero, or otherwise
    /// invalid line on either side yields [`EvAnalysis::no_clv`].
    #[must_use]
    pub fn from_raw(odds: i32, clv: Option<i32>, stake: Money) -> Self {
        let placed = AmericanOdds::try_new(odds).ok();
        let closing = clv.and_then(|clv| AmericanOdds::try_new(clv).ok());
        match (placed, closing) {
            (Some(placed), Some(closing)) => Self::compute(placed, Some(closing), stake),
            _ => Self::no_clv(),
        }
    }

    #[must_use]
    pub const fn has_ev(&self) -> bool {
        self.ev_percent.is_some()
    }

    /// EV scaled to a percentage for display.
    #[must_use]
    pub fn ev_percent_display(&self) -> Option<Decimal> {
        self.ev_percent.map(|ev| ev * Decimal::ONE_HUNDRED)
    }
}
