//! A stake placed at a price.

use serde::Serialize;

use super::error::DomainError;
use super::money::{round_currency, validate_stake, Money};
use super::odds::{DecimalOdds, OddsQuote};

/// Stake plus odds; payout and to-win are derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wager {
    stake: Money,
    odds: DecimalOdds,
}

impl Wager {
    /// Create a wager. The stake must be positive and within [`super::MAX_STAKE`].
    pub fn new(stake: Money, odds: impl Into<OddsQuote>) -> Result<Self, DomainError> {
        Ok(Self {
            stake: validate_stake(stake)?,
            odds: odds.into().to_decimal(),
        })
    }

    #[must_use]
    pub const fn stake(&self) -> Money {
        self.stake
    }

    #[must_use]
    pub const fn odds(&self) -> DecimalOdds {
        self.odds
    }

    /// `stake × decimal odds`.
    #[must_use]
    pub fn payout(&self) -> Money {
        self.odds.payout(self.stake)
    }

    /// `payout − stake`.
    #[must_use]
    pub fn to_win(&self) -> Money {
        self.payout() - self.stake
    }

    /// Net profit when the bet wins; same figure as [`Wager::to_win`].
    #[must_use]
    pub fn profit_if_won(&self) -> Money {
        self.to_win()
    }

    /// Cent-rounded view for display and JSON output.
    #[must_use]
    pub fn summary(&self) -> WagerSummary {
        WagerSummary {
            stake: round_currency(self.stake),
            to_win: round_currency(self.to_win()),
            payout: round_currency(self.payout()),
        }
    }
}

/// Rounded wager figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WagerSummary {
    pub stake: Money,
    pub to_win: Money,
    pub payout: Money,
}
