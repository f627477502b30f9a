//! Multi-way arbitrage detection and stake allocation.
//!
//! With decimal odds `d_i` on every outcome, the implied probabilities
//! `1/d_i` sum to `S`. When `S < 1` the book is beatable: staking
//! `total × (1/d_i) / S` on each leg returns `total / S` whichever leg wins.
//!
//! Incomplete input (fewer than two legs, an unset leg, a non-positive
//! budget, a budget past `MAX_STAKE`) produces no result rather than an
//! error.

use rust_decimal::Decimal;
use serde::Serialize;

use super::error::DomainError;
use super::money::{validate_stake, Money};
use super::odds::{DecimalOdds, OddsQuote};

/// Fewest outcomes an arbitrage can cover.
pub const MIN_LEGS: usize = 2;

/// Stake assigned to one outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegAllocation {
    pub label: Option<String>,
    pub odds: DecimalOdds,
    /// `1 / d`, as a fraction.
    pub implied_probability: Decimal,
    pub stake: Money,
    /// Return if this leg wins, stake included.
    pub payout: Money,
}

/// Outcome of sizing an arbitrage set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArbitrageResult {
    pub legs: Vec<LegAllocation>,
    pub total_stake: Money,
    /// Sum of implied probabilities.
    pub total_implied: Decimal,
    /// True only when `total_implied < 1`.
    pub is_arbitrage: bool,
    /// `(1 − S) × 100`; negative when the book carries a margin.
    pub edge_percent: Decimal,
    /// `total / S − total`.
    pub guaranteed_profit: Money,
}

impl ArbitrageResult {
    /// Payout shared by every leg, `total / S`.
    #[must_use]
    pub fn payout(&self) -> Money {
        self.total_stake + self.guaranteed_profit
    }
}

/// Size stakes across labelled quotes.
///
/// Returns `None` for fewer than two legs or a total stake outside
/// `(0, MAX_STAKE]`.
#[must_use]
pub fn allocate(
    legs: &[(Option<String>, DecimalOdds)],
    total_stake: Money,
) -> Option<ArbitrageResult> {
    if legs.len() < MIN_LEGS || validate_stake(total_stake).is_err() {
        return None;
    }

    let total_implied: Decimal = legs.iter().map(|(_, odds)| odds.implied_fraction()).sum();
    if total_implied <= Decimal::ZERO {
        return None;
    }

    let allocations = legs
        .iter()
        .map(|(label, odds)| {
            let implied = odds.implied_fraction();
            let stake = implied / total_implied * total_stake;
            LegAllocation {
                label: label.clone(),
                odds: *odds,
                implied_probability: implied,
                stake,
                payout: odds.payout(stake),
            }
        })
        .collect();

    Some(ArbitrageResult {
        legs: allocations,
        total_stake,
        total_implied,
        is_arbitrage: total_implied < Decimal::ONE,
        edge_percent: (Decimal::ONE - total_implied) * Decimal::ONE_HUNDRED,
        guaranteed_profit: total_stake / total_implied - total_stake,
    })
}

/// Size stakes from plain decimal-odds numbers as a form submits them.
///
/// Any value at or below zero marks an unset leg and short-circuits to
/// `None`, as does any value that is not valid decimal odds.
#[must_use]
pub fn calculate(decimal_odds: &[Decimal], total_stake: Money) -> Option<ArbitrageResult> {
    if decimal_odds.iter().any(|odds| *odds <= Decimal::ZERO) {
        return None;
    }
    let legs = decimal_odds
        .iter()
        .map(|odds| DecimalOdds::try_new(*odds).ok().map(|odds| (None, odds)))
        .collect::<Option<Vec<_>>>()?;
    allocate(&legs, total_stake)
}

/// One outcome row in an arbitrage form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArbitrageLeg {
    /// Sportsbook or outcome name.
    pub label: Option<String>,
    /// Unset until the user enters a valid line.
    pub odds: Option<OddsQuote>,
}

/// Editable set of legs that never shrinks below two.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArbitrageSet {
    legs: Vec<ArbitrageLeg>,
    total_stake: Money,
}

impl ArbitrageSet {
    /// Two empty legs with the given budget.
    #[must_use]
    pub fn new(total_stake: Money) -> Self {
        Self {
            legs: vec![ArbitrageLeg::default(); MIN_LEGS],
            total_stake,
        }
    }

    /// Build from quotes; pads with empty legs up to the minimum.
    #[must_use]
    pub fn from_quotes(quotes: Vec<OddsQuote>, total_stake: Money) -> Self {
        let mut legs: Vec<ArbitrageLeg> = quotes
            .into_iter()
            .map(|quote| ArbitrageLeg {
                label: None,
                odds: Some(quote),
            })
            .collect();
        while legs.len() < MIN_LEGS {
            legs.push(ArbitrageLeg::default());
        }
        Self { legs, total_stake }
    }

    #[must_use]
    pub fn legs(&self) -> &[ArbitrageLeg] {
        &self.legs
    }

    #[must_use]
    pub const fn total_stake(&self) -> Money {
        self.total_stake
    }

    pub fn set_total_stake(&mut self, total_stake: Money) {
        self.total_stake = total_stake;
    }

    /// Append an empty leg and return its index.
    pub fn add_leg(&mut self) -> usize {
        self.legs.push(ArbitrageLeg::default());
        self.legs.len() - 1
    }

    /// Remove a leg; refused when only two remain.
    pub fn remove_leg(&mut self, index: usize) -> Result<ArbitrageLeg, DomainError> {
        if index >= self.legs.len() {
            return Err(DomainError::NoSuchLeg { index });
        }
        if self.legs.len() <= MIN_LEGS {
            return Err(DomainError::TooFewLegs);
        }
        Ok(self.legs.remove(index))
    }

    pub fn set_leg_odds(
        &mut self,
        index: usize,
        odds: Option<OddsQuote>,
    ) -> Result<(), DomainError> {
        let leg = self
            .legs
            .get_mut(index)
            .ok_or(DomainError::NoSuchLeg { index })?;
        leg.odds = odds;
        Ok(())
    }

    pub fn set_leg_label(
        &mut self,
        index: usize,
        label: impl Into<String>,
    ) -> Result<(), DomainError> {
        let leg = self
            .legs
            .get_mut(index)
            .ok_or(DomainError::NoSuchLeg { index })?;
        leg.label = Some(label.into());
        Ok(())
    }

    /// Size the set; `None` while any leg is unset.
    #[must_use]
    pub fn calculate(&self) -> Option<ArbitrageResult> {
        let legs = self
            .legs
            .iter()
            .map(|leg| leg.odds.map(|quote| (leg.label.clone(), quote.to_decimal())))
            .collect::<Option<Vec<_>>>()?;
        allocate(&legs, self.total_stake)
    }
}
