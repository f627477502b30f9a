//! Sharp-exposure copier.
//!
//! Liquidity resting on one side of an exchange market implies a
//! counterparty on the other side at the negated price. The copier infers
//! that counterparty's ("the sharp's") stake and payout, then sizes a follow
//! bet on the sharp's side with a pluggable [`SizingPolicy`].
//!
//! Two policies ship:
//!
//! - [`ThresholdPolicy`]: fixed minimum below a low payout threshold, skip
//!   inside the gray area, scale above the high threshold.
//! - [`LinearScalePolicy`]: a fixed fraction of the sharp's payout, capped.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::money::{Money, MAX_STAKE};
use super::odds::AmericanOdds;

/// Counterparty position inferred from visible liquidity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SharpPosition {
    pub observed_odds: AmericanOdds,
    pub liquidity: Money,
    /// `−observed_odds`.
    pub sharp_odds: AmericanOdds,
    pub sharp_stake: Money,
    /// Stake plus profit at the sharp's odds.
    pub sharp_payout: Money,
}

impl SharpPosition {
    /// Infer the sharp side of a two-sided market. Liquidity must lie in
    /// `(0, MAX_STAKE]`.
    pub fn infer(observed_odds: AmericanOdds, liquidity: Money) -> Result<Self, DomainError> {
        if liquidity <= Decimal::ZERO {
            return Err(DomainError::NonPositiveLiquidity { liquidity });
        }
        if liquidity > MAX_STAKE {
            return Err(DomainError::ExceedsLimit {
                field: "liquidity",
                value: liquidity,
                max: MAX_STAKE,
            });
        }

        let odds = Decimal::from(observed_odds.value());
        let sharp_stake = if observed_odds.is_underdog() {
            liquidity * (odds / Decimal::ONE_HUNDRED)
        } else {
            liquidity * (Decimal::ONE_HUNDRED / odds.abs())
        };
        let sharp_odds = observed_odds.negate();
        let sharp_payout = sharp_stake + sharp_odds.profit_on(sharp_stake);

        Ok(Self {
            observed_odds,
            liquidity,
            sharp_odds,
            sharp_stake,
            sharp_payout,
        })
    }
}

/// Which rule produced a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SizingTier {
    /// Payout below the low threshold; the fixed minimum stake applies.
    Minimum,
    /// Payout inside the gray-area band; copying is skipped.
    GrayArea,
    /// Stake proportional to payout.
    Scaled,
    /// Proportional stake clipped at the maximum bet.
    Capped,
}

impl SizingTier {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Minimum => "minimum",
            Self::GrayArea => "gray area",
            Self::Scaled => "scaled",
            Self::Capped => "capped",
        }
    }
}

impl fmt::Display for SizingTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A policy's stake decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub stake: Money,
    pub tier: SizingTier,
}

impl Recommendation {
    #[must_use]
    pub fn is_skip(&self) -> bool {
        self.stake <= Decimal::ZERO
    }
}

/// Turns an inferred sharp position into an own-stake recommendation.
pub trait SizingPolicy: Send + Sync {
    /// Unique identifier, used in config and output.
    fn name(&self) -> &'static str;

    fn recommend(&self, position: &SharpPosition) -> Recommendation;
}

/// Named policy selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    Threshold,
    #[default]
    Linear,
}

impl PolicyKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Threshold => "threshold",
            Self::Linear => "linear",
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters for [`ThresholdPolicy`].
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ThresholdConfig {
    /// Stake used when the sharp payout is below `low_threshold`.
    #[serde(default = "default_min_stake")]
    pub min_stake: Money,

    /// Payouts below this get the minimum stake.
    #[serde(default = "default_low_threshold")]
    pub low_threshold: Money,

    /// Payouts above this are scaled; the band between is skipped.
    #[serde(default = "default_high_threshold")]
    pub high_threshold: Money,

    /// Stake per `high_threshold` of payout above the band.
    #[serde(default = "default_unit_stake")]
    pub unit_stake: Money,
}

fn default_min_stake() -> Money {
    Decimal::from(5)
}

fn default_low_threshold() -> Money {
    Decimal::from(750)
}

fn default_high_threshold() -> Money {
    Decimal::from(2000)
}

fn default_unit_stake() -> Money {
    Decimal::from(10)
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            min_stake: default_min_stake(),
            low_threshold: default_low_threshold(),
            high_threshold: default_high_threshold(),
            unit_stake: default_unit_stake(),
        }
    }
}

/// Three-tier rule: minimum below `low`, skip on `[low, high]`, scale above `high`.
///
/// Both thresholds belong to the gray area: a payout of exactly 750 or
/// exactly 2000 is skipped.
pub struct ThresholdPolicy {
    config: ThresholdConfig,
}

impl ThresholdPolicy {
    #[must_use]
    pub const fn new(config: ThresholdConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &ThresholdConfig {
        &self.config
    }
}

impl SizingPolicy for ThresholdPolicy {
    fn name(&self) -> &'static str {
        PolicyKind::Threshold.as_str()
    }

    fn recommend(&self, position: &SharpPosition) -> Recommendation {
        let payout = position.sharp_payout;
        if payout < self.config.low_threshold {
            Recommendation {
                stake: self.config.min_stake,
                tier: SizingTier::Minimum,
            }
        } else if payout <= self.config.high_threshold {
            Recommendation {
                stake: Decimal::ZERO,
                tier: SizingTier::GrayArea,
            }
        } else {
            let stake = self
                .config
                .unit_stake
                .checked_div(self.config.high_threshold)
                .and_then(|per_dollar| payout.checked_mul(per_dollar))
                .map_or(MAX_STAKE, |stake| stake.min(MAX_STAKE));
            Recommendation {
                stake,
                tier: SizingTier::Scaled,
            }
        }
    }
}

/// Parameters for [`LinearScalePolicy`].
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LinearScaleConfig {
    /// Stake per dollar of sharp payout ($1 per $200 is 0.005).
    #[serde(default = "default_scale_factor")]
    pub scale_factor: Decimal,

    /// Upper bound on the recommended stake.
    #[serde(default = "default_max_bet")]
    pub max_bet: Money,
}

fn default_scale_factor() -> Decimal {
    Decimal::new(5, 3) // 0.005
}

fn default_max_bet() -> Money {
    Decimal::from(100)
}

impl Default for LinearScaleConfig {
    fn default() -> Self {
        Self {
            scale_factor: default_scale_factor(),
            max_bet: default_max_bet(),
        }
    }
}

/// `payout × scale_factor`, capped at `max_bet` and at [`MAX_STAKE`].
pub struct LinearScalePolicy {
    config: LinearScaleConfig,
}

impl LinearScalePolicy {
    #[must_use]
    pub const fn new(config: LinearScaleConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &LinearScaleConfig {
        &self.config
    }
}

impl SizingPolicy for LinearScalePolicy {
    fn name(&self) -> &'static str {
        PolicyKind::Linear.as_str()
    }

    fn recommend(&self, position: &SharpPosition) -> Recommendation {
        let cap = self.config.max_bet.min(MAX_STAKE);
        let scaled = position
            .sharp_payout
            .checked_mul(self.config.scale_factor)
            .unwrap_or(Decimal::MAX);
        if scaled > cap {
            Recommendation {
                stake: cap,
                tier: SizingTier::Capped,
            }
        } else {
            Recommendation {
                stake: scaled,
                tier: SizingTier::Scaled,
            }
        }
    }
}

/// Build the policy named by `kind`.
#[must_use]
pub fn build_policy(
    kind: PolicyKind,
    threshold: &ThresholdConfig,
    linear: &LinearScaleConfig,
) -> Box<dyn SizingPolicy> {
    match kind {
        PolicyKind::Threshold => Box::new(ThresholdPolicy::new(threshold.clone())),
        PolicyKind::Linear => Box::new(LinearScalePolicy::new(linear.clone())),
    }
}

/// Full copier output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SharpCopy {
    pub policy: &'static str,
    pub position: SharpPosition,
    pub recommendation: Recommendation,
    /// Profit on the recommended stake at the sharp's odds.
    pub potential_profit: Money,
}

/// Inference plus a sizing policy.
pub struct SharpCopier {
    policy: Box<dyn SizingPolicy>,
}

impl SharpCopier {
    #[must_use]
    pub fn new(policy: Box<dyn SizingPolicy>) -> Self {
        Self { policy }
    }

    #[must_use]
    pub fn policy_name(&self) -> &'static str {
        self.policy.name()
    }

    /// Infer the sharp and size the follow bet.
    pub fn copy(&self, observed_odds: AmericanOdds, liquidity: Money) -> Result<SharpCopy, DomainError> {
        let position = SharpPosition::infer(observed_odds, liquidity)?;
        let recommendation = self.policy.recommend(&position);
        let potential_profit = position.sharp_odds.profit_on(recommendation.stake);
        Ok(SharpCopy {
            policy: self.policy.name(),
            position,
            recommendation,
            potential_profit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn odds(value: i32) -> AmericanOdds {
        AmericanOdds::try_new(value).unwrap()
    }

    fn position_with_payout(payout: Money) -> SharpPosition {
        // Even money: payout is twice the liquidity.
        SharpPosition::infer(odds(-100), payout / Decimal::TWO).unwrap()
    }

    #[test]
    fn infers_sharp_from_underdog_liquidity() {
        let position = SharpPosition::infer(odds(200), dec!(1000)).unwrap();
        assert_eq!(position.sharp_odds.value(), -200);
        assert_eq!(position.sharp_stake, dec!(2000));
        assert_eq!(position.sharp_payout, dec!(3000));
    }

    #[test]
    fn infers_sharp_from_favourite_liquidity() {
        let position = SharpPosition::infer(odds(-200), dec!(1000)).unwrap();
        assert_eq!(position.sharp_odds.value(), 200);
        assert_eq!(position.sharp_stake, dec!(500));
        assert_eq!(position.sharp_payout, dec!(1500));
    }

    #[test]
    fn rejects_non_positive_liquidity() {
        assert!(matches!(
            SharpPosition::infer(odds(200), Decimal::ZERO),
            Err(DomainError::NonPositiveLiquidity { .. })
        ));
    }

    #[test]
    fn rejects_liquidity_past_limit() {
        assert!(matches!(
            SharpPosition::infer(odds(200), MAX_STAKE + Decimal::ONE),
            Err(DomainError::ExceedsLimit { field: "liquidity", .. })
        ));
    }

    #[test]
    fn longest_lines_infer_without_overflow() {
        use crate::domain::odds::MAX_AMERICAN_ODDS;

        let long = SharpPosition::infer(odds(MAX_AMERICAN_ODDS), MAX_STAKE).unwrap();
        assert_eq!(long.sharp_odds.value(), -MAX_AMERICAN_ODDS);
        let short = SharpPosition::infer(odds(-MAX_AMERICAN_ODDS), MAX_STAKE).unwrap();
        assert_eq!(short.sharp_odds.value(), MAX_AMERICAN_ODDS);
        assert!(short.sharp_payout > short.sharp_stake);
    }

    #[test]
    fn extreme_sizing_parameters_saturate() {
        let position = SharpPosition::infer(odds(-100), MAX_STAKE).unwrap();

        let linear = LinearScalePolicy::new(LinearScaleConfig {
            scale_factor: Decimal::MAX,
            max_bet: Decimal::MAX,
        });
        let recommendation = linear.recommend(&position);
        assert_eq!(recommendation.stake, MAX_STAKE);
        assert_eq!(recommendation.tier, SizingTier::Capped);

        let threshold = ThresholdPolicy::new(ThresholdConfig {
            high_threshold: dec!(0.0000000000000000000000000001),
            low_threshold: Decimal::ZERO,
            unit_stake: Decimal::MAX,
            ..ThresholdConfig::default()
        });
        assert_eq!(threshold.recommend(&position).stake, MAX_STAKE);
    }

    #[test]
    fn linear_policy_default_scenario() {
        let copier = SharpCopier::new(Box::new(LinearScalePolicy::new(LinearScaleConfig::default())));
        let copy = copier.copy(odds(200), dec!(1000)).unwrap();
        assert_eq!(copy.policy, "linear");
        assert_eq!(copy.recommendation.stake, dec!(15));
        assert_eq!(copy.recommendation.tier, SizingTier::Scaled);
        // Following at -200: $15 wins $7.50.
        assert_eq!(copy.potential_profit, dec!(7.5));
    }

    #[test]
    fn linear_policy_caps_at_max_bet() {
        let policy = LinearScalePolicy::new(LinearScaleConfig {
            scale_factor: dec!(0.005),
            max_bet: dec!(10),
        });
        let recommendation = policy.recommend(&SharpPosition::infer(odds(200), dec!(1000)).unwrap());
        assert_eq!(recommendation.stake, dec!(10));
        assert_eq!(recommendation.tier, SizingTier::Capped);
    }

    #[test]
    fn threshold_policy_low_boundary() {
        let policy = ThresholdPolicy::new(ThresholdConfig::default());

        let below = policy.recommend(&position_with_payout(dec!(749.98)));
        assert_eq!(below.tier, SizingTier::Minimum);
        assert_eq!(below.stake, dec!(5));

        let at = policy.recommend(&position_with_payout(dec!(750)));
        assert_eq!(at.tier, SizingTier::GrayArea);
        assert!(at.is_skip());
    }

    #[test]
    fn threshold_policy_high_boundary() {
        let policy = ThresholdPolicy::new(ThresholdConfig::default());

        let at = policy.recommend(&position_with_payout(dec!(2000)));
        assert_eq!(at.tier, SizingTier::GrayArea);
        assert_eq!(at.stake, Decimal::ZERO);

        let above = policy.recommend(&position_with_payout(dec!(4000)));
        assert_eq!(above.tier, SizingTier::Scaled);
        assert_eq!(above.stake, dec!(20));
    }

    #[test]
    fn threshold_policy_scenario_scales_ten_per_two_thousand() {
        let copier = SharpCopier::new(build_policy(
            PolicyKind::Threshold,
            &ThresholdConfig::default(),
            &LinearScaleConfig::default(),
        ));
        let copy = copier.copy(odds(200), dec!(1000)).unwrap();
        assert_eq!(copy.recommendation.stake, dec!(15));
        assert_eq!(copier.policy_name(), "threshold");
    }

    #[test]
    fn gray_area_has_no_potential_profit() {
        let copier = SharpCopier::new(Box::new(ThresholdPolicy::new(ThresholdConfig::default())));
        let copy = copier.copy(odds(-100), dec!(500)).unwrap();
        assert!(copy.recommendation.is_skip());
        assert_eq!(copy.potential_profit, Decimal::ZERO);
    }
}
