//! Defaults for the calculators and bet analysis.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{
    build_policy, BetFilter, LinearScaleConfig, Money, PolicyKind, SharpCopier, ThresholdConfig,
    MAX_STAKE,
};
use crate::error::ConfigError;

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        field,
        reason: reason.into(),
    }
}

fn check_stake(field: &'static str, value: Money, allow_zero: bool) -> Result<(), ConfigError> {
    if value < Decimal::ZERO || (!allow_zero && value == Decimal::ZERO) {
        let bound = if allow_zero { "0 or greater" } else { "greater than 0" };
        return Err(invalid(field, format!("must be {bound}, got {value}")));
    }
    if value > MAX_STAKE {
        return Err(invalid(field, format!("must be at most {MAX_STAKE}, got {value}")));
    }
    Ok(())
}

/// `[sharp]` section: which sizing policy to use and its parameters.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SharpConfig {
    #[serde(default)]
    pub policy: PolicyKind,

    #[serde(flatten)]
    pub threshold: ThresholdConfig,

    #[serde(flatten)]
    pub linear: LinearScaleConfig,
}

impl SharpConfig {
    /// Copier using `kind`, or the configured policy when `None`.
    #[must_use]
    pub fn copier(&self, kind: Option<PolicyKind>) -> SharpCopier {
        SharpCopier::new(build_policy(
            kind.unwrap_or(self.policy),
            &self.threshold,
            &self.linear,
        ))
    }

    /// Check sizing parameters. Also applied to command-line overrides.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let threshold = &self.threshold;
        check_stake("sharp.min_stake", threshold.min_stake, true)?;
        if threshold.low_threshold < Decimal::ZERO {
            return Err(invalid("sharp.low_threshold", "must be 0 or greater"));
        }
        if threshold.high_threshold <= Decimal::ZERO {
            return Err(invalid("sharp.high_threshold", "must be greater than 0"));
        }
        if threshold.low_threshold > threshold.high_threshold {
            return Err(invalid("sharp.low_threshold", "must be <= high_threshold"));
        }
        check_stake("sharp.unit_stake", threshold.unit_stake, true)?;

        if self.linear.scale_factor < Decimal::ZERO {
            return Err(invalid(
                "sharp.scale_factor",
                format!("must be 0 or greater, got {}", self.linear.scale_factor),
            ));
        }
        check_stake("sharp.max_bet", self.linear.max_bet, false)
    }
}

/// `[arbitrage]` section.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArbitrageConfig {
    /// Budget split across legs when none is given.
    #[serde(default = "default_total_stake")]
    pub default_total_stake: Money,
}

fn default_total_stake() -> Money {
    Decimal::ONE_HUNDRED
}

impl Default for ArbitrageConfig {
    fn default() -> Self {
        Self {
            default_total_stake: default_total_stake(),
        }
    }
}

/// `[ev]` section: default bet selection for EV views.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct EvConfig {
    #[serde(default)]
    pub include_pending: bool,
    #[serde(default)]
    pub include_player_props: bool,
}

impl EvConfig {
    #[must_use]
    pub fn filter(&self) -> BetFilter {
        BetFilter::new()
            .with_pending(self.include_pending)
            .with_player_props(self.include_player_props)
    }
}
