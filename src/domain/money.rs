//! Monetary types and rounding helpers.

use rust_decimal::{Decimal, RoundingStrategy};

use super::error::DomainError;

/// Currency amount represented as a Decimal for precision.
pub type Money = Decimal;

/// Largest stake or liquidity the calculators accept.
///
/// Together with the odds ceiling in [`super::odds`] this keeps every
/// payout and profit well inside `Decimal` range.
pub const MAX_STAKE: Money = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Accept a stake in `(0, MAX_STAKE]`.
pub fn validate_stake(stake: Money) -> Result<Money, DomainError> {
    if stake <= Decimal::ZERO {
        return Err(DomainError::NonPositiveStake { stake });
    }
    if stake > MAX_STAKE {
        return Err(DomainError::ExceedsLimit {
            field: "stake",
            value: stake,
            max: MAX_STAKE,
        });
    }
    Ok(stake)
}

/// Round a currency amount to cents, half away from zero.
#[must_use]
pub fn round_currency(amount: Money) -> Money {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Percentage `numerator / denominator * 100`, or zero when the denominator is not positive.
#[must_use]
pub fn percent_of(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator > Decimal::ZERO {
        numerator / denominator * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(round_currency(dec!(2.345)), dec!(2.35));
        assert_eq!(round_currency(dec!(-2.345)), dec!(-2.35));
        assert_eq!(round_currency(dec!(2.344)), dec!(2.34));
    }

    #[test]
    fn stake_limits() {
        assert_eq!(validate_stake(dec!(25)), Ok(dec!(25)));
        assert_eq!(validate_stake(MAX_STAKE), Ok(MAX_STAKE));
        assert!(matches!(
            validate_stake(Decimal::ZERO),
            Err(DomainError::NonPositiveStake { .. })
        ));
        assert!(matches!(
            validate_stake(Decimal::MAX),
            Err(DomainError::ExceedsLimit { field: "stake", .. })
        ));
    }

    #[test]
    fn percent_of_zero_denominator_is_zero() {
        assert_eq!(percent_of(dec!(5), Decimal::ZERO), Decimal::ZERO);
        assert_eq!(percent_of(dec!(5), dec!(50)), dec!(10));
    }
}
