//! Odds encodings and conversion.
//!
//! A betting line can be written four ways: American (`+150`, `-110`),
//! decimal (`2.50`), fractional (`3/2`) and implied probability (`40%`).
//! Every conversion goes through [`DecimalOdds`], the canonical form.
//!
//! Constructors validate their input and return [`DomainError`] on
//! rejection; nothing here coerces an invalid value into a valid one.
//!
//! ```
//! use linewise::domain::{AmericanOdds, OddsFormat, OddsQuote};
//! use rust_decimal_macros::dec;
//!
//! let odds = AmericanOdds::try_new(150).unwrap();
//! assert_eq!(odds.to_decimal().value(), dec!(2.5));
//! assert_eq!(odds.to_decimal().implied_probability().percent(), dec!(40));
//!
//! let quote = OddsQuote::parse_as(OddsFormat::Fractional, "3/2").unwrap();
//! assert_eq!(quote.to_american().value(), 150);
//! ```

use std::fmt;
use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::money::Money;

/// Denominator used when expressing decimal odds as a fraction.
const FRACTION_BASE: i64 = 100;

/// Longest American line accepted, in either direction.
pub const MAX_AMERICAN_ODDS: i32 = 1_000_000;

/// Longest decimal line accepted: `1 + MAX_AMERICAN_ODDS / 100`.
pub const MAX_DECIMAL_ODDS: Decimal = Decimal::from_parts(10_001, 0, 0, false, 0);

/// Largest fractional ratio accepted: `MAX_DECIMAL_ODDS - 1`.
const MAX_FRACTIONAL_RATIO: i64 = 10_000;

fn round_whole(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

fn gcd(a: i64, b: i64) -> i64 {
    let (mut a, mut b) = (a.abs(), b.abs());
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a.max(1)
}

/// Signed integer odds: positive is profit per 100 staked, negative is the
/// stake needed to win 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct AmericanOdds(i32);

impl AmericanOdds {
    /// Validate American odds: magnitude between 100 and [`MAX_AMERICAN_ODDS`].
    pub fn try_new(value: i32) -> Result<Self, DomainError> {
        let magnitude = value.unsigned_abs();
        if magnitude < 100 || magnitude > MAX_AMERICAN_ODDS.unsigned_abs() {
            return Err(DomainError::InvalidAmericanOdds { value });
        }
        Ok(Self(value))
    }

    /// Parse text such as `+150`, `150` or `-110`.
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let trimmed = input.trim();
        let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
        let value = digits.parse::<i32>().map_err(|_| DomainError::Unparseable {
            input: input.to_string(),
            format: "american",
        })?;
        Self::try_new(value)
    }

    #[must_use]
    pub const fn value(self) -> i32 {
        self.0
    }

    #[must_use]
    pub const fn is_underdog(self) -> bool {
        self.0 > 0
    }

    /// The same line from the other side of the market.
    #[must_use]
    pub const fn negate(self) -> Self {
        Self(-self.0)
    }

    /// `odds > 0 ? 1 + odds/100 : 1 + 100/|odds|`.
    #[must_use]
    pub fn to_decimal(self) -> DecimalOdds {
        let odds = Decimal::from(self.0);
        let value = if self.0 > 0 {
            Decimal::ONE + odds / Decimal::ONE_HUNDRED
        } else {
            Decimal::ONE + Decimal::ONE_HUNDRED / odds.abs()
        };
        DecimalOdds(value)
    }

    /// Profit (excluding the returned stake) if a bet at these odds wins.
    #[must_use]
    pub fn profit_on(self, stake: Money) -> Money {
        let odds = Decimal::from(self.0);
        if self.0 > 0 {
            stake * odds / Decimal::ONE_HUNDRED
        } else {
            stake * Decimal::ONE_HUNDRED / odds.abs()
        }
    }
}

impl TryFrom<i32> for AmericanOdds {
    type Error = DomainError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<AmericanOdds> for i32 {
    fn from(odds: AmericanOdds) -> Self {
        odds.0
    }
}

impl FromStr for AmericanOdds {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for AmericanOdds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 > 0 {
            write!(f, "+{}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// Payout multiplier, always greater than 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct DecimalOdds(Decimal);

impl DecimalOdds {
    /// Validate decimal odds in `(1, MAX_DECIMAL_ODDS]`.
    pub fn try_new(value: Decimal) -> Result<Self, DomainError> {
        if value <= Decimal::ONE || value > MAX_DECIMAL_ODDS {
            return Err(DomainError::InvalidDecimalOdds { value });
        }
        Ok(Self(value))
    }

    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let value = Decimal::from_str(input.trim()).map_err(|_| DomainError::Unparseable {
            input: input.to_string(),
            format: "decimal",
        })?;
        Self::try_new(value)
    }

    #[must_use]
    pub const fn value(self) -> Decimal {
        self.0
    }

    /// `d >= 2 ? round((d-1)*100) : round(-100/(d-1))`, saturating at
    /// [`MAX_AMERICAN_ODDS`].
    #[must_use]
    pub fn to_american(self) -> AmericanOdds {
        let net = self.0 - Decimal::ONE;
        let raw = if self.0 >= Decimal::TWO {
            net.checked_mul(Decimal::ONE_HUNDRED).unwrap_or(Decimal::MAX)
        } else {
            Decimal::NEGATIVE_ONE
                .checked_mul(Decimal::ONE_HUNDRED)
                .and_then(|hundred| hundred.checked_div(net))
                .unwrap_or(Decimal::MIN)
        };
        let saturated = if raw.is_sign_negative() {
            -MAX_AMERICAN_ODDS
        } else {
            MAX_AMERICAN_ODDS
        };
        let value = round_whole(raw).to_i32().unwrap_or(saturated);
        AmericanOdds(value.clamp(-MAX_AMERICAN_ODDS, MAX_AMERICAN_ODDS))
    }

    /// `(d-1)` over a denominator of 100, reduced by GCD.
    ///
    /// Lines shorter than 1.005 round to the smallest representable
    /// fraction, 1/100.
    #[must_use]
    pub fn to_fractional(self) -> FractionalOdds {
        let net = self.0 - Decimal::ONE;
        let numerator = net
            .checked_mul(Decimal::from(FRACTION_BASE))
            .map(round_whole)
            .and_then(|n| n.to_i64())
            .unwrap_or(i64::MAX)
            .max(1);
        let divisor = gcd(numerator, FRACTION_BASE);
        FractionalOdds {
            numerator: numerator / divisor,
            denominator: FRACTION_BASE / divisor,
        }
    }

    /// `100 / d`, as a percentage.
    #[must_use]
    pub fn implied_probability(self) -> ImpliedProbability {
        ImpliedProbability(Decimal::ONE_HUNDRED / self.0)
    }

    /// `1 / d`, as a fraction in (0, 1).
    #[must_use]
    pub fn implied_fraction(self) -> Decimal {
        Decimal::ONE / self.0
    }

    /// Total return (stake included) for the given stake.
    #[must_use]
    pub fn payout(self, stake: Money) -> Money {
        stake * self.0
    }
}

impl TryFrom<Decimal> for DecimalOdds {
    type Error = DomainError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<DecimalOdds> for Decimal {
    fn from(odds: DecimalOdds) -> Self {
        odds.0
    }
}

impl fmt::Display for DecimalOdds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.0
                .round_dp_with_strategy(3, RoundingStrategy::MidpointAwayFromZero)
                .normalize()
        )
    }
}

/// Profit-to-stake ratio written as `numerator/denominator`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FractionalOdds {
    numerator: i64,
    denominator: i64,
}

impl FractionalOdds {
    /// Validate a fraction. The denominator must be nonzero and the ratio
    /// positive and at most 10000; a negative denominator is folded into
    /// the numerator.
    pub fn try_new(numerator: i64, denominator: i64) -> Result<Self, DomainError> {
        let invalid = DomainError::InvalidFractionalOdds {
            numerator,
            denominator,
        };
        if denominator == 0 {
            return Err(invalid);
        }
        let (numerator, denominator) = if denominator < 0 {
            (
                numerator.checked_neg().ok_or_else(|| invalid.clone())?,
                denominator.checked_neg().ok_or_else(|| invalid.clone())?,
            )
        } else {
            (numerator, denominator)
        };
        if numerator <= 0 || numerator > denominator.saturating_mul(MAX_FRACTIONAL_RATIO) {
            return Err(invalid);
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }

    /// Parse text such as `3/2`. A bare integer is read as `n/1`.
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let unparseable = || DomainError::Unparseable {
            input: input.to_string(),
            format: "fractional",
        };
        let trimmed = input.trim();
        let (numerator, denominator) = match trimmed.split_once('/') {
            Some((n, d)) => (n.trim(), d.trim()),
            None => (trimmed, "1"),
        };
        let numerator = numerator.parse::<i64>().map_err(|_| unparseable())?;
        let denominator = denominator.parse::<i64>().map_err(|_| unparseable())?;
        Self::try_new(numerator, denominator)
    }

    #[must_use]
    pub const fn numerator(self) -> i64 {
        self.numerator
    }

    #[must_use]
    pub const fn denominator(self) -> i64 {
        self.denominator
    }

    /// The same ratio in lowest terms.
    #[must_use]
    pub fn reduced(self) -> Self {
        let divisor = gcd(self.numerator, self.denominator);
        Self {
            numerator: self.numerator / divisor,
            denominator: self.denominator / divisor,
        }
    }

    /// `1 + numerator/denominator`.
    #[must_use]
    pub fn to_decimal(self) -> DecimalOdds {
        DecimalOdds(
            Decimal::ONE + Decimal::from(self.numerator) / Decimal::from(self.denominator),
        )
    }
}

impl fmt::Display for FractionalOdds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

/// Implied probability as a percentage strictly between 0 and 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct ImpliedProbability(Decimal);

impl ImpliedProbability {
    /// Validate a percentage in `(0, 100)` whose decimal odds `100 / p`
    /// stay within [`MAX_DECIMAL_ODDS`].
    pub fn try_new(percent: Decimal) -> Result<Self, DomainError> {
        let out_of_range = percent <= Decimal::ZERO
            || percent >= Decimal::ONE_HUNDRED
            || Decimal::ONE_HUNDRED
                .checked_div(percent)
                .map_or(true, |decimal| decimal > MAX_DECIMAL_ODDS);
        if out_of_range {
            return Err(DomainError::ProbabilityOutOfRange { value: percent });
        }
        Ok(Self(percent))
    }

    /// Parse text such as `40`, `40%` or `52.38 %`.
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let trimmed = input.trim();
        let number = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();
        let percent = Decimal::from_str(number).map_err(|_| DomainError::Unparseable {
            input: input.to_string(),
            format: "probability",
        })?;
        Self::try_new(percent)
    }

    #[must_use]
    pub const fn percent(self) -> Decimal {
        self.0
    }

    /// The probability as a fraction in (0, 1).
    #[must_use]
    pub fn fraction(self) -> Decimal {
        self.0 / Decimal::ONE_HUNDRED
    }

    /// `100 / p`.
    #[must_use]
    pub fn to_decimal(self) -> DecimalOdds {
        DecimalOdds(Decimal::ONE_HUNDRED / self.0)
    }
}

impl TryFrom<Decimal> for ImpliedProbability {
    type Error = DomainError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<ImpliedProbability> for Decimal {
    fn from(probability: ImpliedProbability) -> Self {
        probability.0
    }
}

impl fmt::Display for ImpliedProbability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.2}%",
            self.0
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        )
    }
}

/// The four odds encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OddsFormat {
    American,
    Decimal,
    Fractional,
    Probability,
}

impl OddsFormat {
    pub const ALL: [OddsFormat; 4] = [
        OddsFormat::American,
        OddsFormat::Decimal,
        OddsFormat::Fractional,
        OddsFormat::Probability,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::American => "american",
            Self::Decimal => "decimal",
            Self::Fractional => "fractional",
            Self::Probability => "probability",
        }
    }

    /// Guess the format of free-form text: a `/` means fractional, a `%`
    /// means probability, a sign or a whole number of at least 100 means
    /// American, anything else decimal.
    #[must_use]
    pub fn detect(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.contains('/') {
            Self::Fractional
        } else if trimmed.ends_with('%') {
            Self::Probability
        } else if trimmed.starts_with('+') || trimmed.starts_with('-') {
            Self::American
        } else if trimmed
            .parse::<i64>()
            .map(|value| value >= 100)
            .unwrap_or(false)
        {
            Self::American
        } else {
            Self::Decimal
        }
    }
}

impl fmt::Display for OddsFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One betting line in exactly one encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OddsQuote {
    American(AmericanOdds),
    Decimal(DecimalOdds),
    Fractional(FractionalOdds),
    Probability(ImpliedProbability),
}

impl OddsQuote {
    /// Parse `input` in the given format.
    pub fn parse_as(format: OddsFormat, input: &str) -> Result<Self, DomainError> {
        Ok(match format {
            OddsFormat::American => Self::American(AmericanOdds::parse(input)?),
            OddsFormat::Decimal => Self::Decimal(DecimalOdds::parse(input)?),
            OddsFormat::Fractional => Self::Fractional(FractionalOdds::parse(input)?),
            OddsFormat::Probability => Self::Probability(ImpliedProbability::parse(input)?),
        })
    }

    #[must_use]
    pub const fn format(&self) -> OddsFormat {
        match self {
            Self::American(_) => OddsFormat::American,
            Self::Decimal(_) => OddsFormat::Decimal,
            Self::Fractional(_) => OddsFormat::Fractional,
            Self::Probability(_) => OddsFormat::Probability,
        }
    }

    /// Canonical decimal form.
    #[must_use]
    pub fn to_decimal(&self) -> DecimalOdds {
        match self {
            Self::American(odds) => odds.to_decimal(),
            Self::Decimal(odds) => *odds,
            Self::Fractional(odds) => odds.to_decimal(),
            Self::Probability(probability) => probability.to_decimal(),
        }
    }

    #[must_use]
    pub fn to_american(&self) -> AmericanOdds {
        match self {
            Self::American(odds) => *odds,
            other => other.to_decimal().to_american(),
        }
    }

    #[must_use]
    pub fn to_fractional(&self) -> FractionalOdds {
        match self {
            Self::Fractional(odds) => *odds,
            other => other.to_decimal().to_fractional(),
        }
    }

    #[must_use]
    pub fn implied_probability(&self) -> ImpliedProbability {
        match self {
            Self::Probability(probability) => *probability,
            other => other.to_decimal().implied_probability(),
        }
    }

    /// Render this quote in `format`.
    #[must_use]
    pub fn render(&self, format: OddsFormat) -> String {
        match format {
            OddsFormat::American => self.to_american().to_string(),
            OddsFormat::Decimal => self.to_decimal().to_string(),
            OddsFormat::Fractional => self.to_fractional().to_string(),
            OddsFormat::Probability => self.implied_probability().to_string(),
        }
    }
}

impl From<AmericanOdds> for OddsQuote {
    fn from(odds: AmericanOdds) -> Self {
        Self::American(odds)
    }
}

impl From<DecimalOdds> for OddsQuote {
    fn from(odds: DecimalOdds) -> Self {
        Self::Decimal(odds)
    }
}

impl fmt::Display for OddsQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(self.format()))
    }
}
