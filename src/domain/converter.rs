//! Four-field odds converter state.
//!
//! Holds the text of the American, decimal, fractional and probability
//! fields plus a stake. Editing one field re-derives the other three from
//! the parsed quote but never rewrites the field being typed into. An edit
//! that fails validation only stores the raw text; every derived value keeps
//! its last valid state.

use rust_decimal::Decimal;
use std::str::FromStr;

use super::error::DomainError;
use super::money::{validate_stake, Money};
use super::odds::{OddsFormat, OddsQuote};
use super::wager::{Wager, WagerSummary};

#[derive(Debug, Clone, Default)]
pub struct OddsConverter {
    fields: [String; 4],
    stake_text: String,
    quote: Option<OddsQuote>,
    stake: Option<Money>,
    wager: Option<WagerSummary>,
}

const fn slot(format: OddsFormat) -> usize {
    match format {
        OddsFormat::American => 0,
        OddsFormat::Decimal => 1,
        OddsFormat::Fractional => 2,
        OddsFormat::Probability => 3,
    }
}

impl OddsConverter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a stake already filled in.
    #[must_use]
    pub fn with_stake(stake: Money) -> Self {
        let mut converter = Self::default();
        if validate_stake(stake).is_ok() {
            converter.stake_text = stake.to_string();
            converter.stake = Some(stake);
        }
        converter
    }

    /// Apply a keystroke-level edit to one odds field.
    ///
    /// On success the other three fields and the wager are recomputed. On
    /// rejection only the edited field's text changes.
    pub fn edit(&mut self, field: OddsFormat, text: &str) -> Result<(), DomainError> {
        self.fields[slot(field)] = text.to_string();
        let quote = OddsQuote::parse_as(field, text)?;
        self.quote = Some(quote);
        for other in OddsFormat::ALL {
            if other != field {
                self.fields[slot(other)] = quote.render(other);
            }
        }
        self.recompute_wager();
        Ok(())
    }

    /// Update the stake text; the wager is recomputed only for an accepted
    /// amount (positive, at most [`super::MAX_STAKE`]).
    pub fn set_stake(&mut self, text: &str) -> Result<(), DomainError> {
        self.stake_text = text.to_string();
        let stake = Decimal::from_str(text.trim()).map_err(|_| DomainError::Unparseable {
            input: text.to_string(),
            format: "stake",
        })?;
        self.stake = Some(validate_stake(stake)?);
        self.recompute_wager();
        Ok(())
    }

    fn recompute_wager(&mut self) {
        if let (Some(quote), Some(stake)) = (self.quote, self.stake) {
            if let Ok(wager) = Wager::new(stake, quote) {
                self.wager = Some(wager.summary());
            }
        }
    }

    /// Current text of a field, as typed or as last derived.
    #[must_use]
    pub fn field(&self, field: OddsFormat) -> &str {
        &self.fields[slot(field)]
    }

    #[must_use]
    pub fn stake_text(&self) -> &str {
        &self.stake_text
    }

    /// Last valid quote.
    #[must_use]
    pub const fn quote(&self) -> Option<OddsQuote> {
        self.quote
    }

    /// Last valid wager, once both odds and stake have been accepted.
    #[must_use]
    pub const fn wager(&self) -> Option<WagerSummary> {
        self.wager
    }
}
