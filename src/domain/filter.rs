//! Bet selection for EV and pending views.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::bet::{BetRecord, BetStatus};

/// Which bets an analysis should consider.
///
/// Dates compare against [`BetRecord::event_time`] and are inclusive on both
/// ends. A bet with no usable time passes the date checks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BetFilter {
    #[serde(default)]
    pub include_pending: bool,
    #[serde(default)]
    pub include_player_props: bool,
    #[serde(default)]
    pub start: Option<NaiveDate>,
    #[serde(default)]
    pub end: Option<NaiveDate>,
    /// Drop bets whose event is after this instant.
    #[serde(default)]
    pub exclude_after: Option<NaiveDateTime>,
}

impl BetFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_pending(mut self, include: bool) -> Self {
        self.include_pending = include;
        self
    }

    #[must_use]
    pub const fn with_player_props(mut self, include: bool) -> Self {
        self.include_player_props = include;
        self
    }

    #[must_use]
    pub const fn between(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    /// Drop bets for events that have not started by `now`.
    #[must_use]
    pub const fn exclude_future(mut self, now: NaiveDateTime) -> Self {
        self.exclude_after = Some(now);
        self
    }

    #[must_use]
    pub fn matches(&self, bet: &BetRecord) -> bool {
        if !self.include_pending && bet.status == BetStatus::Pending {
            return false;
        }
        if !self.include_player_props && bet.is_player_prop() {
            return false;
        }
        let Some(time) = bet.event_time() else {
            return true;
        };
        let date = time.date();
        if self.start.is_some_and(|start| date < start) {
            return false;
        }
        if self.end.is_some_and(|end| date > end) {
            return false;
        }
        if self.exclude_after.is_some_and(|now| time > now) {
            return false;
        }
        true
    }

    /// Keep only matching bets.
    #[must_use]
    pub fn apply(&self, bets: Vec<BetRecord>) -> Vec<BetRecord> {
        bets.into_iter().filter(|bet| self.matches(bet)).collect()
    }
}
