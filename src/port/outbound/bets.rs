//! Bet feed port: where bet records come from.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::sportsbook::same_book;
use crate::domain::{BetRecord, BetSource, BetStatus};
use crate::error::Result;

/// Server-side selection of bets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BetQuery {
    pub status: Option<BetStatus>,
    pub sportsbook: Option<String>,
    /// Upstream tracker; records with no source tag never match a set value.
    pub source: Option<BetSource>,
}

impl BetQuery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_status(mut self, status: BetStatus) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub fn with_sportsbook(mut self, sportsbook: impl Into<String>) -> Self {
        self.sportsbook = Some(sportsbook.into());
        self
    }

    #[must_use]
    pub const fn with_source(mut self, source: BetSource) -> Self {
        self.source = Some(source);
        self
    }

    /// Apply the query to a record already in memory.
    #[must_use]
    pub fn matches(&self, bet: &BetRecord) -> bool {
        self.status.map_or(true, |status| bet.status == status)
            && self
                .sportsbook
                .as_deref()
                .map_or(true, |book| same_book(book, &bet.sportsbook))
            && self.source.map_or(true, |source| bet.source == Some(source))
    }
}

/// A source of bet records.
#[async_trait]
pub trait BetFeed: Send + Sync {
    /// Fetch every bet matching `query`.
    async fn fetch_bets(&self, query: &BetQuery) -> Result<Vec<BetRecord>>;

    /// Feed name for logs and output.
    fn name(&self) -> &'static str;
}
