//! Bet feed backed by an exported JSON file.
//!
//! Accepts either a bare array of bet records or the paginated envelope the
//! API returns (`{"items": [...], ...}`), so a saved API response can be
//! analyzed offline.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info};

use super::api::dto::Page;
use crate::domain::BetRecord;
use crate::error::Result;
use crate::port::{BetFeed, BetQuery};

#[derive(Deserialize)]
#[serde(untagged)]
enum BetFile {
    List(Vec<BetRecord>),
    Page(Page<BetRecord>),
}

/// Reads bets from a JSON file on every fetch.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse file contents without applying any query.
    pub fn parse(content: &str) -> Result<Vec<BetRecord>> {
        let parsed: BetFile = serde_json::from_str(content)?;
        Ok(match parsed {
            BetFile::List(bets) => bets,
            BetFile::Page(page) => page.items,
        })
    }
}

#[async_trait]
impl BetFeed for JsonFileSource {
    async fn fetch_bets(&self, query: &BetQuery) -> Result<Vec<BetRecord>> {
        let content = tokio::fs::read_to_string(&self.path).await?;
        let bets = Self::parse(&content)?;
        let total = bets.len();
        let bets: Vec<_> = bets.into_iter().filter(|bet| query.matches(bet)).collect();
        debug!(total, kept = bets.len(), "Applied bet query to file");
        info!(path = %self.path.display(), count = bets.len(), "Loaded bets from file");
        Ok(bets)
    }

    fn name(&self) -> &'static str {
        "file"
    }
}
