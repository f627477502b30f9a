//! Request and response bodies for the bet-tracker REST API.

use serde::{Deserialize, Serialize};

/// Paginated list envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    #[serde(default = "first_page")]
    pub current_page: u32,
    #[serde(default)]
    pub pages: u32,
    #[serde(default)]
    pub total: u64,
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

const fn first_page() -> u32 {
    1
}

impl<T> Page<T> {
    /// True when no page follows `requested`, the page number that was asked
    /// for. A server that echoes a stale `current_page` still terminates.
    #[must_use]
    pub fn is_last(&self, requested: u32) -> bool {
        self.items.is_empty() || self.current_page.max(requested) >= self.pages
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct VerifyMultipleRequest<'a> {
    pub bet_ids: &'a [i64],
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerifyBetResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub bet_id: i64,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub verified_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerifyMultipleResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub verified_count: usize,
    #[serde(default)]
    pub verified_bet_ids: Vec<i64>,
    #[serde(default)]
    pub verified_at: Option<String>,
}

/// Error body returned with non-2xx statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
