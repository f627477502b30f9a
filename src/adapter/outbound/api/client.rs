//! HTTP client for the bet-tracker backend.
//!
//! Endpoints live under `{base}/api/unified/`. List endpoints are paginated
//! and the client walks every page. Timeouts and connection failures are
//! retried with a fixed backoff; any other failure is returned as is.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client as HttpClient, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tokio::time::sleep;
use tracing::{debug, info, warn};
use url::Url;

use super::dto::{ErrorBody, Page, VerifyBetResponse, VerifyMultipleRequest, VerifyMultipleResponse};
use crate::domain::BetRecord;
use crate::error::{ApiError, Error, Result};
use crate::infrastructure::config::ApiConfig;
use crate::port::{BetFeed, BetQuery};

/// Most ids the backend verifies in one request.
pub const MAX_VERIFY_BATCH: usize = 100;

/// Client for the bet-tracker REST API.
pub struct ApiClient {
    http: HttpClient,
    base_url: Url,
    per_page: u32,
    retry_max_attempts: u32,
    retry_backoff_ms: u64,
}

impl ApiClient {
    /// Client with default timeouts and no retries.
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            http: HttpClient::new(),
            base_url: normalize_base(base_url)?,
            per_page: ApiConfig::default().per_page,
            retry_max_attempts: 1,
            retry_backoff_ms: 0,
        })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            });

        Ok(Self {
            http,
            base_url: normalize_base(&config.base_url)?,
            per_page: config.per_page.max(1),
            retry_max_attempts: config.retry_max_attempts,
            retry_backoff_ms: config.retry_backoff_ms,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    async fn send_with_retry<T, F>(&self, endpoint: &Url, build: F) -> Result<T>
    where
        T: DeserializeOwned,
        F: Fn() -> RequestBuilder,
    {
        let mut attempt = 0;
        let max_attempts = self.retry_max_attempts.max(1);

        loop {
            attempt += 1;
            let response = match build().send().await {
                Ok(response) => response,
                Err(err) => {
                    if attempt >= max_attempts || !Self::should_retry(&err) {
                        return Err(err.into());
                    }
                    self.backoff(attempt, max_attempts, &err).await;
                    continue;
                }
            };

            let status = response.status();
            let body = match response.text().await {
                Ok(body) => body,
                Err(err) => {
                    if attempt >= max_attempts || !Self::should_retry(&err) {
                        return Err(err.into());
                    }
                    self.backoff(attempt, max_attempts, &err).await;
                    continue;
                }
            };

            if !status.is_success() {
                return Err(status_error(endpoint, status, &body));
            }
            return serde_json::from_str(&body).map_err(Error::from);
        }
    }

    fn should_retry(err: &reqwest::Error) -> bool {
        err.is_timeout() || err.is_connect()
    }

    async fn backoff(&self, attempt: u32, max_attempts: u32, err: &reqwest::Error) {
        warn!(
            attempt,
            max_attempts,
            error = %err,
            "HTTP request failed, retrying"
        );
        if self.retry_backoff_ms > 0 {
            sleep(Duration::from_millis(self.retry_backoff_ms)).await;
        }
    }

    async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &BetQuery,
        page: u32,
    ) -> Result<Page<T>> {
        let mut url = self.endpoint(path)?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("page", &page.to_string());
            pairs.append_pair("per_page", &self.per_page.to_string());
            if let Some(status) = query.status {
                pairs.append_pair("status", status.as_str());
            }
            if let Some(sportsbook) = &query.sportsbook {
                pairs.append_pair("sportsbook", sportsbook);
            }
            if let Some(source) = query.source {
                pairs.append_pair("source", source.as_str());
            }
        }
        debug!(url = %url, "Fetching page");
        self.send_with_retry(&url, || self.http.get(url.clone())).await
    }

    async fn get_all_pages(&self, path: &str, query: &BetQuery) -> Result<Vec<BetRecord>> {
        let mut bets = Vec::new();
        let mut page = 1;
        loop {
            let response: Page<BetRecord> = self.get_page(path, query, page).await?;
            let last = response.is_last(page);
            debug!(
                page = response.current_page,
                pages = response.pages,
                total = response.total,
                count = response.items.len(),
                "Fetched bets page"
            );
            bets.extend(response.items);
            if last {
                break;
            }
            page += 1;
        }
        Ok(bets)
    }

    /// Every bet matching `query`, across all pages.
    pub async fn list_bets(&self, query: &BetQuery) -> Result<Vec<BetRecord>> {
        info!(base_url = %self.base_url, "Fetching bets");
        let bets = self.get_all_pages("api/unified/bets", query).await?;
        info!(count = bets.len(), "Fetched bets");
        Ok(bets)
    }

    /// OddsJam bets still awaiting manual verification.
    pub async fn unverified_bets(&self, query: &BetQuery) -> Result<Vec<BetRecord>> {
        info!(base_url = %self.base_url, "Fetching unverified bets");
        self.get_all_pages("api/unified/unverified-bets", query).await
    }

    /// Mark one bet as verified.
    pub async fn verify_bet(&self, id: i64) -> Result<VerifyBetResponse> {
        let url = self.endpoint(&format!("api/unified/verify-bet/{id}"))?;
        info!(bet_id = id, "Verifying bet");
        self.send_with_retry(&url, || self.http.put(url.clone()))
            .await
            .map_err(|err| match err {
                Error::Api(ApiError::Status { status: 404, .. }) => ApiError::NotFound { id }.into(),
                other => other,
            })
    }

    /// Mark up to [`MAX_VERIFY_BATCH`] bets as verified.
    pub async fn verify_bets(&self, ids: &[i64]) -> Result<VerifyMultipleResponse> {
        if ids.is_empty() {
            return Err(ApiError::EmptyIds.into());
        }
        if ids.len() > MAX_VERIFY_BATCH {
            return Err(ApiError::TooManyIds {
                count: ids.len(),
                max: MAX_VERIFY_BATCH,
            }
            .into());
        }
        let url = self.endpoint("api/unified/verify-multiple")?;
        let body = VerifyMultipleRequest { bet_ids: ids };
        info!(count = ids.len(), "Verifying bets");
        self.send_with_retry(&url, || self.http.put(url.clone()).json(&body))
            .await
    }
}

#[async_trait]
impl BetFeed for ApiClient {
    async fn fetch_bets(&self, query: &BetQuery) -> Result<Vec<BetRecord>> {
        self.list_bets(query).await
    }

    fn name(&self) -> &'static str {
        "api"
    }
}

/// Parse the base URL and make sure relative joins append to its path.
fn normalize_base(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw.trim())?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn status_error(endpoint: &Url, status: StatusCode, body: &str) -> Error {
    let message = serde_json::from_str::<ErrorBody>(body)
        .map(|parsed| parsed.error)
        .unwrap_or_else(|_| body.trim().to_string());
    ApiError::Status {
        endpoint: endpoint.path().to_string(),
        status: status.as_u16(),
        body: message,
    }
    .into()
}
