//! Bet feed selection for the `bets` and `stats` commands.

use crate::adapter::inbound::cli::command::FeedArgs;
use crate::adapter::outbound::api::ApiClient;
use crate::adapter::outbound::file::JsonFileSource;
use crate::error::Result;
use crate::infrastructure::config::ApiConfig;
use crate::port::{BetFeed, BetQuery};

/// Exported file when `--file` is given, otherwise the tracker API.
pub fn open(args: &FeedArgs, api: &ApiConfig) -> Result<Box<dyn BetFeed>> {
    if let Some(path) = &args.file {
        return Ok(Box::new(JsonFileSource::new(path.clone())));
    }
    Ok(Box::new(ApiClient::from_config(api)?))
}

/// Query narrowed by the feed flags.
#[must_use]
pub fn query(args: &FeedArgs) -> BetQuery {
    let mut query = BetQuery::new();
    if let Some(source) = args.source {
        query = query.with_source(source.into());
    }
    if let Some(book) = args.sportsbook.as_deref().filter(|b| !b.trim().is_empty()) {
        query = query.with_sportsbook(book);
    }
    query
}
