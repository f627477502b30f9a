//! Handlers for the `bets` command group.

use serde_json::json;
use tabled::{Table, Tabled};

use crate::adapter::inbound::cli::command::{BetsListArgs, FeedArgs, VerifyArgs};
use crate::adapter::inbound::cli::{feed, output};
use crate::adapter::outbound::api::{ApiClient, MAX_VERIFY_BATCH};
use crate::domain::BetRecord;
use crate::error::Result;
use crate::infrastructure::config::ApiConfig;
use crate::port::BetFeed;

#[derive(Tabled)]
struct BetRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Sportsbook")]
    sportsbook: String,
    #[tabled(rename = "Bet")]
    description: String,
    #[tabled(rename = "Odds")]
    odds: String,
    #[tabled(rename = "CLV")]
    clv: String,
    #[tabled(rename = "Stake")]
    stake: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Profit")]
    profit: String,
}

impl From<&BetRecord> for BetRow {
    fn from(bet: &BetRecord) -> Self {
        Self {
            id: bet.id,
            date: bet
                .event_time()
                .map(|time| time.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "-".to_string()),
            sportsbook: bet.sportsbook.clone(),
            description: truncate(&bet.description(), 48),
            odds: bet
                .placed_odds()
                .map_or_else(|| bet.odds.to_string(), |odds| odds.to_string()),
            clv: bet
                .closing_line()
                .map_or_else(|| "-".to_string(), |odds| odds.to_string()),
            stake: output::money(bet.stake),
            status: bet.status.to_string(),
            profit: output::money(bet.bet_profit),
        }
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    truncated.push('…');
    truncated
}

async fn fetch(feed: &dyn BetFeed, query: &crate::port::BetQuery) -> Result<Vec<BetRecord>> {
    let spinner = output::spinner(&format!("Fetching bets from {}", feed.name()));
    match feed.fetch_bets(query).await {
        Ok(bets) => {
            output::spinner_success(&spinner, &format!("Fetched {} bets", bets.len()));
            Ok(bets)
        }
        Err(err) => {
            output::spinner_fail(&spinner, "Fetching bets failed");
            Err(err)
        }
    }
}

fn print_bets(command: &str, title: &str, bets: &[BetRecord]) -> Result<()> {
    if output::is_json() {
        output::json_output(json!({
            "command": command,
            "count": bets.len(),
            "bets": serde_json::to_value(bets)?,
        }));
        return Ok(());
    }

    output::section(title);
    if bets.is_empty() {
        output::note("No bets found.");
        return Ok(());
    }

    let rows: Vec<BetRow> = bets.iter().map(BetRow::from).collect();
    output::lines(&Table::new(rows).to_string());
    output::field("Bets", bets.len());
    Ok(())
}

/// Execute `bets list`.
pub async fn execute_list(args: &BetsListArgs, api: &ApiConfig) -> Result<()> {
    let source = feed::open(&args.feed, api)?;
    let mut query = feed::query(&args.feed);
    if let Some(status) = args.status {
        query = query.with_status(status.into());
    }

    let mut bets = fetch(source.as_ref(), &query).await?;
    if let Some(limit) = args.limit {
        bets.truncate(limit);
    }

    print_bets("bets.list", "Bets", &bets)
}

/// Execute `bets unverified`.
///
/// The backend returns settled OddsJam bets that are not yet verified. From
/// a file the same selection is applied locally.
pub async fn execute_unverified(args: &FeedArgs, api: &ApiConfig) -> Result<()> {
    let query = feed::query(args);
    let bets = if args.file.is_some() {
        let source = feed::open(args, api)?;
        fetch(source.as_ref(), &query)
            .await?
            .into_iter()
            .filter(BetRecord::awaits_verification)
            .collect()
    } else {
        let client = ApiClient::from_config(api)?;
        let spinner = output::spinner("Fetching unverified bets");
        match client.unverified_bets(&query).await {
            Ok(bets) => {
                output::spinner_success(&spinner, &format!("Fetched {} bets", bets.len()));
                bets
            }
            Err(err) => {
                output::spinner_fail(&spinner, "Fetching unverified bets failed");
                return Err(err);
            }
        }
    };

    print_bets("bets.unverified", "Unverified Bets", &bets)
}

/// Execute `bets verify`.
///
/// A single id uses the per-bet endpoint; more are sent in batches of
/// [`MAX_VERIFY_BATCH`].
pub async fn execute_verify(args: &VerifyArgs, api: &ApiConfig) -> Result<()> {
    let client = ApiClient::from_config(api)?;

    let verified: Vec<i64> = if let [id] = args.ids.as_slice() {
        let response = client.verify_bet(*id).await?;
        if response.verified {
            vec![response.bet_id]
        } else {
            Vec::new()
        }
    } else {
        let mut verified = Vec::with_capacity(args.ids.len());
        for batch in args.ids.chunks(MAX_VERIFY_BATCH) {
            let response = client.verify_bets(batch).await?;
            tracing::debug!(
                requested = batch.len(),
                verified = response.verified_count,
                "verified batch"
            );
            verified.extend(response.verified_bet_ids);
        }
        verified
    };

    if output::is_json() {
        output::json_output(json!({
            "command": "bets.verify",
            "requested": args.ids.len(),
            "verified_count": verified.len(),
            "verified_bet_ids": verified,
        }));
        return Ok(());
    }

    output::section("Verify");
    output::field("Requested", args.ids.len());
    output::field("Verified", verified.len());
    if verified.len() == args.ids.len() {
        output::success("All bets verified");
    } else {
        let missing: Vec<String> = args
            .ids
            .iter()
            .filter(|id| !verified.contains(id))
            .map(ToString::to_string)
            .collect();
        output::warning(&format!("Not verified: {}", missing.join(", ")));
    }
    Ok(())
}
