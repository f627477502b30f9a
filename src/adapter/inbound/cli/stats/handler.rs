//! Handler for the `stats` command group.
//!
//! Loads bets from the selected feed, applies the bet filter, then builds
//! and prints one of the three reports.

use chrono::Local;
use serde_json::json;

use crate::adapter::inbound::cli::command::{StatsArgs, StatsCommand};
use crate::adapter::inbound::cli::{feed, output};
use crate::domain::{BetFilter, BetRecord, EvReport, PendingReport, PerformanceSummary};
use crate::error::{Error, Result};
use crate::infrastructure::config::{Config, EvConfig};

use super::format::{print_ev_report, print_pending_report, print_summary};

/// Which report the filter feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Report {
    Summary,
    Ev,
    Pending,
}

/// Combine flags with the `[ev]` defaults. Summary and pending views always
/// keep pending bets.
pub fn build_filter(args: &StatsArgs, defaults: &EvConfig, report: Report) -> Result<BetFilter> {
    if let (Some(from), Some(to)) = (args.from, args.to) {
        if from > to {
            return Err(Error::Parse(format!("--from {from} is after --to {to}")));
        }
    }

    let include_pending = match report {
        Report::Ev => args.include_pending || defaults.include_pending,
        Report::Summary | Report::Pending => true,
    };
    let mut filter = defaults
        .filter()
        .with_pending(include_pending)
        .with_player_props(args.include_props || defaults.include_player_props)
        .between(args.from, args.to);
    if args.exclude_future {
        filter = filter.exclude_future(Local::now().naive_local());
    }
    Ok(filter)
}

async fn load(args: &StatsArgs, config: &Config, report: Report) -> Result<Vec<BetRecord>> {
    let filter = build_filter(args, &config.ev, report)?;
    let source = feed::open(&args.feed, &config.api)?;
    let query = feed::query(&args.feed);

    let spinner = output::spinner(&format!("Loading bets from {}", source.name()));
    let bets = match source.fetch_bets(&query).await {
        Ok(bets) => bets,
        Err(err) => {
            output::spinner_fail(&spinner, "Loading bets failed");
            return Err(err);
        }
    };
    let fetched = bets.len();
    let bets = filter.apply(bets);
    output::spinner_success(
        &spinner,
        &format!("Loaded {} bets ({} after filters)", fetched, bets.len()),
    );
    tracing::debug!(fetched, kept = bets.len(), ?filter, "filtered bets");
    Ok(bets)
}

/// Execute a `stats` subcommand.
pub async fn execute(command: &StatsCommand, config: &Config) -> Result<()> {
    match command {
        StatsCommand::Summary(args) => execute_summary(args, config).await,
        StatsCommand::Ev(args) => execute_ev(args, config).await,
        StatsCommand::Pending(args) => execute_pending(args, config).await,
    }
}

async fn execute_summary(args: &StatsArgs, config: &Config) -> Result<()> {
    if output::is_quiet() && !output::is_json() {
        return Ok(());
    }

    let bets = load(args, config, Report::Summary).await?;
    let summary = PerformanceSummary::from_bets(&bets);

    if output::is_json() {
        output::json_output(json!({
            "command": "stats.summary",
            "from": args.from,
            "to": args.to,
            "summary": serde_json::to_value(&summary)?,
        }));
        return Ok(());
    }

    print_summary(&summary);
    Ok(())
}

async fn execute_ev(args: &StatsArgs, config: &Config) -> Result<()> {
    if output::is_quiet() && !output::is_json() {
        return Ok(());
    }

    let bets = load(args, config, Report::Ev).await?;
    let report = EvReport::from_bets(bets);

    if output::is_json() {
        output::json_output(json!({
            "command": "stats.ev",
            "from": args.from,
            "to": args.to,
            "report": serde_json::to_value(&report)?,
        }));
        return Ok(());
    }

    print_ev_report(&report);
    Ok(())
}

async fn execute_pending(args: &StatsArgs, config: &Config) -> Result<()> {
    if output::is_quiet() && !output::is_json() {
        return Ok(());
    }

    let bets = load(args, config, Report::Pending).await?;
    let report = PendingReport::from_bets(bets);

    if output::is_json() {
        output::json_output(json!({
            "command": "stats.pending",
            "report": serde_json::to_value(&report)?,
        }));
        return Ok(());
    }

    print_pending_report(&report);
    Ok(())
}
