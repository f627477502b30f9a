//! Command-line interface definitions.
//!
//! Defines the CLI structure for the linewise application using `clap`.
//! Calculator commands (`convert`, `arb`, `ev`, `sharp`) work offline; the
//! `bets` and `stats` groups read bet records from the tracker API or from
//! an exported JSON file.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;

use super::paths;
use crate::domain::{BetSource, BetStatus, OddsFormat, PolicyKind};

/// Sports betting odds, arbitrage and expected-value toolkit
#[derive(Parser, Debug)]
#[command(name = "linewise")]
#[command(version)]
pub struct Cli {
    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to the configuration file
    #[arg(short, long, global = true, default_value_os_t = paths::default_config())]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Debug, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Top-level subcommands for the linewise CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert a line between American, decimal, fractional and probability
    Convert(ConvertArgs),

    /// Size stakes across outcomes and check for an arbitrage
    Arb(ArbArgs),

    /// Expected value of a bet against its closing line
    Ev(EvArgs),

    /// Size a bet that follows inferred sharp exposure
    Sharp(SharpArgs),

    /// List and verify tracked bets
    #[command(subcommand)]
    Bets(BetsCommand),

    /// Performance and EV statistics over tracked bets
    #[command(subcommand)]
    Stats(StatsCommand),

    /// List configured sportsbooks and the tracker each one uses
    Books,

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Odds encoding accepted on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum FormatArg {
    American,
    Decimal,
    Fractional,
    Probability,
}

impl From<FormatArg> for OddsFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::American => Self::American,
            FormatArg::Decimal => Self::Decimal,
            FormatArg::Fractional => Self::Fractional,
            FormatArg::Probability => Self::Probability,
        }
    }
}

/// Sharp sizing policy selectable on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum PolicyArg {
    Threshold,
    Linear,
}

impl From<PolicyArg> for PolicyKind {
    fn from(value: PolicyArg) -> Self {
        match value {
            PolicyArg::Threshold => Self::Threshold,
            PolicyArg::Linear => Self::Linear,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum StatusArg {
    Pending,
    Won,
    Lost,
    Push,
    Void,
    Refunded,
}

impl From<StatusArg> for BetStatus {
    fn from(value: StatusArg) -> Self {
        match value {
            StatusArg::Pending => Self::Pending,
            StatusArg::Won => Self::Won,
            StatusArg::Lost => Self::Lost,
            StatusArg::Push => Self::Push,
            StatusArg::Void => Self::Void,
            StatusArg::Refunded => Self::Refunded,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum SourceArg {
    #[value(name = "oddsjam")]
    OddsJam,
    Pikkit,
}

impl From<SourceArg> for BetSource {
    fn from(value: SourceArg) -> Self {
        match value {
            SourceArg::OddsJam => Self::OddsJam,
            SourceArg::Pikkit => Self::Pikkit,
        }
    }
}

/// Arguments for `convert`.
#[derive(Parser, Debug)]
pub struct ConvertArgs {
    /// Line to convert, e.g. +150, 2.5, 3/2 or 40%
    #[arg(allow_negative_numbers = true)]
    pub value: String,

    /// Encoding of the value (detected when omitted)
    #[arg(long)]
    pub from: Option<FormatArg>,

    /// Stake for payout and to-win figures
    #[arg(long)]
    pub stake: Option<Decimal>,
}

/// Arguments for `arb`.
#[derive(Parser, Debug)]
pub struct ArbArgs {
    /// One line per outcome (at least two)
    #[arg(required = true, num_args = 2.., allow_negative_numbers = true)]
    pub odds: Vec<String>,

    /// Encoding of every line (detected per line when omitted)
    #[arg(long)]
    pub format: Option<FormatArg>,

    /// Total budget to split across outcomes
    #[arg(long)]
    pub stake: Option<Decimal>,

    /// Sportsbook label for each outcome, in order
    #[arg(long = "book")]
    pub books: Vec<String>,
}

/// Arguments for `ev`.
#[derive(Parser, Debug)]
pub struct EvArgs {
    /// Placed American odds
    #[arg(long, allow_negative_numbers = true)]
    pub odds: String,

    /// Closing American odds
    #[arg(long, allow_negative_numbers = true)]
    pub clv: Option<String>,

    /// Stake placed
    #[arg(long, default_value = "100")]
    pub stake: Decimal,
}

/// Arguments for `sharp`.
#[derive(Parser, Debug)]
pub struct SharpArgs {
    /// American odds where the liquidity rests
    #[arg(long, allow_negative_numbers = true)]
    pub odds: String,

    /// Visible liquidity in dollars
    #[arg(long)]
    pub liquidity: Decimal,

    /// Sizing policy (defaults to the configured one)
    #[arg(long)]
    pub policy: Option<PolicyArg>,

    /// Override the linear policy's stake cap
    #[arg(long)]
    pub max_bet: Option<Decimal>,

    /// Override the linear policy's scale factor
    #[arg(long)]
    pub scale: Option<Decimal>,

    /// Override the threshold policy's minimum stake
    #[arg(long)]
    pub min_stake: Option<Decimal>,
}

/// Where to read bets from and which ones to request.
#[derive(Parser, Debug, Default)]
pub struct FeedArgs {
    /// Read bets from an exported JSON file instead of the API
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Only bets from this tracker
    #[arg(long)]
    pub source: Option<SourceArg>,

    /// Only bets at this sportsbook
    #[arg(long)]
    pub sportsbook: Option<String>,
}

/// Subcommands for `linewise bets`.
#[derive(Subcommand, Debug)]
pub enum BetsCommand {
    /// List bets.
    List(BetsListArgs),
    /// List OddsJam bets awaiting verification.
    Unverified(FeedArgs),
    /// Mark bets as verified (at most 100 at once).
    Verify(VerifyArgs),
}

/// Arguments for `bets list`.
#[derive(Parser, Debug)]
pub struct BetsListArgs {
    #[command(flatten)]
    pub feed: FeedArgs,

    /// Only bets with this status
    #[arg(long)]
    pub status: Option<StatusArg>,

    /// Show at most this many bets
    #[arg(long)]
    pub limit: Option<usize>,
}

/// Arguments for `bets verify`.
#[derive(Parser, Debug)]
pub struct VerifyArgs {
    /// Bet ids to verify
    #[arg(required = true)]
    pub ids: Vec<i64>,
}

/// Subcommands for `linewise stats`.
#[derive(Subcommand, Debug)]
pub enum StatsCommand {
    /// Realized results: record, profit, ROI, win rate.
    Summary(StatsArgs),
    /// Expected value against the closing line.
    Ev(StatsArgs),
    /// Expected profit on open bets.
    Pending(StatsArgs),
}

/// Arguments shared by the `stats` subcommands.
#[derive(Parser, Debug)]
pub struct StatsArgs {
    #[command(flatten)]
    pub feed: FeedArgs,

    /// First event date to include (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Last event date to include (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<NaiveDate>,

    /// Include pending bets
    #[arg(long)]
    pub include_pending: bool,

    /// Include player props
    #[arg(long)]
    pub include_props: bool,

    /// Drop bets for events that have not started yet
    #[arg(long)]
    pub exclude_future: bool,
}

/// Subcommands for `linewise config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Generate a new configuration file from template.
    Init(ConfigInitArgs),
    /// Display the effective configuration with defaults applied.
    Show,
    /// Validate a configuration file for correctness.
    Validate,
}

/// Arguments for the `config init` subcommand.
#[derive(Parser, Debug)]
pub struct ConfigInitArgs {
    /// Output path for the generated configuration file.
    #[arg(default_value_os_t = paths::default_config())]
    pub path: PathBuf,
    /// Overwrite the file if it already exists.
    #[arg(long)]
    pub force: bool,
}
