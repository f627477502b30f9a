//! Route a parsed command line to its handler.

use crate::adapter::inbound::cli::command::{BetsCommand, Cli, Commands, ConfigCommand};
use crate::adapter::inbound::cli::{arb, bets, books, config, convert, ev, sharp, stats};
use crate::error::Result;
use crate::infrastructure::config::{Config, LoggingConfig};

/// Log level selected by repeated `-v` flags, if any.
#[must_use]
pub const fn verbosity_level(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
}

fn init_logging(mut logging: LoggingConfig, verbose: u8) {
    if let Some(level) = verbosity_level(verbose) {
        logging.level = level.to_string();
    }
    logging.init();
}

/// Execute the parsed command line.
pub async fn execute(cli: Cli) -> Result<()> {
    // Commands that manage the config file must not require a valid one.
    match &cli.command {
        Commands::Config(ConfigCommand::Init(args)) => {
            init_logging(LoggingConfig::default(), cli.verbose);
            return config::execute_init(&args.path, args.force);
        }
        Commands::Config(ConfigCommand::Validate) => {
            init_logging(LoggingConfig::default(), cli.verbose);
            return config::execute_validate(&cli.config);
        }
        _ => {}
    }

    let settings = Config::load_or_default(&cli.config)?;
    init_logging(settings.logging.clone(), cli.verbose);
    tracing::debug!(config = %cli.config.display(), "configuration loaded");

    match &cli.command {
        Commands::Convert(args) => convert::execute(args),
        Commands::Arb(args) => arb::execute(args, &settings.arbitrage),
        Commands::Ev(args) => ev::execute(args),
        Commands::Sharp(args) => sharp::execute(args, &settings.sharp),
        Commands::Bets(BetsCommand::List(args)) => bets::execute_list(args, &settings.api).await,
        Commands::Bets(BetsCommand::Unverified(args)) => {
            bets::execute_unverified(args, &settings.api).await
        }
        Commands::Bets(BetsCommand::Verify(args)) => {
            bets::execute_verify(args, &settings.api).await
        }
        Commands::Stats(command) => stats::handler::execute(command, &settings).await,
        Commands::Books => books::list(),
        Commands::Config(ConfigCommand::Show) => config::execute_show(&settings),
        Commands::Config(ConfigCommand::Init(_) | ConfigCommand::Validate) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(verbosity_level(0), None);
        assert_eq!(verbosity_level(1), Some("info"));
        assert_eq!(verbosity_level(2), Some("debug"));
        assert_eq!(verbosity_level(5), Some("trace"));
    }
}
