//! Handler for the `config` command group.

use std::fs;
use std::path::Path;

use serde_json::json;

use crate::adapter::inbound::cli::output;
use crate::error::{ConfigError, Result};
use crate::infrastructure::config::Config;

/// Default config template with documentation.
const CONFIG_TEMPLATE: &str = include_str!("../../../../config.toml.example");

/// Execute `config init`.
pub fn execute_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(ConfigError::InvalidValue {
            field: "config",
            reason: "file already exists (use --force to overwrite)".to_string(),
        }
        .into());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, CONFIG_TEMPLATE)?;
    output::section("Config Initialized");
    output::success("Created configuration file");
    output::field("Path", path.display());
    output::section("Next Steps");
    output::note(&format!("1. Edit {} with your settings", path.display()));
    output::note("2. Point [api].base_url (or LINEWISE_API_URL) at your tracker");
    output::note(&format!(
        "3. Run: linewise config validate -c {}",
        path.display()
    ));
    Ok(())
}

/// Execute `config show`.
pub fn execute_show(config: &Config) -> Result<()> {
    if output::is_json() {
        output::json_output(json!({
            "command": "config.show",
            "config": serde_json::to_value(config)?,
        }));
        return Ok(());
    }

    output::section("Effective Configuration");

    output::section("Logging");
    output::field("Level", &config.logging.level);
    output::field("Format", &config.logging.format);

    output::section("API");
    output::field("Base URL", &config.api.base_url);
    output::field("Timeout", format!("{}ms", config.api.timeout_ms));
    output::field(
        "Connect timeout",
        format!("{}ms", config.api.connect_timeout_ms),
    );
    output::field(
        "Retries",
        format!(
            "{} attempts, {}ms backoff",
            config.api.retry_max_attempts, config.api.retry_backoff_ms
        ),
    );
    output::field("Page size", config.api.per_page);

    output::section("Sharp Copier");
    output::field("Policy", config.sharp.policy);
    output::field("Min stake", output::money(config.sharp.threshold.min_stake));
    output::field(
        "Gray area",
        format!(
            "{} - {}",
            output::money(config.sharp.threshold.low_threshold),
            output::money(config.sharp.threshold.high_threshold)
        ),
    );
    output::field("Unit stake", output::money(config.sharp.threshold.unit_stake));
    output::field("Scale factor", config.sharp.linear.scale_factor);
    output::field("Max bet", output::money(config.sharp.linear.max_bet));

    output::section("Arbitrage");
    output::field(
        "Default stake",
        output::money(config.arbitrage.default_total_stake),
    );

    output::section("EV Filters");
    output::field(
        "Pending bets",
        if config.ev.include_pending {
            "included"
        } else {
            "excluded"
        },
    );
    output::field(
        "Player props",
        if config.ev.include_player_props {
            "included"
        } else {
            "excluded"
        },
    );

    Ok(())
}

/// Execute `config validate`.
pub fn execute_validate(path: &Path) -> Result<()> {
    output::section("Config Validation");
    output::field("Path", path.display());
    let config = Config::load(path)?;
    output::success("Config file is valid");

    if config.sharp.threshold.low_threshold == config.sharp.threshold.high_threshold {
        output::section("Warnings");
        output::warning("sharp gray area is empty (low_threshold == high_threshold)");
    }

    output::field(
        "Next",
        format!("linewise config show -c {}", path.display()),
    );

    Ok(())
}
