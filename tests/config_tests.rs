use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use linewise::domain::PolicyKind;
use linewise::error::{ConfigError, Error};
use linewise::infrastructure::config::Config;
use rust_decimal_macros::dec;

static TEMP_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn write_temp_config(contents: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let suffix = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    path.push(format!("linewise-config-test-{nanos}-{suffix}.toml"));
    fs::write(&path, contents).expect("write temp config");
    path
}

#[test]
fn bundled_template_loads() {
    let template = include_str!("../config.toml.example");
    let path = write_temp_config(template);
    let result = Config::load(&path);
    let _ = fs::remove_file(&path);

    let config = result.expect("template is valid");
    assert_eq!(config.sharp.policy, PolicyKind::Linear);
    assert!(config.sharp.threshold.low_threshold < config.sharp.threshold.high_threshold);
}

#[test]
fn config_overrides_sections() {
    let toml = r#"
[logging]
level = "debug"
format = "json"

[api]
base_url = "https://tracker.example.com/base"
per_page = 250

[sharp]
policy = "threshold"
unit_stake = 20
max_bet = 50

[arbitrage]
default_total_stake = 500
"#;

    let path = write_temp_config(toml);
    let result = Config::load(&path);
    let _ = fs::remove_file(&path);

    let config = result.expect("valid config");
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.api.per_page, 250);
    assert_eq!(config.sharp.policy, PolicyKind::Threshold);
    assert_eq!(config.sharp.threshold.unit_stake, dec!(20));
    assert_eq!(config.sharp.linear.max_bet, dec!(50));
    assert_eq!(config.arbitrage.default_total_stake, dec!(500));
}

#[test]
fn config_rejects_oversized_page() {
    let path = write_temp_config("[api]\nper_page = 10000\n");
    let result = Config::load(&path);
    let _ = fs::remove_file(&path);

    match result {
        Err(Error::Config(ConfigError::InvalidValue {
            field: "api.per_page",
            ..
        })) => {}
        Err(err) => panic!("Expected per_page error, got {err}"),
        Ok(config) => panic!("Expected rejection, got per_page {}", config.api.per_page),
    }
}

#[test]
fn config_rejects_zero_arbitrage_budget() {
    let path = write_temp_config("[arbitrage]\ndefault_total_stake = 0\n");
    let result = Config::load(&path);
    let _ = fs::remove_file(&path);

    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidValue {
            field: "arbitrage.default_total_stake",
            ..
        }))
    ));
}

#[test]
fn config_rejects_zero_retry_attempts() {
    let path = write_temp_config("[api]\nretry_max_attempts = 0\n");
    let result = Config::load(&path);
    let _ = fs::remove_file(&path);

    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidValue {
            field: "api.retry_max_attempts",
            ..
        }))
    ));
}

#[test]
fn missing_file_is_read_error() {
    let path = std::env::temp_dir().join("linewise-config-test-does-not-exist.toml");
    let result = Config::load(&path);
    assert!(matches!(result, Err(Error::Config(ConfigError::ReadFile(_)))));
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let path = std::env::temp_dir().join("linewise-config-test-absent.toml");
    let config = Config::load_or_default(&path).expect("defaults are valid");
    assert_eq!(config.api.per_page, 100);
    assert_eq!(config.sharp.linear.max_bet, dec!(100));
}
