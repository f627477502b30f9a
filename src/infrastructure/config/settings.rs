//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all settings. Every
//! section is optional; a missing file or section falls back to defaults.
//! `LINEWISE_API_URL` overrides `[api].base_url`.
//!
//! # Example
//!
//! ```no_run
//! use linewise::infrastructure::config::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::api::{ApiConfig, API_URL_ENV};
use super::calculator::{ArbitrageConfig, EvConfig, SharpConfig};
use super::logging::LoggingConfig;
use crate::domain::MAX_STAKE;
use crate::error::{ConfigError, Result};

/// Largest page size the backend accepts.
pub const MAX_PER_PAGE: u32 = 500;

/// Main application configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Bet-tracker backend connection.
    #[serde(default)]
    pub api: ApiConfig,

    /// Sharp copier sizing.
    #[serde(default)]
    pub sharp: SharpConfig,

    #[serde(default)]
    pub arbitrage: ArbitrageConfig,

    /// Default bet selection for EV and pending views.
    #[serde(default)]
    pub ev: EvConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is malformed, or fails
    /// validation.
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load from `path` when it exists, otherwise use defaults.
    #[allow(clippy::result_large_err)]
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            return Self::load(path);
        }
        tracing::debug!(path = %path.display(), "config file not found, using defaults");
        let mut config = Self::default();
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                self.api.base_url = url.trim().to_string();
            }
        }
    }

    /// Initialize tracing from the `[logging]` section.
    pub fn init_logging(&self) {
        self.logging.init();
    }

    /// Validate configuration values.
    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::InvalidValue {
                field: "logging.format",
                reason: format!("expected 'pretty' or 'json', got '{}'", self.logging.format),
            }
            .into());
        }

        if self.api.base_url.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "api.base_url",
            }
            .into());
        }
        url::Url::parse(&self.api.base_url).map_err(|e| ConfigError::InvalidValue {
            field: "api.base_url",
            reason: e.to_string(),
        })?;
        if self.api.timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "api.timeout_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.api.connect_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "api.connect_timeout_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.api.retry_max_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                field: "api.retry_max_attempts",
                reason: "must be at least 1".to_string(),
            }
            .into());
        }
        if self.api.per_page == 0 || self.api.per_page > MAX_PER_PAGE {
            return Err(ConfigError::InvalidValue {
                field: "api.per_page",
                reason: format!("must be between 1 and {MAX_PER_PAGE}"),
            }
            .into());
        }

        self.sharp.validate()?;

        let budget = self.arbitrage.default_total_stake;
        if budget <= Decimal::ZERO || budget > MAX_STAKE {
            return Err(ConfigError::InvalidValue {
                field: "arbitrage.default_total_stake",
                reason: format!("must be greater than 0 and at most {MAX_STAKE}"),
            }
            .into());
        }

        Ok(())
    }
}
