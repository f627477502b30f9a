//! Configuration loading and validation.

pub mod api;
pub mod calculator;
pub mod logging;
pub mod settings;

pub use api::ApiConfig;
pub use calculator::{ArbitrageConfig, EvConfig, SharpConfig};
pub use logging::LoggingConfig;
pub use settings::Config;
