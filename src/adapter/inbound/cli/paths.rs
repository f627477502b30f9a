//! Path utilities for linewise.
//!
//! All data lives under `~/.linewise/`:
//! - `~/.linewise/config.toml` - main configuration

use std::path::PathBuf;

/// Returns the linewise home directory (`~/.linewise/`).
pub fn home_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".linewise")
}

/// Returns the default config file path (`~/.linewise/config.toml`).
pub fn default_config() -> PathBuf {
    home_dir().join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_are_under_linewise_home() {
        let config = default_config();
        assert!(home_dir().to_string_lossy().contains(".linewise"));
        assert!(config.ends_with(".linewise/config.toml"));
    }
}
