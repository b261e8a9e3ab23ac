//! # Configuration State
//!
//! Stores application configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command line (`--db`)
//! 2. Environment variables (`RENTDESK_*`)
//! 3. Defaults (this file)
//!
//! Read-only after startup.

use directories::ProjectDirs;
use rentdesk_core::Money;
use rentdesk_db::DbConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// File name of the database inside the data directory.
pub const DATABASE_FILE: &str = "rentdesk.db";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// SQLite database file.
    pub database_path: PathBuf,

    /// Prefix for amounts in tables (empty by default).
    pub currency_symbol: String,

    /// Pool size.
    pub max_connections: u32,
}

impl Default for ConfigState {
    fn default() -> Self {
        ConfigState {
            database_path: default_database_path(),
            currency_symbol: String::new(),
            max_connections: 4,
        }
    }
}

/// Platform data directory for the database.
///
/// - **Linux**: `~/.local/share/rentdesk/rentdesk.db`
/// - **macOS**: `~/Library/Application Support/com.rentdesk.rentdesk/rentdesk.db`
/// - **Windows**: `%APPDATA%\rentdesk\rentdesk\data\rentdesk.db`
///
/// Falls back to the working directory when no home directory is known.
pub fn default_database_path() -> PathBuf {
    ProjectDirs::from("com", "rentdesk", "rentdesk")
        .map(|dirs| dirs.data_dir().join(DATABASE_FILE))
        .unwrap_or_else(|| PathBuf::from(DATABASE_FILE))
}

impl ConfigState {
    /// Creates a new ConfigState from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `RENTDESK_DB_PATH`: database file
    /// - `RENTDESK_CURRENCY_SYMBOL`: prefix for amounts
    /// - `RENTDESK_MAX_CONNECTIONS`: pool size (ignored unless a positive integer)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = ConfigState::default();

        if let Some(path) = lookup("RENTDESK_DB_PATH").filter(|p| !p.trim().is_empty()) {
            config.database_path = PathBuf::from(path);
        }

        if let Some(symbol) = lookup("RENTDESK_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        if let Some(max) = lookup("RENTDESK_MAX_CONNECTIONS")
            .and_then(|v| v.trim().parse::<u32>().ok())
            .filter(|n| *n > 0)
        {
            config.max_connections = max;
        }

        config
    }

    /// Overrides the database path (from `--db`).
    pub fn with_database_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.database_path = path.into();
        self
    }

    /// Pool settings for this configuration.
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(self.database_path.clone()).max_connections(self.max_connections)
    }

    /// Formats an amount for tables.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = ConfigState { currency_symbol: "$".into(), ..ConfigState::default() };
    /// assert_eq!(config.format_currency(Money::from_cents(1234)), "$12.34");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        let sign = if amount.cents() < 0 { "-" } else { "" };
        format!(
            "{}{}{}.{:02}",
            sign,
            self.currency_symbol,
            amount.major().abs(),
            amount.minor()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> ConfigState {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ConfigState::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert!(config.database_path.ends_with(DATABASE_FILE));
        assert_eq!(config.currency_symbol, "");
        assert_eq!(config.max_connections, 4);
    }

    #[test]
    fn test_environment_overrides() {
        let config = config_from(&[
            ("RENTDESK_DB_PATH", "/tmp/fleet.db"),
            ("RENTDESK_CURRENCY_SYMBOL", "₹"),
            ("RENTDESK_MAX_CONNECTIONS", "2"),
        ]);
        assert_eq!(config.database_path, PathBuf::from("/tmp/fleet.db"));
        assert_eq!(config.currency_symbol, "₹");
        assert_eq!(config.db_config().max_connections, 2);
    }

    #[test]
    fn test_bad_pool_size_is_ignored() {
        assert_eq!(config_from(&[("RENTDESK_MAX_CONNECTIONS", "0")]).max_connections, 4);
        assert_eq!(config_from(&[("RENTDESK_MAX_CONNECTIONS", "many")]).max_connections, 4);
    }

    #[test]
    fn test_format_currency() {
        let mut config = config_from(&[]);
        assert_eq!(config.format_currency(Money::from_cents(15000)), "150.00");

        config.currency_symbol = "$".to_string();
        assert_eq!(config.format_currency(Money::from_cents(1234)), "$12.34");
        assert_eq!(config.format_currency(Money::from_cents(-1234)), "-$12.34");
        assert_eq!(config.format_currency(Money::from_cents(1)), "$0.01");
    }
}
