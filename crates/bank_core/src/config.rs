//! Host configuration: database location and logging setup.
//!
//! # Invariants
//! - Blank values are treated as unset.
//! - `log_level` is always one of `trace|debug|info|warn|error`.
//! - `log_dir`, when set, is absolute.

use crate::db::{open_db, open_db_in_memory, DbResult};
use crate::logging::{default_log_level, normalize_level};
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "BANK_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "BANK_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "BANK_LOG_DIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidLogLevel(String),
    RelativeLogDir(PathBuf),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLogLevel(level) => write!(
                f,
                "unsupported log level `{level}`; expected trace|debug|info|warn|error"
            ),
            Self::RelativeLogDir(path) => {
                write!(f, "log directory must be absolute, got `{}`", path.display())
            }
        }
    }
}

impl Error for ConfigError {}

/// Settings a host needs to open the store and start logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankConfig {
    /// Database file. `None` selects a private in-memory database.
    pub db_path: Option<PathBuf>,
    pub log_level: &'static str,
    /// Rolling log directory. `None` leaves logging uninitialized.
    pub log_dir: Option<PathBuf>,
}

impl Default for BankConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            log_level: default_log_level(),
            log_dir: None,
        }
    }
}

impl BankConfig {
    /// Reads `BANK_DB_PATH`, `BANK_LOG_LEVEL` and `BANK_LOG_DIR`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self {
            db_path: read(DB_PATH_ENV).map(PathBuf::from),
            ..Self::default()
        };
        if let Some(level) = read(LOG_LEVEL_ENV) {
            config = config.with_log_level(&level)?;
        }
        if let Some(dir) = read(LOG_DIR_ENV) {
            config = config.with_log_dir(dir)?;
        }
        Ok(config)
    }

    pub fn with_log_level(mut self, level: &str) -> Result<Self, ConfigError> {
        self.log_level =
            normalize_level(level).ok_or_else(|| ConfigError::InvalidLogLevel(level.to_string()))?;
        Ok(self)
    }

    pub fn with_log_dir(mut self, dir: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let dir = dir.into();
        if !dir.is_absolute() {
            return Err(ConfigError::RelativeLogDir(dir));
        }
        self.log_dir = Some(dir);
        Ok(self)
    }

    /// Opens the configured database with migrations applied.
    pub fn open_connection(&self) -> DbResult<Connection> {
        match &self.db_path {
            Some(path) => open_db(path),
            None => open_db_in_memory(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{BankConfig, ConfigError, DB_PATH_ENV, LOG_DIR_ENV, LOG_LEVEL_ENV};
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_yields_in_memory_defaults() {
        let config = BankConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, BankConfig::default());
        assert!(config.db_path.is_none());
    }

    #[test]
    fn reads_and_normalizes_all_keys() {
        let log_dir = std::env::temp_dir().join("bank-logs");
        let log_dir_str = log_dir.to_str().unwrap();
        let config = BankConfig::from_lookup(lookup_from(&[
            (DB_PATH_ENV, " bank.sqlite3 "),
            (LOG_LEVEL_ENV, "WARNING"),
            (LOG_DIR_ENV, log_dir_str),
        ]))
        .unwrap();

        assert_eq!(config.db_path, Some(PathBuf::from("bank.sqlite3")));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, Some(log_dir));
    }

    #[test]
    fn blank_values_are_ignored() {
        let config =
            BankConfig::from_lookup(lookup_from(&[(DB_PATH_ENV, "   "), (LOG_LEVEL_ENV, "")]))
                .unwrap();
        assert!(config.db_path.is_none());
        assert_eq!(config.log_level, BankConfig::default().log_level);
    }

    #[test]
    fn rejects_unknown_level_and_relative_log_dir() {
        let level_err =
            BankConfig::from_lookup(lookup_from(&[(LOG_LEVEL_ENV, "loud")])).unwrap_err();
        assert!(matches!(level_err, ConfigError::InvalidLogLevel(_)));

        let dir_err = BankConfig::from_lookup(lookup_from(&[(LOG_DIR_ENV, "logs")])).unwrap_err();
        assert_eq!(dir_err, ConfigError::RelativeLogDir(PathBuf::from("logs")));
    }

    #[test]
    fn open_connection_defaults_to_migrated_memory_db() {
        let conn = BankConfig::default().open_connection().unwrap();
        let version: u32 = conn
            .query_row("PRAGMA user_version;", [], |row| row.get(0))
            .unwrap();
        assert_eq!(version, crate::db::migrations::latest_version());
    }
}
