//! Runtime configuration for hosts embedding tasklist core.
//!
//! # Responsibility
//! - Resolve database path, log directory and log level from the environment.
//! - Give FFI and CLI hosts one place for defaults.
//!
//! # Invariants
//! - Blank environment values are treated as unset.
//! - Resolution never fails; invalid levels are reported by `init_logging`.

use crate::logging::default_log_level;
use std::path::PathBuf;

/// Environment variable overriding the database file path.
pub const ENV_DB_PATH: &str = "TASKLIST_DB_PATH";
/// Environment variable enabling file logging in the given directory.
pub const ENV_LOG_DIR: &str = "TASKLIST_LOG_DIR";
/// Environment variable overriding the log level.
pub const ENV_LOG_LEVEL: &str = "TASKLIST_LOG_LEVEL";
/// Database file name used when no path is configured.
pub const DEFAULT_DB_FILE_NAME: &str = "tasklist.sqlite3";

/// Resolved host configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    /// `None` disables file logging.
    pub log_dir: Option<PathBuf>,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
            log_dir: None,
            log_level: default_log_level().to_string(),
        }
    }
}

impl AppConfig {
    /// Resolves configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let read = |name: &str| {
            lookup(name)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            db_path: read(ENV_DB_PATH)
                .map(PathBuf::from)
                .unwrap_or(defaults.db_path),
            log_dir: read(ENV_LOG_DIR).map(PathBuf::from),
            log_level: read(ENV_LOG_LEVEL).unwrap_or(defaults.log_level),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, DEFAULT_DB_FILE_NAME, ENV_DB_PATH, ENV_LOG_DIR, ENV_LOG_LEVEL};
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn missing_variables_fall_back_to_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[]));
        assert!(config.db_path.ends_with(DEFAULT_DB_FILE_NAME));
        assert_eq!(config.log_dir, None);
        assert_eq!(config.log_level, AppConfig::default().log_level);
    }

    #[test]
    fn variables_override_defaults_after_trim() {
        let config = AppConfig::from_lookup(lookup_from(&[
            (ENV_DB_PATH, " /data/tasks.db "),
            (ENV_LOG_DIR, "/var/log/tasklist"),
            (ENV_LOG_LEVEL, "warn"),
        ]));
        assert_eq!(config.db_path, PathBuf::from("/data/tasks.db"));
        assert_eq!(config.log_dir, Some(PathBuf::from("/var/log/tasklist")));
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn blank_variables_are_ignored() {
        let config = AppConfig::from_lookup(lookup_from(&[(ENV_DB_PATH, "   "), (ENV_LOG_DIR, "")]));
        assert!(config.db_path.ends_with(DEFAULT_DB_FILE_NAME));
        assert_eq!(config.log_dir, None);
    }
}
