//! Runtime configuration for logging and storage location.
//!
//! # Responsibility
//! - Normalize logging level/directory inputs coming from the host app.
//! - Resolve where the contact database lives on this device.
//!
//! # Invariants
//! - A `LogConfig` always holds a supported level and an absolute directory.
//! - Storage path resolution never fails; it falls back to the temp dir.

use std::path::{Path, PathBuf};

/// Environment variable overriding the contact database file path.
pub const DB_PATH_ENV: &str = "CONTACTBOOK_DB_PATH";
const DEFAULT_DB_FILE_NAME: &str = "contactbook.sqlite3";

/// Validated logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// One of `trace|debug|info|warn|error`.
    pub level: &'static str,
    /// Absolute directory receiving rolling log files.
    pub log_dir: PathBuf,
}

impl LogConfig {
    /// Parses raw host-provided values into a validated config.
    ///
    /// # Errors
    /// - Returns an error when `level` is unsupported.
    /// - Returns an error when `log_dir` is empty or non-absolute.
    pub fn parse(level: &str, log_dir: &str) -> Result<Self, String> {
        Ok(Self {
            level: normalize_level(level)?,
            log_dir: normalize_log_dir(log_dir)?,
        })
    }
}

/// Location of the SQLite file backing the key-value slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    pub db_path: PathBuf,
}

impl StorageConfig {
    /// Resolves storage config from `CONTACTBOOK_DB_PATH`, falling back to
    /// `<temp_dir>/contactbook.sqlite3`.
    pub fn from_env() -> Self {
        Self::from_override(std::env::var(DB_PATH_ENV).ok().as_deref())
    }

    fn from_override(raw: Option<&str>) -> Self {
        let db_path = match raw.map(str::trim) {
            Some(trimmed) if !trimmed.is_empty() => PathBuf::from(trimmed),
            _ => std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
        };
        Self { db_path }
    }
}

/// Returns the default log level for current build mode.
///
/// - `debug` builds -> `debug`
/// - `release` builds -> `info`
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

pub(crate) fn normalize_level(level: &str) -> Result<&'static str, String> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(format!(
            "unsupported log level `{other}`; expected trace|debug|info|warn|error"
        )),
    }
}

pub(crate) fn normalize_log_dir(log_dir: &str) -> Result<PathBuf, String> {
    let trimmed = log_dir.trim();
    if trimmed.is_empty() {
        return Err("log_dir cannot be empty".to_string());
    }
    let path = Path::new(trimmed);
    if !path.is_absolute() {
        return Err(format!("log_dir must be an absolute path, got `{trimmed}`"));
    }
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::{normalize_level, normalize_log_dir, LogConfig, StorageConfig};

    #[test]
    fn normalize_level_accepts_known_values() {
        assert_eq!(
            normalize_level("INFO").expect("INFO should normalize"),
            "info"
        );
        assert_eq!(
            normalize_level(" warning ").expect("warning should normalize"),
            "warn"
        );
    }

    #[test]
    fn normalize_level_rejects_unknown_values() {
        let error = normalize_level("verbose").expect_err("verbose is not a level");
        assert!(error.contains("unsupported log level"));
    }

    #[test]
    fn normalize_log_dir_rejects_relative_path() {
        let error = normalize_log_dir("logs/dev").expect_err("relative paths must be rejected");
        assert!(error.contains("absolute"));
    }

    #[test]
    fn log_config_parse_rejects_blank_dir() {
        let error = LogConfig::parse("info", "   ").expect_err("blank dir must be rejected");
        assert!(error.contains("empty"));
    }

    #[test]
    fn storage_config_uses_trimmed_override() {
        let config = StorageConfig::from_override(Some("  /data/contacts.db "));
        assert_eq!(config.db_path, std::path::PathBuf::from("/data/contacts.db"));
    }

    #[test]
    fn storage_config_falls_back_to_temp_dir() {
        let blank = StorageConfig::from_override(Some("   "));
        let missing = StorageConfig::from_override(None);
        let expected = std::env::temp_dir().join("contactbook.sqlite3");
        assert_eq!(blank.db_path, expected);
        assert_eq!(missing.db_path, expected);
    }
}
