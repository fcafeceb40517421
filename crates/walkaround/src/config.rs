//! Configuration management for walkaround.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "walkaround";

/// Default database file name.
const DATABASE_FILE_NAME: &str = "records.db";

/// Well-known key the record collection is stored under.
pub const DEFAULT_RECORDS_KEY: &str = "savedRecords";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `WALKAROUND_`, sections separated by `__`)
/// 2. TOML config file at `~/.config/walkaround/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Record codec behaviour.
    pub persistence: PersistenceConfig,
    /// PDF report configuration.
    pub report: ReportConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the database file.
    /// Defaults to `~/.local/share/walkaround/records.db`
    pub database_path: Option<PathBuf>,
    /// Key the whole record collection is stored under.
    pub records_key: String,
}

/// How codec failures in the persisted collection are handled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistenceConfig {
    /// Surface decode/encode failures as errors.
    ///
    /// When false, an undecodable collection loads as empty and an
    /// unencodable one is not written; both are only logged.
    pub strict: bool,
}

/// PDF report configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Author written into the PDF document info.
    pub author: String,
    /// Directory exported reports are written to.
    /// Defaults to the system temporary directory.
    pub export_dir: Option<PathBuf>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: None, // Will be resolved to default at runtime
            records_key: DEFAULT_RECORDS_KEY.to_string(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            author: "WalkAround Checks".to_string(),
            export_dir: None,
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("WALKAROUND_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.storage.records_key.trim().is_empty() {
            return Err(Error::ConfigValidation {
                message: "storage.records_key must not be empty".to_string(),
            });
        }

        if self.report.author.trim().is_empty() {
            return Err(Error::ConfigValidation {
                message: "report.author must not be empty".to_string(),
            });
        }

        if let Some(dir) = &self.report.export_dir {
            if dir.is_file() {
                return Err(Error::ConfigValidation {
                    message: format!("report.export_dir {} is a file", dir.display()),
                });
            }
        }

        Ok(())
    }

    /// Get the database path, resolving defaults if not set.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.storage
            .database_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATABASE_FILE_NAME))
    }

    /// Get the export directory, resolving defaults if not set.
    #[must_use]
    pub fn export_dir(&self) -> PathBuf {
        self.report
            .export_dir
            .clone()
            .unwrap_or_else(std::env::temp_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert!(config.storage.database_path.is_none());
        assert_eq!(config.storage.records_key, "savedRecords");
        assert!(!config.persistence.strict);
        assert_eq!(config.report.author, "WalkAround Checks");
        assert!(config.report.export_dir.is_none());
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_empty_records_key() {
        let mut config = Config::default();
        config.storage.records_key = "  ".to_string();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("records_key"));
    }

    #[test]
    fn test_validate_empty_author() {
        let mut config = Config::default();
        config.report.author = String::new();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("report.author"));
    }

    #[test]
    fn test_validate_export_dir_is_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let mut config = Config::default();
        config.report.export_dir = Some(file.path().to_path_buf());

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("export_dir"));
    }

    #[test]
    fn test_database_path_default() {
        let path = Config::default().database_path();
        assert!(path.to_string_lossy().contains("records.db"));
        assert!(path.to_string_lossy().contains("walkaround"));
    }

    #[test]
    fn test_database_path_custom() {
        let mut config = Config::default();
        config.storage.database_path = Some(PathBuf::from("/custom/path/db.sqlite"));

        assert_eq!(
            config.database_path(),
            PathBuf::from("/custom/path/db.sqlite")
        );
    }

    #[test]
    fn test_export_dir_defaults_to_temp() {
        assert_eq!(Config::default().export_dir(), std::env::temp_dir());
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path();
        assert!(path.to_string_lossy().contains("walkaround"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn test_load_nonexistent_config() {
        let config = Config::load_from(Some(PathBuf::from("/nonexistent/config.toml"))).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[storage]
records_key = "fleetRecords"

[persistence]
strict = true

[report]
author = "Depot 7"
"#,
        )
        .unwrap();

        let config = Config::load_from(Some(path)).unwrap();
        assert_eq!(config.storage.records_key, "fleetRecords");
        assert!(config.persistence.strict);
        assert_eq!(config.report.author, "Depot 7");
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[storage]\nrecords_key = \"\"\n").unwrap();

        assert!(Config::load_from(Some(path)).is_err());
    }

    #[test]
    fn test_storage_config_deserialize() {
        let json = r#"{"records_key": "other"}"#;
        let storage: StorageConfig = serde_json::from_str(json).unwrap();
        assert_eq!(storage.records_key, "other");
        assert!(storage.database_path.is_none());
    }

    #[test]
    fn test_config_serialize() {
        let json = serde_json::to_string(&Config::default()).unwrap();
        assert!(json.contains("records_key"));
        assert!(json.contains("strict"));
        assert!(json.contains("author"));
    }
}
