//! Configuration management for fitlog.
//!
//! This module provides configuration loading and validation using figment,
//! supporting a TOML config file, environment variables, and defaults. With no
//! configuration at all, activities are kept in `fitness_data.csv` in the
//! working directory.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Directory under the user config dir holding fitlog's config.
const CONFIG_DIR_NAME: &str = "fitlog";

/// Default store file name, relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = "fitness_data.csv";

/// Prefix of environment variables read as configuration.
const ENV_PREFIX: &str = "FITLOG_";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `FITLOG_`, nested keys joined by `__`)
/// 2. TOML config file at `~/.config/fitlog/config.toml`
/// 3. Default values
///
/// The `--file` flag is applied on top by the binary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the activity file.
    pub data_file: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
        }
    }
}

impl Config {
    /// Load configuration from all sources, reading the config file at
    /// `config_path` or at [`Config::default_config_path`].
    ///
    /// A config file that does not exist is treated as empty.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);
        let figment = Self::providers(config_file).merge(Env::prefixed(ENV_PREFIX).split("__"));
        Self::from_figment(figment)
    }

    fn providers(config_file: PathBuf) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(config_file))
    }

    fn from_figment(figment: Figment) -> Result<Self> {
        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.storage.data_file.as_os_str().is_empty() {
            return Err(Error::ConfigValidation {
                message: "storage.data_file must not be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Replace the store path, as the `--file` flag does.
    #[must_use]
    pub fn with_data_file(mut self, data_file: Option<PathBuf>) -> Self {
        if let Some(path) = data_file {
            self.storage.data_file = path;
        }
        self
    }

    /// Get the store file path.
    #[must_use]
    pub fn data_file(&self) -> &std::path::Path {
        &self.storage.data_file
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.data_file(), PathBuf::from("fitness_data.csv"));
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_empty_data_file() {
        let mut config = Config::default();
        config.storage.data_file = PathBuf::new();

        let result = config.validate();
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("data_file"));
    }

    #[test]
    fn test_with_data_file_overrides() {
        let config = Config::default().with_data_file(Some(PathBuf::from("/tmp/log.csv")));
        assert_eq!(config.data_file(), PathBuf::from("/tmp/log.csv"));
    }

    #[test]
    fn test_with_data_file_none_keeps_value() {
        let config = Config::default().with_data_file(None);
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path();
        assert!(path.to_string_lossy().contains("fitlog"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn test_load_nonexistent_config() {
        let config =
            Config::from_figment(Config::providers(PathBuf::from("/nonexistent/config.toml")))
                .unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_toml_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[storage]\ndata_file = \"/data/workouts.csv\"\n").unwrap();

        let config = Config::from_figment(Config::providers(path)).unwrap();
        assert_eq!(config.data_file(), PathBuf::from("/data/workouts.csv"));
    }

    #[test]
    fn test_load_rejects_empty_data_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[storage]\ndata_file = \"\"\n").unwrap();

        let err = Config::from_figment(Config::providers(path)).unwrap_err();
        assert!(matches!(err, Error::ConfigValidation { .. }));
    }

    #[test]
    fn test_load_malformed_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[storage\n").unwrap();

        let err = Config::from_figment(Config::providers(path)).unwrap_err();
        assert!(matches!(err, Error::ConfigLoad(_)));
    }

    #[test]
    fn test_env_overrides_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("config.toml", "[storage]\ndata_file = \"from_file.csv\"\n")?;
            jail.set_env("FITLOG_STORAGE__DATA_FILE", "from_env.csv");

            let config = Config::load_from(Some(PathBuf::from("config.toml"))).unwrap();
            assert_eq!(config.data_file(), PathBuf::from("from_env.csv"));
            Ok(())
        });
    }

    #[test]
    fn test_storage_config_serialize() {
        let json = serde_json::to_string(&StorageConfig::default()).unwrap();
        assert!(json.contains("data_file"));
        assert!(json.contains("fitness_data.csv"));
    }

    #[test]
    fn test_storage_config_deserialize() {
        let json = r#"{"data_file": "runs.csv"}"#;
        let storage: StorageConfig = serde_json::from_str(json).unwrap();
        assert_eq!(storage.data_file, PathBuf::from("runs.csv"));
    }
}
