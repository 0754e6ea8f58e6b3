//! Configuration file support for fitlog.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/fitlog/config.toml`.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub user: UserConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Owner used when the command line does not name one
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct UserConfig {
    #[serde(default)]
    pub default_owner: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));
    base.join("fitlog")
}

fn default_log_level() -> String {
    "warn".into()
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::debug!("No config file found at {:?}, using defaults", config_path);
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Reject values that parse but make no sense
    pub fn validate(&self) -> Result<()> {
        if !LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(Error::Config(format!(
                "unknown log level '{}'",
                self.logging.level
            )));
        }
        if let Some(owner) = &self.user.default_owner {
            if owner.trim().is_empty() {
                return Err(Error::Config("default_owner must not be empty".into()));
            }
        }
        Ok(())
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .unwrap_or_else(|| PathBuf::from("."));
        base.join("fitlog").join("config.toml")
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.data.data_dir.ends_with("fitlog"));
        assert_eq!(config.user.default_owner, None);
        assert_eq!(config.logging.level, "warn");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[user]
default_owner = "ana"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.user.default_owner.as_deref(), Some("ana"));
        assert_eq!(config.logging.level, "warn"); // default
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.data.data_dir = temp_dir.path().join("data");
        config.logging.level = "debug".into();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.data.data_dir, temp_dir.path().join("data"));
        assert_eq!(loaded.logging.level, "debug");
    }

    #[test]
    fn test_invalid_values_rejected() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");

        std::fs::write(&path, "[logging]\nlevel = \"loud\"\n").unwrap();
        assert!(matches!(Config::load_from(&path), Err(Error::Config(_))));

        std::fs::write(&path, "[user]\ndefault_owner = \"  \"\n").unwrap();
        assert!(matches!(Config::load_from(&path), Err(Error::Config(_))));

        std::fs::write(&path, "[data\n").unwrap();
        assert!(matches!(Config::load_from(&path), Err(Error::Toml(_))));
    }
}
