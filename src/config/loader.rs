use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::Config;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/replframe/config.toml` on Unix/macOS, or the
    /// equivalent from `dirs::config_dir()` elsewhere. Falls back to the
    /// current directory if no config dir is known.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("replframe").join("config.toml")
    }

    /// Loads configuration from the default config file.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Loads configuration from `path`.
    ///
    /// - If the file doesn't exist, returns `Config::default()`.
    /// - Otherwise parses it as TOML and validates.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Checks:
    /// - indent and tab sizes are non-zero
    /// - a worker command is configured
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.console.indent_size == 0 {
            return Err(ConfigError::ValidationError {
                message: "console.indent_size must be greater than zero".to_string(),
            });
        }

        if self.console.tab_size == 0 {
            return Err(ConfigError::ValidationError {
                message: "console.tab_size must be greater than zero".to_string(),
            });
        }

        if self.worker.command.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "worker.command must not be empty".to_string(),
            });
        }

        Ok(())
    }
}
