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

    #[error("API key is not configured (set `gemini.api_key` or ${env_var})")]
    MissingApiKey { env_var: String },
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/photopoet/config.toml` on Unix/macOS,
    /// or equivalent on other platforms via `dirs::config_dir()`.
    /// Falls back to current directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("photopoet").join("config.toml")
    }

    /// Loads configuration from the default config file.
    ///
    /// A missing file yields `Config::default()`.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();
        if !path.exists() {
            return Ok(Config::default());
        }
        Self::load_from(&path)
    }

    /// Loads and validates configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
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

    /// Validates the configuration.
    ///
    /// Checks:
    /// - Base URL and model are non-empty
    /// - Temperatures are within the model's accepted range (0.0..=2.0)
    /// - Timeout and tick rate are non-zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        let gemini = &self.gemini;

        if gemini.base_url.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "gemini.base_url must not be empty".to_string(),
            });
        }

        if gemini.model.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "gemini.model must not be empty".to_string(),
            });
        }

        for (name, value) in [
            ("inspiration_temperature", gemini.inspiration_temperature),
            ("poem_temperature", gemini.poem_temperature),
        ] {
            if !(0.0..=2.0).contains(&value) {
                return Err(ConfigError::ValidationError {
                    message: format!("gemini.{} must be between 0.0 and 2.0, got {}", name, value),
                });
            }
        }

        if gemini.timeout_seconds == 0 {
            return Err(ConfigError::ValidationError {
                message: "gemini.timeout_seconds must be greater than zero".to_string(),
            });
        }

        if self.ui.tick_rate_ms == 0 {
            return Err(ConfigError::ValidationError {
                message: "ui.tick_rate_ms must be greater than zero".to_string(),
            });
        }

        Ok(())
    }
}
