use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::catalog::{Catalog, CatalogError};
use crate::config::types::Config;
use crate::persist::FileStore;

const MAX_CHECKOUT_DELAY_MS: u64 = 60_000;
const TICK_RATE_RANGE_MS: std::ops::RangeInclusive<u64> = 10..=1000;

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

    #[error("Invalid template catalog: {0}")]
    Catalog(#[from] CatalogError),
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/stylecart/config.toml` on Unix, or the equivalent
    /// from `dirs::config_dir()`. Falls back to the current directory.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("stylecart").join("config.toml")
    }

    /// Loads configuration from the default config file.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Loads configuration from `path`.
    ///
    /// - A missing file yields `Config::default()`.
    /// - Otherwise the file is parsed as TOML and validated.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
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

    /// Validates the configuration.
    ///
    /// Checks:
    /// - Checkout delay is at most one minute
    /// - Tick rate is within 10..=1000 ms
    /// - A `[[templates]]` override is non-empty and forms a valid catalog
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store.checkout_delay_ms > MAX_CHECKOUT_DELAY_MS {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "checkout_delay_ms must be at most {}, got {}",
                    MAX_CHECKOUT_DELAY_MS, self.store.checkout_delay_ms
                ),
            });
        }

        if !TICK_RATE_RANGE_MS.contains(&self.ui.tick_rate_ms) {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "tick_rate_ms must be between {} and {}, got {}",
                    TICK_RATE_RANGE_MS.start(),
                    TICK_RATE_RANGE_MS.end(),
                    self.ui.tick_rate_ms
                ),
            });
        }

        if let Some(templates) = &self.templates {
            if templates.is_empty() {
                return Err(ConfigError::ValidationError {
                    message: "templates override must list at least one template".to_string(),
                });
            }
        }

        self.catalog()?;
        Ok(())
    }

    /// Catalog described by this config: the override if present, else the
    /// built-in list.
    pub fn catalog(&self) -> Result<Catalog, ConfigError> {
        match &self.templates {
            Some(templates) => Ok(Catalog::new(templates.clone())?),
            None => Ok(Catalog::builtin()),
        }
    }

    /// Where the durable state lives.
    pub fn state_path(&self) -> PathBuf {
        self.store
            .state_file
            .clone()
            .unwrap_or_else(FileStore::default_path)
    }
}
