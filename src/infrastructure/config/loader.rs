use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::config::Config;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Invalid log rotation: {0}. Must be one of: daily, hourly, never")]
    InvalidRotation(String),

    #[error("Invalid max_tokens: {0}. Must be at least 1")]
    InvalidMaxTokens(u32),

    #[error("Invalid timeout_secs: {0}. Must be at least 1")]
    InvalidTimeout(u64),

    #[error("Provider model cannot be empty")]
    EmptyModel,

    #[error("Provider base_url cannot be empty")]
    EmptyBaseUrl,
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .goalsplit/config.yaml
    /// 3. .goalsplit/local.yaml (optional local overrides)
    /// 4. Environment variables (GOALSPLIT_* prefix, `__` for nesting)
    pub fn load() -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(".goalsplit/config.yaml"))
            .merge(Yaml::file(".goalsplit/local.yaml"))
            .merge(Env::prefixed("GOALSPLIT_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file; environment variables still
    /// override it.
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .merge(Env::prefixed("GOALSPLIT_").split("__"))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&config.logging.rotation.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidRotation(config.logging.rotation.clone()));
        }

        if config.provider.max_tokens == 0 {
            return Err(ConfigError::InvalidMaxTokens(config.provider.max_tokens));
        }

        if config.provider.model.trim().is_empty() {
            return Err(ConfigError::EmptyModel);
        }

        if config.provider.base_url.trim().is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }

        if config.breakdown.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout(config.breakdown.timeout_secs));
        }

        Ok(())
    }
}
