//! Application configuration module
//!
//! Provides configuration types for the document state layer. Values are
//! resolved in order: explicit builder values, environment variables
//! (`CLOUDDOCS_API_URL`, `CLOUDDOCS_API_KEY`), then an optional TOML file
//! under the user config directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default remote store URL
const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:3000";

/// Default auto-save period in seconds
const DEFAULT_AUTO_SAVE_INTERVAL_SECS: u64 = 30;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Remote store base URL
    pub server_url: Option<String>,
    /// API key sent with every remote request
    pub api_key: Option<String>,
    /// Auto-save period for open editor sessions, in seconds
    pub auto_save_interval_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_url: None,
            api_key: None,
            auto_save_interval_secs: DEFAULT_AUTO_SAVE_INTERVAL_SECS,
        }
    }
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Build a configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        Self {
            server_url: std::env::var("CLOUDDOCS_API_URL").ok(),
            api_key: std::env::var("CLOUDDOCS_API_KEY").ok(),
            auto_save_interval_secs: DEFAULT_AUTO_SAVE_INTERVAL_SECS,
        }
    }

    /// Load a configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Default location of the user config file.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("clouddocs").join("config.toml"))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(url) = &self.server_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConfigError::InvalidUrl(url.clone()));
            }
        }
        if self.auto_save_interval_secs == 0 {
            return Err(ConfigError::MissingValue("auto_save_interval_secs"));
        }
        Ok(())
    }

    /// Resolved remote store base URL
    pub fn server_url(&self) -> &str {
        self.server_url.as_deref().unwrap_or(DEFAULT_SERVER_URL)
    }

    /// Get the full URL for an API endpoint
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.server_url().trim_end_matches('/'), path)
    }
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    server_url: Option<String>,
    api_key: Option<String>,
    auto_save_interval_secs: Option<u64>,
}

impl AppConfigBuilder {
    /// Set the remote store base URL
    pub fn server_url(mut self, url: impl Into<String>) -> Self {
        self.server_url = Some(url.into());
        self
    }

    /// Set the API key
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the auto-save period in seconds
    pub fn auto_save_interval_secs(mut self, secs: u64) -> Self {
        self.auto_save_interval_secs = Some(secs);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let config = AppConfig {
            server_url: self.server_url,
            api_key: self.api_key,
            auto_save_interval_secs: self
                .auto_save_interval_secs
                .unwrap_or(DEFAULT_AUTO_SAVE_INTERVAL_SECS),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}
