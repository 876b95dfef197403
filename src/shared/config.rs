//! Application configuration module
//!
//! Provides the static configuration for the page builder: where the Remote
//! Block Store lives and the two UI timing knobs (sync-marker lifetime,
//! notification auto-dismiss). Values can come from a builder, from a TOML
//! file, or fall back to defaults.

use serde::Deserialize;
use thiserror::Error;

/// Default lifetime of a published sync marker before it is cleared
pub const DEFAULT_MARKER_LIFETIME_MS: u64 = 1_000;

/// Default lifetime of a toast notification before auto-dismiss
pub const DEFAULT_NOTIFICATION_LIFETIME_MS: u64 = 4_000;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Remote Block Store base URL
    pub store_url: Option<String>,
    /// How long a sync marker stays on the channel slot, in milliseconds
    #[serde(default = "default_marker_lifetime_ms")]
    pub marker_lifetime_ms: u64,
    /// How long a toast notification stays visible, in milliseconds
    #[serde(default = "default_notification_lifetime_ms")]
    pub notification_lifetime_ms: u64,
}

fn default_marker_lifetime_ms() -> u64 {
    DEFAULT_MARKER_LIFETIME_MS
}

fn default_notification_lifetime_ms() -> u64 {
    DEFAULT_NOTIFICATION_LIFETIME_MS
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store_url: None,
            marker_lifetime_ms: DEFAULT_MARKER_LIFETIME_MS,
            notification_lifetime_ms: DEFAULT_NOTIFICATION_LIFETIME_MS,
        }
    }
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Parse configuration from a TOML document
    pub fn from_toml_str(toml_str: &str) -> Result<Self, ConfigError> {
        let config: AppConfig =
            toml::from_str(toml_str).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(url) = &self.store_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConfigError::InvalidUrl(url.clone()));
            }
        }
        if self.marker_lifetime_ms == 0 {
            return Err(ConfigError::MissingValue("marker_lifetime_ms"));
        }
        Ok(())
    }
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    store_url: Option<String>,
    marker_lifetime_ms: Option<u64>,
    notification_lifetime_ms: Option<u64>,
}

impl AppConfigBuilder {
    /// Set the Remote Block Store base URL
    pub fn store_url(mut self, url: impl Into<String>) -> Self {
        self.store_url = Some(url.into());
        self
    }

    /// Set the sync-marker lifetime in milliseconds
    pub fn marker_lifetime_ms(mut self, ms: u64) -> Self {
        self.marker_lifetime_ms = Some(ms);
        self
    }

    /// Set the notification auto-dismiss lifetime in milliseconds
    pub fn notification_lifetime_ms(mut self, ms: u64) -> Self {
        self.notification_lifetime_ms = Some(ms);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let config = AppConfig {
            store_url: self.store_url,
            marker_lifetime_ms: self.marker_lifetime_ms.unwrap_or(DEFAULT_MARKER_LIFETIME_MS),
            notification_lifetime_ms: self
                .notification_lifetime_ms
                .unwrap_or(DEFAULT_NOTIFICATION_LIFETIME_MS),
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
    #[error("parse error: {0}")]
    Parse(String),
}
