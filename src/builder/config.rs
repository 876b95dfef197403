//! Runtime configuration wrapper
//!
//! Resolves the Remote Block Store URL from the environment with a localhost
//! fallback and exposes the timing knobs as `Duration`s.

use crate::shared::config::{AppConfig, AppConfigBuilder, ConfigError};
use std::time::Duration;

/// Default Remote Block Store URL
const DEFAULT_STORE_URL: &str = "http://127.0.0.1:3000";

/// Environment variable overriding the Remote Block Store URL
const STORE_URL_ENV: &str = "PAGECANVAS_STORE_URL";

/// Runtime configuration wrapper.
#[derive(Debug, Clone)]
pub struct Config {
    app: AppConfig,
}

impl Default for Config {
    fn default() -> Self {
        let store_url =
            std::env::var(STORE_URL_ENV).unwrap_or_else(|_| DEFAULT_STORE_URL.to_string());
        let app = AppConfig {
            store_url: Some(store_url),
            ..AppConfig::default()
        };
        Self { app }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_builder(builder: AppConfigBuilder) -> Result<Self, ConfigError> {
        let app = builder.build()?;
        Ok(Self { app })
    }

    /// Get the full URL for a Remote Block Store endpoint
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.store_url(), path)
    }

    pub fn store_url(&self) -> &str {
        self.app.store_url.as_deref().unwrap_or(DEFAULT_STORE_URL)
    }

    /// How long a published sync marker stays before it is cleared
    pub fn marker_lifetime(&self) -> Duration {
        Duration::from_millis(self.app.marker_lifetime_ms)
    }

    /// How long a toast notification stays before auto-dismiss
    pub fn notification_lifetime(&self) -> Duration {
        Duration::from_millis(self.app.notification_lifetime_ms)
    }
}
