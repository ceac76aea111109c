//! Client configuration
//!
//! All configuration can be overridden through environment variables:
//!
//! | Environment variable | Default | Meaning |
//! |----------------------|---------|---------|
//! | SPAZA_BASE_URL | http://localhost:8080 | Platform backend base URL |
//! | SPAZA_REQUEST_TIMEOUT_MS | 30000 | Per-request timeout (ms) |
//! | SPAZA_POLL_INTERVAL_MS | 15000 | Driver feed refresh interval (ms) |
//! | ENVIRONMENT | development | Runtime environment |

use std::time::Duration;

/// Client configuration for connecting to the platform backend
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL (e.g., "https://api.spaza.example")
    pub base_url: String,
    /// Per-request timeout in milliseconds
    pub request_timeout_ms: u64,
    /// Driver eligible-order feed poll interval in milliseconds.
    /// This bounds the staleness of the driver feed.
    pub poll_interval_ms: u64,
    /// Runtime environment: development | staging | production
    pub environment: String,
}

impl ClientConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("SPAZA_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8080".into()),
            request_timeout_ms: std::env::var("SPAZA_REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30_000),
            poll_interval_ms: std::env::var("SPAZA_POLL_INTERVAL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(15_000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// Create a configuration with an explicit base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut config = Self::from_env();
        config.base_url = base_url.into();
        config
    }

    /// Set the per-request timeout
    pub fn with_timeout_ms(mut self, ms: u64) -> Self {
        self.request_timeout_ms = ms;
        self
    }

    /// Set the driver feed poll interval
    pub fn with_poll_interval_ms(mut self, ms: u64) -> Self {
        self.poll_interval_ms = ms;
        self
    }

    /// Per-request timeout as a [`Duration`]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Driver feed poll interval as a [`Duration`]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
