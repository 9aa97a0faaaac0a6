//! Runtime configuration
//!
//! The configuration is an explicit value handed to constructors; nothing
//! reads it from global state.

use std::time::Duration;

/// 24-hour forecast endpoint of the Singapore NEA open data API
pub const DEFAULT_ENDPOINT_URL: &str =
    "https://api.data.gov.sg/v1/environment/24-hour-weather-forecast";

/// Default freshness window for the forecast cache (5 minutes)
pub const DEFAULT_CACHE_DURATION_MS: u64 = 300_000;

/// Settings needed to fetch and cache the forecast
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// URL requested with a plain GET
    pub endpoint_url: String,
    /// How long a fetched forecast is served from cache
    pub cache_duration: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint_url: DEFAULT_ENDPOINT_URL.to_string(),
            cache_duration: Duration::from_millis(DEFAULT_CACHE_DURATION_MS),
        }
    }
}

impl Config {
    /// Creates a configuration for `endpoint_url` with the default cache window
    pub fn with_endpoint(endpoint_url: impl Into<String>) -> Self {
        Self {
            endpoint_url: endpoint_url.into(),
            ..Self::default()
        }
    }

    /// Replaces the cache window
    pub fn cache_duration(mut self, cache_duration: Duration) -> Self {
        self.cache_duration = cache_duration;
        self
    }
}
