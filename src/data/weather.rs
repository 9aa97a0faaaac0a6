//! 24-hour forecast API client
//!
//! This module fetches the forecast document from the configured endpoint and
//! keeps the last good response in a `TimedCache` so repeated requests inside
//! the cache window do not touch the network.

use std::sync::Arc;

use parking_lot::Mutex;
use reqwest::{Client, StatusCode};
use thiserror::Error;

use super::ForecastPayload;
use crate::cache::TimedCache;
use crate::clock::SharedClock;
use crate::config::Config;

/// Cache key under which the forecast is stored
pub const WEATHER_CACHE_KEY: &str = "weather";

/// Errors that can occur when fetching weather data
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The request could not be sent or the body could not be read
    #[error("HTTP request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("Weather API error: {status}")]
    Fetch { status: StatusCode },

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Client for fetching the forecast, backed by a short-lived cache
///
/// Concurrent calls that miss the cache each issue their own request; there
/// is no coalescing of in-flight fetches.
#[derive(Debug)]
pub struct WeatherClient {
    client: Client,
    endpoint_url: String,
    cache: Mutex<TimedCache<&'static str, Arc<ForecastPayload>>>,
}

impl WeatherClient {
    /// Create a new WeatherClient for the configured endpoint
    pub fn new(config: &Config) -> Self {
        Self::with_client(Client::new(), config)
    }

    /// Create a new WeatherClient with a custom HTTP client
    pub fn with_client(client: Client, config: &Config) -> Self {
        Self {
            client,
            endpoint_url: config.endpoint_url.clone(),
            cache: Mutex::new(TimedCache::new(config.cache_duration)),
        }
    }

    /// Replace the cache with an empty one that reads time from `clock`
    pub fn with_clock(mut self, clock: SharedClock) -> Self {
        let duration = self.cache.get_mut().duration();
        self.cache = Mutex::new(TimedCache::with_clock(duration, clock));
        self
    }

    /// URL this client requests
    pub fn endpoint(&self) -> &str {
        &self.endpoint_url
    }

    /// Returns the cached forecast if one is still fresh
    pub fn cached_weather(&self) -> Option<Arc<ForecastPayload>> {
        self.cache.lock().get(&WEATHER_CACHE_KEY)
    }

    /// Fetch the forecast, serving it from cache when fresh
    ///
    /// # Returns
    /// * `Ok(Arc<ForecastPayload>)` - The cached or freshly fetched forecast
    /// * `Err(WeatherError)` - If the request, status check, or parsing fails
    ///
    /// A failed fetch leaves the cache as it was.
    pub async fn get_weather(&self) -> Result<Arc<ForecastPayload>, WeatherError> {
        let cached = self.cached_weather();
        if let Some(payload) = cached {
            tracing::debug!("Serving forecast from cache");
            return Ok(payload);
        }

        tracing::debug!(url = %self.endpoint_url, "Fetching forecast");
        let payload = Arc::new(self.fetch().await?);

        self.cache
            .lock()
            .set(WEATHER_CACHE_KEY, Arc::clone(&payload));
        tracing::info!(items = payload.items.len(), "Fetched forecast");

        Ok(payload)
    }

    /// Issues the GET request and decodes the body
    async fn fetch(&self) -> Result<ForecastPayload, WeatherError> {
        let response = self.client.get(&self.endpoint_url).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%status, "Weather API returned an error status");
            return Err(WeatherError::Fetch { status });
        }

        let text = response.text().await?;
        let payload: ForecastPayload = serde_json::from_str(&text)?;

        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_new_client_uses_configured_endpoint() {
        let config = Config::with_endpoint("http://localhost:9/forecast");
        let client = WeatherClient::new(&config);
        assert_eq!(client.endpoint(), "http://localhost:9/forecast");
    }

    #[test]
    fn test_new_client_starts_with_empty_cache() {
        let client = WeatherClient::new(&Config::default());
        assert!(client.cached_weather().is_none());
    }

    #[test]
    fn test_with_clock_keeps_cache_duration() {
        let config = Config::default().cache_duration(Duration::from_secs(42));
        let mut client = WeatherClient::new(&config).with_clock(crate::clock::system());
        assert_eq!(client.cache.get_mut().duration(), Duration::from_secs(42));
    }

    #[test]
    fn test_fetch_error_message_includes_status() {
        let err = WeatherError::Fetch {
            status: StatusCode::SERVICE_UNAVAILABLE,
        };
        assert!(err.to_string().contains("503"));
    }

    #[test]
    fn test_parse_error_converts_from_serde() {
        let serde_err = serde_json::from_str::<ForecastPayload>("not json").unwrap_err();
        let err: WeatherError = serde_err.into();
        assert!(matches!(err, WeatherError::Parse(_)));
        assert!(err.to_string().contains("Failed to parse JSON"));
    }
}
