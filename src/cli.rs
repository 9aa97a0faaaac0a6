//! Command-line interface parsing for the weather widget
//!
//! This module handles parsing of CLI arguments using clap and folds them
//! into the [`Config`] value and log settings used at startup.

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::config::{Config, DEFAULT_CACHE_DURATION_MS, DEFAULT_ENDPOINT_URL};

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// A zero cache window would disable caching entirely
    #[error("Invalid cache duration: {0} ms. The cache duration must be greater than zero")]
    InvalidCacheDuration(u64),

    /// The endpoint is not an http(s) URL
    #[error("Invalid endpoint: '{0}'. Expected an http:// or https:// URL")]
    InvalidEndpoint(String),
}

/// ShoreSquad - 24-hour weather forecast with a live UTC clock
#[derive(Parser, Debug)]
#[command(name = "shoresquad")]
#[command(about = "Terminal weather widget showing the 24-hour forecast")]
#[command(version)]
pub struct Cli {
    /// Forecast endpoint to GET
    #[arg(long, value_name = "URL", default_value = DEFAULT_ENDPOINT_URL)]
    pub endpoint: String,

    /// How long a fetched forecast is reused, in milliseconds
    #[arg(long, value_name = "MS", default_value_t = DEFAULT_CACHE_DURATION_MS)]
    pub cache_duration_ms: u64,

    /// Write logs to this file instead of the default cache location
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Log filter, e.g. "info" or "shoresquad=debug"
    #[arg(long, value_name = "FILTER", default_value = "info")]
    pub log_level: String,
}

impl Cli {
    /// Builds the runtime configuration from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(Config)` with the endpoint and cache window
    /// * `Err(CliError)` if either value is unusable
    pub fn config(&self) -> Result<Config, CliError> {
        if !(self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://")) {
            return Err(CliError::InvalidEndpoint(self.endpoint.clone()));
        }
        if self.cache_duration_ms == 0 {
            return Err(CliError::InvalidCacheDuration(self.cache_duration_ms));
        }

        Ok(Config::with_endpoint(self.endpoint.clone())
            .cache_duration(Duration::from_millis(self.cache_duration_ms)))
    }
}
