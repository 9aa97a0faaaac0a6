//! Log output for the weather widget
//!
//! The terminal is in raw alternate-screen mode while the widget runs, so
//! logs go to a file: the path given on the command line, or
//! `shoresquad.log` in the XDG cache directory (`~/.cache/shoresquad/` on
//! Linux).

use directories::ProjectDirs;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Errors that can occur while setting up logging
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The filter directive could not be parsed
    #[error("Invalid log filter: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),

    /// The log file could not be created
    #[error("Could not open log file: {0}")]
    Io(#[from] std::io::Error),

    /// A global subscriber was already installed
    #[error("Logging already initialized: {0}")]
    AlreadyInitialized(String),
}

/// Returns the default log file path, if a cache directory can be determined
pub fn default_log_path() -> Option<PathBuf> {
    let project_dirs = ProjectDirs::from("", "", "shoresquad")?;
    Some(project_dirs.cache_dir().join("shoresquad.log"))
}

/// Builds a subscriber writing plain-text events at `filter` into `file`
pub fn build_subscriber(
    filter: &str,
    file: File,
) -> Result<impl tracing::Subscriber + Send + Sync + 'static, LoggingError> {
    let filter = EnvFilter::try_new(filter)?;

    Ok(tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .finish())
}

/// Opens `path` for appending, creating parent directories as needed
fn open_log_file(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    File::options().create(true).append(true).open(path)
}

/// Installs the global subscriber
///
/// # Returns
/// * `Ok(Some(path))` with the file logs are written to
/// * `Ok(None)` if no path was given and no cache directory exists; logging
///   stays disabled
/// * `Err(LoggingError)` if the filter or file is unusable
pub fn init(filter: &str, path: Option<PathBuf>) -> Result<Option<PathBuf>, LoggingError> {
    let Some(path) = path.or_else(default_log_path) else {
        return Ok(None);
    };

    let subscriber = build_subscriber(filter, open_log_file(&path)?)?;
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| LoggingError::AlreadyInitialized(e.to_string()))?;

    Ok(Some(path))
}
