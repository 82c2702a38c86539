//! Tracing subscriber setup.

use crate::config::LogConfig;
use thiserror::Error;
use tracing_subscriber::{EnvFilter, fmt::time::ChronoUtc};

/// Environment variable holding an `EnvFilter` directive. When set it wins
/// over the configured level.
pub const LOG_FILTER_VAR: &str = "TASKD_LOG";

/// Errors raised while installing the global subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The configured level is not a valid filter directive.
    #[error("invalid log filter: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),

    /// A global subscriber was already installed.
    #[error("failed to install tracing subscriber: {0}")]
    Install(Box<dyn std::error::Error + Send + Sync>),
}

/// Installs the process-wide `fmt` subscriber with UTC RFC 3339 timestamps.
///
/// # Errors
///
/// Returns [`TelemetryError`] when the filter is invalid or a subscriber is
/// already installed.
pub fn init(config: &LogConfig) -> Result<(), TelemetryError> {
    let filter = match EnvFilter::try_from_env(LOG_FILTER_VAR) {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level)?,
    };
    let builder = tracing_subscriber::fmt()
        .with_timer(ChronoUtc::rfc_3339())
        .with_level(true)
        .with_env_filter(filter);

    if config.structured {
        builder.json().try_init().map_err(TelemetryError::Install)
    } else {
        builder.with_ansi(true).try_init().map_err(TelemetryError::Install)
    }
}
