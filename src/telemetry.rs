//! Tracing setup for the marketplace service.
//!
//! `RUST_LOG` wins when set; otherwise the configured log filter seeds the
//! subscriber. Output is a compact single-line format with targets and ANSI
//! color disabled so container logs stay grep-friendly.

use crate::config::TelemetryConfig;
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("log filter '{filter}' is not a valid tracing directive")]
    Filter {
        filter: String,
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },
    #[error("tracing subscriber could not be installed: {0}")]
    Install(String),
}

/// Install the global subscriber. Call once at startup, before the first
/// log line; a second call reports [`TelemetryError::Install`].
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(from_env) => from_env,
        Err(_) => {
            EnvFilter::try_new(&config.log_filter).map_err(|source| TelemetryError::Filter {
                filter: config.log_filter.clone(),
                source,
            })?
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .compact()
        .try_init()
        .map_err(|err| TelemetryError::Install(err.to_string()))
}
