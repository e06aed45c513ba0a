//! Telemetry initialisation for the perf harness.
//!
//! Structured JSON logs only. Passphrases and derived keys are never logged;
//! transaction tags may be, since they are the intended wire form.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Initialise the tracing subscriber.
///
/// Outputs structured JSON logs to stdout at the configured log level;
/// `RUST_LOG` takes precedence when set.
///
/// # Errors
///
/// Returns an error if the subscriber has already been set.
pub fn init(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialise perf-harness tracing subscriber: {e}"))
}
