//! Configuration loading and validation for the perf harness.
//!
//! Values come from an optional `perf-test.toml` in the working directory,
//! overridden by `PERF_*` environment variables (e.g. `PERF_BASE_URL`,
//! `PERF_ACCOUNTS_COUNT`). The process exits with a clear error message if a
//! required value is missing or invalid.

use std::time::Duration;

use anyhow::{Context, Result};
use config::{builder::DefaultState, ConfigBuilder};
use serde::Deserialize;

use crate::simulation::Injection;

/// Name of the optional configuration file, without extension.
const CONFIG_FILE: &str = "perf-test";

/// Prefix of the environment variables read by [`Config::load`].
const ENV_PREFIX: &str = "PERF";

/// Shared passphrase used to tag transactions.
///
/// Never printed: `Debug` shows `[REDACTED]`.
#[derive(Clone, Deserialize)]
#[serde(transparent)]
pub struct Passphrase(String);

impl Passphrase {
    /// Borrow the passphrase text.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Passphrase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Passphrase([REDACTED])")
    }
}

/// Validated harness configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Base URL of the payment service, e.g. `http://127.0.0.1:8080`. **Required.**
    pub base_url: String,

    /// Number of synthetic accounts to create.
    #[serde(default = "default_accounts_count")]
    pub accounts_count: usize,

    /// Lowest opening balance (inclusive).
    #[serde(default = "default_accounts_min_balance")]
    pub accounts_min_balance: i64,

    /// Highest opening balance (inclusive).
    #[serde(default = "default_accounts_max_balance")]
    pub accounts_max_balance: i64,

    /// Seconds between the start of the run and the first transaction.
    #[serde(default = "default_accounts_load_pause")]
    pub accounts_load_pause_secs: u64,

    /// Number of transactions to generate.
    #[serde(default = "default_transactions_count")]
    pub transactions_count: usize,

    /// Amount moved by every transaction.
    #[serde(default = "default_transactions_amount")]
    pub transactions_amount: i64,

    /// Virtual users submitting transactions, one transaction each.
    #[serde(default = "default_ramp_users")]
    pub ramp_users: usize,

    /// Seconds over which the transaction users are started.
    #[serde(default = "default_ramp_duration")]
    pub ramp_duration_secs: u64,

    /// Passphrase shared with the payment service for transaction tags.
    #[serde(default = "default_tag_secret")]
    pub tag_secret: Passphrase,

    /// Decode every generated tag before driving load.
    #[serde(default = "default_verify_tags")]
    pub verify_tags: bool,

    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Tracing log level (e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_accounts_count() -> usize {
    10
}
fn default_accounts_min_balance() -> i64 {
    100
}
fn default_accounts_max_balance() -> i64 {
    1000
}
fn default_accounts_load_pause() -> u64 {
    5
}
fn default_transactions_count() -> usize {
    10
}
fn default_transactions_amount() -> i64 {
    10
}
fn default_ramp_users() -> usize {
    10
}
fn default_ramp_duration() -> u64 {
    2
}
fn default_tag_secret() -> Passphrase {
    Passphrase("secret".into())
}
fn default_verify_tags() -> bool {
    true
}
fn default_request_timeout() -> u64 {
    30
}
fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load and validate configuration from `perf-test.toml` (if present) and
    /// `PERF_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a required value is absent or cannot be parsed.
    pub fn load() -> Result<Self> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name(CONFIG_FILE).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX));
        Self::from_builder(builder)
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        let cfg = builder
            .build()
            .context("failed to build perf-harness configuration")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise perf-harness configuration")?;

        c.validate()?;
        Ok(c)
    }

    /// Injection profile derived from the ramp settings.
    pub fn injection(&self) -> Injection {
        Injection {
            accounts_load_pause: Duration::from_secs(self.accounts_load_pause_secs),
            ramp_users: self.ramp_users,
            ramp_duration: Duration::from_secs(self.ramp_duration_secs),
        }
    }

    /// Per-request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate all fields, returning a descriptive error on the first failure.
    fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            anyhow::bail!("PERF_BASE_URL is required and must not be empty");
        }
        if !self.base_url.starts_with("http://") {
            anyhow::bail!("PERF_BASE_URL must be a plain http:// URL");
        }
        if self.accounts_count == 0 {
            anyhow::bail!("PERF_ACCOUNTS_COUNT must be > 0");
        }
        if self.accounts_min_balance > self.accounts_max_balance {
            anyhow::bail!("PERF_ACCOUNTS_MIN_BALANCE must not exceed PERF_ACCOUNTS_MAX_BALANCE");
        }
        if self.ramp_users == 0 {
            anyhow::bail!("PERF_RAMP_USERS must be > 0");
        }
        if self.request_timeout_secs == 0 {
            anyhow::bail!("PERF_REQUEST_TIMEOUT_SECS must be > 0");
        }
        if self.tag_secret.expose().is_empty() {
            anyhow::bail!("PERF_TAG_SECRET must not be empty");
        }
        Ok(())
    }
}
