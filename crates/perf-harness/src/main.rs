//! `perf-harness` — load-test driver entry point.
//!
//! Startup sequence:
//! 1. Load and validate [`config::Config`] from `perf-test.toml` and `PERF_*` variables.
//! 2. Initialise structured JSON logging.
//! 3. Generate synthetic accounts and tagged transactions.
//! 4. Optionally decode every tag as a pre-flight self-check.
//! 5. Drive the injection profile against the payment service and log the report.

mod config;
mod generator;
mod simulation;
mod telemetry;

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use config::Config;
use simulation::{HttpTarget, PaymentTarget};

#[tokio::main]
async fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = Config::load().map_err(|e| {
        // Telemetry is not yet up; write to stderr directly.
        eprintln!("ERROR: perf-harness configuration invalid: {e}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init(&cfg.log_level)?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        base_url = %cfg.base_url,
        "perf-harness starting"
    );

    // -----------------------------------------------------------------------
    // 3. Test data
    // -----------------------------------------------------------------------
    let secret = cfg.tag_secret.expose();
    let accounts = generator::generate_accounts(
        cfg.accounts_count,
        cfg.accounts_min_balance,
        cfg.accounts_max_balance,
    )
    .context("failed to generate accounts")?;
    let transactions = generator::generate_transactions(
        &accounts,
        cfg.transactions_count,
        cfg.transactions_amount,
        secret,
    )
    .context("failed to generate transactions")?;
    info!(
        accounts = accounts.len(),
        transactions = transactions.len(),
        "test data generated"
    );

    // -----------------------------------------------------------------------
    // 4. Tag self-check
    // -----------------------------------------------------------------------
    if cfg.verify_tags {
        for tx in &transactions {
            generator::verify_transaction(secret, tx)
                .with_context(|| format!("generated tag failed verification: {}", tx.id))?;
        }
        info!(verified = transactions.len(), "transaction tags verified");
    }

    // -----------------------------------------------------------------------
    // 5. Simulation
    // -----------------------------------------------------------------------
    let target: Arc<dyn PaymentTarget> =
        Arc::new(HttpTarget::new(&cfg.base_url, cfg.request_timeout()));
    let report = simulation::run(target, accounts, transactions, &cfg.injection()).await;
    report.log();

    if report.failed() > 0 {
        anyhow::bail!(
            "{} of {} requests failed",
            report.failed(),
            report.failed() + report.succeeded()
        );
    }
    Ok(())
}
