//! Load injection against the payment service.
//!
//! Two scenarios share one clock that starts when [`run`] is called:
//!
//! 1. **Load Accounts**: every account is created at once, concurrently.
//! 2. **Process Transactions**: after `accounts_load_pause`, `ramp_users`
//!    virtual users are started evenly over `ramp_duration`. Each user takes
//!    the next transaction from the feeder and submits it once. Users that
//!    start after the feeder is exhausted do nothing and are counted as idle.

pub mod report;
pub mod target;

pub use report::{Report, Sample};
pub use target::{HttpTarget, PaymentTarget};

use std::sync::Arc;
use std::time::Duration;

use common::protocol::{Account, Transaction};
use tokio::{
    task::JoinSet,
    time::{sleep_until, Instant},
};
use tracing::{debug, error, info, warn};

/// Request name of the create-account call.
pub const LOAD_ACCOUNT: &str = "Load Account";

/// Request name of the process-transaction call.
pub const PROCESS_TRANSACTION: &str = "Process Transaction";

/// Injection profile of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Injection {
    /// Delay between the start of the run and the first transaction user.
    pub accounts_load_pause: Duration,
    /// Number of transaction users.
    pub ramp_users: usize,
    /// Window over which the transaction users are started.
    pub ramp_duration: Duration,
}

impl Injection {
    /// Start offset of transaction user `user` (0-based) from the run start.
    fn user_offset(&self, user: usize) -> Duration {
        if self.ramp_users == 0 {
            return self.accounts_load_pause;
        }
        let fraction = user as f64 / self.ramp_users as f64;
        self.accounts_load_pause + self.ramp_duration.mul_f64(fraction)
    }
}

/// Drive `accounts` and `transactions` against `target` and collect a [`Report`].
pub async fn run(
    target: Arc<dyn PaymentTarget>,
    accounts: Vec<Account>,
    transactions: Vec<Transaction>,
    injection: &Injection,
) -> Report {
    let start = Instant::now();
    let mut users = JoinSet::new();

    info!(accounts = accounts.len(), "injecting account users at once");
    for account in accounts {
        let target = Arc::clone(&target);
        users.spawn(async move {
            let began = Instant::now();
            let result = target.create_account(&account).await;
            if let Err(e) = &result {
                warn!(account = %account.account, error = %e, "load account failed");
            }
            Sample {
                request: LOAD_ACCOUNT,
                elapsed: began.elapsed(),
                result,
            }
        });
    }

    let mut report = Report::default();
    let available = transactions.len();
    report.idle_users = injection.ramp_users.saturating_sub(available);
    if report.idle_users > 0 {
        warn!(
            ramp_users = injection.ramp_users,
            transactions = available,
            "transaction feeder smaller than ramp; extra users will be idle"
        );
    }

    info!(
        users = injection.ramp_users.min(available),
        pause_ms = injection.accounts_load_pause.as_millis() as u64,
        ramp_ms = injection.ramp_duration.as_millis() as u64,
        "injecting transaction users"
    );
    for (user, tx) in transactions
        .into_iter()
        .take(injection.ramp_users)
        .enumerate()
    {
        let target = Arc::clone(&target);
        let at = start + injection.user_offset(user);
        users.spawn(async move {
            sleep_until(at).await;
            debug!(user, id = %tx.id, "submitting transaction");
            let began = Instant::now();
            let result = target.process_transaction(&tx).await;
            if let Err(e) = &result {
                warn!(id = %tx.id, error = %e, "process transaction failed");
            }
            Sample {
                request: PROCESS_TRANSACTION,
                elapsed: began.elapsed(),
                result,
            }
        });
    }

    while let Some(joined) = users.join_next().await {
        match joined {
            Ok(sample) => report.record(&sample),
            Err(e) => error!(error = %e, "virtual user task aborted"),
        }
    }
    report
}
