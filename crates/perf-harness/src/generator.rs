//! Synthetic accounts and tagged transactions.
//!
//! Transactions move funds sequentially around the generated accounts
//! (A → B, B → C, …, last → A) and share one process id per run so the
//! target can group them. Each transaction's `id` is a tag binding
//! `[from, to, amount, process_id]` under the shared passphrase.

use common::protocol::{Account, Transaction};
use rand::Rng;
use tag_codec::{TagError, TagValue};
use thiserror::Error;
use uuid::Uuid;

/// Length of generated account and process ids.
const ID_LEN: usize = 8;

/// Errors produced while generating or checking records.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// Transactions were requested but there are no accounts to move funds between.
    #[error("cannot generate transactions without accounts")]
    NoAccounts,

    /// The balance range is empty.
    #[error("invalid balance range: {min} > {max}")]
    InvalidBalanceRange { min: i64, max: i64 },

    /// A tag could not be produced or opened.
    #[error(transparent)]
    Tag(#[from] TagError),

    /// A tag opened but does not bind the transaction's own fields.
    #[error("tag of transaction {id} does not match its fields")]
    TagMismatch { id: String },
}

/// Generate `count` accounts with balances drawn uniformly from
/// `[min_balance, max_balance]`.
///
/// # Errors
///
/// Returns [`GeneratorError::InvalidBalanceRange`] if `min_balance > max_balance`.
pub fn generate_accounts(
    count: usize,
    min_balance: i64,
    max_balance: i64,
) -> Result<Vec<Account>, GeneratorError> {
    if min_balance > max_balance {
        return Err(GeneratorError::InvalidBalanceRange {
            min: min_balance,
            max: max_balance,
        });
    }
    let mut rng = rand::thread_rng();
    Ok((0..count)
        .map(|_| Account {
            account: random_id(),
            balance: rng.gen_range(min_balance..=max_balance),
        })
        .collect())
}

/// Generate `count` transactions of `amount` each, cycling through `accounts`.
///
/// # Errors
///
/// Returns [`GeneratorError::NoAccounts`] if `count > 0` and `accounts` is
/// empty, or [`GeneratorError::Tag`] if a tag cannot be encoded.
pub fn generate_transactions(
    accounts: &[Account],
    count: usize,
    amount: i64,
    secret: &str,
) -> Result<Vec<Transaction>, GeneratorError> {
    if count > 0 && accounts.is_empty() {
        return Err(GeneratorError::NoAccounts);
    }
    let process_id = random_id();
    (0..count)
        .map(|i| -> Result<Transaction, GeneratorError> {
            let from = &accounts[i % accounts.len()].account;
            let to = &accounts[(i + 1) % accounts.len()].account;
            let id = tag_codec::encode(secret, &tag_values(from, to, amount, &process_id))?;
            Ok(Transaction {
                id,
                from: from.clone(),
                to: to.clone(),
                amount,
                process_id: process_id.clone(),
            })
        })
        .collect()
}

/// Open `tx.id` under `secret` and check it binds the transaction's fields.
///
/// # Errors
///
/// Returns [`GeneratorError::Tag`] if the tag does not decode, or
/// [`GeneratorError::TagMismatch`] if it decodes to different values.
pub fn verify_transaction(secret: &str, tx: &Transaction) -> Result<(), GeneratorError> {
    let values = tag_codec::decode(secret, &tx.id)?;
    let expected: Vec<String> = tag_values(&tx.from, &tx.to, tx.amount, &tx.process_id)
        .iter()
        .map(ToString::to_string)
        .collect();
    if values != expected {
        return Err(GeneratorError::TagMismatch { id: tx.id.clone() });
    }
    Ok(())
}

fn tag_values(from: &str, to: &str, amount: i64, process_id: &str) -> [TagValue; 4] {
    [from.into(), to.into(), amount.into(), process_id.into()]
}

fn random_id() -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(ID_LEN);
    id
}
