//! Records the harness generates and the request shapes it sends.
//!
//! The target service exposes two endpoints:
//! - `POST /account/{account}/create/{balance}`
//! - `POST /transaction/{id}/process` with a [`ProcessTransactionRequest`] body

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Generated records
// ---------------------------------------------------------------------------

/// A synthetic account seeded into the target before transactions run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Short random account identifier.
    pub account: String,
    /// Opening balance.
    pub balance: i64,
}

impl Account {
    /// Path of the create-account call for this record.
    pub fn create_path(&self) -> String {
        format!("/account/{}/create/{}", self.account, self.balance)
    }
}

/// A synthetic transfer between two generated accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Tag binding `from`, `to`, `amount` and `process_id`; URL-safe.
    pub id: String,
    pub from: String,
    pub to: String,
    pub amount: i64,
    /// Shared by every transaction of one run.
    pub process_id: String,
}

impl Transaction {
    /// Path of the process-transaction call for this record.
    pub fn process_path(&self) -> String {
        format!("/transaction/{}/process", self.id)
    }

    /// Body of the process-transaction call for this record.
    pub fn to_request(&self) -> ProcessTransactionRequest {
        ProcessTransactionRequest {
            kind: "request".into(),
            from: self.from.clone(),
            to: self.to.clone(),
            process_id: self.process_id.clone(),
            amount: self.amount,
        }
    }
}

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

/// JSON body for `POST /transaction/{id}/process`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessTransactionRequest {
    /// Always `"request"`.
    #[serde(rename = "type")]
    pub kind: String,
    pub from: String,
    pub to: String,
    pub process_id: String,
    pub amount: i64,
}
