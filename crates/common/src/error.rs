//! Errors for a single request against the target payment service.

use thiserror::Error;

/// Why one request against the target did not succeed.
///
/// [`TargetError::label`] gives the short code used to bucket failures in
/// the run report:
/// - [`TargetError::Transport`] → `"transport"`
/// - [`TargetError::UnexpectedStatus`] → `"status_<code>"`
/// - [`TargetError::InvalidRequest`] → `"invalid_request"`
#[derive(Debug, Error)]
pub enum TargetError {
    /// The connection failed, timed out, or the response could not be read.
    #[error("transport error: {0}")]
    Transport(String),

    /// The target answered with a status other than `200 OK`.
    #[error("unexpected status: {0}")]
    UnexpectedStatus(u16),

    /// The request could not be built (bad base URL or path).
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl TargetError {
    /// Short machine-readable code for this failure.
    pub fn label(&self) -> String {
        match self {
            TargetError::Transport(_) => "transport".into(),
            TargetError::UnexpectedStatus(code) => format!("status_{code}"),
            TargetError::InvalidRequest(_) => "invalid_request".into(),
        }
    }
}
