//! Wire types and request errors shared between the perf harness and the
//! payment service it drives.

pub mod error;
pub mod protocol;

pub use error::TargetError;
