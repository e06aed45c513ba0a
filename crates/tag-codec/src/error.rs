//! Error type for the tag codec.

use thiserror::Error;

/// Errors produced by [`encode`](crate::encode) and [`decode`](crate::decode).
///
/// Decoding deliberately collapses every failure (bad Base64, short frame,
/// authentication failure, invalid UTF-8, bad inner fragment) into the single
/// [`TagError::Decode`] variant with a fixed message.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TagError {
    /// The tag could not be produced: the secure random source failed or the
    /// AEAD primitive rejected its input.
    #[error("failed to encode tag: {0}")]
    Encode(String),

    /// The token is malformed or not authentic under the supplied passphrase.
    #[error("failed to decode tag")]
    Decode,
}

/// A convenience `Result` alias using [`TagError`].
pub type Result<T> = std::result::Result<T, TagError>;
