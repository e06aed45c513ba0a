//! [`Key`]: the 256-bit symmetric key derived from a shared passphrase.
//!
//! The derivation is a single SHA-256 over the passphrase bytes. It is
//! deterministic so that independent encoders and verifiers agree on the key
//! without coordination. It is **not** a password-hashing function and must
//! never be used to store or verify user passwords.

use sha2::{Digest, Sha256};

/// Byte length of an AES-256 key (32 bytes = 256 bits).
pub const KEY_LEN: usize = 32;

/// Key material derived from a passphrase.
///
/// Lives only for the duration of one encode or decode call. The bytes are
/// overwritten with zeroes on drop and never printed.
pub struct Key([u8; KEY_LEN]);

impl Key {
    /// Derive a key as `SHA-256(utf8(passphrase))`.
    pub fn from_passphrase(passphrase: &str) -> Self {
        let digest = Sha256::digest(passphrase.as_bytes());
        let mut bytes = [0u8; KEY_LEN];
        bytes.copy_from_slice(&digest);
        Self(bytes)
    }

    /// Borrow the raw key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl Drop for Key {
    fn drop(&mut self) {
        self.0.iter_mut().for_each(|b| *b = 0);
    }
}

impl std::fmt::Debug for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Key([REDACTED])")
    }
}
