//! Authenticated tags for synthetic payment transactions.
//!
//! A tag binds an ordered list of values (account ids, amounts, process ids)
//! into a single URL-safe token that only holders of the shared passphrase can
//! open. Tampered, truncated or mis-keyed tokens are rejected.
//!
//! # Token format
//!
//! ```text
//! token        = base64url-no-pad(nonce ‖ ciphertext ‖ tag)
//! nonce        = 12 random bytes
//! tag          = 16-byte AES-256-GCM authentication tag
//! key          = SHA-256(utf8(passphrase))
//! packed_bytes = utf8(join("|", [base64url-no-pad(utf8(v)) for v in values]))
//! ```
//!
//! There is no version byte or algorithm identifier; both sides must agree on
//! this exact construction.

pub mod cipher;
pub mod error;
pub mod key;
pub mod pack;
pub mod value;

pub use cipher::{decode, encode, FRAME_OVERHEAD, NONCE_LEN, TAG_LEN};
pub use error::{Result, TagError};
pub use key::{Key, KEY_LEN};
pub use pack::{pack, unpack, DELIMITER};
pub use value::TagValue;
