//! Packing of a value list into one delimiter-safe string, and its inverse.
//!
//! Each value is rendered to text, its UTF-8 bytes are Base64url-encoded
//! without padding, and the encodings are joined with [`DELIMITER`]. The
//! Base64url alphabet never contains `|`, so splitting is unambiguous
//! whatever the values contain.
//!
//! # Empty input
//!
//! `pack(&[])` is the empty string, and `unpack("")` is a single empty
//! value. An empty list therefore comes back as `[""]`; every non-empty list
//! round-trips exactly, including empty values at either end.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};

use crate::error::{Result, TagError};
use crate::value::TagValue;

/// Separator between packed elements.
pub const DELIMITER: char = '|';

/// Pack `values` into a single string.
pub fn pack(values: &[TagValue]) -> String {
    let mut out = String::new();
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            out.push(DELIMITER);
        }
        URL_SAFE_NO_PAD.encode_string(value.to_string().as_bytes(), &mut out);
    }
    out
}

/// Split a packed string back into its text values.
///
/// # Errors
///
/// Returns [`TagError::Decode`] if any fragment is not valid Base64url or
/// does not decode to UTF-8.
pub fn unpack(packed: &str) -> Result<Vec<String>> {
    packed
        .split(DELIMITER)
        .map(|fragment| {
            let bytes = URL_SAFE_NO_PAD
                .decode(fragment)
                .map_err(|_| TagError::Decode)?;
            String::from_utf8(bytes).map_err(|_| TagError::Decode)
        })
        .collect()
}
