//! AES-256-GCM sealing and opening of packed value lists.
//!
//! A fresh 96-bit nonce is drawn from the OS CSPRNG on every [`encode`], so
//! identical inputs yield different tokens. No associated data is bound.
//!
//! The cipher instance and the derived [`Key`] live only inside a single call
//! and are dropped on every exit path.

use aes_gcm::{
    aead::{rand_core::RngCore, Aead, KeyInit, OsRng},
    Aes256Gcm, Nonce,
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};

use crate::error::{Result, TagError};
use crate::key::Key;
use crate::pack::{pack, unpack};
use crate::value::TagValue;

/// Byte length of the AES-GCM nonce (12 bytes = 96 bits).
pub const NONCE_LEN: usize = 12;

/// Byte length of the GCM authentication tag (16 bytes = 128 bits).
pub const TAG_LEN: usize = 16;

/// Bytes a frame adds on top of the packed plaintext.
pub const FRAME_OVERHEAD: usize = NONCE_LEN + TAG_LEN;

/// Bind `values` into a URL-safe token under `passphrase`.
///
/// # Errors
///
/// Returns [`TagError::Encode`] if the OS random source cannot supply a nonce
/// or the AEAD primitive fails.
pub fn encode(passphrase: &str, values: &[TagValue]) -> Result<String> {
    let key = Key::from_passphrase(passphrase);
    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|_| TagError::Encode("invalid key length".into()))?;

    let mut nonce_bytes = [0u8; NONCE_LEN];
    OsRng
        .try_fill_bytes(&mut nonce_bytes)
        .map_err(|e| TagError::Encode(format!("random source unavailable: {e}")))?;

    let packed = pack(values);
    let sealed = cipher
        .encrypt(Nonce::from_slice(&nonce_bytes), packed.as_bytes())
        .map_err(|_| TagError::Encode("aead operation failed".into()))?;

    let mut frame = Vec::with_capacity(NONCE_LEN + sealed.len());
    frame.extend_from_slice(&nonce_bytes);
    frame.extend_from_slice(&sealed);
    debug_assert_eq!(frame.len(), packed.len() + FRAME_OVERHEAD);

    Ok(URL_SAFE_NO_PAD.encode(frame))
}

/// Recover the values bound into `token` under `passphrase`.
///
/// # Errors
///
/// Returns [`TagError::Decode`] for any malformed or unauthentic token. The
/// caller cannot tell which check failed.
pub fn decode(passphrase: &str, token: &str) -> Result<Vec<String>> {
    let frame = URL_SAFE_NO_PAD
        .decode(token)
        .map_err(|_| TagError::Decode)?;
    if frame.len() < FRAME_OVERHEAD {
        return Err(TagError::Decode);
    }
    let (nonce_bytes, sealed) = frame.split_at(NONCE_LEN);

    let key = Key::from_passphrase(passphrase);
    let cipher = Aes256Gcm::new_from_slice(key.as_bytes()).map_err(|_| TagError::Decode)?;
    let plaintext = cipher
        .decrypt(Nonce::from_slice(nonce_bytes), sealed)
        .map_err(|_| TagError::Decode)?;

    let packed = String::from_utf8(plaintext).map_err(|_| TagError::Decode)?;
    unpack(&packed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn frame_of(token: &str) -> Vec<u8> {
        URL_SAFE_NO_PAD.decode(token).unwrap()
    }

    fn token_of(frame: &[u8]) -> String {
        URL_SAFE_NO_PAD.encode(frame)
    }

    fn strs(xs: &[String]) -> Vec<TagValue> {
        xs.iter().map(TagValue::from).collect()
    }

    #[test]
    fn simple_round_trip() {
        let values = [
            TagValue::from("acct-1"),
            TagValue::from("acct-2"),
            TagValue::from(100),
            TagValue::from("p-xyz"),
        ];
        let token = encode("secret", &values).unwrap();
        assert_eq!(
            decode("secret", &token).unwrap(),
            vec!["acct-1", "acct-2", "100", "p-xyz"]
        );
    }

    #[test]
    fn wrong_passphrase_fails() {
        let token = encode("secret", &["a".into(), "b".into()]).unwrap();
        assert_eq!(decode("Secret", &token), Err(TagError::Decode));
    }

    #[test]
    fn flipped_tag_bit_fails() {
        let values: [TagValue; 4] = ["from".into(), "to".into(), 42.into(), "pid".into()];
        let token = encode("secret", &values).unwrap();
        let mut frame = frame_of(&token);
        let last = frame.len() - 1;
        frame[last] ^= 0x01;
        assert_eq!(decode("secret", &token_of(&frame)), Err(TagError::Decode));
    }

    #[test]
    fn empty_values_round_trip() {
        let token = encode("secret", &["".into(), "x".into(), "".into()]).unwrap();
        assert_eq!(decode("secret", &token).unwrap(), vec!["", "x", ""]);
    }

    #[test]
    fn empty_list_comes_back_as_one_empty_value() {
        let token = encode("secret", &[]).unwrap();
        assert_eq!(frame_of(&token).len(), FRAME_OVERHEAD);
        assert_eq!(decode("secret", &token).unwrap(), vec![String::new()]);
    }

    #[test]
    fn unicode_is_preserved() {
        let token = encode("passphrase", &["café".into(), "✓".into(), "日本語".into()]).unwrap();
        let decoded = decode("passphrase", &token).unwrap();
        assert_eq!(decoded, vec!["café", "✓", "日本語"]);
        assert_eq!(decoded[2].as_bytes(), "日本語".as_bytes());
    }

    #[test]
    fn short_token_fails() {
        let short: Vec<u8> = (0u8..20).map(|i| i.wrapping_mul(37)).collect();
        assert_eq!(decode("secret", &token_of(&short)), Err(TagError::Decode));
    }

    #[test]
    fn bare_nonce_and_tag_without_authentic_tag_fails() {
        assert_eq!(
            decode("secret", &token_of(&[0u8; FRAME_OVERHEAD])),
            Err(TagError::Decode)
        );
    }

    #[test]
    fn invalid_outer_base64_fails() {
        assert_eq!(decode("secret", "not a token!"), Err(TagError::Decode));
        assert_eq!(decode("secret", ""), Err(TagError::Decode));
    }

    #[test]
    fn token_is_url_safe() {
        let token = encode("secret", &["a/b+c=d".into(), 1.5.into()]).unwrap();
        assert!(token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn successive_tokens_use_fresh_nonces() {
        let values: [TagValue; 2] = ["same".into(), 1.into()];
        let a = frame_of(&encode("secret", &values).unwrap());
        let b = frame_of(&encode("secret", &values).unwrap());
        assert_ne!(a[..NONCE_LEN], b[..NONCE_LEN]);
        assert_eq!(a.len(), b.len());
    }

    #[test]
    fn authentic_frame_with_bad_inner_fragment_fails() {
        // Seal a plaintext that is not a valid packing under the real key.
        let key = Key::from_passphrase("secret");
        let cipher = Aes256Gcm::new_from_slice(key.as_bytes()).unwrap();
        let nonce = [7u8; NONCE_LEN];
        let sealed = cipher
            .encrypt(Nonce::from_slice(&nonce), &b"YWI|!!"[..])
            .unwrap();
        let mut frame = nonce.to_vec();
        frame.extend_from_slice(&sealed);
        assert_eq!(decode("secret", &token_of(&frame)), Err(TagError::Decode));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn round_trip_preserves_order(
            passphrase in ".*",
            xs in prop::collection::vec(".*", 1..8),
        ) {
            let token = encode(&passphrase, &strs(&xs)).unwrap();
            prop_assert_eq!(decode(&passphrase, &token).unwrap(), xs);
        }

        #[test]
        fn frame_length_is_plaintext_plus_overhead(
            xs in prop::collection::vec(".*", 0..8),
        ) {
            let values = strs(&xs);
            let token = encode("secret", &values).unwrap();
            prop_assert_eq!(frame_of(&token).len(), pack(&values).len() + FRAME_OVERHEAD);
        }

        #[test]
        fn other_passphrase_is_rejected(
            a in ".*",
            b in ".*",
            xs in prop::collection::vec(".*", 1..4),
        ) {
            prop_assume!(a != b);
            let token = encode(&a, &strs(&xs)).unwrap();
            prop_assert_eq!(decode(&b, &token), Err(TagError::Decode));
        }

        #[test]
        fn any_single_bit_flip_is_rejected(
            xs in prop::collection::vec(".*", 1..4),
            at in any::<prop::sample::Index>(),
            bit in 0u8..8,
        ) {
            let token = encode("secret", &strs(&xs)).unwrap();
            let mut frame = frame_of(&token);
            let i = at.index(frame.len());
            frame[i] ^= 1 << bit;
            prop_assert_eq!(decode("secret", &token_of(&frame)), Err(TagError::Decode));
        }

        #[test]
        fn truncation_is_rejected(
            xs in prop::collection::vec(".*", 1..4),
            cut in 1usize..8,
        ) {
            let token = encode("secret", &strs(&xs)).unwrap();
            let frame = frame_of(&token);
            let kept = frame.len().saturating_sub(cut);
            prop_assert_eq!(decode("secret", &token_of(&frame[..kept])), Err(TagError::Decode));
        }
    }
}
