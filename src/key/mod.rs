use anyhow::{Context, Result};
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};

/// VAPID public keys arrive base64url encoded but the push subscribe
/// call needs the raw bytes. Accepts padded and unpadded input;
/// malformed input is an error rather than truncated bytes.
pub fn decode_vapid_key(encoded: &str) -> Result<Vec<u8>> {
    URL_SAFE_NO_PAD
        .decode(encoded.trim_end_matches('='))
        .context("invalid base64url public key")
}
