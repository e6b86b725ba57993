//! Signature algorithm and verification for Wallet Pay webhooks.
//!
//! Every webhook request is signed with HMAC-SHA256 keyed by the store API
//! key. The signed message is:
//!
//! ```text
//! {HTTP_METHOD}.{URI_PATH}.{TIMESTAMP}.{BASE64_BODY}
//! ```
//!
//! where `BASE64_BODY` is the standard (padded) base64 encoding of the raw
//! request body bytes. The resulting MAC is sent base64-encoded in the
//! [`SIGNATURE_HEADER`] header, and the timestamp in [`TIMESTAMP_HEADER`].

/// Header name carrying the store API key on every store API request.
pub const API_KEY_HEADER: &str = "Wpay-Store-Api-Key";

/// Header name for the webhook HMAC signature.
pub const SIGNATURE_HEADER: &str = "WalletPay-Signature";

/// Header name for the webhook signing timestamp.
pub const TIMESTAMP_HEADER: &str = "WalletPay-Timestamp";

/// Build the exact byte string that is signed.
///
/// The field order and the `.` separators must not change: any deviation
/// produces a valid-looking but non-matching signature.
pub fn string_to_sign(method: &str, path: &str, timestamp: &str, body: &[u8]) -> String {
    format!(
        "{method}.{path}.{timestamp}.{}",
        fast32::base64::RFC4648.encode(body)
    )
}

fn signing_key(key: &[u8]) -> ring::hmac::Key {
    ring::hmac::Key::new(ring::hmac::HMAC_SHA256, key)
}

/// Compute the base64 webhook signature for a request.
pub fn compute_signature(
    method: &str,
    path: &str,
    timestamp: &str,
    body: &[u8],
    key: &[u8],
) -> String {
    let data = string_to_sign(method, path, timestamp, body);
    let tag = ring::hmac::sign(&signing_key(key), data.as_bytes());
    fast32::base64::RFC4648.encode(tag.as_ref())
}

/// Check a webhook signature.
///
/// The provided value is base64-decoded and compared against the expected
/// MAC in constant time. Returns `false` for any mismatch, including a
/// signature that is not valid base64.
pub fn verify_signature(
    method: &str,
    path: &str,
    timestamp: &str,
    body: &[u8],
    signature: &str,
    key: &[u8],
) -> bool {
    let Ok(provided) = fast32::base64::RFC4648.decode_str(signature) else {
        tracing::debug!("webhook signature is not valid base64");
        return false;
    };
    let data = string_to_sign(method, path, timestamp, body);
    ring::hmac::verify(&signing_key(key), data.as_bytes(), &provided).is_ok()
}
