//! Webhook verification helper.
//!
//! Convenience wrapper around [`verify_signature`] and [`parse_events`] for
//! handling incoming webhook requests from the gateway.

use super::Client;
use crate::objects::{Event, parse_events};
use crate::signature::verify_signature;

/// Errors produced while accepting a webhook.
#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Verify and deserialize an incoming webhook.
///
/// * `method`, `path` – HTTP method and URI path the webhook was sent to.
/// * `timestamp` – value of the `WalletPay-Timestamp` request header.
/// * `body` – raw request body bytes, exactly as received.
/// * `signature` – value of the `WalletPay-Signature` request header.
/// * `key` – the store API key.
///
/// The body is only decoded after the signature matches.
///
/// # Example
///
/// ```no_run
/// use wpay_sdk::client::{WebhookError, verify_webhook};
///
/// # fn main() -> Result<(), WebhookError> {
/// let api_key = b"store-api-key";
/// let timestamp = "1700000000";
/// let signature = "Ykdk2/GRT//wCwOgYjWIu2+GoxDtUB0DPv/Wc3LYKY0=";
/// let body = br#"[]"#;
///
/// let events = verify_webhook("POST", "/webhook", timestamp, body, signature, api_key)?;
/// for event in events {
///     println!("{} {}", event.event_id, event.event_type);
/// }
/// # Ok(())
/// # }
/// ```
pub fn verify_webhook(
    method: &str,
    path: &str,
    timestamp: &str,
    body: &[u8],
    signature: &str,
    key: &[u8],
) -> Result<Vec<Event>, WebhookError> {
    if !verify_signature(method, path, timestamp, body, signature, key) {
        tracing::warn!(method, path, timestamp, "webhook signature mismatch");
        return Err(WebhookError::InvalidSignature);
    }
    let events = parse_events(body)?;
    tracing::debug!(count = events.len(), "webhook verified");
    Ok(events)
}

impl Client {
    /// [`verify_webhook`] keyed by this client's API key.
    pub fn verify_webhook(
        &self,
        method: &str,
        path: &str,
        timestamp: &str,
        body: &[u8],
        signature: &str,
    ) -> Result<Vec<Event>, WebhookError> {
        verify_webhook(method, path, timestamp, body, signature, self.api_key.as_bytes())
    }
}
