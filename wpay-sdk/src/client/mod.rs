//! HTTP client for the Wallet Pay store API.
//!
//! Gated behind the `client` cargo feature so downstream crates that only
//! need the shared types and signature helpers do not pull in `reqwest`.

mod order;
mod webhook;

pub use webhook::{WebhookError, verify_webhook};

use std::future::Future;
use std::time::Duration;

use reqwest::StatusCode;
use tokio::sync::watch;
use url::Url;

use crate::objects::{OrderRejection, ResponseStatus};

/// Host serving the store API.
pub const DEFAULT_BASE_URL: &str = "https://pay.wallet.tg";

/// Transport timeout used when [`ClientOptions::timeout`] is not set.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Errors produced by the store API client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Transport-level failure (DNS, TLS, timeout, connection reset, …).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The gateway returned a non-2xx status code.
    #[error("api error: status {status}, body: {body}")]
    Api { status: StatusCode, body: String },

    /// Response body could not be deserialized.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The base URL could not be joined with the endpoint path.
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    /// The gateway answered with a business status that yields no order.
    #[error(transparent)]
    Rejected(#[from] OrderRejection),

    /// The cancellation signal fired before the call completed.
    #[error("request cancelled")]
    Cancelled,
}

impl ClientError {
    /// Gateway status of a business rejection, if this is one.
    pub fn gateway_status(&self) -> Option<ResponseStatus> {
        match self {
            ClientError::Rejected(rejection) => Some(rejection.status()),
            _ => None,
        }
    }

    /// Same `externalId` was reused with different order parameters.
    pub fn is_conflict(&self) -> bool {
        self.gateway_status() == Some(ResponseStatus::Conflict)
    }

    pub fn is_access_denied(&self) -> bool {
        self.gateway_status() == Some(ResponseStatus::AccessDenied)
    }
}

/// Options for building a [`Client`].
#[derive(Clone)]
pub struct ClientOptions {
    /// Store API key. Required.
    pub api_key: String,
    /// Transport timeout. Defaults to [`DEFAULT_TIMEOUT`].
    pub timeout: Option<Duration>,
    /// Gateway root URL. Defaults to [`DEFAULT_BASE_URL`].
    pub base_url: Option<Url>,
}

impl ClientOptions {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            timeout: None,
            base_url: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = Some(base_url);
        self
    }
}

impl std::fmt::Debug for ClientOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientOptions")
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Typed HTTP client for the Wallet Pay **store API**.
///
/// The client holds only the API key and a `reqwest::Client` handle, so it
/// is cheap to clone and safe to share between tasks. It never retries;
/// callers that retry order creation should reuse the same `externalId`.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: Url,
    api_key: String,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl Client {
    /// Create a new `Client`.
    pub fn new(options: ClientOptions) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(options.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .build()?;
        let mut base_url = match options.base_url {
            Some(url) => url,
            None => Url::parse(DEFAULT_BASE_URL)?,
        };
        // Endpoint paths are joined relative to the base, so a path prefix
        // such as `/proxy` must end with `/` to be kept.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self {
            http,
            base_url,
            api_key: options.api_key,
        })
    }

    /// Replace the `reqwest::Client` with a custom one (e.g. to configure a
    /// proxy). The timeout from [`ClientOptions`] does not apply to it.
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http = client;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Compute the webhook signature for a request, keyed by this client's
    /// API key.
    pub fn compute_signature(
        &self,
        method: &str,
        path: &str,
        timestamp: &str,
        body: &[u8],
    ) -> String {
        crate::signature::compute_signature(method, path, timestamp, body, self.api_key.as_bytes())
    }

    /// Verify a webhook signature against this client's API key.
    pub fn verify_signature(
        &self,
        method: &str,
        path: &str,
        timestamp: &str,
        body: &[u8],
        signature: &str,
    ) -> bool {
        crate::signature::verify_signature(
            method,
            path,
            timestamp,
            body,
            signature,
            self.api_key.as_bytes(),
        )
    }
}

/// Run a client call, aborting it once `cancel` turns `true`.
///
/// The in-flight request is dropped and [`ClientError::Cancelled`] is
/// returned. If the sender side of `cancel` goes away the call simply runs
/// to completion.
pub async fn with_cancellation<T, F>(
    mut cancel: watch::Receiver<bool>,
    call: F,
) -> Result<T, ClientError>
where
    F: Future<Output = Result<T, ClientError>>,
{
    tokio::select! {
        biased;

        Ok(_) = cancel.wait_for(|cancelled| *cancelled) => {
            tracing::debug!("store API call cancelled");
            Err(ClientError::Cancelled)
        }

        result = call => result,
    }
}
