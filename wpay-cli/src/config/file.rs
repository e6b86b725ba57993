//! TOML file configuration structures.
//!
//! These structs directly map to the `wpay.toml` file format.

use serde::Deserialize;
use url::Url;

/// Root configuration structure as read from the TOML file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub store: StoreConfig,
}

/// Store API section.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// The store API key issued by Wallet Pay.
    #[serde(default)]
    pub api_key: String,
    /// Transport timeout for every API call.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    /// Gateway root URL.
    #[serde(default)]
    pub base_url: Option<Url>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            timeout_seconds: default_timeout_seconds(),
            base_url: None,
        }
    }
}

fn default_timeout_seconds() -> u64 {
    wpay_sdk::client::DEFAULT_TIMEOUT.as_secs()
}
