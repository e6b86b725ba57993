//! Configuration module for the `wpay` command line tool.
//!
//! Handles loading configuration from a TOML file and applying
//! command line / environment overrides.

pub mod file;

use crate::config::file::FileConfig;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use wpay_sdk::client::ClientOptions;

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("validation error: {0}")]
    ValidationError(String),
}

/// Configuration loader that handles the complete loading process.
pub struct ConfigLoader {
    config_path: PathBuf,
    api_key_override: Option<String>,
}

impl ConfigLoader {
    /// Create a new config loader.
    pub fn new(config_path: impl AsRef<Path>, api_key_override: Option<String>) -> Self {
        Self {
            config_path: config_path.as_ref().to_path_buf(),
            api_key_override,
        }
    }

    /// Load and process the configuration.
    ///
    /// A missing config file is accepted when the API key is supplied as an
    /// override; defaults are used for everything else.
    pub fn load(&self) -> Result<ClientOptions, ConfigError> {
        let mut file_config = match std::fs::read_to_string(&self.config_path) {
            Ok(content) => toml::from_str::<FileConfig>(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && self.api_key_override.is_some() => {
                tracing::debug!(path = ?self.config_path, "config file not found, using defaults");
                FileConfig::default()
            }
            Err(e) => return Err(e.into()),
        };

        if let Some(api_key) = &self.api_key_override {
            file_config.store.api_key = api_key.clone();
        }

        self.validate(&file_config)?;

        let store = file_config.store;
        let mut options = ClientOptions::new(store.api_key)
            .with_timeout(Duration::from_secs(store.timeout_seconds));
        if let Some(base_url) = store.base_url {
            options = options.with_base_url(base_url);
        }
        Ok(options)
    }

    fn validate(&self, config: &FileConfig) -> Result<(), ConfigError> {
        if config.store.api_key.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "store api_key is empty".to_string(),
            ));
        }
        if config.store.timeout_seconds == 0 {
            return Err(ConfigError::ValidationError(
                "store timeout_seconds must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_from_file() {
        let file = write_config("[store]\napi_key = \"from-file\"\ntimeout_seconds = 7\n");
        let options = ConfigLoader::new(file.path(), None).load().unwrap();
        assert_eq!(options.api_key, "from-file");
        assert_eq!(options.timeout, Some(Duration::from_secs(7)));
        assert!(options.base_url.is_none());
    }

    #[test]
    fn test_override_wins() {
        let file = write_config("[store]\napi_key = \"from-file\"\n");
        let options = ConfigLoader::new(file.path(), Some("from-env".to_string()))
            .load()
            .unwrap();
        assert_eq!(options.api_key, "from-env");
        assert_eq!(options.timeout, Some(Duration::from_secs(20)));
    }

    #[test]
    fn test_missing_file_needs_override() {
        let missing = std::env::temp_dir().join("wpay-config-that-does-not-exist.toml");
        assert!(matches!(
            ConfigLoader::new(&missing, None).load(),
            Err(ConfigError::IoError(_))
        ));
        let options = ConfigLoader::new(&missing, Some("key".to_string()))
            .load()
            .unwrap();
        assert_eq!(options.api_key, "key");
    }

    #[test]
    fn test_validation() {
        let file = write_config("[store]\napi_key = \"  \"\n");
        assert!(matches!(
            ConfigLoader::new(file.path(), None).load(),
            Err(ConfigError::ValidationError(_))
        ));

        let file = write_config("[store]\napi_key = \"k\"\ntimeout_seconds = 0\n");
        assert!(matches!(
            ConfigLoader::new(file.path(), None).load(),
            Err(ConfigError::ValidationError(_))
        ));
    }
}
