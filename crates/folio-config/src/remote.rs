//! Content backend connection settings.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

fn default_base_url() -> String {
    "http://localhost:1337".to_string()
}

/// Per-request timeout in seconds.
const fn default_timeout_secs() -> u64 {
    30
}

/// Extra attempts after a retryable failure.
const fn default_max_retries() -> u32 {
    2
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RemoteConfig {
    /// Backend origin, without the `/api` suffix.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API token sent as a bearer credential.
    #[serde(default)]
    pub token: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: String::new(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
        }
    }
}

impl RemoteConfig {
    /// Check if an API token is available.
    pub fn is_configured(&self) -> bool {
        !self.token.trim().is_empty()
    }

    /// Return the API token, failing when it is missing.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] if no token is set.
    pub fn require_token(&self) -> Result<&str, ConfigError> {
        if self.is_configured() {
            Ok(self.token.trim())
        } else {
            Err(ConfigError::NotConfigured {
                field: "remote.token".to_string(),
                hint: "set STRAPI_TOKEN or FOLIO_REMOTE__TOKEN".to_string(),
            })
        }
    }

    /// Check that the remaining fields are usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a non-HTTP base URL or a zero
    /// timeout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                field: "remote.base_url".to_string(),
                reason: format!("expected an http(s) URL, got '{url}'"),
            });
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "remote.timeout_secs".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}
