//! Backend configuration from TOML (`[backend]` section)

use super::ConfigValidationError;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Address of the chat backend when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000";

/// Raw backend configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBackendConfig {
    /// Base address all endpoints are resolved against
    pub base_url: String,
    /// Per-request timeout; absent or 0 means requests never time out
    pub request_timeout_seconds: Option<u64>,
}

impl Default for FileBackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_seconds: None,
        }
    }
}

impl FileBackendConfig {
    /// Parse `base_url`, requiring an absolute http(s) URL.
    pub fn parse_base_url(&self) -> Result<Url, ConfigValidationError> {
        let url = Url::parse(&self.base_url).map_err(|e| ConfigValidationError::InvalidBaseUrl {
            url: self.base_url.clone(),
            reason: e.to_string(),
        })?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            _ => Err(ConfigValidationError::UnsupportedScheme(
                self.base_url.clone(),
            )),
        }
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_seconds
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}
