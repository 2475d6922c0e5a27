//! Session configuration from TOML (`[session]` section)

use mcp_chat_application::SessionConfig;
use mcp_chat_domain::core::model::DEFAULT_MODEL;
use serde::{Deserialize, Serialize};

/// Raw session configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSessionConfig {
    /// Model used until the backend's model list has been loaded
    pub default_model: String,
    /// Display name of threads created locally
    pub new_thread_name: String,
    /// Display name prefix of threads discovered on the backend
    pub discovered_thread_prefix: String,
}

impl Default for FileSessionConfig {
    fn default() -> Self {
        let defaults = SessionConfig::default();
        Self {
            default_model: DEFAULT_MODEL.to_string(),
            new_thread_name: defaults.new_thread_name,
            discovered_thread_prefix: defaults.discovered_thread_prefix,
        }
    }
}

impl FileSessionConfig {
    pub fn to_session_config(&self) -> SessionConfig {
        SessionConfig::default()
            .with_default_model(self.default_model.trim())
            .with_new_thread_name(self.new_thread_name.clone())
            .with_discovered_thread_prefix(self.discovered_thread_prefix.clone())
    }
}
