//! Session configuration — defaults the store starts from.

use mcp_chat_domain::{Model, ThreadId};
use serde::{Deserialize, Serialize};

/// Defaults and naming used by [`SessionStore`](crate::SessionStore).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Model selected before the backend reports its models.
    pub default_model: Model,
    /// Display name for threads created on this client.
    pub new_thread_name: String,
    /// Backend threads are shown as `"<prefix> <id>"`.
    pub discovered_thread_prefix: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_model: Model::default(),
            new_thread_name: "New Chat".to_string(),
            discovered_thread_prefix: "Chat".to_string(),
        }
    }
}

impl SessionConfig {
    pub fn with_default_model(mut self, model: impl Into<Model>) -> Self {
        self.default_model = model.into();
        self
    }

    pub fn with_new_thread_name(mut self, name: impl Into<String>) -> Self {
        self.new_thread_name = name.into();
        self
    }

    pub fn with_discovered_thread_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.discovered_thread_prefix = prefix.into();
        self
    }

    /// Display name for a thread discovered on the backend
    pub fn discovered_thread_name(&self, id: &ThreadId) -> String {
        format!("{} {}", self.discovered_thread_prefix, id)
    }
}
