//! Session value objects: thread and message identifiers

use super::entities::Role;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque thread identifier (Value Object)
///
/// Backend threads use whatever id the backend reports; locally created
/// threads get a `thread-<uuid>` id until the backend learns about them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThreadId(String);

impl ThreadId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh, locally unique thread id
    pub fn generate() -> Self {
        Self(format!("thread-{}", Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ThreadId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ThreadId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ThreadId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Opaque message identifier (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(String);

impl MessageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Id for a message shown before the backend has confirmed it
    pub fn optimistic() -> Self {
        Self(format!("user-{}", Uuid::new_v4()))
    }

    /// Id for the `index`-th backend message of `role`, e.g. `ai-3`
    pub fn positional(role: Role, index: usize) -> Self {
        Self(format!("{}-{}", role.id_prefix(), index))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_thread_ids_are_unique() {
        let a = ThreadId::generate();
        let b = ThreadId::generate();
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("thread-"));
    }

    #[test]
    fn test_positional_message_ids() {
        assert_eq!(MessageId::positional(Role::Human, 0).as_str(), "human-0");
        assert_eq!(MessageId::positional(Role::Assistant, 2).as_str(), "ai-2");
        assert_eq!(MessageId::positional(Role::Tool, 1).as_str(), "tool-1");
    }

    #[test]
    fn test_optimistic_ids_are_unique() {
        assert_ne!(MessageId::optimistic(), MessageId::optimistic());
        assert!(MessageId::optimistic().as_str().starts_with("user-"));
    }
}
