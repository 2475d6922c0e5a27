//! Session domain entities

use super::value_objects::{MessageId, ThreadId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Author of a message in a thread
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Human,
    Assistant,
    Tool,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Human => "human",
            Role::Assistant => "assistant",
            Role::Tool => "tool",
        }
    }

    /// Prefix used for positional message ids
    pub(crate) fn id_prefix(&self) -> &'static str {
        match self {
            Role::Human => "human",
            Role::Assistant => "ai",
            Role::Tool => "tool",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether the backend has confirmed a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MessageStatus {
    /// Shown locally before the backend confirmed it
    Pending,
    /// Produced by reconciling a backend transcript
    #[default]
    Committed,
}

/// A message in a thread timeline (Entity)
///
/// Immutable once created; identity is the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    id: MessageId,
    role: Role,
    content: String,
    timestamp: DateTime<Utc>,
    status: MessageStatus,
}

impl Message {
    /// A backend-confirmed message
    pub fn committed(
        id: MessageId,
        role: Role,
        content: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            role,
            content: content.into(),
            timestamp,
            status: MessageStatus::Committed,
        }
    }

    /// A human message shown before the backend has seen it
    pub fn pending_human(content: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: MessageId::optimistic(),
            role: Role::Human,
            content: content.into(),
            timestamp,
            status: MessageStatus::Pending,
        }
    }

    pub fn id(&self) -> &MessageId {
        &self.id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn status(&self) -> MessageStatus {
        self.status
    }

    pub fn is_pending(&self) -> bool {
        self.status == MessageStatus::Pending
    }
}

/// Where a thread came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThreadOrigin {
    /// Created locally; the backend has not acknowledged it yet
    Local,
    /// Reported by the backend, or acknowledged through a successful send
    Remote,
}

/// Message loading state of a thread
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LoadState {
    #[default]
    Unloaded,
    Loading,
    Loaded,
}

/// One conversation (Entity)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thread {
    id: ThreadId,
    display_name: String,
    last_activity: DateTime<Utc>,
    timeline: Vec<Message>,
    origin: ThreadOrigin,
    load_state: LoadState,
}

impl Thread {
    /// A thread created on this client, with an empty timeline
    pub fn local(id: ThreadId, display_name: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            last_activity: now,
            timeline: Vec::new(),
            origin: ThreadOrigin::Local,
            // Nothing to fetch for a thread the backend has never seen
            load_state: LoadState::Loaded,
        }
    }

    /// A thread discovered on the backend; its messages are not loaded yet
    pub fn discovered(id: ThreadId, display_name: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            last_activity: now,
            timeline: Vec::new(),
            origin: ThreadOrigin::Remote,
            load_state: LoadState::Unloaded,
        }
    }

    pub fn id(&self) -> &ThreadId {
        &self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn last_activity(&self) -> DateTime<Utc> {
        self.last_activity
    }

    pub fn timeline(&self) -> &[Message] {
        &self.timeline
    }

    pub fn origin(&self) -> ThreadOrigin {
        self.origin
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    pub fn is_local_only(&self) -> bool {
        self.origin == ThreadOrigin::Local
    }

    pub(crate) fn set_load_state(&mut self, state: LoadState) {
        self.load_state = state;
    }

    pub(crate) fn replace_timeline(&mut self, timeline: Vec<Message>) {
        self.timeline = timeline;
    }

    pub(crate) fn push_message(&mut self, message: Message) {
        self.timeline.push(message);
    }

    pub(crate) fn touch(&mut self, now: DateTime<Utc>) {
        self.last_activity = now;
    }

    pub(crate) fn acknowledge(&mut self) {
        self.origin = ThreadOrigin::Remote;
    }
}
