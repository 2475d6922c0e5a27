//! Session change notification port
//!
//! Lets consumers (terminal spinner, UI) react to state changes without
//! polling the store.

use mcp_chat_domain::{Message, Thread, ThreadId};

/// Callbacks for session state changes
///
/// Called after the store has released its internal lock, with owned copies
/// of the new state, so implementations may read the store again.
pub trait SessionObserver: Send + Sync {
    /// A send started (`true`) or finished (`false`)
    fn on_busy_changed(&self, _busy: bool) {}

    /// The current timeline was replaced or appended to
    fn on_timeline_changed(&self, _active: Option<&ThreadId>, _timeline: &[Message]) {}

    /// The thread list changed (created, discovered, activity updated)
    fn on_threads_changed(&self, _threads: &[Thread]) {}
}

/// No-op observer for when nobody is listening
pub struct NoSessionObserver;

impl SessionObserver for NoSessionObserver {}
