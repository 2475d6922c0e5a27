//! Load Timeline use case.
//!
//! Fetches a thread's per-role transcripts, reconciles them into a timeline
//! and applies the result only if the thread is still active when the fetch
//! completes. A fetch is abandoned early when its cancellation token fires,
//! which happens as soon as another thread is activated.

use crate::ports::chat_backend::ChatBackend;
use crate::ports::session_events::SessionObserver;
use crate::use_cases::session_state::{SharedState, lock};
use chrono::Utc;
use mcp_chat_domain::{ThreadId, reconcile};
use std::sync::Arc;
use tracing::{debug, warn};

/// What happened to a timeline fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The reconciled timeline replaced the current one
    Applied,
    /// The fetch failed and the current timeline was cleared
    Cleared,
    /// The fetch completed after another thread became active; discarded
    Stale,
    /// Another thread became active before the fetch completed
    Cancelled,
}

impl LoadOutcome {
    /// Whether the current timeline was touched
    pub fn changed_timeline(&self) -> bool {
        matches!(self, LoadOutcome::Applied | LoadOutcome::Cleared)
    }
}

/// Fetch-reconcile-apply for one thread, guarded against stale results.
#[derive(Clone)]
pub struct TimelineLoader {
    backend: Arc<dyn ChatBackend>,
    state: SharedState,
    observer: Arc<dyn SessionObserver>,
}

impl TimelineLoader {
    pub(crate) fn new(
        backend: Arc<dyn ChatBackend>,
        state: SharedState,
        observer: Arc<dyn SessionObserver>,
    ) -> Self {
        Self {
            backend,
            state,
            observer,
        }
    }

    /// Load `thread_id` and apply the result if it is still the active thread.
    pub async fn load(&self, thread_id: &ThreadId) -> LoadOutcome {
        let token = lock(&self.state).fetch_token(thread_id);

        let result = tokio::select! {
            biased;
            _ = token.cancelled() => None,
            result = self.backend.fetch_messages(thread_id) => Some(result),
        };

        let (outcome, timeline) = {
            let mut state = lock(&self.state);
            let outcome = match result {
                None => {
                    state.lifecycle.abandon_load(thread_id);
                    LoadOutcome::Cancelled
                }
                Some(Ok(transcripts)) => {
                    debug!(
                        "Fetched {} messages for thread {}",
                        transcripts.len(),
                        thread_id
                    );
                    let timeline = reconcile(&transcripts, Utc::now());
                    if state.lifecycle.apply_loaded(thread_id, timeline) {
                        LoadOutcome::Applied
                    } else {
                        LoadOutcome::Stale
                    }
                }
                Some(Err(e)) => {
                    warn!("Failed to load messages for thread {}: {}", thread_id, e);
                    if state.lifecycle.apply_load_failure(thread_id) {
                        LoadOutcome::Cleared
                    } else {
                        LoadOutcome::Stale
                    }
                }
            };
            (outcome, state.lifecycle.current_timeline().to_vec())
        };

        if outcome.changed_timeline() {
            self.observer.on_timeline_changed(Some(thread_id), &timeline);
        } else {
            debug!("Discarded {:?} load for thread {}", outcome, thread_id);
        }
        outcome
    }
}
