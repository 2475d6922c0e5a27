//! Shared session state and the busy guard.

use crate::ports::session_events::SessionObserver;
use chrono::Utc;
use mcp_chat_domain::{
    DomainError, Message, Model, ResourceCatalog, Thread, ThreadId, ThreadLifecycle,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio_util::sync::CancellationToken;

/// Everything the store knows. Guarded by one mutex that is never held
/// across an `.await`.
#[derive(Debug)]
pub(crate) struct SessionState {
    pub lifecycle: ThreadLifecycle,
    pub catalog: ResourceCatalog,
    /// True exactly while a send is in flight
    pub busy: bool,
    /// Cancellation tokens of in-flight timeline fetches, per thread
    fetches: HashMap<ThreadId, CancellationToken>,
}

pub(crate) type SharedState = Arc<Mutex<SessionState>>;

impl SessionState {
    pub fn new(default_model: Model) -> Self {
        Self {
            lifecycle: ThreadLifecycle::new(),
            catalog: ResourceCatalog::new(default_model),
            busy: false,
            fetches: HashMap::new(),
        }
    }

    pub fn shared(default_model: Model) -> SharedState {
        Arc::new(Mutex::new(Self::new(default_model)))
    }

    /// Create and activate a local thread, cancelling every pending fetch.
    pub fn create_new_thread(&mut self, display_name: &str) -> ThreadId {
        let id = self.lifecycle.create_new_thread(display_name, Utc::now());
        self.cancel_fetches_except(&id);
        id
    }

    /// Activate `id`, cancelling pending fetches of every other thread.
    pub fn activate(&mut self, id: &ThreadId) -> Result<(), DomainError> {
        self.lifecycle.activate(id)?;
        self.cancel_fetches_except(id);
        Ok(())
    }

    /// Token for a fetch of `id`; shared by concurrent fetches of the same thread
    pub fn fetch_token(&mut self, id: &ThreadId) -> CancellationToken {
        self.fetches
            .entry(id.clone())
            .or_insert_with(CancellationToken::new)
            .clone()
    }

    fn cancel_fetches_except(&mut self, keep: &ThreadId) {
        self.fetches.retain(|id, token| {
            if id == keep {
                true
            } else {
                token.cancel();
                false
            }
        });
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            threads: self.lifecycle.threads().to_vec(),
            active_thread_id: self.lifecycle.active_thread_id().cloned(),
            current_timeline: self.lifecycle.current_timeline().to_vec(),
            known_models: self.catalog.models().to_vec(),
            selected_model: self.catalog.selected_model().clone(),
            known_servers: self.catalog.servers().to_vec(),
            busy: self.busy,
        }
    }
}

/// Lock the state, recovering from poisoning (state stays consistent because
/// every mutation is a single synchronous step).
pub(crate) fn lock(state: &Mutex<SessionState>) -> MutexGuard<'_, SessionState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Owned copy of the session state for consumers
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub threads: Vec<Thread>,
    pub active_thread_id: Option<ThreadId>,
    pub current_timeline: Vec<Message>,
    pub known_models: Vec<Model>,
    pub selected_model: Model,
    pub known_servers: Vec<String>,
    pub busy: bool,
}

/// Holds the busy flag for the duration of one send.
///
/// The flag is cleared in `Drop`, so it is released on every exit path,
/// including when the send future is dropped mid-flight.
pub(crate) struct BusyGuard<'a> {
    state: &'a Mutex<SessionState>,
    observer: &'a dyn SessionObserver,
}

impl<'a> BusyGuard<'a> {
    /// Set the busy flag in an already-locked state.
    ///
    /// Returns `None` when another send holds it. The caller must notify the
    /// observer once the lock is released.
    pub fn try_acquire(
        state: &'a Mutex<SessionState>,
        locked: &mut SessionState,
        observer: &'a dyn SessionObserver,
    ) -> Option<Self> {
        if locked.busy {
            return None;
        }
        locked.busy = true;
        Some(Self { state, observer })
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        lock(self.state).busy = false;
        self.observer.on_busy_changed(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::session_events::NoSessionObserver;

    #[test]
    fn test_busy_guard_is_exclusive_and_released_on_drop() {
        let state = Mutex::new(SessionState::new(Model::default()));
        let observer = NoSessionObserver;

        let guard = {
            let mut locked = lock(&state);
            BusyGuard::try_acquire(&state, &mut locked, &observer)
        };
        assert!(guard.is_some());
        assert!(lock(&state).busy);

        {
            let mut locked = lock(&state);
            assert!(BusyGuard::try_acquire(&state, &mut locked, &observer).is_none());
        }

        drop(guard);
        assert!(!lock(&state).busy);
    }

    #[test]
    fn test_activation_cancels_other_fetches() {
        let mut state = SessionState::new(Model::default());
        state.lifecycle.merge_discovered(
            vec![ThreadId::new("a"), ThreadId::new("b")],
            |id| id.to_string(),
            Utc::now(),
        );
        let a = ThreadId::new("a");
        let b = ThreadId::new("b");

        state.activate(&a).unwrap();
        let token_a = state.fetch_token(&a);
        state.activate(&a).unwrap();
        assert!(!token_a.is_cancelled());

        state.activate(&b).unwrap();
        assert!(token_a.is_cancelled());
        assert!(!state.fetch_token(&b).is_cancelled());
    }

    #[test]
    fn test_new_thread_cancels_all_fetches() {
        let mut state = SessionState::new(Model::default());
        state
            .lifecycle
            .merge_discovered(vec![ThreadId::new("a")], |id| id.to_string(), Utc::now());
        let a = ThreadId::new("a");
        state.activate(&a).unwrap();
        let token = state.fetch_token(&a);

        state.create_new_thread("New Chat");
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_snapshot_copies_state() {
        let mut state = SessionState::new(Model::new("m"));
        let id = state.create_new_thread("New Chat");
        let snapshot = state.snapshot();
        assert_eq!(snapshot.active_thread_id, Some(id));
        assert_eq!(snapshot.selected_model, Model::new("m"));
        assert!(!snapshot.busy);
    }
}
