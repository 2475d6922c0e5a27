//! Send Message use case.
//!
//! Coordinates one outgoing message:
//! 1. Validate the text; with no active thread, create one and stop there
//! 2. Refuse while another send is in flight (no queuing)
//! 3. Set busy and append a pending human message to the active timeline
//! 4. Post the prompt to the backend
//! 5. On success, reload and reconcile the thread, then record activity
//! 6. On failure, keep the pending message and report nothing to the timeline
//!
//! Busy is released on every exit path by [`BusyGuard`].

use crate::config::SessionConfig;
use crate::ports::chat_backend::ChatBackend;
use crate::ports::session_events::SessionObserver;
use crate::use_cases::load_timeline::{LoadOutcome, TimelineLoader};
use crate::use_cases::session_state::{BusyGuard, SharedState, lock};
use chrono::Utc;
use mcp_chat_domain::{DomainError, Message, Prompt, ThreadId, truncate};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that prevent a send from starting
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SendError {
    #[error(transparent)]
    Invalid(#[from] DomainError),

    #[error("A message is already being sent")]
    Busy,
}

/// Result of a [`SendCoordinator::send`] call that was allowed to start
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// No thread was active: a new one was created and nothing was sent.
    /// Sending again transmits the message on the new thread.
    ThreadCreated(ThreadId),
    /// The backend accepted the prompt; the timeline reload had this outcome
    Delivered {
        thread_id: ThreadId,
        reload: LoadOutcome,
    },
    /// The backend did not accept the prompt; the pending message stays
    NotDelivered(ThreadId),
}

/// Runs the optimistic send protocol against the shared session state
#[derive(Clone)]
pub struct SendCoordinator {
    backend: Arc<dyn ChatBackend>,
    state: SharedState,
    loader: TimelineLoader,
    observer: Arc<dyn SessionObserver>,
    config: SessionConfig,
}

impl SendCoordinator {
    pub(crate) fn new(
        backend: Arc<dyn ChatBackend>,
        state: SharedState,
        loader: TimelineLoader,
        observer: Arc<dyn SessionObserver>,
        config: SessionConfig,
    ) -> Self {
        Self {
            backend,
            state,
            loader,
            observer,
            config,
        }
    }

    /// Send `text` on the active thread.
    pub async fn send(&self, text: &str) -> Result<SendOutcome, SendError> {
        let prompt = Prompt::try_new(text)?;

        let (thread_id, model, _busy) = {
            let mut state = lock(&self.state);

            let Some(thread_id) = state.lifecycle.active_thread_id().cloned() else {
                let id = state.create_new_thread(&self.config.new_thread_name);
                let threads = state.lifecycle.threads().to_vec();
                drop(state);

                info!("No active thread; created {} without sending", id);
                self.observer.on_threads_changed(&threads);
                self.observer.on_timeline_changed(Some(&id), &[]);
                return Ok(SendOutcome::ThreadCreated(id));
            };

            let guard = BusyGuard::try_acquire(&self.state, &mut state, self.observer.as_ref())
                .ok_or(SendError::Busy)?;
            state
                .lifecycle
                .append_to_active(Message::pending_human(prompt.content(), Utc::now()));
            let timeline = state.lifecycle.current_timeline().to_vec();
            let model = state.catalog.selected_model().clone();
            drop(state);

            self.observer.on_busy_changed(true);
            self.observer.on_timeline_changed(Some(&thread_id), &timeline);
            (thread_id, model, guard)
        };

        info!(
            "Sending to thread {} with model {}: {}",
            thread_id,
            model,
            truncate(prompt.content(), 80)
        );

        match self.backend.send_prompt(&thread_id, &model, &prompt).await {
            Ok(()) => {
                let reload = self.loader.load(&thread_id).await;
                debug!("Reload after send: {:?}", reload);

                let threads = {
                    let mut state = lock(&self.state);
                    state.lifecycle.acknowledge(&thread_id, Utc::now());
                    state.lifecycle.threads().to_vec()
                };
                self.observer.on_threads_changed(&threads);

                Ok(SendOutcome::Delivered { thread_id, reload })
            }
            Err(e) => {
                warn!("Send to thread {} failed: {}", thread_id, e);
                Ok(SendOutcome::NotDelivered(thread_id))
            }
        }
    }
}
