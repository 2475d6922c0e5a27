//! Thread lifecycle bookkeeping
//!
//! [`ThreadLifecycle`] owns the known threads, the active thread id and the
//! timeline currently shown for it. It does no I/O: callers fetch messages
//! and hand the results back through [`ThreadLifecycle::apply_loaded`] or
//! [`ThreadLifecycle::apply_load_failure`], which drop results for threads
//! that are no longer active.
//!
//! Invariants:
//! - the active id, when set, names an element of `threads`
//! - the current timeline only ever holds messages of the active thread

use super::entities::{LoadState, Message, Thread};
use super::value_objects::ThreadId;
use crate::core::error::DomainError;
use chrono::{DateTime, Utc};

/// Known threads, the active one, and its current timeline
#[derive(Debug, Clone, Default)]
pub struct ThreadLifecycle {
    /// Most recently created first
    threads: Vec<Thread>,
    active: Option<ThreadId>,
    current_timeline: Vec<Message>,
}

impl ThreadLifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn threads(&self) -> &[Thread] {
        &self.threads
    }

    pub fn thread(&self, id: &ThreadId) -> Option<&Thread> {
        self.threads.iter().find(|t| t.id() == id)
    }

    pub fn contains(&self, id: &ThreadId) -> bool {
        self.thread(id).is_some()
    }

    pub fn active_thread_id(&self) -> Option<&ThreadId> {
        self.active.as_ref()
    }

    pub fn active_thread(&self) -> Option<&Thread> {
        self.active.as_ref().and_then(|id| self.thread(id))
    }

    pub fn is_active(&self, id: &ThreadId) -> bool {
        self.active.as_ref() == Some(id)
    }

    /// Timeline of the active thread; empty when none is active
    pub fn current_timeline(&self) -> &[Message] {
        &self.current_timeline
    }

    /// Insert a fresh local thread at the front and make it active.
    pub fn create_new_thread(
        &mut self,
        display_name: impl Into<String>,
        now: DateTime<Utc>,
    ) -> ThreadId {
        let id = ThreadId::generate();
        self.threads
            .insert(0, Thread::local(id.clone(), display_name, now));
        self.active = Some(id.clone());
        self.current_timeline.clear();
        id
    }

    /// Make `id` the active thread and mark its messages as loading.
    ///
    /// The current timeline switches to whatever is cached for `id` (empty if
    /// it was never loaded) so it never shows another thread's messages while
    /// the fetch is in flight.
    pub fn activate(&mut self, id: &ThreadId) -> Result<(), DomainError> {
        let thread = self
            .threads
            .iter_mut()
            .find(|t| t.id() == id)
            .ok_or_else(|| DomainError::UnknownThread(id.to_string()))?;

        thread.set_load_state(LoadState::Loading);
        self.current_timeline = thread.timeline().to_vec();
        self.active = Some(id.clone());
        Ok(())
    }

    /// Replace the timeline of `id` with a freshly reconciled one.
    ///
    /// Returns `false` and changes nothing when `id` is no longer active.
    pub fn apply_loaded(&mut self, id: &ThreadId, timeline: Vec<Message>) -> bool {
        if !self.is_active(id) {
            self.abandon_load(id);
            return false;
        }
        if let Some(thread) = self.thread_mut(id) {
            thread.replace_timeline(timeline.clone());
            thread.set_load_state(LoadState::Loaded);
        }
        self.current_timeline = timeline;
        true
    }

    /// Clear the timeline of `id` after a failed fetch.
    ///
    /// Returns `false` and changes nothing when `id` is no longer active.
    pub fn apply_load_failure(&mut self, id: &ThreadId) -> bool {
        if !self.is_active(id) {
            self.abandon_load(id);
            return false;
        }
        if let Some(thread) = self.thread_mut(id) {
            thread.replace_timeline(Vec::new());
            thread.set_load_state(LoadState::Unloaded);
        }
        self.current_timeline.clear();
        true
    }

    /// Forget an in-flight load whose result will never be applied.
    ///
    /// Does nothing once `id` is active again, since a newer load owns it.
    pub fn abandon_load(&mut self, id: &ThreadId) {
        if self.is_active(id) {
            return;
        }
        if let Some(thread) = self.thread_mut(id) {
            if thread.load_state() == LoadState::Loading {
                thread.set_load_state(LoadState::Unloaded);
            }
        }
    }

    /// Append a message to the active thread's timeline.
    ///
    /// Returns the id of the thread it was appended to, or `None` when no
    /// thread is active.
    pub fn append_to_active(&mut self, message: Message) -> Option<ThreadId> {
        let id = self.active.clone()?;
        if let Some(thread) = self.thread_mut(&id) {
            thread.push_message(message.clone());
        }
        self.current_timeline.push(message);
        Some(id)
    }

    /// Record that the backend accepted a message on `id`.
    pub fn acknowledge(&mut self, id: &ThreadId, now: DateTime<Utc>) -> bool {
        match self.thread_mut(id) {
            Some(thread) => {
                thread.acknowledge();
                thread.touch(now);
                true
            }
            None => false,
        }
    }

    /// Merge the thread ids reported by the backend into the known threads.
    ///
    /// Threads the backend did not report (local-only ones, or ones created
    /// after the listing was taken) stay in front in their current order.
    /// Reported ids follow in backend order; already-known ones keep their
    /// cached timeline and state. Nothing is ever removed, so the active id
    /// stays valid.
    pub fn merge_discovered<F>(&mut self, ids: Vec<ThreadId>, display_name: F, now: DateTime<Utc>)
    where
        F: Fn(&ThreadId) -> String,
    {
        let mut existing = std::mem::take(&mut self.threads);
        let mut discovered = Vec::with_capacity(ids.len());

        for id in ids {
            if discovered.iter().any(|t: &Thread| t.id() == &id) {
                continue;
            }
            match existing.iter().position(|t| t.id() == &id) {
                Some(index) => {
                    let mut thread = existing.remove(index);
                    thread.acknowledge();
                    discovered.push(thread);
                }
                None => {
                    let name = display_name(&id);
                    discovered.push(Thread::discovered(id, name, now));
                }
            }
        }

        existing.extend(discovered);
        self.threads = existing;
    }

    fn thread_mut(&mut self, id: &ThreadId) -> Option<&mut Thread> {
        self.threads.iter_mut().find(|t| t.id() == id)
    }
}
