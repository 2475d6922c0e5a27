//! Chat session domain.
//!
//! - [`entities::Thread`] — one conversation and its timeline
//! - [`entities::Message`] — a single message within a timeline
//! - [`reconciler::reconcile`] — rebuilds a timeline from per-role transcripts
//! - [`lifecycle::ThreadLifecycle`] — known threads, the active one, load state

pub mod entities;
pub mod lifecycle;
pub mod reconciler;
pub mod value_objects;
