//! Domain layer for mcp-chat
//!
//! This crate contains the chat entities, value objects and the pure
//! algorithms that operate on them. It performs no I/O.
//!
//! # Core Concepts
//!
//! ## Threads and timelines
//!
//! A [`Thread`] is one conversation with the backend. Its timeline is rebuilt
//! from the backend's per-role transcripts by [`reconcile`], and bookkeeping
//! for the set of threads (which one is active, what is loaded) lives in
//! [`ThreadLifecycle`].
//!
//! ## Catalog
//!
//! Selectable resources reported by the backend: model names and registered
//! tool-server names, see [`ResourceCatalog`].

pub mod catalog;
pub mod core;
pub mod session;

// Re-export commonly used types
pub use catalog::{ResourceCatalog, ServerRegistration};
pub use core::{error::DomainError, model::Model, prompt::Prompt, string::{first_line, truncate}};
pub use session::{
    entities::{LoadState, Message, MessageStatus, Role, Thread, ThreadOrigin},
    lifecycle::ThreadLifecycle,
    reconciler::{RoleTranscripts, reconcile},
    value_objects::{MessageId, ThreadId},
};
