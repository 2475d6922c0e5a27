//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`] — a backend model identifier
//! - [`prompt::Prompt`] — validated outgoing message text
//! - [`error::DomainError`] — domain-level errors

pub mod error;
pub mod model;
pub mod prompt;
pub mod string;
