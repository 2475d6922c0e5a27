//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Message cannot be empty")]
    EmptyMessage,

    #[error("Unknown thread: {0}")]
    UnknownThread(String),

    #[error("Model name cannot be empty")]
    EmptyModelName,

    #[error("Unknown model: {0}")]
    UnknownModel(String),

    #[error("Server name cannot be empty")]
    EmptyServerName,

    #[error("Server url cannot be empty")]
    EmptyServerUrl,
}
