//! Chat backend port
//!
//! Defines the interface for the remote conversational backend: six
//! request/response operations, none of which touch local state.

use async_trait::async_trait;
use mcp_chat_domain::{Model, Prompt, RoleTranscripts, ServerRegistration, ThreadId};
use thiserror::Error;

/// Errors that can occur during backend operations
///
/// The variants exist for diagnostics only. Use cases treat every variant
/// the same way: the operation failed and produced no partial result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Backend returned HTTP {0}")]
    Status(u16),

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),
}

/// Gateway to the chat backend
///
/// Implementations translate transport, status and decoding failures into
/// [`GatewayError`]. No retries are performed at this level.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Ids of all threads the backend has history for
    async fn list_thread_ids(&self) -> Result<Vec<ThreadId>, GatewayError>;

    /// Models the backend can run
    async fn list_models(&self) -> Result<Vec<Model>, GatewayError>;

    /// Names of the registered tool servers
    async fn list_servers(&self) -> Result<Vec<String>, GatewayError>;

    /// Per-role transcripts of a thread
    async fn fetch_messages(&self, thread_id: &ThreadId) -> Result<RoleTranscripts, GatewayError>;

    /// Run one prompt through `model` on `thread_id`
    ///
    /// The reply is not returned; it becomes visible through
    /// [`fetch_messages`](Self::fetch_messages).
    async fn send_prompt(
        &self,
        thread_id: &ThreadId,
        model: &Model,
        prompt: &Prompt,
    ) -> Result<(), GatewayError>;

    /// Register a tool server
    async fn register_server(&self, registration: &ServerRegistration)
    -> Result<(), GatewayError>;
}
