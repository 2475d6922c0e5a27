//! HTTP adapter for the chat backend
//!
//! Implements [`ChatBackend`](mcp_chat_application::ChatBackend) over the
//! backend's JSON-over-HTTP API using `reqwest`.

pub mod gateway;
pub mod protocol;

pub use gateway::HttpChatBackend;
