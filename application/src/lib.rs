//! Application layer for mcp-chat
//!
//! This crate contains the session store, the send protocol, port
//! definitions and application configuration. It depends only on the domain
//! layer.
//!
//! [`SessionStore`] is the single entry point for consumers: it owns the
//! session state and delegates I/O to a [`ChatBackend`] adapter.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::SessionConfig;
pub use ports::{
    chat_backend::{ChatBackend, GatewayError},
    session_events::{NoSessionObserver, SessionObserver},
};
pub use use_cases::load_timeline::{LoadOutcome, TimelineLoader};
pub use use_cases::manage_catalog::{AddServerError, CatalogUseCase};
pub use use_cases::send_message::{SendCoordinator, SendError, SendOutcome};
pub use use_cases::session_state::SessionSnapshot;
pub use use_cases::session_store::{BootstrapReport, SessionError, SessionStore};
