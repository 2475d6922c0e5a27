//! Manage Catalog use case.
//!
//! Loads the model and tool-server listings from the backend and registers
//! new tool servers. The server list is always refreshed from the backend
//! after a registration instead of being appended to locally.

use crate::ports::chat_backend::{ChatBackend, GatewayError};
use crate::use_cases::session_state::{SharedState, lock};
use mcp_chat_domain::{DomainError, ServerRegistration};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Errors returned by [`CatalogUseCase::add_server`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddServerError {
    #[error(transparent)]
    Invalid(#[from] DomainError),

    #[error("Backend rejected server registration: {0}")]
    Rejected(#[from] GatewayError),
}

/// Loads and updates the models and tool servers known to the session
#[derive(Clone)]
pub struct CatalogUseCase {
    backend: Arc<dyn ChatBackend>,
    state: SharedState,
}

impl CatalogUseCase {
    pub(crate) fn new(backend: Arc<dyn ChatBackend>, state: SharedState) -> Self {
        Self { backend, state }
    }

    /// Replace the known models with the backend's listing.
    ///
    /// On failure the known models are left untouched.
    pub async fn load_models(&self) -> Result<usize, GatewayError> {
        let models = self.backend.list_models().await?;
        let count = models.len();
        let mut state = lock(&self.state);
        state.catalog.replace_models(models);
        info!(
            "Loaded {} models, selected {}",
            count,
            state.catalog.selected_model()
        );
        Ok(count)
    }

    /// Replace the known servers with the backend's listing.
    ///
    /// On failure the known servers are left untouched.
    pub async fn load_servers(&self) -> Result<usize, GatewayError> {
        let servers = self.backend.list_servers().await?;
        let count = servers.len();
        lock(&self.state).catalog.replace_servers(servers);
        info!("Loaded {} tool servers", count);
        Ok(count)
    }

    /// Register a tool server, then refresh the server list from the backend.
    ///
    /// Validation and registration failures are returned and leave the known
    /// servers unchanged. A failed refresh after a successful registration is
    /// logged and the previous list is kept.
    pub async fn add_server(&self, name: &str, url: &str) -> Result<(), AddServerError> {
        let registration = ServerRegistration::try_new(name, url)?;

        self.backend.register_server(&registration).await?;
        info!(
            "Registered tool server {} at {}",
            registration.name(),
            registration.url()
        );

        if let Err(e) = self.load_servers().await {
            warn!(
                "Server {} registered but the server list could not be refreshed: {}",
                registration.name(),
                e
            );
        }
        Ok(())
    }
}
