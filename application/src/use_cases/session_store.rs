//! Session store — the aggregate consumers talk to.
//!
//! Owns the single copy of session state (threads, active thread, current
//! timeline, models, servers, busy flag) and delegates I/O to the
//! [`ChatBackend`], timeline loading to [`TimelineLoader`], the send protocol
//! to [`SendCoordinator`] and catalog management to [`CatalogUseCase`].
//!
//! Construct one store per process and pass it by reference.

use crate::config::SessionConfig;
use crate::ports::chat_backend::{ChatBackend, GatewayError};
use crate::ports::session_events::{NoSessionObserver, SessionObserver};
use crate::use_cases::load_timeline::{LoadOutcome, TimelineLoader};
use crate::use_cases::manage_catalog::{AddServerError, CatalogUseCase};
use crate::use_cases::send_message::{SendCoordinator, SendError, SendOutcome};
use crate::use_cases::session_state::{SessionSnapshot, SessionState, SharedState, lock};
use chrono::Utc;
use mcp_chat_domain::{DomainError, Message, Model, Thread, ThreadId};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Errors from store operations that do not talk to the backend
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error(transparent)]
    Invalid(#[from] DomainError),
}

/// Result of [`SessionStore::bootstrap`], one entry per listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapReport {
    pub threads: Result<usize, GatewayError>,
    pub models: Result<usize, GatewayError>,
    pub servers: Result<usize, GatewayError>,
}

impl BootstrapReport {
    /// Whether every listing loaded
    pub fn is_complete(&self) -> bool {
        self.threads.is_ok() && self.models.is_ok() && self.servers.is_ok()
    }
}

/// Aggregate session state and the operations on it
pub struct SessionStore {
    state: SharedState,
    backend: Arc<dyn ChatBackend>,
    observer: Arc<dyn SessionObserver>,
    config: SessionConfig,
    loader: TimelineLoader,
    sender: SendCoordinator,
    catalog: CatalogUseCase,
}

impl SessionStore {
    pub fn new(backend: Arc<dyn ChatBackend>, config: SessionConfig) -> Self {
        Self::with_observer(backend, config, Arc::new(NoSessionObserver))
    }

    /// Create a store that reports state changes to `observer`.
    pub fn with_observer(
        backend: Arc<dyn ChatBackend>,
        config: SessionConfig,
        observer: Arc<dyn SessionObserver>,
    ) -> Self {
        let state = SessionState::shared(config.default_model.clone());
        let loader = TimelineLoader::new(
            Arc::clone(&backend),
            Arc::clone(&state),
            Arc::clone(&observer),
        );
        let sender = SendCoordinator::new(
            Arc::clone(&backend),
            Arc::clone(&state),
            loader.clone(),
            Arc::clone(&observer),
            config.clone(),
        );
        let catalog = CatalogUseCase::new(Arc::clone(&backend), Arc::clone(&state));

        Self {
            state,
            backend,
            observer,
            config,
            loader,
            sender,
            catalog,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    // ==================== Loading ====================

    /// Load threads, models and servers concurrently.
    ///
    /// Failures are logged and leave the corresponding collection as it was
    /// (empty at startup); they never abort the session.
    pub async fn bootstrap(&self) -> BootstrapReport {
        let (threads, models, servers) =
            tokio::join!(self.load_threads(), self.load_models(), self.load_servers());

        for (what, result) in [("threads", &threads), ("models", &models), ("servers", &servers)]
        {
            if let Err(e) = result {
                warn!("Bootstrap: failed to load {}: {}", what, e);
            }
        }

        let report = BootstrapReport {
            threads,
            models,
            servers,
        };
        info!("Bootstrap finished (complete: {})", report.is_complete());
        report
    }

    /// Merge the backend's thread ids into the known threads.
    pub async fn load_threads(&self) -> Result<usize, GatewayError> {
        let ids = self.backend.list_thread_ids().await?;
        let count = ids.len();
        let threads = {
            let mut state = lock(&self.state);
            state.lifecycle.merge_discovered(
                ids,
                |id| self.config.discovered_thread_name(id),
                Utc::now(),
            );
            state.lifecycle.threads().to_vec()
        };
        info!("Loaded {} threads", count);
        self.observer.on_threads_changed(&threads);
        Ok(count)
    }

    pub async fn load_models(&self) -> Result<usize, GatewayError> {
        self.catalog.load_models().await
    }

    pub async fn load_servers(&self) -> Result<usize, GatewayError> {
        self.catalog.load_servers().await
    }

    // ==================== Threads ====================

    /// Create a local thread at the front of the list and make it active.
    pub fn create_new_thread(&self) -> ThreadId {
        let (id, threads) = {
            let mut state = lock(&self.state);
            let id = state.create_new_thread(&self.config.new_thread_name);
            (id, state.lifecycle.threads().to_vec())
        };
        info!("Created thread {}", id);
        self.observer.on_threads_changed(&threads);
        self.observer.on_timeline_changed(Some(&id), &[]);
        id
    }

    /// Make `id` the active thread, then load its messages.
    ///
    /// The switch is visible immediately; the loaded timeline is applied only
    /// if `id` is still active when the fetch completes.
    pub async fn switch_thread(&self, id: &ThreadId) -> Result<LoadOutcome, SessionError> {
        let timeline = {
            let mut state = lock(&self.state);
            state.activate(id)?;
            state.lifecycle.current_timeline().to_vec()
        };
        info!("Switched to thread {}", id);
        self.observer.on_timeline_changed(Some(id), &timeline);

        Ok(self.loader.load(id).await)
    }

    // ==================== Messages ====================

    /// Send `text` on the active thread. See [`SendCoordinator::send`].
    pub async fn send_message(&self, text: &str) -> Result<SendOutcome, SendError> {
        self.sender.send(text).await
    }

    // ==================== Catalog ====================

    /// Register a tool server and refresh the server list.
    pub async fn add_server(&self, name: &str, url: &str) -> Result<(), AddServerError> {
        self.catalog.add_server(name, url).await
    }

    pub fn set_selected_model(&self, model: impl Into<Model>) -> Result<(), SessionError> {
        let model = model.into();
        lock(&self.state).catalog.select_model(model.clone())?;
        info!("Selected model {}", model);
        Ok(())
    }

    // ==================== Reads ====================

    pub fn snapshot(&self) -> SessionSnapshot {
        lock(&self.state).snapshot()
    }

    pub fn threads(&self) -> Vec<Thread> {
        lock(&self.state).lifecycle.threads().to_vec()
    }

    pub fn active_thread_id(&self) -> Option<ThreadId> {
        lock(&self.state).lifecycle.active_thread_id().cloned()
    }

    pub fn current_timeline(&self) -> Vec<Message> {
        lock(&self.state).lifecycle.current_timeline().to_vec()
    }

    pub fn known_models(&self) -> Vec<Model> {
        lock(&self.state).catalog.models().to_vec()
    }

    pub fn selected_model(&self) -> Model {
        lock(&self.state).catalog.selected_model().clone()
    }

    pub fn known_servers(&self) -> Vec<String> {
        lock(&self.state).catalog.servers().to_vec()
    }

    pub fn is_busy(&self) -> bool {
        lock(&self.state).busy
    }
}
