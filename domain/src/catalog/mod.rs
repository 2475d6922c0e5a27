//! Selectable backend resources: models and tool servers.

use crate::core::error::DomainError;
use crate::core::model::Model;
use serde::{Deserialize, Serialize};

/// Request to register a tool server with the backend (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerRegistration {
    name: String,
    url: String,
}

impl ServerRegistration {
    /// Both fields must be non-empty after trimming; they are stored trimmed.
    pub fn try_new(name: impl Into<String>, url: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into().trim().to_string();
        let url = url.into().trim().to_string();
        if name.is_empty() {
            return Err(DomainError::EmptyServerName);
        }
        if url.is_empty() {
            return Err(DomainError::EmptyServerUrl);
        }
        Ok(Self { name, url })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Models and tool servers known to the client, plus the selected model.
///
/// Lists are replaced wholesale from backend listings; duplicates are dropped
/// keeping the first occurrence.
#[derive(Debug, Clone)]
pub struct ResourceCatalog {
    models: Vec<Model>,
    selected_model: Model,
    servers: Vec<String>,
}

impl ResourceCatalog {
    /// Empty catalog with `default_model` selected until models are loaded
    pub fn new(default_model: Model) -> Self {
        Self {
            models: Vec::new(),
            selected_model: default_model,
            servers: Vec::new(),
        }
    }

    pub fn models(&self) -> &[Model] {
        &self.models
    }

    pub fn selected_model(&self) -> &Model {
        &self.selected_model
    }

    pub fn servers(&self) -> &[String] {
        &self.servers
    }

    /// Replace the known models.
    ///
    /// When the list is non-empty and does not contain the selected model,
    /// the first listed model becomes selected.
    pub fn replace_models(&mut self, models: Vec<Model>) {
        self.models = dedup(models);
        if let Some(first) = self.models.first() {
            if !self.models.contains(&self.selected_model) {
                self.selected_model = first.clone();
            }
        }
    }

    /// Select a model. Any non-blank model is accepted while none are known.
    pub fn select_model(&mut self, model: Model) -> Result<(), DomainError> {
        if model.as_str().trim().is_empty() {
            return Err(DomainError::EmptyModelName);
        }
        if !self.models.is_empty() && !self.models.contains(&model) {
            return Err(DomainError::UnknownModel(model.to_string()));
        }
        self.selected_model = model;
        Ok(())
    }

    pub fn replace_servers(&mut self, servers: Vec<String>) {
        self.servers = dedup(servers);
    }
}

impl Default for ResourceCatalog {
    fn default() -> Self {
        Self::new(Model::default())
    }
}

fn dedup<T: PartialEq>(items: Vec<T>) -> Vec<T> {
    let mut unique = Vec::with_capacity(items.len());
    for item in items {
        if !unique.contains(&item) {
            unique.push(item);
        }
    }
    unique
}
