//! Model Registry
//!
//! Maps `app.model` labels to the in-memory models that back them. Lookups
//! resolve the label case-insensitively, so `Geo.City` and `geo.city` name the
//! same model.

use super::model::Model;
use super::types::ModelKey;
use crate::error::{ChainError, Result};

use dashmap::DashMap;
use std::fmt;
use std::sync::Arc;

/// Registry holding every installed model.
pub struct ModelRegistry {
    models: DashMap<ModelKey, Arc<Model>>,
}

impl ModelRegistry {
    /// Creates a new, empty registry.
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            models: DashMap::new(),
        })
    }

    /// Installs a model under its `app.model` label.
    ///
    /// Returns the shared handle, so callers can keep inserting records.
    /// Registering the same label twice replaces the earlier model.
    pub fn register(&self, model: Model) -> Arc<Model> {
        let key = model.key();
        let model = Arc::new(model);

        if self.models.insert(key.clone(), model.clone()).is_some() {
            tracing::warn!("Replaced previously registered model: {}", key);
        } else {
            tracing::info!("Registered model: {}", key);
        }

        model
    }

    /// Resolves a model by app label and model name.
    ///
    /// # Returns
    /// * `Ok(model)` if the model is installed.
    /// * `Err(ChainError::ModelNotFound)` otherwise.
    pub fn get_model(&self, app: &str, model: &str) -> Result<Arc<Model>> {
        let key = ModelKey::new(app, model);
        match self.models.get(&key) {
            Some(entry) => Ok(entry.value().clone()),
            None => {
                tracing::debug!("Model lookup failed: {}", key);
                Err(ChainError::ModelNotFound { label: key.label() })
            }
        }
    }

    /// Returns the labels of all installed models, sorted.
    pub fn list_models(&self) -> Vec<String> {
        let mut labels: Vec<String> = self
            .models
            .iter()
            .map(|entry| entry.key().label())
            .collect();
        labels.sort();
        labels
    }

    pub fn has_model(&self, app: &str, model: &str) -> bool {
        self.models.contains_key(&ModelKey::new(app, model))
    }

    pub fn model_count(&self) -> usize {
        self.models.len()
    }
}

impl fmt::Debug for ModelRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelRegistry")
            .field("models", &self.list_models())
            .finish()
    }
}

impl Default for ModelRegistry {
    fn default() -> Self {
        Self {
            models: DashMap::new(),
        }
    }
}
