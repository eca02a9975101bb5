use super::query::{Keywords, QuerySet};
use super::types::{compare_values, ModelKey, ModelMeta, Record};
use crate::error::Result;

use dashmap::DashMap;
use std::sync::Arc;

/// Name of the manager every model has.
pub const DEFAULT_MANAGER: &str = "objects";

/// An in-memory model: its metadata, its rows keyed by primary key and any
/// named managers.
///
/// A manager is a named entry point that narrows the default queryset with a
/// fixed set of keywords (e.g. `active` -> `is_active=true`).
pub struct Model {
    meta: Arc<ModelMeta>,
    records: DashMap<String, Record>,
    managers: DashMap<String, Keywords>,
}

impl Model {
    pub fn new(meta: ModelMeta) -> Self {
        Self {
            meta: Arc::new(meta),
            records: DashMap::new(),
            managers: DashMap::new(),
        }
    }

    pub fn meta(&self) -> &ModelMeta {
        &self.meta
    }

    pub fn key(&self) -> ModelKey {
        self.meta.key()
    }

    /// Stores a record, returning the one it replaced if the pk was taken.
    pub fn insert(&self, record: Record) -> Option<Record> {
        self.records.insert(record.pk_text(), record)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Registers a named manager. Its keywords must resolve on this model.
    pub fn add_manager(&self, name: &str, keywords: Keywords) -> Result<()> {
        keywords.validate(&self.meta)?;
        self.managers.insert(name.to_string(), keywords);
        tracing::debug!("Registered manager '{}' on {}", name, self.meta.key());
        Ok(())
    }

    pub fn has_manager(&self, name: &str) -> bool {
        name == DEFAULT_MANAGER || self.managers.contains_key(name)
    }

    pub fn manager_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .managers
            .iter()
            .map(|entry| entry.key().clone())
            .collect();
        names.push(DEFAULT_MANAGER.to_string());
        names.sort();
        names
    }

    /// The default manager's queryset: every record, in pk order and then in
    /// the model's default ordering when it declares one.
    pub fn all(&self) -> QuerySet {
        let mut records: Vec<Record> = self
            .records
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        records.sort_by(|a, b| compare_values(&a.pk, &b.pk));

        QuerySet::new(self.meta.clone(), records).order_by(&self.meta.ordering)
    }

    /// Queryset of a named manager, or `None` if no such manager exists.
    pub fn manager(&self, name: &str) -> Result<Option<QuerySet>> {
        if name == DEFAULT_MANAGER {
            return Ok(Some(self.all()));
        }

        let keywords = match self.managers.get(name) {
            Some(entry) => entry.value().clone(),
            None => return Ok(None),
        };

        self.all().filter(&keywords).map(Some)
    }
}
