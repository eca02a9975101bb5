use crate::catalog::types::ModelKey;
use crate::error::{ChainError, Result};

use std::collections::HashSet;

/// The set of `app.model` labels that may be queried. Fixed at startup.
#[derive(Debug, Clone, Default)]
pub struct AllowList {
    labels: HashSet<String>,
}

impl AllowList {
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            labels: labels
                .into_iter()
                .map(|label| label.as_ref().trim().to_lowercase())
                .filter(|label| !label.is_empty())
                .collect(),
        }
    }

    pub fn is_allowed(&self, app: &str, model: &str) -> bool {
        self.labels.contains(&ModelKey::new(app, model).label())
    }

    /// Fails with `PermissionDenied` unless `app.model` is listed.
    pub fn validate_model(&self, app: &str, model: &str) -> Result<()> {
        if self.is_allowed(app, model) {
            Ok(())
        } else {
            tracing::warn!("Denied chained lookup on {}.{}", app, model);
            Err(ChainError::PermissionDenied)
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels(&self) -> Vec<String> {
        let mut labels: Vec<String> = self.labels.iter().cloned().collect();
        labels.sort();
        labels
    }
}
