use super::allowlist::AllowList;
use super::types::FilterQuery;
use crate::catalog::registry::ModelRegistry;
use crate::error::Result;
use crate::lookup::keywords::get_keywords;
use crate::lookup::ordering::sort_results;
use crate::lookup::queryset::get_queryset;
use crate::lookup::serialize::{serialize_results, ChoiceItem};

use std::sync::Arc;

/// Answers chained lookups against the catalog, gated by the allow-list.
pub struct ChainService {
    registry: Arc<ModelRegistry>,
    allowed: AllowList,
}

impl ChainService {
    pub fn new(registry: Arc<ModelRegistry>, allowed: AllowList) -> Self {
        Self { registry, allowed }
    }

    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    pub fn allowed(&self) -> &AllowList {
        &self.allowed
    }

    /// Choices whose `field` matches `value`, via the requested manager if the
    /// model has it.
    ///
    /// Results keep the model's default ordering; models without one are
    /// sorted by display label.
    pub fn filterchain(&self, query: &FilterQuery) -> Result<Vec<ChoiceItem>> {
        self.allowed.validate_model(&query.app, &query.model)?;

        let model = self.registry.get_model(&query.app, &query.model)?;
        let keywords = get_keywords(&query.field, &query.value);
        let queryset = get_queryset(&model, query.manager.as_deref())?;
        let mut results = queryset.filter(&keywords)?.into_records();

        if !model.meta().has_ordering() {
            sort_results(&mut results, model.meta());
        }

        tracing::debug!(
            "filterchain {} {}={} -> {} choices",
            model.key(),
            query.field,
            query.value,
            results.len()
        );

        Ok(serialize_results(&results, model.meta()))
    }

    /// Matching choices, the empty separator, then every non-matching choice.
    /// Both groups are sorted by display label and always use the default
    /// manager.
    pub fn filterchain_all(&self, query: &FilterQuery) -> Result<Vec<ChoiceItem>> {
        self.allowed.validate_model(&query.app, &query.model)?;

        let model = self.registry.get_model(&query.app, &query.model)?;
        let keywords = get_keywords(&query.field, &query.value);
        let queryset = get_queryset(&model, None)?;

        let mut filtered = queryset.filter(&keywords)?.into_records();
        sort_results(&mut filtered, model.meta());

        let mut excluded = queryset.exclude(&keywords)?.into_records();
        sort_results(&mut excluded, model.meta());

        tracing::debug!(
            "filterchain_all {} {}={} -> {} matched, {} excluded",
            model.key(),
            query.field,
            query.value,
            filtered.len(),
            excluded.len()
        );

        let mut choices = serialize_results(&filtered, model.meta());
        choices.push(ChoiceItem::empty());
        choices.extend(serialize_results(&excluded, model.meta()));
        Ok(choices)
    }
}
