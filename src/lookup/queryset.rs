use crate::catalog::model::Model;
use crate::catalog::query::QuerySet;
use crate::error::Result;

/// Picks the base queryset for a lookup.
///
/// A named manager is used when the model defines it; otherwise, or when no
/// manager was requested, the default manager is used.
pub fn get_queryset(model: &Model, manager: Option<&str>) -> Result<QuerySet> {
    if let Some(name) = manager {
        if let Some(queryset) = model.manager(name)? {
            return Ok(queryset);
        }
        tracing::debug!(
            "Manager '{}' not defined on {}, using default",
            name,
            model.key()
        );
    }
    Ok(model.all())
}
