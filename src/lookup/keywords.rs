use crate::catalog::query::Keywords;

/// Parent value that stands for "no selection": it selects rows whose chained
/// field is empty.
pub const NULL_SENTINEL: &str = "0";

/// Builds the filter keywords for a chained field and the parent's value.
///
/// `"0"` becomes `{field}__isnull = true`; anything else is an exact match.
pub fn get_keywords(field: &str, value: &str) -> Keywords {
    let mut keywords = Keywords::new();
    if value == NULL_SENTINEL {
        keywords.insert(&format!("{}__isnull", field), true);
    } else {
        keywords.insert(field, value);
    }
    keywords
}
