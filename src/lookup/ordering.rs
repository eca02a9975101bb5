use crate::catalog::types::{ModelMeta, Record};

/// Sort key following DIN 5007 (variant 1): case-folded, umlauts collapse onto
/// their base vowel and `ß` expands to `ss`.
pub fn unicode_sorter(input: &str) -> String {
    input
        .to_lowercase()
        .replace('ä', "a")
        .replace('ö', "o")
        .replace('ü', "u")
        .replace('ß', "ss")
}

/// In-place, stable sort of records by their display label.
pub fn sort_results(results: &mut [Record], meta: &ModelMeta) {
    results.sort_by_cached_key(|record| unicode_sorter(&record.label(meta)));
}
