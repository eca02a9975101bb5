use crate::catalog::types::{ModelMeta, Record};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Label of the blank choice that separates matches from non-matches.
pub const EMPTY_CHOICE_LABEL: &str = "---------";

/// One option of a dependent select box.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChoiceItem {
    /// Primary key of the record, kept as its JSON type.
    pub value: Value,
    pub display: String,
}

impl ChoiceItem {
    /// The `{"value": "", "display": "---------"}` separator.
    pub fn empty() -> Self {
        Self {
            value: Value::String(String::new()),
            display: EMPTY_CHOICE_LABEL.to_string(),
        }
    }

    pub fn is_empty_choice(&self) -> bool {
        self.value == Value::String(String::new()) && self.display == EMPTY_CHOICE_LABEL
    }
}

pub fn serialize_results(results: &[Record], meta: &ModelMeta) -> Vec<ChoiceItem> {
    results
        .iter()
        .map(|record| ChoiceItem {
            value: record.pk.clone(),
            display: record.label(meta),
        })
        .collect()
}
