//! Keyword Filtering and Querysets
//!
//! A `QuerySet` is a materialised, ordered list of records from one model.
//! `filter` and `exclude` take a `Keywords` mapping in the familiar
//! `field[__sub][__lookup] = value` form and return a new queryset, leaving
//! the receiver untouched so it can be reused for the complement.
//!
//! Supported lookups are `exact` (default), `iexact` and `isnull`.

use super::types::{compare_values, value_text, ModelMeta, Record};
use crate::error::{ChainError, Result};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;

const LOOKUP_SEPARATOR: &str = "__";

/// Right-hand side of a keyword.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KeywordValue {
    Flag(bool),
    Text(String),
}

impl KeywordValue {
    fn as_flag(&self) -> Option<bool> {
        match self {
            KeywordValue::Flag(b) => Some(*b),
            KeywordValue::Text(t) => parse_flag(t),
        }
    }

    fn as_text(&self) -> String {
        match self {
            KeywordValue::Flag(b) => b.to_string(),
            KeywordValue::Text(t) => t.clone(),
        }
    }
}

impl From<&str> for KeywordValue {
    fn from(value: &str) -> Self {
        KeywordValue::Text(value.to_string())
    }
}

impl From<bool> for KeywordValue {
    fn from(value: bool) -> Self {
        KeywordValue::Flag(value)
    }
}

/// Filter keywords. All entries must match for a record to be selected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Keywords(BTreeMap<String, KeywordValue>);

impl Keywords {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: &str, value: impl Into<KeywordValue>) {
        self.0.insert(key.to_string(), value.into());
    }

    pub fn with(mut self, key: &str, value: impl Into<KeywordValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&KeywordValue> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &KeywordValue)> {
        self.0.iter()
    }

    /// Checks every keyword resolves against `meta` and uses a supported lookup.
    pub fn validate(&self, meta: &ModelMeta) -> Result<()> {
        self.conditions(meta).map(|_| ())
    }

    fn conditions<'a>(&'a self, meta: &ModelMeta) -> Result<Vec<Condition<'a>>> {
        self.0
            .iter()
            .map(|(key, value)| Condition::parse(key, value, meta))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Lookup {
    Exact,
    IExact,
    IsNull(bool),
}

#[derive(Debug)]
struct Condition<'a> {
    path: Vec<&'a str>,
    lookup: Lookup,
    value: &'a KeywordValue,
}

impl<'a> Condition<'a> {
    fn parse(key: &'a str, value: &'a KeywordValue, meta: &ModelMeta) -> Result<Self> {
        let field_error = || ChainError::FieldError {
            label: meta.key().label(),
            keyword: key.to_string(),
        };

        let mut path: Vec<&str> = key.split(LOOKUP_SEPARATOR).collect();
        if path.iter().any(|segment| segment.is_empty()) {
            return Err(field_error());
        }

        let lookup = match path.last().copied() {
            Some("exact") if path.len() > 1 => {
                path.pop();
                Lookup::Exact
            }
            Some("iexact") if path.len() > 1 => {
                path.pop();
                Lookup::IExact
            }
            Some("isnull") if path.len() > 1 => {
                path.pop();
                Lookup::IsNull(value.as_flag().ok_or_else(field_error)?)
            }
            _ => Lookup::Exact,
        };

        match path.first() {
            Some(head) if meta.is_known_field(head) => Ok(Condition {
                path,
                lookup,
                value,
            }),
            _ => Err(field_error()),
        }
    }

    fn matches(&self, record: &Record, meta: &ModelMeta) -> bool {
        let stored = record.resolve(meta, &self.path);
        match self.lookup {
            Lookup::IsNull(expect_null) => {
                let is_null = matches!(stored, None | Some(Value::Null));
                is_null == expect_null
            }
            Lookup::Exact => matches_text(stored.as_ref(), &self.value.as_text(), false),
            Lookup::IExact => matches_text(stored.as_ref(), &self.value.as_text(), true),
        }
    }
}

fn parse_flag(text: &str) -> Option<bool> {
    match text {
        "true" | "True" | "1" => Some(true),
        "false" | "False" | "0" => Some(false),
        _ => None,
    }
}

fn matches_text(stored: Option<&Value>, text: &str, case_insensitive: bool) -> bool {
    match stored {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => {
            if case_insensitive {
                s.to_lowercase() == text.to_lowercase()
            } else {
                s == text
            }
        }
        Some(Value::Number(n)) => {
            if n.to_string() == text {
                return true;
            }
            let text = text.trim();
            // Integers compare exactly; f64 loses precision above 2^53.
            if let Some(stored) = n.as_i64() {
                text.parse::<i64>().map_or(false, |v| v == stored)
            } else if let Some(stored) = n.as_u64() {
                text.parse::<u64>().map_or(false, |v| v == stored)
            } else {
                match (n.as_f64(), text.parse::<f64>()) {
                    (Some(a), Ok(b)) => a == b,
                    _ => false,
                }
            }
        }
        Some(Value::Bool(b)) => parse_flag(text) == Some(*b),
        // Related rows are stored inline; compare through their key.
        Some(Value::Object(map)) => map
            .get("id")
            .or_else(|| map.get("pk"))
            .map(|key| matches_text(Some(key), text, case_insensitive))
            .unwrap_or(false),
        Some(Value::Array(_)) => false,
    }
}

/// An ordered snapshot of records from a single model.
#[derive(Debug, Clone)]
pub struct QuerySet {
    meta: Arc<ModelMeta>,
    records: Vec<Record>,
}

impl QuerySet {
    pub fn new(meta: Arc<ModelMeta>, records: Vec<Record>) -> Self {
        Self { meta, records }
    }

    pub fn meta(&self) -> &ModelMeta {
        &self.meta
    }

    /// Records matching every keyword.
    pub fn filter(&self, keywords: &Keywords) -> Result<QuerySet> {
        self.select(keywords, true)
    }

    /// Records for which `filter` with the same keywords would not match.
    pub fn exclude(&self, keywords: &Keywords) -> Result<QuerySet> {
        self.select(keywords, false)
    }

    fn select(&self, keywords: &Keywords, keep_matches: bool) -> Result<QuerySet> {
        let conditions = keywords.conditions(&self.meta)?;
        let records = self
            .records
            .iter()
            .filter(|record| {
                let matched = conditions.iter().all(|c| c.matches(record, &self.meta));
                matched == keep_matches
            })
            .cloned()
            .collect();

        Ok(QuerySet::new(self.meta.clone(), records))
    }

    /// Stable multi-key sort. A `-` prefix sorts descending; nulls sort first.
    pub fn order_by(mut self, ordering: &[String]) -> QuerySet {
        if ordering.is_empty() {
            return self;
        }

        let keys: Vec<(Vec<&str>, bool)> = ordering
            .iter()
            .map(|field| match field.strip_prefix('-') {
                Some(name) => (name.split(LOOKUP_SEPARATOR).collect(), true),
                None => (field.split(LOOKUP_SEPARATOR).collect(), false),
            })
            .collect();

        let meta = self.meta.clone();
        self.records.sort_by(|a, b| {
            for (path, descending) in &keys {
                let left = a.resolve(&meta, path).unwrap_or(Value::Null);
                let right = b.resolve(&meta, path).unwrap_or(Value::Null);
                let ord = compare_values(&left, &right);
                let ord = if *descending { ord.reverse() } else { ord };
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            Ordering::Equal
        });
        self
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Primary keys in queryset order, as text.
    pub fn pks(&self) -> Vec<String> {
        self.records.iter().map(|r| value_text(&r.pk)).collect()
    }
}
