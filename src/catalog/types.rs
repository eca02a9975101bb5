use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Identifies a model as `app.model`.
///
/// Labels are compared case-insensitively, so the key is always stored
/// lower-cased.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ModelKey {
    pub app: String,
    pub model: String,
}

impl ModelKey {
    pub fn new(app: &str, model: &str) -> Self {
        Self {
            app: app.to_lowercase(),
            model: model.to_lowercase(),
        }
    }

    /// The `app.model` label used by the allow-list and the registry.
    pub fn label(&self) -> String {
        format!("{}.{}", self.app, self.model)
    }
}

impl fmt::Display for ModelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.app, self.model)
    }
}

impl FromStr for ModelKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().split_once('.') {
            Some((app, model)) if !app.is_empty() && !model.is_empty() => {
                Ok(ModelKey::new(app, model))
            }
            _ => Err(format!("Expected 'app.model', got '{}'", s)),
        }
    }
}

/// Static description of a model: where it lives, what it declares and how
/// its default queryset is ordered.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelMeta {
    pub app_label: String,
    pub model_name: String,
    /// Name of the primary key attribute. `pk` is always accepted as an alias.
    #[serde(default = "default_pk_name")]
    pub pk_name: String,
    #[serde(default)]
    pub fields: Vec<String>,
    /// Default ordering. A leading `-` sorts that field descending.
    #[serde(default)]
    pub ordering: Vec<String>,
    /// Class-style name used in fallback labels, e.g. `CityDistrict`.
    #[serde(default)]
    pub object_name: Option<String>,
}

fn default_pk_name() -> String {
    "id".to_string()
}

impl ModelMeta {
    pub fn new(app_label: &str, model_name: &str) -> Self {
        Self {
            app_label: app_label.to_string(),
            model_name: model_name.to_string(),
            pk_name: default_pk_name(),
            fields: Vec::new(),
            ordering: Vec::new(),
            object_name: None,
        }
    }

    pub fn with_fields(mut self, fields: &[&str]) -> Self {
        self.fields = fields.iter().map(|f| f.to_string()).collect();
        self
    }

    pub fn with_ordering(mut self, ordering: &[&str]) -> Self {
        self.ordering = ordering.iter().map(|f| f.to_string()).collect();
        self
    }

    pub fn with_object_name(mut self, object_name: &str) -> Self {
        self.object_name = Some(object_name.to_string());
        self
    }

    /// `object_name` if set, otherwise the capitalized model name.
    pub fn display_name(&self) -> String {
        match &self.object_name {
            Some(name) => name.clone(),
            None => capitalize(&self.model_name),
        }
    }

    pub fn key(&self) -> ModelKey {
        ModelKey::new(&self.app_label, &self.model_name)
    }

    pub fn has_ordering(&self) -> bool {
        !self.ordering.is_empty()
    }

    /// True for `pk`, the primary key name, or any declared field.
    pub fn is_known_field(&self, name: &str) -> bool {
        name == "pk" || name == self.pk_name || self.fields.iter().any(|f| f == name)
    }
}

/// A single row of a model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Record {
    pub pk: Value,
    /// Human readable label. Falls back to `"<Model> object (<pk>)"` when absent.
    #[serde(default)]
    pub display: Option<String>,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl Record {
    pub fn new(pk: impl Into<Value>, display: &str) -> Self {
        Self {
            pk: pk.into(),
            display: Some(display.to_string()),
            fields: Map::new(),
        }
    }

    pub fn with_field(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(name.to_string(), value.into());
        self
    }

    /// Primary key rendered as text, used as the storage key.
    pub fn pk_text(&self) -> String {
        value_text(&self.pk)
    }

    pub fn label(&self, meta: &ModelMeta) -> String {
        match &self.display {
            Some(display) => display.clone(),
            None => format!("{} object ({})", meta.display_name(), self.pk_text()),
        }
    }

    /// Resolves a `__`-separated path. The first segment may name the primary
    /// key; later segments walk into nested objects.
    pub fn resolve(&self, meta: &ModelMeta, path: &[&str]) -> Option<Value> {
        let (head, rest) = path.split_first()?;
        let mut current = if *head == "pk" || *head == meta.pk_name {
            self.pk.clone()
        } else {
            self.fields.get(*head)?.clone()
        };

        for segment in rest {
            current = match current {
                Value::Object(mut map) => map.remove(*segment)?,
                _ => return None,
            };
        }

        Some(current)
    }
}

/// Text form of a scalar JSON value, without the quotes `to_string` adds.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Total order over JSON scalars: null < bool < number < string. Compound
/// values compare by their text form.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    fn rank(v: &Value) -> u8 {
        match v {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Number(_) => 2,
            Value::String(_) => 3,
            Value::Array(_) | Value::Object(_) => 4,
        }
    }

    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => match (x.as_i64(), y.as_i64()) {
            (Some(x), Some(y)) => x.cmp(&y),
            _ => match (x.as_u64(), y.as_u64()) {
                (Some(x), Some(y)) => x.cmp(&y),
                _ => {
                    let x = x.as_f64().unwrap_or(f64::NAN);
                    let y = y.as_f64().unwrap_or(f64::NAN);
                    x.partial_cmp(&y).unwrap_or(Ordering::Equal)
                }
            },
        },
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Null, Value::Null) => Ordering::Equal,
        _ => match rank(a).cmp(&rank(b)) {
            Ordering::Equal => a.to_string().cmp(&b.to_string()),
            other => other,
        },
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
