use crate::catalog::types::{ModelMeta, Record};
use crate::filterchain::allowlist::AllowList;
use crate::filterchain::types::DEFAULT_PREFIX;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::net::SocketAddr;

/// Top-level settings file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// `app.model` labels that may be queried.
    pub allowed_models: Vec<String>,
    pub server: ServerSettings,
    pub models: Vec<ModelFixture>,
}

impl Settings {
    pub fn allow_list(&self) -> AllowList {
        AllowList::new(&self.allowed_models)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerSettings {
    pub bind: SocketAddr,
    /// Mount point of the lookup routes.
    pub prefix: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 8000)),
            prefix: DEFAULT_PREFIX.to_string(),
        }
    }
}

/// A model declared in the settings file, together with its rows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelFixture {
    pub app: String,
    pub name: String,
    #[serde(default = "default_pk_name")]
    pub pk_name: String,
    #[serde(default)]
    pub fields: Vec<String>,
    #[serde(default)]
    pub ordering: Vec<String>,
    /// Name shown in fallback record labels; defaults to the capitalized `name`.
    #[serde(default)]
    pub object_name: Option<String>,
    /// Manager name -> keyword -> value.
    #[serde(default)]
    pub managers: BTreeMap<String, BTreeMap<String, toml::Value>>,
    #[serde(default)]
    pub records: Vec<Record>,
}

fn default_pk_name() -> String {
    "id".to_string()
}

impl ModelFixture {
    pub fn meta(&self) -> ModelMeta {
        ModelMeta {
            app_label: self.app.clone(),
            model_name: self.name.clone(),
            pk_name: self.pk_name.clone(),
            fields: self.fields.clone(),
            ordering: self.ordering.clone(),
            object_name: self.object_name.clone(),
        }
    }
}
