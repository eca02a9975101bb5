use super::types::{ModelFixture, Settings};
use crate::catalog::model::Model;
use crate::catalog::query::{KeywordValue, Keywords};
use crate::catalog::registry::ModelRegistry;
use crate::catalog::types::ModelKey;

use anyhow::{anyhow, bail, Context, Result};
use std::collections::{BTreeMap, HashSet};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tokio::fs;

pub const DEFAULT_CONFIG_FILE: &str = "chained-select.toml";

pub const ENV_BIND: &str = "CHAINED_SELECT_BIND";
pub const ENV_PREFIX: &str = "CHAINED_SELECT_PREFIX";
pub const ENV_ALLOWED_MODELS: &str = "CHAINED_SELECT_ALLOWED_MODELS";

/// Reads settings from `path`, then applies environment overrides.
///
/// A missing file yields the defaults: no models and nothing allow-listed.
pub async fn load_settings(path: &Path) -> Result<Settings> {
    let mut settings = if path.exists() {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        parse_settings(&content)
            .with_context(|| format!("Invalid settings in {}", path.display()))?
    } else {
        tracing::info!("No settings file at {}, using defaults", path.display());
        Settings::default()
    };

    settings.merge_env_vars()?;
    Ok(settings)
}

pub fn parse_settings(content: &str) -> Result<Settings> {
    Ok(toml::from_str(content)?)
}

impl Settings {
    pub fn merge_env_vars(&mut self) -> Result<()> {
        self.merge_env_from(|key| std::env::var(key).ok())
    }

    /// Applies overrides from `lookup`. The allow-list override replaces the
    /// configured list rather than extending it.
    pub fn merge_env_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(bind) = lookup(ENV_BIND) {
            self.server.bind = bind
                .trim()
                .parse::<SocketAddr>()
                .with_context(|| format!("{} is not a socket address: {}", ENV_BIND, bind))?;
        }

        if let Some(prefix) = lookup(ENV_PREFIX) {
            self.server.prefix = prefix;
        }

        if let Some(models) = lookup(ENV_ALLOWED_MODELS) {
            self.allowed_models = models
                .split(',')
                .map(|label| label.trim().to_string())
                .filter(|label| !label.is_empty())
                .collect();
        }

        Ok(())
    }
}

/// Installs every configured model, its managers and records.
pub fn build_registry(settings: &Settings) -> Result<Arc<ModelRegistry>> {
    let registry = ModelRegistry::new();

    for fixture in &settings.models {
        let label = fixture.meta().key().label();
        if registry.has_model(&fixture.app, &fixture.name) {
            bail!("Model {} is declared more than once", label);
        }

        let model = build_model(fixture).with_context(|| format!("Invalid model {}", label))?;
        registry.register(model);
    }

    for label in settings.allow_list().labels() {
        let installed = label
            .parse::<ModelKey>()
            .map(|key| registry.has_model(&key.app, &key.model))
            .unwrap_or(false);
        if !installed {
            tracing::warn!("Allow-listed model {} is not installed", label);
        }
    }

    Ok(registry)
}

fn build_model(fixture: &ModelFixture) -> Result<Model> {
    let meta = fixture.meta();

    for field in &meta.ordering {
        let name = field.trim_start_matches('-');
        let head = name.split("__").next().unwrap_or(name);
        if !meta.is_known_field(head) {
            bail!("Ordering refers to unknown field '{}'", name);
        }
    }

    let model = Model::new(meta);

    for (name, raw) in &fixture.managers {
        let keywords = manager_keywords(raw).with_context(|| format!("Manager '{}'", name))?;
        model
            .add_manager(name, keywords)
            .with_context(|| format!("Manager '{}'", name))?;
    }

    let mut seen = HashSet::new();
    for record in &fixture.records {
        let pk = record.pk_text();
        if !seen.insert(pk.clone()) {
            bail!("Duplicate primary key {}", pk);
        }

        for field in record.fields.keys() {
            if !model.meta().is_known_field(field) {
                tracing::warn!(
                    "Record {} of {} sets undeclared field '{}'",
                    pk,
                    model.key(),
                    field
                );
            }
        }

        model.insert(record.clone());
    }

    tracing::debug!("Loaded {} records into {}", model.len(), model.key());
    Ok(model)
}

fn manager_keywords(raw: &BTreeMap<String, toml::Value>) -> Result<Keywords> {
    let mut keywords = Keywords::new();
    for (key, value) in raw {
        let value = match value {
            toml::Value::String(s) => KeywordValue::Text(s.clone()),
            toml::Value::Boolean(b) => KeywordValue::Flag(*b),
            toml::Value::Integer(i) => KeywordValue::Text(i.to_string()),
            toml::Value::Float(f) => KeywordValue::Text(f.to_string()),
            other => return Err(anyhow!("Unsupported value for '{}': {}", key, other)),
        };
        keywords.insert(key, value);
    }
    Ok(keywords)
}
