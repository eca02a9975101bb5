//! Filterchain HTTP Contract
//!
//! Route templates and the request/response types the handlers exchange.

use crate::error::{ChainError, Result};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

// --- API Endpoints ---

/// Filtered choices through the default manager.
pub const ENDPOINT_FILTER: &str = "/filter/:app/:model/:field/:value";
/// Filtered choices through a named manager: `/filter/app/model/manager/field/value`.
///
/// Parameter names line up with `ENDPOINT_FILTER` position by position so the
/// two templates share one route tree; `ManagedFilterPath` maps them back.
pub const ENDPOINT_FILTER_MANAGER: &str = "/filter/:app/:model/:field/:value/:chained_value";
/// Filtered choices, a separator, then every non-matching choice.
pub const ENDPOINT_FILTER_ALL: &str = "/all/:app/:model/:field/:value";
/// Liveness and catalog size. Mounted at the root, outside the prefix.
pub const ENDPOINT_HEALTH: &str = "/health";

/// Default mount point of the lookup routes.
pub const DEFAULT_PREFIX: &str = "/chaining";

static SEGMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\w\-]+$").expect("valid segment regex"));

// --- Data Transfer Objects ---

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterPath {
    pub app: String,
    pub model: String,
    pub field: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManagedFilterPath {
    pub app: String,
    pub model: String,
    #[serde(rename = "field")]
    pub manager: String,
    #[serde(rename = "value")]
    pub field: String,
    #[serde(rename = "chained_value")]
    pub value: String,
}

/// A single chained lookup, independent of the route it arrived on.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterQuery {
    pub app: String,
    pub model: String,
    pub field: String,
    pub value: String,
    pub manager: Option<String>,
}

impl FilterQuery {
    pub fn new(app: &str, model: &str, field: &str, value: &str) -> Self {
        Self {
            app: app.to_string(),
            model: model.to_string(),
            field: field.to_string(),
            value: value.to_string(),
            manager: None,
        }
    }

    pub fn with_manager(mut self, manager: &str) -> Self {
        self.manager = Some(manager.to_string());
        self
    }

    /// Rejects any segment outside `[\w-]+`, mirroring the route patterns of
    /// the lookup URLs.
    pub fn check_segments(&self) -> Result<()> {
        let segments = [
            Some(&self.app),
            Some(&self.model),
            Some(&self.field),
            Some(&self.value),
            self.manager.as_ref(),
        ];

        for segment in segments.into_iter().flatten() {
            if !SEGMENT.is_match(segment) {
                return Err(ChainError::InvalidSegment {
                    segment: segment.clone(),
                });
            }
        }
        Ok(())
    }
}

impl From<FilterPath> for FilterQuery {
    fn from(path: FilterPath) -> Self {
        Self {
            app: path.app,
            model: path.model,
            field: path.field,
            value: path.value,
            manager: None,
        }
    }
}

impl From<ManagedFilterPath> for FilterQuery {
    fn from(path: ManagedFilterPath) -> Self {
        Self {
            app: path.app,
            model: path.model,
            field: path.field,
            value: path.value,
            manager: Some(path.manager),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    /// Installed models.
    pub models: usize,
    /// Allow-listed labels.
    pub allowed: usize,
}
