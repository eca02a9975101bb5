use super::service::ChainService;
use super::types::{
    FilterPath, FilterQuery, HealthResponse, ManagedFilterPath, ENDPOINT_FILTER,
    ENDPOINT_FILTER_ALL, ENDPOINT_FILTER_MANAGER, ENDPOINT_HEALTH,
};
use crate::error::ChainError;
use crate::lookup::serialize::ChoiceItem;

use axum::extract::{Extension, Path};
use axum::routing::get;
use axum::{Json, Router};
use std::sync::Arc;

type ChoicesResult = Result<Json<Vec<ChoiceItem>>, ChainError>;

pub async fn handle_filterchain(
    Extension(service): Extension<Arc<ChainService>>,
    Path(path): Path<FilterPath>,
) -> ChoicesResult {
    let query = FilterQuery::from(path);
    query.check_segments()?;
    service.filterchain(&query).map(Json)
}

pub async fn handle_filterchain_with_manager(
    Extension(service): Extension<Arc<ChainService>>,
    Path(path): Path<ManagedFilterPath>,
) -> ChoicesResult {
    let query = FilterQuery::from(path);
    query.check_segments()?;
    service.filterchain(&query).map(Json)
}

pub async fn handle_filterchain_all(
    Extension(service): Extension<Arc<ChainService>>,
    Path(path): Path<FilterPath>,
) -> ChoicesResult {
    let query = FilterQuery::from(path);
    query.check_segments()?;
    service.filterchain_all(&query).map(Json)
}

pub async fn handle_health(
    Extension(service): Extension<Arc<ChainService>>,
) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        models: service.registry().model_count(),
        allowed: service.allowed().len(),
    })
}

/// Builds the HTTP router: lookup routes under `prefix`, health at the root.
pub fn router(service: Arc<ChainService>, prefix: &str) -> Router {
    // Widgets request `.../<value>/`; both forms are served.
    let lookups = Router::new()
        .route(ENDPOINT_FILTER, get(handle_filterchain))
        .route(&with_slash(ENDPOINT_FILTER), get(handle_filterchain))
        .route(ENDPOINT_FILTER_MANAGER, get(handle_filterchain_with_manager))
        .route(
            &with_slash(ENDPOINT_FILTER_MANAGER),
            get(handle_filterchain_with_manager),
        )
        .route(ENDPOINT_FILTER_ALL, get(handle_filterchain_all))
        .route(&with_slash(ENDPOINT_FILTER_ALL), get(handle_filterchain_all));

    let prefix = normalize_prefix(prefix);
    let app = if prefix.is_empty() {
        Router::new().merge(lookups)
    } else {
        Router::new().nest(&prefix, lookups)
    };

    app.route(ENDPOINT_HEALTH, get(handle_health))
        .layer(Extension(service))
}

fn with_slash(endpoint: &str) -> String {
    format!("{}/", endpoint)
}

/// `""`, `"/"` -> `""`; `"chaining/"` -> `"/chaining"`.
pub fn normalize_prefix(prefix: &str) -> String {
    let cleaned = prefix.trim().trim_end_matches('/');
    if cleaned.is_empty() {
        String::new()
    } else if cleaned.starts_with('/') {
        cleaned.to_string()
    } else {
        format!("/{}", cleaned)
    }
}
