//! Error types for chained lookups
//!
//! Every failure a lookup request can hit is a `ChainError`. Handlers return it
//! directly and axum turns it into a JSON error body via `IntoResponse`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ChainError {
    /// The requested `app.model` is not on the allow-list.
    #[error("Query activity not allowed")]
    PermissionDenied,

    /// The model is allow-listed but was never registered in the catalog.
    #[error("Model '{label}' is not installed")]
    ModelNotFound { label: String },

    /// A keyword referenced a field the model does not declare, or used an
    /// unsupported lookup.
    #[error("Cannot resolve keyword '{keyword}' on model '{label}'")]
    FieldError { label: String, keyword: String },

    /// A path segment outside `[\w-]+`; treated as an unmatched route.
    #[error("No chained lookup matches segment '{segment}'")]
    InvalidSegment { segment: String },
}

impl ChainError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ChainError::PermissionDenied => StatusCode::FORBIDDEN,
            ChainError::ModelNotFound { .. } => StatusCode::NOT_FOUND,
            ChainError::FieldError { .. } => StatusCode::BAD_REQUEST,
            ChainError::InvalidSegment { .. } => StatusCode::NOT_FOUND,
        }
    }
}

/// Body returned alongside any non-2xx status.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for ChainError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

pub type Result<T> = std::result::Result<T, ChainError>;
