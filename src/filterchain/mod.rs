//! Filterchain Module
//!
//! Serves the choices of a dependent ("chained") select box given the value
//! picked in its parent.
//!
//! ## Request Flow
//! 1. **Allow-list**: `app.model` must be configured as queryable, otherwise
//!    the request is denied before the catalog is touched.
//! 2. **Resolve**: The model is looked up in the `ModelRegistry`.
//! 3. **Filter**: `(field, value)` becomes keywords and runs against the
//!    default or a named manager.
//! 4. **Order**: Models without default ordering are sorted by display label.
//! 5. **Respond**: Records become `{value, display}` JSON choices.
//!
//! ## Submodules
//! - **`allowlist`**: The set of queryable models.
//! - **`service`**: `filterchain` and `filterchain_all`.
//! - **`handlers`**: Axum handlers and the router.
//! - **`types`**: Route templates and DTOs.

pub mod allowlist;
pub mod handlers;
pub mod service;
pub mod types;
