//! Chained Select Lookup Service Library
//!
//! Serves the choices of dependent ("chained") form fields as JSON: given the
//! value selected in a parent field, it returns the records of an allow-listed
//! model whose chained field matches, as `{value, display}` pairs.
//!
//! ## Modules
//! - **`catalog`**: The in-memory data layer. Models, records, named managers
//!   and querysets with keyword filtering and default ordering.
//! - **`lookup`**: Stateless helpers: keyword construction, DIN 5007 display
//!   sorting, choice serialization and queryset selection.
//! - **`filterchain`**: The allow-list, the two lookup operations and their
//!   Axum handlers.
//! - **`config`**: TOML settings with environment overrides, and catalog
//!   construction from the declared fixtures.
//! - **`error`**: `ChainError` and its HTTP mapping.

pub mod catalog;
pub mod config;
pub mod error;
pub mod filterchain;
pub mod lookup;
