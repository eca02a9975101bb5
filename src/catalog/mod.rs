//! Model Catalog Module
//!
//! The data layer the chained lookups query against.
//!
//! ## Overview
//! Each model is a named table of records (`app.model`) with optional default
//! ordering and named managers. Querysets are materialised snapshots that
//! support keyword `filter`/`exclude` and multi-key `order_by`.
//!
//! ## Submodules
//! - **`types`**: `ModelKey`, `ModelMeta` and `Record`.
//! - **`query`**: `Keywords` lookups and the `QuerySet` type.
//! - **`model`**: A single model with its records and managers.
//! - **`registry`**: Resolves `app.model` labels to installed models.

pub mod model;
pub mod query;
pub mod registry;
pub mod types;
