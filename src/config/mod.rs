//! Settings Module
//!
//! Loads the service configuration from a TOML file with environment
//! overrides, and builds the model catalog from the fixtures it declares.
//!
//! - **`types`**: The `Settings` schema.
//! - **`loader`**: File loading, env overrides and registry construction.

pub mod loader;
pub mod types;

#[cfg(test)]
mod tests;
