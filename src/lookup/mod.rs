//! Chained Lookup Helpers
//!
//! The small, stateless building blocks the filterchain operations are made of.
//!
//! ## Submodules
//! - **`keywords`**: Turns a `(field, value)` pair into filter keywords.
//! - **`queryset`**: Chooses the base queryset (named or default manager).
//! - **`ordering`**: DIN 5007 sort keys and display-based sorting.
//! - **`serialize`**: Converts records into `{value, display}` choices.

pub mod keywords;
pub mod ordering;
pub mod queryset;
pub mod serialize;
