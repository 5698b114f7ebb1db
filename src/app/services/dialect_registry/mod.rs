//! Dialect model and named dialect registry
//!
//! A [`Dialect`] bundles the rules a CSV source is parsed with. Dialects are
//! kept in a [`DialectRegistry`] under a name and configured incrementally
//! through a [`DialectBuilder`] that shares state with its registry entry, so
//! repeated `configure` calls on one name accumulate settings.
//!
//! ## Architecture
//!
//! - [`dialect`] - Dialect rules, built-in presets and validation
//! - [`registry`] - Registry storage, builders and dialect file loading
//!
//! ## Usage
//!
//! ```rust
//! use csvdialect::app::services::dialect_registry::DialectRegistry;
//!
//! let registry = DialectRegistry::new();
//! registry
//!     .configure("pipes")
//!     .delimiter("|")
//!     .trim_characters([' ']);
//!
//! let dialect = registry.resolve("pipes").unwrap();
//! assert_eq!(dialect.delimiter, "|");
//! ```

pub mod dialect;
pub mod registry;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use dialect::{Dialect, LineTerminator};
pub use registry::{DialectBuilder, DialectRegistry};
