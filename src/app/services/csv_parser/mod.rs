//! Dialect-driven CSV parser
//!
//! This module turns a byte source into ordered rows under a resolved
//! [`Dialect`](crate::Dialect), with a background producer feeding a bounded
//! handoff channel.
//!
//! ## Architecture
//!
//! The parser is organized into logical components:
//! - [`record_source`] - Source opening and logical record extraction
//! - [`tokenizer`] - Field splitting state machine
//! - [`column_mapping`] - Header analysis, ignored columns and row assembly
//! - [`engine`] - Producer worker and consumer-side channel state
//! - [`reader`] - The `Reader` session with bulk and polling accessors
//! - [`stream`] - Async `Stream` of rows
//! - [`stats`] - Parsing statistics
//!
//! ## Usage
//!
//! ```rust
//! use csvdialect::{DialectRegistry, Reader};
//!
//! # fn example() -> csvdialect::Result<()> {
//! let mut reader = Reader::with_registry(DialectRegistry::new());
//! reader.read_str("a,b,c\n1,2,3\n4,5,6\n")?;
//!
//! let rows = reader.rows()?;
//! assert_eq!(rows.len(), 2);
//! assert_eq!(rows[1].get("c"), Some("6"));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod column_mapping;
pub mod engine;
pub mod reader;
pub mod record_source;
pub mod stats;
pub mod stream;
pub mod tokenizer;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use column_mapping::{ColumnMapping, RecordShape, RowAssembler};
pub use engine::EngineState;
pub use reader::Reader;
pub use record_source::{Record, RecordReader};
pub use stats::ParseStats;
pub use stream::RowStream;
pub use tokenizer::{FieldMode, Tokenizer};
