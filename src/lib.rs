//! csvdialect Library
//!
//! A dialect-driven CSV reader. Rows are produced by a background worker and
//! handed to the caller either all at once, through a non-blocking polling
//! interface, or as an async stream.
//!
//! This library provides tools for:
//! - Describing CSV dialects (delimiter, quoting, trimming, header, ignored columns)
//! - A process-wide registry of named dialects with `default`, `excel` and `unix` presets
//! - Tokenizing records with multi-character delimiters and doubled-quote escaping
//! - Assembling ordered rows keyed by column name
//! - Streaming rows from a producer thread without blocking the consumer
//!
//! ```no_run
//! use csvdialect::Reader;
//!
//! # fn example() -> csvdialect::Result<()> {
//! let mut reader = Reader::new();
//! reader
//!     .configure_dialect("logs")
//!     .delimiter("::")
//!     .trim_characters([' ', '[', ']']);
//! reader.read("server.log")?;
//!
//! while reader.busy()? {
//!     if reader.ready()? {
//!         let row = reader.next_row()?;
//!         println!("{:?}", row.get("Log Level"));
//!     }
//! }
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;
use std::sync::Arc;

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod csv_parser;
        pub mod dialect_registry;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{Columns, Row};
pub use app::services::csv_parser::{ParseStats, Reader, RowStream};
pub use app::services::dialect_registry::{Dialect, DialectBuilder, DialectRegistry, LineTerminator};
pub use config::ReaderConfig;

/// Result type alias for csvdialect operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for dialect resolution, input access and parsing
///
/// Errors are `Clone` so that a reader which has failed can report the same
/// failure on every later call.
#[derive(thiserror::Error, Debug, Clone)]
pub enum Error {
    /// Input source could not be found
    #[error("Source not found: {}", path.display())]
    SourceNotFound { path: PathBuf },

    /// A quoted field was still open at the end of its record
    #[error("Unterminated quoted field on line {line}")]
    UnterminatedQuote { line: usize },

    /// Dialect rules cannot be resolved
    #[error("Invalid dialect '{name}': {reason}")]
    InvalidDialect { name: String, reason: String },

    /// No dialect registered under the requested name
    #[error("Unknown dialect: {name}")]
    UnknownDialect { name: String },

    /// A record was not valid UTF-8
    #[error("Invalid UTF-8 on line {line}")]
    InvalidEncoding { line: usize },

    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: Arc<std::io::Error>,
    },

    /// `next_row` called while no row was buffered
    #[error("No row is ready; poll busy()/ready() before calling next_row()")]
    NotReady,

    /// Reader configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Dialect definition file could not be loaded
    #[error("Dialect file error in '{}': {message}", path.display())]
    DialectFile { path: PathBuf, message: String },

    /// Producer worker stopped abnormally
    #[error("Parser worker failed: {message}")]
    WorkerFailed { message: String },
}

impl Error {
    /// Create a source not found error
    pub fn source_not_found(path: impl Into<PathBuf>) -> Self {
        Self::SourceNotFound { path: path.into() }
    }

    /// Create an unterminated quote error
    pub fn unterminated_quote(line: usize) -> Self {
        Self::UnterminatedQuote { line }
    }

    /// Create an invalid dialect error
    pub fn invalid_dialect(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidDialect {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create an unknown dialect error
    pub fn unknown_dialect(name: impl Into<String>) -> Self {
        Self::UnknownDialect { name: name.into() }
    }

    /// Create an invalid encoding error
    pub fn invalid_encoding(line: usize) -> Self {
        Self::InvalidEncoding { line }
    }

    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source: Arc::new(source),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a dialect file error
    pub fn dialect_file(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::DialectFile {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a worker failure error
    pub fn worker_failed(message: impl Into<String>) -> Self {
        Self::WorkerFailed {
            message: message.into(),
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::io("I/O operation failed", error)
    }
}
