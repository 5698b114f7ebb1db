//! Application constants for csvdialect
//!
//! Default values and built-in dialect names used throughout the reader
//! and the command-line front end.

// =============================================================================
// Built-in Dialects
// =============================================================================

/// Dialect used by a `Reader` that was never configured
pub const DEFAULT_DIALECT: &str = "default";

/// Comma separated, CRLF tolerant dialect produced by spreadsheet exports
pub const EXCEL_DIALECT: &str = "excel";

/// Comma separated dialect with LF-only record terminators
pub const UNIX_DIALECT: &str = "unix";

/// All dialect names seeded into every registry
pub const BUILTIN_DIALECTS: &[&str] = &[DEFAULT_DIALECT, EXCEL_DIALECT, UNIX_DIALECT];

/// Dialect name the CLI registers command-line overrides under
pub const CLI_DIALECT: &str = "cli";

// =============================================================================
// Dialect Defaults
// =============================================================================

/// Default field delimiter
pub const DEFAULT_DELIMITER: &str = ",";

/// Default quote character
pub const DEFAULT_QUOTE_CHARACTER: char = '"';

/// UTF-8 byte order mark, stripped from the start of a source
pub const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

// =============================================================================
// Streaming Defaults
// =============================================================================

/// Rows buffered between the producer and the consumer
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1024;

/// Size of the buffered reader wrapped around each source (64 KiB)
pub const DEFAULT_READ_BUFFER_SIZE: usize = 64 * 1024;

/// Thread name given to the producer worker
pub const DEFAULT_WORKER_NAME: &str = "csvdialect-producer";

// =============================================================================
// Logging
// =============================================================================

/// Logging target prefix used when building the default `EnvFilter`
pub const LOG_TARGET: &str = "csvdialect";
