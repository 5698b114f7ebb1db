//! Test utilities for CSV parser testing
//!
//! Provides sample inputs, temporary file helpers and reader constructors
//! used across the parser test modules. Every reader built here uses a
//! private registry so dialects configured by one test never leak into
//! another.

use std::io::Write;
use tempfile::NamedTempFile;

use crate::app::models::Row;
use crate::app::services::csv_parser::Reader;
use crate::app::services::dialect_registry::{Dialect, DialectRegistry};
use crate::config::ReaderConfig;

mod tokenizer_tests;

/// Simple three column input with two data rows
pub const BASIC_CSV: &str = "a,b,c\n1,2,3\n4,5,6\n";

/// Log lines with a bracketed, `::` separated layout
pub const BRACKETED_LOG: &str = "[Timestamp] :: [Thread ID] :: [Log Level] :: [Log Message]
[1555164718] :: [04] :: [INFO] :: [Hello World]
[1555463132] :: [02] :: [DEBUG] :: [Warning! Foo has happened]
";

/// Helper to create a temporary CSV file with given content
pub fn create_temp_csv(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, "{}", content).unwrap();
    temp_file.flush().unwrap();
    temp_file
}

/// Reader over a fresh registry
pub fn isolated_reader() -> Reader {
    Reader::with_registry(DialectRegistry::new())
}

/// Reader with an owned dialect and a tiny handoff buffer
pub fn tight_reader(dialect: Dialect) -> Reader {
    isolated_reader()
        .with_dialect(dialect)
        .with_config(ReaderConfig::default().with_channel_capacity(1))
}

/// Parse `content` with `dialect` and return every row
pub fn parse_with(dialect: Dialect, content: &str) -> Vec<Row> {
    let mut reader = isolated_reader().with_dialect(dialect);
    reader.read_str(content).unwrap();
    reader.into_rows().unwrap()
}

/// Drain a reader through the non-blocking polling interface
pub fn poll_all(reader: &mut Reader) -> crate::Result<Vec<Row>> {
    let mut rows = Vec::new();
    while reader.busy()? {
        if reader.ready()? {
            rows.push(reader.next_row()?);
        } else {
            std::thread::yield_now();
        }
    }
    Ok(rows)
}

/// Render rows as `(column, value)` pairs for compact assertions
pub fn pairs(row: &Row) -> Vec<(String, String)> {
    row.iter()
        .map(|(column, value)| (column.to_string(), value.to_string()))
        .collect()
}
