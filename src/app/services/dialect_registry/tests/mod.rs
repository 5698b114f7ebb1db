//! Test utilities for dialect registry testing
//!
//! Provides helpers for writing dialect definition files used across the
//! registry test modules.

use std::io::Write;
use tempfile::NamedTempFile;

// Test modules
mod builder_tests;
mod registry_tests;

/// Helper to create a temporary dialect definition file with given content
pub fn create_dialect_file(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, "{}", content).unwrap();
    temp_file
}

/// Dialect definitions covering a log format and a tab separated format
pub fn create_test_dialect_json() -> String {
    r#"{
    "server-log": {
        "delimiter": "::",
        "trim_characters": [" ", "[", "]"]
    },
    "tabs": {
        "delimiter": "\t",
        "header": false,
        "line_terminator": "lf"
    }
}"#
    .to_string()
}
