//! Tests for dialect registration, lookup and resolution

use super::*;
use crate::Error;
use crate::app::services::dialect_registry::{Dialect, DialectRegistry, LineTerminator};

#[test]
fn test_new_registry_has_builtins() {
    let registry = DialectRegistry::new();
    assert_eq!(registry.names(), vec!["default", "excel", "unix"]);

    let unix = registry.resolve("unix").unwrap();
    assert_eq!(unix.line_terminator, LineTerminator::Lf);
    let excel = registry.resolve("excel").unwrap();
    assert_eq!(excel.line_terminator, LineTerminator::CrLf);
}

#[test]
fn test_global_registry_is_shared() {
    let first = DialectRegistry::global();
    let second = DialectRegistry::global();
    first
        .configure("registry_tests::global")
        .delimiter(";");
    assert_eq!(second.get("registry_tests::global").unwrap().delimiter, ";");
    assert!(second.contains("default"));
}

#[test]
fn test_private_registries_are_isolated() {
    let left = DialectRegistry::new();
    let right = DialectRegistry::new();
    left.configure("only-left").delimiter("|");

    assert!(left.contains("only-left"));
    assert!(!right.contains("only-left"));
}

#[test]
fn test_cloned_registry_shares_storage() {
    let registry = DialectRegistry::new();
    let handle = registry.clone();
    handle.configure("shared").header(false);
    assert!(!registry.get("shared").unwrap().header);
}

#[test]
fn test_unknown_dialect() {
    let registry = DialectRegistry::new();
    match registry.resolve("nope") {
        Err(Error::UnknownDialect { name }) => assert_eq!(name, "nope"),
        other => panic!("Expected UnknownDialect, got {:?}", other),
    }
    assert!(registry.get("nope").is_none());
}

#[test]
fn test_resolve_validates_empty_delimiter() {
    let registry = DialectRegistry::new();
    registry.configure("empty").delimiter("");
    assert!(matches!(
        registry.resolve("empty"),
        Err(Error::InvalidDialect { .. })
    ));
    // Unvalidated snapshots are still available
    assert_eq!(registry.get("empty").unwrap().delimiter, "");
}

#[test]
fn test_register_replaces_entry() {
    let registry = DialectRegistry::new();
    registry.configure("replace").delimiter("::");
    registry.register(
        "replace",
        Dialect {
            delimiter: ";".to_string(),
            ..Dialect::default()
        },
    );
    assert_eq!(registry.resolve("replace").unwrap().delimiter, ";");
}

#[test]
fn test_register_keeps_existing_builders_connected() {
    let registry = DialectRegistry::new();
    let builder = registry.configure("shared");
    registry.register("shared", Dialect::default());

    builder.clone().delimiter(";");
    assert_eq!(registry.resolve("shared").unwrap().delimiter, ";");

    registry.register(
        "shared",
        Dialect {
            delimiter: "|".to_string(),
            ..Dialect::default()
        },
    );
    assert_eq!(builder.snapshot().delimiter, "|");
}

#[test]
fn test_load_json_overwrites_in_place() {
    let registry = DialectRegistry::new();
    let builder = registry.configure("server-log").delimiter(";");
    let file = create_dialect_file(&create_test_dialect_json());

    registry.load_json(file.path()).unwrap();
    assert_eq!(builder.snapshot().delimiter, "::");

    builder.delimiter("|");
    assert_eq!(registry.resolve("server-log").unwrap().delimiter, "|");
}

#[test]
fn test_resolve_returns_snapshot() {
    let registry = DialectRegistry::new();
    let builder = registry.configure("snap").delimiter("|");
    let resolved = registry.resolve("snap").unwrap();

    builder.delimiter(";");
    assert_eq!(resolved.delimiter, "|");
    assert_eq!(registry.resolve("snap").unwrap().delimiter, ";");
}

#[test]
fn test_load_json_dialects() {
    let registry = DialectRegistry::new();
    let file = create_dialect_file(&create_test_dialect_json());

    let loaded = registry.load_json(file.path()).unwrap();
    assert_eq!(loaded, 2);

    let log = registry.resolve("server-log").unwrap();
    assert_eq!(log.delimiter, "::");
    assert!(log.is_trim_character('['));
    assert!(log.header);

    let tabs = registry.resolve("tabs").unwrap();
    assert_eq!(tabs.delimiter, "\t");
    assert!(!tabs.header);
    assert_eq!(tabs.line_terminator, LineTerminator::Lf);
}

#[test]
fn test_load_json_rejects_malformed_file() {
    let registry = DialectRegistry::new();
    let file = create_dialect_file("{ not json");
    assert!(matches!(
        registry.load_json(file.path()),
        Err(Error::DialectFile { .. })
    ));
}

#[test]
fn test_load_json_rejects_invalid_dialect() {
    let registry = DialectRegistry::new();
    let file = create_dialect_file(r#"{ "bad": { "delimiter": "" } }"#);
    assert!(matches!(
        registry.load_json(file.path()),
        Err(Error::InvalidDialect { .. })
    ));
}

#[test]
fn test_load_json_invalid_entry_registers_nothing() {
    let registry = DialectRegistry::new();
    registry.configure("default").delimiter(";");
    let file = create_dialect_file(
        r#"{
    "aaa-good": { "delimiter": ";" },
    "default": { "delimiter": "|" },
    "zzz-bad": { "delimiter": "" }
}"#,
    );

    assert!(matches!(
        registry.load_json(file.path()),
        Err(Error::InvalidDialect { .. })
    ));
    assert!(!registry.contains("aaa-good"));
    assert!(!registry.contains("zzz-bad"));
    assert_eq!(registry.resolve("default").unwrap().delimiter, ";");
}

#[test]
fn test_load_json_missing_file() {
    let registry = DialectRegistry::new();
    let dir = tempfile::TempDir::new().unwrap();
    let result = registry.load_json(&dir.path().join("missing.json"));
    assert!(matches!(result, Err(Error::SourceNotFound { .. })));
}
