//! Tests for fluent dialect configuration

use crate::app::services::dialect_registry::{DialectRegistry, LineTerminator};

#[test]
fn test_builder_sets_every_rule() {
    let registry = DialectRegistry::new();
    let dialect = registry
        .configure("full")
        .delimiter("::")
        .quote_character('\'')
        .trim_characters([' ', '\t'])
        .skip_initial_space(true)
        .header(false)
        .ignore_columns(["a", "b"])
        .line_terminator(LineTerminator::Lf)
        .snapshot();

    assert_eq!(dialect.delimiter, "::");
    assert_eq!(dialect.quote_character, '\'');
    assert!(dialect.is_trim_character('\t'));
    assert!(dialect.skip_initial_space);
    assert!(!dialect.header);
    assert!(dialect.is_ignored("b"));
    assert_eq!(dialect.line_terminator, LineTerminator::Lf);
}

#[test]
fn test_repeated_configure_returns_same_dialect() {
    let registry = DialectRegistry::new();
    let first = registry.configure("test_dialect");
    registry.configure("test_dialect").delimiter(", ");

    assert_eq!(first.snapshot().delimiter, ", ");
    assert_eq!(first.name(), "test_dialect");
}

#[test]
fn test_trim_characters_accumulate() {
    let registry = DialectRegistry::new();
    registry.configure("trim").trim_characters([' ']);
    registry.configure("trim").trim_characters(['[', ']']);

    let dialect = registry.resolve("trim").unwrap();
    let trims: Vec<char> = dialect.trim_characters.iter().copied().collect();
    assert_eq!(trims, vec![' ', '[', ']']);
}

#[test]
fn test_ignore_columns_accumulate() {
    let registry = DialectRegistry::new();
    registry.configure("ignore").ignore_columns(["age"]);
    registry
        .configure("ignore")
        .ignore_columns(vec!["gender".to_string()]);

    let dialect = registry.resolve("ignore").unwrap();
    assert!(dialect.is_ignored("age"));
    assert!(dialect.is_ignored("gender"));
    assert_eq!(dialect.ignored_columns.len(), 2);
}

#[test]
fn test_configuring_builtin_modifies_it() {
    let registry = DialectRegistry::new();
    registry.configure("excel").trim_characters([' ']);
    assert!(registry.resolve("excel").unwrap().is_trim_character(' '));
    assert!(!registry.resolve("default").unwrap().is_trim_character(' '));
}

#[test]
fn test_builders_are_usable_across_threads() {
    let registry = DialectRegistry::new();
    let builder = registry.configure("threads");

    let handles: Vec<_> = ['a', 'b', 'c']
        .into_iter()
        .map(|ch| {
            let builder = builder.clone();
            std::thread::spawn(move || {
                builder.trim_characters([ch]);
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(registry.resolve("threads").unwrap().trim_characters.len(), 3);
}
