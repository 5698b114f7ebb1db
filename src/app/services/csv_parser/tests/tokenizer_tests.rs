//! Tests for the record tokenizer state machine

use crate::Error;
use crate::app::services::csv_parser::{FieldMode, Tokenizer};
use crate::app::services::dialect_registry::Dialect;

fn split(dialect: &Dialect, text: &str) -> Vec<String> {
    Tokenizer::new(dialect)
        .split(text, 1, FieldMode::Unquote)
        .unwrap()
}

fn dialect_with_delimiter(delimiter: &str) -> Dialect {
    Dialect {
        delimiter: delimiter.to_string(),
        ..Dialect::default()
    }
}

#[test]
fn test_simple_record() {
    let dialect = Dialect::default();
    assert_eq!(split(&dialect, "1,2,3"), vec!["1", "2", "3"]);
}

#[test]
fn test_empty_fields_are_kept() {
    let dialect = Dialect::default();
    assert_eq!(split(&dialect, "a,,c,"), vec!["a", "", "c", ""]);
    assert_eq!(split(&dialect, ","), vec!["", ""]);
}

#[test]
fn test_multi_character_delimiter() {
    let dialect = dialect_with_delimiter("::");
    assert_eq!(split(&dialect, "1::2::3"), vec!["1", "2", "3"]);
}

#[test]
fn test_partial_delimiter_is_content() {
    let dialect = dialect_with_delimiter("::");
    assert_eq!(split(&dialect, "a:b::c:"), vec!["a:b", "c:"]);
    assert_eq!(split(&dialect, ":::x"), vec!["", ":x"]);
}

#[test]
fn test_space_delimiter() {
    let dialect = dialect_with_delimiter(" ");
    assert_eq!(split(&dialect, "Eric Idle"), vec!["Eric", "Idle"]);
}

#[test]
fn test_multibyte_delimiter_and_content() {
    let dialect = dialect_with_delimiter("§");
    assert_eq!(split(&dialect, "αβ§γ§"), vec!["αβ", "γ", ""]);
}

#[test]
fn test_quoted_field_protects_delimiter() {
    let dialect = Dialect::default();
    assert_eq!(split(&dialect, "\"a,b\",c"), vec!["a,b", "c"]);
}

#[test]
fn test_doubled_quote_is_literal() {
    let dialect = Dialect::default();
    assert_eq!(
        split(&dialect, "\"say \"\"hi\"\"\",x"),
        vec!["say \"hi\"", "x"]
    );
    assert_eq!(split(&dialect, "\"\"\"\""), vec!["\""]);
}

#[test]
fn test_empty_quoted_field() {
    let dialect = Dialect::default();
    assert_eq!(split(&dialect, "\"\",x"), vec!["", "x"]);
}

#[test]
fn test_quote_inside_unquoted_field_is_data() {
    let dialect = Dialect::default();
    assert_eq!(split(&dialect, "5\" pipe,x"), vec!["5\" pipe", "x"]);
}

#[test]
fn test_text_after_closing_quote_is_appended() {
    let dialect = Dialect::default();
    assert_eq!(split(&dialect, "\"ab\"cd,e"), vec!["abcd", "e"]);
}

#[test]
fn test_custom_quote_character() {
    let dialect = Dialect {
        quote_character: '\'',
        ..Dialect::default()
    };
    assert_eq!(
        split(&dialect, "'it''s',\"plain\""),
        vec!["it's", "\"plain\""]
    );
}

#[test]
fn test_trim_characters() {
    let mut dialect = Dialect::default();
    dialect.trim_characters.extend([' ', '\t']);
    assert_eq!(split(&dialect, " 1 ,\t2\t,  3"), vec!["1", "2", "3"]);
}

#[test]
fn test_trim_keeps_interior_characters() {
    let mut dialect = dialect_with_delimiter("::");
    dialect.trim_characters.extend([' ', '[', ']']);
    assert_eq!(
        split(&dialect, "[04] :: [Hello World]"),
        vec!["04", "Hello World"]
    );
}

#[test]
fn test_trim_does_not_enter_quotes() {
    let mut dialect = Dialect::default();
    dialect.trim_characters.insert(' ');
    assert_eq!(split(&dialect, " \" a \" , b "), vec![" a ", "b"]);
}

#[test]
fn test_trim_everything_leaves_empty_field() {
    let mut dialect = Dialect::default();
    dialect.trim_characters.extend(['[', ']']);
    assert_eq!(split(&dialect, "[],x"), vec!["", "x"]);
}

#[test]
fn test_skip_initial_space_only_after_delimiter() {
    let dialect = Dialect {
        skip_initial_space: true,
        ..Dialect::default()
    };
    assert_eq!(split(&dialect, " a,  b, c "), vec![" a", "b", "c "]);
}

#[test]
fn test_skip_initial_space_before_quote() {
    let dialect = Dialect {
        skip_initial_space: true,
        ..Dialect::default()
    };
    assert_eq!(split(&dialect, "a, \"b,c\""), vec!["a", "b,c"]);
}

#[test]
fn test_without_skip_initial_space_spaces_are_kept() {
    let dialect = Dialect::default();
    assert_eq!(split(&dialect, "a, b"), vec!["a", " b"]);
}

#[test]
fn test_verbatim_mode_keeps_quotes() {
    let dialect = Dialect::default();
    let fields = Tokenizer::new(&dialect)
        .split(
            "\"Free trip to A,B\",\"5.89\",\"Special rate \"\"1.79\"\"\"",
            1,
            FieldMode::Verbatim,
        )
        .unwrap();
    assert_eq!(
        fields,
        vec![
            "\"Free trip to A,B\"",
            "\"5.89\"",
            "\"Special rate \"\"1.79\"\"\"",
        ]
    );
}

#[test]
fn test_verbatim_mode_still_trims_outside_quotes() {
    let mut dialect = Dialect::default();
    dialect.trim_characters.insert(' ');
    let fields = Tokenizer::new(&dialect)
        .split(" \"a b\" , c ", 1, FieldMode::Verbatim)
        .unwrap();
    assert_eq!(fields, vec!["\"a b\"", "c"]);
}

#[test]
fn test_unterminated_quote_reports_line() {
    let dialect = Dialect::default();
    match Tokenizer::new(&dialect).split("a,\"open", 7, FieldMode::Unquote) {
        Err(Error::UnterminatedQuote { line }) => assert_eq!(line, 7),
        other => panic!("Expected UnterminatedQuote, got {:?}", other),
    }
}

#[test]
fn test_empty_text_is_one_empty_field() {
    let dialect = Dialect::default();
    assert_eq!(split(&dialect, ""), vec![""]);
}
