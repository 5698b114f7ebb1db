//! Dialect rules and built-in presets
//!
//! A dialect is plain data while it is being configured. It is checked by
//! [`Dialect::validate`] when a reader resolves it, because setters are
//! applied one at a time and intermediate states may be incomplete.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::constants::{DEFAULT_DELIMITER, DEFAULT_QUOTE_CHARACTER};
use crate::{Error, Result};

/// How records are terminated in the source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineTerminator {
    /// `\n` ends a record; a `\r` directly before it is discarded
    #[default]
    CrLf,
    /// Only `\n` ends a record; `\r` is ordinary data
    Lf,
}

/// CSV parsing rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dialect {
    /// Field separator, possibly several characters long
    pub delimiter: String,

    /// Character that opens and closes a quoted field
    pub quote_character: char,

    /// Characters stripped from both ends of unquoted field text
    pub trim_characters: BTreeSet<char>,

    /// Skip spaces directly following a delimiter
    pub skip_initial_space: bool,

    /// First record holds the column names
    pub header: bool,

    /// Column names left out of every row
    pub ignored_columns: BTreeSet<String>,

    /// Record terminator handling
    pub line_terminator: LineTerminator,
}

impl Default for Dialect {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER.to_string(),
            quote_character: DEFAULT_QUOTE_CHARACTER,
            trim_characters: BTreeSet::new(),
            skip_initial_space: false,
            header: true,
            ignored_columns: BTreeSet::new(),
            line_terminator: LineTerminator::CrLf,
        }
    }
}

impl Dialect {
    /// Spreadsheet export dialect: comma separated, CRLF tolerant
    pub fn excel() -> Self {
        Self {
            line_terminator: LineTerminator::CrLf,
            ..Self::default()
        }
    }

    /// Unix dialect: comma separated, records end at LF only
    pub fn unix() -> Self {
        Self {
            line_terminator: LineTerminator::Lf,
            ..Self::default()
        }
    }

    /// Whether `ch` belongs to the trim set
    #[inline]
    pub fn is_trim_character(&self, ch: char) -> bool {
        self.trim_characters.contains(&ch)
    }

    /// Whether `column` is filtered out of rows
    #[inline]
    pub fn is_ignored(&self, column: &str) -> bool {
        self.ignored_columns.contains(column)
    }

    /// Strip trim characters from both ends of `text`
    pub fn trim<'a>(&self, text: &'a str) -> &'a str {
        if self.trim_characters.is_empty() {
            return text;
        }
        text.trim_matches(|ch| self.is_trim_character(ch))
    }

    /// Check that the rules can drive the tokenizer
    ///
    /// `name` is only used to label the error.
    pub fn validate(&self, name: &str) -> Result<()> {
        if self.delimiter.is_empty() {
            return Err(Error::invalid_dialect(name, "delimiter must not be empty"));
        }
        if self.delimiter.contains(self.quote_character) {
            return Err(Error::invalid_dialect(
                name,
                format!(
                    "delimiter {:?} contains the quote character {:?}",
                    self.delimiter, self.quote_character
                ),
            ));
        }
        if self.delimiter.contains(['\r', '\n']) {
            return Err(Error::invalid_dialect(
                name,
                "delimiter must not contain line terminators",
            ));
        }
        if matches!(self.quote_character, '\r' | '\n') {
            return Err(Error::invalid_dialect(
                name,
                "quote character must not be a line terminator",
            ));
        }
        Ok(())
    }
}
