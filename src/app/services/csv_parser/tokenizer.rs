//! Record tokenizer
//!
//! Splits one logical record into raw field strings under a [`Dialect`].
//! Each field moves through `FieldStart -> Unquoted | Quoted -> AfterQuote`:
//!
//! - `FieldStart` opens a quoted field on the quote character, emits an empty
//!   field on a delimiter, and otherwise skips trim characters (and, after a
//!   delimiter, spaces when `skip_initial_space` is set) before entering
//!   `Unquoted`.
//! - `Unquoted` accumulates until the whole delimiter sequence matches. A
//!   partial delimiter match is ordinary content.
//! - `Quoted` accumulates verbatim. A doubled quote is a literal quote; a
//!   single quote closes the field.
//! - `AfterQuote` collects anything between the closing quote and the next
//!   delimiter and appends it, trimmed, to the field.
//!
//! Trim characters are never removed from inside a quoted region.

use crate::app::services::dialect_registry::Dialect;
use crate::{Error, Result};

/// How quoted fields are emitted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldMode {
    /// Remove the enclosing quotes and collapse doubled quotes
    Unquote,
    /// Keep the field text exactly as written, quotes included
    ///
    /// Used for header records, where quoting still protects delimiters but
    /// the column name is the literal cell text.
    Verbatim,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    FieldStart,
    Unquoted,
    Quoted,
    AfterQuote,
}

/// Dialect-aware record splitter
#[derive(Debug, Clone, Copy)]
pub struct Tokenizer<'d> {
    dialect: &'d Dialect,
}

impl<'d> Tokenizer<'d> {
    /// Create a tokenizer for a resolved dialect
    ///
    /// The dialect is expected to have passed [`Dialect::validate`]; an empty
    /// delimiter would never match and the record would become one field.
    pub fn new(dialect: &'d Dialect) -> Self {
        Self { dialect }
    }

    pub fn dialect(&self) -> &'d Dialect {
        self.dialect
    }

    /// Split `text` into fields
    ///
    /// `line` is the source line number reported by
    /// [`Error::UnterminatedQuote`] when a quoted field is still open at the
    /// end of the record.
    pub fn split(&self, text: &str, line: usize, mode: FieldMode) -> Result<Vec<String>> {
        let dialect = self.dialect;
        let delimiter = dialect.delimiter.as_str();
        let quote = dialect.quote_character;
        let quote_len = quote.len_utf8();

        let mut fields = Vec::new();
        let mut field = String::new();
        let mut tail = String::new();
        let mut state = State::FieldStart;
        let mut after_delimiter = false;
        let mut pos = 0;

        while let Some(ch) = text[pos..].chars().next() {
            let rest = &text[pos..];
            let width = ch.len_utf8();

            match state {
                State::FieldStart => {
                    if ch == quote {
                        if mode == FieldMode::Verbatim {
                            field.push(quote);
                        }
                        state = State::Quoted;
                        pos += width;
                    } else if !delimiter.is_empty() && rest.starts_with(delimiter) {
                        fields.push(std::mem::take(&mut field));
                        after_delimiter = true;
                        pos += delimiter.len();
                    } else if (after_delimiter && dialect.skip_initial_space && ch == ' ')
                        || dialect.is_trim_character(ch)
                    {
                        pos += width;
                    } else {
                        state = State::Unquoted;
                    }
                }
                State::Unquoted => {
                    if !delimiter.is_empty() && rest.starts_with(delimiter) {
                        fields.push(dialect.trim(&field).to_string());
                        field.clear();
                        state = State::FieldStart;
                        after_delimiter = true;
                        pos += delimiter.len();
                    } else {
                        field.push(ch);
                        pos += width;
                    }
                }
                State::Quoted => {
                    if ch == quote {
                        if rest[quote_len..].starts_with(quote) {
                            field.push(quote);
                            if mode == FieldMode::Verbatim {
                                field.push(quote);
                            }
                            pos += quote_len * 2;
                        } else {
                            if mode == FieldMode::Verbatim {
                                field.push(quote);
                            }
                            state = State::AfterQuote;
                            pos += quote_len;
                        }
                    } else {
                        field.push(ch);
                        pos += width;
                    }
                }
                State::AfterQuote => {
                    if !delimiter.is_empty() && rest.starts_with(delimiter) {
                        field.push_str(dialect.trim(&tail));
                        fields.push(std::mem::take(&mut field));
                        tail.clear();
                        state = State::FieldStart;
                        after_delimiter = true;
                        pos += delimiter.len();
                    } else {
                        tail.push(ch);
                        pos += width;
                    }
                }
            }
        }

        match state {
            State::FieldStart => fields.push(field),
            State::Unquoted => fields.push(dialect.trim(&field).to_string()),
            State::AfterQuote => {
                field.push_str(dialect.trim(&tail));
                fields.push(field);
            }
            State::Quoted => return Err(Error::unterminated_quote(line)),
        }

        Ok(fields)
    }
}
