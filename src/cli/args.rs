//! Command-line argument definitions for csvdialect
//!
//! This module defines the CLI interface using the clap derive API. Every
//! subcommand that parses a file shares the same [`DialectArgs`], so a dialect
//! can be picked by name, loaded from a JSON definitions file, and adjusted
//! with individual flags on top.

use crate::app::services::dialect_registry::LineTerminator;
use crate::constants::{DEFAULT_CHANNEL_CAPACITY, DEFAULT_DIALECT};
use crate::{Error, Result};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the csvdialect reader
///
/// Parses delimited text files under configurable dialects and prints the
/// resulting rows or column names.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "csvdialect",
    version,
    about = "Parse CSV-like files under configurable dialects",
    long_about = "Reads delimited text with multi-character delimiters, custom quote characters, \
                  trim sets and ignored columns, and prints rows as an aligned table, JSON or \
                  JSON lines."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        global = true,
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        help = "Suppress log output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Print the rows of a file
    Rows(RowsArgs),
    /// Print the column names of a file
    Cols(ColsArgs),
    /// List registered dialects and their settings
    Dialects(DialectsArgs),
}

/// Arguments for the rows command
#[derive(Debug, Clone, Parser)]
pub struct RowsArgs {
    /// File to parse
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    #[command(flatten)]
    pub dialect: DialectArgs,

    /// Output format
    #[arg(
        short = 'f',
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format for rows"
    )]
    pub format: OutputFormat,

    /// Stop after this many rows
    #[arg(
        short = 'n',
        long = "limit",
        value_name = "COUNT",
        help = "Maximum number of rows to print"
    )]
    pub limit: Option<usize>,

    /// Capacity of the buffer between the parser thread and the printer
    #[arg(
        long = "buffer",
        value_name = "ROWS",
        default_value_t = DEFAULT_CHANNEL_CAPACITY,
        help = "Rows buffered between parser and output"
    )]
    pub channel_capacity: usize,
}

/// Arguments for the cols command
#[derive(Debug, Clone, Parser)]
pub struct ColsArgs {
    /// File to parse
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    #[command(flatten)]
    pub dialect: DialectArgs,

    /// Output format
    #[arg(
        short = 'f',
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format for column names"
    )]
    pub format: OutputFormat,
}

/// Arguments for the dialects command
#[derive(Debug, Clone, Parser)]
pub struct DialectsArgs {
    /// JSON file with additional dialect definitions
    #[arg(
        long = "dialects",
        value_name = "FILE",
        help = "Load dialect definitions from a JSON file"
    )]
    pub dialects_file: Option<PathBuf>,

    /// Output format
    #[arg(
        short = 'f',
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format for the dialect listing"
    )]
    pub format: OutputFormat,
}

/// Dialect selection and per-run overrides
///
/// Escapes `\t`, `\n`, `\r`, `\s` (space) and `\\` are recognised in the
/// delimiter, quote and trim values.
#[derive(Debug, Clone, Default, ClapArgs)]
pub struct DialectArgs {
    /// Registered dialect to start from
    #[arg(
        short = 'd',
        long = "dialect",
        value_name = "NAME",
        help = "Dialect to parse with (default, excel, unix or one loaded with --dialects)"
    )]
    pub dialect: Option<String>,

    /// JSON file with additional dialect definitions
    #[arg(
        long = "dialects",
        value_name = "FILE",
        help = "Load dialect definitions from a JSON file"
    )]
    pub dialects_file: Option<PathBuf>,

    /// Field delimiter, possibly several characters
    #[arg(
        long = "delimiter",
        value_name = "TEXT",
        value_parser = parse_escaped,
        help = "Field delimiter (may be several characters, e.g. '::')"
    )]
    pub delimiter: Option<String>,

    /// Quote character
    #[arg(
        long = "quote",
        value_name = "CHAR",
        value_parser = parse_char,
        help = "Quote character"
    )]
    pub quote: Option<char>,

    /// Characters trimmed from the ends of unquoted fields
    #[arg(
        long = "trim",
        value_name = "CHARS",
        value_parser = parse_escaped,
        help = "Characters to trim from unquoted fields, e.g. '\\s[]'"
    )]
    pub trim: Option<String>,

    /// Skip spaces directly after a delimiter
    #[arg(long = "skip-initial-space", help = "Skip spaces following a delimiter")]
    pub skip_initial_space: bool,

    /// Treat the first record as data
    #[arg(long = "no-header", help = "First record is data; columns are named 0, 1, 2, ...")]
    pub no_header: bool,

    /// Columns to leave out of every row
    #[arg(
        long = "ignore",
        value_name = "COLUMNS",
        value_delimiter = ',',
        help = "Comma-separated column names to ignore"
    )]
    pub ignore: Vec<String>,

    /// Line terminator handling
    #[arg(
        long = "line-terminator",
        value_enum,
        value_name = "KIND",
        help = "Line terminator: crlf strips a CR before LF, lf keeps it"
    )]
    pub line_terminator: Option<TerminatorArg>,
}

impl DialectArgs {
    /// Name of the dialect the run starts from
    pub fn base_dialect(&self) -> &str {
        self.dialect.as_deref().unwrap_or(DEFAULT_DIALECT)
    }

    /// Check whether any flag modifies the base dialect
    pub fn has_overrides(&self) -> bool {
        self.delimiter.is_some()
            || self.quote.is_some()
            || self.trim.is_some()
            || self.skip_initial_space
            || self.no_header
            || !self.ignore.is_empty()
            || self.line_terminator.is_some()
    }
}

/// Output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned, human-readable table
    Table,
    /// A single JSON document
    Json,
    /// One JSON value per line
    Jsonl,
}

/// Line terminator choices on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TerminatorArg {
    Crlf,
    Lf,
}

impl From<TerminatorArg> for LineTerminator {
    fn from(value: TerminatorArg) -> Self {
        match value {
            TerminatorArg::Crlf => LineTerminator::CrLf,
            TerminatorArg::Lf => LineTerminator::Lf,
        }
    }
}

impl Args {
    /// Get log level based on verbosity settings
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }
}

/// Resolve backslash escapes in a command-line value
pub fn parse_escaped(value: &str) -> Result<String> {
    let mut resolved = String::with_capacity(value.len());
    let mut chars = value.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            resolved.push(ch);
            continue;
        }
        match chars.next() {
            Some('t') => resolved.push('\t'),
            Some('n') => resolved.push('\n'),
            Some('r') => resolved.push('\r'),
            Some('s') => resolved.push(' '),
            Some('\\') => resolved.push('\\'),
            Some(other) => {
                return Err(Error::configuration(format!(
                    "Unknown escape sequence '\\{}' in '{}'",
                    other, value
                )));
            }
            None => {
                return Err(Error::configuration(format!(
                    "Trailing backslash in '{}'",
                    value
                )));
            }
        }
    }

    Ok(resolved)
}

/// Parse a single character, escapes allowed
pub fn parse_char(value: &str) -> Result<char> {
    let resolved = parse_escaped(value)?;
    let mut chars = resolved.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Ok(ch),
        _ => Err(Error::configuration(format!(
            "Expected a single character, got '{}'",
            value
        ))),
    }
}
