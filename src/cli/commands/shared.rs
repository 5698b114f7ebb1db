//! Shared components for CLI commands
//!
//! This module contains logging setup, dialect resolution from command-line
//! flags, and the output writers used by more than one command.

use colored::*;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

use crate::app::models::Row;
use crate::app::services::csv_parser::Reader;
use crate::app::services::dialect_registry::{Dialect, DialectRegistry};
use crate::cli::args::DialectArgs;
use crate::config::ReaderConfig;
use crate::constants::{CLI_DIALECT, LOG_TARGET};
use crate::{Error, Result};

/// Set up structured logging on stderr
///
/// `RUST_LOG` takes precedence over the level derived from `-v`/`-q`.
pub fn setup_logging(log_level: &str) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{}={}", LOG_TARGET, log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr),
        )
        .try_init()
        .map_err(|e| Error::configuration(format!("Failed to initialise logging: {}", e)))?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Process-wide registry, extended with definitions from `dialects_file`
pub fn load_registry(dialects_file: Option<&Path>) -> Result<DialectRegistry> {
    let registry = DialectRegistry::global().clone();
    if let Some(path) = dialects_file {
        registry.load_json(path)?;
    }
    Ok(registry)
}

/// Build a reader for the dialect described by the command-line flags
///
/// Without override flags the named dialect is used as is. Otherwise it is
/// copied into the `cli` dialect and the overrides are applied there, so the
/// named dialect itself is never modified.
pub fn build_reader(
    args: &DialectArgs,
    registry: DialectRegistry,
    config: ReaderConfig,
) -> Result<Reader> {
    let base = args.base_dialect();
    let mut reader = Reader::with_registry(registry.clone()).with_config(config);

    if !args.has_overrides() {
        reader.use_dialect(base);
        return Ok(reader);
    }

    let dialect = registry
        .get(base)
        .ok_or_else(|| Error::unknown_dialect(base))?;
    registry.register(CLI_DIALECT, dialect);

    let mut builder = reader.configure_dialect(CLI_DIALECT);
    if let Some(delimiter) = &args.delimiter {
        builder = builder.delimiter(delimiter.as_str());
    }
    if let Some(quote) = args.quote {
        builder = builder.quote_character(quote);
    }
    if let Some(trim) = &args.trim {
        builder = builder.trim_characters(trim.chars());
    }
    if args.skip_initial_space {
        builder = builder.skip_initial_space(true);
    }
    if args.no_header {
        builder = builder.header(false);
    }
    if let Some(terminator) = args.line_terminator {
        builder = builder.line_terminator(terminator.into());
    }
    builder = builder.ignore_columns(args.ignore.iter().cloned());

    info!("Using dialect '{}' with command-line overrides", base);
    debug!("Effective dialect: {:?}", builder.snapshot());
    Ok(reader)
}

/// Write rows as an aligned table with a highlighted header
pub fn write_table<W: Write>(columns: &[String], rows: &[Row], out: &mut W) -> Result<()> {
    if columns.is_empty() {
        return Ok(());
    }

    let mut widths: Vec<usize> = columns.iter().map(|name| name.chars().count()).collect();
    for row in rows {
        for (width, name) in widths.iter_mut().zip(columns) {
            let len = row.get(name).map_or(0, |value| value.chars().count());
            *width = (*width).max(len);
        }
    }

    let header: Vec<String> = columns
        .iter()
        .zip(&widths)
        .map(|(name, &width)| format!("{:<width$}", name).bold().cyan().to_string())
        .collect();
    writeln!(out, "{}", header.join("  "))?;

    let rule: Vec<String> = widths.iter().map(|&width| "-".repeat(width)).collect();
    writeln!(out, "{}", rule.join("  ").dimmed())?;

    for row in rows {
        let cells: Vec<String> = columns
            .iter()
            .zip(&widths)
            .map(|(name, &width)| format!("{:<width$}", row.get(name).unwrap_or("")))
            .collect();
        writeln!(out, "{}", cells.join("  ").trim_end())?;
    }

    Ok(())
}

/// Write any serializable value as one compact JSON line
pub fn write_json_line<W, T>(value: &T, out: &mut W) -> Result<()>
where
    W: Write,
    T: serde::Serialize + ?Sized,
{
    serde_json::to_writer(&mut *out, value).map_err(std::io::Error::from)?;
    writeln!(out)?;
    Ok(())
}

/// Write any serializable value as an indented JSON document
pub fn write_json_pretty<W, T>(value: &T, out: &mut W) -> Result<()>
where
    W: Write,
    T: serde::Serialize + ?Sized,
{
    serde_json::to_writer_pretty(&mut *out, value).map_err(std::io::Error::from)?;
    writeln!(out)?;
    Ok(())
}

/// One-line human description of a dialect
pub fn describe_dialect(dialect: &Dialect) -> String {
    let trim: String = dialect.trim_characters.iter().collect();
    let ignored: Vec<&str> = dialect.ignored_columns.iter().map(String::as_str).collect();
    format!(
        "delimiter={:?} quote={:?} trim={:?} skip_initial_space={} header={} ignore=[{}] line_terminator={:?}",
        dialect.delimiter,
        dialect.quote_character,
        trim,
        dialect.skip_initial_space,
        dialect.header,
        ignored.join(","),
        dialect.line_terminator,
    )
}
