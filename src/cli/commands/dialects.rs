//! Dialects command: list registered dialects

use colored::*;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::{BufWriter, Write};

use super::shared::{describe_dialect, load_registry, write_json_line, write_json_pretty};
use crate::Result;
use crate::app::services::dialect_registry::{Dialect, DialectRegistry};
use crate::cli::args::{DialectsArgs, OutputFormat};

/// One line of JSON lines output
#[derive(Debug, Serialize)]
struct DialectEntry<'a> {
    name: &'a str,
    dialect: &'a Dialect,
}

/// Execute the dialects command
pub async fn run_dialects(args: DialectsArgs) -> Result<usize> {
    let registry = load_registry(args.dialects_file.as_deref())?;
    let dialects = collect_dialects(&registry);

    let mut out = BufWriter::new(std::io::stdout());
    write_dialects(&dialects, args.format, &mut out)?;
    out.flush()?;
    Ok(dialects.len())
}

/// Snapshot every registered dialect, ordered by name
pub fn collect_dialects(registry: &DialectRegistry) -> BTreeMap<String, Dialect> {
    registry
        .names()
        .into_iter()
        .filter_map(|name| registry.get(&name).map(|dialect| (name, dialect)))
        .collect()
}

/// Write dialects in the requested format
pub fn write_dialects<W: Write>(
    dialects: &BTreeMap<String, Dialect>,
    format: OutputFormat,
    out: &mut W,
) -> Result<()> {
    match format {
        OutputFormat::Table => {
            let width = dialects.keys().map(|name| name.chars().count()).max().unwrap_or(0);
            for (name, dialect) in dialects {
                writeln!(
                    out,
                    "{}  {}",
                    format!("{:<width$}", name).bright_green().bold(),
                    describe_dialect(dialect)
                )?;
            }
            Ok(())
        }
        OutputFormat::Json => write_json_pretty(dialects, out),
        OutputFormat::Jsonl => {
            for (name, dialect) in dialects {
                let entry = DialectEntry { name, dialect };
                write_json_line(&entry, out)?;
            }
            Ok(())
        }
    }
}
