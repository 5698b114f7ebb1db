//! Cols command: print a file's column names

use std::io::{BufWriter, Write};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::shared::{build_reader, load_registry, write_json_line, write_json_pretty};
use crate::cli::args::{ColsArgs, OutputFormat};
use crate::config::ReaderConfig;
use crate::{Error, Result};

/// Execute the cols command
///
/// Only the header is waited for, on tokio's blocking pool; the parser stops
/// once the reader is dropped.
pub async fn run_cols(args: ColsArgs, cancellation_token: CancellationToken) -> Result<Vec<String>> {
    let registry = load_registry(args.dialect.dialects_file.as_deref())?;
    let mut reader = build_reader(&args.dialect, registry, ReaderConfig::default())?;
    let file = args.file.clone();

    let task = tokio::task::spawn_blocking(move || {
        reader.read(&file)?;
        reader.wait_columns()
    });

    let columns = tokio::select! {
        biased;
        _ = cancellation_token.cancelled() => {
            warn!("Column lookup cancelled");
            return Ok(Vec::new());
        }
        joined = task => joined
            .map_err(|e| Error::worker_failed(format!("Column task failed: {}", e)))??,
    };

    let mut out = BufWriter::new(std::io::stdout());
    write_columns(&columns, args.format, &mut out)?;
    out.flush()?;

    info!("{} has {} columns", args.file.display(), columns.len());
    Ok(columns)
}

/// Write column names in the requested format
pub fn write_columns<W: Write>(columns: &[String], format: OutputFormat, out: &mut W) -> Result<()> {
    match format {
        OutputFormat::Table => {
            for (position, name) in columns.iter().enumerate() {
                writeln!(out, "{:>3}  {}", position, name)?;
            }
            Ok(())
        }
        OutputFormat::Json => write_json_pretty(columns, out),
        OutputFormat::Jsonl => {
            for name in columns {
                write_json_line(name, out)?;
            }
            Ok(())
        }
    }
}
