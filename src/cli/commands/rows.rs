//! Rows command: stream a file's rows to stdout
//!
//! Rows are consumed through the async [`RowStream`](crate::RowStream), so
//! JSON lines output starts while the parser thread is still reading. Table
//! and JSON output need every row (column widths, a closing bracket) and are
//! written once the stream ends.

use futures::StreamExt;
use std::io::{BufWriter, Write};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::shared::{build_reader, load_registry, write_json_line, write_json_pretty, write_table};
use crate::Result;
use crate::app::models::Row;
use crate::app::services::csv_parser::ParseStats;
use crate::cli::args::{OutputFormat, RowsArgs};
use crate::config::ReaderConfig;

/// Collects or writes rows according to the output format
#[derive(Debug)]
pub struct RowPrinter {
    format: OutputFormat,
    buffered: Vec<Row>,
    written: usize,
}

impl RowPrinter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            buffered: Vec::new(),
            written: 0,
        }
    }

    /// Number of rows accepted so far
    pub fn written(&self) -> usize {
        self.written
    }

    /// Accept one row, writing it immediately for line-oriented output
    pub fn push<W: Write>(&mut self, row: Row, out: &mut W) -> Result<()> {
        match self.format {
            OutputFormat::Jsonl => write_json_line(&row, out)?,
            OutputFormat::Table | OutputFormat::Json => self.buffered.push(row),
        }
        self.written += 1;
        Ok(())
    }

    /// Write anything still buffered
    pub fn finish<W: Write>(self, columns: &[String], out: &mut W) -> Result<()> {
        match self.format {
            OutputFormat::Jsonl => Ok(()),
            OutputFormat::Json => write_json_pretty(&self.buffered, out),
            OutputFormat::Table => write_table(columns, &self.buffered, out),
        }
    }
}

/// Execute the rows command
pub async fn run_rows(args: RowsArgs, cancellation_token: CancellationToken) -> Result<ParseStats> {
    let registry = load_registry(args.dialect.dialects_file.as_deref())?;
    let config = ReaderConfig::default().with_channel_capacity(args.channel_capacity);
    let mut reader = build_reader(&args.dialect, registry, config)?;
    reader.read(&args.file)?;

    let mut stream = reader.into_stream();
    let mut out = BufWriter::new(std::io::stdout());
    let mut printer = RowPrinter::new(args.format);
    let limit = args.limit.unwrap_or(usize::MAX);

    while printer.written() < limit {
        let next = tokio::select! {
            biased;
            _ = cancellation_token.cancelled() => {
                warn!("Row output cancelled after {} rows", printer.written());
                break;
            }
            next = stream.next() => next,
        };

        match next {
            Some(row) => printer.push(row?, &mut out)?,
            None => break,
        }
    }

    let columns = stream
        .columns()
        .map(|columns| columns.to_vec())
        .unwrap_or_default();
    let written = printer.written();
    printer.finish(&columns, &mut out)?;
    out.flush()?;

    let stats = stream.stats().cloned().unwrap_or_default();
    info!(
        "Printed {} rows from {} ({} records read)",
        written,
        args.file.display(),
        stats.records_read
    );
    Ok(stats)
}
