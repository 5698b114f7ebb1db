//! Producer/consumer engine behind [`Reader`](super::Reader) and
//! [`RowStream`](super::RowStream)
//!
//! A dedicated worker thread runs the record source, tokenizer and row
//! assembler, sending each result into a bounded `mpsc` channel. The channel
//! is the only state shared with the consumer. A successful parse ends with
//! a `Done` message carrying the statistics, sent after every row, so a
//! consumer never sees the end early and never waits on the thread itself.
//! Only complete rows are ever sent. A channel that closes without `Done` or
//! an error means the worker died.
//!
//! Dropping the engine cancels the worker's token and closes the channel; the
//! worker notices at its next record boundary and releases the source.

use std::io::BufRead;
use std::sync::Arc;
use tokio::sync::mpsc::{self, error::TryRecvError};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::column_mapping::RowAssembler;
use super::record_source::RecordReader;
use super::stats::ParseStats;
use crate::app::models::{Columns, Row};
use crate::app::services::dialect_registry::Dialect;
use crate::config::ReaderConfig;
use crate::{Error, Result};

/// Message sent from the producer to the consumer
#[derive(Debug)]
pub(crate) enum Event {
    /// Column list, sent once before the first row
    Header(Arc<Columns>),
    Row(Row),
    /// Final message of a successful parse
    Done(ParseStats),
}

type Message = Result<Event>;

/// Lifecycle of a parse
#[derive(Debug, Clone)]
pub enum EngineState {
    /// No source has been read
    Idle,
    /// Producer may still send rows
    Running,
    /// Every row has been received
    Done,
    /// Production stopped with an error; reported by every later call
    Failed(Error),
}

/// Consumer side of a running parse
#[derive(Debug)]
pub(crate) struct Engine {
    receiver: mpsc::Receiver<Message>,
    cancellation_token: CancellationToken,
    state: EngineState,
    columns: Option<Arc<Columns>>,
    pending: Option<Row>,
    stats: Option<ParseStats>,
}

impl Engine {
    /// Start a producer worker over `source`
    pub(crate) fn spawn<R>(source: R, dialect: Dialect, config: &ReaderConfig) -> Result<Self>
    where
        R: BufRead + Send + 'static,
    {
        let (sender, receiver) = mpsc::channel(config.channel_capacity);
        let cancellation_token = CancellationToken::new();
        let worker_token = cancellation_token.clone();

        // Detached; completion is reported over the channel
        std::thread::Builder::new()
            .name(config.worker_name.clone())
            .spawn(move || produce(source, dialect, sender, worker_token))
            .map_err(|e| Error::io("Failed to spawn parser worker", e))?;

        debug!(
            "Spawned parser worker '{}' with channel capacity {}",
            config.worker_name, config.channel_capacity
        );

        Ok(Self {
            receiver,
            cancellation_token,
            state: EngineState::Running,
            columns: None,
            pending: None,
            stats: None,
        })
    }

    pub(crate) fn state(&self) -> &EngineState {
        &self.state
    }

    pub(crate) fn columns(&self) -> Option<&Arc<Columns>> {
        self.columns.as_ref()
    }

    pub(crate) fn stats(&self) -> Option<&ParseStats> {
        self.stats.as_ref()
    }

    /// Take the buffered row, if any, without touching the channel
    pub(crate) fn take_pending(&mut self) -> Option<Row> {
        self.pending.take()
    }

    /// True until the producer has finished and every row has been taken
    pub(crate) fn busy(&mut self) -> Result<bool> {
        self.fill(false)?;
        Ok(self.pending.is_some() || matches!(self.state, EngineState::Running))
    }

    /// True if a complete row can be taken without waiting
    pub(crate) fn ready(&mut self) -> Result<bool> {
        self.fill(false)?;
        Ok(self.pending.is_some())
    }

    /// Take the buffered row, failing if none is ready
    pub(crate) fn next_row(&mut self) -> Result<Row> {
        self.fill(false)?;
        self.pending.take().ok_or(Error::NotReady)
    }

    /// Wait for the next row; `None` once the producer has finished
    ///
    /// # Panics
    ///
    /// Blocks the current thread, so it panics if called from within an
    /// asynchronous execution context. Use [`RowStream`](super::RowStream)
    /// there instead.
    pub(crate) fn wait_row(&mut self) -> Result<Option<Row>> {
        self.fill(true)?;
        Ok(self.pending.take())
    }

    /// Wait until the column list is known or the producer has finished
    ///
    /// At most one row is buffered while waiting; the rest stay in the
    /// channel.
    pub(crate) fn wait_columns(&mut self) -> Result<Option<&Arc<Columns>>> {
        while self.columns.is_none() {
            match &self.state {
                EngineState::Failed(e) => return Err(e.clone()),
                EngineState::Done | EngineState::Idle => break,
                EngineState::Running => {}
            }

            let message = self.receiver.blocking_recv();
            if let Some(row) = self.accept(message)? {
                self.pending = Some(row);
            }
        }
        Ok(self.columns.as_ref())
    }

    /// Receive messages until a row is buffered or no more can be had
    fn fill(&mut self, blocking: bool) -> Result<()> {
        while self.pending.is_none() {
            match &self.state {
                EngineState::Failed(e) => return Err(e.clone()),
                EngineState::Done | EngineState::Idle => return Ok(()),
                EngineState::Running => {}
            }

            let message = if blocking {
                self.receiver.blocking_recv()
            } else {
                match self.receiver.try_recv() {
                    Ok(message) => Some(message),
                    Err(TryRecvError::Empty) => return Ok(()),
                    Err(TryRecvError::Disconnected) => None,
                }
            };

            if let Some(row) = self.accept(message)? {
                self.pending = Some(row);
            }
        }
        Ok(())
    }

    /// Apply one channel message; `None` means the channel has closed
    ///
    /// Never blocks, so it is safe to call from `poll_next`.
    pub(crate) fn accept(&mut self, message: Option<Message>) -> Result<Option<Row>> {
        match message {
            Some(Ok(Event::Header(columns))) => {
                self.columns = Some(columns);
                Ok(None)
            }
            Some(Ok(Event::Row(row))) => {
                if self.columns.is_none() {
                    self.columns = Some(Arc::clone(row.columns()));
                }
                Ok(Some(row))
            }
            Some(Ok(Event::Done(stats))) => {
                self.stats = Some(stats);
                self.state = EngineState::Done;
                Ok(None)
            }
            Some(Err(e)) => self.fail(e),
            None => {
                if matches!(self.state, EngineState::Running) {
                    return self.fail(Error::worker_failed(
                        "parser worker stopped without finishing",
                    ));
                }
                Ok(None)
            }
        }
    }

    fn fail(&mut self, e: Error) -> Result<Option<Row>> {
        self.state = EngineState::Failed(e.clone());
        Err(e)
    }

    /// Poll the channel from an async context
    pub(crate) fn poll_recv(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Option<Message>> {
        self.receiver.poll_recv(cx)
    }

}

impl Drop for Engine {
    fn drop(&mut self) {
        if matches!(self.state, EngineState::Running) {
            debug!("Reader dropped before completion; cancelling parser worker");
        }
        self.cancellation_token.cancel();
        self.receiver.close();
    }
}

/// Worker body: read records, assemble rows, send them in source order
fn produce<R: BufRead>(
    source: R,
    dialect: Dialect,
    sender: mpsc::Sender<Message>,
    cancellation_token: CancellationToken,
) {
    let mut stats = ParseStats::new();
    let mut records = RecordReader::new(source, dialect.line_terminator);
    let mut assembler = RowAssembler::new(&dialect);
    let mut announced = false;

    for record in records.by_ref() {
        if cancellation_token.is_cancelled() {
            debug!("Parser worker cancelled after {} rows", stats.rows_emitted);
            stats.cancelled = true;
            break;
        }

        let assembled = record.and_then(|record| {
            stats.records_read += 1;
            assembler.assemble(&record)
        });

        let assembled = match assembled {
            Ok(assembled) => assembled,
            Err(e) => {
                warn!("Parsing stopped after {} rows: {}", stats.rows_emitted, e);
                // The consumer may already be gone; nothing else to report to
                let _ = sender.blocking_send(Err(e));
                return;
            }
        };

        if !announced {
            if let Some(mapping) = assembler.mapping() {
                announced = true;
                let columns = Arc::clone(&mapping.columns);
                if sender.blocking_send(Ok(Event::Header(columns))).is_err() {
                    stats.cancelled = true;
                    break;
                }
            }
        }

        if let Some((row, shape)) = assembled {
            stats.record_shape(shape);
            if sender.blocking_send(Ok(Event::Row(row))).is_err() {
                debug!("Row consumer went away; stopping parser worker");
                stats.cancelled = true;
                break;
            }
            stats.rows_emitted += 1;
        }
    }

    stats.blank_lines_skipped = records.blank_lines();
    if stats.ragged_records() > 0 {
        debug!(
            "{} short and {} long records did not match the column count",
            stats.short_records, stats.long_records
        );
    }
    info!(
        "Parsed {} rows from {} records ({} blank lines skipped)",
        stats.rows_emitted, stats.records_read, stats.blank_lines_skipped
    );
    if !stats.cancelled {
        // Fails only if the consumer has already gone
        let _ = sender.blocking_send(Ok(Event::Done(stats)));
    }
}
