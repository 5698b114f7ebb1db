//! CSV reader session
//!
//! [`Reader`] ties a dialect selection to a source and exposes the parsed
//! rows three ways:
//!
//! - bulk: [`Reader::rows`] and [`Reader::cols`] wait for the producer to
//!   finish and return everything
//! - polling: [`Reader::busy`], [`Reader::ready`] and [`Reader::next_row`]
//!   never block
//! - async: [`Reader::into_stream`] yields a `futures::Stream` of rows

use std::io::{BufRead, BufReader, Cursor, Read};
use std::path::Path;
use tracing::{debug, info};

use super::engine::{Engine, EngineState};
use super::record_source::open_source;
use super::stats::ParseStats;
use super::stream::RowStream;
use crate::app::models::Row;
use crate::app::services::dialect_registry::{Dialect, DialectBuilder, DialectRegistry};
use crate::config::ReaderConfig;
use crate::constants::DEFAULT_DIALECT;
use crate::{Error, Result};

/// Which dialect a reader parses with
#[derive(Debug, Clone)]
enum DialectSelection {
    /// Looked up in the registry when a read starts
    Named(String),
    /// Owned by the reader
    Owned(Dialect),
}

/// A CSV reading session
///
/// A reader holds a dialect name (resolved against its registry when a read
/// starts) or its own [`Dialect`], plus the state of the current parse.
/// Starting another read discards all state of the previous one.
#[derive(Debug)]
pub struct Reader {
    registry: DialectRegistry,
    selection: DialectSelection,
    config: ReaderConfig,
    engine: Option<Engine>,
    rows: Vec<Row>,
}

impl Default for Reader {
    fn default() -> Self {
        Self::new()
    }
}

impl Reader {
    /// Create a reader using the process-wide registry and the `default` dialect
    pub fn new() -> Self {
        Self::with_registry(DialectRegistry::global().clone())
    }

    /// Create a reader bound to a specific registry
    pub fn with_registry(registry: DialectRegistry) -> Self {
        Self {
            registry,
            selection: DialectSelection::Named(DEFAULT_DIALECT.to_string()),
            config: ReaderConfig::default(),
            engine: None,
            rows: Vec::new(),
        }
    }

    /// Replace the streaming configuration
    pub fn with_config(mut self, config: ReaderConfig) -> Self {
        self.config = config;
        self
    }

    /// Parse with an owned dialect instead of a registered one
    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.set_dialect(dialect);
        self
    }

    pub fn set_dialect(&mut self, dialect: Dialect) -> &mut Self {
        self.selection = DialectSelection::Owned(dialect);
        self
    }

    pub fn registry(&self) -> &DialectRegistry {
        &self.registry
    }

    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Builder for the dialect registered as `name`, which becomes active
    ///
    /// Calling this again with the same name returns a builder for the same
    /// dialect, so settings accumulate across calls.
    pub fn configure_dialect(&mut self, name: &str) -> DialectBuilder {
        self.selection = DialectSelection::Named(name.to_string());
        self.registry.configure(name)
    }

    /// Make the dialect registered as `name` active
    ///
    /// The name is looked up when the next read starts; an unknown name is
    /// reported then as [`Error::UnknownDialect`].
    pub fn use_dialect(&mut self, name: &str) -> &mut Self {
        self.selection = DialectSelection::Named(name.to_string());
        self
    }

    /// Name of the active registered dialect, `None` for an owned dialect
    pub fn dialect_name(&self) -> Option<&str> {
        match &self.selection {
            DialectSelection::Named(name) => Some(name.as_str()),
            DialectSelection::Owned(_) => None,
        }
    }

    /// Validated snapshot of the active dialect
    pub fn resolve_dialect(&self) -> Result<Dialect> {
        match &self.selection {
            DialectSelection::Named(name) => self.registry.resolve(name),
            DialectSelection::Owned(dialect) => {
                dialect.validate("<owned>")?;
                Ok(dialect.clone())
            }
        }
    }

    /// Start parsing a file
    ///
    /// Returns once the file is open and the producer is running. A missing
    /// file fails here with [`Error::SourceNotFound`].
    pub fn read(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        info!("Reading CSV file: {}", path.display());

        self.reset();
        self.config.validate()?;
        let dialect = self.resolve_dialect()?;
        let source = open_source(path, self.config.read_buffer_size)?;
        self.start(source, dialect)
    }

    /// Start parsing any byte source
    pub fn read_from<R>(&mut self, source: R) -> Result<()>
    where
        R: Read + Send + 'static,
    {
        self.reset();
        self.config.validate()?;
        let dialect = self.resolve_dialect()?;
        let source = BufReader::with_capacity(self.config.read_buffer_size, source);
        self.start(source, dialect)
    }

    /// Start parsing in-memory text
    pub fn read_str(&mut self, text: impl Into<String>) -> Result<()> {
        self.read_from(Cursor::new(text.into().into_bytes()))
    }

    fn start<R>(&mut self, source: R, dialect: Dialect) -> Result<()>
    where
        R: BufRead + Send + 'static,
    {
        self.engine = Some(Engine::spawn(source, dialect, &self.config)?);
        Ok(())
    }

    fn reset(&mut self) {
        if self.engine.take().is_some() {
            debug!("Discarding previous parse state");
        }
        self.rows.clear();
    }

    /// Current lifecycle state
    pub fn state(&self) -> EngineState {
        self.engine
            .as_ref()
            .map_or(EngineState::Idle, |engine| engine.state().clone())
    }

    /// True while rows are still being produced or remain to be taken
    pub fn busy(&mut self) -> Result<bool> {
        match self.engine.as_mut() {
            Some(engine) => engine.busy(),
            None => Ok(false),
        }
    }

    /// True if [`Reader::next_row`] can return a row without waiting
    pub fn ready(&mut self) -> Result<bool> {
        match self.engine.as_mut() {
            Some(engine) => engine.ready(),
            None => Ok(false),
        }
    }

    /// Take the next row
    ///
    /// Fails with [`Error::NotReady`] if [`Reader::ready`] would return false.
    pub fn next_row(&mut self) -> Result<Row> {
        match self.engine.as_mut() {
            Some(engine) => engine.next_row(),
            None => Err(Error::NotReady),
        }
    }

    /// Wait for the producer to finish and return every row not yet taken
    /// with [`Reader::next_row`]
    ///
    /// Before any read this is empty. If production fails, the error is
    /// returned and the rows received before it stay available through
    /// [`Reader::collected`].
    ///
    /// # Panics
    ///
    /// Blocks the current thread; panics if called from within an async
    /// runtime. Use [`Reader::into_stream`] there.
    pub fn rows(&mut self) -> Result<&[Row]> {
        if let Some(engine) = self.engine.as_mut() {
            while let Some(row) = engine.wait_row()? {
                self.rows.push(row);
            }
        }
        Ok(&self.rows)
    }

    /// Like [`Reader::rows`], returning the rows by value
    pub fn into_rows(mut self) -> Result<Vec<Row>> {
        self.rows()?;
        Ok(std::mem::take(&mut self.rows))
    }

    /// Wait for the producer to finish and return the column names
    ///
    /// Empty before any read, and for a headerless source with no data.
    pub fn cols(&mut self) -> Result<Vec<String>> {
        self.rows()?;
        Ok(self
            .engine
            .as_ref()
            .and_then(Engine::columns)
            .map(|columns| columns.to_vec())
            .unwrap_or_default())
    }

    /// Wait only until the column names are known
    ///
    /// Unlike [`Reader::cols`] the rest of the source is not parsed ahead;
    /// the rows stay available through the other accessors. Empty before any
    /// read and for a source with no records.
    ///
    /// # Panics
    ///
    /// Blocks the current thread, like [`Reader::rows`].
    pub fn wait_columns(&mut self) -> Result<Vec<String>> {
        let columns = match self.engine.as_mut() {
            Some(engine) => engine.wait_columns()?.map(|columns| columns.to_vec()),
            None => None,
        };
        Ok(columns.unwrap_or_default())
    }

    /// Rows collected so far by [`Reader::rows`], without waiting
    pub fn collected(&self) -> &[Row] {
        &self.rows
    }

    /// Statistics for the last completed parse
    pub fn stats(&self) -> Option<&ParseStats> {
        self.engine.as_ref().and_then(Engine::stats)
    }

    /// Continue the current parse as an async stream of rows
    ///
    /// Rows already taken or collected are not repeated. A reader that was
    /// never started yields an empty stream.
    pub fn into_stream(mut self) -> RowStream {
        RowStream::new(self.engine.take())
    }
}
