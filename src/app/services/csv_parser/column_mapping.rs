//! Column mapping and row assembly
//!
//! This module derives the column list from the first record of a source
//! (header names, or positional names for headerless input), removes ignored
//! columns, and maps every later record onto the retained positions.

use std::cmp::Ordering;
use std::sync::Arc;
use tracing::{debug, warn};

use super::record_source::Record;
use super::tokenizer::{FieldMode, Tokenizer};
use crate::Result;
use crate::app::models::{Columns, Row};
use crate::app::services::dialect_registry::Dialect;

/// Retained columns and the source field each one is read from
#[derive(Debug, Clone)]
pub struct ColumnMapping {
    /// Output columns shared by every row
    pub columns: Arc<Columns>,

    /// Source field position for each output column, ascending
    pub positions: Vec<usize>,

    /// Number of fields in the record the mapping was derived from
    pub source_width: usize,
}

impl ColumnMapping {
    /// Build a mapping from candidate names in source order
    ///
    /// Ignored names are dropped; a repeated name keeps its first position.
    pub fn analyze<I>(names: I, dialect: &Dialect) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut columns = Columns::default();
        let mut positions = Vec::new();
        let mut source_width = 0;

        for (position, name) in names.into_iter().enumerate() {
            source_width = position + 1;
            if dialect.is_ignored(&name) {
                debug!("Ignoring column {} '{}'", position, name);
                continue;
            }
            if columns.push(Arc::from(name.as_str())) {
                positions.push(position);
            } else {
                warn!(
                    "Duplicate column '{}' at position {}; keeping the first occurrence",
                    name, position
                );
            }
        }

        Self {
            columns: Arc::new(columns),
            positions,
            source_width,
        }
    }

    /// Positional names `"0".."width-1"` for headerless input
    pub fn positional(width: usize, dialect: &Dialect) -> Self {
        Self::analyze((0..width).map(|position| position.to_string()), dialect)
    }

    /// Build a row from a tokenized record
    ///
    /// Positions past the end of a short record are left out of the row.
    pub fn assemble(&self, fields: Vec<String>) -> Row {
        let mut fields: Vec<Option<String>> = fields.into_iter().map(Some).collect();
        let values = self
            .positions
            .iter()
            .map_while(|&position| fields.get_mut(position).and_then(Option::take))
            .collect();
        Row::new(Arc::clone(&self.columns), values)
    }

    /// Get statistics about the column mapping: (source fields, retained columns)
    pub fn stats(&self) -> (usize, usize) {
        (self.source_width, self.columns.len())
    }
}

/// Field-count mismatch against the column mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordShape {
    Exact,
    Short,
    Long,
}

/// Turns records into rows, deriving the column mapping from the first one
#[derive(Debug)]
pub struct RowAssembler<'d> {
    tokenizer: Tokenizer<'d>,
    mapping: Option<ColumnMapping>,
}

impl<'d> RowAssembler<'d> {
    pub fn new(dialect: &'d Dialect) -> Self {
        Self {
            tokenizer: Tokenizer::new(dialect),
            mapping: None,
        }
    }

    /// Current column mapping, once the first record has been seen
    pub fn mapping(&self) -> Option<&ColumnMapping> {
        self.mapping.as_ref()
    }

    /// Process one record
    ///
    /// Returns `None` for a header record and the assembled row otherwise,
    /// together with how the record's width compared to the mapping.
    pub fn assemble(&mut self, record: &Record) -> Result<Option<(Row, RecordShape)>> {
        let tokenizer = self.tokenizer;

        match &self.mapping {
            Some(mapping) => {
                let fields = tokenizer.split(&record.text, record.line, FieldMode::Unquote)?;
                let shape = match fields.len().cmp(&mapping.source_width) {
                    Ordering::Less => RecordShape::Short,
                    Ordering::Equal => RecordShape::Exact,
                    Ordering::Greater => RecordShape::Long,
                };
                Ok(Some((mapping.assemble(fields), shape)))
            }
            None => self.first_record(record),
        }
    }

    fn first_record(&mut self, record: &Record) -> Result<Option<(Row, RecordShape)>> {
        let tokenizer = self.tokenizer;
        let dialect = tokenizer.dialect();

        if dialect.header {
            let names = tokenizer.split(&record.text, record.line, FieldMode::Verbatim)?;
            let mapping = ColumnMapping::analyze(names, dialect);
            let (width, retained) = mapping.stats();
            debug!(
                "Header on line {}: {} fields, {} retained columns",
                record.line, width, retained
            );
            self.mapping = Some(mapping);
            return Ok(None);
        }

        let fields = tokenizer.split(&record.text, record.line, FieldMode::Unquote)?;
        debug!(
            "No header; using {} positional columns from line {}",
            fields.len(),
            record.line
        );
        let mapping = ColumnMapping::positional(fields.len(), dialect);
        let row = mapping.assemble(fields);
        self.mapping = Some(mapping);
        Ok(Some((row, RecordShape::Exact)))
    }
}
