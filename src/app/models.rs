//! Data models for parsed CSV output
//!
//! This module contains the ordered row mapping handed to callers and the
//! column list it is keyed by. Column names are interned once per parse and
//! shared by every row through an `Arc`.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::ops::Index;
use std::sync::Arc;

// =============================================================================
// Column Names
// =============================================================================

/// Ordered, de-duplicated column names with O(1) name lookup
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Columns {
    /// Column names in output order
    names: Vec<Arc<str>>,

    /// Column name to output position
    index: HashMap<Arc<str>, usize>,
}

impl Columns {
    /// Build a column list, keeping the first occurrence of any repeated name
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Arc<str>>,
    {
        let mut columns = Self::default();
        for name in names {
            columns.push(name.into());
        }
        columns
    }

    /// Append a name; returns false if it was already present
    pub(crate) fn push(&mut self, name: Arc<str>) -> bool {
        if self.index.contains_key(&name) {
            return false;
        }
        self.index.insert(Arc::clone(&name), self.names.len());
        self.names.push(name);
        true
    }

    /// Output position of a column
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Column name at an output position
    pub fn get(&self, position: usize) -> Option<&str> {
        self.names.get(position).map(|name| name.as_ref())
    }

    /// Check if a column exists
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterate names in column order
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.names.iter().map(|name| name.as_ref())
    }

    /// Owned copy of the names in column order
    pub fn to_vec(&self) -> Vec<String> {
        self.iter().map(str::to_string).collect()
    }
}

// =============================================================================
// Row
// =============================================================================

/// One parsed record: an ordered mapping from column name to field text
///
/// A row holds values for a prefix of its columns. Columns past the end of a
/// short record are absent rather than empty, so `get` returns `None` and
/// `count` returns 0 for them, exactly as for ignored columns.
#[derive(Clone, PartialEq, Eq)]
pub struct Row {
    columns: Arc<Columns>,
    values: Vec<String>,
}

impl Row {
    /// Create a row; values beyond the column count are dropped
    pub fn new(columns: Arc<Columns>, mut values: Vec<String>) -> Self {
        values.truncate(columns.len());
        Self { columns, values }
    }

    /// Field value for a column, `None` if the column is absent from this row
    pub fn get(&self, column: &str) -> Option<&str> {
        self.columns
            .position(column)
            .and_then(|position| self.values.get(position))
            .map(String::as_str)
    }

    /// Number of entries keyed by `column` (0 or 1)
    pub fn count(&self, column: &str) -> usize {
        usize::from(self.contains(column))
    }

    /// Check if the row has a value for `column`
    pub fn contains(&self, column: &str) -> bool {
        self.get(column).is_some()
    }

    /// Number of entries in the row
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate `(column, value)` pairs in column order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.columns
            .iter()
            .zip(self.values.iter().map(String::as_str))
    }

    /// Column names present in this row
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.columns.iter().take(self.values.len())
    }

    /// Field values in column order
    pub fn values(&self) -> impl Iterator<Item = &str> + '_ {
        self.values.iter().map(String::as_str)
    }

    /// Shared column list this row is keyed by
    pub fn columns(&self) -> &Arc<Columns> {
        &self.columns
    }

    /// Consume the row into owned `(column, value)` pairs
    pub fn into_pairs(self) -> Vec<(String, String)> {
        let Self { columns, values } = self;
        columns
            .iter()
            .map(str::to_string)
            .zip(values)
            .collect()
    }
}

impl Index<&str> for Row {
    type Output = str;

    /// # Panics
    ///
    /// Panics if the row has no value for `column`; use [`Row::get`] to test.
    fn index(&self, column: &str) -> &str {
        match self.get(column) {
            Some(value) => value,
            None => panic!("row has no column named '{}'", column),
        }
    }
}

impl fmt::Debug for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (column, value) in self.iter() {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}
