//! Parsing statistics for a single source
//!
//! Counters are kept by the producer and sent to the reader as the last
//! message of a successful parse.

use super::column_mapping::RecordShape;

/// Simple parsing statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ParseStats {
    /// Non-blank records read, header included
    pub records_read: usize,

    /// Blank lines skipped
    pub blank_lines_skipped: usize,

    /// Rows handed to the consumer
    pub rows_emitted: usize,

    /// Records with fewer fields than the column mapping
    pub short_records: usize,

    /// Records with more fields than the column mapping; extras were dropped
    pub long_records: usize,

    /// Producer stopped early because the consumer went away
    pub cancelled: bool,
}

impl ParseStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a record's width against the column mapping
    pub fn record_shape(&mut self, shape: RecordShape) {
        match shape {
            RecordShape::Exact => {}
            RecordShape::Short => self.short_records += 1,
            RecordShape::Long => self.long_records += 1,
        }
    }

    /// Records whose width did not match the column mapping
    pub fn ragged_records(&self) -> usize {
        self.short_records + self.long_records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_shapes_are_counted() {
        let mut stats = ParseStats::new();
        stats.record_shape(RecordShape::Exact);
        stats.record_shape(RecordShape::Short);
        stats.record_shape(RecordShape::Long);
        stats.record_shape(RecordShape::Long);

        assert_eq!(stats.short_records, 1);
        assert_eq!(stats.long_records, 2);
        assert_eq!(stats.ragged_records(), 3);
    }
}
