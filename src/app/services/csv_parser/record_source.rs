//! Logical record extraction from a byte source
//!
//! Splits buffered input into records terminated by LF, applying the
//! dialect's carriage-return handling, stripping a leading UTF-8 byte order
//! mark and skipping blank lines.

use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;
use tracing::debug;

use crate::app::services::dialect_registry::LineTerminator;
use crate::constants::UTF8_BOM;
use crate::{Error, Result};

/// One logical record of input text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// 1-based source line number
    pub line: usize,

    /// Record text without its terminator
    pub text: String,
}

/// Open a file as a buffered byte source
///
/// A missing file is reported as [`Error::SourceNotFound`], distinct from
/// other I/O failures.
pub fn open_source(path: &Path, buffer_size: usize) -> Result<BufReader<File>> {
    let file = File::open(path).map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            Error::source_not_found(path)
        } else {
            Error::io(format!("Failed to open {}", path.display()), e)
        }
    })?;
    debug!("Opened CSV source: {}", path.display());
    Ok(BufReader::with_capacity(buffer_size, file))
}

/// Iterator over the logical records of a buffered source
#[derive(Debug)]
pub struct RecordReader<R> {
    inner: R,
    terminator: LineTerminator,
    line: usize,
    blank_lines: usize,
    buffer: Vec<u8>,
    finished: bool,
}

impl<R: BufRead> RecordReader<R> {
    pub fn new(inner: R, terminator: LineTerminator) -> Self {
        Self {
            inner,
            terminator,
            line: 0,
            blank_lines: 0,
            buffer: Vec::new(),
            finished: false,
        }
    }

    /// Number of blank lines skipped so far
    pub fn blank_lines(&self) -> usize {
        self.blank_lines
    }

    /// Number of lines consumed so far, blank ones included
    pub fn lines_read(&self) -> usize {
        self.line
    }

    fn strip_terminator(&mut self) {
        if self.buffer.last() == Some(&b'\n') {
            self.buffer.pop();
            if self.terminator == LineTerminator::CrLf && self.buffer.last() == Some(&b'\r') {
                self.buffer.pop();
            }
        }
        if self.line == 1 && self.buffer.starts_with(UTF8_BOM) {
            self.buffer.drain(..UTF8_BOM.len());
        }
    }
}

impl<R: BufRead> Iterator for RecordReader<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            self.buffer.clear();
            match self.inner.read_until(b'\n', &mut self.buffer) {
                Ok(0) => {
                    self.finished = true;
                    return None;
                }
                Ok(_) => {
                    self.line += 1;
                    self.strip_terminator();

                    if self.buffer.is_empty() {
                        self.blank_lines += 1;
                        continue;
                    }

                    let line = self.line;
                    let bytes = std::mem::take(&mut self.buffer);
                    return Some(match String::from_utf8(bytes) {
                        Ok(text) => Ok(Record { line, text }),
                        Err(_) => {
                            self.finished = true;
                            Err(Error::invalid_encoding(line))
                        }
                    });
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.finished = true;
                    return Some(Err(Error::io(
                        format!("Failed to read record after line {}", self.line),
                        e,
                    )));
                }
            }
        }
    }
}
