//! Record source abstraction
//!
//! The engine consumes pre-tokenized records through [`RecordSource`] and
//! stays agnostic to delimiters, quoting and encodings; a concrete CSV
//! implementation lives in the `rowcheck-csv` adapter crate.

use serde::{Deserialize, Serialize};

/// One physical record as produced by the tokenizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    /// 1-based physical line the record starts on.
    pub line_number: u64,
    /// Field values exactly as tokenized, in file order.
    pub fields: Vec<String>,
}

impl RawRecord {
    /// Create a record from a line number and its field values.
    pub fn new(line_number: u64, fields: Vec<String>) -> Self {
        Self {
            line_number,
            fields,
        }
    }
}

/// Pull-based supplier of raw records.
///
/// `Ok(None)` signals end of input; after that, implementations should keep
/// returning `Ok(None)`. Sources are forward-only: once a record has been
/// handed out there is no way to rewind.
pub trait RecordSource {
    /// Produce the next record, or `None` when the source is exhausted.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying input fails to yield a record,
    /// e.g. on an I/O failure or unparseable framing.
    fn read_record(&mut self) -> crate::Result<Option<RawRecord>>;
}

/// A source over pre-tokenized rows held in memory.
///
/// Rows are numbered consecutively from line 1. Mostly useful in tests and
/// for callers whose data never touches a file.
#[derive(Debug)]
pub struct MemorySource {
    rows: std::vec::IntoIter<Vec<String>>,
    next_line: u64,
}

impl MemorySource {
    /// Create a source over the given rows.
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self {
            rows: rows.into_iter(),
            next_line: 1,
        }
    }
}

impl RecordSource for MemorySource {
    fn read_record(&mut self) -> crate::Result<Option<RawRecord>> {
        match self.rows.next() {
            Some(fields) => {
                let record = RawRecord::new(self.next_line, fields);
                self.next_line += 1;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }
}
