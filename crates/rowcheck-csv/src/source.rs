//! Streaming CSV record source

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{Reader, ReaderBuilder, StringRecord};
use tracing::trace;

use rowcheck_core::{Error, RawRecord, RecordSource, Result};

use crate::config::CsvConfig;

/// Record source that decodes CSV input one record at a time.
///
/// Every physical row is surfaced as-is: the first row is never consumed as
/// a header here, and rows of uneven width are not decode errors. What a row
/// means is decided by the validation engine on the other side of
/// [`RecordSource`].
pub struct CsvSource<R> {
    reader: Reader<R>,
    record: StringRecord,
    ordinal: u64,
}

impl CsvSource<File> {
    /// Open a file with the default dialect.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be opened.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        CsvConfig::default().open(path)
    }
}

impl<R: Read> CsvSource<R> {
    /// Wrap any reader with the default dialect.
    pub fn from_reader(reader: R) -> Self {
        CsvConfig::default().from_reader(reader)
    }

    pub(crate) fn build(config: &CsvConfig, reader: R) -> Self {
        let reader = ReaderBuilder::new()
            // header handling belongs to the validation engine
            .has_headers(false)
            // uneven row widths are data here, not decode errors
            .flexible(true)
            .delimiter(config.delimiter_u8())
            .quote(config.quote_char_u8())
            .escape(config.escape_char_u8())
            .double_quote(config.escape_char_u8().is_none())
            .terminator(config.to_terminator())
            .trim(config.to_trim())
            .from_reader(reader);

        Self {
            reader,
            record: StringRecord::new(),
            ordinal: 0,
        }
    }
}

impl<R: Read> RecordSource for CsvSource<R> {
    fn read_record(&mut self) -> Result<Option<RawRecord>> {
        match self.reader.read_record(&mut self.record) {
            Ok(true) => {
                self.ordinal += 1;
                // A quoted field can span physical lines, so the decoder's
                // position, not the record ordinal, is authoritative.
                let line_number = self
                    .record
                    .position()
                    .map_or(self.ordinal, csv::Position::line);
                let fields: Vec<String> = self.record.iter().map(ToString::to_string).collect();
                trace!(
                    line = line_number,
                    field_count = fields.len(),
                    "decoded csv record"
                );
                Ok(Some(RawRecord::new(line_number, fields)))
            }
            Ok(false) => Ok(None),
            Err(err) => Err(Error::from_source(err)),
        }
    }
}
