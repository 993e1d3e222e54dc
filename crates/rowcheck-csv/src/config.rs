//! CSV dialect options

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::source::CsvSource;
use rowcheck_core::{Error, Result};

/// Configuration for how CSV input is decoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvConfig {
    /// Field delimiter character (default: comma)
    pub delimiter: char,
    /// Quote character for fields containing special characters (default: double quote)
    pub quote_char: char,
    /// Escape character inside quoted fields (default: none, quotes are doubled)
    pub escape_char: Option<char>,
    /// Record terminator (default: CRLF)
    pub record_terminator: RecordTerminator,
    /// Whether surrounding whitespace is stripped from each field (default: false)
    pub trim: bool,
}

/// Record terminator for reading CSV
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordTerminator {
    /// CRLF (RFC 4180; a bare LF or CR also ends a record)
    CRLF,
    /// LF only (a CR stays part of the field value)
    LF,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            quote_char: '"',
            escape_char: None, // Uses doubling by default
            record_terminator: RecordTerminator::CRLF,
            trim: false,
        }
    }
}

impl CsvConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the delimiter character
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set the quote character
    pub fn quote_char(mut self, quote_char: char) -> Self {
        self.quote_char = quote_char;
        self
    }

    /// Set the escape character (disables quote doubling)
    pub fn escape_char(mut self, escape_char: char) -> Self {
        self.escape_char = Some(escape_char);
        self
    }

    /// Set the record terminator
    pub fn record_terminator(mut self, terminator: RecordTerminator) -> Self {
        self.record_terminator = terminator;
        self
    }

    /// Configure whitespace trimming around field values
    pub fn trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    /// Convert delimiter to u8 for csv crate
    pub fn delimiter_u8(&self) -> u8 {
        self.delimiter as u8
    }

    /// Convert quote char to u8 for csv crate
    pub fn quote_char_u8(&self) -> u8 {
        self.quote_char as u8
    }

    /// Get escape character as u8, if one is configured
    pub fn escape_char_u8(&self) -> Option<u8> {
        self.escape_char.map(|c| c as u8)
    }

    pub(crate) fn to_terminator(&self) -> csv::Terminator {
        match self.record_terminator {
            RecordTerminator::CRLF => csv::Terminator::CRLF,
            RecordTerminator::LF => csv::Terminator::Any(b'\n'),
        }
    }

    pub(crate) fn to_trim(&self) -> csv::Trim {
        if self.trim {
            csv::Trim::All
        } else {
            csv::Trim::None
        }
    }

    /// Wrap any reader as a record source using this dialect
    pub fn from_reader<R: Read>(&self, reader: R) -> CsvSource<R> {
        CsvSource::build(self, reader)
    }

    /// Open a file as a record source using this dialect
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be opened.
    pub fn open(&self, path: impl AsRef<Path>) -> Result<CsvSource<File>> {
        let path = path.as_ref();
        let file = File::open(path).map_err(Error::from_source)?;
        debug!(path = %path.display(), "opened csv input");
        Ok(CsvSource::build(self, file))
    }
}
