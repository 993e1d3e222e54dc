#![deny(warnings)]
#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]

//! # rowcheck-core
//!
//! Schema model and streaming validation engine for delimited tabular data.
//!
//! This crate validates rows of raw string fields against a declarative
//! [`Schema`], yielding one [`RowReport`] per row while holding only the row
//! under inspection in memory.
//!
//! ## Example Usage
//!
//! ```rust
//! use rowcheck_core::{FieldDef, MemorySource, RowValidator, Schema};
//!
//! // Describe the expected shape of each row
//! let schema = Schema::new()
//!     .add_field(FieldDef::new("name").required())
//!     .add_field(FieldDef::new("phone").required().rule(
//!         "Phone # must be 10 digits",
//!         |v: &str| v.len() == 10 && v.chars().all(|c| c.is_ascii_digit()),
//!     ));
//!
//! let source = MemorySource::new(vec![
//!     vec!["Sarah".to_string(), "0192871243".to_string()],
//!     vec!["Raju".to_string(), "123".to_string()],
//! ]);
//!
//! // Pull one report per row
//! let mut validator = RowValidator::new(&schema, source);
//! let reports: Vec<_> = validator.rows().collect::<Result<_, _>>().unwrap();
//! assert!(reports[0].is_valid);
//! assert_eq!(reports[1].error_messages, vec!["Phone # must be 10 digits"]);
//! ```

pub mod engine;
pub mod report;
pub mod rules;
pub mod schema;
pub mod source;

// Re-export main types
pub use engine::{HeaderMode, RowValidator, Rows};
pub use report::RowReport;
pub use schema::{FieldDef, FieldPredicate, FieldRule, RowPredicate, RowRule, Schema};
pub use source::{MemorySource, RawRecord, RecordSource};

use thiserror::Error;

/// Errors that can occur while configuring or running a validation pass
#[derive(Error, Debug)]
pub enum Error {
    #[error("header mode was already selected for this run")]
    HeaderModeAlreadySelected,

    #[error("header mode cannot change once row iteration has started")]
    HeaderModeAfterIterationStart,

    #[error("record source error: {0}")]
    Source(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
    /// Wrap an underlying reader or decoder failure.
    pub fn from_source<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Source(Box::new(err))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Convenience function to validate in-memory rows with default settings
///
/// # Errors
///
/// Returns an error when the record source fails mid-stream.
pub fn validate_rows(schema: &Schema, rows: Vec<Vec<String>>) -> Result<Vec<RowReport>> {
    let mut validator = RowValidator::new(schema, MemorySource::new(rows));
    validator.rows().collect()
}
