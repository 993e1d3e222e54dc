//! # rowcheck-csv
//!
//! CSV record source for the rowcheck validation engine.
//!
//! This crate decodes delimited text into raw records for [`rowcheck_core`],
//! with configurable dialect options for delimiter, quoting, escaping and
//! whitespace handling.
//!
//! ## Example Usage
//!
//! ```rust
//! use rowcheck_core::{FieldDef, RowValidator, Schema};
//! use rowcheck_csv::CsvConfig;
//!
//! let schema = Schema::new()
//!     .add_field(FieldDef::new("name").required())
//!     .add_field(FieldDef::new("age").required().rule(
//!         "Age must be a whole number",
//!         |v: &str| v.parse::<u32>().is_ok(),
//!     ));
//!
//! // Semicolon-delimited input from any reader
//! let config = CsvConfig::new().delimiter(';');
//! let source = config.from_reader("John;30\nJane;twenty\n".as_bytes());
//!
//! let mut validator = RowValidator::new(&schema, source);
//! let reports: Vec<_> = validator.rows().collect::<Result<_, _>>().unwrap();
//! assert!(reports[0].is_valid);
//! assert_eq!(reports[1].error_messages, vec!["Age must be a whole number"]);
//! ```

pub mod config;
pub mod source;

// Re-export main types
pub use config::{CsvConfig, RecordTerminator};
pub use source::CsvSource;
