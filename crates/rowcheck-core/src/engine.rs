//! Streaming row validation engine

use tracing::{debug, trace};

use crate::report::RowReport;
use crate::schema::Schema;
use crate::source::{RawRecord, RecordSource};
use crate::{Error, Result};

/// Treatment of the first physical row, fixed per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderMode {
    /// The first row is data: validated and included in the result stream.
    Validate,
    /// The first row is consumed and discarded without validation; its line
    /// still counts toward subsequent line numbers.
    Skip,
    /// No header exists; the first row is the first data row.
    #[default]
    None,
}

/// Streaming validator binding a [`Schema`] to a record source.
///
/// Produces one [`RowReport`] per data row, lazily: a record is pulled from
/// the source only when the caller asks for the next report, and nothing is
/// retained after a report is yielded. A run is forward-only and not
/// restartable; validating again takes a fresh validator over a fresh source.
///
/// Rule predicates run as supplied; a panic in one propagates to the caller
/// rather than being converted into a finding.
pub struct RowValidator<'s, S> {
    schema: &'s Schema,
    source: S,
    mode: Option<HeaderMode>,
    started: bool,
    allow_empty_rows: bool,
}

impl<'s, S: RecordSource> RowValidator<'s, S> {
    /// Bind a schema to a record source.
    pub fn new(schema: &'s Schema, source: S) -> Self {
        Self {
            schema,
            source,
            mode: None,
            started: false,
            allow_empty_rows: false,
        }
    }

    /// Treat records with no fields as valid instead of reporting a field
    /// count mismatch. Such records bypass row rules as well. Off by default.
    #[must_use]
    pub fn allow_empty_rows(mut self, allow: bool) -> Self {
        self.allow_empty_rows = allow;
        self
    }

    /// The mode in effect for this run ([`HeaderMode::None`] unless selected).
    #[must_use]
    pub fn header_mode(&self) -> HeaderMode {
        self.mode.unwrap_or_default()
    }

    /// Select the header mode for this run.
    ///
    /// # Errors
    ///
    /// Returns [`Error::HeaderModeAfterIterationStart`] once a report has
    /// been pulled, and [`Error::HeaderModeAlreadySelected`] on a second
    /// selection, including re-selecting the same mode.
    pub fn set_header_mode(&mut self, mode: HeaderMode) -> Result<()> {
        if self.started {
            return Err(Error::HeaderModeAfterIterationStart);
        }
        if self.mode.is_some() {
            return Err(Error::HeaderModeAlreadySelected);
        }
        self.mode = Some(mode);
        Ok(())
    }

    /// Run every applicable check against one record and assemble its report.
    ///
    /// Checks run in a fixed order: field count, then each present field in
    /// declaration order (a missing required value suppresses that field's
    /// own rules), then row rules against the raw field sequence.
    pub fn validate_record(&self, record: RawRecord) -> RowReport {
        let RawRecord {
            line_number,
            fields,
        } = record;

        if self.allow_empty_rows && fields.is_empty() {
            return RowReport::new(line_number, fields, Vec::new());
        }

        let mut messages = Vec::new();

        let expected = self.schema.field_count();
        if fields.len() != expected {
            messages.push(format!(
                "Unexpected number of fields: Expected {expected}, Got {}",
                fields.len()
            ));
        }

        // Only indexes present in both the row and the schema are checked.
        for (decl, value) in self.schema.fields().iter().zip(&fields) {
            if decl.is_required() && value.is_empty() {
                messages.push(format!("Missing '{}' value", decl.name()));
                continue;
            }
            for rule in decl.rules() {
                if !rule.check(value) {
                    messages.push(rule.message().to_string());
                }
            }
        }

        for rule in self.schema.row_rules() {
            if !rule.check(&fields) {
                messages.push(rule.message().to_string());
            }
        }

        trace!(line = line_number, findings = messages.len(), "validated row");

        RowReport::new(line_number, fields, messages)
    }

    /// Iterate the remaining data rows as [`RowReport`]s.
    pub fn rows(&mut self) -> Rows<'_, 's, S> {
        Rows { validator: self }
    }
}

/// Pull iterator over validated rows; see [`RowValidator::rows`].
pub struct Rows<'v, 's, S> {
    validator: &'v mut RowValidator<'s, S>,
}

impl<S: RecordSource> Iterator for Rows<'_, '_, S> {
    type Item = Result<RowReport>;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.validator.started {
            self.validator.started = true;
            // The skipped header is consumed on the first pull, not at
            // selection time.
            if self.validator.header_mode() == HeaderMode::Skip {
                match self.validator.source.read_record() {
                    Ok(Some(header)) => {
                        debug!(line = header.line_number, "skipped header row");
                    }
                    Ok(None) => return None,
                    Err(err) => return Some(Err(err)),
                }
            }
        }

        match self.validator.source.read_record() {
            Ok(Some(record)) => Some(Ok(self.validator.validate_record(record))),
            Ok(None) => None,
            Err(err) => Some(Err(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldDef;
    use crate::source::MemorySource;
    use std::cell::Cell;
    use std::rc::Rc;

    fn rows_of(data: &[&[&str]]) -> Vec<Vec<String>> {
        data.iter()
            .map(|row| row.iter().map(ToString::to_string).collect())
            .collect()
    }

    fn create_test_schema() -> Schema {
        Schema::new()
            .add_field(FieldDef::new("name").required())
            .add_field(
                FieldDef::new("phone")
                    .required()
                    .rule("Phone # must be 10 digits", |v: &str| {
                        v.len() == 10 && v.chars().all(|c| c.is_ascii_digit())
                    }),
            )
            .add_field(
                FieldDef::new("color")
                    .rule("Color must have at least 3 letters", |v: &str| v.len() >= 3),
            )
    }

    fn collect_reports(schema: &Schema, data: &[&[&str]]) -> Vec<RowReport> {
        let mut validator = RowValidator::new(schema, MemorySource::new(rows_of(data)));
        validator.rows().map(Result::unwrap).collect()
    }

    #[test]
    fn test_valid_row_yields_valid_report() {
        let schema = create_test_schema();
        let reports = collect_reports(&schema, &[&["Ann", "0123456789", "blue"]]);

        assert_eq!(reports.len(), 1);
        assert!(reports[0].is_valid);
        assert!(reports[0].error_messages.is_empty());
        assert_eq!(reports[0].line_number, 1);
    }

    #[test]
    fn test_default_header_mode_is_none() {
        let schema = create_test_schema();
        let validator = RowValidator::new(&schema, MemorySource::new(Vec::new()));

        assert_eq!(validator.header_mode(), HeaderMode::None);
    }

    #[test]
    fn test_unselected_mode_treats_first_row_as_data() {
        let schema = create_test_schema();
        let reports = collect_reports(
            &schema,
            &[&["Ann", "0123456789", "blue"], &["Bob", "9876543210", "red"]],
        );

        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].line_number, 1);
    }

    #[test]
    fn test_set_header_mode_twice_is_an_error() {
        let schema = create_test_schema();
        let mut validator = RowValidator::new(&schema, MemorySource::new(Vec::new()));

        validator.set_header_mode(HeaderMode::Skip).unwrap();
        let second = validator.set_header_mode(HeaderMode::Skip);

        assert!(matches!(second, Err(Error::HeaderModeAlreadySelected)));
    }

    #[test]
    fn test_set_header_mode_after_iteration_is_an_error() {
        let schema = create_test_schema();
        let mut validator = RowValidator::new(
            &schema,
            MemorySource::new(rows_of(&[&["Ann", "0123456789", "blue"]])),
        );

        let first = validator.rows().next();
        assert!(first.is_some());

        let selected = validator.set_header_mode(HeaderMode::Validate);
        assert!(matches!(selected, Err(Error::HeaderModeAfterIterationStart)));
    }

    #[test]
    fn test_skip_mode_excludes_first_row_and_keeps_line_numbers() {
        let schema = create_test_schema();
        let mut validator = RowValidator::new(
            &schema,
            MemorySource::new(rows_of(&[
                &["name", "phone", "color"],
                &["Ann", "0123456789", "blue"],
                &["Bob", "9876543210", "red"],
            ])),
        );
        validator.set_header_mode(HeaderMode::Skip).unwrap();

        let reports: Vec<RowReport> = validator.rows().map(Result::unwrap).collect();

        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].line_number, 2);
        assert_eq!(reports[1].line_number, 3);
        assert!(reports[0].is_valid);
    }

    #[test]
    fn test_validate_mode_includes_first_row() {
        let schema = create_test_schema();
        let mut validator = RowValidator::new(
            &schema,
            MemorySource::new(rows_of(&[
                &["name", "phone", "color"],
                &["Ann", "0123456789", "blue"],
            ])),
        );
        validator.set_header_mode(HeaderMode::Validate).unwrap();

        let reports: Vec<RowReport> = validator.rows().map(Result::unwrap).collect();

        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].line_number, 1);
        // The header text itself fails the phone rule.
        assert!(!reports[0].is_valid);
        assert!(reports[1].is_valid);
    }

    #[test]
    fn test_skip_mode_on_empty_source() {
        let schema = create_test_schema();
        let mut validator = RowValidator::new(&schema, MemorySource::new(Vec::new()));
        validator.set_header_mode(HeaderMode::Skip).unwrap();

        assert!(validator.rows().next().is_none());
    }

    #[test]
    fn test_short_row_reports_count_mismatch() {
        let schema = create_test_schema();
        let reports = collect_reports(&schema, &[&["Ann", "0123456789"]]);

        assert_eq!(
            reports[0].error_messages,
            vec!["Unexpected number of fields: Expected 3, Got 2".to_string()]
        );
    }

    #[test]
    fn test_long_row_reports_count_mismatch() {
        let schema = create_test_schema();
        let reports = collect_reports(&schema, &[&["Ann", "0123456789", "blue", "extra"]]);

        assert_eq!(
            reports[0].error_messages,
            vec!["Unexpected number of fields: Expected 3, Got 4".to_string()]
        );
    }

    #[test]
    fn test_count_mismatch_does_not_short_circuit() {
        let schema = create_test_schema();
        let reports = collect_reports(&schema, &[&["Ann", "123"]]);

        assert_eq!(
            reports[0].error_messages,
            vec![
                "Unexpected number of fields: Expected 3, Got 2".to_string(),
                "Phone # must be 10 digits".to_string(),
            ]
        );
    }

    #[test]
    fn test_missing_required_value_skips_that_fields_rules() {
        let schema = create_test_schema();
        let reports = collect_reports(&schema, &[&["Ann", "", "blue"]]);

        // The phone rule would also fail on "", but a missing required value
        // is not rule-checked further.
        assert_eq!(
            reports[0].error_messages,
            vec!["Missing 'phone' value".to_string()]
        );
    }

    #[test]
    fn test_empty_optional_value_is_still_rule_checked() {
        let schema = create_test_schema();
        let reports = collect_reports(&schema, &[&["Ann", "0123456789", ""]]);

        assert_eq!(
            reports[0].error_messages,
            vec!["Color must have at least 3 letters".to_string()]
        );
    }

    #[test]
    fn test_rule_evaluation_is_exhaustive() {
        let schema = Schema::new()
            .add_field(
                FieldDef::new("code")
                    .rule("Code must be at least 4 characters", |v: &str| v.len() >= 4)
                    .rule("Code must be uppercase", |v: &str| {
                        v.chars().all(|c| c.is_ascii_uppercase())
                    }),
            )
            .add_row_rule("Row must contain an uppercase field", |fields: &[String]| {
                fields
                    .iter()
                    .any(|f| f.chars().any(|c| c.is_ascii_uppercase()))
            });

        let reports = collect_reports(&schema, &[&["ab"]]);

        assert_eq!(
            reports[0].error_messages,
            vec![
                "Code must be at least 4 characters".to_string(),
                "Code must be uppercase".to_string(),
                "Row must contain an uppercase field".to_string(),
            ]
        );
    }

    #[test]
    fn test_per_field_findings_keep_declaration_order() {
        let schema = Schema::new()
            .add_field(FieldDef::new("a").rule("A must be numeric", |v: &str| {
                v.chars().all(|c| c.is_ascii_digit())
            }))
            .add_field(FieldDef::new("b").required());

        let reports = collect_reports(&schema, &[&["x", ""]]);

        // Field a's rule finding comes before field b's missing-value finding.
        assert_eq!(
            reports[0].error_messages,
            vec![
                "A must be numeric".to_string(),
                "Missing 'b' value".to_string(),
            ]
        );
    }

    #[test]
    fn test_row_rules_receive_the_raw_field_sequence() {
        let schema = Schema::new()
            .add_field(FieldDef::new("a"))
            .add_field(FieldDef::new("b"))
            .add_field(FieldDef::new("c"))
            .add_row_rule("Row must carry all three fields", |fields: &[String]| {
                fields.len() == 3
            });

        let reports = collect_reports(&schema, &[&["only", "two"]]);

        assert_eq!(
            reports[0].error_messages,
            vec![
                "Unexpected number of fields: Expected 3, Got 2".to_string(),
                "Row must carry all three fields".to_string(),
            ]
        );
        assert_eq!(reports[0].fields, vec!["only".to_string(), "two".to_string()]);
    }

    #[test]
    fn test_allow_empty_rows() {
        let schema = Schema::new()
            .add_field(FieldDef::new("a").required())
            .add_row_rule("Row must be non-empty", |fields: &[String]| {
                !fields.is_empty()
            });

        let mut tolerant = RowValidator::new(&schema, MemorySource::new(vec![Vec::new()]))
            .allow_empty_rows(true);
        let report = tolerant.rows().next().unwrap().unwrap();
        assert!(report.is_valid);
        assert!(report.fields.is_empty());

        let mut strict = RowValidator::new(&schema, MemorySource::new(vec![Vec::new()]));
        let report = strict.rows().next().unwrap().unwrap();
        assert_eq!(
            report.error_messages,
            vec![
                "Unexpected number of fields: Expected 1, Got 0".to_string(),
                "Row must be non-empty".to_string(),
            ]
        );
    }

    struct CountingSource {
        inner: MemorySource,
        reads: Rc<Cell<usize>>,
    }

    impl RecordSource for CountingSource {
        fn read_record(&mut self) -> Result<Option<RawRecord>> {
            self.reads.set(self.reads.get() + 1);
            self.inner.read_record()
        }
    }

    #[test]
    fn test_records_are_pulled_lazily() {
        let schema = create_test_schema();
        let reads = Rc::new(Cell::new(0));
        let source = CountingSource {
            inner: MemorySource::new(rows_of(&[
                &["Ann", "0123456789", "blue"],
                &["Bob", "9876543210", "red"],
                &["Cal", "1112223334", "teal"],
            ])),
            reads: Rc::clone(&reads),
        };

        let mut validator = RowValidator::new(&schema, source);
        let mut stream = validator.rows();
        assert_eq!(reads.get(), 0);

        stream.next();
        assert_eq!(reads.get(), 1);

        stream.next();
        assert_eq!(reads.get(), 2);
    }

    struct FailingSource;

    impl RecordSource for FailingSource {
        fn read_record(&mut self) -> Result<Option<RawRecord>> {
            Err(Error::from_source(std::io::Error::other("disk on fire")))
        }
    }

    #[test]
    fn test_source_failure_is_yielded_as_an_error() {
        let schema = create_test_schema();
        let mut validator = RowValidator::new(&schema, FailingSource);

        let item = validator.rows().next().unwrap();
        assert!(matches!(item, Err(Error::Source(_))));
    }

    #[test]
    fn test_validate_record_directly() {
        let schema = create_test_schema();
        let validator = RowValidator::new(&schema, MemorySource::new(Vec::new()));

        let report = validator.validate_record(RawRecord::new(
            42,
            rows_of(&[&["Ann", "0123456789", "blue"]]).remove(0),
        ));

        assert_eq!(report.line_number, 42);
        assert!(report.is_valid);
    }

    #[test]
    fn test_header_mode_accessor_reflects_selection() {
        let schema = create_test_schema();
        let mut validator = RowValidator::new(&schema, MemorySource::new(Vec::new()));

        validator.set_header_mode(HeaderMode::Skip).unwrap();

        assert_eq!(validator.header_mode(), HeaderMode::Skip);
    }
}
