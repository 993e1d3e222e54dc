//! Per-row validation outcomes

use serde::Serialize;

/// Outcome of validating one record.
///
/// Yielded once per data row, for valid and invalid rows alike; malformed
/// rows are never dropped. Owned entirely by the caller after being yielded,
/// with no back-reference to engine state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowReport {
    /// 1-based physical line the record starts on.
    pub line_number: u64,
    /// The row's raw field sequence, possibly length-mismatched.
    pub fields: Vec<String>,
    /// True iff `error_messages` is empty.
    pub is_valid: bool,
    /// Messages of every violated rule, in deterministic order: field-count
    /// mismatch first, then per-field findings in declaration order, then
    /// row-rule findings in declaration order.
    pub error_messages: Vec<String>,
}

impl RowReport {
    /// Assemble a report; validity is derived from the message list.
    pub fn new(line_number: u64, fields: Vec<String>, error_messages: Vec<String>) -> Self {
        Self {
            line_number,
            fields,
            is_valid: error_messages.is_empty(),
            error_messages,
        }
    }
}
