//! Schema model: ordered field declarations and whole-row rules

use std::fmt;

/// Boxed predicate over a single field value.
pub type FieldPredicate = Box<dyn Fn(&str) -> bool + Send + Sync>;

/// Boxed predicate over a whole row's raw field sequence.
pub type RowPredicate = Box<dyn Fn(&[String]) -> bool + Send + Sync>;

/// A field-level rule: a predicate paired with the message reported when it fails.
pub struct FieldRule {
    message: String,
    predicate: FieldPredicate,
}

impl FieldRule {
    /// Create a rule from a failure message and a predicate.
    pub fn new(
        message: impl Into<String>,
        predicate: impl Fn(&str) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            predicate: Box::new(predicate),
        }
    }

    /// The message reported when the predicate fails.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Evaluate the predicate against a field value.
    #[must_use]
    pub fn check(&self, value: &str) -> bool {
        (self.predicate)(value)
    }
}

impl fmt::Debug for FieldRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRule")
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

/// A row-level rule: a predicate over the raw field sequence plus its failure message.
pub struct RowRule {
    message: String,
    predicate: RowPredicate,
}

impl RowRule {
    /// Create a rule from a failure message and a predicate.
    pub fn new(
        message: impl Into<String>,
        predicate: impl Fn(&[String]) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            predicate: Box::new(predicate),
        }
    }

    /// The message reported when the predicate fails.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Evaluate the predicate against a row's field sequence.
    #[must_use]
    pub fn check(&self, fields: &[String]) -> bool {
        (self.predicate)(fields)
    }
}

impl fmt::Debug for RowRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowRule")
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

/// Declaration of one positional field.
///
/// The declaration index in the [`Schema`] binds to the same field index in
/// each row; `name` appears only in error text and is independent of any
/// header text the file itself may carry.
#[derive(Debug)]
pub struct FieldDef {
    name: String,
    required: bool,
    rules: Vec<FieldRule>,
}

impl FieldDef {
    /// Create a declaration for an optional field with no rules.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: false,
            rules: Vec::new(),
        }
    }

    /// Mark the field as required (an empty value is reported as missing).
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Attach a rule; rules are evaluated in the order they were attached.
    #[must_use]
    pub fn rule(
        mut self,
        message: impl Into<String>,
        predicate: impl Fn(&str) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.rules.push(FieldRule::new(message, predicate));
        self
    }

    /// The field's name as used in error messages.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether an empty value is reported as missing.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// The field's rules in evaluation order.
    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }
}

/// Ordered field declarations plus whole-row rules.
///
/// A schema is plain configuration: constructed once via the builder methods,
/// then only read. Validation runs borrow it immutably, so independent runs
/// over the same schema never interfere.
#[derive(Debug, Default)]
pub struct Schema {
    fields: Vec<FieldDef>,
    row_rules: Vec<RowRule>,
}

impl Schema {
    /// Create an empty schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field declaration; declaration order is positional order.
    #[must_use]
    pub fn add_field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }

    /// Append a row rule; row rules are evaluated in the order they were added.
    #[must_use]
    pub fn add_row_rule(
        mut self,
        message: impl Into<String>,
        predicate: impl Fn(&[String]) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.row_rules.push(RowRule::new(message, predicate));
        self
    }

    /// The field declarations in positional order.
    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    /// The row rules in evaluation order.
    pub fn row_rules(&self) -> &[RowRule] {
        &self.row_rules
    }

    /// Number of declared fields.
    #[must_use]
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }
}
