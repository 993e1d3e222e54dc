//! Declarative ruleset files
//!
//! A ruleset file lists the expected fields in order, each with an optional
//! set of checks. Supported formats are YAML and JSON, chosen by file
//! extension.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use regex::Regex;
use serde::Deserialize;

use rowcheck_core::{FieldDef, Schema, rules};

#[derive(Debug, Deserialize)]
struct RulesetFile {
    fields: Vec<FieldEntry>,
}

#[derive(Debug, Deserialize)]
struct FieldEntry {
    name: String,
    #[serde(default)]
    required: bool,
    #[serde(default)]
    rules: Vec<RuleEntry>,
}

/// One check attached to a field, tagged by kind
#[derive(Debug, Deserialize)]
#[serde(tag = "check", rename_all = "kebab-case")]
enum RuleEntry {
    MinLength { message: String, min: usize },
    MaxLength { message: String, max: usize },
    Length { message: String, min: usize, max: usize },
    Pattern { message: String, pattern: String },
    OneOf { message: String, values: Vec<String> },
    Integer { message: String },
    Decimal { message: String },
    Date { message: String, format: String },
}

enum RulesetFormat {
    Yaml,
    Json,
}

/// Load a schema from a ruleset file.
///
/// # Errors
///
/// Returns an error for an unsupported extension, an unreadable file,
/// malformed YAML/JSON or an invalid pattern.
pub fn load_schema(path: &Path) -> Result<Schema> {
    let format = match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml" | "yml") => RulesetFormat::Yaml,
        Some("json") => RulesetFormat::Json,
        _ => bail!("unsupported ruleset extension (expected .yaml, .yml or .json)"),
    };

    let text = fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;

    let ruleset: RulesetFile = match format {
        RulesetFormat::Yaml => serde_yaml::from_str(&text).context("malformed YAML ruleset")?,
        RulesetFormat::Json => serde_json::from_str(&text).context("malformed JSON ruleset")?,
    };

    build_schema(ruleset)
}

fn build_schema(ruleset: RulesetFile) -> Result<Schema> {
    let mut schema = Schema::new();
    for entry in ruleset.fields {
        let mut field = FieldDef::new(entry.name);
        if entry.required {
            field = field.required();
        }
        for rule in entry.rules {
            field = apply_rule(field, rule)?;
        }
        schema = schema.add_field(field);
    }
    Ok(schema)
}

fn apply_rule(field: FieldDef, rule: RuleEntry) -> Result<FieldDef> {
    Ok(match rule {
        RuleEntry::MinLength { message, min } => field.rule(message, rules::min_length(min)),
        RuleEntry::MaxLength { message, max } => field.rule(message, rules::max_length(max)),
        RuleEntry::Length { message, min, max } => {
            field.rule(message, rules::length_range(min, max))
        }
        RuleEntry::Pattern { message, pattern } => {
            let regex = Regex::new(&pattern)
                .with_context(|| format!("invalid pattern for rule '{message}'"))?;
            field.rule(message, rules::matches(regex))
        }
        RuleEntry::OneOf { message, values } => field.rule(message, rules::one_of(values)),
        RuleEntry::Integer { message } => field.rule(message, rules::is_integer),
        RuleEntry::Decimal { message } => field.rule(message, rules::is_decimal),
        RuleEntry::Date { message, format } => field.rule(message, rules::date_format(format)),
    })
}
