//! Builtin field predicates
//!
//! Factories for the rule shapes that come up in most rulesets, usable as the
//! predicate argument of [`FieldDef::rule`](crate::FieldDef::rule). Anything
//! beyond these is an ordinary closure.

use chrono::NaiveDate;
use regex::Regex;

/// Value must have at least `min` characters.
#[must_use]
pub fn min_length(min: usize) -> impl Fn(&str) -> bool + Send + Sync {
    move |value: &str| value.chars().count() >= min
}

/// Value must have at most `max` characters.
#[must_use]
pub fn max_length(max: usize) -> impl Fn(&str) -> bool + Send + Sync {
    move |value: &str| value.chars().count() <= max
}

/// Value's character count must fall within `min..=max`.
#[must_use]
pub fn length_range(min: usize, max: usize) -> impl Fn(&str) -> bool + Send + Sync {
    move |value: &str| (min..=max).contains(&value.chars().count())
}

/// Value must match the given compiled pattern.
#[must_use]
pub fn matches(pattern: Regex) -> impl Fn(&str) -> bool + Send + Sync {
    move |value: &str| pattern.is_match(value)
}

/// Value must equal one of the given candidates.
#[must_use]
pub fn one_of<I, T>(values: I) -> impl Fn(&str) -> bool + Send + Sync
where
    I: IntoIterator<Item = T>,
    T: Into<String>,
{
    let values: Vec<String> = values.into_iter().map(Into::into).collect();
    move |value: &str| values.iter().any(|candidate| candidate == value)
}

/// Value must parse as a calendar date with the given `chrono` format string.
#[must_use]
pub fn date_format(format: impl Into<String>) -> impl Fn(&str) -> bool + Send + Sync {
    let format = format.into();
    move |value: &str| NaiveDate::parse_from_str(value, &format).is_ok()
}

/// Wrap a predicate so that empty values always pass.
///
/// Rules run on empty optional fields like on any other value; use this for
/// rules that should only constrain a value when one is present.
#[must_use]
pub fn if_present<P>(predicate: P) -> impl Fn(&str) -> bool + Send + Sync
where
    P: Fn(&str) -> bool + Send + Sync,
{
    move |value: &str| value.is_empty() || predicate(value)
}

/// Value parses as a 64-bit signed integer.
#[must_use]
pub fn is_integer(value: &str) -> bool {
    value.parse::<i64>().is_ok()
}

/// Value parses as a 64-bit float.
#[must_use]
pub fn is_decimal(value: &str) -> bool {
    value.parse::<f64>().is_ok()
}
