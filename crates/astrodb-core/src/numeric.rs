//! Numeric-run extraction and number formatting shared by the field parsers.
//!
//! Catalog fields mix numbers with separators and unit letters (`12h 30m`,
//! `-45° 20'`, `2.5deg`). The parsers ignore everything but the runs of
//! digits and decimal points, which this module extracts.

use std::sync::LazyLock;

use regex::Regex;

use crate::FieldError;

static SIGNED_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-?[0-9.]+").expect("signed run pattern is valid"));

static UNSIGNED_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9.]+").expect("unsigned run pattern is valid"));

static RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(-?[0-9.]+)\s*-\s*(-?[0-9.]+)$").expect("range pattern is valid")
});

/// Returns every `[-]?[0-9.]+` run in `field`, in order.
pub(crate) fn signed_runs(field: &str) -> Vec<&str> {
    SIGNED_RUN.find_iter(field).map(|m| m.as_str()).collect()
}

/// Returns every `[0-9.]+` run in `field`, in order.
pub(crate) fn unsigned_runs(field: &str) -> Vec<&str> {
    UNSIGNED_RUN.find_iter(field).map(|m| m.as_str()).collect()
}

/// Splits a `low - high` range whose ends may both be negative.
pub(crate) fn range_ends(field: &str) -> Option<(&str, &str)> {
    let captures = RANGE.captures(field)?;
    Some((captures.get(1)?.as_str(), captures.get(2)?.as_str()))
}

/// Parses a single extracted run, reporting `field` on failure.
///
/// A run such as `1.2.3` or a lone `.` matches the extraction pattern but is
/// not a number.
pub(crate) fn parse_run(run: &str, field: &str) -> Result<f64, FieldError> {
    run.parse::<f64>().map_err(|_| FieldError::InvalidNumber {
        field: field.to_string(),
    })
}

/// Parses the first signed run in `field`.
pub(crate) fn first_signed_value(field: &str) -> Result<f64, FieldError> {
    let run = SIGNED_RUN
        .find(field)
        .ok_or_else(|| FieldError::MissingNumber {
            field: field.to_string(),
        })?;
    parse_run(run.as_str(), field)
}

/// Formats a number with at most three fractional digits, dropping trailing
/// zeros.
///
/// # Examples
///
/// ```
/// use astrodb_core::format_number;
///
/// assert_eq!(format_number(2.5), "2.5");
/// assert_eq!(format_number(120.0), "120");
/// assert_eq!(format_number(0.33333), "0.333");
/// ```
pub fn format_number(value: f64) -> String {
    let mut text = format!("{value:.3}");
    if text.contains('.') {
        let trimmed_len = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(trimmed_len);
    }
    if text == "-0" {
        text.remove(0);
    }
    text
}
