//! Labelled values used by multi-component fields.
//!
//! Double stars and multi-part objects record per-component values as
//! comma-separated `key=value` entries, e.g. `A=5.2, B=7.8`.

use crate::FieldError;

/// A single `key=value` entry from a multi-component field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedValue<T> {
    key: String,
    value: T,
}

impl<T> NamedValue<T> {
    pub fn new(key: impl Into<String>, value: T) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &T {
        &self.value
    }
}

/// Splits a comma-separated field into trimmed, non-empty entries.
pub(crate) fn split_entries(field: &str) -> Vec<&str> {
    field
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .collect()
}

/// Parses every entry of `field` as `key=value`, converting each value with
/// `parse_value`.
///
/// An entry without `=` or with an empty key fails with
/// [`FieldError::InvalidKeyValue`].
pub(crate) fn parse_named<T>(
    field: &str,
    mut parse_value: impl FnMut(&str) -> Result<T, FieldError>,
) -> Result<Vec<NamedValue<T>>, FieldError> {
    split_entries(field)
        .into_iter()
        .map(|entry| {
            let (key, value) = entry
                .split_once('=')
                .map(|(key, value)| (key.trim(), value.trim()))
                .filter(|(key, _)| !key.is_empty())
                .ok_or_else(|| FieldError::InvalidKeyValue {
                    field: field.to_string(),
                })?;
            Ok(NamedValue::new(key, parse_value(value)?))
        })
        .collect()
}
