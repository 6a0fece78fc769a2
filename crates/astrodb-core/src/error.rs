//! Errors raised while converting raw record fields into typed values.

use thiserror::Error;

/// A malformed record field.
///
/// Every variant carries the raw field text so that callers can point the
/// user at exactly what failed to parse. Parsers never coerce malformed input
/// into a default value; they return one of these instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("couldn't parse number in '{field}'")]
    InvalidNumber { field: String },

    #[error("expected a numeric value in '{field}'")]
    MissingNumber { field: String },

    #[error("too many values in '{field}'; expected at most {max}")]
    TooManyValues { field: String, max: usize },

    #[error("expected `key=value` entries in '{field}'")]
    InvalidKeyValue { field: String },

    #[error("unknown units in '{field}'; expected one of ly, kly, mly")]
    UnknownUnits { field: String },

    #[error("unknown constellation '{field}'")]
    UnknownConstellation { field: String },

    #[error("couldn't parse object type(s) '{field}'")]
    UnknownObjectType { field: String },

    #[error("item number '{field}' must be a number with an optional alphabetic suffix")]
    InvalidItemNumber { field: String },

    #[error("object of type '{types}' {reason}")]
    LocationMismatch { types: String, reason: &'static str },
}
