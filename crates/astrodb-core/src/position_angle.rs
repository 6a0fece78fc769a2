//! Position angles of double-star companions.

use std::{fmt, str::FromStr};

use crate::{
    FieldError,
    named::{NamedValue, parse_named, split_entries},
};

/// Position angle in whole degrees, either a single value or one per
/// component pair (`AB=45, AC=120`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PositionAngle {
    #[default]
    None,
    Single(u32),
    Named(Vec<NamedValue<u32>>),
}

impl PositionAngle {
    pub fn as_number(&self) -> Option<u32> {
        match self {
            Self::None => None,
            Self::Single(angle) => Some(*angle),
            Self::Named(values) => values.first().map(|named| *named.value()),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// Whole degrees with an optional trailing `°`. Fractions and stray text
/// are rejected rather than truncated.
fn parse_degrees(text: &str, field: &str) -> Result<u32, FieldError> {
    let text = text.trim();
    let digits = text.strip_suffix('°').unwrap_or(text).trim_end();
    if !digits.chars().any(|c| c.is_ascii_digit()) {
        return Err(FieldError::MissingNumber {
            field: field.to_string(),
        });
    }
    if digits.split_whitespace().count() > 1 {
        return Err(FieldError::TooManyValues {
            field: field.to_string(),
            max: 1,
        });
    }
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(FieldError::InvalidNumber {
            field: field.to_string(),
        });
    }
    digits.parse::<u32>().map_err(|_| FieldError::InvalidNumber {
        field: field.to_string(),
    })
}

impl FromStr for PositionAngle {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let field = s.trim();
        if field.is_empty() {
            return Ok(Self::None);
        }

        if field.contains('=') {
            return parse_named(field, |value| parse_degrees(value, field)).map(Self::Named);
        }

        match split_entries(field).as_slice() {
            [single] => parse_degrees(single, field).map(Self::Single),
            _ => Err(FieldError::InvalidKeyValue {
                field: field.to_string(),
            }),
        }
    }
}

impl fmt::Display for PositionAngle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => Ok(()),
            Self::Single(angle) => write!(f, "{angle}"),
            Self::Named(values) => {
                let parts: Vec<String> = values
                    .iter()
                    .map(|named| format!("{}={}", named.key(), named.value()))
                    .collect();
                f.write_str(&parts.join(", "))
            }
        }
    }
}
