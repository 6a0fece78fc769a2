//! Distances in light years.

use std::{fmt, str::FromStr};

use crate::{
    FieldError, format_number,
    numeric::{parse_run, unsigned_runs},
};

const THOUSAND: f64 = 1_000.0;
const MILLION: f64 = 1_000_000.0;

/// Distance to an object, normalized to light years.
///
/// Parsed from a single number followed by `ly`, `kly` or `mly`
/// (case-insensitive). Displayed in the largest unit the value exceeds.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Distance {
    #[default]
    None,
    LightYears(f64),
}

impl Distance {
    pub fn light_years(self) -> Option<f64> {
        match self {
            Self::None => None,
            Self::LightYears(value) => Some(value),
        }
    }

    pub fn is_none(self) -> bool {
        matches!(self, Self::None)
    }
}

impl FromStr for Distance {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let field = s.trim();
        if field.is_empty() {
            return Ok(Self::None);
        }

        let lowered = field.to_lowercase();
        let multiplier = if lowered.ends_with("mly") {
            MILLION
        } else if lowered.ends_with("kly") {
            THOUSAND
        } else if lowered.ends_with("ly") {
            1.0
        } else {
            return Err(FieldError::UnknownUnits {
                field: field.to_string(),
            });
        };

        match unsigned_runs(field).as_slice() {
            [] => Err(FieldError::MissingNumber {
                field: field.to_string(),
            }),
            [value] => Ok(Self::LightYears(parse_run(value, field)? * multiplier)),
            _ => Err(FieldError::TooManyValues {
                field: field.to_string(),
                max: 1,
            }),
        }
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self::LightYears(value) = *self else {
            return Ok(());
        };
        if value > MILLION {
            write!(f, "{}mly", format_number(value / MILLION))
        } else if value > THOUSAND {
            write!(f, "{}kly", format_number(value / THOUSAND))
        } else {
            write!(f, "{}ly", format_number(value))
        }
    }
}
