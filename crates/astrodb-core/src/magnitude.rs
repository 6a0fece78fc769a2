//! Visual magnitudes.

use std::{fmt, str::FromStr};

use crate::{
    FieldError, format_number,
    named::{NamedValue, parse_named, split_entries},
    numeric::{first_signed_value, parse_run, range_ends, unsigned_runs},
};

/// An object's apparent magnitude.
///
/// Accepted forms:
///
/// | Text             | Value                          |
/// |------------------|--------------------------------|
/// | *(blank)*, `?`   | [`Magnitude::None`]            |
/// | `6.5`            | [`Magnitude::Single`]          |
/// | `6.5, 7.2`       | [`Magnitude::List`]            |
/// | `7.0-7.0`        | [`Magnitude::Single`]          |
/// | `6.5-7.2`        | [`Magnitude::Range`]           |
/// | `-2.9 - -1.6`    | [`Magnitude::Range`]           |
/// | `A=5.2, B=7.8`   | [`Magnitude::Named`]           |
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Magnitude {
    #[default]
    None,
    Single(f64),
    List(Vec<f64>),
    Range { min: f64, max: f64 },
    Named(Vec<NamedValue<f64>>),
}

impl Magnitude {
    /// The brightest value, used by magnitude filters.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::None => None,
            Self::Single(value) => Some(*value),
            Self::Range { min, .. } => Some(*min),
            Self::List(values) => minimum(values.iter().copied()),
            Self::Named(values) => minimum(values.iter().map(|named| *named.value())),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    fn range(low: f64, high: f64) -> Self {
        if low == high {
            Self::Single(low)
        } else {
            Self::Range {
                min: low.min(high),
                max: low.max(high),
            }
        }
    }
}

fn minimum(values: impl Iterator<Item = f64>) -> Option<f64> {
    values.reduce(f64::min)
}

/// At least one fractional digit, at most three.
fn format_magnitude(value: f64) -> String {
    let text = format_number(value);
    if text.contains('.') {
        text
    } else {
        format!("{text}.0")
    }
}

impl FromStr for Magnitude {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let field = s.trim();
        if field.is_empty() || field == "?" {
            return Ok(Self::None);
        }

        if field.contains('=') {
            return parse_named(field, first_signed_value).map(Self::Named);
        }

        if field.contains(',') {
            let entries = split_entries(field);
            if entries.len() > 2 {
                return Err(FieldError::TooManyValues {
                    field: field.to_string(),
                    max: 2,
                });
            }
            let values = entries
                .into_iter()
                .map(|entry| {
                    entry.parse::<f64>().map_err(|_| FieldError::InvalidNumber {
                        field: field.to_string(),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            return Ok(Self::List(values));
        }

        if let Some((low, high)) = range_ends(field) {
            return Ok(Self::range(parse_run(low, field)?, parse_run(high, field)?));
        }

        let runs = unsigned_runs(field);
        let sign = if field.starts_with('-') { -1.0 } else { 1.0 };
        match runs.as_slice() {
            [] => Err(FieldError::MissingNumber {
                field: field.to_string(),
            }),
            [value] => Ok(Self::Single(sign * parse_run(value, field)?)),
            [low, high] => Ok(Self::range(
                sign * parse_run(low, field)?,
                parse_run(high, field)?,
            )),
            _ => Err(FieldError::TooManyValues {
                field: field.to_string(),
                max: 2,
            }),
        }
    }
}

impl fmt::Display for Magnitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => Ok(()),
            Self::Single(value) => f.write_str(&format_magnitude(*value)),
            Self::Range { min, max } => write!(
                f,
                "{} - {}",
                format_magnitude(*min),
                format_magnitude(*max)
            ),
            Self::List(values) => {
                let parts: Vec<String> = values.iter().map(|v| format_magnitude(*v)).collect();
                f.write_str(&parts.join(", "))
            }
            Self::Named(values) => {
                let parts: Vec<String> = values
                    .iter()
                    .map(|named| format!("{}={}", named.key(), format_magnitude(*named.value())))
                    .collect();
                f.write_str(&parts.join(", "))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_parse_blank_and_unknown() {
        assert_eq!("".parse::<Magnitude>().unwrap(), Magnitude::None);
        assert_eq!("  ".parse::<Magnitude>().unwrap(), Magnitude::None);
        assert_eq!("?".parse::<Magnitude>().unwrap(), Magnitude::None);
    }

    #[test]
    fn test_parse_single() {
        assert_eq!("6.5".parse::<Magnitude>().unwrap(), Magnitude::Single(6.5));
        assert_eq!(
            "-1.46".parse::<Magnitude>().unwrap(),
            Magnitude::Single(-1.46)
        );
        assert_eq!(
            "~8.2v".parse::<Magnitude>().unwrap(),
            Magnitude::Single(8.2)
        );
    }

    #[test]
    fn test_parse_range() {
        let magnitude: Magnitude = "6.5-7.2".parse().unwrap();
        assert_eq!(magnitude, Magnitude::Range { min: 6.5, max: 7.2 });
        assert_eq!(magnitude.as_number(), Some(6.5));
        assert_eq!(magnitude.to_string(), "6.5 - 7.2");
    }

    #[test]
    fn test_parse_list() {
        let magnitude: Magnitude = "7.1, 6.4".parse().unwrap();
        assert_eq!(magnitude, Magnitude::List(vec![7.1, 6.4]));
        assert_eq!(magnitude.as_number(), Some(6.4));
        assert_eq!(magnitude.to_string(), "7.1, 6.4");
    }

    #[test]
    fn test_parse_range_with_negative_ends() {
        assert_eq!(
            "-2.9 - -1.6".parse::<Magnitude>().unwrap(),
            Magnitude::Range {
                min: -2.9,
                max: -1.6
            }
        );
        assert_eq!(
            "-1.5-2".parse::<Magnitude>().unwrap(),
            Magnitude::Range { min: -1.5, max: 2.0 }
        );
        assert_eq!(
            "-0.5 - -0.5".parse::<Magnitude>().unwrap(),
            Magnitude::Single(-0.5)
        );
    }

    #[test]
    fn test_equal_range_collapses_to_single() {
        assert_eq!("7-7".parse::<Magnitude>().unwrap(), Magnitude::Single(7.0));
    }

    #[test]
    fn test_three_plain_values_need_keys() {
        assert!(matches!(
            "7.1, 6.4, 9".parse::<Magnitude>(),
            Err(FieldError::TooManyValues { max: 2, .. })
        ));
    }

    #[test]
    fn test_parse_named() {
        let magnitude: Magnitude = "A=5.2, B=7.8".parse().unwrap();
        assert_eq!(
            magnitude,
            Magnitude::Named(vec![NamedValue::new("A", 5.2), NamedValue::new("B", 7.8)])
        );
        assert_eq!(magnitude.as_number(), Some(5.2));
        assert_eq!(magnitude.to_string(), "A=5.2, B=7.8");
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            "bright".parse::<Magnitude>(),
            Err(FieldError::MissingNumber { .. })
        ));
        assert!(matches!(
            "1 2 3".parse::<Magnitude>(),
            Err(FieldError::TooManyValues { max: 2, .. })
        ));
        assert!(matches!(
            "6.5, faint".parse::<Magnitude>(),
            Err(FieldError::InvalidNumber { .. })
        ));
        assert!(matches!(
            "A=5.2, B".parse::<Magnitude>(),
            Err(FieldError::InvalidKeyValue { .. })
        ));
    }

    #[test]
    fn test_display_round_trips() {
        for text in ["", "6.5", "10.25", "6.5 - 7.2", "7.1, 6.4", "A=5.2, B=7.8"] {
            let magnitude: Magnitude = text.parse().unwrap();
            assert_eq!(magnitude.to_string().parse::<Magnitude>().unwrap(), magnitude);
        }
    }

    fn tenths() -> impl Strategy<Value = f64> {
        (-300i32..2000).prop_map(|tenths| f64::from(tenths) / 10.0)
    }

    proptest! {
        #[test]
        fn prop_single_survives_display(value in tenths()) {
            let magnitude = Magnitude::Single(value);
            prop_assert_eq!(magnitude.to_string().parse::<Magnitude>().unwrap(), magnitude);
        }

        #[test]
        fn prop_range_survives_display(a in tenths(), b in tenths()) {
            prop_assume!(a != b);
            let magnitude = Magnitude::Range { min: a.min(b), max: a.max(b) };
            prop_assert_eq!(magnitude.to_string().parse::<Magnitude>().unwrap(), magnitude);
        }

        #[test]
        fn prop_pair_survives_display(a in tenths(), b in tenths()) {
            let magnitude = Magnitude::List(vec![a, b]);
            prop_assert_eq!(magnitude.to_string().parse::<Magnitude>().unwrap(), magnitude);
        }
    }
}
