//! Angular sizes and separations.
//!
//! Sizes are normalized to arcminutes and separations to arcseconds. Both
//! pick their display unit from the magnitude of the value so that a 2°
//! nebula prints as `2°` and a 30" planetary prints as `30"`.

use std::{fmt, str::FromStr};

use crate::{
    FieldError, format_number,
    named::{NamedValue, parse_named},
    numeric::{parse_run, unsigned_runs},
};

/// Units an angular field can be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AngularUnit {
    Degrees,
    ArcMinutes,
    ArcSeconds,
}

impl AngularUnit {
    /// Detects the unit from the field's trailing suffix.
    ///
    /// `"`, `''` and `s` mean arcseconds; `'` and `m` mean arcminutes; `°`,
    /// `d` and `deg` mean degrees. Anything else yields `default`.
    pub fn detect(field: &str, default: AngularUnit) -> AngularUnit {
        let suffix = field.trim().to_lowercase();
        if suffix.ends_with('"') || suffix.ends_with("''") || suffix.ends_with('s') {
            Self::ArcSeconds
        } else if suffix.ends_with('\'') || suffix.ends_with('m') {
            Self::ArcMinutes
        } else if suffix.ends_with('°') || suffix.ends_with('d') || suffix.ends_with("deg") {
            Self::Degrees
        } else {
            default
        }
    }

    /// Picks a display unit for a value given in arcminutes: degrees from
    /// 120' upwards, arcseconds below 1', arcminutes otherwise.
    pub fn best_for_arcminutes(arcminutes: f64) -> AngularUnit {
        if arcminutes >= 120.0 {
            Self::Degrees
        } else if arcminutes < 1.0 {
            Self::ArcSeconds
        } else {
            Self::ArcMinutes
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Degrees => "°",
            Self::ArcMinutes => "'",
            Self::ArcSeconds => "\"",
        }
    }

    fn arcseconds(self) -> f64 {
        match self {
            Self::Degrees => 3600.0,
            Self::ArcMinutes => 60.0,
            Self::ArcSeconds => 1.0,
        }
    }

    /// Converts `value` expressed in `self` into `target` units.
    pub fn convert(self, value: f64, target: AngularUnit) -> f64 {
        value * self.arcseconds() / target.arcseconds()
    }
}

fn format_angle(value: f64, stored: AngularUnit, display: AngularUnit) -> String {
    format!(
        "{}{}",
        format_number(stored.convert(value, display)),
        display.symbol()
    )
}

/// Angular extent of an object, in arcminutes.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Size {
    #[default]
    None,
    Diameter(f64),
    MajorMinor { major: f64, minor: f64 },
}

impl Size {
    const STORED: AngularUnit = AngularUnit::ArcMinutes;

    /// Diameter, or the geometric mean of the two axes.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::None => None,
            Self::Diameter(diameter) => Some(*diameter),
            Self::MajorMinor { major, minor } => Some((major * minor).sqrt()),
        }
    }

    /// Area in square arcminutes, treating the object as an ellipse.
    pub fn area(&self) -> Option<f64> {
        match self {
            Self::None => None,
            Self::Diameter(diameter) => Some(std::f64::consts::PI * (diameter / 2.0).powi(2)),
            Self::MajorMinor { major, minor } => {
                Some(std::f64::consts::PI * (major / 2.0) * (minor / 2.0))
            }
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl FromStr for Size {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let field = s.trim();
        if field.is_empty() {
            return Ok(Self::None);
        }

        let unit = AngularUnit::detect(field, Self::STORED);
        let to_stored = |run: &str| -> Result<f64, FieldError> {
            Ok(unit.convert(parse_run(run, field)?, Self::STORED))
        };
        match unsigned_runs(field).as_slice() {
            [] => Err(FieldError::MissingNumber {
                field: field.to_string(),
            }),
            [diameter] => Ok(Self::Diameter(to_stored(diameter)?)),
            [major, minor] => Ok(Self::MajorMinor {
                major: to_stored(major)?,
                minor: to_stored(minor)?,
            }),
            _ => Err(FieldError::TooManyValues {
                field: field.to_string(),
                max: 2,
            }),
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(mean) = self.as_number() else {
            return Ok(());
        };
        let display = AngularUnit::best_for_arcminutes(mean);
        match self {
            Self::None => Ok(()),
            Self::Diameter(diameter) => {
                f.write_str(&format_angle(*diameter, Self::STORED, display))
            }
            Self::MajorMinor { major, minor } => write!(
                f,
                "{} x {}",
                format_angle(*major, Self::STORED, display),
                format_angle(*minor, Self::STORED, display)
            ),
        }
    }
}

/// Separation between the components of a multiple star, in arcseconds.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Separation {
    #[default]
    None,
    Single(f64),
    Named(Vec<NamedValue<f64>>),
}

impl Separation {
    const STORED: AngularUnit = AngularUnit::ArcSeconds;

    /// The closest separation.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::None => None,
            Self::Single(value) => Some(*value),
            Self::Named(values) => values.iter().map(|named| *named.value()).reduce(f64::min),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    fn display_unit(&self) -> Option<AngularUnit> {
        let widest = match self {
            Self::None => return None,
            Self::Single(value) => *value,
            Self::Named(values) => values
                .iter()
                .map(|named| *named.value())
                .reduce(f64::max)?,
        };
        let arcminutes = Self::STORED.convert(widest, AngularUnit::ArcMinutes);
        Some(AngularUnit::best_for_arcminutes(arcminutes))
    }
}

impl FromStr for Separation {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let field = s.trim();
        if field.is_empty() {
            return Ok(Self::None);
        }

        let unit = AngularUnit::detect(field, Self::STORED);
        let to_stored = |run: &str| -> Result<f64, FieldError> {
            Ok(unit.convert(parse_run(run, field)?, Self::STORED))
        };

        if field.contains('=') {
            return parse_named(field, |value| match unsigned_runs(value).first() {
                Some(run) => to_stored(run),
                None => Err(FieldError::MissingNumber {
                    field: field.to_string(),
                }),
            })
            .map(Self::Named);
        }

        match unsigned_runs(field).as_slice() {
            [] => Err(FieldError::MissingNumber {
                field: field.to_string(),
            }),
            [single] => Ok(Self::Single(to_stored(single)?)),
            [first, second] => Ok(Self::Named(vec![
                NamedValue::new("1", to_stored(first)?),
                NamedValue::new("2", to_stored(second)?),
            ])),
            _ => Err(FieldError::TooManyValues {
                field: field.to_string(),
                max: 2,
            }),
        }
    }
}

impl fmt::Display for Separation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(display) = self.display_unit() else {
            return Ok(());
        };
        match self {
            Self::None => Ok(()),
            Self::Single(value) => f.write_str(&format_angle(*value, Self::STORED, display)),
            Self::Named(values) => {
                let parts: Vec<String> = values
                    .iter()
                    .map(|named| {
                        format!(
                            "{}={}",
                            named.key(),
                            format_angle(*named.value(), Self::STORED, display)
                        )
                    })
                    .collect();
                f.write_str(&parts.join(", "))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_detect_units() {
        let default = AngularUnit::ArcMinutes;
        assert_eq!(AngularUnit::detect("30\"", default), AngularUnit::ArcSeconds);
        assert_eq!(AngularUnit::detect("30''", default), AngularUnit::ArcSeconds);
        assert_eq!(AngularUnit::detect("30s", default), AngularUnit::ArcSeconds);
        assert_eq!(AngularUnit::detect("8'", default), AngularUnit::ArcMinutes);
        assert_eq!(AngularUnit::detect("8m", default), AngularUnit::ArcMinutes);
        assert_eq!(AngularUnit::detect("2°", default), AngularUnit::Degrees);
        assert_eq!(AngularUnit::detect("2d", default), AngularUnit::Degrees);
        assert_eq!(AngularUnit::detect("2 DEG", default), AngularUnit::Degrees);
        assert_eq!(
            AngularUnit::detect("12", AngularUnit::ArcSeconds),
            AngularUnit::ArcSeconds
        );
    }

    #[test]
    fn test_best_unit_bands() {
        assert_eq!(AngularUnit::best_for_arcminutes(120.0), AngularUnit::Degrees);
        assert_eq!(AngularUnit::best_for_arcminutes(119.9), AngularUnit::ArcMinutes);
        assert_eq!(AngularUnit::best_for_arcminutes(1.0), AngularUnit::ArcMinutes);
        assert_eq!(AngularUnit::best_for_arcminutes(0.99), AngularUnit::ArcSeconds);
    }

    #[test]
    fn test_size_defaults_to_arcminutes() {
        assert_eq!("8".parse::<Size>().unwrap(), Size::Diameter(8.0));
        assert_eq!("".parse::<Size>().unwrap(), Size::None);
    }

    #[test]
    fn test_size_units_normalized() {
        assert_eq!("2°".parse::<Size>().unwrap(), Size::Diameter(120.0));
        assert_eq!("30\"".parse::<Size>().unwrap(), Size::Diameter(0.5));
        assert_eq!(
            "17x10'".parse::<Size>().unwrap(),
            Size::MajorMinor {
                major: 17.0,
                minor: 10.0
            }
        );
    }

    #[test]
    fn test_size_as_number_is_geometric_mean() {
        let size: Size = "8 x 2".parse().unwrap();
        assert_approx_eq!(f64, size.as_number().unwrap(), 4.0, epsilon = 1e-9);
    }

    #[test]
    fn test_size_errors() {
        assert!(matches!(
            "large".parse::<Size>(),
            Err(FieldError::MissingNumber { .. })
        ));
        assert!(matches!(
            "1x2x3".parse::<Size>(),
            Err(FieldError::TooManyValues { max: 2, .. })
        ));
    }

    #[test]
    fn test_size_display_best_units() {
        assert_eq!(Size::Diameter(180.0).to_string(), "3°");
        assert_eq!(Size::Diameter(0.5).to_string(), "30\"");
        assert_eq!(Size::Diameter(8.5).to_string(), "8.5'");
        assert_eq!(
            Size::MajorMinor {
                major: 190.0,
                minor: 60.0
            }
            .to_string(),
            "190' x 60'"
        );
        assert_eq!(Size::None.to_string(), "");
    }

    #[test]
    fn test_size_display_round_trips() {
        for text in ["3°", "30\"", "8.5'", "17' x 10'"] {
            let size: Size = text.parse().unwrap();
            assert_eq!(size.to_string(), text);
        }
    }

    #[test]
    fn test_separation_defaults_to_arcseconds() {
        assert_eq!("12".parse::<Separation>().unwrap(), Separation::Single(12.0));
        assert_eq!("2'".parse::<Separation>().unwrap(), Separation::Single(120.0));
    }

    #[test]
    fn test_separation_named() {
        let separation: Separation = "AB=10\", AC=20\"".parse().unwrap();
        assert_eq!(
            separation,
            Separation::Named(vec![NamedValue::new("AB", 10.0), NamedValue::new("AC", 20.0)])
        );
        assert_eq!(separation.as_number(), Some(10.0));
        assert_eq!(separation.to_string(), "AB=10\", AC=20\"");
    }

    #[test]
    fn test_separation_two_runs_become_numbered_entries() {
        let separation: Separation = "2.5, 14".parse().unwrap();
        assert_eq!(
            separation,
            Separation::Named(vec![NamedValue::new("1", 2.5), NamedValue::new("2", 14.0)])
        );
    }

    #[test]
    fn test_separation_display_wide_pair() {
        assert_eq!(Separation::Single(150.0).to_string(), "2.5'");
        assert_eq!("2.5'".parse::<Separation>().unwrap(), Separation::Single(150.0));
    }

    fn arcminute_tenths() -> impl Strategy<Value = f64> {
        (10u32..1200).prop_map(|tenths| f64::from(tenths) / 10.0)
    }

    fn assert_size_survives_display(size: &Size) -> Result<(), TestCaseError> {
        let text = size.to_string();
        let reparsed: Size = text.parse().unwrap();
        prop_assert_eq!(reparsed.to_string(), text);
        let (before, after) = (size.as_number().unwrap(), reparsed.as_number().unwrap());
        prop_assert!((before - after).abs() <= 1e-9);
        Ok(())
    }

    proptest! {
        #[test]
        fn prop_arcminute_diameter_survives_display(arcminutes in arcminute_tenths()) {
            assert_size_survives_display(&Size::Diameter(arcminutes))?;
        }

        #[test]
        fn prop_degree_diameter_survives_display(degrees in 2u32..=30) {
            assert_size_survives_display(&Size::Diameter(f64::from(degrees) * 60.0))?;
        }

        #[test]
        fn prop_arcsecond_diameter_survives_display(arcseconds in 1u32..60) {
            assert_size_survives_display(&Size::Diameter(f64::from(arcseconds) / 60.0))?;
        }

        #[test]
        fn prop_axes_survive_display(a in arcminute_tenths(), b in arcminute_tenths()) {
            let size = Size::MajorMinor { major: a.max(b), minor: a.min(b) };
            assert_size_survives_display(&size)?;
        }

        #[test]
        fn prop_separation_survives_display(arcseconds in 1u32..60, other in 1u32..60) {
            let single = Separation::Single(f64::from(arcseconds));
            prop_assert_eq!(single.to_string().parse::<Separation>().unwrap(), single);

            let named = Separation::Named(vec![
                NamedValue::new("AB", f64::from(arcseconds)),
                NamedValue::new("AC", f64::from(other)),
            ]);
            prop_assert_eq!(named.to_string().parse::<Separation>().unwrap(), named);
        }
    }
}
