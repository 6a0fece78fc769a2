//! Sexagesimal coordinates.
//!
//! Right ascension is stored in decimal hours and declination in decimal
//! degrees. Both parse from any text containing up to three numeric runs
//! (`12:30:45`, `12h 30m 45s`, `-5° 30'`) and display in a fixed
//! base-60 notation.

use std::{fmt, str::FromStr};

use crate::{
    FieldError,
    numeric::{parse_run, signed_runs},
};

/// Parses a base-60 value from its numeric runs.
///
/// The first run is the whole part; each further run contributes its value
/// divided by successive powers of 60. The sign of the first run applies to
/// the whole value, so `-0 30` is `-0.5`.
///
/// # Errors
///
/// Returns [`FieldError::MissingNumber`] when the text contains no numeric
/// run, and [`FieldError::InvalidNumber`] when a run is malformed.
///
/// # Examples
///
/// ```
/// use astrodb_core::angle::parse_sexagesimal;
///
/// assert_eq!(parse_sexagesimal("12:30").unwrap(), 12.5);
/// assert_eq!(parse_sexagesimal("-0° 30'").unwrap(), -0.5);
/// ```
pub fn parse_sexagesimal(text: &str) -> Result<f64, FieldError> {
    let runs = signed_runs(text);
    let Some(first) = runs.first() else {
        return Err(FieldError::MissingNumber {
            field: text.to_string(),
        });
    };
    let negative = first.starts_with('-');

    let mut value = 0.0;
    let mut scale = 1.0;
    for run in &runs {
        value += parse_run(run, text)?.abs() * scale;
        scale /= 60.0;
    }

    Ok(if negative { -value } else { value })
}

/// Formats `value` as three zero-padded base-60 components rounded to the
/// nearest second, each followed by its unit symbol.
fn format_base60(f: &mut fmt::Formatter<'_>, value: f64, symbols: [&str; 3]) -> fmt::Result {
    let total_seconds = (value.abs() * 3600.0).round() as u64;
    let whole = total_seconds / 3600;
    let minutes = (total_seconds / 60) % 60;
    let seconds = total_seconds % 60;
    let sign = if value < 0.0 && total_seconds > 0 {
        "-"
    } else {
        ""
    };
    write!(
        f,
        "{sign}{whole:02}{} {minutes:02}{} {seconds:02}{}",
        symbols[0], symbols[1], symbols[2]
    )
}

/// Right ascension in decimal hours.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct RightAscension(f64);

impl RightAscension {
    pub fn from_hours(hours: f64) -> Self {
        Self(hours)
    }

    pub fn hours(self) -> f64 {
        self.0
    }
}

impl FromStr for RightAscension {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_sexagesimal(s).map(Self)
    }
}

impl fmt::Display for RightAscension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_base60(f, self.0, ["h", "m", "s"])
    }
}

/// Declination in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Declination(f64);

impl Declination {
    pub fn from_degrees(degrees: f64) -> Self {
        Self(degrees)
    }

    pub fn degrees(self) -> f64 {
        self.0
    }
}

impl FromStr for Declination {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_sexagesimal(s).map(Self)
    }
}

impl fmt::Display for Declination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_base60(f, self.0, ["°", "'", "\""])
    }
}
