//! The query keyword table.
//!
//! Every clause starts with two words naming a [`Keyword`], such as
//! `mag <=` or `seen before`, followed by its value. `ra range` is the one
//! keyword that takes two values, written `ra range <from> to <to>`.

use std::fmt;

use thiserror::Error;

use astrodb_core::{
    FieldError,
    angle::parse_sexagesimal,
    constellation::Constellation,
    filter::{ObjectFilter, RaRange},
    object_type::ObjectTypes,
    record::is_iso_date,
    size::Size,
};

/// A clause value that cannot be read as what its keyword needs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValueError {
    #[error(transparent)]
    Field(#[from] FieldError),

    #[error("expected a number, found '{0}'")]
    Number(String),

    #[error("expected a whole number, found '{0}'")]
    Count(String),

    #[error("expected `true` or `false`, found '{0}'")]
    Bool(String),

    #[error("expected a date as yyyy-mm-dd, found '{0}'")]
    Date(String),

    #[error("expected a size, found an empty value")]
    EmptySize,

    #[error("expected at least one entry, found '{0}'")]
    EmptyList(String),
}

macro_rules! keywords {
    ($(
        $(#[$meta:meta])*
        $variant:ident => ($first:literal, $second:literal), $example:literal;
    )+) => {
        /// A query keyword: the pair of words that opens a clause.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Keyword {
            $($(#[$meta])* $variant),+
        }

        impl Keyword {
            /// Every keyword, in the order they are listed to users.
            pub const ALL: &'static [Keyword] = &[$(Keyword::$variant),+];

            /// The two words of the keyword, lowercase.
            pub fn words(self) -> (&'static str, &'static str) {
                match self {
                    $(Keyword::$variant => ($first, $second)),+
                }
            }

            /// A complete clause using this keyword.
            pub fn example(self) -> &'static str {
                match self {
                    $(Keyword::$variant => $example),+
                }
            }
        }
    };
}

keywords! {
    /// Exact match against any alias.
    NameIs => ("name", "="), "name = \"M 13\"";
    /// Substring match against any alias.
    NameLike => ("name", "like"), "name like \"M \"";
    ConstellationIn => ("con", "in"), "con in and,per";
    ConstellationNotIn => ("con", "notin"), "con notin and,per";
    TypeIn => ("type", "in"), "type in ast,gal";
    TypeNotIn => ("type", "notin"), "type notin oc,double";
    /// Wraps through 0h when the first value is larger.
    RaRange => ("ra", "range"), "ra range 23:00 to 2:00";
    DecAtMost => ("dec", "<="), "dec <= 80";
    DecAtLeast => ("dec", ">="), "dec >= -20";
    MagnitudeAtMost => ("mag", "<="), "mag <= 10";
    SurfaceBrightnessAtMost => ("sb", "<="), "sb <= 12";
    /// Arcminutes unless the value carries units.
    SizeAtMost => ("size", "<="), "size <= 10";
    SizeAtLeast => ("size", ">="), "size >= 1deg";
    ProgramIs => ("program", "="), "program = \"Messier OP\"";
    ProgramIn => ("program", "in"), "program in \"Messier OP\",\"Urban OP\"";
    ProgramLike => ("program", "like"), "program like RASC";
    CheckedInProgram => ("checkedinprogram", "="), "checkedinprogram = false";
    Seen => ("seen", "="), "seen = false";
    /// Some observation is before the date.
    SeenBefore => ("seen", "before"), "seen before 2018-01-15";
    /// Some observation is after the date.
    SeenAfter => ("seen", "after"), "seen after 2018-01-15";
    /// Every observation is on or after the date.
    NotSeenBefore => ("notseen", "before"), "notseen before 2018-01-15";
    /// Every observation is on or before the date.
    NotSeenAfter => ("notseen", "after"), "notseen after 2018-01-15";
    NumProgramsAtLeast => ("numprograms", ">="), "numprograms >= 3";
}

impl Keyword {
    /// Finds the keyword named by two words, ignoring case.
    pub fn lookup(first: &str, second: &str) -> Option<Keyword> {
        Self::ALL.iter().copied().find(|keyword| {
            let (a, b) = keyword.words();
            first.eq_ignore_ascii_case(a) && second.eq_ignore_ascii_case(b)
        })
    }

    /// Whether the clause takes `<from> to <to>` rather than one value.
    pub fn is_range(self) -> bool {
        matches!(self, Keyword::RaRange)
    }

    /// Sets the criterion this keyword stands for, replacing any earlier
    /// value for it.
    ///
    /// `values` holds one value, or two for a range.
    pub(crate) fn apply(self, filter: &mut ObjectFilter, values: &[&str]) -> Result<(), ValueError> {
        let value = values.first().copied().unwrap_or_default();
        match self {
            Keyword::NameIs => filter.name_is = Some(value.to_string()),
            Keyword::NameLike => filter.name_like = Some(value.to_string()),
            Keyword::ConstellationIn => filter.constellation_in = Some(constellations(value)?),
            Keyword::ConstellationNotIn => {
                filter.constellation_not_in = Some(constellations(value)?)
            }
            Keyword::TypeIn => filter.types_in = Some(value.parse::<ObjectTypes>()?),
            Keyword::TypeNotIn => filter.types_not_in = Some(value.parse::<ObjectTypes>()?),
            Keyword::RaRange => {
                let to = values.get(1).copied().unwrap_or_default();
                filter.ra_range = Some(RaRange::new(
                    parse_sexagesimal(value)?,
                    parse_sexagesimal(to)?,
                ));
            }
            Keyword::DecAtMost => filter.dec_at_most = Some(parse_sexagesimal(value)?),
            Keyword::DecAtLeast => filter.dec_at_least = Some(parse_sexagesimal(value)?),
            Keyword::MagnitudeAtMost => filter.magnitude_at_most = Some(number(value)?),
            Keyword::SurfaceBrightnessAtMost => {
                filter.surface_brightness_at_most = Some(number(value)?)
            }
            Keyword::SizeAtMost => filter.size_at_most = Some(size(value)?),
            Keyword::SizeAtLeast => filter.size_at_least = Some(size(value)?),
            Keyword::ProgramIs => filter.program_is = Some(value.to_string()),
            Keyword::ProgramIn => filter.program_in = Some(list(value)?),
            Keyword::ProgramLike => filter.program_like = Some(value.to_string()),
            Keyword::CheckedInProgram => filter.checked_in_program = Some(boolean(value)?),
            Keyword::Seen => filter.seen = Some(boolean(value)?),
            Keyword::SeenBefore => filter.seen_before = Some(date(value)?),
            Keyword::SeenAfter => filter.seen_after = Some(date(value)?),
            Keyword::NotSeenBefore => filter.not_seen_before = Some(date(value)?),
            Keyword::NotSeenAfter => filter.not_seen_after = Some(date(value)?),
            Keyword::NumProgramsAtLeast => {
                filter.num_programs_at_least = Some(
                    value
                        .trim()
                        .parse()
                        .map_err(|_| ValueError::Count(value.to_string()))?,
                )
            }
        }
        Ok(())
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (first, second) = self.words();
        write!(f, "{first} {second}")
    }
}

fn list(value: &str) -> Result<Vec<String>, ValueError> {
    let entries: Vec<String> = value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect();
    if entries.is_empty() {
        return Err(ValueError::EmptyList(value.to_string()));
    }
    Ok(entries)
}

fn constellations(value: &str) -> Result<Vec<Constellation>, ValueError> {
    list(value)?
        .iter()
        .map(|entry| entry.parse::<Constellation>().map_err(ValueError::from))
        .collect()
}

fn number(value: &str) -> Result<f64, ValueError> {
    value
        .trim()
        .parse()
        .map_err(|_| ValueError::Number(value.to_string()))
}

fn size(value: &str) -> Result<f64, ValueError> {
    value
        .parse::<Size>()?
        .as_number()
        .ok_or(ValueError::EmptySize)
}

fn boolean(value: &str) -> Result<bool, ValueError> {
    if value.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if value.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(ValueError::Bool(value.to_string()))
    }
}

fn date(value: &str) -> Result<String, ValueError> {
    let value = value.trim();
    if is_iso_date(value) {
        Ok(value.to_string())
    } else {
        Err(ValueError::Date(value.to_string()))
    }
}
