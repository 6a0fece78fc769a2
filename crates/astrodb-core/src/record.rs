//! Catalog records.
//!
//! The three record kinds mirror the three source files: the objects
//! themselves, observing-log entries and observing-program checklists.
//! Records are immutable once built; the optional source line number is kept
//! so that catalog-level errors can point back at the input.

use crate::{
    FieldError,
    angle::{Declination, RightAscension},
    constellation::Constellation,
    distance::Distance,
    item_number::ItemNumber,
    magnitude::Magnitude,
    object_type::{LocationKind, ObjectTypes},
    position_angle::PositionAngle,
    size::{Separation, Size},
};

/// Normalizes an object id for comparison: lowercase with whitespace removed,
/// so `M 31`, `m31` and `M31` all collide.
pub fn normalize_id(id: &str) -> String {
    id.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Whether `text` is a `yyyy-mm-dd` date, the form that orders correctly as
/// text.
pub fn is_iso_date(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// Where a fixed-location object sits on the sky.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedLocation {
    constellation: Constellation,
    ra: RightAscension,
    dec: Declination,
}

impl FixedLocation {
    pub fn new(constellation: Constellation, ra: RightAscension, dec: Declination) -> Self {
        Self {
            constellation,
            ra,
            dec,
        }
    }

    pub fn constellation(&self) -> Constellation {
        self.constellation
    }

    pub fn ra(&self) -> RightAscension {
        self.ra
    }

    pub fn dec(&self) -> Declination {
        self.dec
    }
}

/// A catalog object.
///
/// Construction enforces the location invariant: an object has a
/// [`FixedLocation`] if and only if every one of its types is a
/// fixed-location type.
#[derive(Debug, Clone, PartialEq)]
pub struct AstronomicalObject {
    id: String,
    names: Vec<String>,
    object_types: ObjectTypes,
    location: Option<FixedLocation>,
    magnitude: Magnitude,
    size: Size,
    separation: Separation,
    position_angle: PositionAngle,
    object_class: String,
    distance: Distance,
    notes: String,
    line: Option<usize>,
}

impl AstronomicalObject {
    /// Creates an object with its identifying fields; the remaining
    /// attributes default to empty and are set with the `with_*` methods.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::LocationMismatch`] when the types mix fixed and
    /// moving objects, when fixed-location types lack a location, or when
    /// moving types are given one.
    pub fn new(
        id: impl Into<String>,
        names: Vec<String>,
        object_types: ObjectTypes,
        location: Option<FixedLocation>,
    ) -> Result<Self, FieldError> {
        let mismatch = |reason| FieldError::LocationMismatch {
            types: object_types.to_string(),
            reason,
        };
        match (object_types.location_kind(), &location) {
            (LocationKind::Mixed, _) => {
                return Err(mismatch("mixes fixed-location and moving types"));
            }
            (LocationKind::Fixed, None) => {
                return Err(mismatch("should have a constellation, RA and Dec"));
            }
            (LocationKind::Unfixed, Some(_)) => {
                return Err(mismatch("should not have a constellation, RA or Dec"));
            }
            _ => {}
        }

        Ok(Self {
            id: id.into(),
            names,
            object_types,
            location,
            magnitude: Magnitude::None,
            size: Size::None,
            separation: Separation::None,
            position_angle: PositionAngle::None,
            object_class: String::new(),
            distance: Distance::None,
            notes: String::new(),
            line: None,
        })
    }

    pub fn with_magnitude(mut self, magnitude: Magnitude) -> Self {
        self.magnitude = magnitude;
        self
    }

    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    pub fn with_separation(mut self, separation: Separation) -> Self {
        self.separation = separation;
        self
    }

    pub fn with_position_angle(mut self, position_angle: PositionAngle) -> Self {
        self.position_angle = position_angle;
        self
    }

    pub fn with_object_class(mut self, object_class: impl Into<String>) -> Self {
        self.object_class = object_class.into();
        self
    }

    pub fn with_distance(mut self, distance: Distance) -> Self {
        self.distance = distance;
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn normalized_id(&self) -> String {
        normalize_id(&self.id)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// The first alias, if any.
    pub fn primary_name(&self) -> Option<&str> {
        self.names.first().map(String::as_str)
    }

    pub fn object_types(&self) -> &ObjectTypes {
        &self.object_types
    }

    pub fn location(&self) -> Option<&FixedLocation> {
        self.location.as_ref()
    }

    pub fn constellation(&self) -> Option<Constellation> {
        self.location.map(|location| location.constellation)
    }

    pub fn ra(&self) -> Option<RightAscension> {
        self.location.map(|location| location.ra)
    }

    pub fn dec(&self) -> Option<Declination> {
        self.location.map(|location| location.dec)
    }

    pub fn magnitude(&self) -> &Magnitude {
        &self.magnitude
    }

    pub fn size(&self) -> &Size {
        &self.size
    }

    pub fn separation(&self) -> &Separation {
        &self.separation
    }

    pub fn position_angle(&self) -> &PositionAngle {
        &self.position_angle
    }

    pub fn object_class(&self) -> &str {
        &self.object_class
    }

    pub fn distance(&self) -> Distance {
        self.distance
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn line(&self) -> Option<usize> {
        self.line
    }

    /// Surface brightness in magnitudes per square arcminute.
    ///
    /// Only defined for a single-valued magnitude and a known size:
    /// `mag + 2.512 * log10(area)`, with the area of the ellipse spanned by
    /// the size's axes.
    pub fn surface_brightness(&self) -> Option<f64> {
        let Magnitude::Single(magnitude) = self.magnitude else {
            return None;
        };
        let area = self.size.area()?;
        Some(magnitude + 2.512 * area.log10())
    }
}

/// Free-text details of an observing session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionDetails {
    pub location: String,
    pub scope: String,
    pub seeing: String,
    pub transparency: String,
    pub time: String,
    pub eyepiece: String,
    pub magnification: String,
    pub lunar_phase: String,
    pub notes: String,
}

/// One entry of the observing log, covering one or more objects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservationRecord {
    id: String,
    date: String,
    object_ids: Vec<String>,
    details: SessionDetails,
    line: Option<usize>,
}

impl ObservationRecord {
    /// `date` is expected in `yyyy-mm-dd` form so that it orders correctly
    /// as text.
    pub fn new(id: impl Into<String>, date: impl Into<String>, object_ids: Vec<String>) -> Self {
        Self {
            id: id.into(),
            date: date.into(),
            object_ids,
            details: SessionDetails::default(),
            line: None,
        }
    }

    pub fn with_details(mut self, details: SessionDetails) -> Self {
        self.details = details;
        self
    }

    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn object_ids(&self) -> &[String] {
        &self.object_ids
    }

    pub fn details(&self) -> &SessionDetails {
        &self.details
    }

    pub fn line(&self) -> Option<usize> {
        self.line
    }
}

/// One item of an observing program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramEntry {
    program_name: String,
    item_number: ItemNumber,
    object_id: String,
    observation_id: Option<String>,
    line: Option<usize>,
}

impl ProgramEntry {
    /// An empty `observation_id` is stored as `None`.
    pub fn new(
        program_name: impl Into<String>,
        item_number: ItemNumber,
        object_id: impl Into<String>,
        observation_id: Option<String>,
    ) -> Self {
        Self {
            program_name: program_name.into(),
            item_number,
            object_id: object_id.into(),
            observation_id: observation_id.filter(|id| !id.trim().is_empty()),
            line: None,
        }
    }

    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    pub fn program_name(&self) -> &str {
        &self.program_name
    }

    pub fn item_number(&self) -> &ItemNumber {
        &self.item_number
    }

    pub fn object_id(&self) -> &str {
        &self.object_id
    }

    pub fn observation_id(&self) -> Option<&str> {
        self.observation_id.as_deref()
    }

    /// Whether the item has been observed.
    pub fn is_checked_in(&self) -> bool {
        self.observation_id.is_some()
    }

    pub fn line(&self) -> Option<usize> {
        self.line
    }
}
