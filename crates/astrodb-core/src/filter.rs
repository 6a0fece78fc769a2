//! Conjunctive object filters.
//!
//! An [`ObjectFilter`] holds at most one value per criterion; a criterion
//! that is `None` is not applied. [`ObjectFilter::matches`] is the
//! conjunction of every configured criterion, so the default filter matches
//! everything.
//!
//! Numeric criteria follow an "unknown passes" rule: an object that lacks
//! the relevant value (no position, no magnitude, no size) is never rejected
//! by that criterion.

use crate::{
    constellation::Constellation, joined::JoinedObject, object_type::ObjectTypes,
    record::AstronomicalObject,
};

/// A right ascension interval in hours.
///
/// When `min > max` the interval wraps through 0h, so `23h to 2h` contains
/// both 23.5h and 1h.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaRange {
    min: f64,
    max: f64,
}

impl RaRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn min(self) -> f64 {
        self.min
    }

    pub fn max(self) -> f64 {
        self.max
    }

    pub fn wraps(self) -> bool {
        self.min > self.max
    }

    pub fn contains(self, ra: f64) -> bool {
        if self.wraps() {
            ra >= self.min || ra <= self.max
        } else {
            (self.min..=self.max).contains(&ra)
        }
    }
}

/// Criteria selecting catalog objects. Every field corresponds to one query
/// keyword.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectFilter {
    /// Exact match against any alias.
    pub name_is: Option<String>,
    /// Substring match against any alias.
    pub name_like: Option<String>,
    pub constellation_in: Option<Vec<Constellation>>,
    pub constellation_not_in: Option<Vec<Constellation>>,
    pub types_in: Option<ObjectTypes>,
    pub types_not_in: Option<ObjectTypes>,
    pub ra_range: Option<RaRange>,
    /// Degrees.
    pub dec_at_least: Option<f64>,
    /// Degrees.
    pub dec_at_most: Option<f64>,
    pub magnitude_at_most: Option<f64>,
    pub surface_brightness_at_most: Option<f64>,
    /// Arcminutes.
    pub size_at_least: Option<f64>,
    /// Arcminutes.
    pub size_at_most: Option<f64>,
    pub program_is: Option<String>,
    pub program_in: Option<Vec<String>>,
    pub program_like: Option<String>,
    pub checked_in_program: Option<bool>,
    pub seen: Option<bool>,
    /// `yyyy-mm-dd`; some observation strictly before.
    pub seen_before: Option<String>,
    /// `yyyy-mm-dd`; some observation strictly after.
    pub seen_after: Option<String>,
    /// `yyyy-mm-dd`; no observation strictly before.
    pub not_seen_before: Option<String>,
    /// `yyyy-mm-dd`; no observation strictly after.
    pub not_seen_after: Option<String>,
    pub num_programs_at_least: Option<usize>,
}

impl ObjectFilter {
    /// Whether no criterion is configured.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// The program the query is scoped to, if it names exactly one.
    pub fn program_name(&self) -> Option<&str> {
        self.program_is.as_deref()
    }

    pub fn matches(&self, joined: &JoinedObject) -> bool {
        let object = joined.object();
        self.matches_names(object)
            && self.matches_constellation(object)
            && self.matches_types(object)
            && self.matches_position(object)
            && self.matches_photometry(object)
            && self.matches_programs(joined)
            && self.matches_observations(joined)
    }

    fn matches_names(&self, object: &AstronomicalObject) -> bool {
        let names = object.names();
        let is = self
            .name_is
            .as_ref()
            .is_none_or(|name| names.iter().any(|n| n == name));
        let like = self
            .name_like
            .as_ref()
            .is_none_or(|fragment| names.iter().any(|n| n.contains(fragment.as_str())));
        is && like
    }

    fn matches_constellation(&self, object: &AstronomicalObject) -> bool {
        let constellation = object.constellation();
        let within = self
            .constellation_in
            .as_ref()
            .is_none_or(|wanted| constellation.is_some_and(|c| wanted.contains(&c)));
        let outside = self
            .constellation_not_in
            .as_ref()
            .is_none_or(|unwanted| constellation.is_some_and(|c| !unwanted.contains(&c)));
        within && outside
    }

    fn matches_types(&self, object: &AstronomicalObject) -> bool {
        let types = object.object_types();
        let within = self
            .types_in
            .as_ref()
            .is_none_or(|wanted| types.intersects(wanted));
        let outside = self
            .types_not_in
            .as_ref()
            .is_none_or(|unwanted| !types.intersects(unwanted));
        within && outside
    }

    fn matches_position(&self, object: &AstronomicalObject) -> bool {
        let ra = object.ra().map(|ra| ra.hours());
        let dec = object.dec().map(|dec| dec.degrees());

        passes(self.ra_range, ra, |range, ra| range.contains(ra))
            && passes(self.dec_at_least, dec, |bound, dec| dec >= bound)
            && passes(self.dec_at_most, dec, |bound, dec| dec <= bound)
    }

    fn matches_photometry(&self, object: &AstronomicalObject) -> bool {
        let magnitude = object.magnitude().as_number();
        let surface_brightness = object.surface_brightness();
        let size = object.size().as_number();

        passes(self.magnitude_at_most, magnitude, |bound, m| m <= bound)
            && passes(self.surface_brightness_at_most, surface_brightness, |bound, sb| sb <= bound)
            && passes(self.size_at_least, size, |bound, size| size >= bound)
            && passes(self.size_at_most, size, |bound, size| size <= bound)
    }

    fn matches_programs(&self, joined: &JoinedObject) -> bool {
        let programs = joined.programs();
        let is = self
            .program_is
            .as_ref()
            .is_none_or(|name| programs.iter().any(|p| p.program_name() == name));
        let within = self.program_in.as_ref().is_none_or(|names| {
            programs
                .iter()
                .any(|p| names.iter().any(|name| name == p.program_name()))
        });
        let like = self.program_like.as_ref().is_none_or(|fragment| {
            programs
                .iter()
                .any(|p| p.program_name().contains(fragment.as_str()))
        });
        let checked_in = self.checked_in_program.is_none_or(|flag| {
            let mut in_scope = programs.iter().filter(|p| {
                self.program_is
                    .as_deref()
                    .is_none_or(|name| p.program_name() == name)
            });
            in_scope.any(|p| p.is_checked_in()) == flag
        });
        let popular = self
            .num_programs_at_least
            .is_none_or(|minimum| joined.program_count() >= minimum);
        is && within && like && checked_in && popular
    }

    fn matches_observations(&self, joined: &JoinedObject) -> bool {
        let dates = || joined.observations().iter().map(|o| o.date());
        let seen = self.seen.is_none_or(|flag| joined.is_seen() == flag);
        let before = self
            .seen_before
            .as_ref()
            .is_none_or(|date| dates().any(|d| d < date.as_str()));
        let after = self
            .seen_after
            .as_ref()
            .is_none_or(|date| dates().any(|d| d > date.as_str()));
        let not_before = self
            .not_seen_before
            .as_ref()
            .is_none_or(|date| dates().all(|d| d >= date.as_str()));
        let not_after = self
            .not_seen_after
            .as_ref()
            .is_none_or(|date| dates().all(|d| d <= date.as_str()));
        seen && before && after && not_before && not_after
    }
}

/// Applies `check` when both the criterion and the object's value are
/// present; anything missing passes.
fn passes<B: Copy>(bound: Option<B>, value: Option<f64>, check: impl Fn(B, f64) -> bool) -> bool {
    match (bound, value) {
        (Some(bound), Some(value)) => check(bound, value),
        _ => true,
    }
}
