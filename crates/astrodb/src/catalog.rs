//! The catalog: objects indexed by id and joined with their observations
//! and program entries.
//!
//! [`Catalog::new`] checks referential integrity before building anything.
//! Every violation found is collected into one [`CatalogError`], so a run
//! over broken files reports all of them at once.

use std::{collections::HashMap, fmt, sync::Arc};

use indexmap::IndexMap;
use log::debug;
use thiserror::Error;

use astrodb_core::{
    filter::ObjectFilter,
    joined::JoinedObject,
    record::{AstronomicalObject, ObservationRecord, ProgramEntry, normalize_id},
};

/// Source line numbers, printed as `3, 17`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lines(pub Vec<usize>);

impl Lines {
    fn of(lines: impl IntoIterator<Item = Option<usize>>) -> Self {
        Self(lines.into_iter().flatten().collect())
    }
}

impl fmt::Display for Lines {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("unknown lines");
        }
        let lines: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "lines {}", lines.join(", "))
    }
}

/// One integrity problem between the record files.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("object id '{id}' is defined more than once ({lines})")]
    DuplicateObject { id: String, lines: Lines },

    #[error("observation id '{id}' is defined more than once ({lines})")]
    DuplicateObservation { id: String, lines: Lines },

    #[error("program '{program}' lists object '{object_id}' more than once ({lines})")]
    DuplicateProgramItem {
        program: String,
        object_id: String,
        lines: Lines,
    },

    #[error("{referrer} refers to unknown object '{id}'{}", at_line(.line))]
    UnknownObject {
        id: String,
        referrer: String,
        line: Option<usize>,
    },

    #[error("program '{program}' refers to unknown observation '{id}'{}", at_line(.line))]
    UnknownObservation {
        id: String,
        program: String,
        line: Option<usize>,
    },

    #[error("objects {} share a position and are likely duplicates ({lines})", .ids.join(", "))]
    LikelyDuplicates { ids: Vec<String>, lines: Lines },
}

fn at_line(line: &Option<usize>) -> String {
    line.map(|line| format!(" on line {line}"))
        .unwrap_or_default()
}

/// Every integrity violation found while building a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", describe(.violations))]
pub struct CatalogError {
    violations: Vec<Violation>,
}

impl CatalogError {
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }
}

fn describe(violations: &[Violation]) -> String {
    let mut text = format!("{} catalog integrity violation(s)", violations.len());
    for violation in violations {
        text.push_str("\n  ");
        text.push_str(&violation.to_string());
    }
    text
}

/// An immutable, joined view of the three record files.
///
/// Objects are keyed by their normalized id and kept in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    objects: IndexMap<String, JoinedObject>,
    observations: IndexMap<String, Arc<ObservationRecord>>,
    programs: IndexMap<String, Vec<Arc<ProgramEntry>>>,
}

impl Catalog {
    /// Index, validate and join the records.
    ///
    /// References from observations and program entries resolve against
    /// normalized object ids. With `check_likely_duplicates`, objects whose
    /// RA and Dec fall in the same arcminute cell are also reported.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] listing every violation when any record
    /// is duplicated or refers to something that does not exist.
    pub fn new(
        objects: Vec<AstronomicalObject>,
        observations: Vec<ObservationRecord>,
        programs: Vec<ProgramEntry>,
        check_likely_duplicates: bool,
    ) -> Result<Self, CatalogError> {
        let mut violations = Vec::new();

        let mut by_id: IndexMap<String, Vec<AstronomicalObject>> = IndexMap::new();
        for object in objects {
            by_id.entry(object.normalized_id()).or_default().push(object);
        }
        for group in by_id.values().filter(|group| group.len() > 1) {
            violations.push(Violation::DuplicateObject {
                id: group[0].id().to_string(),
                lines: Lines::of(group.iter().map(AstronomicalObject::line)),
            });
        }

        let mut observations_by_id: IndexMap<String, Vec<ObservationRecord>> = IndexMap::new();
        for observation in observations {
            observations_by_id
                .entry(observation.id().to_string())
                .or_default()
                .push(observation);
        }
        for (id, group) in observations_by_id.iter().filter(|(_, group)| group.len() > 1) {
            violations.push(Violation::DuplicateObservation {
                id: id.clone(),
                lines: Lines::of(group.iter().map(ObservationRecord::line)),
            });
        }

        let mut program_items: IndexMap<(&str, String), (&str, Vec<Option<usize>>)> =
            IndexMap::new();
        for entry in &programs {
            program_items
                .entry((entry.program_name(), normalize_id(entry.object_id())))
                .or_insert_with(|| (entry.object_id(), Vec::new()))
                .1
                .push(entry.line());
        }
        for ((program, _), (object_id, lines)) in program_items
            .iter()
            .filter(|(_, (_, lines))| lines.len() > 1)
        {
            violations.push(Violation::DuplicateProgramItem {
                program: program.to_string(),
                object_id: object_id.to_string(),
                lines: Lines::of(lines.iter().copied()),
            });
        }

        for observation in observations_by_id.values().flatten() {
            for id in observation.object_ids() {
                if !by_id.contains_key(&normalize_id(id)) {
                    violations.push(Violation::UnknownObject {
                        id: id.clone(),
                        referrer: format!("observation '{}'", observation.id()),
                        line: observation.line(),
                    });
                }
            }
        }
        for entry in &programs {
            if !by_id.contains_key(&normalize_id(entry.object_id())) {
                violations.push(Violation::UnknownObject {
                    id: entry.object_id().to_string(),
                    referrer: format!("program '{}'", entry.program_name()),
                    line: entry.line(),
                });
            }
            if let Some(id) = entry.observation_id() {
                if !observations_by_id.contains_key(id) {
                    violations.push(Violation::UnknownObservation {
                        id: id.to_string(),
                        program: entry.program_name().to_string(),
                        line: entry.line(),
                    });
                }
            }
        }

        if check_likely_duplicates {
            violations.extend(likely_duplicates(by_id.values().flatten()));
        }

        if !violations.is_empty() {
            return Err(CatalogError { violations });
        }

        let observations: IndexMap<String, Arc<ObservationRecord>> = observations_by_id
            .into_iter()
            .filter_map(|(id, mut group)| group.pop().map(|o| (id, Arc::new(o))))
            .collect();

        let mut seen_in: HashMap<String, Vec<Arc<ObservationRecord>>> = HashMap::new();
        for observation in observations.values() {
            for id in observation.object_ids() {
                let list = seen_in.entry(normalize_id(id)).or_default();
                if !list.iter().any(|o| Arc::ptr_eq(o, observation)) {
                    list.push(Arc::clone(observation));
                }
            }
        }

        let mut grouped: IndexMap<String, Vec<Arc<ProgramEntry>>> = IndexMap::new();
        let mut listed_in: HashMap<String, Vec<Arc<ProgramEntry>>> = HashMap::new();
        for entry in programs.into_iter().map(Arc::new) {
            listed_in
                .entry(normalize_id(entry.object_id()))
                .or_default()
                .push(Arc::clone(&entry));
            grouped
                .entry(entry.program_name().to_string())
                .or_default()
                .push(entry);
        }

        let objects: IndexMap<String, JoinedObject> = by_id
            .into_iter()
            .filter_map(|(key, mut group)| {
                let object = group.pop()?;
                let observations = seen_in.remove(&key).unwrap_or_default();
                let programs = listed_in.remove(&key).unwrap_or_default();
                Some((key, JoinedObject::new(object, observations, programs)))
            })
            .collect();

        debug!(
            objects = objects.len(),
            observations = observations.len(),
            programs = grouped.len();
            "Built catalog"
        );

        Ok(Self {
            objects,
            observations,
            programs: grouped,
        })
    }

    /// Objects in file order.
    pub fn objects(&self) -> impl Iterator<Item = &JoinedObject> {
        self.objects.values()
    }

    /// Look an object up by id, ignoring case and whitespace.
    pub fn object(&self, id: &str) -> Option<&JoinedObject> {
        self.objects.get(&normalize_id(id))
    }

    pub fn observation(&self, id: &str) -> Option<&ObservationRecord> {
        self.observations.get(id).map(Arc::as_ref)
    }

    pub fn observations(&self) -> impl Iterator<Item = &ObservationRecord> {
        self.observations.values().map(Arc::as_ref)
    }

    /// Entries of one program, in file order.
    pub fn program(&self, name: &str) -> Option<&[Arc<ProgramEntry>]> {
        self.programs.get(name).map(Vec::as_slice)
    }

    pub fn program_names(&self) -> impl Iterator<Item = &str> {
        self.programs.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Objects matching `filter`, in file order.
    pub fn filter(&self, filter: &ObjectFilter) -> Vec<&JoinedObject> {
        self.objects().filter(|joined| filter.matches(joined)).collect()
    }
}

/// Fixed-location objects grouped by RA and Dec rounded to the arcminute.
/// One hour of RA spans 900 arcminutes.
fn likely_duplicates<'a>(objects: impl Iterator<Item = &'a AstronomicalObject>) -> Vec<Violation> {
    let mut cells: IndexMap<(i64, i64), Vec<&AstronomicalObject>> = IndexMap::new();
    for object in objects {
        let (Some(ra), Some(dec)) = (object.ra(), object.dec()) else {
            continue;
        };
        let cell = (
            (ra.hours() * 900.0).round() as i64,
            (dec.degrees() * 60.0).round() as i64,
        );
        cells.entry(cell).or_default().push(object);
    }

    cells
        .into_values()
        .filter(|group| group.len() > 1)
        .map(|group| Violation::LikelyDuplicates {
            ids: group.iter().map(|o| o.id().to_string()).collect(),
            lines: Lines::of(group.iter().map(|o| o.line())),
        })
        .collect()
}
