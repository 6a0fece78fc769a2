//! Objects joined with their observations and program memberships.

use std::sync::Arc;

use crate::record::{AstronomicalObject, ObservationRecord, ProgramEntry};

/// An object together with everything that references it.
///
/// Observations covering several objects are shared between the joined
/// objects through [`Arc`]. The summary accessors are for display only.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinedObject {
    object: AstronomicalObject,
    observations: Vec<Arc<ObservationRecord>>,
    programs: Vec<Arc<ProgramEntry>>,
}

impl JoinedObject {
    pub fn new(
        object: AstronomicalObject,
        observations: Vec<Arc<ObservationRecord>>,
        programs: Vec<Arc<ProgramEntry>>,
    ) -> Self {
        Self {
            object,
            observations,
            programs,
        }
    }

    pub fn object(&self) -> &AstronomicalObject {
        &self.object
    }

    /// Observations of this object, in observation-file order.
    pub fn observations(&self) -> &[Arc<ObservationRecord>] {
        &self.observations
    }

    /// Program entries targeting this object, in program-file order.
    pub fn programs(&self) -> &[Arc<ProgramEntry>] {
        &self.programs
    }

    pub fn is_seen(&self) -> bool {
        !self.observations.is_empty()
    }

    pub fn observation_count(&self) -> usize {
        self.observations.len()
    }

    pub fn program_count(&self) -> usize {
        self.programs.len()
    }

    /// Observation dates joined with `, `.
    pub fn observation_dates(&self) -> String {
        join(self.observations.iter().map(|o| o.date()))
    }

    /// Observation ids joined with `, `.
    pub fn observation_ids(&self) -> String {
        join(self.observations.iter().map(|o| o.id()))
    }

    /// Program names joined with `, `.
    pub fn program_names(&self) -> String {
        join(self.programs.iter().map(|p| p.program_name()))
    }
}

fn join<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    parts.collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item_number::ItemNumber;

    #[test]
    fn test_summaries() {
        let object =
            AstronomicalObject::new("Mars", vec!["Mars".into()], "Planet".parse().unwrap(), None)
                .unwrap();
        let observations = vec![
            Arc::new(ObservationRecord::new("o1", "2020-10-06", vec!["Mars".into()])),
            Arc::new(ObservationRecord::new("o2", "2022-12-08", vec!["Mars".into()])),
        ];
        let programs = vec![Arc::new(ProgramEntry::new(
            "Solar System",
            ItemNumber::new(4, ""),
            "Mars",
            Some("o1".into()),
        ))];
        let joined = JoinedObject::new(object, observations, programs);

        assert!(joined.is_seen());
        assert_eq!(joined.observation_count(), 2);
        assert_eq!(joined.program_count(), 1);
        assert_eq!(joined.observation_dates(), "2020-10-06, 2022-12-08");
        assert_eq!(joined.observation_ids(), "o1, o2");
        assert_eq!(joined.program_names(), "Solar System");
    }

    #[test]
    fn test_unreferenced_object() {
        let object =
            AstronomicalObject::new("Vesta", vec![], "Asteroid".parse().unwrap(), None).unwrap();
        let joined = JoinedObject::new(object, vec![], vec![]);
        assert!(!joined.is_seen());
        assert_eq!(joined.observation_dates(), "");
        assert_eq!(joined.program_names(), "");
    }
}
