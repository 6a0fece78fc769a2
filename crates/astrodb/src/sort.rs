//! Row orderings for the report writers.

use std::cmp::Ordering;

use astrodb_core::{joined::JoinedObject, record::normalize_id};

/// How report rows are ordered.
#[derive(Debug, Clone, PartialEq)]
pub enum SortOrder {
    /// Across the sky: by constellation centre RA, then by object RA.
    ///
    /// Both RAs are rotated so `start_hours` sorts first. Objects without
    /// a constellation follow, by id.
    Sky { start_hours: f64 },
    /// By item number within the named program. Objects without an entry
    /// in it follow, by id.
    ProgramItem(String),
    /// By normalized id.
    Id,
}

impl SortOrder {
    pub fn sort(&self, objects: &mut [&JoinedObject]) {
        match self {
            Self::Sky { start_hours } => objects.sort_by(|a, b| {
                compare_sky(a, b, *start_hours).then_with(|| compare_ids(a, b))
            }),
            Self::ProgramItem(program) => objects.sort_by(|a, b| {
                let item = |joined: &JoinedObject| {
                    joined
                        .programs()
                        .iter()
                        .find(|entry| entry.program_name() == program)
                        .map(|entry| entry.item_number().clone())
                };
                match (item(*a), item(*b)) {
                    (Some(x), Some(y)) => x.cmp(&y),
                    (Some(_), None) => Ordering::Less,
                    (None, Some(_)) => Ordering::Greater,
                    (None, None) => Ordering::Equal,
                }
                .then_with(|| compare_ids(a, b))
            }),
            Self::Id => objects.sort_by(|a, b| compare_ids(a, b)),
        }
    }
}

fn rotate(hours: f64, start: f64) -> f64 {
    (hours - start).rem_euclid(24.0)
}

fn compare_sky(a: &JoinedObject, b: &JoinedObject, start: f64) -> Ordering {
    let key = |joined: &JoinedObject| {
        let object = joined.object();
        let constellation = object.constellation()?;
        let ra = object.ra()?;
        Some((
            rotate(constellation.center_ra(), start),
            rotate(ra.hours(), start),
        ))
    };
    match (key(a), key(b)) {
        (Some((con_a, ra_a)), Some((con_b, ra_b))) => {
            con_a.total_cmp(&con_b).then(ra_a.total_cmp(&ra_b))
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn compare_ids(a: &JoinedObject, b: &JoinedObject) -> Ordering {
    normalize_id(a.object().id()).cmp(&normalize_id(b.object().id()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use astrodb_core::{
        constellation::Constellation,
        item_number::ItemNumber,
        record::{AstronomicalObject, FixedLocation, ProgramEntry},
    };

    use super::*;

    fn fixed(id: &str, constellation: Constellation, ra: &str) -> JoinedObject {
        let location = FixedLocation::new(constellation, ra.parse().unwrap(), "10".parse().unwrap());
        let object =
            AstronomicalObject::new(id, vec![], "OC".parse().unwrap(), Some(location)).unwrap();
        JoinedObject::new(object, vec![], vec![])
    }

    fn moving(id: &str) -> JoinedObject {
        let object = AstronomicalObject::new(id, vec![], "Planet".parse().unwrap(), None).unwrap();
        JoinedObject::new(object, vec![], vec![])
    }

    fn ids(objects: &[&JoinedObject]) -> Vec<String> {
        objects.iter().map(|o| o.object().id().to_string()).collect()
    }

    #[test]
    fn test_sky_order() {
        let cas = fixed("NGC 457", Constellation::Cassiopeia, "1 19");
        let peg = fixed("M15", Constellation::Pegasus, "21 30");
        let peg_west = fixed("NGC 7331", Constellation::Pegasus, "22 37");
        let mars = moving("Mars");
        let venus = moving("Venus");

        let mut objects = vec![&venus, &peg_west, &mars, &cas, &peg];
        SortOrder::Sky { start_hours: 0.0 }.sort(&mut objects);
        assert_eq!(
            ids(&objects),
            vec!["NGC 457", "M15", "NGC 7331", "Mars", "Venus"]
        );
    }

    #[test]
    fn test_sky_order_rotated_past_midnight() {
        let cas = fixed("NGC 457", Constellation::Cassiopeia, "1 19");
        let peg = fixed("M15", Constellation::Pegasus, "21 30");

        let mut objects = vec![&cas, &peg];
        SortOrder::Sky { start_hours: 20.0 }.sort(&mut objects);
        assert_eq!(ids(&objects), vec!["M15", "NGC 457"]);
    }

    #[test]
    fn test_program_item_order() {
        let entry = |item: u32, suffix: &str, id: &str| {
            Arc::new(ProgramEntry::new("Caldwell", ItemNumber::new(item, suffix), id, None))
        };
        let with_item = |id: &str, item: u32, suffix: &str| {
            let joined = fixed(id, Constellation::Cepheus, "22");
            JoinedObject::new(joined.object().clone(), vec![], vec![entry(item, suffix, id)])
        };
        let c10 = with_item("NGC 663", 10, "");
        let c2 = with_item("NGC 40", 2, "");
        let c2a = with_item("NGC 40b", 2, "a");
        let unlisted = fixed("IC 1396", Constellation::Cepheus, "21 39");

        let mut objects = vec![&unlisted, &c10, &c2a, &c2];
        SortOrder::ProgramItem("Caldwell".to_string()).sort(&mut objects);
        assert_eq!(ids(&objects), vec!["NGC 40", "NGC 40b", "NGC 663", "IC 1396"]);
    }

    #[test]
    fn test_id_order_ignores_case_and_spacing() {
        let a = moving("ngc 7000");
        let b = moving("M 31");
        let c = moving("m8");
        let mut objects = vec![&a, &b, &c];
        SortOrder::Id.sort(&mut objects);
        assert_eq!(ids(&objects), vec!["M 31", "m8", "ngc 7000"]);
    }
}
