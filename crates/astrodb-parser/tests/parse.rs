use std::sync::Arc;

use astrodb_core::{joined::JoinedObject, magnitude::Magnitude, object_type::ObjectType};
use astrodb_parser::{
    ParseError, error::ErrorCode, load_objects, load_observations, load_programs, parse_query,
};

const OBJECTS: &str = r#"# id	names	types	con	ra	dec	mag	size	sep	pa	class	dist	notes
M31	Andromeda Galaxy	Gal	And	0 42 44	41 16 9	3.4	190x60		35	Sb	2.5mly	
M33	Triangulum Galaxy	Gal	Tri	1 33 51	30 39 37	5.7	68x42		23	Sc	2.7mly	
M57	Ring Nebula	PN	Lyr	18 53 35	33 01 45	8.8	1.4'x1'			Ring	2.3kly	
NGC 7331		Gal	Peg	22 37 4	34 24 56	10.4	10.5x3.5		171	Sb	40mly	
Jupiter	Jupiter	Planet				-2.5						
"#;

const OBSERVATIONS: &str = "\
o1\t2018-01-10\tBackyard\t8\" Dob\t3/5\t4/5\tM31|M33\t21:00\t25mm\t48x\tNew\t
o2\t2019-09-02\tDark site\t8\" Dob\t4/5\t5/5\tM57\t23:10\t9mm\t133x\tFirst quarter\tsmoke ring
";

const PROGRAMS: &str = "\
Messier\t31\tM31\to1
Messier\t33\tM33\t
Messier\t57\tM57\to2
";

fn joined(query: &str) -> Vec<String> {
    let filter = parse_query(query).expect("Failed to parse query");
    let observations: Vec<_> = load_observations(OBSERVATIONS)
        .expect("Failed to load observations")
        .into_iter()
        .map(Arc::new)
        .collect();
    let programs: Vec<_> = load_programs(PROGRAMS)
        .expect("Failed to load programs")
        .into_iter()
        .map(Arc::new)
        .collect();

    load_objects(OBJECTS)
        .expect("Failed to load objects")
        .into_iter()
        .map(|object| {
            let seen = observations
                .iter()
                .filter(|o| o.object_ids().iter().any(|id| id == object.id()))
                .cloned()
                .collect();
            let listed = programs
                .iter()
                .filter(|p| p.object_id() == object.id())
                .cloned()
                .collect();
            JoinedObject::new(object, seen, listed)
        })
        .filter(|joined| filter.matches(joined))
        .map(|joined| joined.object().id().to_string())
        .collect()
}

#[test]
fn test_load_sample_files() {
    let objects = load_objects(OBJECTS).expect("Failed to load objects");
    assert_eq!(objects.len(), 5);

    let m57 = &objects[2];
    assert!(m57.object_types().contains(ObjectType::PlanetaryNebula));
    assert_eq!(m57.magnitude(), &Magnitude::Single(8.8));
    assert_eq!(m57.size().to_string(), "1.4' x 1'");
    assert_eq!(m57.line(), Some(4));

    let ngc7331 = &objects[3];
    assert!(ngc7331.names().is_empty());

    assert_eq!(load_observations(OBSERVATIONS).unwrap().len(), 2);
    assert_eq!(load_programs(PROGRAMS).unwrap().len(), 3);
}

#[test]
fn test_galaxies_brighter_than_ten() {
    assert_eq!(joined("type in gal mag <= 10"), vec!["M31", "M33"]);
}

#[test]
fn test_unknown_magnitude_passes() {
    assert_eq!(joined("mag <= -10 type in planet"), Vec::<String>::new());
    assert_eq!(joined("size <= 5"), vec!["M57", "Jupiter"]);
}

#[test]
fn test_observation_quantifiers() {
    assert_eq!(joined("seen = true"), vec!["M31", "M33", "M57"]);
    assert_eq!(joined("seen = false"), vec!["NGC 7331", "Jupiter"]);
    assert_eq!(joined("seen before 2018-06-01"), vec!["M31", "M33"]);
    assert_eq!(
        joined("notseen before 2018-06-01"),
        vec!["M57", "NGC 7331", "Jupiter"]
    );
}

#[test]
fn test_program_clauses() {
    assert_eq!(
        joined("program = Messier checkedinprogram = true"),
        vec!["M31", "M57"]
    );
    assert_eq!(
        joined("program = Messier checkedinprogram = false"),
        vec!["M33"]
    );
}

#[test]
fn test_ra_range_wraps_midnight() {
    assert_eq!(joined("ra range 22:00 to 1:00"), vec!["M31", "NGC 7331", "Jupiter"]);
}

#[test]
fn test_constellation_excludes_unplaced_objects() {
    assert_eq!(joined("con notin and,tri"), vec!["M57", "NGC 7331"]);
}

#[test]
fn test_record_errors_are_batched() {
    let broken = OBJECTS
        .replace("\tAnd\t", "\tAndr\t")
        .replace("\t5.7\t", "\tfaint\t");
    let err: ParseError = load_objects(&broken).unwrap_err();
    let codes: Vec<_> = err.diagnostics().iter().filter_map(|d| d.code()).collect();
    assert_eq!(codes, vec![ErrorCode::E201, ErrorCode::E201]);
}
