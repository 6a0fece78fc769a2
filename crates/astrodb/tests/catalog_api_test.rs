//! Integration tests for the CatalogBuilder API.

use astrodb::{
    AstroDbError, CatalogBuilder, ReportMode, SourceFile, Violation,
    config::{AppConfig, CatalogConfig, FilesConfig, OutputConfig},
};

const OBJECTS: &str = include_str!("../../../data/objects.tsv");
const OBSERVATIONS: &str = include_str!("../../../data/observations.tsv");
const PROGRAMS: &str = include_str!("../../../data/programs.tsv");

fn sources() -> (SourceFile, SourceFile, SourceFile) {
    (
        SourceFile::new("objects.tsv", OBJECTS),
        SourceFile::new("observations.tsv", OBSERVATIONS),
        SourceFile::new("programs.tsv", PROGRAMS),
    )
}

fn report(query: &str, mode: ReportMode) -> Result<String, AstroDbError> {
    let (objects, observations, programs) = sources();
    let builder = CatalogBuilder::default();
    let catalog = builder.load(&objects, &observations, &programs)?;
    let filter = builder.query(query)?;
    builder.report(&catalog, &filter, mode)
}

fn ids(report: &str) -> Vec<&str> {
    report
        .lines()
        .filter(|line| !line.starts_with('#'))
        .filter_map(|line| line.split('\t').next())
        .collect()
}

#[test]
fn test_load_sample_catalog() {
    let (objects, observations, programs) = sources();
    let catalog = CatalogBuilder::default()
        .load(&objects, &observations, &programs)
        .expect("Failed to load sample data");

    assert_eq!(catalog.len(), 13);
    assert_eq!(
        catalog.program_names().collect::<Vec<_>>(),
        vec!["Messier", "Double Stars", "Autumn Showpieces"]
    );

    let m31 = catalog.object("m 31").expect("M31 should be present");
    assert_eq!(m31.observation_dates(), "2018-01-10, 2021-11-05");
    assert_eq!(m31.program_names(), "Messier, Autumn Showpieces");
    assert!(!catalog.object("Jupiter").expect("Jupiter").is_seen());
}

#[test]
fn test_loading_twice_gives_the_same_catalog() {
    let (objects, observations, programs) = sources();
    let builder = CatalogBuilder::default();
    let first = builder.load(&objects, &observations, &programs).unwrap();
    let second = builder.load(&objects, &observations, &programs).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_observing_list_query() {
    let report = report("type in gal mag <= 9", ReportMode::ObservingList).unwrap();
    assert!(report.starts_with("# Id\tType\tCon\tRA\tDec"));
    assert_eq!(ids(&report), vec!["M32", "M31"]);
}

#[test]
fn test_program_list_query() {
    let report = report(
        "program = Messier checkedinprogram = false",
        ReportMode::ProgramList,
    )
    .unwrap();
    assert_eq!(ids(&report), vec!["1", "13"]);
}

#[test]
fn test_program_list_needs_program_clause() {
    let err = report("seen = true", ReportMode::ProgramList).unwrap_err();
    assert!(matches!(err, AstroDbError::Output(_)));
    assert!(err.to_string().contains("program ="));
}

#[test]
fn test_notseen_and_unknown_values() {
    let report = report("seen = false", ReportMode::MetaList).unwrap();
    assert_eq!(ids(&report), vec!["Jupiter", "M1", "M13", "NGC 7331"]);
}

#[test]
fn test_object_list_reloads() {
    let first = report("con in and,per,tau", ReportMode::ObjectList).unwrap();
    assert_eq!(ids(&first), vec!["M1", "M31", "M32", "M45", "NGC 869"]);

    let objects = SourceFile::new("report.tsv", first.clone());
    let empty = SourceFile::new("empty.tsv", "");
    let builder = CatalogBuilder::default();
    let reloaded = builder.load(&objects, &empty, &empty).unwrap();
    let filter = builder.query("").unwrap();
    let second = builder
        .report(&reloaded, &filter, ReportMode::ObjectList)
        .unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_integrity_violations_are_batched() {
    let objects = SourceFile::new(
        "objects.tsv",
        format!("{OBJECTS}m 31\t\tGal\tAnd\t1\t1\t\t\t\t\t\t\t\n"),
    );
    let observations = SourceFile::new(
        "observations.tsv",
        format!("{OBSERVATIONS}late\t2022-01-01\t\t\t\t\tM81\t\t\t\t\t\n"),
    );
    let programs = SourceFile::new("programs.tsv", format!("{PROGRAMS}Messier\t81\tM81\tnope\n"));

    let err = CatalogBuilder::default()
        .load(&objects, &observations, &programs)
        .unwrap_err();
    let AstroDbError::Catalog(err) = err else {
        panic!("expected a catalog error, got {err:?}");
    };
    let violations = err.violations();
    assert_eq!(violations.len(), 4);
    assert!(matches!(&violations[0], Violation::DuplicateObject { id, .. } if id == "M31"));
    assert!(
        violations
            .iter()
            .filter(|v| matches!(v, Violation::UnknownObject { id, .. } if id == "M81"))
            .count()
            == 2
    );
    assert!(
        violations
            .iter()
            .any(|v| matches!(v, Violation::UnknownObservation { id, .. } if id == "nope"))
    );
}

#[test]
fn test_likely_duplicates_from_config() {
    let objects = SourceFile::new(
        "objects.tsv",
        format!("{OBJECTS}NGC 1952\tCrab\tSNR\tTau\t5 34 32\t22 0 50\t\t\t\t\t\t\t\n"),
    );
    let (_, observations, programs) = sources();

    assert!(
        CatalogBuilder::default()
            .load(&objects, &observations, &programs)
            .is_ok()
    );

    let config = AppConfig::new(
        FilesConfig::default(),
        CatalogConfig::new(true),
        OutputConfig::default(),
    );
    let err = CatalogBuilder::new(config)
        .load(&objects, &observations, &programs)
        .unwrap_err();
    assert!(err.to_string().contains("M1, NGC 1952"));
}

#[test]
fn test_parse_errors_name_their_source() {
    let objects = SourceFile::new("broken.tsv", "M1\tCrab\n");
    let (_, observations, programs) = sources();
    let err = CatalogBuilder::default()
        .load(&objects, &observations, &programs)
        .unwrap_err();
    let AstroDbError::Parse { origin, err, .. } = err else {
        panic!("expected a parse error");
    };
    assert_eq!(origin, "broken.tsv");
    assert_eq!(err.diagnostics().len(), 1);

    let err = CatalogBuilder::default().query("mag <= bright").unwrap_err();
    assert!(matches!(err, AstroDbError::Parse { ref origin, .. } if origin == "query"));
}
