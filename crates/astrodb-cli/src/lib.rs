//! CLI logic for the astrodb catalog tool.
//!
//! This module contains the core CLI logic: resolving the record files,
//! loading the catalog, running the query and writing the report.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, Mode};

use std::{
    fs,
    io::{self, Write},
    path::Path,
};

use log::{debug, info};

use astrodb::{AstroDbError, CatalogBuilder, Keyword, ReportMode, SourceFile};

/// Run the astrodb CLI application
///
/// Loads the objects, observations and programs files, filters the joined
/// catalog with the query and writes the report to the output file or
/// stdout. With `--keywords`, lists the query keywords instead.
///
/// # Errors
///
/// Returns `AstroDbError` for:
/// - File I/O errors
/// - Configuration loading errors, including a missing objects file
/// - Record file and query parsing errors
/// - Catalog integrity violations
/// - Report errors
pub fn run(args: &Args) -> Result<(), AstroDbError> {
    if args.keywords {
        return write_output(args.output.as_deref(), &keyword_listing());
    }

    let mut app_config = config::load_config(args.config.as_ref())?;
    if args.check_likely_duplicates {
        app_config = app_config.with_likely_duplicate_check();
    }

    let files = app_config.files();
    let objects_path = config::resolve_path(args.objects.as_deref(), files.objects(), "objects")?;
    let observations_path = config::resolve_path(
        args.observations.as_deref(),
        files.observations(),
        "observations",
    )?;
    let programs_path =
        config::resolve_path(args.programs.as_deref(), files.programs(), "programs")?;

    info!(
        objects = objects_path.display().to_string(),
        observations = observations_path.display().to_string(),
        programs = programs_path.display().to_string();
        "Reading record files"
    );
    let objects = read_source(&objects_path)?;
    let observations = read_source(&observations_path)?;
    let programs = read_source(&programs_path)?;

    let mode = args
        .mode
        .map(ReportMode::from)
        .unwrap_or_else(|| app_config.output().mode());
    let builder = CatalogBuilder::new(app_config);
    let catalog = builder.load(&objects, &observations, &programs)?;
    let filter = builder.query(args.query.as_deref().unwrap_or_default())?;
    let report = builder.report(&catalog, &filter, mode)?;

    write_output(args.output.as_deref(), &report)?;
    info!(mode = mode.to_string(); "Report complete");

    Ok(())
}

fn read_source(path: &Path) -> Result<SourceFile, AstroDbError> {
    let text = fs::read_to_string(path)
        .map_err(|err| io::Error::new(err.kind(), format!("{}: {err}", path.display())))?;
    debug!(path = path.display().to_string(), bytes = text.len(); "Read file");
    Ok(SourceFile::new(path.display().to_string(), text))
}

fn write_output(output: Option<&str>, text: &str) -> Result<(), AstroDbError> {
    match output {
        Some(path) => {
            fs::write(path, text)?;
            info!(output_file = path; "Output written");
        }
        None => io::stdout().lock().write_all(text.as_bytes())?,
    }
    Ok(())
}

/// One line per keyword: its two words, then an example clause.
pub fn keyword_listing() -> String {
    Keyword::ALL
        .iter()
        .map(|keyword| format!("{:<20}{}\n", keyword.to_string(), keyword.example()))
        .collect()
}
