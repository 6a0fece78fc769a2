//! Astrodb - a personal catalog of astronomical objects, observations and
//! observing programs.
//!
//! Loads three tab-separated record files, joins them into a [`Catalog`],
//! filters it with a small query language and writes tab-separated reports.

pub mod catalog;
pub mod config;

mod error;
mod export;
mod sort;

pub use astrodb_core::{
    angle, constellation, distance, filter, item_number, joined, magnitude, object_type,
    position_angle, record, size,
};
pub use astrodb_parser::Keyword;

pub use catalog::{Catalog, CatalogError, Violation};
pub use error::AstroDbError;
pub use export::ReportMode;

use log::{debug, info, trace};

use astrodb_core::filter::ObjectFilter;
use astrodb_parser::ParseError;

use config::AppConfig;
use export::{Exporter, tsv::TsvExporter};

/// Text of one input, named by where it came from.
///
/// The name appears in error reports next to the offending line.
#[derive(Debug, Clone)]
pub struct SourceFile {
    name: String,
    text: String,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Builder for loading, querying and reporting on a catalog.
///
/// # Examples
///
/// ```rust,no_run
/// use astrodb::{CatalogBuilder, ReportMode, SourceFile, config::AppConfig};
///
/// let objects = SourceFile::new("objects.tsv", std::fs::read_to_string("objects.tsv").unwrap());
/// let observations = SourceFile::new("observations.tsv", "");
/// let programs = SourceFile::new("programs.tsv", "");
///
/// let builder = CatalogBuilder::new(AppConfig::default());
/// let catalog = builder
///     .load(&objects, &observations, &programs)
///     .expect("Failed to load");
///
/// let filter = builder.query("type in gal mag <= 9").expect("Failed to parse");
/// let report = builder
///     .report(&catalog, &filter, ReportMode::ObservingList)
///     .expect("Failed to write report");
/// print!("{report}");
/// ```
#[derive(Default)]
pub struct CatalogBuilder {
    config: AppConfig,
}

impl CatalogBuilder {
    /// Create a new catalog builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse the three record files and join them into a catalog.
    ///
    /// # Errors
    ///
    /// Returns `AstroDbError::Parse` with every line error of the first
    /// file that fails to load, or `AstroDbError::Catalog` with every
    /// integrity violation between the files.
    pub fn load(
        &self,
        objects: &SourceFile,
        observations: &SourceFile,
        programs: &SourceFile,
    ) -> Result<Catalog, AstroDbError> {
        info!(
            objects = objects.name(),
            observations = observations.name(),
            programs = programs.name();
            "Loading catalog"
        );

        let object_records =
            astrodb_parser::load_objects(objects.text()).map_err(parse_error(objects))?;
        let observation_records = astrodb_parser::load_observations(observations.text())
            .map_err(parse_error(observations))?;
        let program_records =
            astrodb_parser::load_programs(programs.text()).map_err(parse_error(programs))?;

        let catalog = Catalog::new(
            object_records,
            observation_records,
            program_records,
            self.config.catalog().check_likely_duplicates(),
        )?;

        info!(objects = catalog.len(); "Catalog ready");
        Ok(catalog)
    }

    /// Parse query text into a filter.
    ///
    /// # Errors
    ///
    /// Returns `AstroDbError::Parse` describing every problem in the query.
    pub fn query(&self, source: &str) -> Result<ObjectFilter, AstroDbError> {
        debug!(query = source; "Parsing query");

        let filter = astrodb_parser::parse_query(source)
            .map_err(|err| AstroDbError::new_parse_error(err, source, "query"))?;

        trace!(filter:?; "Parsed query");
        Ok(filter)
    }

    /// Write the objects matching `filter` as a tab-separated report.
    ///
    /// # Errors
    ///
    /// Returns `AstroDbError::Output` when the report cannot be produced,
    /// such as a program list without a `program =` clause.
    pub fn report(
        &self,
        catalog: &Catalog,
        filter: &ObjectFilter,
        mode: ReportMode,
    ) -> Result<String, AstroDbError> {
        let mut exporter = TsvExporter::new(Vec::new(), mode);
        let rows = exporter.export_report(catalog, filter)?;
        info!(rows; "Report written");

        String::from_utf8(exporter.into_inner()).map_err(|err| AstroDbError::Output(Box::new(err)))
    }
}

fn parse_error(file: &SourceFile) -> impl FnOnce(ParseError) -> AstroDbError + '_ {
    move |err| AstroDbError::new_parse_error(err, file.text(), file.name())
}
