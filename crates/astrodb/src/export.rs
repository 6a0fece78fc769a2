//! Report output for catalog queries.
//!
//! This module provides the [`Exporter`] trait that turns the objects a
//! query selects into a report. It is the last stage of a run:
//!
//! ```text
//! Record files ──load──▶ Catalog ──filter──▶ matching objects ──export──▶ report
//!                                   ▲
//! Query text ──parse──▶ ObjectFilter┘
//! ```
//!
//! # Available Backends
//!
//! - [`tsv`]: tab-separated text via [`tsv::TsvExporter`]
//!
//! # Error Handling
//!
//! Export operations return [`Error`], which converts into
//! [`AstroDbError::Output`] at the crate boundary.
//!
//! [`AstroDbError::Output`]: crate::AstroDbError::Output

/// Tab-separated report backend.
pub mod tsv;

use std::fmt;

use serde::Deserialize;

use astrodb_core::filter::ObjectFilter;

use crate::catalog::Catalog;

/// The kind of report to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportMode {
    /// What to look at tonight, ordered across the sky.
    #[default]
    ObservingList,
    /// One observing program in item order. Needs a `program =` clause.
    ProgramList,
    /// Matching objects in the object-file layout, ready to load again.
    ObjectList,
    /// Objects with their observation and program summaries.
    MetaList,
}

impl fmt::Display for ReportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ObservingList => "observing-list",
            Self::ProgramList => "program-list",
            Self::ObjectList => "object-list",
            Self::MetaList => "meta-list",
        })
    }
}

/// Abstraction for report backends.
pub trait Exporter {
    /// Writes a report of the catalog objects matching `filter`.
    ///
    /// Returns the number of rows written.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingProgram`] when a program list is requested
    /// without naming a program, or [`Error::Io`] if writing fails.
    fn export_report(&mut self, catalog: &Catalog, filter: &ObjectFilter)
    -> Result<usize, Error>;
}

/// Errors that can occur while writing a report.
#[derive(Debug)]
pub enum Error {
    /// The requested report needs a `program =` clause in the query.
    MissingProgram(ReportMode),
    /// An I/O error encountered while writing output.
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingProgram(mode) => {
                write!(f, "a {mode} needs a `program = <name>` clause in the query")
            }
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::MissingProgram(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}
