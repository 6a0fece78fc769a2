//! Error adapter for converting AstroDbError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.
//!
//! # Multi-Error Support
//!
//! A [`astrodb_parser::error::ParseError`] carries every problem found in a
//! file or query, and a [`astrodb::CatalogError`] every integrity violation.
//! Each is rendered as its own report.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use astrodb::{AstroDbError, Violation};
use astrodb_parser::error::Diagnostic;

/// Adapter for a single parser diagnostic.
///
/// This adapter wraps a single [`Diagnostic`] and implements
/// [`MietteDiagnostic`] to enable rich error formatting in the CLI.
pub struct DiagnosticAdapter<'a> {
    /// The wrapped diagnostic
    diag: &'a Diagnostic,
    /// Source text for displaying snippets
    src: &'a str,
    /// File path or `query`
    origin: &'a str,
}

impl<'a> DiagnosticAdapter<'a> {
    /// Create a new diagnostic adapter.
    pub fn new(diag: &'a Diagnostic, src: &'a str, origin: &'a str) -> Self {
        Self { diag, src, origin }
    }
}

impl fmt::Debug for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticAdapter")
            .field("diag", &self.diag)
            .field("origin", &self.origin)
            .finish()
    }
}

impl fmt::Display for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.origin, self.diag.message())
    }
}

impl std::error::Error for DiagnosticAdapter<'_> {}

impl MietteDiagnostic for DiagnosticAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .code()
            .map(|c| Box::new(c) as Box<dyn fmt::Display>)
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(if self.diag.severity().is_error() {
            miette::Severity::Error
        } else {
            miette::Severity::Warning
        })
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .help()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let labels = self.diag.labels();
        if labels.is_empty() {
            return None;
        }

        Some(Box::new(labels.iter().map(|label| {
            let span = span_to_miette(label.span());
            let message = Some(label.message().to_string());
            if label.is_primary() {
                LabeledSpan::new_primary_with_span(message, span)
            } else {
                LabeledSpan::new_with_span(message, span)
            }
        })))
    }
}

/// Adapter for one catalog integrity violation.
#[derive(Debug)]
pub struct ViolationAdapter<'a>(pub &'a Violation);

impl fmt::Display for ViolationAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ViolationAdapter<'_> {}

impl MietteDiagnostic for ViolationAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self.0 {
            Violation::DuplicateObject { .. } => "astrodb::catalog::duplicate_object",
            Violation::DuplicateObservation { .. } => "astrodb::catalog::duplicate_observation",
            Violation::DuplicateProgramItem { .. } => "astrodb::catalog::duplicate_program_item",
            Violation::UnknownObject { .. } => "astrodb::catalog::unknown_object",
            Violation::UnknownObservation { .. } => "astrodb::catalog::unknown_observation",
            Violation::LikelyDuplicates { .. } => "astrodb::catalog::likely_duplicates",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self.0 {
            Violation::LikelyDuplicates { .. } => Some(Box::new(
                "merge the records, or run without --check-likely-duplicates",
            )),
            _ => None,
        }
    }
}

/// Adapter for the remaining [`AstroDbError`] variants.
///
/// This adapter handles errors that don't have rich diagnostic information,
/// such as I/O, configuration and output errors.
pub struct ErrorAdapter<'a>(pub &'a AstroDbError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            AstroDbError::Io(_) => "astrodb::io",
            AstroDbError::Parse { .. } => return None,
            AstroDbError::Catalog(_) => "astrodb::catalog",
            AstroDbError::Config(_) => "astrodb::config",
            AstroDbError::Output(_) => "astrodb::output",
        };
        Some(Box::new(code))
    }
}

/// A reportable error that can be rendered by miette.
///
/// This enum wraps a single diagnostic, a single violation or a plain
/// error, providing a uniform interface for error rendering.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A rich diagnostic with source location information.
    Diagnostic(DiagnosticAdapter<'a>),
    /// One catalog integrity violation.
    Violation(ViolationAdapter<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl Reportable<'_> {
    fn as_diagnostic(&self) -> &dyn MietteDiagnostic {
        match self {
            Reportable::Diagnostic(d) => d,
            Reportable::Violation(v) => v,
            Reportable::Error(e) => e,
        }
    }
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_diagnostic(), f)
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Error(e) => std::error::Error::source(e),
            Reportable::Diagnostic(_) | Reportable::Violation(_) => None,
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.as_diagnostic().code()
    }

    fn severity(&self) -> Option<miette::Severity> {
        self.as_diagnostic().severity()
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.as_diagnostic().help()
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        self.as_diagnostic().source_code()
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        self.as_diagnostic().labels()
    }
}

/// Convert an astrodb [`Span`](astrodb_parser::Span) to a miette [`SourceSpan`].
fn span_to_miette(span: astrodb_parser::Span) -> SourceSpan {
    SourceSpan::new(span.start().into(), span.len())
}

/// Convert an [`AstroDbError`] into a list of reportable errors.
///
/// [`AstroDbError::Parse`] yields one [`Reportable`] per diagnostic and
/// [`AstroDbError::Catalog`] one per violation. Other variants yield a
/// single [`Reportable`].
pub fn to_reportables(err: &AstroDbError) -> Vec<Reportable<'_>> {
    match err {
        AstroDbError::Parse {
            err: parse_err,
            src,
            origin,
        } => parse_err
            .diagnostics()
            .iter()
            .map(|d| Reportable::Diagnostic(DiagnosticAdapter::new(d, src, origin)))
            .collect(),
        AstroDbError::Catalog(catalog_err) => catalog_err
            .violations()
            .iter()
            .map(|v| Reportable::Violation(ViolationAdapter(v)))
            .collect(),
        _ => vec![Reportable::Error(ErrorAdapter(err))],
    }
}
