//! The [`Diagnostic`] type.

use std::fmt;

use crate::{
    error::{Severity, error_code::ErrorCode, label::Label},
    span::Span,
};

/// A single error or warning with source locations.
///
/// Rendered by the command line as, for example:
///
/// ```text
/// error[E103]: invalid value for `mag <=`: expected a number, found `bright`
///   |
/// 1 | type in gal mag <= bright
///   |                    ^^^^^^ not a number
///   |
///   = help: example: `mag <= 10`
/// ```
#[derive(Debug, Clone)]
pub struct Diagnostic {
    severity: Severity,
    code: Option<ErrorCode>,
    message: String,
    labels: Vec<Label>,
    help: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    ///
    /// # Example
    ///
    /// ```
    /// # use astrodb_parser::error::{Diagnostic, ErrorCode};
    /// # use astrodb_parser::Span;
    ///
    /// let diag = Diagnostic::error("unknown keyword `colour =`")
    ///     .with_code(ErrorCode::E102)
    ///     .with_label(Span::new(0..8), "not a keyword")
    ///     .with_help("run with --keywords to list the grammar");
    /// ```
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Create a warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Set the error code.
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Add a primary label.
    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::primary(span, message));
        self
    }

    /// Add a secondary label.
    pub fn with_secondary_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::secondary(span, message));
        self
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: None,
            message: message.into(),
            labels: Vec::new(),
            help: None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // "error[E001]: message" or "error: message"
        write!(f, "{}", self.severity)?;
        if let Some(code) = self.code {
            write!(f, "[{}]", code)?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for Diagnostic {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_defaults() {
        let diag = Diagnostic::error("wrong field count");
        assert!(diag.severity().is_error());
        assert!(diag.code().is_none());
        assert!(diag.labels().is_empty());
        assert!(diag.help().is_none());
    }

    #[test]
    fn test_diagnostic_builder_chain() {
        let diag = Diagnostic::error("M 42 should have a constellation, RA and Dec")
            .with_code(ErrorCode::E202)
            .with_label(Span::new(12..14), "fixed-location types")
            .with_secondary_label(Span::new(15..15), "constellation is empty")
            .with_help("fill in the position or use a moving-body type");

        assert_eq!(diag.code(), Some(ErrorCode::E202));
        assert_eq!(diag.labels().len(), 2);
        assert!(diag.labels()[0].is_primary());
        assert!(diag.labels()[1].is_secondary());
        assert_eq!(
            diag.help(),
            Some("fill in the position or use a moving-body type")
        );
    }

    #[test]
    fn test_diagnostic_display() {
        let diag = Diagnostic::warning("unterminated quote").with_code(ErrorCode::E001);
        assert_eq!(diag.to_string(), "warning[E001]: unterminated quote");

        let diag = Diagnostic::error("line 4: invalid date");
        assert_eq!(diag.to_string(), "error: line 4: invalid date");
    }
}
