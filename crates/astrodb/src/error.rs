//! Error types for astrodb operations.
//!
//! This module provides the main error type [`AstroDbError`] which wraps
//! the error conditions of loading, querying and reporting.

use std::io;

use thiserror::Error;

use astrodb_parser::error::ParseError;

use crate::catalog::CatalogError;

/// The main error type for astrodb operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant carries structured diagnostics with source spans,
/// together with the text they point into and where that text came from
/// (a file path or `query`).
#[derive(Debug, Error)]
pub enum AstroDbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse {
        err: ParseError,
        src: String,
        origin: String,
    },

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Output error: {0}")]
    Output(Box<dyn std::error::Error>),
}

impl From<crate::export::Error> for AstroDbError {
    fn from(error: crate::export::Error) -> Self {
        Self::Output(Box::new(error))
    }
}

impl AstroDbError {
    /// Create a new `Parse` error with the associated source text.
    pub fn new_parse_error(
        err: ParseError,
        src: impl Into<String>,
        origin: impl Into<String>,
    ) -> Self {
        Self::Parse {
            err,
            src: src.into(),
            origin: origin.into(),
        }
    }
}
