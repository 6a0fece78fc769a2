//! Diagnostics for record files and queries.
//!
//! Every problem found while loading a record file or parsing a query is a
//! [`Diagnostic`]: a severity, an [`ErrorCode`], a message, labelled byte
//! [`Span`](crate::Span)s and optional help. Loaders and the query parser
//! keep going after the first problem and hand back every diagnostic at once
//! inside a [`ParseError`].
//!
//! # Example
//!
//! ```
//! # use astrodb_parser::error::{Diagnostic, ErrorCode};
//! # use astrodb_parser::Span;
//!
//! let diag = Diagnostic::error("line 12: invalid magnitude: `abc`")
//!     .with_code(ErrorCode::E201)
//!     .with_label(Span::new(40..43), "not a number")
//!     .with_help("write a single value, a range like `9.5-10` or `?`");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub(crate) use collector::DiagnosticCollector;
pub(crate) use parse_error::Result;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
pub use severity::Severity;
