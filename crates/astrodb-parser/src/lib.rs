//! # Astrodb Parser
//!
//! Reading text into catalog values: the tab-separated record files and the
//! query language.
//!
//! ## Usage
//!
//! ```
//! # use astrodb_parser::{load_objects, parse_query, ParseError};
//!
//! fn main() -> Result<(), ParseError> {
//!     let objects = load_objects(
//!         "M31\tAndromeda Galaxy\tGal\tAnd\t0 42 44\t41 16 9\t3.4\t190x60\t\t35\tSb\t2.5mly\t\n",
//!     )?;
//!     let filter = parse_query("type in gal mag <= 10")?;
//!     assert_eq!(objects.len(), 1);
//!     assert!(filter.types_in.is_some());
//!     Ok(())
//! }
//! ```
//!
//! Failures come back as a [`ParseError`] holding one [`error::Diagnostic`]
//! per problem, each with byte spans into the text that was parsed.

pub mod error;
mod keyword;
mod lexer;
mod query;
mod span;
mod tsv;

pub use error::ParseError;
pub use keyword::{Keyword, ValueError};
pub use lexer::{Token, tokenize};
pub use query::parse_query;
pub use span::{Span, Spanned};
pub use tsv::{RecordKind, load_objects, load_observations, load_programs};
