//! Error codes for astrodb diagnostics.
//!
//! Codes are grouped by where the problem was found:
//! - `E0xx` - query lexer
//! - `E1xx` - query clauses
//! - `E2xx` - record files

use std::fmt;

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Lexer (E0xx)
    // =========================================================================
    /// Unterminated quote.
    ///
    /// A `"` was opened but never closed; the token runs to the end of the
    /// query. Reported as a warning.
    E001,

    /// Unexpected character.
    E002,

    // =========================================================================
    // Query clauses (E1xx)
    // =========================================================================
    /// Unexpected token.
    ///
    /// A clause is well-formed up to a token the grammar does not allow
    /// there, such as a missing `to` in `ra range`.
    E100,

    /// Incomplete clause.
    ///
    /// The query ended before the current clause had all its values.
    E101,

    /// Unknown keyword.
    ///
    /// The first two tokens of a clause do not name a known keyword.
    E102,

    /// Invalid clause value.
    ///
    /// The value of a clause cannot be read as the type the keyword needs.
    E103,

    // =========================================================================
    // Record files (E2xx)
    // =========================================================================
    /// Wrong field count.
    ///
    /// A data line does not have the number of tab-separated fields its
    /// record kind requires.
    E200,

    /// Invalid field value.
    E201,

    /// Inconsistent location.
    ///
    /// An object's position fields disagree with its types: fixed-location
    /// types need a constellation, RA and Dec, moving bodies must have none.
    E202,
}

impl ErrorCode {
    /// Returns the code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E103 => "E103",
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "unterminated quote",
            ErrorCode::E002 => "unexpected character",
            ErrorCode::E100 => "unexpected token",
            ErrorCode::E101 => "incomplete clause",
            ErrorCode::E102 => "unknown keyword",
            ErrorCode::E103 => "invalid clause value",
            ErrorCode::E200 => "wrong field count",
            ErrorCode::E201 => "invalid field value",
            ErrorCode::E202 => "inconsistent location",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E001.to_string(), "E001");
        assert_eq!(ErrorCode::E102.to_string(), "E102");
        assert_eq!(ErrorCode::E202.to_string(), "E202");
    }

    #[test]
    fn test_error_code_description() {
        assert_eq!(ErrorCode::E001.description(), "unterminated quote");
        assert_eq!(ErrorCode::E103.description(), "invalid clause value");
        assert_eq!(ErrorCode::E200.description(), "wrong field count");
    }
}
