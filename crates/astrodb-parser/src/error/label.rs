//! Labelled source spans attached to diagnostics.

use crate::span::Span;

/// A message pinned to a span of the source.
///
/// A diagnostic normally has one primary label at the offending token or
/// field, and may add secondary labels for related places, such as the
/// position fields that disagree with an object's types.
#[derive(Debug, Clone)]
pub struct Label {
    span: Span,
    message: String,
    is_primary: bool,
}

impl Label {
    /// Create a new primary label.
    pub fn primary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            is_primary: true,
        }
    }

    /// Create a new secondary label.
    pub fn secondary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            is_primary: false,
        }
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_primary(&self) -> bool {
        self.is_primary
    }

    pub fn is_secondary(&self) -> bool {
        !self.is_primary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_and_secondary() {
        let primary = Label::primary(Span::new(10..14), "not a constellation");
        assert!(primary.is_primary());
        assert_eq!(primary.span().start(), 10);
        assert_eq!(primary.message(), "not a constellation");

        let secondary = Label::secondary(Span::new(2..5), "types declared here");
        assert!(secondary.is_secondary());
        assert_eq!(secondary.span().end(), 5);
    }
}
