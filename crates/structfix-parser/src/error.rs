//! Parse error type.

use std::fmt;

use structfix_common::span::Span;

/// A syntax error with its location and an optional related location
/// (e.g. where an unclosed brace was opened).
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub message: String,
    pub span: Span,
    pub related: Option<(String, Span)>,
}

impl ParseError {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
            related: None,
        }
    }

    pub fn with_related(
        message: impl Into<String>,
        span: Span,
        related_message: impl Into<String>,
        related_span: Span,
    ) -> Self {
        Self {
            message: message.into(),
            span,
            related: Some((related_message.into(), related_span)),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}..{}", self.message, self.span.start, self.span.end)
    }
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_with_related() {
        let err = ParseError::with_related(
            "expected `}`",
            Span::new(50, 51),
            "literal value starts here",
            Span::new(10, 11),
        );
        assert_eq!(err.message, "expected `}`");
        let (msg, span) = err.related.unwrap();
        assert_eq!(msg, "literal value starts here");
        assert_eq!(span, Span::new(10, 11));
    }

    #[test]
    fn parse_error_display_includes_offsets() {
        let err = ParseError::new("unexpected token", Span::new(3, 4));
        assert_eq!(err.to_string(), "unexpected token at 3..4");
    }
}
