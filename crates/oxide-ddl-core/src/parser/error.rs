//! Parser error types.

use crate::lexer::{Span, TokenKind};

/// Maximum number of characters of remaining input quoted in an error.
const NEAR_LEN: usize = 40;

/// A parse error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The error message.
    pub message: String,
    /// The location of the error.
    pub span: Span,
    /// Expected tokens (if applicable).
    pub expected: Option<String>,
    /// The actual token found.
    pub found: Option<TokenKind>,
    /// A snippet of the input remaining at the error location.
    pub near: String,
}

impl ParseError {
    /// Creates a new parse error.
    #[must_use]
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
            expected: None,
            found: None,
            near: String::new(),
        }
    }

    /// Creates an "unexpected token" error.
    #[must_use]
    pub fn unexpected(expected: impl Into<String>, found: TokenKind, span: Span) -> Self {
        let expected_str: String = expected.into();
        Self {
            message: format!("Unexpected token: expected {expected_str}, found {found:?}"),
            span,
            expected: Some(expected_str),
            found: Some(found),
            near: String::new(),
        }
    }

    /// Creates an "unexpected end of input" error.
    #[must_use]
    pub fn unexpected_eof(expected: impl Into<String>, span: Span) -> Self {
        let expected_str: String = expected.into();
        Self {
            message: format!("Unexpected end of input: expected {expected_str}"),
            span,
            expected: Some(expected_str),
            found: Some(TokenKind::Eof),
            near: String::new(),
        }
    }

    /// Attaches a snippet of `source` starting at the error span.
    #[must_use]
    pub fn with_source(mut self, source: &str) -> Self {
        let start = self.span.start.min(source.len());
        let rest = source.get(start..).unwrap_or_default();
        self.near = rest.chars().take(NEAR_LEN).collect();
        self
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at position {}..{}",
            self.message, self.span.start, self.span.end
        )?;
        if !self.near.is_empty() {
            write!(f, ", near `{}`", self.near)?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_position() {
        let err = ParseError::new("Unsupported statement", Span::new(0, 5));
        assert_eq!(err.to_string(), "Unsupported statement at position 0..5");
    }

    #[test]
    fn test_display_includes_snippet() {
        let err = ParseError::unexpected("TABLE", TokenKind::Comma, Span::new(7, 8))
            .with_source("CREATE , something went wrong");
        assert_eq!(err.near, ", something went wrong");
        assert!(err.to_string().ends_with("near `, something went wrong`"));
        assert_eq!(err.expected.as_deref(), Some("TABLE"));
    }

    #[test]
    fn test_snippet_is_truncated() {
        let source = "x".repeat(100);
        let err = ParseError::new("boom", Span::new(0, 1)).with_source(&source);
        assert_eq!(err.near.len(), NEAR_LEN);
    }
}
