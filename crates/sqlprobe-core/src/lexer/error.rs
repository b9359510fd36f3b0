//! Lexical error types.

use core::fmt;

use super::Span;

/// Bracketed construct that was still open when the input ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Construct {
    /// `/* ...`
    BlockComment,
    /// `" ...`
    QuotedIdentifier,
    /// `' ...` or `x' ...`
    StringLiteral,
    /// `q'<open> ...`
    QStringLiteral,
}

impl fmt::Display for Construct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::BlockComment => "block comment",
            Self::QuotedIdentifier => "quoted identifier",
            Self::StringLiteral => "string literal",
            Self::QStringLiteral => "q-string literal",
        })
    }
}

/// The statement text ended inside an unterminated construct.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unterminated {construct} starting at position {}, reached end of input at position {}", .span.start, .span.end)]
pub struct LexicalError {
    /// The construct that was left open.
    pub construct: Construct,
    /// From the start of the construct to the end of the input.
    pub span: Span,
}

impl LexicalError {
    /// Creates a new lexical error.
    #[must_use]
    pub const fn unterminated(construct: Construct, span: Span) -> Self {
        Self { construct, span }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = LexicalError::unterminated(Construct::StringLiteral, Span::new(7, 12));
        assert_eq!(
            err.to_string(),
            "unterminated string literal starting at position 7, reached end of input at position 12"
        );
    }
}
