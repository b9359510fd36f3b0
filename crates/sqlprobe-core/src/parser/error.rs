//! Parser error types.

use crate::lexer::LexicalError;

/// Misuse of the parser by its caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum UsageError {
    /// `parse` called on a parser that was already started.
    #[error("parser was already started")]
    AlreadyStarted,
    /// Parsing requested without any registered visitor.
    #[error("no visitors registered")]
    NoVisitors,
    /// Parsing requested after all tokens were consumed.
    #[error("parser was already completed")]
    AlreadyCompleted,
    /// Parsing requested from inside a visitor callback.
    #[error("parser is already parsing")]
    InProgress,
}

/// Error returned by [`SqlParser`](super::SqlParser) operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The parser was used incorrectly.
    #[error("illegal parser usage: {0}")]
    IllegalUsage(#[from] UsageError),
    /// The statement text could not be tokenized.
    #[error(transparent)]
    Lexical(#[from] LexicalError),
}

impl ParseError {
    /// Returns the usage error, if this is one.
    #[must_use]
    pub const fn usage(&self) -> Option<UsageError> {
        match self {
            Self::IllegalUsage(err) => Some(*err),
            Self::Lexical(_) => None,
        }
    }
}

/// Result type for parser operations.
pub type Result<T> = core::result::Result<T, ParseError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::{Construct, Span};

    #[test]
    fn test_usage_error_display() {
        let err = ParseError::from(UsageError::NoVisitors);
        assert_eq!(err.to_string(), "illegal parser usage: no visitors registered");
        assert_eq!(err.usage(), Some(UsageError::NoVisitors));
    }

    #[test]
    fn test_lexical_error_is_transparent() {
        let lexical = LexicalError::unterminated(Construct::BlockComment, Span::new(0, 4));
        let err = ParseError::from(lexical.clone());
        assert_eq!(err.to_string(), lexical.to_string());
        assert_eq!(err.usage(), None);
    }
}
