//! Tracking of clause boundaries in a token stream.

use crate::dialect::find_ignore_case;
use crate::lexer::{Token, TokenKind};

/// Reserved words that are values on their own, sorted in byte order.
const OPERAND_WORDS: &[&str] = &[
    "ASC",
    "ASCENDING",
    "CURRENT_CONNECTION",
    "CURRENT_DATE",
    "CURRENT_ROLE",
    "CURRENT_TIME",
    "CURRENT_TIMESTAMP",
    "CURRENT_TRANSACTION",
    "CURRENT_USER",
    "DEFAULT",
    "DELETING",
    "DESC",
    "DESCENDING",
    "END",
    "GDSCODE",
    "INSERTING",
    "LOCALTIME",
    "LOCALTIMESTAMP",
    "ROW_COUNT",
    "SQLCODE",
    "SQLSTATE",
    "UPDATING",
    "USER",
    "VALUES",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OperandState {
    /// An operator, separator or keyword was seen; a value must follow.
    Awaiting,
    /// A value was seen last.
    Complete,
}

/// Tracks nesting depth of parentheses and escape braces, and whether the
/// expression at depth 0 is waiting for an operand, to tell a word starting a new clause apart from a word
/// used as a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClauseBoundaryScanner {
    depth: usize,
    operand: OperandState,
}

impl ClauseBoundaryScanner {
    /// A scanner expecting an operand, as after a keyword.
    #[must_use]
    pub const fn awaiting_operand() -> Self {
        Self {
            depth: 0,
            operand: OperandState::Awaiting,
        }
    }

    /// A scanner positioned right after a complete operand, such as a table name.
    #[must_use]
    pub const fn after_operand() -> Self {
        Self {
            depth: 0,
            operand: OperandState::Complete,
        }
    }

    /// Current nesting depth of `(` and `{`.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Returns true if the expression at depth 0 has a complete operand.
    #[must_use]
    pub fn is_operand_complete(&self) -> bool {
        self.operand == OperandState::Complete
    }

    /// Returns true if `token`, seen at the current position, can only start
    /// a new clause: it is a word outside any nesting following a complete
    /// operand.
    #[must_use]
    pub fn is_clause_start(&self, token: &Token) -> bool {
        self.depth == 0
            && self.is_operand_complete()
            && matches!(
                token.kind(),
                TokenKind::GenericIdentifier | TokenKind::ReservedWord
            )
    }

    /// Updates the state with `token`. Whitespace and comments are ignored.
    pub fn observe(&mut self, token: &Token) {
        match token.kind() {
            TokenKind::Whitespace | TokenKind::LineComment | TokenKind::BlockComment => {}
            TokenKind::ParenOpen | TokenKind::BraceOpen => self.depth += 1,
            TokenKind::ParenClose | TokenKind::BraceClose => {
                self.depth = self.depth.saturating_sub(1);
                if self.depth == 0 {
                    self.operand = OperandState::Complete;
                }
            }
            _ if self.depth > 0 => {}
            TokenKind::GenericIdentifier
            | TokenKind::QuotedIdentifier { .. }
            | TokenKind::StringLiteral
            | TokenKind::NumericLiteral
            | TokenKind::BooleanLiteral(_)
            | TokenKind::NullLiteral
            | TokenKind::PositionalParameter
            | TokenKind::BracketClose => self.operand = OperandState::Complete,
            TokenKind::ReservedWord if find_ignore_case(OPERAND_WORDS, token.text()) => {
                self.operand = OperandState::Complete;
            }
            TokenKind::ReservedWord
            | TokenKind::Operator
            | TokenKind::Comma
            | TokenKind::Period
            | TokenKind::Colon
            | TokenKind::Semicolon
            | TokenKind::BracketOpen => self.operand = OperandState::Awaiting,
        }
    }
}

impl Default for ClauseBoundaryScanner {
    fn default() -> Self {
        Self::awaiting_operand()
    }
}
