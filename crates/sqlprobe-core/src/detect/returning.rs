//! Detection of a `RETURNING` clause.

use tracing::debug;

use super::ClauseBoundaryScanner;
use crate::lexer::{Token, TokenKind};
use crate::parser::{TokenVisitor, VisitorRegistrar};

/// Visitor looking for a `RETURNING` clause in the remainder of a DML
/// statement. It must be registered right after the target table (or its
/// alias) and leaves the parser once the clause is found.
///
/// Only an unquoted `RETURNING` outside parentheses and braces, following a
/// complete operand, counts. A column or table named `returning` is not
/// mistaken for the clause.
#[derive(Debug, Clone)]
pub struct ReturningClauseDetector {
    scanner: ClauseBoundaryScanner,
    detected: bool,
}

impl ReturningClauseDetector {
    /// Creates a detector positioned after the table name.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            scanner: ClauseBoundaryScanner::after_operand(),
            detected: false,
        }
    }

    /// Returns true once a `RETURNING` clause was found.
    #[must_use]
    pub const fn returning_clause_detected(&self) -> bool {
        self.detected
    }
}

impl Default for ReturningClauseDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenVisitor for ReturningClauseDetector {
    fn visit_token(&mut self, token: &Token, registrar: &mut VisitorRegistrar<'_>) {
        if token.is_whitespace_or_comment() {
            return;
        }
        let is_returning = matches!(
            token.kind(),
            TokenKind::GenericIdentifier | TokenKind::ReservedWord
        ) && token.eq_ignore_case("RETURNING");
        if is_returning && self.scanner.is_clause_start(token) {
            debug!(position = token.start(), "returning clause detected");
            self.detected = true;
            registrar.remove_current();
        } else {
            self.scanner.observe(token);
        }
    }

    fn complete(&mut self, _registrar: &mut VisitorRegistrar<'_>) {}
}
