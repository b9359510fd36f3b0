//! Result types of statement detection.

use core::fmt;

use crate::lexer::Token;

/// Kind of SQL statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum StatementKind {
    /// Nothing was detected yet.
    #[default]
    Unknown,
    /// `SELECT` or `WITH ... SELECT`
    Select,
    /// `INSERT INTO`
    Insert,
    /// `UPDATE`
    Update,
    /// `DELETE FROM`
    Delete,
    /// `UPDATE OR INSERT INTO`
    UpdateOrInsert,
    /// `MERGE INTO`
    Merge,
    /// `EXECUTE PROCEDURE`
    ExecuteProcedure,
    /// Any other statement, or a DML statement of unexpected shape.
    Other,
}

impl StatementKind {
    /// Returns true for the statements that modify table rows.
    #[must_use]
    pub const fn is_dml(self) -> bool {
        matches!(
            self,
            Self::Insert | Self::Update | Self::Delete | Self::UpdateOrInsert | Self::Merge
        )
    }

    /// Returns the SQL spelling of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "UNKNOWN",
            Self::Select => "SELECT",
            Self::Insert => "INSERT",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
            Self::UpdateOrInsert => "UPDATE OR INSERT",
            Self::Merge => "MERGE",
            Self::ExecuteProcedure => "EXECUTE PROCEDURE",
            Self::Other => "OTHER",
        }
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What was detected about a statement.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatementIdentification {
    /// Kind of statement.
    pub kind: StatementKind,
    /// Token naming the target table of a DML statement.
    pub table_name_token: Option<Token>,
    /// Whether a `RETURNING` clause was found.
    pub returning_clause_detected: bool,
}

impl StatementIdentification {
    /// Source text of the table name, quotes included for a quoted identifier.
    #[must_use]
    pub fn table_name(&self) -> Option<&str> {
        self.table_name_token.as_ref().map(Token::text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unknown() {
        let identification = StatementIdentification::default();
        assert_eq!(identification.kind, StatementKind::Unknown);
        assert_eq!(identification.table_name(), None);
        assert!(!identification.returning_clause_detected);
    }

    #[test]
    fn test_table_name_keeps_quotes() {
        let identification = StatementIdentification {
            kind: StatementKind::Insert,
            table_name_token: Some(Token::quoted_identifier(12, "\"sometable\"")),
            returning_clause_detected: false,
        };
        assert_eq!(identification.table_name(), Some("\"sometable\""));
    }

    #[test]
    fn test_is_dml() {
        assert!(StatementKind::UpdateOrInsert.is_dml());
        assert!(!StatementKind::ExecuteProcedure.is_dml());
        assert!(!StatementKind::Select.is_dml());
    }

    #[test]
    fn test_display() {
        assert_eq!(StatementKind::UpdateOrInsert.to_string(), "UPDATE OR INSERT");
    }
}
