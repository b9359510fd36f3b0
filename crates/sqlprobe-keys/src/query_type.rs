//! Statement types for which generated keys can be retrieved.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use sqlprobe_core::StatementKind;

/// Kind of DML statement that can have a `RETURNING` clause appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryType {
    /// `INSERT`
    Insert,
    /// `UPDATE`
    Update,
    /// `DELETE`
    Delete,
    /// `UPDATE OR INSERT`
    UpdateOrInsert,
    /// `MERGE`
    Merge,
    /// Any other statement.
    Unsupported,
}

impl QueryType {
    /// All query types that can be enabled.
    pub const SUPPORTED: [Self; 5] = [
        Self::Insert,
        Self::Update,
        Self::Delete,
        Self::UpdateOrInsert,
        Self::Merge,
    ];

    /// Name of the query type in the generated keys configuration.
    #[must_use]
    pub const fn config_name(self) -> &'static str {
        match self {
            Self::Insert => "insert",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::UpdateOrInsert => "update_or_insert",
            Self::Merge => "merge",
            Self::Unsupported => "unsupported",
        }
    }

    /// Returns true if `name` (case-insensitive) selects this query type.
    /// [`QueryType::Unsupported`] never matches.
    #[must_use]
    pub fn matches(self, name: &str) -> bool {
        self != Self::Unsupported && self.config_name().eq_ignore_ascii_case(name)
    }

    /// Query types supporting `RETURNING` on a Firebird server version.
    #[must_use]
    pub fn returning_support_for_version(major: u32, minor: u32) -> BTreeSet<Self> {
        match (major, minor) {
            (0..=1, _) => BTreeSet::new(),
            (2, 0) => BTreeSet::from([Self::Insert]),
            (2, _) => BTreeSet::from([
                Self::Insert,
                Self::Update,
                Self::Delete,
                Self::UpdateOrInsert,
            ]),
            _ => Self::SUPPORTED.into_iter().collect(),
        }
    }
}

impl From<StatementKind> for QueryType {
    fn from(kind: StatementKind) -> Self {
        match kind {
            StatementKind::Insert => Self::Insert,
            StatementKind::Update => Self::Update,
            StatementKind::Delete => Self::Delete,
            StatementKind::UpdateOrInsert => Self::UpdateOrInsert,
            StatementKind::Merge => Self::Merge,
            StatementKind::Unknown
            | StatementKind::Select
            | StatementKind::ExecuteProcedure
            | StatementKind::Other => Self::Unsupported,
        }
    }
}

impl fmt::Display for QueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.config_name())
    }
}
