//! Column metadata needed to build `RETURNING` clauses.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::Result;

/// A column of a table, as reported by the database metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnInfo {
    /// Column name as stored in the catalog.
    pub name: String,
    /// 1-based position of the column in the table.
    pub ordinal_position: usize,
}

/// Source of database metadata, usually backed by a connection.
pub trait ColumnMetadata {
    /// Major version of the server.
    fn server_major_version(&self) -> u32;

    /// SQL dialect of the connection (1 or 3).
    fn connection_dialect(&self) -> u8;

    /// Columns of the tables matching `table_pattern`, a `LIKE` pattern with
    /// `\` as escape character.
    ///
    /// # Errors
    ///
    /// Returns [`KeysError::Metadata`](crate::KeysError::Metadata) if the
    /// metadata cannot be read.
    fn columns(&self, table_pattern: &str) -> Result<Vec<ColumnInfo>>;
}

/// In-memory metadata, for tools and tests without a database.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaticColumnMetadata {
    server_major_version: u32,
    connection_dialect: u8,
    tables: BTreeMap<String, Vec<String>>,
}

impl StaticColumnMetadata {
    /// Creates metadata without tables.
    #[must_use]
    pub const fn new(server_major_version: u32, connection_dialect: u8) -> Self {
        Self {
            server_major_version,
            connection_dialect,
            tables: BTreeMap::new(),
        }
    }

    /// Adds a table with its columns in ordinal order. Names are stored as
    /// given, so unquoted names should be upper case.
    #[must_use]
    pub fn with_table<I, S>(mut self, table: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tables
            .insert(table.into(), columns.into_iter().map(Into::into).collect());
        self
    }
}

impl ColumnMetadata for StaticColumnMetadata {
    fn server_major_version(&self) -> u32 {
        self.server_major_version
    }

    fn connection_dialect(&self) -> u8 {
        self.connection_dialect
    }

    fn columns(&self, table_pattern: &str) -> Result<Vec<ColumnInfo>> {
        let pattern: Vec<char> = table_pattern.chars().collect();
        Ok(self
            .tables
            .iter()
            .filter(|(table, _)| like_matches(&pattern, &table.chars().collect::<Vec<_>>()))
            .flat_map(|(_, columns)| {
                columns.iter().enumerate().map(|(idx, name)| ColumnInfo {
                    name: name.clone(),
                    ordinal_position: idx + 1,
                })
            })
            .collect())
    }
}

/// `LIKE` matching with `%`, `_` and `\` as escape character.
fn like_matches(pattern: &[char], text: &[char]) -> bool {
    match pattern.split_first() {
        None => text.is_empty(),
        Some(('%', rest)) => (0..=text.len()).any(|skip| like_matches(rest, &text[skip..])),
        Some(('_', rest)) => !text.is_empty() && like_matches(rest, &text[1..]),
        Some(('\\', rest)) if !rest.is_empty() => {
            text.first() == rest.first() && like_matches(&rest[1..], &text[1..])
        }
        Some((c, rest)) => text.first() == Some(c) && like_matches(rest, &text[1..]),
    }
}
