//! Rewriting of statements to return generated keys.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use sqlprobe_core::detect::{detect_statement, StatementIdentification};
use sqlprobe_core::dialect::FirebirdReservedWords;
use tracing::debug;

use crate::{ColumnInfo, ColumnMetadata, KeysError, QueryType, Result};

/// A statement ready for execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedKeysQuery {
    /// Whether executing `sql` produces generated keys.
    pub generates_keys: bool,
    /// The statement text to execute.
    pub sql: String,
}

impl GeneratedKeysQuery {
    /// A query for `sql` as is, without generated keys.
    #[must_use]
    pub fn unchanged(sql: &str) -> Self {
        Self {
            generates_keys: false,
            sql: sql.to_string(),
        }
    }
}

/// How column names are written in the `RETURNING` clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteStrategy {
    /// Names are appended as is.
    NoQuotes,
    /// Names are enclosed in double quotes, embedded quotes doubled.
    DoubleQuotes,
}

impl QuoteStrategy {
    /// Dialect 1 has no quoted identifiers; other dialects use double quotes.
    #[must_use]
    pub const fn for_dialect(dialect: u8) -> Self {
        if dialect == 1 {
            Self::NoQuotes
        } else {
            Self::DoubleQuotes
        }
    }

    /// Appends `name` to `out` using this strategy.
    pub fn append_quoted(self, name: &str, out: &mut String) {
        match self {
            Self::NoQuotes => out.push_str(name),
            Self::DoubleQuotes => {
                out.push('"');
                out.push_str(&name.replace('"', "\"\""));
                out.push('"');
            }
        }
    }
}

/// Converts a table name token text into the pattern for a column metadata
/// lookup.
///
/// `LIKE` wildcards are escaped. A quoted identifier loses its quotes and
/// has doubled quotes folded; an unquoted one is upper cased.
#[must_use]
pub fn normalize_object_name(name: &str) -> String {
    let mut escaped = String::with_capacity(name.len());
    for c in name.trim().chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    match escaped
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    {
        Some(inner) if escaped.len() > 2 => inner.replace("\"\"", "\""),
        _ => escaped.to_uppercase(),
    }
}

/// Builds generated keys queries for one statement.
///
/// The statement is classified once on creation. If it cannot be tokenized
/// it is treated as an unsupported statement, so the query is returned
/// unchanged rather than failing.
#[derive(Debug)]
pub struct GeneratedKeysQueryBuilder<'a> {
    original_sql: &'a str,
    identification: Option<StatementIdentification>,
    supported: &'a BTreeSet<QueryType>,
}

impl<'a> GeneratedKeysQueryBuilder<'a> {
    /// Classifies `sql` and creates a builder for it.
    #[must_use]
    pub fn create(sql: &'a str, supported: &'a BTreeSet<QueryType>) -> Self {
        let words = FirebirdReservedWords::latest();
        let identification = match detect_statement(sql, &words, true) {
            Ok(identification) => Some(identification),
            Err(err) => {
                debug!(%err, sql, "failed to parse statement, generated keys not applied");
                None
            }
        };
        Self {
            original_sql: sql,
            identification,
            supported,
        }
    }

    /// The statement classification, if the statement could be parsed.
    #[must_use]
    pub const fn identification(&self) -> Option<&StatementIdentification> {
        self.identification.as_ref()
    }

    /// Returns true if the statement kind is one of the supported query types.
    #[must_use]
    pub fn is_supported_type(&self) -> bool {
        self.identification
            .as_ref()
            .is_some_and(|id| self.supported.contains(&QueryType::from(id.kind)))
    }

    fn has_returning(&self) -> bool {
        self.identification
            .as_ref()
            .is_some_and(|id| id.returning_clause_detected)
    }

    fn table_name(&self) -> &str {
        self.identification
            .as_ref()
            .and_then(StatementIdentification::table_name)
            .unwrap_or_default()
    }

    fn original_query(&self, generates_keys: bool) -> GeneratedKeysQuery {
        GeneratedKeysQuery {
            generates_keys,
            sql: self.original_sql.to_string(),
        }
    }

    /// The statement as is. It produces generated keys only if it already
    /// has a `RETURNING` clause, whatever the supported query types.
    #[must_use]
    pub fn for_no_generated_keys(&self) -> GeneratedKeysQuery {
        self.original_query(self.has_returning())
    }

    /// Returns all columns of the target table.
    ///
    /// Servers from version 4 on use `RETURNING *`; older servers get every
    /// column listed by name.
    ///
    /// # Errors
    ///
    /// Returns [`KeysError::NoColumnsFound`] if the metadata has no columns
    /// for the table, or any error of the metadata source.
    pub fn for_return_generated_keys(
        &self,
        metadata: &dyn ColumnMetadata,
    ) -> Result<GeneratedKeysQuery> {
        if self.has_returning() {
            return Ok(self.original_query(true));
        }
        if !self.is_supported_type() {
            return Ok(self.original_query(false));
        }
        if metadata.server_major_version() >= 4 {
            return Ok(self.add_returning(&["*"], QuoteStrategy::NoQuotes));
        }
        let columns = self.table_columns(metadata)?;
        let names: Vec<&str> = columns.iter().map(|c| c.name.as_str()).collect();
        Ok(self.add_returning(
            &names,
            QuoteStrategy::for_dialect(metadata.connection_dialect()),
        ))
    }

    /// Returns the columns at the given 1-based positions.
    ///
    /// # Errors
    ///
    /// Returns [`KeysError::EmptyColumnList`] for an empty list,
    /// [`KeysError::NoColumnsFound`] if the table has no columns, and
    /// [`KeysError::InvalidColumnPosition`] for a position not in the table.
    pub fn for_columns_by_index(
        &self,
        indexes: &[usize],
        metadata: &dyn ColumnMetadata,
    ) -> Result<GeneratedKeysQuery> {
        if self.has_returning() {
            return Ok(self.original_query(true));
        }
        if indexes.is_empty() {
            return Err(KeysError::EmptyColumnList("indexes"));
        }
        if !self.is_supported_type() {
            return Ok(self.original_query(false));
        }
        let by_position: BTreeMap<usize, String> = self
            .table_columns(metadata)?
            .into_iter()
            .filter(|c| indexes.contains(&c.ordinal_position))
            .map(|c| (c.ordinal_position, c.name))
            .collect();
        let names = indexes
            .iter()
            .map(|index| {
                by_position
                    .get(index)
                    .map(String::as_str)
                    .ok_or_else(|| KeysError::InvalidColumnPosition {
                        index: *index,
                        table: self.table_name().to_string(),
                    })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(self.add_returning(
            &names,
            QuoteStrategy::for_dialect(metadata.connection_dialect()),
        ))
    }

    /// Returns the named columns. Names are used as given, so they must
    /// already be quoted where needed.
    ///
    /// # Errors
    ///
    /// Returns [`KeysError::EmptyColumnList`] for an empty list.
    pub fn for_columns_by_name(&self, names: &[&str]) -> Result<GeneratedKeysQuery> {
        if self.has_returning() {
            return Ok(self.original_query(true));
        }
        if names.is_empty() {
            return Err(KeysError::EmptyColumnList("names"));
        }
        if !self.is_supported_type() {
            return Ok(self.original_query(false));
        }
        Ok(self.add_returning(names, QuoteStrategy::NoQuotes))
    }

    fn table_columns(&self, metadata: &dyn ColumnMetadata) -> Result<Vec<ColumnInfo>> {
        let table = self.table_name();
        let columns = metadata.columns(&normalize_object_name(table))?;
        if columns.is_empty() {
            return Err(KeysError::NoColumnsFound(table.to_string()));
        }
        Ok(columns)
    }

    fn add_returning(&self, names: &[&str], quote: QuoteStrategy) -> GeneratedKeysQuery {
        let trimmed = self.original_sql.trim_end();
        let mut sql = trimmed.strip_suffix(';').unwrap_or(trimmed).to_string();
        sql.push_str("\nRETURNING ");
        for (idx, name) in names.iter().enumerate() {
            if idx > 0 {
                sql.push(',');
            }
            quote.append_quoted(name, &mut sql);
        }
        GeneratedKeysQuery {
            generates_keys: true,
            sql,
        }
    }
}
