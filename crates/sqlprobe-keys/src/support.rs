//! Resolution of the generated keys configuration against a server.

use std::collections::BTreeSet;

use tracing::debug;

use crate::{
    ColumnMetadata, GeneratedKeysMode, GeneratedKeysQuery, GeneratedKeysQueryBuilder, KeysError,
    QueryType, Result, ServerVersion,
};

/// Reason given when the server does not know `RETURNING`.
pub const REASON_NO_RETURNING_SUPPORT: &str =
    "This version of Firebird does not support retrieving generated keys (support was added in Firebird 2.0)";

/// Reason given when generated keys were disabled by configuration.
pub const REASON_EXPLICITLY_DISABLED: &str = "disabled through connection property";

/// Which generated keys the caller asks for.
#[derive(Clone, Copy)]
pub enum KeysRequest<'a> {
    /// No generated keys.
    NoGeneratedKeys,
    /// All columns of the target table.
    ReturnGeneratedKeys(&'a dyn ColumnMetadata),
    /// Columns at the given 1-based positions.
    ColumnIndexes(&'a [usize], &'a dyn ColumnMetadata),
    /// Columns with the given names.
    ColumnNames(&'a [&'a str]),
}

/// Generated keys support for a connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratedKeysSupport {
    /// Requesting generated keys is an error.
    Disabled {
        /// Why generated keys are not available.
        reason: String,
    },
    /// Requests for generated keys are ignored.
    Ignored,
    /// `RETURNING` is added for the listed query types.
    Enabled(BTreeSet<QueryType>),
}

impl GeneratedKeysSupport {
    /// Resolves `mode` for a server of the given version.
    ///
    /// An explicit `disabled` or `ignored` applies regardless of the server.
    /// Otherwise a server without `RETURNING` disables generated keys, and a
    /// query type list is narrowed to what the server supports, an empty
    /// result meaning ignored.
    #[must_use]
    pub fn create(mode: &GeneratedKeysMode, version: ServerVersion) -> Self {
        let support = match mode {
            GeneratedKeysMode::Disabled => Self::Disabled {
                reason: REASON_EXPLICITLY_DISABLED.to_string(),
            },
            GeneratedKeysMode::Ignored => Self::Ignored,
            GeneratedKeysMode::Default | GeneratedKeysMode::QueryTypes(_) => {
                let returning =
                    QueryType::returning_support_for_version(version.major, version.minor);
                if returning.is_empty() {
                    Self::Disabled {
                        reason: REASON_NO_RETURNING_SUPPORT.to_string(),
                    }
                } else if let GeneratedKeysMode::QueryTypes(types) = mode {
                    let enabled: BTreeSet<QueryType> =
                        types.intersection(&returning).copied().collect();
                    if enabled.is_empty() {
                        Self::Ignored
                    } else {
                        Self::Enabled(enabled)
                    }
                } else {
                    Self::Enabled(returning)
                }
            }
        };
        debug!(%mode, %version, ?support, "resolved generated keys support");
        support
    }

    /// Query types for which generated keys are returned.
    #[must_use]
    pub fn supported_query_types(&self) -> BTreeSet<QueryType> {
        match self {
            Self::Enabled(types) => types.clone(),
            Self::Disabled { .. } | Self::Ignored => BTreeSet::new(),
        }
    }

    /// Returns true if generated keys can be retrieved at all.
    #[must_use]
    pub const fn supports_get_generated_keys(&self) -> bool {
        matches!(self, Self::Enabled(_))
    }

    /// Builds the query to execute for `sql` and the requested keys.
    ///
    /// # Errors
    ///
    /// Returns [`KeysError::NotSupported`] when keys are requested while
    /// disabled, or any error of the [`GeneratedKeysQueryBuilder`] operation
    /// for the request.
    pub fn build_query(&self, sql: &str, request: KeysRequest<'_>) -> Result<GeneratedKeysQuery> {
        match self {
            Self::Disabled { reason } => match request {
                KeysRequest::NoGeneratedKeys => Ok(GeneratedKeysQuery::unchanged(sql)),
                _ => Err(KeysError::NotSupported {
                    reason: reason.clone(),
                }),
            },
            Self::Ignored => Ok(GeneratedKeysQuery::unchanged(sql)),
            Self::Enabled(types) => {
                let builder = GeneratedKeysQueryBuilder::create(sql, types);
                match request {
                    KeysRequest::NoGeneratedKeys => Ok(builder.for_no_generated_keys()),
                    KeysRequest::ReturnGeneratedKeys(metadata) => {
                        builder.for_return_generated_keys(metadata)
                    }
                    KeysRequest::ColumnIndexes(indexes, metadata) => {
                        builder.for_columns_by_index(indexes, metadata)
                    }
                    KeysRequest::ColumnNames(names) => builder.for_columns_by_name(names),
                }
            }
        }
    }
}
