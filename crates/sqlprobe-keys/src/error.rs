//! Error types for generated keys support.

/// Errors that can occur while building a generated keys query.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeysError {
    /// An empty list of columns was requested.
    #[error("Generated keys array {0} was empty")]
    EmptyColumnList(&'static str),

    /// The metadata lookup for the target table returned no columns.
    #[error("No columns were found for table {0} to build RETURNING clause. The table does not exist.")]
    NoColumnsFound(String),

    /// A requested column position does not exist in the target table.
    #[error("Generated keys column position {index} does not exist for table {table}. Check the column positions.")]
    InvalidColumnPosition {
        /// The 1-based position that was requested.
        index: usize,
        /// The target table as written in the statement.
        table: String,
    },

    /// Generated keys were requested but are disabled.
    #[error("Generated keys functionality not available, reason: {reason}")]
    NotSupported {
        /// Why generated keys are not available.
        reason: String,
    },

    /// A server version string could not be parsed.
    #[error("Invalid server version '{0}', expected <major>[.<minor>]")]
    InvalidServerVersion(String),

    /// The column metadata source failed.
    #[error("Metadata lookup failed: {0}")]
    Metadata(String),
}

/// Result type for generated keys operations.
pub type Result<T> = std::result::Result<T, KeysError>;
