//! # sqlprobe-keys
//!
//! Generated keys support for Firebird: rewrites DML statements so that
//! they return the keys generated by the server through a `RETURNING`
//! clause.
//!
//! The statement is classified with [`sqlprobe_core`]; only the query types
//! enabled by the [`GeneratedKeysMode`] and supported by the server are
//! rewritten. Statements that already have a `RETURNING` clause are left
//! untouched but still report generated keys.
//!
//! ```rust
//! use sqlprobe_keys::{GeneratedKeysMode, GeneratedKeysSupport, KeysRequest, ServerVersion};
//!
//! let support = GeneratedKeysSupport::create(
//!     &GeneratedKeysMode::from_config("default"),
//!     ServerVersion::new(5, 0),
//! );
//! let query = support
//!     .build_query(
//!         "insert into sometable (column1) values (?);",
//!         KeysRequest::ColumnNames(&["ID", "\"Name\""]),
//!     )
//!     .unwrap();
//!
//! assert!(query.generates_keys);
//! assert_eq!(query.sql, "insert into sometable (column1) values (?)\nRETURNING ID,\"Name\"");
//! ```

mod builder;
mod config;
mod error;
mod metadata;
mod query_type;
mod support;

pub use builder::{
    normalize_object_name, GeneratedKeysQuery, GeneratedKeysQueryBuilder, QuoteStrategy,
};
pub use config::{GeneratedKeysMode, ServerVersion};
pub use error::{KeysError, Result};
pub use metadata::{ColumnInfo, ColumnMetadata, StaticColumnMetadata};
pub use query_type::QueryType;
pub use support::{
    GeneratedKeysSupport, KeysRequest, REASON_EXPLICITLY_DISABLED, REASON_NO_RETURNING_SUPPORT,
};
