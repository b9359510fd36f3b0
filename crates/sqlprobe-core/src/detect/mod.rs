//! Statement classification.
//!
//! [`StatementDetector`] is a [`TokenVisitor`](crate::parser::TokenVisitor)
//! deciding the kind of a statement from its first few tokens. For DML
//! statements it also captures the target table and can hand over to a
//! [`ReturningClauseDetector`] scanning for a `RETURNING` clause.

mod boundary;
mod identification;
mod returning;
mod statement;

pub use boundary::ClauseBoundaryScanner;
pub use identification::{StatementIdentification, StatementKind};
pub use returning::ReturningClauseDetector;
pub use statement::{detect_statement, StatementDetector};
