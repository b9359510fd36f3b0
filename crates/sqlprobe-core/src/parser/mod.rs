//! Push parser dispatching tokens to visitors.
//!
//! The parser pulls tokens from a single-pass source and hands each one to
//! the registered [`TokenVisitor`]s. Visitors join and leave while tokens
//! are being dispatched; once none is left the parser pauses, keeping its
//! position in the source.

mod error;
#[allow(clippy::module_inception)]
mod parser;
mod visitor;

pub use error::{ParseError, Result, UsageError};
pub use parser::{ParserBuilder, SqlParser, StatementParser};
pub use visitor::{SharedVisitor, TokenVisitor, VisitorRegistrar};
