//! # sqlprobe-core
//!
//! A Firebird SQL tokenizer and a resumable, visitor-based parser that
//! classifies statements without building a syntax tree.
//!
//! This crate provides:
//! - A lossless tokenizer: concatenating the token texts yields the input
//! - Reserved word sets for Firebird 3.0, 4.0 and 5.0
//! - A push parser dispatching tokens to visitors that join and leave while
//!   parsing, pausing once no visitor is left
//! - A statement detector reporting the statement kind, the target table
//!   and whether a `RETURNING` clause is present
//!
//! ## Statement Detection
//!
//! ```rust
//! use sqlprobe_core::detect::{detect_statement, StatementKind};
//! use sqlprobe_core::dialect::FirebirdReservedWords;
//!
//! let words = FirebirdReservedWords::latest();
//! let identification = detect_statement(
//!     "update sometable set column1 = ? where id = ? returning column2",
//!     &words,
//!     true,
//! )
//! .unwrap();
//!
//! assert_eq!(identification.kind, StatementKind::Update);
//! assert_eq!(identification.table_name(), Some("sometable"));
//! assert!(identification.returning_clause_detected);
//! ```
//!
//! ## Tokenizing
//!
//! ```rust
//! use sqlprobe_core::dialect::FirebirdReservedWords;
//! use sqlprobe_core::lexer::{TokenKind, Tokenizer};
//!
//! let words = FirebirdReservedWords::latest();
//! let kinds: Vec<TokenKind> = Tokenizer::new("select ?", &words)
//!     .map(|token| token.map(|t| t.kind().clone()))
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//!
//! assert_eq!(
//!     kinds,
//!     vec![TokenKind::ReservedWord, TokenKind::Whitespace, TokenKind::PositionalParameter]
//! );
//! ```

pub mod detect;
pub mod dialect;
pub mod lexer;
pub mod parser;

pub use detect::{detect_statement, StatementDetector, StatementIdentification, StatementKind};
pub use dialect::{FirebirdReservedWords, ReservedWords};
pub use lexer::{LexicalError, Token, TokenKind, Tokenizer};
pub use parser::{ParseError, SqlParser, StatementParser, TokenVisitor};
