//! SQL tokenizer.
//!
//! Converts statement text into a stream of tokens that covers the input
//! completely. Positions are byte offsets into the statement text.

mod error;
mod span;
mod token;
mod tokenizer;

pub use error::{Construct, LexicalError};
pub use span::Span;
pub use token::{BooleanValue, Token, TokenKind};
pub use tokenizer::Tokenizer;
