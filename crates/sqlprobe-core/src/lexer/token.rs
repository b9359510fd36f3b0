//! Token types produced by the tokenizer.

use core::fmt;

use super::Span;

/// Value of a boolean literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BooleanValue {
    /// `TRUE`
    True,
    /// `FALSE`
    False,
    /// `UNKNOWN`
    Unknown,
}

/// The kind of token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TokenKind {
    // Layout
    /// Run of spaces, tabs, carriage returns and line feeds.
    Whitespace,
    /// `-- ...` up to (not including) the end of the line.
    LineComment,
    /// `/* ... */`
    BlockComment,

    // Identifiers and keywords
    /// Unquoted identifier that is not a reserved word.
    GenericIdentifier,
    /// `"..."` identifier; `name` has the quotes removed and `""` folded to `"`.
    QuotedIdentifier {
        /// Unescaped identifier name.
        name: String,
    },
    /// Word found in the reserved words of the dialect.
    ReservedWord,

    // Literals
    /// `'...'`, `x'...'` or `q'<...>'`
    StringLiteral,
    /// Decimal, exact, approximate or hexadecimal number.
    NumericLiteral,
    /// `TRUE`, `FALSE` or `UNKNOWN`
    BooleanLiteral(BooleanValue),
    /// `NULL`
    NullLiteral,

    // Operators and parameters
    /// Symbolic operator or one of `AND`, `OR`, `NOT`, `IS`, `LIKE`.
    Operator,
    /// `?`
    PositionalParameter,

    // Punctuation
    /// `(`
    ParenOpen,
    /// `)`
    ParenClose,
    /// `{`
    BraceOpen,
    /// `}`
    BraceClose,
    /// `[`
    BracketOpen,
    /// `]`
    BracketClose,
    /// `,`
    Comma,
    /// `.`
    Period,
    /// `;`
    Semicolon,
    /// `:`
    Colon,
}

impl TokenKind {
    /// Returns a short, stable name for the kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Whitespace => "whitespace",
            Self::LineComment => "line-comment",
            Self::BlockComment => "block-comment",
            Self::GenericIdentifier => "identifier",
            Self::QuotedIdentifier { .. } => "quoted-identifier",
            Self::ReservedWord => "reserved-word",
            Self::StringLiteral => "string",
            Self::NumericLiteral => "number",
            Self::BooleanLiteral(_) => "boolean",
            Self::NullLiteral => "null",
            Self::Operator => "operator",
            Self::PositionalParameter => "parameter",
            Self::ParenOpen => "paren-open",
            Self::ParenClose => "paren-close",
            Self::BraceOpen => "brace-open",
            Self::BraceClose => "brace-close",
            Self::BracketOpen => "bracket-open",
            Self::BracketClose => "bracket-close",
            Self::Comma => "comma",
            Self::Period => "period",
            Self::Semicolon => "semicolon",
            Self::Colon => "colon",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A token with its position and exact text in the statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token {
    kind: TokenKind,
    start: usize,
    text: String,
}

impl Token {
    /// Creates a new token starting at byte offset `start`.
    #[must_use]
    pub fn new(kind: TokenKind, start: usize, text: impl Into<String>) -> Self {
        Self {
            kind,
            start,
            text: text.into(),
        }
    }

    /// Creates a quoted identifier token, deriving its unescaped name from `text`.
    #[must_use]
    pub fn quoted_identifier(start: usize, text: impl Into<String>) -> Self {
        let text = text.into();
        let name = unquote(&text);
        Self::new(TokenKind::QuotedIdentifier { name }, start, text)
    }

    /// The kind of token.
    #[must_use]
    pub const fn kind(&self) -> &TokenKind {
        &self.kind
    }

    /// Start byte offset in the statement text.
    #[must_use]
    pub const fn start(&self) -> usize {
        self.start
    }

    /// End byte offset (exclusive) in the statement text.
    #[must_use]
    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }

    /// Location of the token in the statement text.
    #[must_use]
    pub fn span(&self) -> Span {
        Span::new(self.start, self.end())
    }

    /// The exact source text of the token.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Unescaped name of a quoted identifier.
    #[must_use]
    pub fn quoted_name(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::QuotedIdentifier { name } => Some(name),
            _ => None,
        }
    }

    /// Returns true for whitespace and both comment forms.
    #[must_use]
    pub const fn is_whitespace_or_comment(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Whitespace | TokenKind::LineComment | TokenKind::BlockComment
        )
    }

    /// Returns true if the token can name an object: a generic or a quoted identifier.
    #[must_use]
    pub const fn is_valid_identifier(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::GenericIdentifier | TokenKind::QuotedIdentifier { .. }
        )
    }

    /// Case-insensitive (ASCII) comparison of the token text.
    #[must_use]
    pub fn eq_ignore_case(&self, other: &str) -> bool {
        self.text.eq_ignore_ascii_case(other)
    }

    /// Returns true for a reserved word spelled `word` (case-insensitive).
    #[must_use]
    pub fn is_reserved(&self, word: &str) -> bool {
        self.kind == TokenKind::ReservedWord && self.eq_ignore_case(word)
    }

    /// Returns true for an operator spelled `op` (case-insensitive).
    #[must_use]
    pub fn is_operator(&self, op: &str) -> bool {
        self.kind == TokenKind::Operator && self.eq_ignore_case(op)
    }
}

/// Strips the surrounding double quotes and folds doubled quotes.
fn unquote(text: &str) -> String {
    let inner = text
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(text);
    inner.replace("\"\"", "\"")
}
