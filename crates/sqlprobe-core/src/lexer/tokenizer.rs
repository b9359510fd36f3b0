//! SQL tokenizer implementation.

use core::iter::FusedIterator;

use super::{BooleanValue, Construct, LexicalError, Span, Token, TokenKind};
use crate::dialect::ReservedWords;

/// Single-pass tokenizer over a SQL statement.
///
/// Every character of the input ends up in exactly one token, whitespace and
/// comments included, so concatenating the token texts yields the input.
/// Scanning is lazy: an unterminated construct is only reported when the
/// tokenizer reaches it, after which the tokenizer is exhausted.
pub struct Tokenizer<'a> {
    /// The statement text.
    input: &'a str,
    /// The current byte position.
    pos: usize,
    /// The byte position of the start of the current token.
    start: usize,
    reserved_words: &'a dyn ReservedWords,
    exhausted: bool,
}

impl<'a> Tokenizer<'a> {
    /// Creates a tokenizer for `input` using the given reserved words.
    #[must_use]
    pub fn new(input: &'a str, reserved_words: &'a dyn ReservedWords) -> Self {
        Self {
            input,
            pos: 0,
            start: 0,
            reserved_words,
            exhausted: false,
        }
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    /// Advances to the next character and returns it.
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Advances over the next character if it is `expected`.
    fn advance_if(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn advance_while(&mut self, predicate: impl Fn(char) -> bool) {
        while self.peek().is_some_and(&predicate) {
            self.advance();
        }
    }

    /// Advances to the next character, or fails if the input is exhausted
    /// while inside `construct`.
    fn require(&mut self, construct: Construct) -> Result<char, LexicalError> {
        self.advance().ok_or_else(|| {
            LexicalError::unterminated(construct, Span::new(self.start, self.input.len()))
        })
    }

    /// Creates a token with the text from the start of the token to the current position.
    fn make_token(&self, kind: TokenKind) -> Token {
        Token::new(kind, self.start, &self.input[self.start..self.pos])
    }

    /// Scans the next token, `None` at the end of input.
    fn next_token(&mut self) -> Result<Option<Token>, LexicalError> {
        self.start = self.pos;
        let Some(c) = self.advance() else {
            return Ok(None);
        };

        let kind = match c {
            ' ' | '\t' | '\r' | '\n' => {
                self.advance_while(is_whitespace);
                TokenKind::Whitespace
            }
            '(' => TokenKind::ParenOpen,
            ')' => TokenKind::ParenClose,
            // Not SQL syntax, but used by JDBC-style escapes
            '{' => TokenKind::BraceOpen,
            '}' => TokenKind::BraceClose,
            '[' => TokenKind::BracketOpen,
            ']' => TokenKind::BracketClose,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semicolon,
            // Named parameter or array dimension separator
            ':' => TokenKind::Colon,
            '?' => TokenKind::PositionalParameter,
            '.' => {
                if self.peek().is_some_and(|c| c.is_ascii_digit()) {
                    self.scan_number(c)
                } else {
                    TokenKind::Period
                }
            }
            '-' => {
                if self.advance_if('-') {
                    self.advance_while(|c| c != '\n' && c != '\r');
                    TokenKind::LineComment
                } else {
                    TokenKind::Operator
                }
            }
            '/' => {
                if self.advance_if('*') {
                    self.scan_block_comment()?
                } else {
                    TokenKind::Operator
                }
            }
            '+' | '*' | '=' => TokenKind::Operator,
            '<' => {
                let _ = self.advance_if('>') || self.advance_if('=');
                TokenKind::Operator
            }
            '>' => {
                self.advance_if('=');
                TokenKind::Operator
            }
            '!' | '~' | '^' => {
                let _ = self.advance_if('=') || self.advance_if('<') || self.advance_if('>');
                TokenKind::Operator
            }
            '|' => {
                self.advance_if('|');
                TokenKind::Operator
            }
            '0'..='9' => self.scan_number(c),
            '\'' => self.scan_quoted('\'', Construct::StringLiteral)?,
            '"' => {
                self.scan_quoted('"', Construct::QuotedIdentifier)?;
                return Ok(Some(Token::quoted_identifier(
                    self.start,
                    &self.input[self.start..self.pos],
                )));
            }
            'q' | 'Q' if self.peek() == Some('\'') => self.scan_q_string()?,
            'x' | 'X' if self.peek() == Some('\'') => {
                self.advance();
                // Hex digits are not validated
                self.scan_quoted('\'', Construct::StringLiteral)?
            }
            _ => self.scan_word(),
        };

        Ok(Some(self.make_token(kind)))
    }

    /// Scans a block comment; the opening `/*` has been consumed.
    ///
    /// Firebird does not nest block comments, the first `*/` ends it.
    fn scan_block_comment(&mut self) -> Result<TokenKind, LexicalError> {
        loop {
            if self.require(Construct::BlockComment)? == '*' && self.advance_if('/') {
                return Ok(TokenKind::BlockComment);
            }
        }
    }

    /// Scans a numeric literal starting with `first` (a digit or `.`).
    ///
    /// Incomplete forms such as `0x` or `1.0e+` are accepted.
    fn scan_number(&mut self, first: char) -> TokenKind {
        if first == '0' && (self.advance_if('x') || self.advance_if('X')) {
            self.advance_while(|c| c.is_ascii_hexdigit());
            return TokenKind::NumericLiteral;
        }
        let mut seen_separator = first == '.';
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                self.advance();
            } else if c == '.' && !seen_separator {
                seen_separator = true;
                self.advance();
            } else {
                break;
            }
        }
        if self.advance_if('e') || self.advance_if('E') {
            let _ = self.advance_if('+') || self.advance_if('-');
            self.advance_while(|c| c.is_ascii_digit());
        }
        TokenKind::NumericLiteral
    }

    /// Scans up to and including the closing `quote`; the opening quote has
    /// been consumed. A doubled quote is an escaped quote.
    fn scan_quoted(&mut self, quote: char, construct: Construct) -> Result<TokenKind, LexicalError> {
        loop {
            if self.require(construct)? == quote && !self.advance_if(quote) {
                break;
            }
        }
        Ok(match construct {
            Construct::QuotedIdentifier => TokenKind::QuotedIdentifier {
                name: String::new(),
            },
            _ => TokenKind::StringLiteral,
        })
    }

    /// Scans `q'<open>...<close>'`; the `q` has been consumed.
    fn scan_q_string(&mut self) -> Result<TokenKind, LexicalError> {
        self.advance();
        let close = closing_delimiter(self.require(Construct::QStringLiteral)?);
        loop {
            if self.require(Construct::QStringLiteral)? == close && self.advance_if('\'') {
                return Ok(TokenKind::StringLiteral);
            }
        }
    }

    /// Scans the remainder of a word and classifies it.
    fn scan_word(&mut self) -> TokenKind {
        self.advance_while(|c| !is_token_boundary(c));
        let text = &self.input[self.start..self.pos];
        classify_word(text).unwrap_or_else(|| {
            if self.reserved_words.is_reserved_word(text) {
                TokenKind::ReservedWord
            } else {
                TokenKind::GenericIdentifier
            }
        })
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Result<Token, LexicalError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        match self.next_token() {
            Ok(Some(token)) => Some(Ok(token)),
            Ok(None) => {
                self.exhausted = true;
                None
            }
            Err(err) => {
                self.exhausted = true;
                self.pos = self.input.len();
                Some(Err(err))
            }
        }
    }
}

impl FusedIterator for Tokenizer<'_> {}

/// Words with a fixed token kind, independent of the reserved words.
fn classify_word(text: &str) -> Option<TokenKind> {
    const OPERATOR_WORDS: [&str; 5] = ["AND", "OR", "NOT", "IS", "LIKE"];
    if OPERATOR_WORDS.iter().any(|w| text.eq_ignore_ascii_case(w)) {
        Some(TokenKind::Operator)
    } else if text.eq_ignore_ascii_case("NULL") {
        Some(TokenKind::NullLiteral)
    } else if text.eq_ignore_ascii_case("TRUE") {
        Some(TokenKind::BooleanLiteral(BooleanValue::True))
    } else if text.eq_ignore_ascii_case("FALSE") {
        Some(TokenKind::BooleanLiteral(BooleanValue::False))
    } else if text.eq_ignore_ascii_case("UNKNOWN") {
        Some(TokenKind::BooleanLiteral(BooleanValue::Unknown))
    } else {
        None
    }
}

/// Closing delimiter of a Q-string for the given opening delimiter.
const fn closing_delimiter(open: char) -> char {
    match open {
        '(' => ')',
        '[' => ']',
        '{' => '}',
        '<' => '>',
        other => other,
    }
}

const fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

/// Characters that end a word.
const fn is_token_boundary(c: char) -> bool {
    matches!(
        c,
        ' ' | '\t'
            | '\r'
            | '\n'
            | '('
            | ')'
            | '{'
            | '}'
            | '['
            | ']'
            | '\''
            | '"'
            | ':'
            | ';'
            | ','
            | '.'
            | '+'
            | '-'
            | '/'
            | '*'
            | '='
            | '>'
            | '<'
            | '~'
            | '^'
            | '!'
            | '?'
            | '|'
    )
}
