#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use sqlprobe_core::detect::{detect_statement, StatementDetector, StatementIdentification};
use sqlprobe_core::dialect::FirebirdReservedWords;
use sqlprobe_core::lexer::{Token, TokenKind, Tokenizer};
use sqlprobe_core::parser::SqlParser;

pub const WORDS: FirebirdReservedWords = FirebirdReservedWords::Firebird50;

/// Outcome of running a fresh detector over a statement.
pub struct Detection {
    pub identification: StatementIdentification,
    pub completed: bool,
}

pub fn detect(sql: &str, detect_returning: bool) -> Detection {
    let detector = Rc::new(RefCell::new(StatementDetector::new(detect_returning)));
    let parser = SqlParser::builder(&WORDS)
        .with_visitor(detector.clone())
        .of(sql);
    parser
        .parse()
        .unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e:?}"));
    let identification = detector.borrow().to_statement_identification();
    Detection {
        identification,
        completed: parser.is_completed(),
    }
}

pub fn identify(sql: &str) -> StatementIdentification {
    detect_statement(sql, &WORDS, true)
        .unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e:?}"))
}

pub fn tokens(sql: &str) -> Vec<Token> {
    Tokenizer::new(sql, &WORDS)
        .collect::<Result<Vec<_>, _>>()
        .unwrap_or_else(|e| panic!("Failed to tokenize: {sql}\nError: {e:?}"))
}

pub fn generic(start: usize, text: &str) -> Token {
    Token::new(TokenKind::GenericIdentifier, start, text)
}

pub fn quoted(start: usize, text: &str) -> Token {
    Token::quoted_identifier(start, text)
}
