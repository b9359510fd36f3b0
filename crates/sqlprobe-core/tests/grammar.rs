//! Tests for detection over realistic statements and tokenizer properties.

mod common;
use common::*;

use sqlprobe_core::detect::{detect_statement, StatementKind};
use sqlprobe_core::dialect::{FirebirdReservedWords, ReservedWords};
use sqlprobe_core::lexer::{Construct, Token, TokenKind, Tokenizer};
use sqlprobe_core::parser::ParseError;

#[track_caller]
fn assert_dml(sql: &str, kind: StatementKind, table: &str, returning: bool) {
    let identification = identify(sql);
    assert_eq!(identification.kind, kind, "kind of {sql}");
    assert_eq!(identification.table_name(), Some(table), "table of {sql}");
    assert_eq!(
        identification.returning_clause_detected, returning,
        "returning of {sql}"
    );
}

const MERGE_BODY: &str = "\n  USING purchases p\n  \
    ON p.title = b.title and p.type = q'<bk>'\n  \
    WHEN MATCHED THEN\n    \
    UPDATE SET b.desc = b.desc || '; ' || p.desc\n  \
    WHEN NOT MATCHED THEN\n    \
    INSERT (title, desc, bought) values (p.title, p.desc, p.bought)";

// ===================================================================
// INSERT
// ===================================================================

#[test]
fn insert_values() {
    assert_dml(
        "insert into someTable(a, \"\u{442}\u{435}\"\"\u{441}\u{442}\", aaa) values('a', -1.23, a(a,aa))",
        StatementKind::Insert,
        "someTable",
        false,
    );
    assert_dml(
        "insert into \"someTable\"(a, b, c) values('a', -1.23, a(a,aa))",
        StatementKind::Insert,
        "\"someTable\"",
        false,
    );
}

#[test]
fn insert_values_returning() {
    assert_dml(
        "insert into someTable(a, b, c) values('a', -1.23, a(a,aa)) returning id",
        StatementKind::Insert,
        "someTable",
        true,
    );
    assert_dml(
        "insert into someTable(a, b, c) values('a', -1.23, a(a,aa)) returning id as \"ID\", b,c no_as",
        StatementKind::Insert,
        "someTable",
        true,
    );
}

#[test]
fn insert_commented_out_returning() {
    assert_dml(
        "insert into someTable(a, b, c) values('a', -1.23, a(a,aa)) -- returning id",
        StatementKind::Insert,
        "someTable",
        false,
    );
    assert_dml(
        "insert into someTable(a, b, c) values('a', -1.23, a(a,aa)) /* returning id */",
        StatementKind::Insert,
        "someTable",
        false,
    );
}

#[test]
fn insert_select() {
    assert_dml(
        "Insert Into someTable Select * From anotherTable",
        StatementKind::Insert,
        "someTable",
        false,
    );
    assert_dml(
        "Insert Into someTable Select * From anotherTable returning id",
        StatementKind::Insert,
        "someTable",
        true,
    );
}

#[test]
fn insert_with_case() {
    assert_dml(
        "Insert Into someTable ( col1, col2) values((case when a = 1 Then 2 else 3 end), 2)",
        StatementKind::Insert,
        "someTable",
        false,
    );
    assert_dml(
        "Insert Into someTable ( col1, col2) values((case when a = 1 Then 2 else 3 end), 2) returning id",
        StatementKind::Insert,
        "someTable",
        true,
    );
}

#[test]
fn insert_default_values() {
    assert_dml("INSERT INTO someTable DEFAULT VALUES", StatementKind::Insert, "someTable", false);
    assert_dml(
        "INSERT INTO someTable DEFAULT VALUES RETURNING \"ID\"",
        StatementKind::Insert,
        "someTable",
        true,
    );
}

#[test]
fn insert_q_string() {
    assert_dml(
        "insert into someTable values (Q'[a'bc]')",
        StatementKind::Insert,
        "someTable",
        false,
    );
    assert_dml(
        "insert into someTable values (Q'[a'bc]') returning id, \"ABC\"",
        StatementKind::Insert,
        "someTable",
        true,
    );
}

// ===================================================================
// UPDATE and DELETE
// ===================================================================

#[test]
fn update() {
    assert_dml(
        "Update someTable Set col1 = 25, col2 = 'abc' Where 1=0",
        StatementKind::Update,
        "someTable",
        false,
    );
    assert_dml(
        "Update \"some Table\" Set col1 = 25, col2 = 'abc' Where 1=0",
        StatementKind::Update,
        "\"some Table\"",
        false,
    );
    assert_dml(
        "Update someTable Set col1 = 25, col2 = 'abc' Where 1=0 Returning col3",
        StatementKind::Update,
        "someTable",
        true,
    );
}

#[test]
fn delete() {
    assert_dml("delete from \"someTable\"", StatementKind::Delete, "\"someTable\"", false);
    assert_dml(
        "Delete From someTable Returning col3",
        StatementKind::Delete,
        "someTable",
        true,
    );
    assert_dml(
        "Delete From someTable where 1 = 1 Returning col3",
        StatementKind::Delete,
        "someTable",
        true,
    );
}

// ===================================================================
// MERGE
// ===================================================================

#[test]
fn merge() {
    assert_dml(
        &format!("MERGE INTO books b{MERGE_BODY}"),
        StatementKind::Merge,
        "books",
        false,
    );
    assert_dml(
        &format!("MERGE INTO \"more books\" b{MERGE_BODY}"),
        StatementKind::Merge,
        "\"more books\"",
        false,
    );
    assert_dml(
        &format!("MERGE INTO books b{MERGE_BODY}\n  RETURNING id, \"OTHER COLUMN\""),
        StatementKind::Merge,
        "books",
        true,
    );
}

// ===================================================================
// Tokenizer properties
// ===================================================================

#[test]
fn tokens_cover_input() {
    let sql = format!("MERGE INTO books b{MERGE_BODY}\n  RETURNING id, \"OTHER COLUMN\";");
    let rebuilt: String = tokens(&sql).iter().map(Token::text).collect();
    assert_eq!(rebuilt, sql);

    let mut expected_start = 0;
    for token in tokens(&sql) {
        assert_eq!(token.start(), expected_start);
        expected_start = token.end();
    }
    assert_eq!(expected_start, sql.len());
}

#[test]
fn reserved_words_match_dialect() {
    let sql = format!("MERGE INTO books b{MERGE_BODY}");
    for words in FirebirdReservedWords::ALL {
        for token in Tokenizer::new(&sql, &words) {
            let token = token.unwrap();
            match token.kind() {
                TokenKind::ReservedWord => assert!(words.is_reserved_word(token.text())),
                TokenKind::GenericIdentifier => assert!(!words.is_reserved_word(token.text())),
                _ => {}
            }
        }
    }
}

#[test]
fn q_string_delimiters() {
    for (start, end) in [('(', ')'), ('[', ']'), ('{', '}'), ('<', '>'), ('#', '#'), ('q', 'q')] {
        let input = format!("q'{start}a'bc{end}'");
        let tokens = tokens(&input);
        assert_eq!(tokens.len(), 1, "for {input}");
        assert_eq!(tokens[0].kind(), &TokenKind::StringLiteral, "for {input}");
    }
}

// ===================================================================
// Lexical errors
// ===================================================================

#[test]
fn unterminated_string_in_dml_fails() {
    let err = detect_statement("insert into t values ('abc", &WORDS, true).unwrap_err();
    match err {
        ParseError::Lexical(lexical) => {
            assert_eq!(lexical.construct, Construct::StringLiteral);
            assert_eq!(lexical.span.start, 22);
            assert_eq!(lexical.span.end, 26);
        }
        other => panic!("Expected lexical error, got {other:?}"),
    }
}

#[test]
fn error_after_detection_is_not_reached() {
    let identification = detect_statement("select 'abc", &WORDS, true).unwrap();
    assert_eq!(identification.kind, StatementKind::Select);
}
