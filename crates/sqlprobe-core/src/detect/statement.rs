//! Detection of the statement kind and target table.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

use super::{ReturningClauseDetector, StatementIdentification, StatementKind};
use crate::dialect::ReservedWords;
use crate::lexer::{Token, TokenKind};
use crate::parser::{self, SharedVisitor, SqlParser, TokenVisitor, VisitorRegistrar};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Before the first significant token.
    Start,
    /// After `EXECUTE`.
    Execute,
    /// After `UPDATE`.
    Update,
    /// After `UPDATE OR`.
    PossiblyUpdateOrInsert,
    /// After `DELETE`.
    Delete,
    /// After `INSERT` or `UPDATE OR INSERT`.
    Insert,
    /// After `INSERT INTO`.
    InsertInto,
    /// After `MERGE`.
    Merge,
    /// Expecting the target table of `UPDATE`, `DELETE FROM` or `MERGE INTO`.
    DmlTarget,
    /// After the target table, where an alias may follow.
    DmlPossibleAlias,
    /// After `AS` following the target table.
    DmlAlias,
    /// Kind and table known, the rest of the statement is not examined here.
    FindReturning,
    /// Nothing left to detect.
    Done,
}

/// Outcome of one significant token.
enum Step {
    Next(State),
    Done,
    /// Continue with a returning clause scan; `forward` hands the current
    /// token to the new detector.
    FindReturning {
        forward: bool,
    },
}

/// Visitor detecting the kind of statement, the target table of DML
/// statements and, optionally, the presence of a `RETURNING` clause.
///
/// The detector leaves the parser as soon as it has decided. When returning
/// detection is enabled it registers a [`ReturningClauseDetector`] to scan
/// the remainder of the statement.
///
/// # Example
///
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// use sqlprobe_core::detect::{StatementDetector, StatementKind};
/// use sqlprobe_core::dialect::FirebirdReservedWords;
/// use sqlprobe_core::parser::SqlParser;
///
/// let words = FirebirdReservedWords::latest();
/// let detector = Rc::new(RefCell::new(StatementDetector::new(true)));
/// let parser = SqlParser::builder(&words)
///     .with_visitor(detector.clone())
///     .of("insert into sometable (id) values (?) returning id");
/// parser.parse().unwrap();
///
/// let detector = detector.borrow();
/// assert_eq!(detector.statement_kind(), StatementKind::Insert);
/// assert_eq!(detector.table_name_token().map(|t| t.text()), Some("sometable"));
/// assert!(detector.returning_clause_detected());
/// ```
#[derive(Debug)]
pub struct StatementDetector {
    detect_returning: bool,
    state: State,
    kind: StatementKind,
    table_name_token: Option<Token>,
    returning: Option<Rc<RefCell<ReturningClauseDetector>>>,
}

impl StatementDetector {
    /// Creates a detector; `detect_returning` enables the `RETURNING` scan.
    #[must_use]
    pub const fn new(detect_returning: bool) -> Self {
        Self {
            detect_returning,
            state: State::Start,
            kind: StatementKind::Unknown,
            table_name_token: None,
            returning: None,
        }
    }

    /// The detected kind of statement.
    #[must_use]
    pub const fn statement_kind(&self) -> StatementKind {
        self.kind
    }

    /// Token naming the target table, if the statement has one.
    #[must_use]
    pub const fn table_name_token(&self) -> Option<&Token> {
        self.table_name_token.as_ref()
    }

    /// Returns true if a `RETURNING` clause was found.
    #[must_use]
    pub fn returning_clause_detected(&self) -> bool {
        self.returning
            .as_ref()
            .is_some_and(|r| r.borrow().returning_clause_detected())
    }

    /// Returns the detection result.
    #[must_use]
    pub fn to_statement_identification(&self) -> StatementIdentification {
        StatementIdentification {
            kind: self.kind,
            table_name_token: self.table_name_token.clone(),
            returning_clause_detected: self.returning_clause_detected(),
        }
    }

    fn advance(&mut self, token: &Token) -> Step {
        match self.state {
            State::Start => self.on_start(token),
            State::Execute => {
                if token.is_reserved("PROCEDURE") {
                    self.kind = StatementKind::ExecuteProcedure;
                    Step::Done
                } else {
                    self.other()
                }
            }
            State::Update => {
                if token.is_operator("OR") {
                    Step::Next(State::PossiblyUpdateOrInsert)
                } else {
                    self.on_dml_target(token)
                }
            }
            State::PossiblyUpdateOrInsert => {
                if token.is_reserved("INSERT") {
                    self.kind = StatementKind::UpdateOrInsert;
                    Step::Next(State::Insert)
                } else {
                    self.other()
                }
            }
            State::Delete => self.expect_reserved(token, "FROM", State::DmlTarget),
            State::Insert => self.expect_reserved(token, "INTO", State::InsertInto),
            State::Merge => self.expect_reserved(token, "INTO", State::DmlTarget),
            State::InsertInto => {
                if token.is_valid_identifier() {
                    self.table_name_token = Some(token.clone());
                    Step::FindReturning { forward: false }
                } else {
                    self.other()
                }
            }
            State::DmlTarget => self.on_dml_target(token),
            State::DmlPossibleAlias => self.on_possible_alias(token),
            State::DmlAlias => {
                if token.is_valid_identifier() {
                    Step::FindReturning { forward: false }
                } else {
                    self.other()
                }
            }
            State::FindReturning | State::Done => Step::Done,
        }
    }

    fn on_start(&mut self, token: &Token) -> Step {
        if token.kind() != &TokenKind::ReservedWord {
            return self.other();
        }
        let (kind, next) = match token.text().to_ascii_uppercase().as_str() {
            "SELECT" | "WITH" => {
                self.kind = StatementKind::Select;
                return Step::Done;
            }
            "EXECUTE" => (StatementKind::Other, State::Execute),
            "UPDATE" => (StatementKind::Update, State::Update),
            "DELETE" => (StatementKind::Delete, State::Delete),
            "INSERT" => (StatementKind::Insert, State::Insert),
            "MERGE" => (StatementKind::Merge, State::Merge),
            _ => return self.other(),
        };
        self.kind = kind;
        Step::Next(next)
    }

    fn on_dml_target(&mut self, token: &Token) -> Step {
        if token.is_valid_identifier() {
            self.table_name_token = Some(token.clone());
            Step::Next(State::DmlPossibleAlias)
        } else {
            self.other()
        }
    }

    fn on_possible_alias(&mut self, token: &Token) -> Step {
        if self.kind == StatementKind::Delete
            && token.kind() == &TokenKind::GenericIdentifier
            && token.eq_ignore_case("RETURNING")
        {
            return Step::FindReturning { forward: true };
        }
        if token.is_valid_identifier() {
            Step::FindReturning { forward: false }
        } else if token.is_reserved("AS") {
            Step::Next(State::DmlAlias)
        } else if token.kind() == &TokenKind::ReservedWord {
            Step::FindReturning { forward: true }
        } else {
            self.other()
        }
    }

    fn expect_reserved(&mut self, token: &Token, word: &str, next: State) -> Step {
        if token.is_reserved(word) {
            Step::Next(next)
        } else {
            self.other()
        }
    }

    fn other(&mut self) -> Step {
        self.kind = StatementKind::Other;
        self.table_name_token = None;
        Step::Done
    }
}

impl Default for StatementDetector {
    fn default() -> Self {
        Self::new(true)
    }
}

impl TokenVisitor for StatementDetector {
    fn visit_token(&mut self, token: &Token, registrar: &mut VisitorRegistrar<'_>) {
        if token.is_whitespace_or_comment() {
            return;
        }
        match self.advance(token) {
            Step::Next(state) => self.state = state,
            Step::Done => {
                self.state = State::Done;
                debug!(kind = %self.kind, "statement detected");
                registrar.remove_current();
            }
            Step::FindReturning { forward } => {
                self.state = State::FindReturning;
                debug!(
                    kind = %self.kind,
                    table = self.table_name_token.as_ref().map(Token::text),
                    "statement detected"
                );
                registrar.remove_current();
                if self.detect_returning {
                    let detector = Rc::new(RefCell::new(ReturningClauseDetector::new()));
                    let shared: SharedVisitor = detector.clone();
                    registrar.add_visitor(Rc::clone(&shared));
                    if forward {
                        registrar.forward_token(&shared, token);
                    }
                    self.returning = Some(detector);
                }
            }
        }
    }

    fn complete(&mut self, _registrar: &mut VisitorRegistrar<'_>) {
        match self.state {
            State::Start | State::Done | State::FindReturning | State::DmlPossibleAlias => {}
            _ => {
                self.kind = StatementKind::Other;
                self.table_name_token = None;
            }
        }
        self.state = State::Done;
        debug!(kind = %self.kind, "statement detection completed");
    }
}

/// Detects the kind, target table and optionally the `RETURNING` clause of
/// a statement.
///
/// # Errors
///
/// Returns [`ParseError::Lexical`](parser::ParseError::Lexical) if the
/// statement cannot be tokenized up to the point detection needed.
pub fn detect_statement(
    text: &str,
    reserved_words: &dyn ReservedWords,
    detect_returning: bool,
) -> parser::Result<StatementIdentification> {
    let detector = Rc::new(RefCell::new(StatementDetector::new(detect_returning)));
    let parser = SqlParser::builder(reserved_words)
        .with_visitor(detector.clone())
        .of(text);
    parser.parse()?;
    let identification = detector.borrow().to_statement_identification();
    Ok(identification)
}
