//! Token dispatching parser.

use std::cell::{Cell, RefCell};
use std::iter::Peekable;
use std::rc::Rc;

use tracing::{debug, trace, warn};

use super::error::{ParseError, Result, UsageError};
use super::visitor::{same_visitor, Change, SharedVisitor, VisitorRegistrar};
use crate::dialect::ReservedWords;
use crate::lexer::{LexicalError, Token, Tokenizer};

/// A parser over the tokens of a statement text.
pub type StatementParser<'a> = SqlParser<Tokenizer<'a>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParserState {
    NotStarted,
    Started,
    Completed,
}

/// Resets the parsing flag when dispatch ends, including on early return.
struct ParsingGuard<'a>(&'a Cell<bool>);

impl<'a> ParsingGuard<'a> {
    fn enter(flag: &'a Cell<bool>) -> Self {
        flag.set(true);
        Self(flag)
    }
}

impl Drop for ParsingGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// Pushes the tokens of a single-pass source to registered visitors.
///
/// Parsing runs until the source is exhausted or no visitor is left. In the
/// latter case the parser pauses with the source positioned after the last
/// delivered token; registering a visitor and calling
/// [`resume_parsing`](Self::resume_parsing) continues from there.
///
/// All methods take `&self`, so visitors holding a reference to the parser
/// may call back into it. Membership changes requested during dispatch are
/// applied after the current token has been delivered.
pub struct SqlParser<I>
where
    I: Iterator<Item = core::result::Result<Token, LexicalError>>,
{
    tokens: RefCell<Peekable<I>>,
    visitors: RefCell<Vec<SharedVisitor>>,
    pending: RefCell<Vec<Change>>,
    state: Cell<ParserState>,
    parsing: Cell<bool>,
}

impl<I> SqlParser<I>
where
    I: Iterator<Item = core::result::Result<Token, LexicalError>>,
{
    /// Creates a parser over `tokens` without visitors.
    #[must_use]
    pub fn new(tokens: I) -> Self {
        Self {
            tokens: RefCell::new(tokens.peekable()),
            visitors: RefCell::new(Vec::new()),
            pending: RefCell::new(Vec::new()),
            state: Cell::new(ParserState::NotStarted),
            parsing: Cell::new(false),
        }
    }

    /// Registers a visitor. Registering the same visitor twice has no effect.
    ///
    /// During dispatch the visitor receives tokens from the next token on.
    pub fn add_visitor(&self, visitor: SharedVisitor) {
        if self.parsing.get() {
            self.pending.borrow_mut().push(Change::Add(visitor));
        } else {
            self.apply(Change::Add(visitor));
        }
    }

    /// Unregisters a visitor.
    pub fn remove_visitor(&self, visitor: &SharedVisitor) {
        let change = Change::Remove(Rc::clone(visitor));
        if self.parsing.get() {
            self.pending.borrow_mut().push(change);
        } else {
            self.apply(change);
        }
    }

    /// Starts parsing.
    ///
    /// # Errors
    ///
    /// Returns [`UsageError::AlreadyStarted`] if parsing was started before,
    /// or any error of [`resume_parsing`](Self::resume_parsing).
    pub fn parse(&self) -> Result<()> {
        if self.state.get() != ParserState::NotStarted {
            return Err(UsageError::AlreadyStarted.into());
        }
        self.resume_parsing()
    }

    /// Continues parsing until the source is exhausted or no visitor is left.
    ///
    /// # Errors
    ///
    /// - [`UsageError::InProgress`] when called from a visitor callback.
    /// - [`UsageError::AlreadyCompleted`] when all tokens were consumed.
    /// - [`UsageError::NoVisitors`] when no visitor is registered.
    /// - [`ParseError::Lexical`] when the source reports a lexical error.
    pub fn resume_parsing(&self) -> Result<()> {
        if self.parsing.get() {
            return Err(UsageError::InProgress.into());
        }
        if self.state.get() == ParserState::Completed {
            return Err(UsageError::AlreadyCompleted.into());
        }
        if self.visitors.borrow().is_empty() {
            return Err(UsageError::NoVisitors.into());
        }

        let _guard = ParsingGuard::enter(&self.parsing);
        self.state.set(ParserState::Started);
        self.dispatch_loop()
    }

    /// Returns true once parsing was started.
    #[must_use]
    pub fn is_started(&self) -> bool {
        self.state.get() != ParserState::NotStarted
    }

    /// Returns true while tokens are being dispatched.
    #[must_use]
    pub fn is_parsing(&self) -> bool {
        self.parsing.get()
    }

    /// Returns true once the token source is exhausted.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.state.get() == ParserState::Completed
    }

    fn dispatch_loop(&self) -> Result<()> {
        loop {
            if self.visitors.borrow().is_empty() {
                self.pause_or_complete();
                return Ok(());
            }
            let next = self.tokens.borrow_mut().next();
            match next {
                Some(Ok(token)) => self.dispatch_token(&token),
                Some(Err(err)) => {
                    debug!(%err, "lexical error while parsing");
                    return Err(ParseError::Lexical(err));
                }
                None => {
                    self.notify_complete();
                    return Ok(());
                }
            }
        }
    }

    fn dispatch_token(&self, token: &Token) {
        trace!(position = token.start(), kind = %token.kind(), text = token.text(), "dispatching token");
        let snapshot = self.visitors.borrow().clone();
        for visitor in &snapshot {
            let mut registrar = VisitorRegistrar::new(visitor, &self.pending);
            match visitor.try_borrow_mut() {
                Ok(mut v) => v.visit_token(token, &mut registrar),
                Err(_) => warn!(position = token.start(), "visitor busy, token skipped"),
            }
        }
        self.apply_pending();
    }

    fn notify_complete(&self) {
        let snapshot = self.visitors.borrow().clone();
        debug!(visitors = snapshot.len(), "token source exhausted, notifying visitors");
        for visitor in &snapshot {
            let mut registrar = VisitorRegistrar::new(visitor, &self.pending);
            match visitor.try_borrow_mut() {
                Ok(mut v) => v.complete(&mut registrar),
                Err(_) => warn!("visitor busy, completion skipped"),
            }
        }
        self.apply_pending();
        self.state.set(ParserState::Completed);
    }

    /// Called with no visitor left: completes if the source is exhausted,
    /// pauses otherwise. A pending lexical error is left for the next resume.
    fn pause_or_complete(&self) {
        if self.tokens.borrow_mut().peek().is_none() {
            debug!("no visitors left and token source exhausted, parser completed");
            self.state.set(ParserState::Completed);
        } else {
            debug!("no visitors left, parser paused");
        }
    }

    fn apply_pending(&self) {
        let changes = core::mem::take(&mut *self.pending.borrow_mut());
        for change in changes {
            self.apply(change);
        }
    }

    fn apply(&self, change: Change) {
        let mut visitors = self.visitors.borrow_mut();
        match change {
            Change::Add(visitor) => {
                if !visitors.iter().any(|v| same_visitor(v, &visitor)) {
                    visitors.push(visitor);
                    debug!(visitors = visitors.len(), "visitor added");
                }
            }
            Change::Remove(visitor) => {
                let before = visitors.len();
                visitors.retain(|v| !same_visitor(v, &visitor));
                if visitors.len() != before {
                    debug!(visitors = visitors.len(), "visitor removed");
                }
            }
        }
    }
}

impl SqlParser<Tokenizer<'_>> {
    /// Returns a builder for a parser over a statement text.
    #[must_use]
    pub fn builder(reserved_words: &dyn ReservedWords) -> ParserBuilder<'_> {
        ParserBuilder {
            reserved_words,
            visitors: Vec::new(),
        }
    }
}

/// Builder for a [`StatementParser`] with initial visitors.
pub struct ParserBuilder<'a> {
    reserved_words: &'a dyn ReservedWords,
    visitors: Vec<SharedVisitor>,
}

impl<'a> ParserBuilder<'a> {
    /// Registers a visitor on the parser to build.
    #[must_use]
    pub fn with_visitor(mut self, visitor: SharedVisitor) -> Self {
        self.visitors.push(visitor);
        self
    }

    /// Builds a parser over `text`.
    #[must_use]
    pub fn of(self, text: &'a str) -> StatementParser<'a> {
        let parser = SqlParser::new(Tokenizer::new(text, self.reserved_words));
        for visitor in self.visitors {
            parser.add_visitor(visitor);
        }
        parser
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Weak;

    use super::*;
    use crate::dialect::FirebirdReservedWords;
    use crate::lexer::{Construct, Span, TokenKind};
    use crate::parser::TokenVisitor;

    type VecParser = SqlParser<std::vec::IntoIter<core::result::Result<Token, LexicalError>>>;

    fn words(texts: &[&str]) -> Vec<core::result::Result<Token, LexicalError>> {
        let mut start = 0;
        texts
            .iter()
            .map(|text| {
                let token = Token::new(TokenKind::GenericIdentifier, start, *text);
                start += text.len();
                Ok(token)
            })
            .collect()
    }

    /// Records tokens and leaves after `limit` tokens.
    #[derive(Default)]
    struct Recorder {
        limit: Option<usize>,
        seen: Vec<String>,
        completed: usize,
    }

    impl Recorder {
        fn leaving_after(limit: usize) -> Rc<RefCell<Self>> {
            Rc::new(RefCell::new(Self {
                limit: Some(limit),
                ..Self::default()
            }))
        }

        fn staying() -> Rc<RefCell<Self>> {
            Rc::new(RefCell::new(Self::default()))
        }
    }

    impl TokenVisitor for Recorder {
        fn visit_token(&mut self, token: &Token, registrar: &mut VisitorRegistrar<'_>) {
            self.seen.push(token.text().to_string());
            if self.limit == Some(self.seen.len()) {
                registrar.remove_current();
            }
        }

        fn complete(&mut self, _registrar: &mut VisitorRegistrar<'_>) {
            self.completed += 1;
        }
    }

    #[test]
    fn test_parse_delivers_all_tokens_and_completes() {
        let recorder = Recorder::staying();
        let parser = SqlParser::new(words(&["a", "b", "c"]).into_iter());
        parser.add_visitor(recorder.clone());

        parser.parse().unwrap();

        assert!(parser.is_completed());
        assert_eq!(recorder.borrow().seen, vec!["a", "b", "c"]);
        assert_eq!(recorder.borrow().completed, 1);
    }

    #[test]
    fn test_pause_and_resume() {
        let v1 = Recorder::leaving_after(1);
        let v2 = Recorder::leaving_after(2);
        let parser = SqlParser::new(words(&["A", "B", "C"]).into_iter());
        parser.add_visitor(v1.clone());
        parser.add_visitor(v2.clone());

        parser.parse().unwrap();
        assert!(parser.is_started());
        assert!(!parser.is_completed());
        assert_eq!(v1.borrow().seen, vec!["A"]);
        assert_eq!(v2.borrow().seen, vec!["A", "B"]);

        let v3 = Recorder::staying();
        parser.add_visitor(v3.clone());
        parser.resume_parsing().unwrap();

        assert!(parser.is_completed());
        assert_eq!(v3.borrow().seen, vec!["C"]);
        assert_eq!(v3.borrow().completed, 1);
        assert_eq!(v1.borrow().completed, 0);
        assert_eq!(v2.borrow().completed, 0);
    }

    #[test]
    fn test_leaving_on_last_token_completes_without_notice() {
        let v1 = Recorder::leaving_after(2);
        let parser = SqlParser::new(words(&["A", "B"]).into_iter());
        parser.add_visitor(v1.clone());

        parser.parse().unwrap();

        assert!(parser.is_completed());
        assert_eq!(v1.borrow().completed, 0);
    }

    #[test]
    fn test_empty_source_only_notifies_completion() {
        let v1 = Recorder::staying();
        let parser = SqlParser::new(Vec::new().into_iter());
        parser.add_visitor(v1.clone());

        parser.parse().unwrap();

        assert!(parser.is_completed());
        assert!(v1.borrow().seen.is_empty());
        assert_eq!(v1.borrow().completed, 1);
    }

    #[test]
    fn test_usage_errors() {
        let parser = SqlParser::new(words(&["A"]).into_iter());
        assert_eq!(
            parser.parse().unwrap_err().usage(),
            Some(UsageError::NoVisitors)
        );

        let v1 = Recorder::staying();
        parser.add_visitor(v1.clone());
        parser.parse().unwrap();
        assert_eq!(
            parser.parse().unwrap_err().usage(),
            Some(UsageError::AlreadyStarted)
        );
        assert_eq!(
            parser.resume_parsing().unwrap_err().usage(),
            Some(UsageError::AlreadyCompleted)
        );
    }

    #[test]
    fn test_duplicate_and_removed_visitors() {
        let v1 = Recorder::staying();
        let shared: SharedVisitor = v1.clone();
        let parser = SqlParser::new(words(&["A"]).into_iter());
        parser.add_visitor(shared.clone());
        parser.add_visitor(shared.clone());
        parser.parse().unwrap();
        assert_eq!(v1.borrow().seen, vec!["A"]);

        let parser = SqlParser::new(words(&["A"]).into_iter());
        parser.add_visitor(shared.clone());
        parser.remove_visitor(&shared);
        assert_eq!(
            parser.parse().unwrap_err().usage(),
            Some(UsageError::NoVisitors)
        );
    }

    /// Removes another visitor and adds a new one on the first token.
    struct Rearranger {
        victim: SharedVisitor,
        newcomer: SharedVisitor,
        done: bool,
    }

    impl TokenVisitor for Rearranger {
        fn visit_token(&mut self, _token: &Token, registrar: &mut VisitorRegistrar<'_>) {
            if !self.done {
                self.done = true;
                registrar.remove_visitor(&self.victim);
                registrar.add_visitor(self.newcomer.clone());
            }
        }

        fn complete(&mut self, _registrar: &mut VisitorRegistrar<'_>) {}
    }

    #[test]
    fn test_changes_apply_from_next_token() {
        let victim = Recorder::staying();
        let newcomer = Recorder::staying();
        let rearranger = Rc::new(RefCell::new(Rearranger {
            victim: victim.clone(),
            newcomer: newcomer.clone(),
            done: false,
        }));
        let parser = SqlParser::new(words(&["A", "B"]).into_iter());
        parser.add_visitor(rearranger);
        parser.add_visitor(victim.clone());

        parser.parse().unwrap();

        assert_eq!(victim.borrow().seen, vec!["A"]);
        assert_eq!(newcomer.borrow().seen, vec!["B"]);
        assert_eq!(victim.borrow().completed, 0);
        assert_eq!(newcomer.borrow().completed, 1);
    }

    /// Calls back into the parser during dispatch.
    struct Reentrant {
        parser: Weak<VecParser>,
        errors: Vec<UsageError>,
        saw_parsing: bool,
        late: SharedVisitor,
    }

    impl TokenVisitor for Reentrant {
        fn visit_token(&mut self, _token: &Token, registrar: &mut VisitorRegistrar<'_>) {
            if let Some(parser) = self.parser.upgrade() {
                self.saw_parsing = parser.is_parsing();
                self.errors.extend(parser.resume_parsing().err().and_then(|e| e.usage()));
                self.errors.extend(parser.parse().err().and_then(|e| e.usage()));
                parser.add_visitor(self.late.clone());
            }
            registrar.remove_current();
        }

        fn complete(&mut self, _registrar: &mut VisitorRegistrar<'_>) {}
    }

    #[test]
    fn test_reentrant_calls() {
        let late = Recorder::staying();
        let parser = Rc::new(SqlParser::new(words(&["A", "B"]).into_iter()));
        let reentrant = Rc::new(RefCell::new(Reentrant {
            parser: Rc::downgrade(&parser),
            errors: Vec::new(),
            saw_parsing: false,
            late: late.clone(),
        }));
        parser.add_visitor(reentrant.clone());

        parser.parse().unwrap();

        assert!(!parser.is_parsing());
        assert!(parser.is_completed());
        let reentrant = reentrant.borrow();
        assert!(reentrant.saw_parsing);
        assert_eq!(
            reentrant.errors,
            vec![UsageError::InProgress, UsageError::AlreadyStarted]
        );
        assert_eq!(late.borrow().seen, vec!["B"]);
    }

    #[test]
    fn test_lexical_error_then_resume_completes() {
        let v1 = Recorder::staying();
        let parser = SqlParser::builder(&FirebirdReservedWords::Firebird50)
            .with_visitor(v1.clone())
            .of("select 'abc");

        let err = parser.parse().unwrap_err();
        assert_eq!(
            err,
            ParseError::Lexical(LexicalError::unterminated(
                Construct::StringLiteral,
                Span::new(7, 11)
            ))
        );
        assert!(parser.is_started());
        assert!(!parser.is_completed());
        assert!(!parser.is_parsing());
        assert_eq!(v1.borrow().seen, vec!["select", " "]);

        parser.resume_parsing().unwrap();
        assert!(parser.is_completed());
        assert_eq!(v1.borrow().completed, 1);
    }

    #[test]
    fn test_pause_before_lexical_error() {
        let parser = SqlParser::builder(&FirebirdReservedWords::Firebird50)
            .with_visitor(Recorder::leaving_after(1))
            .of("a 'abc");

        parser.parse().unwrap();
        assert!(!parser.is_completed());

        let v2 = Recorder::leaving_after(1);
        parser.add_visitor(v2.clone());
        parser.resume_parsing().unwrap();
        assert_eq!(v2.borrow().seen, vec![" "]);
        assert!(!parser.is_completed());

        parser.add_visitor(Recorder::staying());
        assert!(matches!(
            parser.resume_parsing(),
            Err(ParseError::Lexical(_))
        ));
    }
}
