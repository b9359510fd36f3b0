//! Token visitors and the registrar handed to them during dispatch.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::warn;

use crate::lexer::Token;

/// A visitor shared between the caller and a parser.
pub type SharedVisitor = Rc<RefCell<dyn TokenVisitor>>;

/// Receives the tokens of a statement from a [`SqlParser`](super::SqlParser).
pub trait TokenVisitor {
    /// Called for each token while the visitor is registered.
    ///
    /// Membership changes made through `registrar` take effect from the next
    /// token on.
    fn visit_token(&mut self, token: &Token, registrar: &mut VisitorRegistrar<'_>);

    /// Called once when the token source is exhausted.
    fn complete(&mut self, registrar: &mut VisitorRegistrar<'_>);
}

/// Returns true if both handles point to the same visitor.
pub(crate) fn same_visitor(a: &SharedVisitor, b: &SharedVisitor) -> bool {
    std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
}

/// A pending change to the set of registered visitors.
pub(crate) enum Change {
    Add(SharedVisitor),
    Remove(SharedVisitor),
}

/// Handle given to a visitor during a callback to change the set of visitors.
///
/// Changes are queued and applied by the parser once the current token (or
/// completion notice) has been delivered to every visitor.
pub struct VisitorRegistrar<'a> {
    current: &'a SharedVisitor,
    changes: &'a RefCell<Vec<Change>>,
}

impl<'a> VisitorRegistrar<'a> {
    pub(crate) const fn new(current: &'a SharedVisitor, changes: &'a RefCell<Vec<Change>>) -> Self {
        Self { current, changes }
    }

    /// Registers `visitor`; it receives tokens from the next token on.
    pub fn add_visitor(&mut self, visitor: SharedVisitor) {
        self.changes.borrow_mut().push(Change::Add(visitor));
    }

    /// Unregisters `visitor` after the current token.
    pub fn remove_visitor(&mut self, visitor: &SharedVisitor) {
        self.changes
            .borrow_mut()
            .push(Change::Remove(Rc::clone(visitor)));
    }

    /// Unregisters the visitor receiving this callback.
    pub fn remove_current(&mut self) {
        self.remove_visitor(self.current);
    }

    /// Delivers `token` to `target` immediately, with a registrar for which
    /// `target` is the current visitor.
    ///
    /// Used to hand the token that triggered a registration to the new
    /// visitor. A target that is already borrowed is skipped.
    pub fn forward_token(&mut self, target: &SharedVisitor, token: &Token) {
        let mut registrar = VisitorRegistrar::new(target, self.changes);
        match target.try_borrow_mut() {
            Ok(mut visitor) => visitor.visit_token(token, &mut registrar),
            Err(_) => warn!(position = token.start(), "visitor busy, token not forwarded"),
        }
    }
}
