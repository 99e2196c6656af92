use crate::Span;

use super::statements::Stmt;

/// The root of a parsed source unit.
///
/// Owned by the caller; the type checker, interpreter and code generator
/// only ever borrow it.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub body: Vec<Stmt>,
    pub span: Span,
}

impl Program {
    pub fn iter(&self) -> std::slice::Iter<'_, Stmt> {
        self.body.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}
