use crate::Span;

use super::{expressions::Expr, types::Type};

#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    /// `import module` or `import alias from module`.
    Import {
        module: String,
        source: Option<String>,
    },
    VarDecl {
        name: String,
        declared_type: Type,
        initializer: Option<Expr>,
        mutable: bool,
    },
    Assign {
        name: String,
        value: Expr,
    },
    If {
        condition: Expr,
        then_block: Vec<Stmt>,
        else_block: Option<Vec<Stmt>>,
    },
    While {
        condition: Expr,
        body: Vec<Stmt>,
    },
    /// `for (init; condition; update) { body }`.
    For {
        init: Box<Stmt>,
        condition: Expr,
        update: Box<Stmt>,
        body: Vec<Stmt>,
    },
    Return(Option<Expr>),
    Break,
    Continue,
    Expression(Expr),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Stmt { kind, span }
    }
}
