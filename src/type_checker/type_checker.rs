use std::collections::HashMap;

use crate::{
    ast::{
        ast::Program,
        expressions::{is_boolean_operator, Expr, ExprKind, NumberLiteral},
        statements::{Stmt, StmtKind},
        types::Type,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Position,
};

/// Declared types visible in one block.
#[derive(Debug, Default)]
pub struct Environment {
    pub variable_lookup: HashMap<String, Type>,
}

impl Environment {
    pub fn declare_variable(&mut self, variable_name: String, variable_type: Type) {
        self.variable_lookup.insert(variable_name, variable_type);
    }

    pub fn get_variable(&self, variable_name: &str) -> Option<&Type> {
        self.variable_lookup.get(variable_name)
    }
}

#[derive(Debug)]
pub struct TypeChecker {
    pub environments: Vec<Environment>,
    pub errors: Vec<Error>,
}

impl Default for TypeChecker {
    fn default() -> Self {
        TypeChecker::new()
    }
}

impl TypeChecker {
    pub fn new() -> Self {
        TypeChecker {
            environments: vec![Environment::default()],
            errors: vec![],
        }
    }

    pub fn enter_environment(&mut self) {
        self.environments.push(Environment::default());
    }

    pub fn exit_environment(&mut self) {
        if self.environments.len() > 1 {
            self.environments.pop();
        }
    }

    pub fn declare_variable(&mut self, name: String, ty: Type) {
        if let Some(environment) = self.environments.last_mut() {
            environment.declare_variable(name, ty);
        }
    }

    /// Innermost declared type of `variable`, if any.
    pub fn fetch_variable_type(&self, variable: &str) -> Option<&Type> {
        self.environments
            .iter()
            .rev()
            .find_map(|environment| environment.get_variable(variable))
    }

    fn check_compatible(&mut self, expected: &Type, received: &Type, position: &Position) {
        if !received.is_compatible_with(expected) {
            self.errors.push(Error::new(
                ErrorImpl::TypeMismatch {
                    expected: expected.to_string(),
                    received: received.to_string(),
                },
                position.clone(),
            ));
        }
    }
}

/// Checks a whole program and returns every mismatch in source order.
pub fn type_check(program: &Program) -> Vec<Error> {
    let mut type_checker = TypeChecker::new();

    type_check_block(&mut type_checker, &program.body);

    type_checker.errors
}

fn type_check_block(type_checker: &mut TypeChecker, body: &[Stmt]) {
    for stmt in body {
        type_check_stmt(type_checker, stmt);
    }
}

fn type_check_scoped_block(type_checker: &mut TypeChecker, body: &[Stmt]) {
    type_checker.enter_environment();
    type_check_block(type_checker, body);
    type_checker.exit_environment();
}

pub fn type_check_stmt(type_checker: &mut TypeChecker, stmt: &Stmt) {
    match &stmt.kind {
        StmtKind::VarDecl {
            name,
            declared_type,
            initializer,
            ..
        } => {
            if let Some(initializer) = initializer {
                let received = type_check_expr(type_checker, initializer);
                type_checker.check_compatible(declared_type, &received, &initializer.span.start);
            }

            // Recorded even if the check failed
            type_checker.declare_variable(name.clone(), declared_type.clone());
        }
        StmtKind::Assign { name, value } => {
            let expected = type_checker
                .fetch_variable_type(name)
                .cloned()
                .unwrap_or_else(Type::any);
            let received = type_check_expr(type_checker, value);
            type_checker.check_compatible(&expected, &received, &value.span.start);
        }
        StmtKind::If {
            then_block,
            else_block,
            ..
        } => {
            type_check_scoped_block(type_checker, then_block);
            if let Some(else_block) = else_block {
                type_check_scoped_block(type_checker, else_block);
            }
        }
        StmtKind::While { body, .. } => type_check_scoped_block(type_checker, body),
        StmtKind::For {
            init, update, body, ..
        } => {
            type_checker.enter_environment();
            type_check_stmt(type_checker, init);
            type_check_stmt(type_checker, update);
            type_check_scoped_block(type_checker, body);
            type_checker.exit_environment();
        }
        StmtKind::Import { .. }
        | StmtKind::Return(_)
        | StmtKind::Break
        | StmtKind::Continue
        | StmtKind::Expression(_) => {}
    }
}

/// Infers the static type of an expression.
pub fn type_check_expr(type_checker: &TypeChecker, expr: &Expr) -> Type {
    match &expr.kind {
        ExprKind::Number(NumberLiteral::Int(_)) => Type::int(),
        ExprKind::Number(NumberLiteral::Float(_)) => Type::float(),
        ExprKind::String(_) => Type::string(),
        ExprKind::Char(_) => Type::char(),
        ExprKind::Bool(_) => Type::bool(),
        ExprKind::Var(name) => type_checker
            .fetch_variable_type(name)
            .cloned()
            .unwrap_or_else(Type::any),
        ExprKind::Binary { operator, left, .. } => {
            if is_boolean_operator(operator) {
                Type::bool()
            } else {
                type_check_expr(type_checker, left)
            }
        }
        ExprKind::Unary { operator, operand } => {
            if operator.kind == TokenKind::Not {
                Type::bool()
            } else {
                type_check_expr(type_checker, operand)
            }
        }
        ExprKind::Call { .. } => Type::any(),
    }
}
