use std::io::Write;

use crate::{
    ast::{
        expressions::Expr,
        statements::{Stmt, StmtKind},
        types::{Type, TypeKind},
    },
    errors::errors::{Error, ErrorImpl},
};

use super::{expr::evaluate_expr, interpreter::Interpreter, value::Value};

/// How a statement finished.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecResult {
    Normal,
    Break,
    Continue,
    Return(Value),
}

pub fn execute_stmt<W: Write>(
    interpreter: &mut Interpreter<W>,
    stmt: &Stmt,
) -> Result<ExecResult, Error> {
    match &stmt.kind {
        StmtKind::Import { module, source } => {
            execute_import(interpreter, stmt, module, source.as_deref())?;
            Ok(ExecResult::Normal)
        }
        StmtKind::VarDecl {
            name,
            declared_type,
            initializer,
            mutable,
        } => {
            let value = match initializer {
                Some(initializer) => widen_to(evaluate_expr(interpreter, initializer)?, declared_type),
                None => Value::Null,
            };

            interpreter
                .environment
                .define(name, value, declared_type.clone(), *mutable);
            Ok(ExecResult::Normal)
        }
        StmtKind::Assign { name, value } => {
            let value = evaluate_expr(interpreter, value)?;
            let value = match interpreter.environment.get_binding(name) {
                Some(binding) => widen_to(value, &binding.declared_type),
                None => value,
            };

            interpreter
                .environment
                .set(name, value)
                .map_err(|error| Error::new(error, stmt.span.start.clone()))?;
            Ok(ExecResult::Normal)
        }
        StmtKind::If {
            condition,
            then_block,
            else_block,
        } => {
            if evaluate_expr(interpreter, condition)?.is_truthy() {
                execute_scoped_block(interpreter, then_block)
            } else if let Some(else_block) = else_block {
                execute_scoped_block(interpreter, else_block)
            } else {
                Ok(ExecResult::Normal)
            }
        }
        StmtKind::While { condition, body } => {
            while evaluate_expr(interpreter, condition)?.is_truthy() {
                match execute_scoped_block(interpreter, body)? {
                    ExecResult::Break => break,
                    ExecResult::Normal | ExecResult::Continue => {}
                    result @ ExecResult::Return(_) => return Ok(result),
                }
            }

            Ok(ExecResult::Normal)
        }
        StmtKind::For {
            init,
            condition,
            update,
            body,
        } => {
            // `init` bindings live in their own scope around the loop
            interpreter.environment.enter_scope();
            let result = execute_for(interpreter, init, condition, update, body);
            interpreter.environment.exit_scope();

            result
        }
        StmtKind::Return(value) => {
            let value = match value {
                Some(value) => evaluate_expr(interpreter, value)?,
                None => Value::Null,
            };

            Ok(ExecResult::Return(value))
        }
        StmtKind::Break => Ok(ExecResult::Break),
        StmtKind::Continue => Ok(ExecResult::Continue),
        StmtKind::Expression(expr) => {
            interpreter.last_value = evaluate_expr(interpreter, expr)?;
            Ok(ExecResult::Normal)
        }
    }
}

fn execute_for<W: Write>(
    interpreter: &mut Interpreter<W>,
    init: &Stmt,
    condition: &Expr,
    update: &Stmt,
    body: &[Stmt],
) -> Result<ExecResult, Error> {
    execute_stmt(interpreter, init)?;

    while evaluate_expr(interpreter, condition)?.is_truthy() {
        match execute_scoped_block(interpreter, body)? {
            ExecResult::Break => break,
            ExecResult::Normal | ExecResult::Continue => {}
            result @ ExecResult::Return(_) => return Ok(result),
        }

        execute_stmt(interpreter, update)?;
    }

    Ok(ExecResult::Normal)
}

/// Runs statements until one finishes with anything but `Normal`.
pub fn execute_block<W: Write>(
    interpreter: &mut Interpreter<W>,
    body: &[Stmt],
) -> Result<ExecResult, Error> {
    for stmt in body {
        let result = execute_stmt(interpreter, stmt)?;
        if result != ExecResult::Normal {
            return Ok(result);
        }
    }

    Ok(ExecResult::Normal)
}

/// Runs a block in a child scope that is dropped afterwards, even on error.
pub fn execute_scoped_block<W: Write>(
    interpreter: &mut Interpreter<W>,
    body: &[Stmt],
) -> Result<ExecResult, Error> {
    interpreter.environment.enter_scope();
    let result = execute_block(interpreter, body);
    interpreter.environment.exit_scope();

    result
}

fn execute_import<W: Write>(
    interpreter: &mut Interpreter<W>,
    stmt: &Stmt,
    module: &str,
    source: Option<&str>,
) -> Result<(), Error> {
    let target = source.unwrap_or(module);

    if !interpreter.modules.contains(target) {
        return Err(Error::new(
            ErrorImpl::UnknownModule {
                module: target.to_string(),
            },
            stmt.span.start.clone(),
        ));
    }

    if source.is_some() {
        interpreter
            .aliases
            .insert(module.to_string(), target.to_string());
    }

    Ok(())
}

/// Applies the implicit `int -> float` and `char -> string` conversions.
fn widen_to(value: Value, declared_type: &Type) -> Value {
    match (&declared_type.kind, value) {
        (TypeKind::Float, Value::Int(int)) => Value::Float(int as f64),
        (TypeKind::String, Value::Char(ch)) => Value::Str(ch.to_string()),
        (_, value) => value,
    }
}
