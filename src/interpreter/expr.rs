use std::{cmp::Ordering, io::Write};

use crate::{
    ast::expressions::{Expr, ExprKind, NumberLiteral},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
};

use super::{interpreter::Interpreter, value::Value};

pub fn evaluate_expr<W: Write>(
    interpreter: &mut Interpreter<W>,
    expr: &Expr,
) -> Result<Value, Error> {
    match &expr.kind {
        ExprKind::Number(NumberLiteral::Int(value)) => Ok(Value::Int(*value)),
        ExprKind::Number(NumberLiteral::Float(value)) => Ok(Value::Float(*value)),
        ExprKind::String(value) => Ok(Value::Str(value.clone())),
        ExprKind::Char(value) => Ok(Value::Char(*value)),
        ExprKind::Bool(value) => Ok(Value::Bool(*value)),
        ExprKind::Var(name) => interpreter
            .environment
            .get(name)
            .map_err(|error| Error::new(error, expr.span.start.clone())),
        ExprKind::Unary { operator, operand } => {
            let operand = evaluate_expr(interpreter, operand)?;
            evaluate_unary(operator, operand)
                .map_err(|error| Error::new(error, operator.span.start.clone()))
        }
        ExprKind::Binary {
            operator,
            left,
            right,
        } => {
            // Both sides are always evaluated, `&&` and `||` included
            let left = evaluate_expr(interpreter, left)?;
            let right = evaluate_expr(interpreter, right)?;
            evaluate_binary(operator, left, right)
                .map_err(|error| Error::new(error, operator.span.start.clone()))
        }
        ExprKind::Call {
            module,
            function,
            arguments,
        } => evaluate_call(interpreter, expr, module.as_deref(), function, arguments),
    }
}

fn evaluate_call<W: Write>(
    interpreter: &mut Interpreter<W>,
    expr: &Expr,
    module: Option<&str>,
    function: &str,
    arguments: &[Expr],
) -> Result<Value, Error> {
    let error_at = |error: ErrorImpl| Error::new(error, expr.span.start.clone());

    let Some(module) = module else {
        return Err(error_at(ErrorImpl::UnsupportedFeature {
            feature: String::from("User-defined function calls"),
        }));
    };

    let target = interpreter
        .aliases
        .get(module)
        .map(String::as_str)
        .unwrap_or(module);

    let Some(builtin_module) = interpreter.modules.get(target) else {
        return Err(error_at(ErrorImpl::UnknownModule {
            module: module.to_string(),
        }));
    };

    let Some(builtin) = builtin_module.lookup(function) else {
        return Err(error_at(ErrorImpl::UnknownFunction {
            module: module.to_string(),
            function: function.to_string(),
        }));
    };

    let mut args = Vec::with_capacity(arguments.len());
    for argument in arguments {
        args.push(evaluate_expr(interpreter, argument)?);
    }

    builtin(&mut interpreter.output, &args).map_err(error_at)
}

fn unsupported(operator: &Token, operand: String) -> ErrorImpl {
    ErrorImpl::UnsupportedOperation {
        operator: operator.value.clone(),
        operand,
    }
}

pub fn evaluate_unary(operator: &Token, operand: Value) -> Result<Value, ErrorImpl> {
    match (operator.kind, operand) {
        (TokenKind::Not, operand) => Ok(Value::Bool(!operand.is_truthy())),
        (TokenKind::Dash, Value::Int(value)) => Ok(Value::Int(value.wrapping_neg())),
        (TokenKind::Dash, Value::Float(value)) => Ok(Value::Float(-value)),
        (TokenKind::Plus, operand) if operand.is_number() => Ok(operand),
        (TokenKind::Tilde, Value::Int(value)) => Ok(Value::Int(!value)),
        (TokenKind::Tilde, Value::Float(value)) => Ok(Value::Int(!(value as i64))),
        (TokenKind::Tilde, Value::Bool(value)) => Ok(Value::Int(!(value as i64))),
        (_, operand) => Err(unsupported(operator, operand.type_name().to_string())),
    }
}

pub fn evaluate_binary(operator: &Token, left: Value, right: Value) -> Result<Value, ErrorImpl> {
    match operator.kind {
        TokenKind::And => Ok(Value::Bool(left.is_truthy() && right.is_truthy())),
        TokenKind::Or => Ok(Value::Bool(left.is_truthy() || right.is_truthy())),
        TokenKind::Equals => Ok(Value::Bool(values_equal(&left, &right))),
        TokenKind::NotEquals => Ok(Value::Bool(!values_equal(&left, &right))),
        TokenKind::Less
        | TokenKind::LessEquals
        | TokenKind::Greater
        | TokenKind::GreaterEquals => {
            let Some(ordering) = compare(&left, &right) else {
                return Err(unsupported(operator, operand_pair(&left, &right)));
            };

            Ok(Value::Bool(match operator.kind {
                TokenKind::Less => ordering == Ordering::Less,
                TokenKind::LessEquals => ordering != Ordering::Greater,
                TokenKind::Greater => ordering == Ordering::Greater,
                _ => ordering != Ordering::Less,
            }))
        }
        TokenKind::Plus
            if matches!(left, Value::Str(_)) || matches!(right, Value::Str(_)) =>
        {
            Ok(Value::Str(format!("{}{}", left, right)))
        }
        TokenKind::Plus
        | TokenKind::Dash
        | TokenKind::Star
        | TokenKind::Slash
        | TokenKind::Percent => arithmetic(operator, left, right),
        _ => Err(unsupported(operator, operand_pair(&left, &right))),
    }
}

fn operand_pair(left: &Value, right: &Value) -> String {
    format!("{} and {}", left.type_name(), right.type_name())
}

fn arithmetic(operator: &Token, left: Value, right: Value) -> Result<Value, ErrorImpl> {
    match (&left, &right) {
        (Value::Int(a), Value::Int(b)) => {
            let (a, b) = (*a, *b);
            let result = match operator.kind {
                TokenKind::Plus => a.wrapping_add(b),
                TokenKind::Dash => a.wrapping_sub(b),
                TokenKind::Star => a.wrapping_mul(b),
                TokenKind::Slash | TokenKind::Percent if b == 0 => {
                    return Err(ErrorImpl::DivisionByZero)
                }
                TokenKind::Slash => a.wrapping_div(b),
                _ => a.wrapping_rem(b),
            };

            Ok(Value::Int(result))
        }
        _ => {
            let (Some(a), Some(b)) = (left.as_f64(), right.as_f64()) else {
                return Err(unsupported(operator, operand_pair(&left, &right)));
            };

            let result = match operator.kind {
                TokenKind::Plus => a + b,
                TokenKind::Dash => a - b,
                TokenKind::Star => a * b,
                TokenKind::Slash => a / b,
                _ => a % b,
            };

            Ok(Value::Float(result))
        }
    }
}

/// Structural equality, with ints and floats compared numerically.
pub fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Int(a), Value::Float(b)) | (Value::Float(b), Value::Int(a)) => *a as f64 == *b,
        _ => left == right,
    }
}

fn compare(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
        (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
        (Value::Char(a), Value::Char(b)) => Some(a.cmp(b)),
        _ => left.as_f64()?.partial_cmp(&right.as_f64()?),
    }
}
