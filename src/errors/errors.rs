use std::fmt::Display;

use thiserror::Error;

use crate::Position;

#[derive(Error, Debug, Clone, PartialEq)]
#[error("{internal_error}")]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn category(&self) -> ErrorCategory {
        match &self.internal_error {
            ErrorImpl::UnterminatedString
            | ErrorImpl::UnterminatedChar
            | ErrorImpl::InvalidCharLiteral { .. } => ErrorCategory::Lex,
            ErrorImpl::UnexpectedToken { .. }
            | ErrorImpl::UnexpectedTokenDetailed { .. }
            | ErrorImpl::UnexpectedEndOfInput { .. }
            | ErrorImpl::NumberParseError { .. } => ErrorCategory::Parse,
            ErrorImpl::TypeMismatch { .. } => ErrorCategory::Type,
            ErrorImpl::SourceUnavailable { .. } => ErrorCategory::Io,
            _ => ErrorCategory::Runtime,
        }
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnterminatedString => "UnterminatedString",
            ErrorImpl::UnterminatedChar => "UnterminatedChar",
            ErrorImpl::InvalidCharLiteral { .. } => "InvalidCharLiteral",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::UnexpectedEndOfInput { .. } => "UnexpectedEndOfInput",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::TypeMismatch { .. } => "TypeMismatch",
            ErrorImpl::UndefinedVariable { .. } => "UndefinedVariable",
            ErrorImpl::ImmutableAssignment { .. } => "ImmutableAssignment",
            ErrorImpl::UnsupportedOperation { .. } => "UnsupportedOperation",
            ErrorImpl::UnknownModule { .. } => "UnknownModule",
            ErrorImpl::UnknownFunction { .. } => "UnknownFunction",
            ErrorImpl::UnsupportedFeature { .. } => "UnsupportedFeature",
            ErrorImpl::DivisionByZero => "DivisionByZero",
            ErrorImpl::UnexpectedArguments { .. } => "UnexpectedArguments",
            ErrorImpl::MissingArguments { .. } => "MissingArguments",
            ErrorImpl::ArgumentTypeMatchError { .. } => "ArgumentTypeMatchError",
            ErrorImpl::ArgumentOutOfRange { .. } => "ArgumentOutOfRange",
            ErrorImpl::SourceUnavailable { .. } => "SourceUnavailable",
            ErrorImpl::OutputFailed { .. } => "OutputFailed",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnterminatedString => {
                ErrorTip::Suggestion(String::from("String literal is missing its closing `\"`"))
            }
            ErrorImpl::UnterminatedChar => {
                ErrorTip::Suggestion(String::from("Char literal is missing its closing `'`"))
            }
            ErrorImpl::InvalidCharLiteral { literal } => ErrorTip::Suggestion(format!(
                "Char literal `'{}'` must hold exactly one character",
                literal
            )),
            ErrorImpl::UnexpectedToken { token } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`", token))
            }
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            ErrorImpl::UnexpectedEndOfInput { expected } => {
                ErrorTip::Suggestion(format!("Input ended while expecting {}", expected))
            }
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::TypeMismatch { expected, received } => ErrorTip::Suggestion(format!(
                "Expected type `{}`, received `{}`",
                expected, received
            )),
            ErrorImpl::UndefinedVariable { variable } => {
                ErrorTip::Suggestion(format!("Variable `{}` not declared", variable))
            }
            ErrorImpl::ImmutableAssignment { variable } => ErrorTip::Suggestion(format!(
                "Variable `{}` is immutable, declare it with `var` to reassign it",
                variable
            )),
            ErrorImpl::UnsupportedOperation { operator, operand } => ErrorTip::Suggestion(
                format!("Operator `{}` cannot be applied to {}", operator, operand),
            ),
            ErrorImpl::UnknownModule { module } => {
                ErrorTip::Suggestion(format!("Module `{}` does not exist", module))
            }
            ErrorImpl::UnknownFunction { module, function } => ErrorTip::Suggestion(format!(
                "Module `{}` has no function `{}`",
                module, function
            )),
            ErrorImpl::UnsupportedFeature { feature } => {
                ErrorTip::Suggestion(format!("{} are not supported", feature))
            }
            ErrorImpl::DivisionByZero => ErrorTip::None,
            ErrorImpl::UnexpectedArguments { expected, received }
            | ErrorImpl::MissingArguments { expected, received } => ErrorTip::Suggestion(
                format!("Expected {} arguments, received {}", expected, received),
            ),
            ErrorImpl::ArgumentTypeMatchError { expected, received } => {
                ErrorTip::Suggestion(format!(
                    "Expected argument type `{}`, received `{}`",
                    expected, received
                ))
            }
            ErrorImpl::ArgumentOutOfRange { function, value } => ErrorTip::Suggestion(format!(
                "`{}` is out of range for `{}`",
                value, function
            )),
            ErrorImpl::SourceUnavailable { reason, .. } => ErrorTip::Suggestion(reason.clone()),
            ErrorImpl::OutputFailed { .. } => ErrorTip::None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Lex,
    Parse,
    Type,
    Runtime,
    Io,
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unterminated char literal")]
    UnterminatedChar,
    #[error("invalid char literal: {literal:?}")]
    InvalidCharLiteral { literal: String },
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("unexpected token ({message:?}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEndOfInput { expected: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("type mismatch: expected {expected}, got {received}")]
    TypeMismatch { expected: String, received: String },
    #[error("undefined variable: {variable}")]
    UndefinedVariable { variable: String },
    #[error("cannot reassign immutable variable: {variable}")]
    ImmutableAssignment { variable: String },
    #[error("unsupported operation: `{operator}` on {operand}")]
    UnsupportedOperation { operator: String, operand: String },
    #[error("unknown module: {module}")]
    UnknownModule { module: String },
    #[error("unknown function: {module}.{function}")]
    UnknownFunction { module: String, function: String },
    #[error("unsupported feature: {feature}")]
    UnsupportedFeature { feature: String },
    #[error("division by zero")]
    DivisionByZero,
    #[error("unexpected arguments: expected {expected:?}, received {received:?}")]
    UnexpectedArguments { expected: usize, received: usize },
    #[error("missing arguments: expected {expected:?}, received {received:?}")]
    MissingArguments { expected: usize, received: usize },
    #[error("argument types do not match: expected {expected:?}, received {received:?}")]
    ArgumentTypeMatchError { expected: String, received: String },
    #[error("argument out of range for {function}: {value}")]
    ArgumentOutOfRange { function: String, value: String },
    #[error("cannot read {source_path}: {reason}")]
    SourceUnavailable { source_path: String, reason: String },
    #[error("cannot write program output: {reason}")]
    OutputFailed { reason: String },
}
