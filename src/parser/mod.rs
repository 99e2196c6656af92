//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the parser that transforms a stream of tokens
//! into a `Program`. It uses a Pratt parser for expressions with operator
//! precedence and handles:
//!
//! - Statement parsing (declarations, assignments, imports, control flow)
//! - Expression parsing (binary and prefix operators, calls, literals)
//! - Type annotations, including the nullable `?` suffix
//!
//! The parser uses NUD (null denotation) and LED (left denotation) functions
//! for expression parsing with binding power for precedence handling.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
pub mod types;
