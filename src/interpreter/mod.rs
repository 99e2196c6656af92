//! Tree-walking interpreter.
//!
//! This module executes a parsed `Program` directly. It handles:
//!
//! - Variable storage in an arena of block scopes
//! - Statement execution with explicit `ExecResult` control flow
//! - Expression evaluation, including arithmetic widening and truthiness
//! - Calls into the built-in `io`, `math` and `str` modules

pub mod builtins;
pub mod environment;
pub mod expr;
pub mod interpreter;
pub mod stmt;
pub mod value;

#[cfg(test)]
mod tests;
