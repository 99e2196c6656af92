//! Lexical analysis.
//!
//! Turns source text into a stream of tokens for the parser:
//!
//! - Regex pattern table for operators, literals and identifiers
//! - Keyword recognition through `RESERVED_LOOKUP`
//! - Position tracking (offset, line, column) for diagnostics
//! - Whitespace and `//` comment skipping

pub mod lexer;
pub mod tokens;
