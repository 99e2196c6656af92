//! C code generation.
//!
//! Lowers the top-level variable declarations of a `Program` into a single
//! C translation unit with a `main` function. Everything else in the program
//! is left to the interpreter.

pub mod codegen;

#[cfg(test)]
mod tests;
