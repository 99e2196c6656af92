//! Type checking module.
//!
//! A single forward pass over the `Program` that:
//!
//! - Infers the type of every declaration initializer and assignment value
//! - Checks it against the declared (or recorded) type, allowing `int` to
//!   widen to `float`, `char` to widen to `string`, and `any` to match all
//! - Records every declaration in a block-scoped environment stack
//!
//! Mismatches are collected rather than returned early, so a caller sees
//! every `TypeMismatch` in source order.

pub mod type_checker;
