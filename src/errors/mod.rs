//! Error types and error handling for the pipeline.
//!
//! This module defines the single error type shared by every phase:
//!
//! - Error structures with source position information
//! - Specific error variants for lexing, parsing, type checking and evaluation
//! - Error categories used to decide how the driver reports a failure
//! - Helpful error messages and suggestions

pub mod errors;
