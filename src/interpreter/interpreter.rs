//! The interpreter state and entry points.

use std::{
    collections::HashMap,
    io::{self, Write},
};

use crate::{
    ast::{ast::Program, expressions::Expr},
    errors::errors::{Error, ErrorImpl},
};

use super::{
    builtins::ModuleRegistry,
    environment::Environment,
    expr::evaluate_expr,
    stmt::{execute_stmt, ExecResult},
    value::Value,
};

/// Executes programs against a fresh environment.
///
/// Program output from `io.print` goes to `W`; tests pass a `Vec<u8>` and
/// read it back with [`Interpreter::into_output`].
pub struct Interpreter<W: Write> {
    /// Variable bindings
    pub environment: Environment,
    /// Built-in modules available to calls and imports
    pub modules: ModuleRegistry,
    /// `import alias from module` mappings
    pub aliases: HashMap<String, String>,
    /// Value of the most recent expression statement
    pub last_value: Value,
    pub output: W,
}

impl Interpreter<io::Stdout> {
    pub fn stdout() -> Self {
        Interpreter::new(io::stdout())
    }
}

impl<W: Write> Interpreter<W> {
    pub fn new(output: W) -> Self {
        Interpreter::with_modules(output, ModuleRegistry::default())
    }

    pub fn with_modules(output: W, modules: ModuleRegistry) -> Self {
        Interpreter {
            environment: Environment::new(),
            modules,
            aliases: HashMap::new(),
            last_value: Value::Null,
            output,
        }
    }

    /// Runs every top-level statement in order.
    ///
    /// Returns the value of a top-level `return`, otherwise the value of
    /// the last expression statement executed, otherwise `Null`. A `break`
    /// or `continue` outside a loop ends the program like a bare `return`.
    pub fn run(&mut self, program: &Program) -> Result<Value, Error> {
        let mut result = None;

        for stmt in program.iter() {
            match execute_stmt(self, stmt)? {
                ExecResult::Normal => {}
                ExecResult::Return(value) => {
                    result = Some(value);
                    break;
                }
                ExecResult::Break | ExecResult::Continue => {
                    result = Some(Value::Null);
                    break;
                }
            }
        }

        self.output.flush().map_err(|error| {
            Error::new(
                ErrorImpl::OutputFailed {
                    reason: error.to_string(),
                },
                program.span.end.clone(),
            )
        })?;

        Ok(result.unwrap_or_else(|| self.last_value.clone()))
    }

    pub fn evaluate(&mut self, expr: &Expr) -> Result<Value, Error> {
        evaluate_expr(self, expr)
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn into_output(self) -> W {
        self.output
    }
}
