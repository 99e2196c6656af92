use std::collections::HashMap;

use crate::{
    ast::{
        ast::Program,
        expressions::{Expr, ExprKind, NumberLiteral},
        statements::StmtKind,
        types::{Type, TypeKind},
    },
    errors::errors::{Error, ErrorImpl},
    type_checker::type_checker::{type_check_expr, TypeChecker},
};

const HEADERS: [&str; 3] = ["stdio.h", "math.h", "stdbool.h"];

/// Builds C source line by line.
pub struct CodeGenerator {
    lines: Vec<String>,
    /// `import alias from module` seen so far at the top level
    aliases: HashMap<String, String>,
    /// Declared types of the variables emitted so far
    types: TypeChecker,
}

impl Default for CodeGenerator {
    fn default() -> Self {
        CodeGenerator::new()
    }
}

impl CodeGenerator {
    pub fn new() -> Self {
        CodeGenerator {
            lines: vec![],
            aliases: HashMap::new(),
            types: TypeChecker::new(),
        }
    }

    /// Emits the translation unit for `program`.
    ///
    /// Only top-level `VarDecl` statements are lowered; every other
    /// statement is skipped.
    pub fn generate(mut self, program: &Program) -> Result<String, Error> {
        for header in HEADERS {
            self.lines.push(format!("#include <{}>", header));
        }
        self.lines.push(String::new());
        self.lines.push(String::from("int main() {"));

        for stmt in program.iter() {
            match &stmt.kind {
                StmtKind::VarDecl {
                    name,
                    declared_type,
                    initializer,
                    ..
                } => {
                    let declared = c_type(declared_type);
                    let line = match initializer {
                        Some(initializer) => format!(
                            "{} {} = {};",
                            declared,
                            name,
                            self.gen_initializer(declared_type, initializer)?
                        ),
                        None => format!("{} {};", declared, name),
                    };
                    self.lines.push(format!("    {}", line));
                    self.types
                        .declare_variable(name.clone(), declared_type.clone());
                }
                StmtKind::Import {
                    module,
                    source: Some(source),
                } => {
                    self.aliases.insert(module.clone(), source.clone());
                }
                _ => {}
            }
        }

        self.lines.push(String::from("    return 0;"));
        self.lines.push(String::from("}"));

        let mut output = self.lines.join("\n");
        output.push('\n');

        Ok(output)
    }

    /// Lowers an initializer, spelling out the `char -> string` widening
    /// that C does not do.
    fn gen_initializer(&self, declared_type: &Type, initializer: &Expr) -> Result<String, Error> {
        if declared_type.kind != TypeKind::String
            || type_check_expr(&self.types, initializer).kind != TypeKind::Char
        {
            return self.gen_expr(initializer);
        }

        match &initializer.kind {
            ExprKind::Char(value) => Ok(format!("\"{}\"", escape_c(&value.to_string(), '"'))),
            _ => Ok(format!("(char[]){{{}, '\\0'}}", self.gen_expr(initializer)?)),
        }
    }

    fn gen_expr(&self, expr: &Expr) -> Result<String, Error> {
        match &expr.kind {
            ExprKind::Number(NumberLiteral::Int(value)) => Ok(value.to_string()),
            // `{:?}` always keeps a decimal point or exponent
            ExprKind::Number(NumberLiteral::Float(value)) => Ok(format!("{:?}", value)),
            ExprKind::String(value) => Ok(format!("\"{}\"", escape_c(value, '"'))),
            ExprKind::Char(value) => Ok(format!("'{}'", escape_c(&value.to_string(), '\''))),
            ExprKind::Bool(value) => Ok(value.to_string()),
            ExprKind::Var(name) => Ok(name.clone()),
            ExprKind::Unary { operator, operand } => {
                Ok(format!("({}{})", operator.value, self.gen_expr(operand)?))
            }
            ExprKind::Binary {
                operator,
                left,
                right,
            } => Ok(format!(
                "({} {} {})",
                self.gen_expr(left)?,
                operator.value,
                self.gen_expr(right)?
            )),
            ExprKind::Call {
                module,
                function,
                arguments,
            } => {
                let unsupported = |name: String| {
                    Error::new(
                        ErrorImpl::UnsupportedFeature {
                            feature: format!("Calls to `{}` in generated C", name),
                        },
                        expr.span.start.clone(),
                    )
                };

                let Some(module) = module else {
                    return Err(unsupported(function.clone()));
                };

                let target = self
                    .aliases
                    .get(module)
                    .map(String::as_str)
                    .unwrap_or(module);

                let c_function = match (target, function.as_str()) {
                    ("math", "abs") => "fabs",
                    ("math", "min") => "fmin",
                    ("math", "max") => "fmax",
                    (
                        "math",
                        name @ ("sqrt" | "pow" | "floor" | "ceil" | "round" | "sin" | "cos"
                        | "tan"),
                    ) => name,
                    _ => return Err(unsupported(format!("{}.{}", module, function))),
                };

                let args = arguments
                    .iter()
                    .map(|argument| self.gen_expr(argument))
                    .collect::<Result<Vec<_>, _>>()?;

                Ok(format!("{}({})", c_function, args.join(", ")))
            }
        }
    }
}

/// C spelling of a declared type. `any` and unknown names fall back to `int`.
pub fn c_type(ty: &Type) -> &'static str {
    match ty.kind {
        TypeKind::Int => "int",
        TypeKind::Float => "double",
        TypeKind::Bool => "bool",
        TypeKind::Char => "char",
        TypeKind::String => "char*",
        TypeKind::Any | TypeKind::Named(_) => "int",
    }
}

fn escape_c(text: &str, quote: char) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\t' => escaped.push_str("\\t"),
            '\r' => escaped.push_str("\\r"),
            ch if ch == quote => {
                escaped.push('\\');
                escaped.push(ch);
            }
            ch => escaped.push(ch),
        }
    }
    escaped
}

/// Generates C source for `program`.
pub fn generate(program: &Program) -> Result<String, Error> {
    CodeGenerator::new().generate(program)
}
