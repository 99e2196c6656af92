//! Built-in modules callable as `module.function(args)`.
//!
//! Each module is a `BuiltinModule` that maps a function name to a plain
//! function pointer. Output goes through the writer handed to every call.

use std::{collections::HashMap, io::Write};

use crate::errors::errors::ErrorImpl;

use super::value::Value;

pub type BuiltinFn = fn(&mut dyn Write, &[Value]) -> Result<Value, ErrorImpl>;

pub trait BuiltinModule {
    fn name(&self) -> &'static str;
    fn lookup(&self, function: &str) -> Option<BuiltinFn>;
}

/// Modules known to an interpreter, keyed by name.
pub struct ModuleRegistry {
    modules: HashMap<String, Box<dyn BuiltinModule>>,
}

impl Default for ModuleRegistry {
    fn default() -> Self {
        let mut registry = ModuleRegistry::empty();
        registry.register(Box::new(IoModule));
        registry.register(Box::new(MathModule));
        registry.register(Box::new(StrModule));
        registry
    }
}

impl ModuleRegistry {
    pub fn empty() -> Self {
        ModuleRegistry {
            modules: HashMap::new(),
        }
    }

    pub fn register(&mut self, module: Box<dyn BuiltinModule>) {
        self.modules.insert(module.name().to_string(), module);
    }

    pub fn contains(&self, module: &str) -> bool {
        self.modules.contains_key(module)
    }

    pub fn get(&self, module: &str) -> Option<&dyn BuiltinModule> {
        self.modules.get(module).map(|module| &**module)
    }
}

fn expect_arguments(args: &[Value], expected: usize) -> Result<(), ErrorImpl> {
    if args.len() > expected {
        Err(ErrorImpl::UnexpectedArguments {
            expected,
            received: args.len(),
        })
    } else if args.len() < expected {
        Err(ErrorImpl::MissingArguments {
            expected,
            received: args.len(),
        })
    } else {
        Ok(())
    }
}

fn number_argument(value: &Value) -> Result<f64, ErrorImpl> {
    value
        .as_f64()
        .ok_or_else(|| ErrorImpl::ArgumentTypeMatchError {
            expected: String::from("number"),
            received: value.type_name().to_string(),
        })
}

fn int_argument(value: &Value) -> Result<i64, ErrorImpl> {
    match value {
        Value::Int(value) => Ok(*value),
        other => Err(ErrorImpl::ArgumentTypeMatchError {
            expected: String::from("int"),
            received: other.type_name().to_string(),
        }),
    }
}

fn string_argument(value: &Value) -> Result<String, ErrorImpl> {
    match value {
        Value::Str(value) => Ok(value.clone()),
        Value::Char(value) => Ok(value.to_string()),
        other => Err(ErrorImpl::ArgumentTypeMatchError {
            expected: String::from("string"),
            received: other.type_name().to_string(),
        }),
    }
}

fn io_error(error: std::io::Error) -> ErrorImpl {
    ErrorImpl::OutputFailed {
        reason: error.to_string(),
    }
}

pub struct IoModule;

impl BuiltinModule for IoModule {
    fn name(&self) -> &'static str {
        "io"
    }

    fn lookup(&self, function: &str) -> Option<BuiltinFn> {
        match function {
            "print" | "println" => Some(io_print),
            _ => None,
        }
    }
}

/// Prints the arguments separated by spaces, then a newline.
fn io_print(out: &mut dyn Write, args: &[Value]) -> Result<Value, ErrorImpl> {
    let line: Vec<String> = args.iter().map(|arg| arg.to_string()).collect();
    writeln!(out, "{}", line.join(" ")).map_err(io_error)?;
    Ok(Value::Null)
}

pub struct MathModule;

impl BuiltinModule for MathModule {
    fn name(&self) -> &'static str {
        "math"
    }

    fn lookup(&self, function: &str) -> Option<BuiltinFn> {
        let function: BuiltinFn = match function {
            "sqrt" => |_, args| unary_float(args, f64::sqrt),
            "floor" => |_, args| unary_float(args, f64::floor),
            "ceil" => |_, args| unary_float(args, f64::ceil),
            "round" => |_, args| unary_float(args, f64::round),
            "sin" => |_, args| unary_float(args, f64::sin),
            "cos" => |_, args| unary_float(args, f64::cos),
            "tan" => |_, args| unary_float(args, f64::tan),
            "pow" => math_pow,
            "abs" => math_abs,
            "min" => |_, args| min_max(args, true),
            "max" => |_, args| min_max(args, false),
            _ => return None,
        };

        Some(function)
    }
}

fn unary_float(args: &[Value], operation: fn(f64) -> f64) -> Result<Value, ErrorImpl> {
    expect_arguments(args, 1)?;
    Ok(Value::Float(operation(number_argument(&args[0])?)))
}

fn math_pow(_: &mut dyn Write, args: &[Value]) -> Result<Value, ErrorImpl> {
    expect_arguments(args, 2)?;
    let base = number_argument(&args[0])?;
    let exponent = number_argument(&args[1])?;
    Ok(Value::Float(base.powf(exponent)))
}

/// Keeps ints as ints.
fn math_abs(_: &mut dyn Write, args: &[Value]) -> Result<Value, ErrorImpl> {
    expect_arguments(args, 1)?;
    match &args[0] {
        Value::Int(value) => Ok(Value::Int(value.wrapping_abs())),
        other => Ok(Value::Float(number_argument(other)?.abs())),
    }
}

fn min_max(args: &[Value], min: bool) -> Result<Value, ErrorImpl> {
    expect_arguments(args, 2)?;
    match (&args[0], &args[1]) {
        (Value::Int(a), Value::Int(b)) => Ok(Value::Int(if min { *a.min(b) } else { *a.max(b) })),
        (a, b) => {
            let (a, b) = (number_argument(a)?, number_argument(b)?);
            Ok(Value::Float(if min { a.min(b) } else { a.max(b) }))
        }
    }
}

pub struct StrModule;

impl BuiltinModule for StrModule {
    fn name(&self) -> &'static str {
        "str"
    }

    fn lookup(&self, function: &str) -> Option<BuiltinFn> {
        let function: BuiltinFn = match function {
            "length" => str_length,
            "toUpperCase" => |_, args| map_string(args, |s| s.to_uppercase()),
            "toLowerCase" => |_, args| map_string(args, |s| s.to_lowercase()),
            "trim" => |_, args| map_string(args, |s| s.trim().to_string()),
            "includes" => |_, args| test_strings(args, |s, t| s.contains(t)),
            "startsWith" => |_, args| test_strings(args, |s, t| s.starts_with(t)),
            "endsWith" => |_, args| test_strings(args, |s, t| s.ends_with(t)),
            "indexOf" => str_index_of,
            "repeat" => str_repeat,
            "substr" => str_substr,
            _ => return None,
        };

        Some(function)
    }
}

fn str_length(_: &mut dyn Write, args: &[Value]) -> Result<Value, ErrorImpl> {
    expect_arguments(args, 1)?;
    Ok(Value::Int(string_argument(&args[0])?.chars().count() as i64))
}

fn map_string(args: &[Value], operation: fn(&str) -> String) -> Result<Value, ErrorImpl> {
    expect_arguments(args, 1)?;
    Ok(Value::Str(operation(&string_argument(&args[0])?)))
}

fn test_strings(args: &[Value], operation: fn(&str, &str) -> bool) -> Result<Value, ErrorImpl> {
    expect_arguments(args, 2)?;
    let haystack = string_argument(&args[0])?;
    let needle = string_argument(&args[1])?;
    Ok(Value::Bool(operation(&haystack, &needle)))
}

/// Character index of the first occurrence, or `-1`.
fn str_index_of(_: &mut dyn Write, args: &[Value]) -> Result<Value, ErrorImpl> {
    expect_arguments(args, 2)?;
    let haystack = string_argument(&args[0])?;
    let needle = string_argument(&args[1])?;

    let index = haystack
        .find(&needle)
        .map(|byte| haystack[..byte].chars().count() as i64)
        .unwrap_or(-1);

    Ok(Value::Int(index))
}

/// Longest string `str.repeat` will build, in bytes.
pub const MAX_REPEAT_LEN: usize = 1 << 28;

fn str_repeat(_: &mut dyn Write, args: &[Value]) -> Result<Value, ErrorImpl> {
    expect_arguments(args, 2)?;
    let text = string_argument(&args[0])?;
    let count = int_argument(&args[1])?;
    let repeats = usize::try_from(count.max(0)).unwrap_or(usize::MAX);

    match text.len().checked_mul(repeats) {
        Some(length) if length <= MAX_REPEAT_LEN => Ok(Value::Str(text.repeat(repeats))),
        _ => Err(ErrorImpl::ArgumentOutOfRange {
            function: String::from("str.repeat"),
            value: count.to_string(),
        }),
    }
}

/// Characters in `[start, end)`, clamped to the string.
fn str_substr(_: &mut dyn Write, args: &[Value]) -> Result<Value, ErrorImpl> {
    expect_arguments(args, 3)?;
    let text = string_argument(&args[0])?;
    let length = text.chars().count() as i64;
    let start = int_argument(&args[1])?.clamp(0, length);
    let end = int_argument(&args[2])?.clamp(start, length);

    Ok(Value::Str(
        text.chars()
            .skip(start as usize)
            .take((end - start) as usize)
            .collect(),
    ))
}
