//! Unit tests for the interpreter module.

use std::rc::Rc;

use super::{
    builtins::{BuiltinModule, IoModule, MathModule, ModuleRegistry, StrModule},
    environment::Environment,
    interpreter::Interpreter,
    value::Value,
};
use crate::{
    ast::types::Type,
    errors::errors::{Error, ErrorImpl},
    lexer::lexer::tokenize,
    parser::parser::parse,
};

fn run(source: &str) -> (Result<Value, Error>, String) {
    let tokens = tokenize(source.to_string(), Some("test.str".to_string())).unwrap();
    let program = parse(tokens, Rc::new("test.str".to_string())).unwrap();

    let mut interpreter = Interpreter::new(Vec::new());
    let result = interpreter.run(&program);
    let output = String::from_utf8(interpreter.into_output()).unwrap();

    (result, output)
}

fn eval(source: &str) -> Value {
    run(source).0.unwrap()
}

fn eval_error(source: &str) -> ErrorImpl {
    run(source).0.unwrap_err().kind().clone()
}

#[test]
fn test_environment_define_get_set() {
    let mut environment = Environment::new();

    environment.define("x", Value::Int(1), Type::any(), true);
    assert_eq!(environment.get("x"), Ok(Value::Int(1)));

    environment.set("x", Value::Int(2)).unwrap();
    assert_eq!(environment.get("x"), Ok(Value::Int(2)));
}

#[test]
fn test_environment_errors() {
    let mut environment = Environment::new();
    environment.define("c", Value::Int(1), Type::any(), false);

    assert_eq!(
        environment.set("c", Value::Int(2)),
        Err(ErrorImpl::ImmutableAssignment {
            variable: "c".to_string()
        })
    );
    assert_eq!(
        environment.get("missing"),
        Err(ErrorImpl::UndefinedVariable {
            variable: "missing".to_string()
        })
    );
    assert_eq!(
        environment.set("missing", Value::Null),
        Err(ErrorImpl::UndefinedVariable {
            variable: "missing".to_string()
        })
    );
}

#[test]
fn test_environment_scopes() {
    let mut environment = Environment::new();
    environment.define("x", Value::Int(1), Type::any(), true);

    environment.enter_scope();
    assert_eq!(environment.depth(), 1);
    environment.define("x", Value::Str("inner".to_string()), Type::any(), true);
    environment.define("y", Value::Bool(true), Type::any(), true);
    assert_eq!(environment.get("x"), Ok(Value::Str("inner".to_string())));
    environment.exit_scope();

    assert_eq!(environment.depth(), 0);
    assert_eq!(environment.get("x"), Ok(Value::Int(1)));
    assert!(environment.get("y").is_err());

    // The root scope is never dropped
    environment.exit_scope();
    assert_eq!(environment.get("x"), Ok(Value::Int(1)));
}

#[test]
fn test_set_reaches_outer_scope() {
    let mut environment = Environment::new();
    environment.define("x", Value::Int(1), Type::any(), true);

    environment.enter_scope();
    environment.set("x", Value::Int(5)).unwrap();
    environment.exit_scope();

    assert_eq!(environment.get("x"), Ok(Value::Int(5)));
}

#[test]
fn test_literals_evaluate_to_themselves() {
    assert_eq!(eval("42"), Value::Int(42));
    assert_eq!(eval("2.5"), Value::Float(2.5));
    assert_eq!(eval("\"hi\""), Value::Str("hi".to_string()));
    assert_eq!(eval("'c'"), Value::Char('c'));
    assert_eq!(eval("true"), Value::Bool(true));
    assert_eq!(eval(""), Value::Null);
}

#[test]
fn test_arithmetic() {
    assert_eq!(eval("1 + 2 * 3"), Value::Int(7));
    assert_eq!(eval("(1 + 2) * 3"), Value::Int(9));
    assert_eq!(eval("7 / 2"), Value::Int(3));
    assert_eq!(eval("7 % 3"), Value::Int(1));
    assert_eq!(eval("7 / 2.0"), Value::Float(3.5));
    assert_eq!(eval("1 + 0.5"), Value::Float(1.5));
    assert_eq!(eval("10 - 4 - 3"), Value::Int(3));
}

#[test]
fn test_integer_arithmetic_wraps() {
    assert_eq!(eval("9223372036854775807 + 1"), Value::Int(i64::MIN));
}

#[test]
fn test_division_by_zero() {
    assert_eq!(eval_error("1 / 0"), ErrorImpl::DivisionByZero);
    assert_eq!(eval_error("1 % 0"), ErrorImpl::DivisionByZero);
    assert_eq!(eval("1.0 / 0"), Value::Float(f64::INFINITY));
}

#[test]
fn test_string_concatenation() {
    assert_eq!(eval("\"a\" + 1"), Value::Str("a1".to_string()));
    assert_eq!(eval("1.5 + \"b\""), Value::Str("1.5b".to_string()));
    assert_eq!(eval("\"x\" + 'y' + true"), Value::Str("xytrue".to_string()));
}

#[test]
fn test_comparisons() {
    assert_eq!(eval("1 < 2"), Value::Bool(true));
    assert_eq!(eval("2 <= 1.5"), Value::Bool(false));
    assert_eq!(eval("\"abc\" < \"abd\""), Value::Bool(true));
    assert_eq!(eval("'b' >= 'a'"), Value::Bool(true));
    assert_eq!(eval("1 == 1.0"), Value::Bool(true));
    assert_eq!(eval("\"a\" != \"a\""), Value::Bool(false));
    assert_eq!(eval("1 == \"1\""), Value::Bool(false));
}

#[test]
fn test_logical_operators_use_truthiness() {
    assert_eq!(eval("1 && \"x\""), Value::Bool(true));
    assert_eq!(eval("0 || 0.0"), Value::Bool(false));
    assert_eq!(eval("!0"), Value::Bool(true));
    assert_eq!(eval("!\"\""), Value::Bool(false));
}

#[test]
fn test_logical_operators_evaluate_both_sides() {
    assert!(matches!(
        eval_error("false && missing"),
        ErrorImpl::UndefinedVariable { .. }
    ));
}

#[test]
fn test_unary_operators() {
    assert_eq!(eval("-5"), Value::Int(-5));
    assert_eq!(eval("-2.5"), Value::Float(-2.5));
    assert_eq!(eval("+3"), Value::Int(3));
    assert_eq!(eval("~5"), Value::Int(-6));
    assert_eq!(eval("~2.9"), Value::Int(-3));
    assert_eq!(eval("~true"), Value::Int(-2));
    assert!(matches!(
        eval_error("-\"s\""),
        ErrorImpl::UnsupportedOperation { .. }
    ));
}

#[test]
fn test_unsupported_binary_operation() {
    assert_eq!(
        eval_error("true - 1"),
        ErrorImpl::UnsupportedOperation {
            operator: "-".to_string(),
            operand: "bool and int".to_string()
        }
    );
    assert!(matches!(
        eval_error("\"a\" < 1"),
        ErrorImpl::UnsupportedOperation { .. }
    ));
}

#[test]
fn test_variables_and_widening() {
    assert_eq!(eval("let x: float = 3\nx"), Value::Float(3.0));
    assert_eq!(eval("let s: string = 'c'\ns"), Value::Str("c".to_string()));
    assert_eq!(eval("var f: float = 1.5\nf = 2\nf"), Value::Float(2.0));
    assert_eq!(eval("let n: int\nn"), Value::Null);
}

#[test]
fn test_assignment_widens_by_declared_type() {
    // No initializer, so the binding starts out as `Null`
    assert_eq!(eval("var x: float\nx = 7\nx / 2"), Value::Float(3.5));
    assert_eq!(eval("var s: string\ns = 'c'\ns"), Value::Str("c".to_string()));

    // An `any` binding keeps whatever is assigned
    assert_eq!(eval("var x: any = 1.5\nx = 7\nx / 2"), Value::Int(3));
}

#[test]
fn test_immutable_assignment() {
    assert_eq!(
        eval_error("const x: int = 1\nx = 2"),
        ErrorImpl::ImmutableAssignment {
            variable: "x".to_string()
        }
    );
    assert!(matches!(
        eval_error("let x: int = 1\nx = 2"),
        ErrorImpl::ImmutableAssignment { .. }
    ));
}

#[test]
fn test_undefined_variable() {
    let (result, _) = run("let a: int = 1\nb");
    let error = result.unwrap_err();

    assert_eq!(
        error.kind(),
        &ErrorImpl::UndefinedVariable {
            variable: "b".to_string()
        }
    );
    assert_eq!(error.get_position().line, 2);
}

#[test]
fn test_while_and_break() {
    let source = "var i: int = 0\nwhile (true) { i = i + 1\nif (i == 3) { break } }\ni";
    assert_eq!(eval(source), Value::Int(3));
}

#[test]
fn test_continue_skips_rest_of_body() {
    let source = "var i: int = 0\nvar odd: int = 0\n\
                  while (i < 6) { i = i + 1\nif (i % 2 == 0) { continue }\nodd = odd + 1 }\nodd";
    assert_eq!(eval(source), Value::Int(3));
}

#[test]
fn test_for_loop() {
    let source = "var sum: int = 0\nfor (var i: int = 1; i <= 4; i = i + 1) { sum = sum + i }\nsum";
    assert_eq!(eval(source), Value::Int(10));
}

#[test]
fn test_for_continue_runs_update() {
    let source = "var odd: int = 0\n\
                  for (var i: int = 0; i < 6; i = i + 1) { if (i % 2 == 0) { continue }\nodd = odd + 1 }\nodd";
    assert_eq!(eval(source), Value::Int(3));
}

#[test]
fn test_for_break_and_return() {
    let source = "var last: int = 0\nfor (var i: int = 0; true; i = i + 1) { last = i\nif (i == 2) { break } }\nlast";
    assert_eq!(eval(source), Value::Int(2));

    let source = "for (var i: int = 0; true; i = i + 1) { if (i == 5) { return i } }";
    assert_eq!(eval(source), Value::Int(5));
}

#[test]
fn test_for_init_is_scoped() {
    assert!(matches!(
        eval_error("for (var i: int = 0; i < 1; i = i + 1) { }\ni"),
        ErrorImpl::UndefinedVariable { .. }
    ));

    // The scope is restored even when the loop returns early
    let (result, _) = run("let k: int = 9\nfor (var i: int = 0; true; i = i + 1) { return k }");
    assert_eq!(result, Ok(Value::Int(9)));
}

#[test]
fn test_if_else() {
    assert_eq!(
        eval("var r: int = 0\nif (1 > 2) { r = 1 } else if (2 > 1) { r = 2 } else { r = 3 }\nr"),
        Value::Int(2)
    );
    assert_eq!(eval("var r: int = 0\nif (0) { r = 1 }\nr"), Value::Int(0));
}

#[test]
fn test_blocks_are_scoped() {
    let source = "let x: int = 1\nif (true) { let x: int = 2\nlet y: int = 3 }\nx";
    assert_eq!(eval(source), Value::Int(1));
    assert!(matches!(
        eval_error("if (true) { let y: int = 3 }\ny"),
        ErrorImpl::UndefinedVariable { .. }
    ));
}

#[test]
fn test_return_ends_program() {
    let (result, output) = run("io.print(1)\nreturn 5\nio.print(2)");
    assert_eq!(result.unwrap(), Value::Int(5));
    assert_eq!(output, "1\n");

    assert_eq!(
        eval("var i: int = 0\nwhile (true) { i = i + 1\nif (i > 4) { return i } }"),
        Value::Int(5)
    );
    assert_eq!(eval("1\nreturn"), Value::Null);
}

#[test]
fn test_break_at_root_ends_program() {
    let (result, output) = run("io.print(1)\nbreak\nio.print(2)");
    assert_eq!(result.unwrap(), Value::Null);
    assert_eq!(output, "1\n");
}

#[test]
fn test_print_output() {
    let (_, output) = run("io.print(\"hello\")\nio.println(1, 2.5, true, 'c')\nio.print()");
    assert_eq!(output, "hello\n1 2.5 true c\n\n");
}

#[test]
fn test_import_alias() {
    let (result, output) = run("import out from io\nout.print(\"via alias\")\nimport io\nio.print(1)");
    assert!(result.is_ok());
    assert_eq!(output, "via alias\n1\n");
}

#[test]
fn test_import_unknown_module() {
    assert_eq!(
        eval_error("import net"),
        ErrorImpl::UnknownModule {
            module: "net".to_string()
        }
    );
    assert!(matches!(
        eval_error("import n from \"net\""),
        ErrorImpl::UnknownModule { .. }
    ));
}

#[test]
fn test_unknown_module_call() {
    assert_eq!(
        eval_error("unknownmod.f()"),
        ErrorImpl::UnknownModule {
            module: "unknownmod".to_string()
        }
    );
}

#[test]
fn test_unknown_function_call() {
    assert_eq!(
        eval_error("io.nope()"),
        ErrorImpl::UnknownFunction {
            module: "io".to_string(),
            function: "nope".to_string()
        }
    );
}

#[test]
fn test_bare_call_is_unsupported() {
    // Arguments are not evaluated first
    assert!(matches!(
        eval_error("foo(missing)"),
        ErrorImpl::UnsupportedFeature { .. }
    ));
}

#[test]
fn test_math_module() {
    assert_eq!(eval("math.sqrt(16)"), Value::Float(4.0));
    assert_eq!(eval("math.pow(2, 10)"), Value::Float(1024.0));
    assert_eq!(eval("math.abs(-3)"), Value::Int(3));
    assert_eq!(eval("math.abs(-2.5)"), Value::Float(2.5));
    assert_eq!(eval("math.floor(2.7)"), Value::Float(2.0));
    assert_eq!(eval("math.ceil(2.1)"), Value::Float(3.0));
    assert_eq!(eval("math.round(2.5)"), Value::Float(3.0));
    assert_eq!(eval("math.min(3, 1)"), Value::Int(1));
    assert_eq!(eval("math.max(3, 4.5)"), Value::Float(4.5));
    assert_eq!(eval("math.sin(0)"), Value::Float(0.0));
}

#[test]
fn test_builtin_argument_errors() {
    assert_eq!(
        eval_error("math.sqrt()"),
        ErrorImpl::MissingArguments {
            expected: 1,
            received: 0
        }
    );
    assert_eq!(
        eval_error("math.sqrt(1, 2)"),
        ErrorImpl::UnexpectedArguments {
            expected: 1,
            received: 2
        }
    );
    assert_eq!(
        eval_error("math.sqrt(\"x\")"),
        ErrorImpl::ArgumentTypeMatchError {
            expected: "number".to_string(),
            received: "string".to_string()
        }
    );
}

#[test]
fn test_str_module() {
    assert_eq!(eval("str.length(\"héllo\")"), Value::Int(5));
    assert_eq!(eval("str.toUpperCase(\"abc\")"), Value::Str("ABC".to_string()));
    assert_eq!(eval("str.toLowerCase(\"ABC\")"), Value::Str("abc".to_string()));
    assert_eq!(eval("str.trim(\"  x \")"), Value::Str("x".to_string()));
    assert_eq!(eval("str.includes(\"hello\", \"ell\")"), Value::Bool(true));
    assert_eq!(eval("str.startsWith(\"hello\", \"he\")"), Value::Bool(true));
    assert_eq!(eval("str.endsWith(\"hello\", \"x\")"), Value::Bool(false));
    assert_eq!(eval("str.indexOf(\"hello\", \"l\")"), Value::Int(2));
    assert_eq!(eval("str.indexOf(\"hello\", \"z\")"), Value::Int(-1));
    assert_eq!(eval("str.repeat(\"ab\", 3)"), Value::Str("ababab".to_string()));
    assert_eq!(eval("str.substr(\"hello\", 1, 3)"), Value::Str("el".to_string()));
    assert_eq!(eval("str.substr(\"hello\", 3, 99)"), Value::Str("lo".to_string()));
}

#[test]
fn test_str_repeat_rejects_huge_counts() {
    assert_eq!(
        eval_error("str.repeat(\"ab\", 9223372036854775807)"),
        ErrorImpl::ArgumentOutOfRange {
            function: "str.repeat".to_string(),
            value: "9223372036854775807".to_string(),
        }
    );
    assert_eq!(eval("str.repeat(\"ab\", -2)"), Value::Str(String::new()));
}

#[test]
fn test_registry_lookup() {
    let registry = ModuleRegistry::default();

    assert!(registry.contains("io"));
    assert!(registry.contains("math"));
    assert!(registry.contains("str"));
    assert!(!registry.contains("net"));

    assert_eq!(IoModule.name(), "io");
    assert!(MathModule.lookup("sqrt").is_some());
    assert!(StrModule.lookup("split").is_none());
}

#[test]
fn test_empty_registry_rejects_imports() {
    let tokens = tokenize("import io".to_string(), None).unwrap();
    let program = parse(tokens, Rc::new("shell".to_string())).unwrap();

    let mut interpreter = Interpreter::with_modules(Vec::new(), ModuleRegistry::empty());
    assert!(interpreter.run(&program).is_err());
}

#[test]
fn test_truthiness() {
    assert!(!Value::Null.is_truthy());
    assert!(!Value::Int(0).is_truthy());
    assert!(!Value::Float(0.0).is_truthy());
    assert!(!Value::Bool(false).is_truthy());
    assert!(Value::Str(String::new()).is_truthy());
    assert!(Value::Char('a').is_truthy());
    assert!(Value::Int(-1).is_truthy());
}
