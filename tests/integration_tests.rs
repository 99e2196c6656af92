//! Integration tests for the full pipeline.
//!
//! These tests run source text through tokenization, parsing, type checking,
//! interpretation and C generation, the way the CLI does.

use std::rc::Rc;

use strata::{
    ast::ast::Program,
    codegen::codegen::generate,
    errors::errors::{Error, ErrorCategory, ErrorImpl},
    interpreter::{interpreter::Interpreter, value::Value},
    lexer::lexer::tokenize,
    parser::parser::parse,
    render_error,
    type_checker::type_checker::type_check,
};

fn front_end(source: &str) -> Result<Program, Error> {
    let tokens = tokenize(source.to_string(), Some("main.str".to_string()))?;
    parse(tokens, Rc::new("main.str".to_string()))
}

/// Runs a program that is expected to type check cleanly.
fn execute(source: &str) -> (Result<Value, Error>, String) {
    let program = front_end(source).unwrap();
    let diagnostics = type_check(&program);
    assert!(diagnostics.is_empty(), "unexpected diagnostics: {:?}", diagnostics);

    let mut interpreter = Interpreter::new(Vec::new());
    let result = interpreter.run(&program);
    (result, String::from_utf8(interpreter.into_output()).unwrap())
}

#[test]
fn test_counting_loop() {
    let source = r#"
        import io
        var i: int = 0
        while (true) {
            i = i + 1
            if (i == 3) { break }
        }
        io.print(i)
        i
    "#;

    let (result, output) = execute(source);
    assert_eq!(result.unwrap(), Value::Int(3));
    assert_eq!(output, "3\n");
}

#[test]
fn test_for_loop_with_widened_accumulator() {
    let source = r#"
        var total: float
        for (var i: int = 1; i <= 4; i = i + 1) {
            if (i == 2) { continue }
            total = i
            io.print(total / 2)
        }
        total
    "#;

    let (result, output) = execute(source);
    assert_eq!(result.unwrap(), Value::Float(4.0));
    assert_eq!(output, "0.5\n1.5\n2\n");
}

#[test]
fn test_fizzbuzz_style_program() {
    let source = r#"
        var n: int = 1
        while (n <= 15) {
            if (n % 15 == 0) {
                io.print("FizzBuzz")
            } else if (n % 3 == 0) {
                io.print("Fizz")
            } else if (n % 5 == 0) {
                io.print("Buzz")
            } else {
                io.print(n)
            }
            n = n + 1
        }
    "#;

    let (result, output) = execute(source);
    assert!(result.is_ok());

    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 15);
    assert_eq!(lines[2], "Fizz");
    assert_eq!(lines[4], "Buzz");
    assert_eq!(lines[14], "FizzBuzz");
    assert_eq!(lines[6], "7");
}

#[test]
fn test_builtin_modules_together() {
    let source = r#"
        import text from str
        let name: string = "  strata  "
        let clean: string = text.trim(name)
        io.print(text.toUpperCase(clean), text.length(clean))
        let hyp: float = math.sqrt(math.pow(3, 2) + math.pow(4, 2))
        io.print("hypotenuse: " + hyp)
    "#;

    let (_, output) = execute(source);
    assert_eq!(output, "STRATA 6\nhypotenuse: 5\n");
}

#[test]
fn test_precedence_end_to_end() {
    assert_eq!(execute("1 + 2 * 3").0.unwrap(), Value::Int(7));
    assert_eq!(execute("(1 + 2) * 3").0.unwrap(), Value::Int(9));
}

#[test]
fn test_float_declaration_accepts_int() {
    let program = front_end("let x: float = 3").unwrap();
    assert!(type_check(&program).is_empty());
}

#[test]
fn test_int_declaration_rejects_float() {
    let program = front_end("let x: int = 3.0").unwrap();
    let diagnostics = type_check(&program);

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].category(), ErrorCategory::Type);
    assert_eq!(
        diagnostics[0].kind(),
        &ErrorImpl::TypeMismatch {
            expected: "int".to_string(),
            received: "float".to_string()
        }
    );
}

#[test]
fn test_runtime_errors() {
    let cases = [
        ("const x: int = 1\nx = 2", "ImmutableAssignment"),
        ("io.print(missing)", "UndefinedVariable"),
        ("unknownmod.f()", "UnknownModule"),
        ("io.nope()", "UnknownFunction"),
        ("helper(1)", "UnsupportedFeature"),
        ("let z: int = 0\n10 / z", "DivisionByZero"),
    ];

    for (source, name) in cases {
        let (result, _) = execute(source);
        let error = result.unwrap_err();
        assert_eq!(error.get_error_name(), name, "for {:?}", source);
        assert_eq!(error.category(), ErrorCategory::Runtime);
    }
}

#[test]
fn test_lex_error_is_reported_with_caret() {
    let source = "let s: string = \"open";
    let error = front_end(source).unwrap_err();

    assert_eq!(error.category(), ErrorCategory::Lex);

    let rendered = render_error(&error, "main.str", source);
    let lines: Vec<&str> = rendered.lines().collect();
    assert!(lines[0].starts_with("Error: UnterminatedString"));
    assert_eq!(lines[1], "-> main.str:1:17");
    assert_eq!(lines[3], "1 | let s: string = \"open");
    assert_eq!(lines[4], format!("  | {}^", "-".repeat(16)));
}

#[test]
fn test_parse_error_category() {
    let error = front_end("while (x { }").unwrap_err();
    assert_eq!(error.category(), ErrorCategory::Parse);
}

#[test]
fn test_build_output_for_declarations() {
    let program = front_end("let r: float = 2\nlet area: float = 3.14 * r * r\nio.print(area)").unwrap();

    let c_source = generate(&program).unwrap();
    assert!(c_source.contains("double r = 2;"));
    assert!(c_source.contains("double area = ((3.14 * r) * r);"));
    assert!(!c_source.contains("print"));
}

#[test]
fn test_pipeline_is_deterministic() {
    let source = "var i: int = 0\nwhile (i < 3) { i = i + 1 }\nlet f: float = i * 1.5\nlet bad: bool = 1";

    let first = front_end(source).unwrap();
    let second = front_end(source).unwrap();

    assert_eq!(
        tokenize(source.to_string(), None).unwrap(),
        tokenize(source.to_string(), None).unwrap()
    );
    assert_eq!(first, second);
    assert_eq!(type_check(&first), type_check(&second));
    assert_eq!(generate(&first).unwrap(), generate(&second).unwrap());
}
