use std::rc::Rc;

use super::codegen::{c_type, generate};
use crate::{
    ast::types::Type,
    errors::errors::{Error, ErrorImpl},
    lexer::lexer::tokenize,
    parser::parser::parse,
};

fn generate_source(source: &str) -> Result<String, Error> {
    let tokens = tokenize(source.to_string(), Some("test.str".to_string())).unwrap();
    let program = parse(tokens, Rc::new("test.str".to_string())).unwrap();
    generate(&program)
}

/// Lines between `int main() {` and `return 0;`, without indentation.
fn body(output: &str) -> Vec<String> {
    output
        .lines()
        .skip_while(|line| *line != "int main() {")
        .skip(1)
        .take_while(|line| line.trim() != "return 0;")
        .map(|line| line.trim().to_string())
        .collect()
}

#[test]
fn test_boilerplate() {
    let output = generate_source("").unwrap();

    assert_eq!(
        output,
        "#include <stdio.h>\n#include <math.h>\n#include <stdbool.h>\n\nint main() {\n    return 0;\n}\n"
    );
}

#[test]
fn test_declarations() {
    let output = generate_source(
        "let a: int = 1\nlet b: float = 2.5\nlet c: bool = true\nlet d: char = 'x'\nlet e: string = \"hi\"\nvar f: any",
    )
    .unwrap();

    assert_eq!(
        body(&output),
        vec![
            "int a = 1;",
            "double b = 2.5;",
            "bool c = true;",
            "char d = 'x';",
            "char* e = \"hi\";",
            "int f;",
        ]
    );
}

#[test]
fn test_char_widened_to_string() {
    let output =
        generate_source("let c: char = 'x'\nlet s: string = 'y'\nlet q: string = '\"'\nlet t: string = c")
            .unwrap();

    assert_eq!(
        body(&output),
        vec![
            "char c = 'x';",
            "char* s = \"y\";",
            "char* q = \"\\\"\";",
            "char* t = (char[]){c, '\\0'};",
        ]
    );
}

#[test]
fn test_float_literals_keep_decimal_point() {
    let output = generate_source("let x: float = 3.0").unwrap();
    assert_eq!(body(&output), vec!["double x = 3.0;"]);
}

#[test]
fn test_expressions_are_parenthesized() {
    let output = generate_source("let x: int = 1 + 2 * -y").unwrap();
    assert_eq!(body(&output), vec!["int x = (1 + (2 * (-y)));"]);
}

#[test]
fn test_double_negation_does_not_form_decrement() {
    let output = generate_source("let x: int = - -1").unwrap();
    assert_eq!(body(&output), vec!["int x = (-(-1));"]);
}

#[test]
fn test_string_escaping() {
    let output = generate_source("let s: string = \"a\\\"b\\n\"\nlet c: char = '\\''").unwrap();
    assert_eq!(body(&output), vec!["char* s = \"a\\\"b\\n\";", "char c = '\\'';"]);
}

#[test]
fn test_math_calls() {
    let output = generate_source("let r: float = math.sqrt(math.abs(x)) + math.pow(2, 3)").unwrap();
    assert_eq!(
        body(&output),
        vec!["double r = (sqrt(fabs(x)) + pow(2, 3));"]
    );
}

#[test]
fn test_math_alias() {
    let output = generate_source("import m from math\nlet r: float = m.floor(1.5)").unwrap();
    assert_eq!(body(&output), vec!["double r = floor(1.5);"]);
}

#[test]
fn test_other_statements_are_skipped() {
    let output = generate_source(
        "let x: int = 1\nio.print(x)\nif (x > 0) { let y: int = 2 }\nwhile (false) { }\nx = 3",
    )
    .unwrap();

    assert_eq!(body(&output), vec!["int x = 1;"]);
}

#[test]
fn test_unsupported_calls() {
    let error = generate_source("let x: int = io.print(1)").unwrap_err();
    assert!(matches!(error.kind(), ErrorImpl::UnsupportedFeature { .. }));

    let error = generate_source("let x: int = foo()").unwrap_err();
    assert!(matches!(error.kind(), ErrorImpl::UnsupportedFeature { .. }));
}

#[test]
fn test_type_map() {
    assert_eq!(c_type(&Type::int()), "int");
    assert_eq!(c_type(&Type::float()), "double");
    assert_eq!(c_type(&Type::string()), "char*");
    assert_eq!(c_type(&Type::from_name("Point")), "int");
    assert_eq!(c_type(&Type::any()), "int");
}

#[test]
fn test_generation_is_deterministic() {
    let source = "let a: int = 1\nlet b: float = a * 2.5\nlet c: bool = a < 2 && true";
    assert_eq!(generate_source(source).unwrap(), generate_source(source).unwrap());
}
