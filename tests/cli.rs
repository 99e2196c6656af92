use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::{tempdir, NamedTempFile};

fn script(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", contents).unwrap();
    file
}

#[test]
fn runs_a_program() {
    let file = script("import io\nio.print(\"hello\", 1 + 2)\n");

    Command::cargo_bin("strata")
        .unwrap()
        .arg(file.path())
        .assert()
        .success()
        .stdout("hello 3\n");
}

#[test]
fn missing_source() {
    Command::cargo_bin("strata")
        .unwrap()
        .arg("./NONEXISTENT.str")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error: SourceUnavailable"))
        .stderr(predicate::str::contains("^").not());
}

#[test]
fn runtime_error_shows_caret() {
    let file = script("for (var i: int = 0; i < 2; i = i + 1) { io.print(i) }
io.print(str.repeat(\"ab\", 9223372036854775807))
");

    Command::cargo_bin("strata")
        .unwrap()
        .arg(file.path())
        .assert()
        .failure()
        .code(1)
        .stdout("0\n1\n")
        .stderr(predicate::str::contains("Error: ArgumentOutOfRange"))
        .stderr(predicate::str::contains("2 | io.print(str.repeat(\"ab\", 9223372036854775807))"))
        .stderr(predicate::str::contains("---------^"));
}

#[test]
fn parse_error_shows_caret() {
    let file = script("let x: int = @\n");

    Command::cargo_bin("strata")
        .unwrap()
        .arg(file.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error: UnexpectedToken"))
        .stderr(predicate::str::contains("1 | let x: int = @"))
        .stderr(predicate::str::contains("^"));
}

#[test]
fn type_errors_stop_before_running() {
    let file = script("io.print(\"side effect\")\nlet a: int = 1.5\nlet b: bool = 2\n");

    Command::cargo_bin("strata")
        .unwrap()
        .arg(file.path())
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("TypeMismatch").count(2));
}

#[test]
fn runtime_error_exits_with_failure() {
    let file = script("io.print(1)\nio.nope()\n");

    Command::cargo_bin("strata")
        .unwrap()
        .arg(file.path())
        .assert()
        .failure()
        .code(1)
        .stdout("1\n")
        .stderr(predicate::str::contains("UnknownFunction"));
}

#[test]
fn build_writes_c_source() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("program.c");
    let file = script("let x: int = 1 + 2\nio.print(x)\n");

    Command::cargo_bin("strata")
        .unwrap()
        .arg("--build")
        .arg("--output")
        .arg(&output)
        .arg(file.path())
        .assert()
        .success()
        .stdout("3\n");

    let c_source = std::fs::read_to_string(output).unwrap();
    assert!(c_source.contains("int main() {"));
    assert!(c_source.contains("int x = (1 + 2);"));
}

#[test]
fn verbose_timings_go_to_stderr() {
    let file = script("io.print(1)\n");

    Command::cargo_bin("strata")
        .unwrap()
        .arg("-v")
        .arg(file.path())
        .assert()
        .success()
        .stdout("1\n")
        .stderr(predicate::str::contains("Tokenized in"))
        .stderr(predicate::str::contains("Parsed in"));
}
