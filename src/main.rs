use std::{
    fs,
    path::{Path, PathBuf},
    process::ExitCode,
    rc::Rc,
    time::Instant,
};

use clap::Parser;
use strata::{
    codegen::codegen::generate,
    display_error,
    errors::errors::{Error, ErrorCategory},
    interpreter::interpreter::Interpreter,
    lexer::lexer::tokenize,
    parser::parser::parse,
    type_checker::type_checker::type_check,
    FileResolver, SourceResolver,
};

#[derive(Parser)]
#[command(author, version, about = "Strata language interpreter and C transpiler")]
struct Options {
    /// Source file to run
    path: PathBuf,
    /// After running, also write the program's declarations as C source
    #[arg(long)]
    build: bool,
    /// Output path for `--build`
    #[arg(short, long, default_value = "out.c")]
    output: PathBuf,
    /// Print per-phase timings to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let options = Options::parse();

    match run(&options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(()) => ExitCode::FAILURE,
    }
}

/// Reports a phase timing when `--verbose` is set.
fn timing(options: &Options, phase: &str, start: Instant) {
    if options.verbose {
        eprintln!("{} in {:?}", phase, start.elapsed());
    }
}

fn report_io_error(error: &Error) {
    eprintln!("Error: {} ({})", error.get_error_name(), error.get_tip());
    eprintln!("-> {}", error);
}

/// Prints `error` the way its category calls for. Only errors tied to a
/// source location get the caret rendering.
fn report(error: &Error, file_name: &str, source: &str) {
    match error.category() {
        ErrorCategory::Io => report_io_error(error),
        ErrorCategory::Lex | ErrorCategory::Parse | ErrorCategory::Type | ErrorCategory::Runtime => {
            display_error(error, file_name, source)
        }
    }
}

fn run(options: &Options) -> Result<(), ()> {
    let file_name = options
        .path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| options.path.to_string_lossy().into_owned());

    let start = Instant::now();

    let resolver = FileResolver::default();
    let source = resolver
        .resolve_source(&options.path.to_string_lossy())
        .map_err(|error| report(&error, &file_name, ""))?;

    let tokens = tokenize(source.clone(), Some(file_name.clone()))
        .map_err(|error| report(&error, &file_name, &source))?;

    timing(options, "Tokenized", start);

    let parse_start = Instant::now();
    let program = parse(tokens, Rc::new(file_name.clone()))
        .map_err(|error| report(&error, &file_name, &source))?;

    timing(options, "Parsed", parse_start);

    let type_check_start = Instant::now();
    let diagnostics = type_check(&program);

    timing(options, "Type checked", type_check_start);

    if !diagnostics.is_empty() {
        for error in &diagnostics {
            report(error, &file_name, &source);
        }
        return Err(());
    }

    let run_start = Instant::now();
    let mut interpreter = Interpreter::stdout();
    interpreter
        .run(&program)
        .map_err(|error| report(&error, &file_name, &source))?;

    timing(options, "Interpreted", run_start);

    if options.build {
        let build_start = Instant::now();
        let c_source =
            generate(&program).map_err(|error| report(&error, &file_name, &source))?;
        write_output(&options.output, &c_source)?;

        timing(options, "Generated C", build_start);
        if options.verbose {
            eprintln!("Wrote {}", options.output.display());
        }
    }

    timing(options, "Total time", start);

    Ok(())
}

fn write_output(path: &Path, contents: &str) -> Result<(), ()> {
    fs::write(path, contents).map_err(|error| {
        eprintln!("Error: cannot write {} ({})", path.display(), error);
    })
}
