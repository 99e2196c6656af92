#![allow(clippy::module_inception)]

use std::{
    fs,
    path::PathBuf,
    rc::Rc,
};

use crate::errors::errors::{Error, ErrorImpl, ErrorTip};

pub mod ast;
pub mod codegen;
pub mod errors;
pub mod interpreter;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod type_checker;

extern crate regex;

/// A location in a source unit.
///
/// `line` and `column` are 1-based, `column` counts characters. `line_start`
/// is the byte offset of the first character of the line, so the consumed
/// prefix of the current line is `source[line_start..offset]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    pub offset: u32,
    pub line: u32,
    pub column: u32,
    pub line_start: u32,
    pub file: Rc<String>,
}

impl Position {
    pub fn new(offset: u32, line: u32, column: u32, line_start: u32, file: Rc<String>) -> Self {
        Position {
            offset,
            line,
            column,
            line_start,
            file,
        }
    }

    pub fn start_of(file: Rc<String>) -> Self {
        Position::new(0, 1, 1, 0, file)
    }

    /// The part of the current line consumed before this position.
    pub fn line_prefix<'a>(&self, source: &'a str) -> &'a str {
        let start = (self.line_start as usize).min(source.len());
        let end = (self.offset as usize).clamp(start, source.len());
        source.get(start..end).unwrap_or("")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Span { start, end }
    }
}

/// Supplies the text of a source unit.
///
/// Package lookup, locking and installation live outside this crate; the
/// pipeline only ever asks for text by module reference.
pub trait SourceResolver {
    fn resolve_source(&self, module_reference: &str) -> Result<String, Error>;
}

/// Resolves module references as file paths under a root directory.
#[derive(Debug, Clone)]
pub struct FileResolver {
    root: PathBuf,
}

impl FileResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FileResolver { root: root.into() }
    }
}

impl Default for FileResolver {
    fn default() -> Self {
        FileResolver::new(".")
    }
}

impl SourceResolver for FileResolver {
    fn resolve_source(&self, module_reference: &str) -> Result<String, Error> {
        let path = self.root.join(module_reference);
        fs::read_to_string(&path).map_err(|error| {
            Error::new(
                ErrorImpl::SourceUnavailable {
                    source_path: path.to_string_lossy().into_owned(),
                    reason: error.to_string(),
                },
                Position::start_of(Rc::new(String::from(module_reference))),
            )
        })
    }
}

/// Returns the 1-based line number, the full text of that line and the
/// character offset of `position` within it.
pub fn get_line_at_position(source: &str, position: &Position) -> (usize, String, usize) {
    let line_text = source
        .split_inclusive('\n')
        .nth(position.line.saturating_sub(1) as usize)
        .unwrap_or("");

    (
        position.line as usize,
        line_text.trim_end_matches(['\n', '\r']).to_string(),
        position.line_prefix(source).chars().count(),
    )
}


/// Renders an error against the source it came from.
pub fn render_error(error: &Error, file: &str, source: &str) -> String {
    /*
        Error: name (tip)
        -> main.str
           |
        20 | let a = #
           | --------^
    */

    let (line, line_text, line_pos) = get_line_at_position(source, error.get_position());

    let line_string = line.to_string();
    let padding = line_string.len() + 2;
    let mut out = String::new();

    if let ErrorTip::None = error.get_tip() {
        out.push_str(&format!("Error: {}\n", error.get_error_name()));
    } else {
        out.push_str(&format!(
            "Error: {} ({})\n",
            error.get_error_name(),
            error.get_tip()
        ));
    }
    out.push_str(&format!("-> {}:{}:{}\n", file, line, error.get_position().column));
    out.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    out.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;
    out.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));

    out
}

pub fn display_error(error: &Error, file: &str, source: &str) {
    eprint!("{}", render_error(error, file, source));
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' || c == '\t' {
            start += 1;
        } else {
            break;
        }
    }

    (string.chars().skip(start).collect(), start)
}
