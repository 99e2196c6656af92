use std::rc::Rc;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN,
};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

/// Handles a pattern match at the current position. `Ok(None)` means the
/// matched text was skipped.
pub type RegexHandler = fn(&mut Lexer, &Regex) -> Result<Option<Token>, Error>;

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

lazy_static! {
    // Order matters: comments before `/`, two-character operators before
    // their one-character prefixes.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern { regex: Regex::new("^[ \t\r\n]+").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new("^//[^\n]*").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new("^[a-zA-Z_][a-zA-Z0-9_]*").unwrap(), handler: symbol_handler },
        RegexPattern { regex: Regex::new("^[0-9]+(\\.[0-9]+)?").unwrap(), handler: number_handler },
        RegexPattern { regex: Regex::new("^\"").unwrap(), handler: string_handler },
        RegexPattern { regex: Regex::new("^'").unwrap(), handler: char_handler },
        RegexPattern { regex: Regex::new("^==").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Equals, "==") },
        RegexPattern { regex: Regex::new("^!=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::NotEquals, "!=") },
        RegexPattern { regex: Regex::new("^<=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::LessEquals, "<=") },
        RegexPattern { regex: Regex::new("^>=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::GreaterEquals, ">=") },
        RegexPattern { regex: Regex::new("^=>").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::FatArrow, "=>") },
        RegexPattern { regex: Regex::new("^\\|\\|").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Or, "||") },
        RegexPattern { regex: Regex::new("^&&").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::And, "&&") },
        RegexPattern { regex: Regex::new("^\\+\\+").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::PlusPlus, "++") },
        RegexPattern { regex: Regex::new("^--").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::MinusMinus, "--") },
        RegexPattern { regex: Regex::new("^\\{").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenCurly, "{") },
        RegexPattern { regex: Regex::new("^\\}").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseCurly, "}") },
        RegexPattern { regex: Regex::new("^\\(").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "(") },
        RegexPattern { regex: Regex::new("^\\)").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")") },
        RegexPattern { regex: Regex::new("^!").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Not, "!") },
        RegexPattern { regex: Regex::new("^=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Assignment, "=") },
        RegexPattern { regex: Regex::new("^<").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Less, "<") },
        RegexPattern { regex: Regex::new("^>").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Greater, ">") },
        RegexPattern { regex: Regex::new("^\\.").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Dot, ".") },
        RegexPattern { regex: Regex::new("^;").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Semicolon, ";") },
        RegexPattern { regex: Regex::new("^:").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Colon, ":") },
        RegexPattern { regex: Regex::new("^\\?").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Question, "?") },
        RegexPattern { regex: Regex::new("^,").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Comma, ",") },
        RegexPattern { regex: Regex::new("^\\+").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Plus, "+") },
        RegexPattern { regex: Regex::new("^-").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Dash, "-") },
        RegexPattern { regex: Regex::new("^/").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Slash, "/") },
        RegexPattern { regex: Regex::new("^\\*").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Star, "*") },
        RegexPattern { regex: Regex::new("^%").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Percent, "%") },
        RegexPattern { regex: Regex::new("^~").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Tilde, "~") },
    ];
}

pub struct Lexer {
    source: String,
    pos: usize,
    line: u32,
    column: u32,
    line_start: usize,
    file: Rc<String>,
}

impl Lexer {
    pub fn new(source: String, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Lexer {
            source,
            pos: 0,
            line: 1,
            column: 1,
            line_start: 0,
            file: file_name,
        }
    }

    /// Moves forward `n` bytes, keeping line and column in step.
    pub fn advance_n(&mut self, n: usize) {
        let end = (self.pos + n).min(self.source.len());
        for (offset, ch) in self.source[self.pos..end].char_indices() {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
                self.line_start = self.pos + offset + 1;
            } else {
                self.column += 1;
            }
        }
        self.pos = end;
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    pub fn get_position(&self) -> Position {
        Position::new(
            self.pos as u32,
            self.line,
            self.column,
            self.line_start as u32,
            Rc::clone(&self.file),
        )
    }

    /// Returns the next token, or `EOF` once the input is exhausted.
    ///
    /// Characters no pattern accepts come back as single-character
    /// `Unknown` tokens, so the stream always terminates.
    pub fn next_token(&mut self) -> Result<Token, Error> {
        'scan: while !self.at_eof() {
            for pattern in PATTERNS.iter() {
                if !pattern.regex.is_match(self.remainder()) {
                    continue;
                }

                match (pattern.handler)(self, &pattern.regex)? {
                    Some(token) => return Ok(token),
                    None => continue 'scan,
                }
            }

            return Ok(unknown_char(self));
        }

        let position = self.get_position();
        Ok(MK_TOKEN!(
            TokenKind::EOF,
            String::from("EOF"),
            Span {
                start: position.clone(),
                end: position
            }
        ))
    }

    fn matched_len(&self, regex: &Regex) -> usize {
        regex.find(self.remainder()).map(|m| m.end()).unwrap_or(0)
    }
}

fn unknown_char(lexer: &mut Lexer) -> Token {
    let start = lexer.get_position();
    let ch = lexer.remainder().chars().next().unwrap_or('\0');
    lexer.advance_n(ch.len_utf8());

    MK_TOKEN!(
        TokenKind::Unknown,
        ch.to_string(),
        Span {
            start,
            end: lexer.get_position()
        }
    )
}

fn skip_handler(lexer: &mut Lexer, regex: &Regex) -> Result<Option<Token>, Error> {
    let matched = lexer.matched_len(regex);
    lexer.advance_n(matched);
    Ok(None)
}

fn number_handler(lexer: &mut Lexer, regex: &Regex) -> Result<Option<Token>, Error> {
    let matched = lexer.matched_len(regex);
    let value = lexer.remainder()[..matched].to_string();
    let start = lexer.get_position();
    lexer.advance_n(matched);

    Ok(Some(MK_TOKEN!(
        TokenKind::Number,
        value,
        Span {
            start,
            end: lexer.get_position()
        }
    )))
}

fn symbol_handler(lexer: &mut Lexer, regex: &Regex) -> Result<Option<Token>, Error> {
    let matched = lexer.matched_len(regex);
    let value = lexer.remainder()[..matched].to_string();
    let kind = RESERVED_LOOKUP
        .get(value.as_str())
        .copied()
        .unwrap_or(TokenKind::Identifier);

    let start = lexer.get_position();
    lexer.advance_n(matched);

    Ok(Some(MK_TOKEN!(
        kind,
        value,
        Span {
            start,
            end: lexer.get_position()
        }
    )))
}

/// Scans a quoted literal starting at the opening `delimiter`.
///
/// Returns the unescaped contents and the byte length including both quotes,
/// or `None` if the input ends first.
fn scan_quoted(remainder: &str, delimiter: char) -> Option<(String, usize)> {
    let mut result = String::new();
    let mut chars = remainder.char_indices().skip(1);

    while let Some((offset, ch)) = chars.next() {
        if ch == delimiter {
            return Some((result, offset + ch.len_utf8()));
        }

        if ch == '\\' {
            let (_, escaped) = chars.next()?;
            match escaped {
                'n' => result.push('\n'),
                't' => result.push('\t'),
                'r' => result.push('\r'),
                other => result.push(other),
            }
        } else {
            result.push(ch);
        }
    }

    None
}

fn string_handler(lexer: &mut Lexer, _regex: &Regex) -> Result<Option<Token>, Error> {
    let start = lexer.get_position();
    let Some((value, length)) = scan_quoted(lexer.remainder(), '"') else {
        return Err(Error::new(ErrorImpl::UnterminatedString, start));
    };

    lexer.advance_n(length);

    Ok(Some(MK_TOKEN!(
        TokenKind::String,
        value,
        Span {
            start,
            end: lexer.get_position()
        }
    )))
}

fn char_handler(lexer: &mut Lexer, _regex: &Regex) -> Result<Option<Token>, Error> {
    let start = lexer.get_position();
    let Some((value, length)) = scan_quoted(lexer.remainder(), '\'') else {
        return Err(Error::new(ErrorImpl::UnterminatedChar, start));
    };

    if value.chars().count() != 1 {
        return Err(Error::new(
            ErrorImpl::InvalidCharLiteral { literal: value },
            start,
        ));
    }

    lexer.advance_n(length);

    Ok(Some(MK_TOKEN!(
        TokenKind::Char,
        value,
        Span {
            start,
            end: lexer.get_position()
        }
    )))
}

pub fn tokenize(source: String, file: Option<String>) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source, file);
    let mut tokens = vec![];

    loop {
        let token = lex.next_token()?;
        let is_eof = token.kind == TokenKind::EOF;
        tokens.push(token);

        if is_eof {
            return Ok(tokens);
        }
    }
}
