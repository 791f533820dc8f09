#![allow(clippy::module_inception)]

use std::fmt::Display;

use crate::{
    errors::errors::{Error, ErrorTip},
    transpiler::transpiler::{transpile, TranspileOptions},
};

pub mod ast;
pub mod cst;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod semantic;
pub mod transpiler;

extern crate regex;

/// A point in the source text. `line` and `column` are 0-based, `offset` is
/// the byte offset from the start of the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub line: usize,
    pub column: usize,
    pub offset: usize,
}

impl Position {
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Position {
            line,
            column,
            offset,
        }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.column + 1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Runs the whole pipeline: tokenize, parse, validate, transform, transpile.
pub fn compile(source: &str, options: &TranspileOptions) -> Result<String, Error> {
    let tree = parser::parser::parse(source);
    cst::validate::validate(&tree)?;

    let unit = semantic::transformer::transform(tree.root_node(), source.as_bytes())?;
    transpile(&unit, options)
}

/// Returns the 1-based line number, the text of that line, and the column.
pub fn get_line_at_position(content: &str, position: Position) -> (usize, String, usize) {
    let line = content
        .split_inclusive('\n')
        .nth(position.line)
        .unwrap_or("")
        .to_string();

    (position.line + 1, line, position.column)
}

pub fn display_error(error: &Error, file: &str, content: &str) {
    /*
        error: message
        -> fib.palu
           |
        20 | let a: i32 = #
           | -------------^
    */

    let (line, line_text, line_pos) = get_line_at_position(content, *error.get_position());

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    if let ErrorTip::None = error.get_tip() {
        eprintln!("Error: {}", error.get_error_name());
    } else {
        eprintln!("Error: {} ({})", error.get_error_name(), error.get_tip());
    }
    eprintln!("-> {}", file);
    eprintln!("{:>padding$}", "|");

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    eprintln!("{} | {}", line_string, line_text_removed.trim_end());

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;

    eprintln!("{:>padding$} {:->arrows$}", "|", "^");
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let start = string.chars().take_while(|c| *c == ' ' || *c == '\t').count();

    (String::from(&string[start..]), start)
}
