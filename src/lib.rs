#![allow(clippy::module_inception)]

use std::{fmt::Write, path::Path, rc::Rc};

use crate::errors::errors::{Error, ErrorTip};

pub mod ast;
pub mod config;
pub mod errors;
pub mod evaluator;
pub mod lexer;
pub mod macros;
pub mod object;
pub mod parser;
pub mod repl;
pub mod stack;

extern crate regex;

/// Byte offset into a named source.
#[derive(Debug, Clone)]
pub struct Position(pub u32, pub Rc<String>);

impl Position {
    pub fn null() -> Self {
        Position(0, Rc::new(String::from("<null>")))
    }
}

#[derive(Debug, Clone)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn null() -> Self {
        Span {
            start: Position::null(),
            end: Position::null(),
        }
    }
}

/// Finds the line holding byte offset `position`.
///
/// Returns the 1-based line number, the line text and the offset within the
/// line. A position at the very end of `content` maps to the end of the last
/// line; anything further out gives `None`.
pub fn get_line_at_position(content: &str, position: u32) -> Option<(usize, String, usize)> {
    let pos = position as usize;
    let mut start = 0;
    let mut last = None;

    for (index, line) in content.split_inclusive('\n').enumerate() {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            return Some((index + 1, line.to_string(), pos - start));
        }

        last = Some((index + 1, line));
        start = end;
    }

    // End of input
    match last {
        Some((line_number, line)) if pos == content.len() => Some((
            line_number,
            line.to_string(),
            line.trim_end_matches('\n').len(),
        )),
        _ => None,
    }
}

/// Renders a parse or fatal error against the source it came from.
///
/// ```text
/// Error: UnexpectedToken
/// -> main.aq
///   |
/// 1 | let a 5;
///   | ------^
/// expected next token to be =, got INT instead
/// ```
pub fn format_error(error: &Error, file: &Path, source: &str) -> String {
    let mut out = String::new();

    // Writing into a String cannot fail
    if let ErrorTip::None = error.get_tip() {
        let _ = writeln!(out, "Error: {}", error.get_error_name());
    } else {
        let _ = writeln!(out, "Error: {} ({})", error.get_error_name(), error.get_tip());
    }
    let _ = writeln!(out, "-> {}", file.to_string_lossy());

    let position = error.get_position();
    if let Some((line, line_text, line_pos)) = get_line_at_position(source, position.0) {
        let line_string = line.to_string();
        let padding = line_string.len() + 2;

        let _ = writeln!(out, "{:>padding$}", "|");

        let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
        let _ = writeln!(out, "{} | {}", line_string, line_text_removed.trim_end());

        // Offsets are in bytes, the caret is placed in characters
        let column = line_text
            .get(..line_pos)
            .map_or(line_pos, |prefix| prefix.chars().count());
        let arrows = column.saturating_sub(removed_whitespace) + 1;
        let _ = writeln!(out, "{:>padding$} {:->arrows$}", "|", "^");
    }

    let _ = writeln!(out, "{}", error);
    out
}

pub fn display_error(error: &Error, file: &Path, source: &str) {
    eprint!("{}", format_error(error, file, source));
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let start = string
        .chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .count();

    (String::from(&string[start..]), start)
}
