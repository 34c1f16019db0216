#![allow(clippy::module_inception)]

use std::rc::Rc;

use colored::Colorize;

use crate::errors::errors::{Error, ErrorTip};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

extern crate regex;

/// A 1-based line/column location inside a named source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub line: u32,
    pub column: u32,
    pub file: Rc<String>,
}

impl Position {
    pub fn new(line: u32, column: u32, file: &str) -> Self {
        Position {
            line,
            column,
            file: Rc::new(String::from(file)),
        }
    }
}

/// Returns the text of a 1-based line, without its line break.
///
/// Lines are split the way the lexer counts them: `\n`, `\r\n` and a lone
/// `\r` each end a line.
pub fn get_line(source: &str, line: u32) -> Option<&str> {
    let index = (line as usize).checked_sub(1)?;
    source_lines(source).nth(index)
}

fn source_lines(source: &str) -> impl Iterator<Item = &str> {
    let mut rest = Some(source);

    std::iter::from_fn(move || {
        let current = rest?;
        match current.find(['\r', '\n']) {
            Some(index) => {
                let width = if current[index..].starts_with("\r\n") { 2 } else { 1 };
                rest = Some(&current[index + width..]);
                Some(&current[..index])
            }
            None => {
                rest = None;
                Some(current)
            }
        }
    })
}


/// Renders an error with the offending line of `source`.
///
/// ```text
/// Error: UnexpectedToken (Expected `IDENT` here)
/// -> main.trt:20:5
///    |
/// 20 | def = 5;
///    | ----^
/// ```
pub fn display_error(error: &Error, source: &str) -> String {
    let position = error.get_position();
    let line_string = position.line.to_string();
    let padding = line_string.len() + 2;

    let mut output = String::new();

    let name = error.get_error_name().red().bold();
    if let ErrorTip::None = error.get_tip() {
        output.push_str(&format!("{}: {}\n", "Error".red().bold(), name));
    } else {
        output.push_str(&format!("{}: {} ({})\n", "Error".red().bold(), name, error.get_tip()));
    }
    output.push_str(&format!(
        "{} {}:{}:{}\n",
        "->".blue().bold(),
        position.file,
        position.line,
        position.column
    ));

    let Some(line_text) = get_line(source, position.line) else {
        return output;
    };

    output.push_str(&format!("{:>padding$}\n", "|".blue()));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(line_text);
    output.push_str(&format!("{} | {}\n", line_string.blue(), line_text_removed.trim_end()));

    let arrows = (position.column as usize)
        .saturating_sub(removed_whitespace)
        .max(1);
    output.push_str(&format!(
        "{:>padding$} {}\n",
        "|".blue(),
        format!("{:->arrows$}", "^").red()
    ));

    output
}

fn remove_starting_whitespace(string: &str) -> (&str, usize) {
    let trimmed = string.trim_start_matches([' ', '\t']);
    (trimmed, string.len() - trimmed.len())
}
