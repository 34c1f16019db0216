use std::rc::Rc;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{Position, MK_COMPOSABLE, MK_TOKEN};

use super::tokens::{Token, TokenKind};

lazy_static! {
    static ref SYMBOL_PATTERN: Regex = Regex::new("^[a-zA-Z_]+").unwrap();
    static ref NUMBER_PATTERN: Regex = Regex::new("^[0-9]+").unwrap();
}

/// Source name used when the caller does not provide one.
pub const DEFAULT_SOURCE_NAME: &str = "repl";

/// Pull-based scanner over an in-memory source.
///
/// Each call to [`Lexer::next_token`] skips whitespace and produces exactly
/// one token. Once the input is exhausted every further call yields `EOF`
/// at the same position.
#[derive(Clone, Debug)]
pub struct Lexer {
    source: String,
    pos: usize,
    line: u32,
    column: u32,
    file: Rc<String>,
}

impl Lexer {
    pub fn new(source: String, file: Option<String>) -> Lexer {
        let file_name = Rc::new(file.unwrap_or_else(|| String::from(DEFAULT_SOURCE_NAME)));

        Lexer {
            source,
            pos: 0,
            line: 1,
            column: 1,
            file: file_name,
        }
    }

    /// The source name used as the prefix of diagnostics.
    pub fn file(&self) -> Rc<String> {
        Rc::clone(&self.file)
    }

    pub fn position(&self) -> Position {
        Position {
            line: self.line,
            column: self.column,
            file: Rc::clone(&self.file),
        }
    }

    pub fn at(&self) -> Option<char> {
        self.remainder().chars().next()
    }

    pub fn peek(&self) -> Option<char> {
        self.remainder().chars().nth(1)
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    /// Consumes the current character, keeping line and column in step.
    pub fn bump(&mut self) -> char {
        let Some(ch) = self.at() else {
            return '\0';
        };

        match ch {
            '\n' => {
                self.line += 1;
                self.column = 1;
            }
            // CRLF is a single line break, counted on the LF
            '\r' if self.peek() == Some('\n') => {}
            '\r' => {
                self.line += 1;
                self.column = 1;
            }
            _ => self.column += 1,
        }

        self.pos += ch.len_utf8();
        ch
    }

    /// Advances over `n` bytes of a single-line ASCII match.
    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
        self.column += n as u32;
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.at(), Some(' ' | '\t' | '\r' | '\n')) {
            self.bump();
        }
    }

    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let start = self.position();
        let Some(ch) = self.at() else {
            return MK_TOKEN!(TokenKind::EOF, String::new(), start);
        };

        let token = match ch {
            '=' => MK_COMPOSABLE!(self, TokenKind::Assignment, TokenKind::Equals),
            '!' => MK_COMPOSABLE!(self, TokenKind::Not, TokenKind::NotEquals),
            '+' => MK_COMPOSABLE!(self, TokenKind::Plus, TokenKind::PlusEquals),
            '-' => MK_COMPOSABLE!(self, TokenKind::Dash, TokenKind::MinusEquals),
            '*' => MK_COMPOSABLE!(self, TokenKind::Star, TokenKind::StarEquals),
            '/' => MK_COMPOSABLE!(self, TokenKind::Slash, TokenKind::SlashEquals),
            '<' => MK_COMPOSABLE!(self, TokenKind::Less, TokenKind::LessEquals),
            '>' => MK_COMPOSABLE!(self, TokenKind::Greater, TokenKind::GreaterEquals),
            '(' => self.single(TokenKind::OpenParen),
            ')' => self.single(TokenKind::CloseParen),
            '{' => self.single(TokenKind::OpenCurly),
            '}' => self.single(TokenKind::CloseCurly),
            ',' => self.single(TokenKind::Comma),
            ';' => self.single(TokenKind::Semicolon),
            '"' => self.string(),
            c if c.is_ascii_alphabetic() || c == '_' => self.symbol(),
            c if c.is_ascii_digit() => self.number(),
            _ => self.single(TokenKind::Illegal),
        };

        tracing::trace!(kind = %token.kind, line = token.line(), column = token.column(), "scanned token");
        token
    }

    fn single(&mut self, kind: TokenKind) -> Token {
        let start = self.position();
        let ch = self.bump();
        MK_TOKEN!(kind, ch.to_string(), start)
    }

    fn symbol(&mut self) -> Token {
        let start = self.position();
        let value = match SYMBOL_PATTERN.find(self.remainder()) {
            Some(matched) => matched.as_str().to_string(),
            None => return self.single(TokenKind::Illegal),
        };
        self.advance_n(value.len());

        MK_TOKEN!(TokenKind::from_word(&value), value, start)
    }

    fn number(&mut self) -> Token {
        let start = self.position();
        let value = match NUMBER_PATTERN.find(self.remainder()) {
            Some(matched) => matched.as_str().to_string(),
            None => return self.single(TokenKind::Illegal),
        };
        self.advance_n(value.len());

        MK_TOKEN!(TokenKind::Int, value, start)
    }

    fn string(&mut self) -> Token {
        let start = self.position();
        let opening = self.pos;
        self.bump();

        let mut result = String::new();

        loop {
            match self.at() {
                None => {
                    // Unterminated: hand the raw text over as an illegal token
                    let raw = self.source[opening..].to_string();
                    return MK_TOKEN!(TokenKind::Illegal, raw, start);
                }
                Some('"') => {
                    self.bump();
                    break;
                }
                Some('\\') => {
                    self.bump();
                    match self.at() {
                        Some('n') => result.push('\n'),
                        Some('t') => result.push('\t'),
                        Some('r') => result.push('\r'),
                        Some('\\') => result.push('\\'),
                        Some('"') => result.push('"'),
                        Some('0') => result.push('\0'),
                        Some(other) => {
                            result.push('\\'); // Keep the backslash
                            result.push(other);
                        }
                        None => {
                            let raw = self.source[opening..].to_string();
                            return MK_TOKEN!(TokenKind::Illegal, raw, start);
                        }
                    }
                    self.bump();
                }
                Some(_) => result.push(self.bump()),
            }
        }

        MK_TOKEN!(TokenKind::String, result, start)
    }
}

/// Scans the whole source, up to and including the `EOF` token.
pub fn tokenize(source: String, file: Option<String>) -> Vec<Token> {
    let mut lex = Lexer::new(source, file);
    let mut tokens = vec![];

    loop {
        let token = lex.next_token();
        let done = token.kind == TokenKind::EOF;
        tokens.push(token);

        if done {
            return tokens;
        }
    }
}
