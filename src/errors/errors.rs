use std::fmt::Display;

use thiserror::Error;

use crate::{lexer::tokens::TokenKind, Position};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::NoPrefixParser { .. } => "NoPrefixParser",
            ErrorImpl::IllegalToken { .. } => "IllegalToken",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::NestingTooDeep { .. } => "NestingTooDeep",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnexpectedToken { expected, .. } => {
                ErrorTip::Suggestion(format!("Expected `{}` here", expected))
            }
            ErrorImpl::NoPrefixParser { found } => ErrorTip::Suggestion(format!(
                "An expression cannot start with `{}`, did you miss an operand?",
                found
            )),
            ErrorImpl::IllegalToken { literal } if literal.starts_with('"') => {
                ErrorTip::Suggestion(String::from("Unterminated string, add a closing `\"`"))
            }
            ErrorImpl::IllegalToken { .. } => ErrorTip::None,
            ErrorImpl::NumberParseError { literal } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                literal
            )),
            ErrorImpl::NestingTooDeep { limit } => ErrorTip::Suggestion(format!(
                "Expressions can nest at most {} levels, split this one with `def`",
                limit
            )),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Position { line, column, file } = &self.position;

        match &self.internal_error {
            ErrorImpl::UnexpectedToken { found, expected } => write!(
                f,
                "{}: unexpected token {} at: line {} column {}. expected {} instead.",
                file, found, line, column, expected
            ),
            ErrorImpl::NoPrefixParser { found } => write!(
                f,
                "{}: unexpected token {} at: line {} column {}. expected an expression instead.",
                file, found, line, column
            ),
            other => write!(f, "{}: {} at: line {} column {}.", file, other, line, column),
        }
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorImpl {
    #[error("unexpected token {found}, expected {expected}")]
    UnexpectedToken { found: TokenKind, expected: TokenKind },
    #[error("unexpected token {found}, expected an expression")]
    NoPrefixParser { found: TokenKind },
    #[error("illegal token {literal}")]
    IllegalToken { literal: String },
    #[error("invalid integer literal {literal}")]
    NumberParseError { literal: String },
    #[error("expression nested too deeply")]
    NestingTooDeep { limit: usize },
}
