//! Lexical analysis module for the front end.
//!
//! This module contains the lexer (scanner) that converts source code
//! into tokens on demand for the parser. It handles:
//!
//! - Recognition of keywords, identifiers, integer and string literals
//! - Operators with a composable `=` form, resolved by one-character lookahead
//! - Line and column tracking for error reporting
//! - Whitespace handling

pub mod lexer;
pub mod tokens;
