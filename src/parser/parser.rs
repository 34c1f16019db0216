//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and the program loop.
//! The parser pulls tokens from the lexer through a two-token window
//! (current + peek) and uses a Pratt parser with NUD/LED handlers for
//! expressions and a statement lookup for keyword-led statements.
//!
//! It maintains lookup tables for:
//! - Statement handlers
//! - NUD (null denotation) handlers for prefix expressions
//! - LED (left denotation) handlers for infix expressions
//! - Binding powers for operator precedence

use std::{collections::HashMap, mem, rc::Rc};

use crate::{
    ast::ast::Program,
    errors::{
        diagnostics::Diagnostics,
        errors::{Error, ErrorImpl},
    },
    lexer::{
        lexer::Lexer,
        tokens::{Token, TokenKind},
    },
};

use super::{
    lookups::{
        create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler, NUDLookup,
        StmtHandler, StmtLookup,
    },
    stmt::parse_stmt,
};

/// How many expressions may be open at once before the parser gives up on
/// the statement instead of recursing further.
pub const MAX_EXPR_DEPTH: usize = 256;

/// The main parser structure that maintains parsing state.
///
/// The parser owns its lexer and only ever looks one token ahead. Errors
/// are collected rather than returned, so one pass reports every malformed
/// statement it meets.
pub struct Parser {
    /// Source of tokens, pulled one at a time
    lexer: Lexer,
    /// The token being parsed
    current_token: Token,
    /// One token of lookahead
    peek_token: Token,
    /// The name of the source being parsed
    file: Rc<String>,
    /// Recoverable errors met so far
    diagnostics: Diagnostics,
    /// Expressions currently being parsed, innermost included
    expr_depth: usize,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for null denotation (prefix) expression handlers
    nud_lookup: NUDLookup,
    /// Lookup table for left denotation (infix) expression handlers
    led_lookup: LEDLookup,
    /// Lookup table for infix binding powers (precedence)
    binding_power_lookup: BPLookup,
}

impl Parser {
    /// Creates a parser over `lexer` with every handler registered and the
    /// token window primed.
    pub fn new(mut lexer: Lexer) -> Self {
        let current_token = lexer.next_token();
        let peek_token = lexer.next_token();

        let mut parser = Parser {
            file: lexer.file(),
            lexer,
            current_token,
            peek_token,
            diagnostics: Diagnostics::new(),
            expr_depth: 0,
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
        };
        create_token_lookups(&mut parser);

        parser
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.current_token
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token.kind
    }

    pub fn peek_token(&self) -> &Token {
        &self.peek_token
    }

    pub fn peek_token_kind(&self) -> TokenKind {
        self.peek_token.kind
    }

    /// Shifts the window by one token. At the end of input the lexer keeps
    /// producing `EOF`, so this is always safe to call.
    pub fn advance(&mut self) {
        let next = self.lexer.next_token();
        self.current_token = mem::replace(&mut self.peek_token, next);
    }

    /// Advances when the peek token has the expected kind, otherwise returns
    /// a mismatch error positioned at the peek token.
    pub fn expect_peek(&mut self, expected_kind: TokenKind) -> Result<(), Error> {
        if self.peek_token.kind == expected_kind {
            self.advance();
            Ok(())
        } else {
            Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    found: self.peek_token.kind,
                    expected: expected_kind,
                },
                self.peek_token.position.clone(),
            ))
        }
    }

    /// Opens one level of expression nesting, failing at the current token
    /// once [`MAX_EXPR_DEPTH`] levels are open. Every successful call must be
    /// paired with [`Parser::exit_expr`].
    pub fn enter_expr(&mut self) -> Result<(), Error> {
        if self.expr_depth >= MAX_EXPR_DEPTH {
            return Err(Error::new(
                ErrorImpl::NestingTooDeep { limit: MAX_EXPR_DEPTH },
                self.current_token.position.clone(),
            ));
        }

        self.expr_depth += 1;
        Ok(())
    }

    pub fn exit_expr(&mut self) {
        self.expr_depth = self.expr_depth.saturating_sub(1);
    }

    /// Consumes the peek token if it is a semicolon.
    pub fn skip_optional_semicolon(&mut self) {
        if self.peek_token.kind == TokenKind::Semicolon {
            self.advance();
        }
    }

    /// Binding power of the peek token, `Lowest` when it is not an infix
    /// operator.
    pub fn peek_binding_power(&self) -> BindingPower {
        self.binding_power_lookup
            .get(&self.peek_token.kind)
            .copied()
            .unwrap_or(BindingPower::Lowest)
    }

    /// Binding power of the current token, `Lowest` when it is not an infix
    /// operator.
    pub fn current_binding_power(&self) -> BindingPower {
        self.binding_power_lookup
            .get(&self.current_token.kind)
            .copied()
            .unwrap_or(BindingPower::Lowest)
    }

    /// Returns a reference to the statement lookup table.
    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Returns a reference to the NUD (null denotation) lookup table.
    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    /// Returns a reference to the LED (left denotation) lookup table.
    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    /// Returns a reference to the binding power lookup table.
    pub fn get_bp_lookup(&self) -> &BPLookup {
        &self.binding_power_lookup
    }

    /// Registers a left denotation (infix) handler for a token.
    ///
    /// # Arguments
    ///
    /// * `kind` - The token kind to register
    /// * `binding_power` - The precedence/binding power for this operator
    /// * `led_fn` - The handler function for this infix operator
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token.
    ///
    /// A kind may have both a NUD and a LED (`-`, `(`); only the LED carries
    /// a binding power.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    /// The name of the source being parsed.
    pub fn file(&self) -> Rc<String> {
        Rc::clone(&self.file)
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Rendered diagnostics; empty when the parse succeeded.
    pub fn errors(&self) -> Vec<String> {
        self.diagnostics.messages()
    }

    /// Skips the rest of a failed statement, stopping on its `;` or at the
    /// end of input.
    fn synchronize(&mut self) {
        while !matches!(
            self.current_token.kind,
            TokenKind::Semicolon | TokenKind::EOF
        ) {
            self.advance();
        }
    }

    /// Parses statements until `EOF`.
    ///
    /// Always returns a program. A statement that fails to parse is left out,
    /// its error is recorded and parsing resumes after its `;`.
    #[tracing::instrument(level = "debug", skip_all, fields(file = %self.file))]
    pub fn parse_program(&mut self) -> Program {
        tracing::debug!("Parsing program");
        let mut program = Program::default();

        while self.current_token.kind != TokenKind::EOF {
            if self.current_token.kind != TokenKind::Semicolon {
                match parse_stmt(self) {
                    Ok(stmt) => program.statements.push(stmt),
                    Err(error) => {
                        tracing::trace!(line = error.get_position().line, "abandoning statement");
                        self.diagnostics.report(error);
                        self.synchronize();
                    }
                }
            }

            self.advance();
        }

        tracing::debug!(
            statements = program.len(),
            diagnostics = self.diagnostics.len(),
            "Parsed program"
        );

        program
    }
}

/// Parses a source string into an Abstract Syntax Tree.
///
/// This is the main entry point for parsing. It creates a lexer and a parser
/// and parses all statements until EOF.
///
/// # Arguments
///
/// * `source` - The source text
/// * `file` - Optional source name used in diagnostics, `repl` by default
///
/// # Returns
///
/// A tuple containing:
/// - The Parser instance, holding the diagnostics of the parse
/// - The root Program, possibly missing the statements that failed
pub fn parse(source: String, file: Option<String>) -> (Parser, Program) {
    let mut parser = Parser::new(Lexer::new(source, file));
    let program = parser.parse_program();

    (parser, program)
}
