use crate::{
    ast::{
        ast::Stmt,
        expressions::Identifier,
        statements::{DefStmt, ExpressionStmt, ReturnStmt},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
};

use super::parser::Parser;

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let token = parser.current_token();
    if token.kind == TokenKind::Illegal {
        return Err(Error::new(
            ErrorImpl::IllegalToken { literal: token.literal.clone() },
            token.position.clone(),
        ));
    }

    if let Some(handler) = parser.get_stmt_lookup().get(&token.kind).copied() {
        return handler(parser);
    }

    parse_expression_stmt(parser)
}

pub fn parse_expression_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let token = parser.current_token().clone();
    let expression = parse_expr(parser, BindingPower::Lowest)?;

    parser.skip_optional_semicolon();

    Ok(Stmt::Expression(ExpressionStmt { token, expression }))
}

pub fn parse_def_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start_token = parser.current_token().clone();

    parser.expect_peek(TokenKind::Identifier)?;
    let name_token = parser.current_token().clone();
    let name = Identifier {
        name: name_token.literal.clone(),
        token: name_token,
    };

    parser.expect_peek(TokenKind::Assignment)?;
    parser.advance();

    let value = parse_expr(parser, BindingPower::Lowest)?;
    parser.skip_optional_semicolon();

    Ok(Stmt::Def(DefStmt {
        token: start_token,
        name,
        value,
    }))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start_token = parser.current_token().clone();

    let value = if matches!(
        parser.peek_token_kind(),
        TokenKind::Semicolon | TokenKind::EOF
    ) {
        None
    } else {
        parser.advance();
        Some(parse_expr(parser, BindingPower::Lowest)?)
    };

    parser.skip_optional_semicolon();

    Ok(Stmt::Return(ReturnStmt {
        token: start_token,
        value,
    }))
}
