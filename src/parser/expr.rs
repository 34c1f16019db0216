use crate::{
    ast::{
        ast::Expr,
        expressions::{
            BooleanLiteral, CallExpr, Identifier, InfixExpr, IntegerLiteral, PrefixExpr,
            StringLiteral,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{lookups::BindingPower, parser::Parser};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    parser.enter_expr()?;
    let expr = parse_nested_expr(parser, bp);
    parser.exit_expr();

    expr
}

fn parse_nested_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    // First parse NUD
    let token = parser.current_token();
    if token.kind == TokenKind::Illegal {
        return Err(Error::new(
            ErrorImpl::IllegalToken { literal: token.literal.clone() },
            token.position.clone(),
        ));
    }

    let Some(nud) = parser.get_nud_lookup().get(&token.kind).copied() else {
        return Err(Error::new(
            ErrorImpl::NoPrefixParser { found: token.kind },
            token.position.clone(),
        ));
    };

    let mut left = nud(parser)?;

    // While the next operator binds tighter than the caller, fold it into lhs
    while parser.peek_token_kind() != TokenKind::Semicolon && parser.peek_binding_power() > bp {
        let Some(led) = parser.get_led_lookup().get(&parser.peek_token_kind()).copied() else {
            return Ok(left);
        };

        parser.advance();
        let operator_bp = parser.current_binding_power();
        left = led(parser, left, operator_bp)?;
    }

    Ok(left)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.current_token().clone();

    match token.kind {
        TokenKind::Int => match token.literal.parse::<i64>() {
            Ok(value) => Ok(Expr::Integer(IntegerLiteral { token, value })),
            Err(_) => Err(Error::new(
                ErrorImpl::NumberParseError { literal: token.literal.clone() },
                token.position,
            )),
        },
        TokenKind::Identifier => Ok(Expr::Identifier(Identifier {
            name: token.literal.clone(),
            token,
        })),
        TokenKind::String => Ok(Expr::String(StringLiteral {
            value: token.literal.clone(),
            token,
        })),
        TokenKind::True | TokenKind::False => Ok(Expr::Boolean(BooleanLiteral {
            value: token.kind == TokenKind::True,
            token,
        })),
        _ => Err(Error::new(
            ErrorImpl::NoPrefixParser { found: token.kind },
            token.position,
        )),
    }
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let operator_token = parser.current_token().clone();
    parser.advance();

    let operand = parse_expr(parser, BindingPower::Prefix)?;

    Ok(Expr::Prefix(PrefixExpr {
        operator: operator_token.literal.clone(),
        token: operator_token,
        operand: Box::new(operand),
    }))
}

pub fn parse_infix_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    let operator_token = parser.current_token().clone();
    parser.advance();

    let right = parse_expr(parser, bp)?;

    Ok(Expr::Infix(InfixExpr {
        operator: operator_token.literal.clone(),
        token: operator_token,
        left: Box::new(left),
        right: Box::new(right),
    }))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.advance();
    let expr = parse_expr(parser, BindingPower::Lowest)?;
    parser.expect_peek(TokenKind::CloseParen)?;

    Ok(expr)
}

pub fn parse_call_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    let open_paren = parser.current_token().clone();
    let mut arguments = vec![];

    if parser.peek_token_kind() == TokenKind::CloseParen {
        parser.advance();
    } else {
        parser.advance();
        arguments.push(parse_expr(parser, BindingPower::Lowest)?);

        while parser.peek_token_kind() == TokenKind::Comma {
            parser.advance();
            parser.advance();
            arguments.push(parse_expr(parser, BindingPower::Lowest)?);
        }

        parser.expect_peek(TokenKind::CloseParen)?;
    }

    Ok(Expr::Call(CallExpr {
        token: open_paren,
        function: Box::new(left),
        arguments,
    }))
}
