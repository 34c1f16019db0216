//! Unit tests for the parser module.
//!
//! This module contains tests for parsing the language constructs including:
//! - `def` and `return` statements
//! - Expression statements and literals
//! - Prefix and infix precedence, grouping and calls
//! - Error reporting and recovery

use indoc::indoc;
use pretty_assertions::assert_eq;

use crate::{
    ast::{
        ast::{Expr, Node, Program, Stmt},
        expressions::IntegerLiteral,
    },
    errors::errors::ErrorImpl,
    lexer::{lexer::Lexer, tokens::TokenKind},
};

use super::{
    lookups::BindingPower,
    parser::{parse, Parser, MAX_EXPR_DEPTH},
};

fn parse_source(source: &str) -> (Parser, Program) {
    parse(source.to_string(), Some("test.trt".to_string()))
}

fn parse_clean(source: &str) -> Program {
    let (parser, program) = parse_source(source);
    assert!(
        parser.errors().is_empty(),
        "unexpected diagnostics: {:?}",
        parser.errors()
    );
    program
}

fn single_expression(source: &str) -> Expr {
    let program = parse_clean(source);
    assert_eq!(program.len(), 1, "expected one statement in {source:?}");

    match &program.statements[0] {
        Stmt::Expression(stmt) => stmt.expression.clone(),
        other => panic!("expected an expression statement, got {other:?}"),
    }
}

fn assert_integer(expr: &Expr, expected: i64) {
    match expr {
        Expr::Integer(IntegerLiteral { value, token }) => {
            assert_eq!(*value, expected);
            assert_eq!(token.literal, expected.to_string());
        }
        other => panic!("expected an integer literal, got {other:?}"),
    }
}

#[test]
fn test_parse_def_statements() {
    let program = parse_clean(indoc! {"
        def x = 5;
        def y = 10;
        def z = 838383;
    "});

    assert_eq!(program.len(), 3);

    let expected = [("x", 5), ("y", 10), ("z", 838383)];
    for (stmt, (name, value)) in program.iter().zip(expected) {
        assert_eq!(stmt.token_literal(), "def");

        let Stmt::Def(def) = stmt else {
            panic!("expected a def statement, got {stmt:?}");
        };
        assert_eq!(def.name.name, name);
        assert_eq!(def.name.token_literal(), name);
        assert_integer(&def.value, value);
    }
}

#[test]
fn test_parse_def_with_expression_value() {
    let program = parse_clean("def total = 1 + 2 * 3;");

    assert_eq!(program.to_string(), "def total = (1 + (2 * 3));");
}

#[test]
fn test_parse_return_statements() {
    let program = parse_clean(indoc! {"
        return 5;
        return 10;
        return 993322;
    "});

    assert_eq!(program.len(), 3);

    for stmt in program.iter() {
        assert_eq!(stmt.token_literal(), "return");
        assert!(matches!(stmt, Stmt::Return(ret) if ret.value.is_some()));
    }
}

#[test]
fn test_parse_bare_return() {
    let program = parse_clean("return; return");

    assert_eq!(program.len(), 2);
    for stmt in program.iter() {
        assert!(matches!(stmt, Stmt::Return(ret) if ret.value.is_none()));
    }
    assert_eq!(program.to_string(), "return;return;");
}

#[test]
fn test_parse_identifier() {
    let Expr::Identifier(identifier) = single_expression("foo;") else {
        panic!("expected an identifier");
    };

    assert_eq!(identifier.name, "foo");
    assert_eq!(identifier.token_literal(), "foo");
}

#[test]
fn test_parse_integer_literal() {
    assert_integer(&single_expression("5;"), 5);
}

#[test]
fn test_parse_boolean_and_string_literals() {
    assert!(matches!(single_expression("true;"), Expr::Boolean(b) if b.value));
    assert!(matches!(single_expression("false"), Expr::Boolean(b) if !b.value));

    let Expr::String(string) = single_expression(r#""hello world";"#) else {
        panic!("expected a string literal");
    };
    assert_eq!(string.value, "hello world");
}

#[test]
fn test_parse_prefix_expressions() {
    for (source, operator, value) in [("-20;", "-", 20), ("!34;", "!", 34)] {
        let program = parse_clean(source);
        assert_eq!(program.len(), 1);
        assert_eq!(program.statements[0].token_literal(), operator);

        let Stmt::Expression(stmt) = &program.statements[0] else {
            panic!("expected an expression statement");
        };
        let Expr::Prefix(prefix) = &stmt.expression else {
            panic!("expected a prefix expression, got {:?}", stmt.expression);
        };

        assert_eq!(prefix.operator, operator);
        assert_integer(&prefix.operand, value);
    }
}

#[test]
fn test_parse_infix_expressions() {
    let cases = [
        ("5 + 5;", "+"),
        ("5 - 5;", "-"),
        ("5 * 5;", "*"),
        ("5 / 5;", "/"),
        ("5 > 5;", ">"),
        ("5 < 5;", "<"),
        ("5 >= 5;", ">="),
        ("5 <= 5;", "<="),
        ("5 == 5;", "=="),
        ("5 != 5;", "!="),
    ];

    for (source, operator) in cases {
        let Expr::Infix(infix) = single_expression(source) else {
            panic!("expected an infix expression for {source:?}");
        };

        assert_eq!(infix.operator, operator);
        assert_eq!(infix.token.literal, operator);
        assert_integer(&infix.left, 5);
        assert_integer(&infix.right, 5);
    }
}

#[test]
fn test_operator_precedence() {
    let cases = [
        ("-a * b", "((-a) * b)"),
        ("!-a", "(!(-a))"),
        ("a + b + c", "((a + b) + c)"),
        ("a + b - c", "((a + b) - c)"),
        ("a - b - c", "((a - b) - c)"),
        ("a + b * c", "(a + (b * c))"),
        ("a * b * c", "((a * b) * c)"),
        ("a * b / c", "((a * b) / c)"),
        ("a + b / c", "(a + (b / c))"),
        ("a + b * c + d / e - f", "(((a + (b * c)) + (d / e)) - f)"),
        ("3 + 4; -5 * 5", "(3 + 4)((-5) * 5)"),
        ("5 > 4 == 3 < 4", "((5 > 4) == (3 < 4))"),
        ("5 <= 4 != 3 >= 4", "((5 <= 4) != (3 >= 4))"),
        (
            "3 + 4 * 5 == 3 * 1 + 4 * 5",
            "((3 + (4 * 5)) == ((3 * 1) + (4 * 5)))",
        ),
        ("true != false", "(true != false)"),
        ("1 + (2 + 3) + 4", "((1 + (2 + 3)) + 4)"),
        ("(5 + 5) * 2", "((5 + 5) * 2)"),
        ("-(5 + 5)", "(-(5 + 5))"),
        ("a + add(b * c) + d", "((a + add((b * c))) + d)"),
        (
            "add(a, b, 1, 2 * 3, 4 + 5, add(6, 7 * 8))",
            "add(a, b, 1, (2 * 3), (4 + 5), add(6, (7 * 8)))",
        ),
        ("f()", "f()"),
    ];

    for (source, expected) in cases {
        assert_eq!(parse_clean(source).to_string(), expected, "source: {source:?}");
    }
}

#[test]
fn test_parse_call_expression() {
    let Expr::Call(call) = single_expression("sum(five, 10 - 1);") else {
        panic!("expected a call expression");
    };

    assert_eq!(call.token_literal(), "(");
    assert!(matches!(call.function.as_ref(), Expr::Identifier(f) if f.name == "sum"));
    assert_eq!(call.arguments.len(), 2);
    assert_eq!(call.arguments[1].to_string(), "(10 - 1)");
}

#[test]
fn test_semicolons_are_optional() {
    let program = parse_clean("x\ny;;\n;z");

    let names = program.iter().map(ToString::to_string).collect::<Vec<_>>();
    assert_eq!(names, vec!["x", "y", "z"]);
}

#[test]
fn test_empty_program() {
    let (parser, program) = parse_source("");

    assert!(program.is_empty());
    assert_eq!(program.token_literal(), "");
    assert!(parser.errors().is_empty());
}

#[test]
fn test_errors_accumulate_without_halting() {
    let (parser, program) = parse_source(indoc! {"
        def = 5;
        def x 5;
        def y = 1;
    "});

    assert_eq!(program.len(), 1);
    assert_eq!(program.to_string(), "def y = 1;");
    assert_eq!(
        parser.errors(),
        vec![
            "test.trt: unexpected token = at: line 1 column 5. expected IDENT instead.",
            "test.trt: unexpected token INT at: line 2 column 7. expected = instead.",
        ]
    );
}

#[test]
fn test_missing_expression() {
    let (parser, program) = parse_source("def x = ;\n+ 5;\nx;");

    assert_eq!(program.to_string(), "x");
    assert_eq!(
        parser.errors(),
        vec![
            "test.trt: unexpected token ; at: line 1 column 9. expected an expression instead.",
            "test.trt: unexpected token + at: line 2 column 1. expected an expression instead.",
        ]
    );
}

#[test]
fn test_illegal_tokens_are_reported() {
    let (parser, program) = parse_source("def x = @;\n5 #;\nfoo;");

    assert_eq!(program.to_string(), "5foo");
    assert_eq!(
        parser.errors(),
        vec![
            "test.trt: illegal token @ at: line 1 column 9.",
            "test.trt: illegal token # at: line 2 column 3.",
        ]
    );
}

#[test]
fn test_unterminated_string_is_reported() {
    let (parser, program) = parse_source("def s = \"abc");

    assert!(program.is_empty());
    assert_eq!(parser.diagnostics().len(), 1);
    assert!(matches!(
        parser.diagnostics().iter().next().map(|error| error.get_kind()),
        Some(ErrorImpl::IllegalToken { literal }) if literal == "\"abc"
    ));
}

#[test]
fn test_unexpected_peek_reports_peek_position() {
    let (parser, _) = parse_source("(1 + 2;");

    let errors = parser.diagnostics().iter().collect::<Vec<_>>();
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].get_kind(),
        &ErrorImpl::UnexpectedToken {
            found: TokenKind::Semicolon,
            expected: TokenKind::CloseParen,
        }
    );
    assert_eq!(errors[0].get_position().line, 1);
    assert_eq!(errors[0].get_position().column, 7);
}

#[test]
fn test_integer_overflow() {
    let (parser, program) = parse_source("99999999999999999999;");

    assert!(program.is_empty());
    assert_eq!(
        parser.errors(),
        vec!["test.trt: invalid integer literal 99999999999999999999 at: line 1 column 1."]
    );
}

#[test]
fn test_compound_assignment_is_not_an_expression() {
    let (parser, program) = parse_source("x += 1; y;");

    assert_eq!(program.to_string(), "xy");
    assert_eq!(
        parser.errors(),
        vec!["test.trt: unexpected token += at: line 1 column 3. expected an expression instead."]
    );
}

#[test]
fn test_unsupported_keyword_recovers_at_semicolon() {
    let (parser, program) = parse_source("if (x) { y }; z;");

    assert_eq!(parser.errors().len(), 1);
    assert!(parser.errors()[0].contains("unexpected token IF at: line 1 column 1."));
    assert_eq!(program.to_string(), "z");
}

#[test]
fn test_parser_window() {
    let mut parser = Parser::new(Lexer::new("a b".to_string(), None));

    assert_eq!(parser.current_token().literal, "a");
    assert_eq!(parser.peek_token().literal, "b");

    parser.advance();
    assert_eq!(parser.current_token_kind(), TokenKind::Identifier);
    assert_eq!(parser.peek_token_kind(), TokenKind::EOF);

    for _ in 0..3 {
        parser.advance();
        assert_eq!(parser.current_token_kind(), TokenKind::EOF);
        assert_eq!(parser.peek_token_kind(), TokenKind::EOF);
    }
    assert_eq!(parser.file().as_str(), "repl");
}

#[test]
fn test_lookup_tables() {
    let parser = Parser::new(Lexer::new(String::new(), None));

    assert_eq!(parser.get_bp_lookup().get(&TokenKind::Star), Some(&BindingPower::Product));
    assert_eq!(parser.get_bp_lookup().get(&TokenKind::OpenParen), Some(&BindingPower::Call));
    assert_eq!(parser.get_bp_lookup().get(&TokenKind::Not), None);
    assert!(parser.get_nud_lookup().contains_key(&TokenKind::Dash));
    assert!(parser.get_led_lookup().contains_key(&TokenKind::Dash));
    assert!(parser.get_stmt_lookup().contains_key(&TokenKind::Def));
    assert!(BindingPower::Lowest < BindingPower::Equals);
    assert!(BindingPower::Prefix < BindingPower::Call);
}

#[test]
fn test_deep_nesting_is_reported() {
    let source = format!("{}1{};\nx;", "(".repeat(10_000), ")".repeat(10_000));
    let (parser, program) = parse_source(&source);

    assert_eq!(program.to_string(), "x");
    assert_eq!(parser.diagnostics().len(), 1);

    let error = parser.diagnostics().iter().next().expect("one diagnostic");
    assert_eq!(
        error.get_kind(),
        &ErrorImpl::NestingTooDeep { limit: MAX_EXPR_DEPTH }
    );
    assert_eq!(error.get_position().column, MAX_EXPR_DEPTH as u32 + 1);
    assert_eq!(
        error.to_string(),
        "test.trt: expression nested too deeply at: line 1 column 257."
    );
}

#[test]
fn test_deep_prefix_chain_is_reported() {
    let source = format!("{}1;", "-".repeat(200_000));
    let (parser, program) = parse_source(&source);

    assert!(program.is_empty());
    assert_eq!(parser.errors().len(), 1);
    assert!(parser.errors()[0].contains("expression nested too deeply"));
}

#[test]
fn test_nesting_up_to_the_limit_parses() {
    let depth = MAX_EXPR_DEPTH - 1;
    let source = format!("{}1{};", "(".repeat(depth), ")".repeat(depth));

    let program = parse_clean(&source);
    assert_eq!(program.to_string(), "1");

    // The depth is released after each statement
    let repeated = parse_clean(&format!("{source}{source}{source}"));
    assert_eq!(repeated.len(), 3);
}
