//! Unit tests for the parser module.
//!
//! This module contains tests for parsing the language constructs including:
//! - Let and return statements
//! - Operator precedence and grouping
//! - If expressions, function literals and calls
//! - Error collection and recovery

use crate::{
    ast::ast::{Expr, Program, Stmt},
    errors::errors::ParseError,
    lexer::{lexer::Lexer, tokens::TokenKind},
};

use super::parser::{parse, Parser};

fn parse_ok(source: &str) -> Program {
    let (program, errors) = parse(source);
    assert!(errors.is_empty(), "unexpected errors for {:?}: {:?}", source, errors);
    program
}

fn single_expr(source: &str) -> Expr {
    let program = parse_ok(source);
    assert_eq!(program.len(), 1, "expected one statement in {:?}", source);

    match &program.statements[0] {
        Stmt::Expression(stmt) => stmt.expression.clone().expect("expression missing"),
        other => panic!("expected expression statement, got {:?}", other),
    }
}

#[test]
fn test_parse_let_statements() {
    let program = parse_ok("let x = 5;\nlet y = true;\nlet foobar = y;");

    let expected = [("x", "5"), ("y", "true"), ("foobar", "y")];
    assert_eq!(program.len(), expected.len());

    for (stmt, (name, value)) in program.iter().zip(expected.iter()) {
        let Stmt::Let(stmt) = stmt else {
            panic!("expected let statement, got {:?}", stmt);
        };
        assert_eq!(stmt.name.value, *name);
        assert_eq!(stmt.value.as_ref().map(|v| v.to_string()).as_deref(), Some(*value));
    }
}

#[test]
fn test_let_statement_renders_back() {
    let program = parse_ok("let myVar = anotherVar;");
    assert_eq!(program.to_string(), "let myVar = anotherVar;");
}

#[test]
fn test_parse_return_statements() {
    let program = parse_ok("return 5; return x + y;");

    assert_eq!(program.len(), 2);
    assert!(matches!(program.statements[0], Stmt::Return(_)));
    assert_eq!(program.to_string(), "return 5;return (x + y);");
}

#[test]
fn test_operator_precedence() {
    let cases = [
        ("-a * b", "((-a) * b)"),
        ("!-a", "(!(-a))"),
        ("a + b + c", "((a + b) + c)"),
        ("a + b - c", "((a + b) - c)"),
        ("a * b * c", "((a * b) * c)"),
        ("a * b / c", "((a * b) / c)"),
        ("a + b * c", "(a + (b * c))"),
        ("a + b / c", "(a + (b / c))"),
        ("a % b * c", "((a % b) * c)"),
        ("a * -b", "(a * (-b))"),
        ("a + b * c + d / e - f", "(((a + (b * c)) + (d / e)) - f)"),
        ("3 + 4; -5 * 5", "(3 + 4)((-5) * 5)"),
        ("5 > 4 == 3 < 4", "((5 > 4) == (3 < 4))"),
        ("5 < 4 != 3 > 4", "((5 < 4) != (3 > 4))"),
        (
            "3 + 4 * 5 == 3 * 1 + 4 * 5",
            "((3 + (4 * 5)) == ((3 * 1) + (4 * 5)))",
        ),
        ("3 > 5 == false", "((3 > 5) == false)"),
        ("true != false", "(true != false)"),
    ];

    for (source, expected) in cases {
        assert_eq!(parse_ok(source).to_string(), expected, "source: {}", source);
    }
}

#[test]
fn test_grouped_expressions() {
    let cases = [
        ("(a + b) * c", "((a + b) * c)"),
        ("1 + (2 + 3) + 4", "((1 + (2 + 3)) + 4)"),
        ("(5 + 5) * 2", "((5 + 5) * 2)"),
        ("2 / (5 + 5)", "(2 / (5 + 5))"),
        ("-(5 + 5)", "(-(5 + 5))"),
        ("!(true == true)", "(!(true == true))"),
    ];

    for (source, expected) in cases {
        assert_eq!(parse_ok(source).to_string(), expected, "source: {}", source);
    }
}

#[test]
fn test_call_precedence() {
    let cases = [
        ("a + add(b * c) + d", "((a + add{(b * c)}) + d)"),
        (
            "add(a, b, 1, 2 * 3, 4 + 5, add(6, 7 * 8))",
            "add{a, b, 1, (2 * 3), (4 + 5), add{6, (7 * 8)}}",
        ),
        ("add(a + b + c * d / f + g)", "add{(((a + b) + ((c * d) / f)) + g)}"),
        ("f()", "f{}"),
    ];

    for (source, expected) in cases {
        assert_eq!(parse_ok(source).to_string(), expected, "source: {}", source);
    }
}

#[test]
fn test_parse_literals() {
    assert!(matches!(single_expr("foobar;"), Expr::Identifier(ref i) if i.value == "foobar"));
    assert!(matches!(single_expr("5;"), Expr::Integer(ref i) if i.value == 5));
    assert!(matches!(single_expr("true;"), Expr::Boolean(ref b) if b.value));
    assert!(matches!(single_expr("false;"), Expr::Boolean(ref b) if !b.value));
    assert!(
        matches!(single_expr("\"hello world\";"), Expr::String(ref s) if s.value == "hello world")
    );
}

#[test]
fn test_parse_prefix_expressions() {
    for (source, operator, operand) in [("!5;", "!", "5"), ("-15;", "-", "15"), ("!true;", "!", "true")] {
        let Expr::Prefix(prefix) = single_expr(source) else {
            panic!("expected prefix expression for {}", source);
        };
        assert_eq!(prefix.operator, operator);
        assert_eq!(prefix.right.to_string(), operand);
    }
}

#[test]
fn test_parse_infix_expressions() {
    for operator in ["+", "-", "*", "/", "%", ">", "<", "==", "!="] {
        let source = format!("5 {} 6;", operator);
        let Expr::Infix(infix) = single_expr(&source) else {
            panic!("expected infix expression for {}", source);
        };
        assert_eq!(infix.operator, operator);
        assert!(matches!(*infix.left, Expr::Integer(ref i) if i.value == 5));
        assert!(matches!(*infix.right, Expr::Integer(ref i) if i.value == 6));
    }
}

#[test]
fn test_parse_if_expression() {
    let Expr::If(expr) = single_expr("if (x < y) { x }") else {
        panic!("expected if expression");
    };

    assert_eq!(expr.condition.to_string(), "(x < y)");
    assert_eq!(expr.consequence.body.len(), 1);
    assert_eq!(expr.consequence.to_string(), "x");
    assert!(expr.alternative.is_none());
}

#[test]
fn test_parse_if_else_expression() {
    let Expr::If(expr) = single_expr("if (x < y) { x } else { y }") else {
        panic!("expected if expression");
    };

    assert_eq!(expr.condition.to_string(), "(x < y)");
    assert_eq!(expr.consequence.to_string(), "x");
    let alternative = expr.alternative.as_ref().expect("else branch missing");
    assert_eq!(alternative.body.len(), 1);
    assert_eq!(alternative.to_string(), "y");
    assert_eq!(expr.to_string(), "if(x < y) xelsey");
}

#[test]
fn test_empty_block_is_empty_not_missing() {
    let Expr::If(expr) = single_expr("if (x) {}") else {
        panic!("expected if expression");
    };

    assert!(expr.consequence.body.is_empty());
    assert!(expr.alternative.is_none());
}

#[test]
fn test_parse_function_literal() {
    let Expr::Function(function) = single_expr("fn(x, y) { x + y; }") else {
        panic!("expected function literal");
    };

    let names: Vec<&str> = function.parameters.iter().map(|p| p.value.as_str()).collect();
    assert_eq!(names, vec!["x", "y"]);
    assert_eq!(function.body.body.len(), 1);
    assert_eq!(function.to_string(), "fn(x, y) (x + y)");
}

#[test]
fn test_function_parameter_counts() {
    for (source, expected) in [
        ("fn() {};", vec![]),
        ("fn(x) {};", vec!["x"]),
        ("fn(x, y, z) {};", vec!["x", "y", "z"]),
    ] {
        let Expr::Function(function) = single_expr(source) else {
            panic!("expected function literal for {}", source);
        };
        let names: Vec<&str> = function.parameters.iter().map(|p| p.value.as_str()).collect();
        assert_eq!(names, expected);
    }
}

#[test]
fn test_function_parameters_must_be_identifiers() {
    let (_, errors) = parse("fn(1) {}");

    assert_eq!(
        errors[0],
        ParseError::UnexpectedToken {
            expected: TokenKind::Identifier,
            got: TokenKind::Int
        }
    );
}

#[test]
fn test_parse_call_expression() {
    let Expr::Call(call) = single_expr("add(1, 2 * 3, 4 + 5);") else {
        panic!("expected call expression");
    };

    assert!(matches!(*call.function, Expr::Identifier(ref i) if i.value == "add"));
    assert_eq!(call.arguments.len(), 3);
    assert_eq!(call.arguments[0].to_string(), "1");
    assert_eq!(call.arguments[1].to_string(), "(2 * 3)");
    assert_eq!(call.arguments[2].to_string(), "(4 + 5)");
    assert_eq!(call.to_string(), "add{1, (2 * 3), (4 + 5)}");
}

#[test]
fn test_call_on_function_literal() {
    assert_eq!(
        parse_ok("fn(x) { x; }(5)").to_string(),
        "fn(x) x{5}"
    );
}

#[test]
fn test_missing_assign_in_let() {
    let (program, errors) = parse("let x 5;");

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].to_string(), "expected next token to be =, got INT instead");
    assert!(program.iter().all(|stmt| !matches!(stmt, Stmt::Let(_))));
}

#[test]
fn test_parsing_continues_after_error() {
    let (program, errors) = parse("let x 5; let y = 10;");

    assert_eq!(errors.len(), 1);
    let Some(Stmt::Let(stmt)) = program.statements.last() else {
        panic!("expected trailing let statement");
    };
    assert_eq!(stmt.name.value, "y");
    assert_eq!(stmt.to_string(), "let y = 10;");
}

#[test]
fn test_missing_identifier_in_let() {
    let (_, errors) = parse("let = 10;");
    let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();

    assert_eq!(
        messages,
        vec![
            "expected next token to be IDENTIFIER, got = instead",
            "no prefix parse function for = found",
        ]
    );
}

#[test]
fn test_let_with_broken_value_keeps_statement() {
    let (program, errors) = parse("let x = ;");

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].to_string(), "no prefix parse function for ; found");
    let Stmt::Let(stmt) = &program.statements[0] else {
        panic!("expected let statement");
    };
    assert_eq!(stmt.name.value, "x");
    assert!(stmt.value.is_none());
}

#[test]
fn test_no_prefix_for_illegal_token() {
    let (program, errors) = parse("@");

    assert_eq!(
        errors,
        vec![ParseError::NoPrefixParseFn {
            kind: TokenKind::Illegal
        }]
    );
    assert_eq!(program.len(), 1);
    assert_eq!(program.to_string(), "");
}

#[test]
fn test_integer_overflow() {
    let (program, errors) = parse("9223372036854775808;");

    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].to_string(),
        "could not parse \"9223372036854775808\" as integer"
    );
    let Stmt::Expression(stmt) = &program.statements[0] else {
        panic!("expected expression statement");
    };
    assert!(stmt.expression.is_none());
}

#[test]
fn test_integer_max_fits() {
    assert!(matches!(
        single_expr("9223372036854775807"),
        Expr::Integer(ref i) if i.value == i64::MAX
    ));
}

#[test]
fn test_unclosed_group() {
    let (_, errors) = parse("(1 + 2");

    assert_eq!(
        errors,
        vec![ParseError::UnexpectedToken {
            expected: TokenKind::CloseParen,
            got: TokenKind::EOF
        }]
    );
}

#[test]
fn test_if_requires_parens() {
    let (_, errors) = parse("if x { y }");

    assert_eq!(errors[0].to_string(), "expected next token to be (, got IDENTIFIER instead");
}

#[test]
fn test_unclosed_block_terminates() {
    let (program, errors) = parse("if (x) { y");

    assert!(errors.is_empty());
    assert_eq!(program.len(), 1);
}

#[test]
fn test_empty_program() {
    let (program, errors) = parse("");

    assert!(program.is_empty());
    assert!(errors.is_empty());
}

#[test]
fn test_parser_pulls_from_lexer() {
    let mut parser = Parser::new(Lexer::new(b"let a = 1;\nlet b = a * 2;\n"));

    assert_eq!(parser.current_token_kind(), TokenKind::Let);
    assert_eq!(parser.peek_token_kind(), TokenKind::Identifier);

    let program = parser.parse_program();

    assert!(parser.errors().is_empty());
    assert_eq!(program.to_string(), "let a = 1;let b = (a * 2);");
}

#[test]
fn test_error_messages() {
    let mut parser = Parser::new(Lexer::new(b"let 5"));
    parser.parse_program();

    assert_eq!(
        parser.error_messages(),
        vec!["expected next token to be IDENTIFIER, got INT instead".to_string()]
    );
}

#[test]
fn test_bad_operand_in_infix_chain() {
    let (program, errors) = parse("let x = 99999999999999999999 + 1;");

    assert_eq!(
        errors,
        vec![ParseError::IntegerParse {
            literal: "99999999999999999999".to_string()
        }]
    );
    assert_eq!(program.len(), 1);
    let Stmt::Let(stmt) = &program.statements[0] else {
        panic!("expected let statement");
    };
    assert_eq!(stmt.name.value, "x");
    assert!(stmt.value.is_none());
}

#[test]
fn test_bad_operand_in_group() {
    let (program, errors) = parse("(99999999999999999999 + 1)");

    assert_eq!(errors.len(), 1);
    assert_eq!(program.len(), 1);
    assert_eq!(program.to_string(), "");
}

#[test]
fn test_bad_operand_in_call_arguments() {
    let (program, errors) = parse("add(99999999999999999999 + 1, 2)");

    assert_eq!(
        errors[..],
        [ParseError::IntegerParse {
            literal: "99999999999999999999".to_string()
        }]
    );
    assert_eq!(program.len(), 1);
    let Stmt::Expression(stmt) = &program.statements[0] else {
        panic!("expected expression statement");
    };
    assert!(stmt.expression.is_none());
}

#[test]
fn test_bad_prefix_operand_resumes_at_next_statement() {
    let (program, errors) = parse("let y = -@ * 3; let z = 1;");

    assert_eq!(errors.len(), 1);
    assert_eq!(program.len(), 2);
    assert_eq!(program.to_string(), "let y = ;let z = 1;");
}

#[test]
fn test_bad_right_operand_mid_chain() {
    let (program, errors) = parse("a + 99999999999999999999 * b - c; d");

    assert_eq!(errors.len(), 1);
    assert_eq!(program.len(), 2);
    assert_eq!(program.to_string(), "d");
}

#[test]
fn test_block_statements_in_order() {
    let Expr::Function(function) = single_expr("fn() { let a = 1; return a; a }") else {
        panic!("expected function literal");
    };

    let kinds: Vec<&str> = function
        .body
        .iter()
        .map(|stmt| match stmt {
            Stmt::Let(_) => "let",
            Stmt::Return(_) => "return",
            Stmt::Expression(_) => "expression",
            Stmt::Block(_) => "block",
        })
        .collect();
    assert_eq!(kinds, vec!["let", "return", "expression"]);
}
