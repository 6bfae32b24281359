use crate::{
    ast::{
        ast::Expr,
        expressions::{
            BooleanExpr, CallExpr, FunctionExpr, IdentifierExpr, IfExpr, InfixExpr, IntegerExpr,
            PrefixExpr, StringExpr,
        },
    },
    errors::errors::ParseError,
    lexer::tokens::TokenKind,
};

use super::{lookups::BindingPower, parser::Parser, stmt::parse_block_stmt};

/// Pratt loop. Starts on the first token of the expression and stops on its
/// last token.
pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Option<Expr> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let Some(nud) = parser.get_nud_lookup().get(&token_kind).copied() else {
        parser.push_error(ParseError::NoPrefixParseFn { kind: token_kind });
        return None;
    };

    let mut left = nud(parser);

    // Fold infix operators while the lookahead binds tighter than `bp`.
    // A missing left side is carried through so the chain ends where the
    // expression does.
    while !parser.peek_is(TokenKind::Semicolon) && bp < parser.peek_binding_power() {
        let Some(led) = parser.get_led_lookup().get(&parser.peek_token_kind()).copied() else {
            return left;
        };

        parser.advance();
        left = led(parser, left);
    }

    left
}

pub fn parse_identifier_expr(parser: &mut Parser) -> Option<Expr> {
    Some(Expr::Identifier(current_identifier(parser)))
}

pub(super) fn current_identifier(parser: &Parser) -> IdentifierExpr {
    let token = parser.current_token().clone();
    IdentifierExpr {
        value: token.value.clone(),
        token,
    }
}

pub fn parse_integer_expr(parser: &mut Parser) -> Option<Expr> {
    let token = parser.current_token().clone();

    match token.value.parse::<i64>() {
        Ok(value) => Some(Expr::Integer(IntegerExpr { token, value })),
        Err(_) => {
            parser.push_error(ParseError::IntegerParse {
                literal: token.value,
            });
            None
        }
    }
}

pub fn parse_boolean_expr(parser: &mut Parser) -> Option<Expr> {
    Some(Expr::Boolean(BooleanExpr {
        value: parser.current_is(TokenKind::True),
        token: parser.current_token().clone(),
    }))
}

pub fn parse_string_expr(parser: &mut Parser) -> Option<Expr> {
    let token = parser.current_token().clone();
    Some(Expr::String(StringExpr {
        value: token.value.clone(),
        token,
    }))
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Option<Expr> {
    let operator_token = parser.current_token().clone();
    parser.advance();

    let right = parse_expr(parser, BindingPower::Unary)?;

    Some(Expr::Prefix(PrefixExpr {
        operator: operator_token.value.clone(),
        token: operator_token,
        right: Box::new(right),
    }))
}

pub fn parse_binary_expr(parser: &mut Parser, left: Option<Expr>) -> Option<Expr> {
    let operator_token = parser.current_token().clone();
    let bp = parser.current_binding_power();
    parser.advance();

    // Same power, not one less: equal operators chain to the left
    let right = parse_expr(parser, bp);

    Some(Expr::Infix(InfixExpr {
        operator: operator_token.value.clone(),
        token: operator_token,
        left: Box::new(left?),
        right: Box::new(right?),
    }))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Option<Expr> {
    parser.advance();
    let expr = parse_expr(parser, BindingPower::Default);

    if !parser.expect_peek(TokenKind::CloseParen) {
        return None;
    }

    expr
}

pub fn parse_if_expr(parser: &mut Parser) -> Option<Expr> {
    let token = parser.current_token().clone();

    if !parser.expect_peek(TokenKind::OpenParen) {
        return None;
    }

    parser.advance();
    let condition = parse_expr(parser, BindingPower::Default);

    if !parser.expect_peek(TokenKind::CloseParen) || !parser.expect_peek(TokenKind::OpenCurly) {
        return None;
    }

    let consequence = parse_block_stmt(parser);

    let alternative = if parser.peek_is(TokenKind::Else) {
        parser.advance();

        if !parser.expect_peek(TokenKind::OpenCurly) {
            return None;
        }

        Some(parse_block_stmt(parser))
    } else {
        None
    };

    Some(Expr::If(IfExpr {
        token,
        condition: Box::new(condition?),
        consequence,
        alternative,
    }))
}

pub fn parse_function_expr(parser: &mut Parser) -> Option<Expr> {
    let token = parser.current_token().clone();

    if !parser.expect_peek(TokenKind::OpenParen) {
        return None;
    }

    let parameters = parse_function_parameters(parser)?;

    if !parser.expect_peek(TokenKind::OpenCurly) {
        return None;
    }

    let body = parse_block_stmt(parser);

    Some(Expr::Function(FunctionExpr {
        token,
        parameters,
        body,
    }))
}

/// Starts on `(` and ends on `)`. Every parameter must be a bare identifier.
fn parse_function_parameters(parser: &mut Parser) -> Option<Vec<IdentifierExpr>> {
    let mut parameters = vec![];

    if parser.peek_is(TokenKind::CloseParen) {
        parser.advance();
        return Some(parameters);
    }

    if !parser.expect_peek(TokenKind::Identifier) {
        return None;
    }
    parameters.push(current_identifier(parser));

    while parser.peek_is(TokenKind::Comma) {
        parser.advance();

        if !parser.expect_peek(TokenKind::Identifier) {
            return None;
        }
        parameters.push(current_identifier(parser));
    }

    if !parser.expect_peek(TokenKind::CloseParen) {
        return None;
    }

    Some(parameters)
}

pub fn parse_call_expr(parser: &mut Parser, function: Option<Expr>) -> Option<Expr> {
    let token = parser.current_token().clone();
    let arguments = parse_call_arguments(parser);

    Some(Expr::Call(CallExpr {
        token,
        function: Box::new(function?),
        arguments: arguments?,
    }))
}

/// Starts on `(` and ends on `)`.
///
/// A broken argument does not stop the list from being consumed, so the
/// parser still lands on the closing parenthesis.
fn parse_call_arguments(parser: &mut Parser) -> Option<Vec<Expr>> {
    if parser.peek_is(TokenKind::CloseParen) {
        parser.advance();
        return Some(vec![]);
    }

    parser.advance();
    let mut arguments = vec![parse_expr(parser, BindingPower::Default)];

    while parser.peek_is(TokenKind::Comma) {
        parser.advance();
        parser.advance();
        arguments.push(parse_expr(parser, BindingPower::Default));
    }

    if !parser.expect_peek(TokenKind::CloseParen) {
        return None;
    }

    arguments.into_iter().collect()
}
