use crate::{
    ast::{
        ast::Stmt,
        statements::{BlockStmt, ExpressionStmt, LetStmt, ReturnStmt},
    },
    lexer::tokens::TokenKind,
};

use super::{
    expr::{current_identifier, parse_expr},
    lookups::BindingPower,
    parser::Parser,
};

/// Parses one statement starting on the current token. Ends on the
/// statement's last token, including its `;` when there is one.
pub fn parse_stmt(parser: &mut Parser) -> Option<Stmt> {
    if let Some(handler) = parser
        .get_stmt_lookup()
        .get(&parser.current_token_kind())
        .copied()
    {
        return handler(parser);
    }

    parse_expression_stmt(parser)
}

fn skip_semicolon(parser: &mut Parser) {
    if parser.peek_is(TokenKind::Semicolon) {
        parser.advance();
    }
}

pub fn parse_let_stmt(parser: &mut Parser) -> Option<Stmt> {
    let token = parser.current_token().clone();

    if !parser.expect_peek(TokenKind::Identifier) {
        return None;
    }

    let name = current_identifier(parser);

    if !parser.expect_peek(TokenKind::Assignment) {
        return None;
    }

    parser.advance();
    let value = parse_expr(parser, BindingPower::Default);

    skip_semicolon(parser);

    Some(Stmt::Let(LetStmt { token, name, value }))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Option<Stmt> {
    let token = parser.current_token().clone();

    parser.advance();
    let value = parse_expr(parser, BindingPower::Default);

    skip_semicolon(parser);

    Some(Stmt::Return(ReturnStmt { token, value }))
}

pub fn parse_expression_stmt(parser: &mut Parser) -> Option<Stmt> {
    let token = parser.current_token().clone();
    let expression = parse_expr(parser, BindingPower::Default);

    skip_semicolon(parser);

    Some(Stmt::Expression(ExpressionStmt { token, expression }))
}

/// Starts on `{` and ends on the matching `}`, or on EOF if the block is
/// never closed.
pub fn parse_block_stmt(parser: &mut Parser) -> BlockStmt {
    let token = parser.current_token().clone();
    let mut body = Vec::new();

    parser.advance();

    while !parser.current_is(TokenKind::CloseCurly) && !parser.current_is(TokenKind::EOF) {
        if let Some(stmt) = parse_stmt(parser) {
            body.push(stmt);
        }
        parser.advance();
    }

    BlockStmt { token, body }
}
