//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and the `parse` entry point.
//! The parser keeps two tokens of lookahead (`current` and `peek`) and pulls
//! the next one from the lexer on every advance.
//!
//! It maintains lookup tables for:
//! - Statement handlers
//! - NUD (null denotation) handlers for prefix expressions
//! - LED (left denotation) handlers for infix expressions
//! - Binding powers for operator precedence
//!
//! The tables are filled once in [`Parser::new`] and only read afterwards.

use std::{collections::HashMap, mem};

use log::{debug, trace};

use crate::{
    ast::ast::Program,
    errors::errors::ParseError,
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

/// The main parser structure that maintains parsing state.
pub struct Parser<'a> {
    /// Source of tokens, read lazily
    lexer: Lexer<'a>,
    /// Token being parsed
    current: Token,
    /// One token of lookahead
    peek: Token,
    /// Faults recorded so far, in the order they were found
    errors: Vec<ParseError>,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for null denotation (prefix) expression handlers
    nud_lookup: NUDLookup,
    /// Lookup table for left denotation (infix) expression handlers
    led_lookup: LEDLookup,
    /// Lookup table for expression binding powers (precedence)
    binding_power_lookup: BPLookup,
}

impl<'a> Parser<'a> {
    /// Creates a new Parser reading from `lexer`.
    ///
    /// Primes `current` and `peek` and registers every handler.
    pub fn new(mut lexer: Lexer<'a>) -> Self {
        let current = lexer.next_token();
        let peek = lexer.next_token();

        let mut parser = Parser {
            lexer,
            current,
            peek,
            errors: vec![],
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
        &self.current
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current.kind
    }

    /// Returns the kind of the lookahead token.
    pub fn peek_token_kind(&self) -> TokenKind {
        self.peek.kind
    }

    pub fn current_is(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    pub fn peek_is(&self, kind: TokenKind) -> bool {
        self.peek.kind == kind
    }

    /// Drops the current token and pulls a fresh lookahead from the lexer.
    pub fn advance(&mut self) {
        let next = self.lexer.next_token();
        self.current = mem::replace(&mut self.peek, next);
        trace!("advanced to {:?} {:?}", self.current.kind, self.current.value);
    }

    /// Advances only if the lookahead is `expected_kind`.
    ///
    /// # Returns
    ///
    /// Returns true when the parser moved. Otherwise records an
    /// `UnexpectedToken` error and leaves the cursor where it was.
    pub fn expect_peek(&mut self, expected_kind: TokenKind) -> bool {
        if self.peek_is(expected_kind) {
            self.advance();
            true
        } else {
            self.push_error(ParseError::UnexpectedToken {
                expected: expected_kind,
                got: self.peek.kind,
            });
            false
        }
    }

    /// Binding power of the lookahead token, `Default` if it has none.
    pub fn peek_binding_power(&self) -> BindingPower {
        self.binding_power_of(self.peek.kind)
    }

    /// Binding power of the current token, `Default` if it has none.
    pub fn current_binding_power(&self) -> BindingPower {
        self.binding_power_of(self.current.kind)
    }

    fn binding_power_of(&self, kind: TokenKind) -> BindingPower {
        self.binding_power_lookup
            .get(&kind)
            .copied()
            .unwrap_or(BindingPower::Default)
    }

    pub fn push_error(&mut self, error: ParseError) {
        debug!("parse error: {}", error);
        self.errors.push(error);
    }

    /// Every error recorded so far.
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    /// Errors rendered as their diagnostic lines.
    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(|error| error.to_string()).collect()
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

    /// Registers a left denotation (infix) handler for a token.
    ///
    /// # Arguments
    ///
    /// * `kind` - The token kind to register
    /// * `binding_power` - The precedence/binding power for this operator
    /// * `led_fn` - The handler function for this infix operator
    pub(super) fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token.
    pub(super) fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for a token.
    pub(super) fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    /// Parses statements until EOF.
    ///
    /// Statements that fail to parse are left out; the reason is in
    /// [`Parser::errors`].
    pub fn parse_program(&mut self) -> Program {
        let mut statements = vec![];

        while !self.current_is(TokenKind::EOF) {
            if let Some(stmt) = parse_stmt(self) {
                debug!("parsed statement: {}", stmt);
                statements.push(stmt);
            }
            self.advance();
        }

        Program { statements }
    }
}

/// Parses a source string into a Program.
///
/// This is the main entry point for parsing. It creates a lexer and a
/// parser, then parses all statements until EOF.
///
/// # Returns
///
/// A tuple containing:
/// - The Program, possibly missing statements that failed
/// - Every error found, in source order
pub fn parse(source: &str) -> (Program, Vec<ParseError>) {
    let mut parser = Parser::new(Lexer::new(source.as_bytes()));
    let program = parser.parse_program();

    (program, parser.errors)
}
