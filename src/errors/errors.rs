use thiserror::Error;

use crate::lexer::tokens::TokenKind;

/// A recoverable fault found while parsing.
///
/// The `Display` text of each variant is the exact diagnostic line shown to
/// users, so it must not change shape.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("expected next token to be {expected}, got {got} instead")]
    UnexpectedToken { expected: TokenKind, got: TokenKind },
    #[error("no prefix parse function for {kind} found")]
    NoPrefixParseFn { kind: TokenKind },
    #[error("could not parse {literal:?} as integer")]
    IntegerParse { literal: String },
}

impl ParseError {
    pub fn get_error_name(&self) -> &str {
        match self {
            ParseError::UnexpectedToken { .. } => "UnexpectedToken",
            ParseError::NoPrefixParseFn { .. } => "NoPrefixParseFn",
            ParseError::IntegerParse { .. } => "IntegerParse",
        }
    }
}
