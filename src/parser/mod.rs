//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the parser that pulls tokens from the lexer one at
//! a time and builds a `Program`. It uses a Pratt parser for expressions
//! with operator precedence and handles:
//!
//! - Statement parsing (let, return, expression statements, blocks)
//! - Expression parsing (prefix and infix operators, literals, grouping,
//!   `if`, function literals, calls)
//! - Error collection without stopping
//!
//! The parser uses NUD (null denotation) and LED (left denotation) functions
//! for expression parsing with binding power for precedence handling.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;

#[cfg(test)]
mod tests;
