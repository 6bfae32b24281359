//! Lexical analysis module.
//!
//! This module contains the lexer (tokenizer) that converts source bytes
//! into a stream of tokens for parsing. It handles:
//!
//! - Recognition of keywords, identifiers, integer and string literals
//! - One and two character operators
//! - Space and newline skipping

pub mod lexer;
pub mod tokens;
