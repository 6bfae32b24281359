#![allow(clippy::module_inception)]

//! Front-end for a small C-like scripting language: a byte-level lexer, a
//! Pratt parser and the syntax tree it builds.
//!
//! ```
//! use monkeyc::parser::parser::parse;
//!
//! let (program, errors) = parse("let total = a + b * c;");
//! assert!(errors.is_empty());
//! assert_eq!(program.to_string(), "let total = (a + (b * c));");
//! ```

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
