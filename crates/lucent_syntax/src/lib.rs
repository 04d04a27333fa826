//! Shared syntax frontend for the Lucent language: lexer, parser, AST,
//! diagnostics, pretty-printer.
//!
//! This crate is dependency-light and intended for reuse across the
//! compiler, formatter, and future interactive tooling.
//!
//! ## Notes
//! - This crate is intentionally "syntax-only": it does not do name
//!   resolution, type checking, or constant evaluation.
//! - Vocabulary identity (keywords/operators/punctuation) comes from
//!   `lucent_core::lang` registries.
//! - Both entrypoints return partial results plus collected errors, never
//!   an all-or-nothing failure; failed items appear in the AST as explicit
//!   `Error` placeholder nodes.
//!
//! ## Examples
//! ```rust
//! use lucent_syntax::{lexer, parser};
//!
//! let (tokens, errors) = lexer::lex("fn answer() int = 42\n");
//! assert!(errors.is_empty());
//! let (program, errors) = parser::parse(&tokens);
//! assert!(errors.is_empty());
//! assert_eq!(program.items.len(), 1);
//! ```

pub mod ast;
pub mod diagnostics;
pub mod lexer;
pub mod parser;
pub mod printer;
pub mod token_helpers;

use ast::Program;
use diagnostics::CompileError;

/// Lex and parse source text in one step.
///
/// Lexical, indentation, and syntax errors are merged into one list in the
/// order they were produced.
pub fn parse_source(source: &str) -> (Program, Vec<CompileError>) {
    let (tokens, mut errors) = lexer::lex(source);
    let (program, parse_errors) = parser::parse(&tokens);
    errors.extend(parse_errors);
    (program, errors)
}
