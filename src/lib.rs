#![forbid(unsafe_code)]
//! Lucent Language Front End
//!
//! Lucent is an indentation-structured systems language with explicit
//! registers, flat data aggregates, and compile-time evaluation markers.
//! This crate provides the front-end tooling: syntax checking, AST dumps,
//! and a canonical formatter.
//!
//! ## Crate layout
//!
//! - `lucent_core` - language vocabulary registries (keywords, operators,
//!   punctuation)
//! - `lucent_syntax` - lexer, parser, AST, diagnostics, pretty-printer
//! - this crate - the `lucent` command-line tool
//!
//! ## Panic Policy
//!
//! Production code uses `Result` with `?` / `map_err`; the `cli` module
//! enforces `#![deny(clippy::unwrap_used)]`. `.unwrap()` is acceptable in
//! tests.

pub mod cli;

pub use lucent_syntax::ast;
pub use lucent_syntax::diagnostics;
pub use lucent_syntax::lexer;
pub use lucent_syntax::parser;
pub use lucent_syntax::printer;
