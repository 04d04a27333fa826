//! Parser for the Lucent programming language.
//!
//! Converts a token stream into an AST. Expressions are parsed by
//! precedence climbing with binding powers read from the
//! `lucent_core::lang::operators` registry; block structure is driven
//! entirely by the scanner's `Open`/`Level`/`Close` tokens.
//!
//! ## Examples
//!
//! ```rust
//! use lucent_syntax::{lexer, parser};
//!
//! let source = "fn add(a: int, b: int) int:\n    return a + b\n";
//! let (tokens, errors) = lexer::lex(source);
//! assert!(errors.is_empty());
//! let (program, errors) = parser::parse(&tokens);
//! assert!(errors.is_empty());
//! assert_eq!(program.items.len(), 1);
//! ```

use crate::ast::*;
use crate::diagnostics::CompileError;
use crate::lexer::{Token, TokenKind};
use lucent_core::lang::keywords::KeywordId;
use lucent_core::lang::operators::{self, OperatorId};
use lucent_core::lang::punctuation::PunctuationId;

// NOTE: This module is split across multiple files using `include!` to keep
// all parser methods in the same Rust module (preserving privacy + call
// patterns) while avoiding a single large source file.

include!("parser/core.rs");
include!("parser/helpers.rs");
include!("parser/decl.rs");
include!("parser/types.rs");
include!("parser/stmts.rs");
include!("parser/expr.rs");
include!("parser/util.rs");
include!("parser/api.rs");
include!("parser/tests.rs");
