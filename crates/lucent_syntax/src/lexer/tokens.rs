//! Token types for the Lucent lexer.
//!
//! The lexer uses registry-backed IDs for language vocabulary:
//! - `Keyword(KeywordId)` for reserved words
//! - `Operator(OperatorId)` for operators
//! - `Punctuation(PunctuationId)` for punctuation tokens
//!
//! Block structure is carried by three synthetic tokens (`Open`, `Level`,
//! `Close`) produced by the indentation scanner; the parser never inspects
//! raw column positions.

use crate::ast::Span;
use lucent_core::lang::keywords::{self, KeywordId};
use lucent_core::lang::operators::OperatorId;
use lucent_core::lang::punctuation::PunctuationId;

/// Kind of token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // ========== Keyword / operator / punctuation (ID-based) ==========
    Keyword(KeywordId),
    Operator(OperatorId),
    Punctuation(PunctuationId),

    // ========== Identifiers and literals ==========
    Ident(String),
    /// Integral literal with grouping separators stripped.
    Integral(i128),
    String(String),
    Rune(char),
    /// `$name` machine register reference.
    Register(String),

    // ========== Block structure ==========
    /// Indentation increased: a new block begins.
    Open,
    /// A line at the same indentation level: statement/item separator.
    Level,
    /// Indentation decreased: one block ends per token.
    Close,

    // ========== Special ==========
    Eof,
}

/// A token with its kind and source span.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    /// Construct a new token.
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Resolve an identifier spelling to a keyword id, if reserved.
pub fn keyword_id(name: &str) -> Option<KeywordId> {
    keywords::from_str(name)
}
