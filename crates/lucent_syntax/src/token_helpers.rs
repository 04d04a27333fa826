//! Small helper APIs for working with `Token` / `TokenKind`.
//!
//! These helpers exist to reduce repetitive `matches!(...)` at call sites and
//! to make it easy to work with ID-based tokens.

use crate::lexer::TokenKind;
use lucent_core::lang::keywords::{self, KeywordId};
use lucent_core::lang::operators::{self, OperatorId};
use lucent_core::lang::punctuation::{self, PunctuationId};

impl TokenKind {
    /// Return `true` if this is the given keyword.
    pub fn is_keyword(&self, id: KeywordId) -> bool {
        matches!(self, TokenKind::Keyword(k) if *k == id)
    }

    /// Return the operator id, if this is an operator token.
    pub fn operator_id(&self) -> Option<OperatorId> {
        match self {
            TokenKind::Operator(id) => Some(*id),
            _ => None,
        }
    }

    /// Return `true` if this is the given operator.
    pub fn is_operator(&self, id: OperatorId) -> bool {
        matches!(self, TokenKind::Operator(o) if *o == id)
    }

    /// Return `true` if this is the given punctuation.
    pub fn is_punctuation(&self, id: PunctuationId) -> bool {
        matches!(self, TokenKind::Punctuation(p) if *p == id)
    }

    /// Human-readable description for diagnostics.
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Keyword(id) => format!("keyword `{}`", keywords::as_str(*id)),
            TokenKind::Operator(id) => format!("`{}`", operators::as_str(*id)),
            TokenKind::Punctuation(id) => format!("`{}`", punctuation::as_str(*id)),
            TokenKind::Ident(name) => format!("identifier `{}`", name),
            TokenKind::Integral(v) => format!("integral literal `{}`", v),
            TokenKind::String(_) => "string literal".to_string(),
            TokenKind::Rune(_) => "rune literal".to_string(),
            TokenKind::Register(name) => format!("register `${}`", name),
            TokenKind::Open => "start of an indented block".to_string(),
            TokenKind::Level => "end of line".to_string(),
            TokenKind::Close => "end of block".to_string(),
            TokenKind::Eof => "end of file".to_string(),
        }
    }
}
