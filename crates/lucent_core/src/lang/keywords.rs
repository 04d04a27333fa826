//! Reserved keyword vocabulary for the Lucent language.
//!
//! This module is the single source of truth for reserved words: a stable
//! identifier ([`KeywordId`]) plus a const metadata table ([`KEYWORDS`]) that
//! records canonical spellings and categories.
//!
//! Keyword recognition is a post-hoc check on a maximal identifier match: the
//! lexer scans the longest identifier it can, then asks [`from_str`] whether
//! that exact text is reserved. `moduleX` is therefore an identifier, never a
//! partial keyword.
//!
//! ## Examples
//! ```rust
//! use lucent_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("module"), Some(KeywordId::Module));
//! assert_eq!(keywords::from_str("moduleX"), None);
//! assert_eq!(keywords::as_str(KeywordId::Fn), "fn");
//! ```

/// Stable identifier for every reserved keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordId {
    // Declarations
    Module,
    Fn,
    Data,
    Static,
    Use,
    Load,

    // Control flow / statements
    When,
    If,
    While,
    Let,
    Return,
    Break,
    Continue,

    // Expression forms
    As,
    New,
    With,

    // Modifiers
    Root,
    Inline,

    // Literals
    True,
    False,
}

/// High-level grouping for documentation and tooling.
///
/// Categories are metadata only; they do not enforce parsing context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordCategory {
    Declaration,
    ControlFlow,
    Expression,
    Modifier,
    Literal,
}

/// Metadata for a keyword.
#[derive(Debug, Clone, Copy)]
pub struct KeywordInfo {
    pub id: KeywordId,
    pub canonical: &'static str,
    pub category: KeywordCategory,
}

/// Registry of all reserved keywords.
pub const KEYWORDS: &[KeywordInfo] = &[
    // Declarations
    kw(KeywordId::Module, "module", KeywordCategory::Declaration),
    kw(KeywordId::Fn, "fn", KeywordCategory::Declaration),
    kw(KeywordId::Data, "data", KeywordCategory::Declaration),
    kw(KeywordId::Static, "static", KeywordCategory::Declaration),
    kw(KeywordId::Use, "use", KeywordCategory::Declaration),
    kw(KeywordId::Load, "load", KeywordCategory::Declaration),
    // Control flow / statements
    kw(KeywordId::When, "when", KeywordCategory::ControlFlow),
    kw(KeywordId::If, "if", KeywordCategory::ControlFlow),
    kw(KeywordId::While, "while", KeywordCategory::ControlFlow),
    kw(KeywordId::Let, "let", KeywordCategory::ControlFlow),
    kw(KeywordId::Return, "return", KeywordCategory::ControlFlow),
    kw(KeywordId::Break, "break", KeywordCategory::ControlFlow),
    kw(KeywordId::Continue, "continue", KeywordCategory::ControlFlow),
    // Expression forms
    kw(KeywordId::As, "as", KeywordCategory::Expression),
    kw(KeywordId::New, "new", KeywordCategory::Expression),
    kw(KeywordId::With, "with", KeywordCategory::Expression),
    // Modifiers
    kw(KeywordId::Root, "root", KeywordCategory::Modifier),
    kw(KeywordId::Inline, "inline", KeywordCategory::Modifier),
    // Literals
    kw(KeywordId::True, "true", KeywordCategory::Literal),
    kw(KeywordId::False, "false", KeywordCategory::Literal),
];

/// Return the canonical spelling for a keyword.
pub fn as_str(id: KeywordId) -> &'static str {
    info_for(id).canonical
}

/// Return the category for a keyword.
pub fn category(id: KeywordId) -> KeywordCategory {
    info_for(id).category
}

/// Return the full metadata entry for a keyword.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a
///   programming error).
pub fn info_for(id: KeywordId) -> &'static KeywordInfo {
    KEYWORDS
        .iter()
        .find(|k| k.id == id)
        .expect("keyword info missing")
}

/// Resolve a spelling to its keyword id, if reserved.
///
/// Matching is case-sensitive and exact.
pub fn from_str(s: &str) -> Option<KeywordId> {
    KEYWORDS.iter().find(|k| k.canonical == s).map(|k| k.id)
}

const fn kw(id: KeywordId, canonical: &'static str, category: KeywordCategory) -> KeywordInfo {
    KeywordInfo {
        id,
        canonical,
        category,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_id_has_an_entry_and_round_trips() {
        for info in KEYWORDS {
            assert_eq!(from_str(info.canonical), Some(info.id));
            assert_eq!(as_str(info.id), info.canonical);
        }
    }

    #[test]
    fn spellings_are_unique() {
        for (i, a) in KEYWORDS.iter().enumerate() {
            for b in &KEYWORDS[i + 1..] {
                assert_ne!(a.canonical, b.canonical);
                assert_ne!(a.id, b.id);
            }
        }
    }

    #[test]
    fn prefixes_are_not_keywords() {
        assert_eq!(from_str("moduleX"), None);
        assert_eq!(from_str("mod"), None);
        assert_eq!(from_str("Fn"), None);
    }
}
