//! Punctuation vocabulary.
//!
//! This module defines the canonical set of non-operator punctuation tokens
//! used by the lexer and parser: delimiters, separators, access markers, and
//! the annotation sigils.
//!
//! ## Examples
//! ```rust
//! use lucent_core::lang::punctuation::{self, PunctuationId};
//!
//! assert_eq!(punctuation::from_str("@@"), Some(PunctuationId::AtAt));
//! assert_eq!(punctuation::as_str(PunctuationId::Colon), ":");
//! ```

/// Broad syntactic grouping for punctuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PunctuationCategory {
    /// Brackets.
    Delimiter,
    /// Separators like `,`, `:`, and `;`.
    Separator,
    /// Access/path markers like `.`.
    Access,
    /// Annotation sigils `@` and `@@`.
    Marker,
}

/// Stable identifier for punctuation tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PunctuationId {
    // Separators
    Comma,
    Colon,
    Semicolon,

    // Access / path
    Dot,

    // Annotation sigils
    At,
    AtAt,

    // Delimiters
    LParen,
    RParen,
    LBracket,
    RBracket,
}

/// Metadata for a punctuation token.
#[derive(Debug, Clone, Copy)]
pub struct PunctuationInfo {
    pub id: PunctuationId,
    pub canonical: &'static str,
    pub category: PunctuationCategory,
}

/// Registry of all punctuation tokens.
pub const PUNCTUATION: &[PunctuationInfo] = &[
    info(PunctuationId::Comma, ",", PunctuationCategory::Separator),
    info(PunctuationId::Colon, ":", PunctuationCategory::Separator),
    info(PunctuationId::Semicolon, ";", PunctuationCategory::Separator),
    info(PunctuationId::Dot, ".", PunctuationCategory::Access),
    info(PunctuationId::At, "@", PunctuationCategory::Marker),
    info(PunctuationId::AtAt, "@@", PunctuationCategory::Marker),
    info(PunctuationId::LParen, "(", PunctuationCategory::Delimiter),
    info(PunctuationId::RParen, ")", PunctuationCategory::Delimiter),
    info(PunctuationId::LBracket, "[", PunctuationCategory::Delimiter),
    info(PunctuationId::RBracket, "]", PunctuationCategory::Delimiter),
];

/// Return the canonical spelling for a punctuation token.
pub fn as_str(id: PunctuationId) -> &'static str {
    info_for(id).canonical
}

/// Return the category for a punctuation token.
pub fn category(id: PunctuationId) -> PunctuationCategory {
    info_for(id).category
}

/// Return the full metadata entry for a punctuation token.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a
///   programming error).
pub fn info_for(id: PunctuationId) -> &'static PunctuationInfo {
    PUNCTUATION
        .iter()
        .find(|p| p.id == id)
        .expect("punctuation info missing")
}

/// Resolve a punctuation spelling to its identifier.
pub fn from_str(s: &str) -> Option<PunctuationId> {
    PUNCTUATION.iter().find(|p| p.canonical == s).map(|p| p.id)
}

const fn info(
    id: PunctuationId,
    canonical: &'static str,
    category: PunctuationCategory,
) -> PunctuationInfo {
    PunctuationInfo {
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
        for info in PUNCTUATION {
            assert_eq!(from_str(info.canonical), Some(info.id));
            assert_eq!(as_str(info.id), info.canonical);
        }
    }

    #[test]
    fn sigils_resolve_longest_first() {
        // The lexer must try `@@` before `@`; the registry keeps both.
        assert_eq!(from_str("@"), Some(PunctuationId::At));
        assert_eq!(from_str("@@"), Some(PunctuationId::AtAt));
    }
}
