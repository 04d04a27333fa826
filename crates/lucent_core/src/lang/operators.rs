//! Operator vocabulary.
//!
//! This module defines the canonical operator set (symbol operators like `+`
//! and the word operator `inline`) along with precedence, associativity, and
//! fixity metadata. The parser's precedence climbing reads binding powers
//! from this table rather than keeping a second copy.
//!
//! ## Notes
//! - Higher `precedence` binds tighter. All infix operators are
//!   left-associative.
//! - `=` is listed for vocabulary completeness (assignment and compound
//!   assignment statements); it is not a binary expression operator.
//! - Word-operator spellings also appear in the keyword registry
//!   ([`crate::lang::keywords`]); use this module when you need operator
//!   semantics like precedence.
//!
//! ## Examples
//! ```rust
//! use lucent_core::lang::operators::{self, OperatorId};
//!
//! assert_eq!(operators::from_str("<<"), Some(OperatorId::Shl));
//! assert!(
//!     operators::info_for(OperatorId::Star).precedence
//!         > operators::info_for(OperatorId::Plus).precedence
//! );
//! ```

/// Define how operators associate when chained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Associativity {
    Left,
    None,
}

/// Define whether an operator is infix (binary) or prefix (unary).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fixity {
    Infix,
    Prefix,
    Postfix,
}

/// Stable identifier for every operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorId {
    // Arithmetic
    Plus,
    Minus,
    Star,
    Slash,
    Percent,

    // Bitwise
    Amp,
    Pipe,
    Caret,
    Shl,
    Shr,

    // Comparison
    EqEq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Logical
    AndAnd,
    OrOr,

    // Assignment
    Eq,

    // Prefix / postfix markers
    Bang,
    Hash,
    Inline,
}

/// Metadata for an operator.
#[derive(Debug, Clone, Copy)]
pub struct OperatorInfo {
    pub id: OperatorId,
    pub spelling: &'static str,
    pub precedence: u8,
    pub associativity: Associativity,
    pub fixity: Fixity,
    pub is_keyword_spelling: bool,
}

/// Registry of all operators.
///
/// Infix binding powers, tightest first: multiplicative 8, additive 7,
/// shift 6, binary-and 5, exclusive-or 4, binary-or 3, compare 2, and 1,
/// or 0. Prefix operators sit above all infix forms at 9.
pub const OPERATORS: &[OperatorInfo] = &[
    // Arithmetic
    op(OperatorId::Plus, "+", 7, Associativity::Left, Fixity::Infix, false),
    // `-` doubles as prefix negation; the parser owns that context.
    op(OperatorId::Minus, "-", 7, Associativity::Left, Fixity::Infix, false),
    op(OperatorId::Star, "*", 8, Associativity::Left, Fixity::Infix, false),
    op(OperatorId::Slash, "/", 8, Associativity::Left, Fixity::Infix, false),
    op(OperatorId::Percent, "%", 8, Associativity::Left, Fixity::Infix, false),
    // Bitwise
    // `&` doubles as prefix reference; the parser owns that context.
    op(OperatorId::Amp, "&", 5, Associativity::Left, Fixity::Infix, false),
    op(OperatorId::Pipe, "|", 3, Associativity::Left, Fixity::Infix, false),
    op(OperatorId::Caret, "^", 4, Associativity::Left, Fixity::Infix, false),
    op(OperatorId::Shl, "<<", 6, Associativity::Left, Fixity::Infix, false),
    op(OperatorId::Shr, ">>", 6, Associativity::Left, Fixity::Infix, false),
    // Comparison
    op(OperatorId::EqEq, "==", 2, Associativity::Left, Fixity::Infix, false),
    op(OperatorId::NotEq, "!=", 2, Associativity::Left, Fixity::Infix, false),
    op(OperatorId::Lt, "<", 2, Associativity::Left, Fixity::Infix, false),
    op(OperatorId::LtEq, "<=", 2, Associativity::Left, Fixity::Infix, false),
    op(OperatorId::Gt, ">", 2, Associativity::Left, Fixity::Infix, false),
    op(OperatorId::GtEq, ">=", 2, Associativity::Left, Fixity::Infix, false),
    // Logical
    op(OperatorId::AndAnd, "&&", 1, Associativity::Left, Fixity::Infix, false),
    op(OperatorId::OrOr, "||", 0, Associativity::Left, Fixity::Infix, false),
    // Assignment (statement-level; never climbed as a binary operator)
    op(OperatorId::Eq, "=", 0, Associativity::None, Fixity::Infix, false),
    // Prefix / postfix markers
    // `!` is prefix logical-not and postfix dereference; the parser owns
    // the distinction.
    op(OperatorId::Bang, "!", 9, Associativity::None, Fixity::Prefix, false),
    op(OperatorId::Hash, "#", 9, Associativity::None, Fixity::Prefix, false),
    op(OperatorId::Inline, "inline", 9, Associativity::None, Fixity::Prefix, true),
];

/// Return the canonical spelling for an operator.
pub fn as_str(id: OperatorId) -> &'static str {
    info_for(id).spelling
}

/// Return the full metadata entry for an operator.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a
///   programming error).
pub fn info_for(id: OperatorId) -> &'static OperatorInfo {
    OPERATORS
        .iter()
        .find(|o| o.id == id)
        .expect("operator info missing")
}

/// Resolve an operator spelling to its identifier.
pub fn from_str(s: &str) -> Option<OperatorId> {
    OPERATORS.iter().find(|o| o.spelling == s).map(|o| o.id)
}

const fn op(
    id: OperatorId,
    spelling: &'static str,
    precedence: u8,
    associativity: Associativity,
    fixity: Fixity,
    is_keyword_spelling: bool,
) -> OperatorInfo {
    OperatorInfo {
        id,
        spelling,
        precedence,
        associativity,
        fixity,
        is_keyword_spelling,
    }
}
