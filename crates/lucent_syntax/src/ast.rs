//! Abstract Syntax Tree definitions for Lucent.
//!
//! Every node kind is a closed tagged variant so later phases can match
//! exhaustively. Nodes are immutable once constructed and form a
//! single-owner tree; each node carries the byte span of the tokens it was
//! built from.

use std::fmt;

use lucent_core::lang::operators::OperatorId;

/// Source location span (byte offsets).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

/// A node with source location.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

/// Identifier (plain string; interning is a later-phase concern).
pub type Ident = String;

/// Dotted identifier path, e.g. `core.memory.copy`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    pub segments: Vec<Ident>,
}

impl Path {
    pub fn new(segments: Vec<Ident>) -> Self {
        Self { segments }
    }

    pub fn single(segment: Ident) -> Self {
        Self {
            segments: vec![segment],
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

/// A program is a sequence of top-level items, in source order.
///
/// Global annotations (`@@name value`) appear in this sequence so their
/// position relative to declarations is preserved for downstream phases.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub items: Vec<Spanned<Item>>,
}

/// Top-level and module-nested items.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    /// `@@name value` - process-wide annotation.
    GlobalAnnotation(Annotation),
    Module(ModuleDecl),
    Function(FunctionDecl),
    Static(StaticDecl),
    Data(DataDecl),
    Use(UseDecl),
    Load(LoadDecl),
    /// Placeholder for an item that failed to parse. Never silently dropped.
    Error,
}

/// `@name value` attached to a declaration (or, doubled, to the unit).
///
/// The value expression is passed through uninterpreted; downstream phases
/// decide what each annotation means. Order is preserved and significant.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub name: Ident,
    pub value: Spanned<Expr>,
}

// ============================================================================
// Modules
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ModuleDecl {
    pub annotations: Vec<Spanned<Annotation>>,
    pub name: Ident,
    pub items: Vec<Spanned<Item>>,
}

// ============================================================================
// Functions
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    pub annotations: Vec<Spanned<Annotation>>,
    /// `root` marker: designates a program entry point.
    pub is_root: bool,
    /// Optional calling-convention identifier preceding `fn`.
    pub convention: Option<Ident>,
    pub name: Ident,
    pub parameters: Vec<Spanned<Parameter>>,
    pub return_type: Option<Spanned<ReturnType>>,
    /// Body statements. The `= expr` shorthand desugars to a single
    /// `Return(Some(expr))`.
    pub body: Vec<Spanned<Statement>>,
}

/// A function parameter: a typed name or a raw machine register.
#[derive(Debug, Clone, PartialEq)]
pub enum Parameter {
    Named { name: Ident, ty: Spanned<Type> },
    Register(Ident),
}

/// Return specification: a type or a register. One slot; never both.
#[derive(Debug, Clone, PartialEq)]
pub enum ReturnType {
    Type(Spanned<Type>),
    Register(Ident),
}

// ============================================================================
// Statics and data aggregates
// ============================================================================

/// `static name: type = value` - at least one of `ty`/`value` is present
/// (enforced by the parser as a structural check).
#[derive(Debug, Clone, PartialEq)]
pub struct StaticDecl {
    pub annotations: Vec<Spanned<Annotation>>,
    pub name: Ident,
    pub ty: Option<Spanned<Type>>,
    pub value: Option<Spanned<Expr>>,
}

/// Flat, field-only aggregate declaration. No methods, no inheritance.
#[derive(Debug, Clone, PartialEq)]
pub struct DataDecl {
    pub annotations: Vec<Spanned<Annotation>>,
    pub name: Ident,
    pub fields: Vec<Spanned<Field>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: Ident,
    pub ty: Spanned<Type>,
}

// ============================================================================
// Imports
// ============================================================================

/// `use` pulls in a whole module.
#[derive(Debug, Clone, PartialEq)]
pub struct UseDecl {
    pub annotations: Vec<Spanned<Annotation>>,
    pub target: UseTarget,
    pub alias: Option<Ident>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UseTarget {
    /// `use "path/to/library" with "symbol"` - string-literal module
    /// reference, optionally parameterized.
    Quoted { path: String, with: Option<String> },
    /// `use a.b.c` or `use a.b.*` - dotted symbol path, optionally wildcard.
    Path { path: Path, wildcard: bool },
}

/// `load` binds one foreign symbol under a locally declared shape.
///
/// The `as` binding is authoritative for the local view of the symbol; a
/// later phase checks it against the real foreign definition.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadDecl {
    pub annotations: Vec<Spanned<Annotation>>,
    pub target: LoadTarget,
    pub binding: LoadBinding,
}

/// Dotted module path plus the target symbol, by trailing name or ordinal.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadTarget {
    pub path: Path,
    /// `load module.3 as ...` - import by ordinal index instead of name.
    pub ordinal: Option<i128>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadBinding {
    /// `as name: type` - bind as a plain value.
    Variable { name: Ident, ty: Spanned<Type> },
    /// `as convention? fn name(types) return?` - bind as a callable.
    Function(Signature),
}

/// A named function signature, as used by `load` bindings.
#[derive(Debug, Clone, PartialEq)]
pub struct Signature {
    pub convention: Option<Ident>,
    pub name: Ident,
    pub parameters: Vec<Spanned<Type>>,
    pub return_type: Option<Box<Spanned<ReturnType>>>,
}

// ============================================================================
// Types
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    /// Dotted nominal reference, resolved later.
    Path(Path),
    /// `*T`
    Pointer(Box<Spanned<Type>>),
    /// `[T;]` - unsized slice.
    Slice(Box<Spanned<Type>>),
    /// `[T; size]` - the size is an arbitrary expression; the parser never
    /// evaluates it.
    Array(Box<Spanned<Type>>, Box<Spanned<Expr>>),
    /// `convention? fn(T, ...) R?` - anonymous function type.
    Signature(SignatureType),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SignatureType {
    pub convention: Option<Ident>,
    pub parameters: Vec<Spanned<Type>>,
    pub return_type: Option<Box<Spanned<Type>>>,
}

// ============================================================================
// Statements
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Let {
        name: Ident,
        ty: Option<Spanned<Type>>,
        value: Option<Spanned<Expr>>,
    },
    /// Assignment; the target is any assignable expression, not just a name.
    Set {
        target: Spanned<Expr>,
        value: Spanned<Expr>,
    },
    /// `target OP= value` over the arithmetic/bitwise operator set.
    Compound {
        target: Spanned<Expr>,
        op: BinaryOp,
        value: Spanned<Expr>,
    },
    Return(Option<Spanned<Expr>>),
    While {
        condition: Spanned<Expr>,
        body: Vec<Spanned<Statement>>,
    },
    Break,
    Continue,
    /// Bare expression used as a statement.
    Expr(Spanned<Expr>),
    /// Placeholder for a statement that failed to parse.
    Error,
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// `-`
    Negate,
    /// `!`
    Not,
    /// `&`
    Reference,
    /// `#` - compile-time evaluation marker.
    Compile,
    /// `inline`
    Inline,
}

impl UnaryOp {
    pub fn as_str(self) -> &'static str {
        match self {
            UnaryOp::Negate => "-",
            UnaryOp::Not => "!",
            UnaryOp::Reference => "&",
            UnaryOp::Compile => "#",
            UnaryOp::Inline => "inline",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    And,
    Or,
}

impl BinaryOp {
    /// The registry operator this AST operator is spelled with.
    pub fn operator_id(self) -> OperatorId {
        match self {
            BinaryOp::Add => OperatorId::Plus,
            BinaryOp::Sub => OperatorId::Minus,
            BinaryOp::Mul => OperatorId::Star,
            BinaryOp::Div => OperatorId::Slash,
            BinaryOp::Mod => OperatorId::Percent,
            BinaryOp::BitAnd => OperatorId::Amp,
            BinaryOp::BitOr => OperatorId::Pipe,
            BinaryOp::BitXor => OperatorId::Caret,
            BinaryOp::Shl => OperatorId::Shl,
            BinaryOp::Shr => OperatorId::Shr,
            BinaryOp::Eq => OperatorId::EqEq,
            BinaryOp::NotEq => OperatorId::NotEq,
            BinaryOp::Lt => OperatorId::Lt,
            BinaryOp::LtEq => OperatorId::LtEq,
            BinaryOp::Gt => OperatorId::Gt,
            BinaryOp::GtEq => OperatorId::GtEq,
            BinaryOp::And => OperatorId::AndAnd,
            BinaryOp::Or => OperatorId::OrOr,
        }
    }

    pub fn as_str(self) -> &'static str {
        lucent_core::lang::operators::as_str(self.operator_id())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// `$name` - machine register reference.
    Register(Ident),
    /// Integral literal; separators stripped, always non-negative.
    Integral(i128),
    String(String),
    Rune(char),
    /// `true` / `false`.
    Truth(bool),
    /// Identifier reference. Dotted projections are `Access` nodes.
    Path(Path),
    Unary(UnaryOp, Box<Spanned<Expr>>),
    Binary(Box<Spanned<Expr>>, BinaryOp, Box<Spanned<Expr>>),
    /// Postfix `!` on a pointer-valued expression.
    Dereference(Box<Spanned<Expr>>),
    /// `value as type`.
    Cast(Box<Spanned<Expr>>, Spanned<Type>),
    /// The callee may be an arbitrary expression.
    Call(Box<Spanned<Expr>>, Vec<Spanned<Expr>>),
    Index(Box<Spanned<Expr>>, Box<Spanned<Expr>>),
    /// `value[lower : upper]` with either bound optional.
    Slice(
        Box<Spanned<Expr>>,
        Option<Box<Spanned<Expr>>>,
        Option<Box<Spanned<Expr>>>,
    ),
    /// `value.field`.
    Access(Box<Spanned<Expr>>, Ident),
    /// Parenthesized expression; kept so printing round-trips exactly.
    Group(Box<Spanned<Expr>>),
    /// Nested statement sequence usable as a value; evaluates to its final
    /// statement if that statement is an expression.
    Block(Vec<Spanned<Statement>>),
    /// `when` multi-branch or `if` single-branch conditional.
    When(Vec<Spanned<Branch>>),
    /// `new Type field, field: value, ...` aggregate or slice construction.
    New {
        target: Spanned<Type>,
        fields: Vec<Spanned<FieldInit>>,
    },
    /// `[a, b, c]` literal sequence.
    Array(Vec<Spanned<Expr>>),
}

/// One arm of a `when`/`if` conditional: `condition: body`.
#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    pub condition: Spanned<Expr>,
    pub body: Spanned<Expr>,
}

/// A field initializer in a `new` expression.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldInit {
    /// Bare name: shorthand for `name: <variable of the same name>`.
    Shorthand(Ident),
    Named(Ident, Spanned<Expr>),
}
