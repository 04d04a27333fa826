/// Parser core types and entrypoint.
///
/// This chunk defines the [`Parser`] type and its top-level `parse()`
/// entrypoint, plus small internal helper types shared across the other
/// parser chunks.
///
/// ## Notes
/// - This file is `include!`'d into `crate::parser` to keep all parser
///   methods in a single module while avoiding one large source file.
/// Result of parsing `[...]` postfix syntax: either a single index or a
/// slice with optional bounds.
enum IndexOrSlice {
    Index(Spanned<Expr>),
    Slice(Option<Spanned<Expr>>, Option<Spanned<Expr>>),
}

/// Maximum nesting depth for items/expressions/types before parsing fails
/// with a structural error instead of overflowing the call stack.
const MAX_NESTING: usize = 200;

/// Parser state.
///
/// ## Notes
/// - The parser is single-pass and recovers from errors by synchronizing at
///   statement/item boundaries; failed constructs become explicit `Error`
///   placeholder nodes.
pub struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
    errors: Vec<CompileError>,
}

impl<'a> Parser<'a> {
    /// Create a new parser for a token stream.
    pub fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
            errors: Vec::new(),
        }
    }

    /// Parse the entire token stream into a [`Program`].
    ///
    /// Always returns the program it managed to build; errors are collected
    /// alongside so a single failure never discards the rest of the file.
    pub fn parse(mut self) -> (Program, Vec<CompileError>) {
        let mut items = Vec::new();

        self.skip_levels();

        while !self.is_at_end() {
            let start = self.current_span();
            match self.item() {
                Ok(item) => items.push(item),
                Err(e) => {
                    let span = start.merge(e.span);
                    self.errors.push(e);
                    self.synchronize();
                    items.push(Spanned::new(Item::Error, span));
                }
            }
            self.skip_levels();
            // Stray Close tokens can remain after error recovery inside a
            // nested block; at the top level they carry no structure.
            self.skip_closes();
        }

        (Program { items }, self.errors)
    }

    /// Run `f` one nesting level deeper, guarding against pathological
    /// input that would otherwise overflow the call stack.
    fn with_depth<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, CompileError>,
    ) -> Result<T, CompileError> {
        if self.depth >= MAX_NESTING {
            return Err(CompileError::structural(
                "nesting too deep",
                self.current_span(),
            ));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }
}
