/// Type expression parsing methods.
impl<'a> Parser<'a> {
    // ========================================================================
    // Types
    // ========================================================================

    fn type_expr(&mut self) -> Result<Spanned<Type>, CompileError> {
        self.with_depth(Self::type_expr_inner)
    }

    fn type_expr_inner(&mut self) -> Result<Spanned<Type>, CompileError> {
        let start = self.current_span();

        // `*T`
        if self.match_op(OperatorId::Star) {
            let inner = self.type_expr()?;
            let span = start.merge(inner.span);
            return Ok(Spanned::new(Type::Pointer(Box::new(inner)), span));
        }

        // `[T;]` slice or `[T; size]` array.
        if self.match_punct(PunctuationId::LBracket) {
            let element = self.type_expr()?;
            self.expect_punct(PunctuationId::Semicolon, "expected ';' in sequence type")?;
            if self.check_punct(PunctuationId::RBracket) {
                let end = self.advance().span;
                return Ok(Spanned::new(
                    Type::Slice(Box::new(element)),
                    start.merge(end),
                ));
            }
            let size = self.value(0)?;
            let end = self
                .expect_punct(PunctuationId::RBracket, "expected ']' after array size")?
                .span;
            return Ok(Spanned::new(
                Type::Array(Box::new(element), Box::new(size)),
                start.merge(end),
            ));
        }

        // `convention? fn(T, ...) R?`
        if self.check_keyword(KeywordId::Fn) || self.at_convention_fn() {
            return self.signature_type(start);
        }

        // Dotted nominal path.
        let mut segments = vec![self.identifier()?];
        while self.check_punct(PunctuationId::Dot)
            && matches!(self.peek_next().kind, TokenKind::Ident(_))
        {
            self.advance();
            segments.push(self.identifier()?);
        }
        let span = start.merge(self.previous_span());
        Ok(Spanned::new(Type::Path(Path::new(segments)), span))
    }

    fn signature_type(&mut self, start: Span) -> Result<Spanned<Type>, CompileError> {
        let convention = if self.at_convention_fn() {
            Some(self.identifier()?)
        } else {
            None
        };
        self.advance(); // `fn`
        self.expect_punct(PunctuationId::LParen, "expected '(' in function type")?;
        let parameters = self.type_list(PunctuationId::RParen)?;
        self.expect_punct(PunctuationId::RParen, "expected ')' in function type")?;

        let return_type = if self.is_at_type_start() {
            Some(Box::new(self.type_expr()?))
        } else {
            None
        };

        let span = start.merge(self.previous_span());
        Ok(Spanned::new(
            Type::Signature(SignatureType {
                convention,
                parameters,
                return_type,
            }),
            span,
        ))
    }

    /// Comma-separated types up to (not including) `terminator`. Trailing
    /// comma allowed.
    fn type_list(&mut self, terminator: PunctuationId) -> Result<Vec<Spanned<Type>>, CompileError> {
        let mut types = Vec::new();
        while !self.check_punct(terminator) && !self.is_at_end() {
            types.push(self.type_expr()?);
            if !self.match_punct(PunctuationId::Comma) {
                break;
            }
        }
        Ok(types)
    }
}
