/// Expression parsing methods.
///
/// Binary expressions are parsed by precedence climbing; binding powers come
/// from the `lucent_core::lang::operators` registry rather than a hardcoded
/// ladder, so the grammar and the vocabulary tables cannot drift apart.
impl<'a> Parser<'a> {
    // ========================================================================
    // Expressions
    // ========================================================================

    /// Parse a full expression, including the block-shaped forms (`when`,
    /// `if`, indented blocks) that cannot appear inside operator chains.
    fn expression(&mut self) -> Result<Spanned<Expr>, CompileError> {
        self.with_depth(Self::expression_inner)
    }

    fn expression_inner(&mut self) -> Result<Spanned<Expr>, CompileError> {
        let start = self.current_span();
        if self.match_keyword(KeywordId::When) {
            return self.when_expression(start);
        }
        if self.match_keyword(KeywordId::If) {
            return self.if_expression(start);
        }
        if self.check_open() {
            return self.block_expression();
        }
        self.value(0)
    }

    /// Precedence climbing over infix operators at or above `min_precedence`.
    fn value(&mut self, min_precedence: u8) -> Result<Spanned<Expr>, CompileError> {
        self.with_depth(|p| p.value_inner(min_precedence))
    }

    fn value_inner(&mut self, min_precedence: u8) -> Result<Spanned<Expr>, CompileError> {
        let mut lhs = self.unary()?;

        loop {
            let Some(op) = self.infix_operator() else {
                break;
            };
            let precedence = operators::info_for(op.operator_id()).precedence;
            if precedence < min_precedence {
                break;
            }
            // `target OP = value` is a compound assignment, owned by the
            // statement grammar.
            if self.peek_next().kind.is_operator(OperatorId::Eq) {
                break;
            }
            self.advance();
            // All infix operators associate left.
            let rhs = self.value(precedence + 1)?;
            let span = lhs.span.merge(rhs.span);
            lhs = Spanned::new(Expr::Binary(Box::new(lhs), op, Box::new(rhs)), span);
        }

        Ok(lhs)
    }

    /// The infix operator at the current position, if any.
    fn infix_operator(&self) -> Option<BinaryOp> {
        let id = self.peek().kind.operator_id()?;
        match id {
            OperatorId::Plus => Some(BinaryOp::Add),
            OperatorId::Minus => Some(BinaryOp::Sub),
            OperatorId::Star => Some(BinaryOp::Mul),
            OperatorId::Slash => Some(BinaryOp::Div),
            OperatorId::Percent => Some(BinaryOp::Mod),
            OperatorId::Amp => Some(BinaryOp::BitAnd),
            OperatorId::Pipe => Some(BinaryOp::BitOr),
            OperatorId::Caret => Some(BinaryOp::BitXor),
            OperatorId::Shl => Some(BinaryOp::Shl),
            OperatorId::Shr => Some(BinaryOp::Shr),
            OperatorId::EqEq => Some(BinaryOp::Eq),
            OperatorId::NotEq => Some(BinaryOp::NotEq),
            OperatorId::Lt => Some(BinaryOp::Lt),
            OperatorId::LtEq => Some(BinaryOp::LtEq),
            OperatorId::Gt => Some(BinaryOp::Gt),
            OperatorId::GtEq => Some(BinaryOp::GtEq),
            OperatorId::AndAnd => Some(BinaryOp::And),
            OperatorId::OrOr => Some(BinaryOp::Or),
            _ => None,
        }
    }

    fn unary(&mut self) -> Result<Spanned<Expr>, CompileError> {
        let start = self.current_span();
        let op = if self.match_op(OperatorId::Minus) {
            Some(UnaryOp::Negate)
        } else if self.match_op(OperatorId::Bang) {
            Some(UnaryOp::Not)
        } else if self.match_op(OperatorId::Amp) {
            Some(UnaryOp::Reference)
        } else if self.match_op(OperatorId::Hash) {
            Some(UnaryOp::Compile)
        } else if self.match_keyword(KeywordId::Inline) {
            Some(UnaryOp::Inline)
        } else {
            None
        };

        if let Some(op) = op {
            let operand = self.with_depth(Self::unary)?;
            let span = start.merge(operand.span);
            return Ok(Spanned::new(Expr::Unary(op, Box::new(operand)), span));
        }

        self.postfix()
    }

    fn postfix(&mut self) -> Result<Spanned<Expr>, CompileError> {
        let mut expr = self.primary()?;

        loop {
            if self.match_punct(PunctuationId::LParen) {
                let arguments = self.argument_list()?;
                let end = self
                    .expect_punct(PunctuationId::RParen, "expected ')' after call arguments")?
                    .span;
                let span = expr.span.merge(end);
                expr = Spanned::new(Expr::Call(Box::new(expr), arguments), span);
            } else if self.match_punct(PunctuationId::LBracket) {
                expr = self.index_or_slice(expr)?;
            } else if self.check_punct(PunctuationId::Dot)
                && matches!(self.peek_next().kind, TokenKind::Ident(_))
            {
                self.advance();
                let name = self.identifier()?;
                let span = expr.span.merge(self.previous_span());
                expr = Spanned::new(Expr::Access(Box::new(expr), name), span);
            } else if self.check_op(OperatorId::Bang) {
                // Postfix dereference; `!=` never reaches here because the
                // lexer fuses it into one token.
                let end = self.advance().span;
                let span = expr.span.merge(end);
                expr = Spanned::new(Expr::Dereference(Box::new(expr)), span);
            } else if self.match_keyword(KeywordId::As) {
                let ty = self.type_expr()?;
                let span = expr.span.merge(ty.span);
                expr = Spanned::new(Expr::Cast(Box::new(expr), ty), span);
            } else {
                break;
            }
        }

        Ok(expr)
    }

    /// Comma-separated call arguments, trailing comma allowed.
    fn argument_list(&mut self) -> Result<Vec<Spanned<Expr>>, CompileError> {
        let mut arguments = Vec::new();
        while !self.check_punct(PunctuationId::RParen) && !self.is_at_end() {
            arguments.push(self.expression()?);
            if !self.match_punct(PunctuationId::Comma) {
                break;
            }
        }
        Ok(arguments)
    }

    /// The `[...]` postfix on `base`: a single index, or a slice with either
    /// bound optional.
    fn index_or_slice(&mut self, base: Spanned<Expr>) -> Result<Spanned<Expr>, CompileError> {
        let form = if self.match_punct(PunctuationId::Colon) {
            let upper = if self.check_punct(PunctuationId::RBracket) {
                None
            } else {
                Some(self.expression()?)
            };
            IndexOrSlice::Slice(None, upper)
        } else {
            let first = self.expression()?;
            if self.match_punct(PunctuationId::Colon) {
                let upper = if self.check_punct(PunctuationId::RBracket) {
                    None
                } else {
                    Some(self.expression()?)
                };
                IndexOrSlice::Slice(Some(first), upper)
            } else {
                IndexOrSlice::Index(first)
            }
        };
        let end = self
            .expect_punct(PunctuationId::RBracket, "expected ']' after index")?
            .span;
        let span = base.span.merge(end);
        Ok(match form {
            IndexOrSlice::Index(index) => {
                Spanned::new(Expr::Index(Box::new(base), Box::new(index)), span)
            }
            IndexOrSlice::Slice(lower, upper) => Spanned::new(
                Expr::Slice(Box::new(base), lower.map(Box::new), upper.map(Box::new)),
                span,
            ),
        })
    }

    fn primary(&mut self) -> Result<Spanned<Expr>, CompileError> {
        let start = self.current_span();

        let expr = match &self.peek().kind {
            TokenKind::Register(name) => {
                let name = name.clone();
                self.advance();
                Expr::Register(name)
            }
            TokenKind::Integral(n) => {
                let n = *n;
                self.advance();
                Expr::Integral(n)
            }
            TokenKind::String(s) => {
                let s = s.clone();
                self.advance();
                Expr::String(s)
            }
            TokenKind::Rune(c) => {
                let c = *c;
                self.advance();
                Expr::Rune(c)
            }
            TokenKind::Ident(name) => {
                let name = name.clone();
                self.advance();
                Expr::Path(Path::single(name))
            }
            _ => {
                if self.match_keyword(KeywordId::True) {
                    Expr::Truth(true)
                } else if self.match_keyword(KeywordId::False) {
                    Expr::Truth(false)
                } else if self.match_keyword(KeywordId::New) {
                    return self.new_expression(start);
                } else if self.match_punct(PunctuationId::LParen) {
                    let inner = self.expression()?;
                    let end = self
                        .expect_punct(PunctuationId::RParen, "expected ')' after expression")?
                        .span;
                    return Ok(Spanned::new(
                        Expr::Group(Box::new(inner)),
                        start.merge(end),
                    ));
                } else if self.match_punct(PunctuationId::LBracket) {
                    let elements = self.array_elements()?;
                    let end = self
                        .expect_punct(PunctuationId::RBracket, "expected ']' after sequence")?
                        .span;
                    return Ok(Spanned::new(Expr::Array(elements), start.merge(end)));
                } else {
                    return Err(CompileError::expected_in(
                        "expression",
                        &["a literal", "a name", "'('", "'['", "new", "when"],
                        self.peek().kind.describe(),
                        self.current_span(),
                    ));
                }
            }
        };

        Ok(Spanned::new(expr, start.merge(self.previous_span())))
    }

    fn array_elements(&mut self) -> Result<Vec<Spanned<Expr>>, CompileError> {
        let mut elements = Vec::new();
        while !self.check_punct(PunctuationId::RBracket) && !self.is_at_end() {
            elements.push(self.expression()?);
            if !self.match_punct(PunctuationId::Comma) {
                break;
            }
        }
        Ok(elements)
    }

    // ========================================================================
    // Conditionals and blocks
    // ========================================================================

    /// `when` with either shape: a headed multi-branch block, or an inline
    /// single branch. The `when` keyword is already consumed.
    fn when_expression(&mut self, start: Span) -> Result<Spanned<Expr>, CompileError> {
        if self.match_punct(PunctuationId::Colon) {
            self.expect_open("expected an indented block after 'when:'")?;
            let mut branches = Vec::new();
            loop {
                branches.push(self.branch()?);
                if !self.match_level() {
                    break;
                }
            }
            self.expect_close("when")?;
            let span = start.merge(self.previous_span());
            return Ok(Spanned::new(Expr::When(branches), span));
        }

        let branch = self.branch()?;
        let span = start.merge(branch.span);
        Ok(Spanned::new(Expr::When(vec![branch]), span))
    }

    /// `if condition: body` is a `when` with exactly one branch. The `if`
    /// keyword is already consumed.
    fn if_expression(&mut self, start: Span) -> Result<Spanned<Expr>, CompileError> {
        let branch = self.branch()?;
        let span = start.merge(branch.span);
        Ok(Spanned::new(Expr::When(vec![branch]), span))
    }

    /// One `condition: body` arm.
    ///
    /// The body is an expression in the tree, but inline bodies are parsed
    /// as statements so control flow (`break`, `return`, assignment) works
    /// in branch position. A bare expression statement stays a plain
    /// expression; anything else is wrapped in a one-statement block.
    fn branch(&mut self) -> Result<Spanned<Branch>, CompileError> {
        let condition = self.value(0)?;
        self.expect_punct(PunctuationId::Colon, "expected ':' after branch condition")?;
        let body = if self.check_open() {
            self.block_expression()?
        } else {
            let statement = self.statement()?;
            match statement.node {
                Statement::Expr(value) => value,
                other => {
                    let span = statement.span;
                    Spanned::new(Expr::Block(vec![Spanned::new(other, span)]), span)
                }
            }
        };
        let span = condition.span.merge(body.span);
        Ok(Spanned::new(Branch { condition, body }, span))
    }

    /// An indented statement sequence used as a value.
    fn block_expression(&mut self) -> Result<Spanned<Expr>, CompileError> {
        let start = self.expect_open("expected an indented block")?.span;
        let statements = self.statement_list();
        let end = self.expect_close("block")?.span;
        Ok(Spanned::new(Expr::Block(statements), start.merge(end)))
    }

    // ========================================================================
    // Construction
    // ========================================================================

    /// `new Type field, field: value, ...`. The `new` keyword is already
    /// consumed; the field list may be empty.
    fn new_expression(&mut self, start: Span) -> Result<Spanned<Expr>, CompileError> {
        let target = self.type_expr()?;

        let mut fields = Vec::new();
        while matches!(self.peek().kind, TokenKind::Ident(_)) {
            let field_start = self.current_span();
            let name = self.identifier()?;
            let init = if self.match_punct(PunctuationId::Colon) {
                let value = self.expression()?;
                FieldInit::Named(name, value)
            } else {
                FieldInit::Shorthand(name)
            };
            let span = field_start.merge(self.previous_span());
            fields.push(Spanned::new(init, span));
            if !self.match_punct(PunctuationId::Comma) {
                break;
            }
        }

        let span = start.merge(self.previous_span());
        Ok(Spanned::new(Expr::New { target, fields }, span))
    }
}
