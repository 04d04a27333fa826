/// Statement parsing methods.
impl<'a> Parser<'a> {
    // ========================================================================
    // Statements
    // ========================================================================

    /// `:` followed by an indented statement block, or a single statement
    /// inline on the same line.
    fn statement_block(&mut self, construct: &str) -> Result<Vec<Spanned<Statement>>, CompileError> {
        self.expect_punct(
            PunctuationId::Colon,
            &format!("expected ':' to begin {}", construct),
        )?;

        if !self.match_open() {
            let statement = self.statement()?;
            return Ok(vec![statement]);
        }

        let statements = self.statement_list();
        self.expect_close(construct)?;
        Ok(statements)
    }

    /// Level-separated statements up to the enclosing `Close`, with
    /// per-statement error recovery.
    fn statement_list(&mut self) -> Vec<Spanned<Statement>> {
        let mut statements = Vec::new();
        loop {
            let start = self.current_span();
            match self.statement() {
                Ok(statement) => statements.push(statement),
                Err(e) => {
                    let span = start.merge(e.span);
                    self.errors.push(e);
                    self.synchronize();
                    statements.push(Spanned::new(Statement::Error, span));
                }
            }
            if !self.match_level() {
                break;
            }
        }
        statements
    }

    fn statement(&mut self) -> Result<Spanned<Statement>, CompileError> {
        self.with_depth(Self::statement_inner)
    }

    fn statement_inner(&mut self) -> Result<Spanned<Statement>, CompileError> {
        let start = self.current_span();

        if self.match_keyword(KeywordId::Break) {
            return Ok(Spanned::new(Statement::Break, start));
        }
        if self.match_keyword(KeywordId::Continue) {
            return Ok(Spanned::new(Statement::Continue, start));
        }
        if self.match_keyword(KeywordId::Return) {
            let value = if self.is_at_expr_start() {
                Some(self.expression()?)
            } else {
                None
            };
            let span = start.merge(self.previous_span());
            return Ok(Spanned::new(Statement::Return(value), span));
        }
        if self.match_keyword(KeywordId::While) {
            let condition = self.value(0)?;
            let body = self.statement_block("while body")?;
            let span = start.merge(self.previous_span());
            return Ok(Spanned::new(Statement::While { condition, body }, span));
        }
        if self.match_keyword(KeywordId::Let) {
            return self.let_statement(start);
        }

        // Conditionals and bare blocks are expressions used in statement
        // position.
        if self.check_keyword(KeywordId::When)
            || self.check_keyword(KeywordId::If)
            || self.check_open()
        {
            let value = self.expression()?;
            let span = value.span;
            return Ok(Spanned::new(Statement::Expr(value), span));
        }

        // Everything else starts with a value: a bare expression statement,
        // an assignment, or a compound assignment.
        let target = self.value(0)?;

        if self.match_op(OperatorId::Eq) {
            let value = self.expression()?;
            let span = start.merge(value.span);
            return Ok(Spanned::new(Statement::Set { target, value }, span));
        }

        if let Some(op) = self.compound_operator() {
            self.advance(); // the operator
            self.advance(); // `=`
            let value = self.expression()?;
            let span = start.merge(value.span);
            return Ok(Spanned::new(Statement::Compound { target, op, value }, span));
        }

        let span = target.span;
        Ok(Spanned::new(Statement::Expr(target), span))
    }

    fn let_statement(&mut self, start: Span) -> Result<Spanned<Statement>, CompileError> {
        let name = self.identifier()?;
        let ty = if self.match_punct(PunctuationId::Colon) {
            Some(self.type_expr()?)
        } else {
            None
        };
        let value = if self.match_op(OperatorId::Eq) {
            Some(self.expression()?)
        } else {
            None
        };
        let span = start.merge(self.previous_span());
        if ty.is_none() && value.is_none() {
            return Err(CompileError::structural(
                format!("binding '{}' needs a type annotation or an initial value", name),
                span,
            ));
        }
        Ok(Spanned::new(Statement::Let { name, ty, value }, span))
    }

    /// If the stream sits on `OP =` where OP admits compound assignment,
    /// return the operator without consuming anything.
    fn compound_operator(&self) -> Option<BinaryOp> {
        if !self.peek_next().kind.is_operator(OperatorId::Eq) {
            return None;
        }
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
            _ => None,
        }
    }
}
