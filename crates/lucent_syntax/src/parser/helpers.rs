/// Token-stream helpers and error recovery.
///
/// This chunk contains the low-level primitives used throughout parsing:
/// - Peeking/consuming tokens (`peek`, `advance`)
/// - Matching / expecting keywords, operators, and punctuation
/// - Layout handling (`skip_levels`, `skip_closes`)
/// - Error recovery (`synchronize`)
impl<'a> Parser<'a> {
    // ========================================================================
    // Helpers
    // ========================================================================

    /// Return `true` if the current token is [`TokenKind::Eof`].
    fn is_at_end(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Eof)
    }

    /// Return the current token without consuming it.
    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    /// Return the token after the current token without consuming it.
    fn peek_next(&self) -> &Token {
        if self.pos + 1 < self.tokens.len() {
            &self.tokens[self.pos + 1]
        } else {
            &self.tokens[self.tokens.len() - 1]
        }
    }

    /// Advance to the next token and return the token we just consumed.
    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.pos += 1;
        }
        &self.tokens[self.pos - 1]
    }

    fn check_keyword(&self, id: KeywordId) -> bool {
        self.peek().kind.is_keyword(id)
    }

    fn check_punct(&self, id: PunctuationId) -> bool {
        self.peek().kind.is_punctuation(id)
    }

    fn check_op(&self, id: OperatorId) -> bool {
        self.peek().kind.is_operator(id)
    }

    fn check_open(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Open)
    }

    fn match_keyword(&mut self, id: KeywordId) -> bool {
        if self.check_keyword(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn match_punct(&mut self, id: PunctuationId) -> bool {
        if self.check_punct(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn match_op(&mut self, id: OperatorId) -> bool {
        if self.check_op(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn match_open(&mut self) -> bool {
        if self.check_open() {
            self.advance();
            true
        } else {
            false
        }
    }

    fn match_level(&mut self) -> bool {
        if matches!(self.peek().kind, TokenKind::Level) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect_keyword(&mut self, id: KeywordId, msg: &str) -> Result<&Token, CompileError> {
        if self.check_keyword(id) {
            Ok(self.advance())
        } else {
            Err(CompileError::syntax(
                format!("{}, found {}", msg, self.peek().kind.describe()),
                self.peek().span,
            ))
        }
    }

    fn expect_punct(&mut self, id: PunctuationId, msg: &str) -> Result<&Token, CompileError> {
        if self.check_punct(id) {
            Ok(self.advance())
        } else {
            Err(CompileError::syntax(
                format!("{}, found {}", msg, self.peek().kind.describe()),
                self.peek().span,
            ))
        }
    }

    fn expect_open(&mut self, msg: &str) -> Result<&Token, CompileError> {
        if self.check_open() {
            Ok(self.advance())
        } else {
            Err(CompileError::syntax(
                format!("{}, found {}", msg, self.peek().kind.describe()),
                self.peek().span,
            ))
        }
    }

    fn expect_close(&mut self, construct: &str) -> Result<&Token, CompileError> {
        if matches!(self.peek().kind, TokenKind::Close) {
            Ok(self.advance())
        } else {
            Err(CompileError::syntax(
                format!(
                    "expected end of {} block, found {}",
                    construct,
                    self.peek().kind.describe()
                ),
                self.peek().span,
            ))
        }
    }

    fn skip_levels(&mut self) {
        while self.match_level() {}
    }

    /// Skip stray Close tokens at the current position.
    ///
    /// These should not normally appear at the top level, but recovery can
    /// leave us positioned on them.
    fn skip_closes(&mut self) {
        while matches!(self.peek().kind, TokenKind::Close) {
            self.advance();
        }
    }

    /// Skip ahead to the next statement/item boundary at the same or an
    /// enclosing indentation level.
    ///
    /// Stops *before* the boundary token (`Level` at the entry depth, an
    /// unmatched `Close`, or end of input) so the caller's separator loop
    /// stays in charge of consuming it.
    fn synchronize(&mut self) {
        let mut depth = 0usize;
        while !self.is_at_end() {
            match &self.peek().kind {
                TokenKind::Open => depth += 1,
                TokenKind::Close => {
                    if depth == 0 {
                        return;
                    }
                    depth -= 1;
                }
                TokenKind::Level if depth == 0 => return,
                _ => {}
            }
            self.advance();
        }
    }

    fn current_span(&self) -> Span {
        self.peek().span
    }

    fn previous_span(&self) -> Span {
        if self.pos > 0 {
            self.tokens[self.pos - 1].span
        } else {
            self.current_span()
        }
    }

    /// Check if the current token can start an expression.
    fn is_at_expr_start(&self) -> bool {
        matches!(
            self.peek().kind,
            TokenKind::Ident(_)
                | TokenKind::Integral(_)
                | TokenKind::String(_)
                | TokenKind::Rune(_)
                | TokenKind::Register(_)
                | TokenKind::Open
        ) || self.check_keyword(KeywordId::True)
            || self.check_keyword(KeywordId::False)
            || self.check_keyword(KeywordId::New)
            || self.check_keyword(KeywordId::When)
            || self.check_keyword(KeywordId::If)
            || self.check_keyword(KeywordId::Inline)
            || self.check_punct(PunctuationId::LParen)
            || self.check_punct(PunctuationId::LBracket)
            || self.check_op(OperatorId::Minus)
            || self.check_op(OperatorId::Bang)
            || self.check_op(OperatorId::Amp)
            || self.check_op(OperatorId::Hash)
    }

    /// Check if the current token can start a type expression.
    fn is_at_type_start(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Ident(_))
            || self.check_keyword(KeywordId::Fn)
            || self.check_op(OperatorId::Star)
            || self.check_punct(PunctuationId::LBracket)
    }
}
