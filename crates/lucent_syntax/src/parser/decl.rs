/// Declaration parsing methods.
///
/// This chunk parses top-level and module-nested items: modules, functions,
/// statics, data aggregates, `use`/`load` imports, and annotations.
impl<'a> Parser<'a> {
    // ========================================================================
    // Items
    // ========================================================================

    fn item(&mut self) -> Result<Spanned<Item>, CompileError> {
        self.with_depth(Self::item_inner)
    }

    fn item_inner(&mut self) -> Result<Spanned<Item>, CompileError> {
        let start = self.current_span();

        // `@@name value` - process-wide annotation, not attached to an item.
        if self.match_punct(PunctuationId::AtAt) {
            let name = self.identifier()?;
            let value = self.value(0)?;
            let span = start.merge(value.span);
            return Ok(Spanned::new(
                Item::GlobalAnnotation(Annotation { name, value }),
                span,
            ));
        }

        let annotations = self.annotations()?;

        if self.check_keyword(KeywordId::Module) {
            return self.module_decl(annotations, start);
        }
        if self.check_keyword(KeywordId::Use) {
            return self.use_decl(annotations, start);
        }
        if self.check_keyword(KeywordId::Load) {
            return self.load_decl(annotations, start);
        }
        if self.check_keyword(KeywordId::Static) {
            return self.static_decl(annotations, start);
        }
        if self.check_keyword(KeywordId::Data) {
            return self.data_decl(annotations, start);
        }
        if self.check_keyword(KeywordId::Fn)
            || self.check_keyword(KeywordId::Root)
            || self.at_convention_fn()
        {
            return self.function_decl(annotations, start);
        }

        Err(CompileError::expected_in(
            "declaration",
            &["module", "fn", "data", "static", "use", "load", "@"],
            self.peek().kind.describe(),
            self.current_span(),
        ))
    }

    /// `true` if the stream sits on `convention fn ...`.
    fn at_convention_fn(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Ident(_))
            && self.peek_next().kind.is_keyword(KeywordId::Fn)
    }

    /// Zero or more `@name value` annotations, each optionally on its own
    /// line, in source order.
    fn annotations(&mut self) -> Result<Vec<Spanned<Annotation>>, CompileError> {
        let mut annotations = Vec::new();
        while self.check_punct(PunctuationId::At) {
            let start = self.current_span();
            self.advance();
            let name = self.identifier()?;
            let value = self.value(0)?;
            let span = start.merge(value.span);
            annotations.push(Spanned::new(Annotation { name, value }, span));
            self.skip_levels();
        }
        Ok(annotations)
    }

    // ========================================================================
    // Modules
    // ========================================================================

    fn module_decl(
        &mut self,
        annotations: Vec<Spanned<Annotation>>,
        start: Span,
    ) -> Result<Spanned<Item>, CompileError> {
        self.advance(); // `module`
        let name = self.identifier()?;
        let items = self.item_block("module body")?;
        let span = start.merge(self.previous_span());
        Ok(Spanned::new(
            Item::Module(ModuleDecl {
                annotations,
                name,
                items,
            }),
            span,
        ))
    }

    /// `:` followed by an indented item block, or a single item inline on
    /// the same line (`module A: module B: fn f() = 0`).
    fn item_block(&mut self, construct: &str) -> Result<Vec<Spanned<Item>>, CompileError> {
        self.expect_punct(
            PunctuationId::Colon,
            &format!("expected ':' to begin {}", construct),
        )?;

        if !self.match_open() {
            let item = self.item()?;
            return Ok(vec![item]);
        }

        let mut items = Vec::new();
        loop {
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
            if !self.match_level() {
                break;
            }
        }
        self.expect_close(construct)?;
        Ok(items)
    }

    // ========================================================================
    // Functions
    // ========================================================================

    fn function_decl(
        &mut self,
        annotations: Vec<Spanned<Annotation>>,
        start: Span,
    ) -> Result<Spanned<Item>, CompileError> {
        let is_root = self.match_keyword(KeywordId::Root);
        let convention = if self.at_convention_fn() {
            Some(self.identifier()?)
        } else {
            None
        };
        self.expect_keyword(KeywordId::Fn, "expected 'fn' in function declaration")?;
        let name = self.identifier()?;

        self.expect_punct(PunctuationId::LParen, "expected '(' after function name")?;
        let parameters = self.parameter_list()?;
        self.expect_punct(PunctuationId::RParen, "expected ')' after parameters")?;

        let return_type = self.return_spec()?;

        let body = if self.match_op(OperatorId::Eq) {
            // `= expr` shorthand: a block containing a single return.
            let value = self.expression()?;
            let span = value.span;
            vec![Spanned::new(Statement::Return(Some(value)), span)]
        } else {
            self.statement_block("function body")?
        };

        let span = start.merge(self.previous_span());
        Ok(Spanned::new(
            Item::Function(FunctionDecl {
                annotations,
                is_root,
                convention,
                name,
                parameters,
                return_type,
                body,
            }),
            span,
        ))
    }

    /// Comma-separated parameters, trailing comma allowed. Named `name:type`
    /// pairs and raw registers may mix freely in one list.
    fn parameter_list(&mut self) -> Result<Vec<Spanned<Parameter>>, CompileError> {
        let mut parameters = Vec::new();
        while !self.check_punct(PunctuationId::RParen) && !self.is_at_end() {
            let start = self.current_span();
            let parameter = if let TokenKind::Register(name) = &self.peek().kind {
                let name = name.clone();
                self.advance();
                Parameter::Register(name)
            } else {
                let name = self.identifier()?;
                self.expect_punct(PunctuationId::Colon, "expected ':' after parameter name")?;
                let ty = self.type_expr()?;
                Parameter::Named { name, ty }
            };
            let span = start.merge(self.previous_span());
            parameters.push(Spanned::new(parameter, span));
            if !self.match_punct(PunctuationId::Comma) {
                break;
            }
        }
        Ok(parameters)
    }

    /// Optional return specification: a register or a type. One slot.
    fn return_spec(&mut self) -> Result<Option<Spanned<ReturnType>>, CompileError> {
        let start = self.current_span();
        if let TokenKind::Register(name) = &self.peek().kind {
            let name = name.clone();
            self.advance();
            return Ok(Some(Spanned::new(ReturnType::Register(name), start)));
        }
        if self.is_at_type_start() {
            let ty = self.type_expr()?;
            let span = ty.span;
            return Ok(Some(Spanned::new(ReturnType::Type(ty), span)));
        }
        Ok(None)
    }

    // ========================================================================
    // Statics and data
    // ========================================================================

    fn static_decl(
        &mut self,
        annotations: Vec<Spanned<Annotation>>,
        start: Span,
    ) -> Result<Spanned<Item>, CompileError> {
        self.advance(); // `static`
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
                format!("static '{}' needs a type annotation or an initial value", name),
                span,
            ));
        }

        Ok(Spanned::new(
            Item::Static(StaticDecl {
                annotations,
                name,
                ty,
                value,
            }),
            span,
        ))
    }

    fn data_decl(
        &mut self,
        annotations: Vec<Spanned<Annotation>>,
        start: Span,
    ) -> Result<Spanned<Item>, CompileError> {
        self.advance(); // `data`
        let name = self.identifier()?;
        self.expect_punct(PunctuationId::Colon, "expected ':' after data name")?;

        let mut fields = Vec::new();
        if self.match_open() {
            loop {
                fields.push(self.field()?);
                if !self.match_level() {
                    break;
                }
            }
            self.expect_close("data body")?;
        } else {
            fields.push(self.field()?);
        }

        let span = start.merge(self.previous_span());
        Ok(Spanned::new(
            Item::Data(DataDecl {
                annotations,
                name,
                fields,
            }),
            span,
        ))
    }

    fn field(&mut self) -> Result<Spanned<Field>, CompileError> {
        let start = self.current_span();
        let name = self.identifier()?;
        self.expect_punct(PunctuationId::Colon, "expected ':' after field name")?;
        let ty = self.type_expr()?;
        let span = start.merge(ty.span);
        Ok(Spanned::new(Field { name, ty }, span))
    }

    // ========================================================================
    // Imports
    // ========================================================================

    fn use_decl(
        &mut self,
        annotations: Vec<Spanned<Annotation>>,
        start: Span,
    ) -> Result<Spanned<Item>, CompileError> {
        self.advance(); // `use`

        let target = if matches!(self.peek().kind, TokenKind::String(_)) {
            let path = self.string_literal()?;
            let with = if self.match_keyword(KeywordId::With) {
                Some(self.string_literal()?)
            } else {
                None
            };
            UseTarget::Quoted { path, with }
        } else {
            let mut segments = vec![self.identifier()?];
            let mut wildcard = false;
            while self.match_punct(PunctuationId::Dot) {
                if self.match_op(OperatorId::Star) {
                    wildcard = true;
                    break;
                }
                segments.push(self.identifier()?);
            }
            UseTarget::Path {
                path: Path::new(segments),
                wildcard,
            }
        };

        let alias = if self.match_keyword(KeywordId::As) {
            Some(self.identifier()?)
        } else {
            None
        };

        let span = start.merge(self.previous_span());
        Ok(Spanned::new(
            Item::Use(UseDecl {
                annotations,
                target,
                alias,
            }),
            span,
        ))
    }

    fn load_decl(
        &mut self,
        annotations: Vec<Spanned<Annotation>>,
        start: Span,
    ) -> Result<Spanned<Item>, CompileError> {
        self.advance(); // `load`

        let mut segments = vec![self.identifier()?];
        let mut ordinal = None;
        while self.match_punct(PunctuationId::Dot) {
            if let TokenKind::Integral(n) = self.peek().kind {
                // Import by ordinal index; nothing may follow it.
                self.advance();
                ordinal = Some(n);
                break;
            }
            segments.push(self.identifier()?);
        }
        let target = LoadTarget {
            path: Path::new(segments),
            ordinal,
        };

        self.expect_keyword(KeywordId::As, "expected 'as' after load target")?;
        let binding = self.load_binding()?;

        let span = start.merge(self.previous_span());
        Ok(Spanned::new(
            Item::Load(LoadDecl {
                annotations,
                target,
                binding,
            }),
            span,
        ))
    }

    /// The local shape a loaded symbol is bound under: a typed variable or a
    /// named function signature.
    fn load_binding(&mut self) -> Result<LoadBinding, CompileError> {
        if matches!(self.peek().kind, TokenKind::Ident(_))
            && self.peek_next().kind.is_punctuation(PunctuationId::Colon)
        {
            let name = self.identifier()?;
            self.advance(); // `:`
            let ty = self.type_expr()?;
            return Ok(LoadBinding::Variable { name, ty });
        }

        if self.check_keyword(KeywordId::Fn) || self.at_convention_fn() {
            let convention = if self.at_convention_fn() {
                Some(self.identifier()?)
            } else {
                None
            };
            self.advance(); // `fn`
            let name = self.identifier()?;
            self.expect_punct(PunctuationId::LParen, "expected '(' in load signature")?;
            let parameters = self.type_list(PunctuationId::RParen)?;
            self.expect_punct(PunctuationId::RParen, "expected ')' in load signature")?;
            let return_type = self.return_spec()?.map(Box::new);
            return Ok(LoadBinding::Function(Signature {
                convention,
                name,
                parameters,
                return_type,
            }));
        }

        Err(CompileError::expected_in(
            "load binding",
            &["name: type", "fn"],
            self.peek().kind.describe(),
            self.current_span(),
        ))
    }
}
