/// Small terminal parsers shared by the other chunks.
impl<'a> Parser<'a> {
    fn identifier(&mut self) -> Result<Ident, CompileError> {
        if let TokenKind::Ident(name) = &self.peek().kind {
            let name = name.clone();
            self.advance();
            Ok(name)
        } else {
            Err(CompileError::syntax(
                format!("expected a name, found {}", self.peek().kind.describe()),
                self.current_span(),
            ))
        }
    }

    fn string_literal(&mut self) -> Result<String, CompileError> {
        if let TokenKind::String(value) = &self.peek().kind {
            let value = value.clone();
            self.advance();
            Ok(value)
        } else {
            Err(CompileError::syntax(
                format!(
                    "expected a string literal, found {}",
                    self.peek().kind.describe()
                ),
                self.current_span(),
            ))
        }
    }
}
