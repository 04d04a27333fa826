/// Public parsing entrypoint.
///
/// Parse a token stream into a [`Program`], collecting errors instead of
/// stopping at the first one. Constructs that fail to parse are represented
/// in the tree as explicit `Error` placeholder nodes.
#[tracing::instrument(skip_all, fields(token_count = tokens.len()))]
pub fn parse(tokens: &[Token]) -> (Program, Vec<CompileError>) {
    let (program, errors) = Parser::new(tokens).parse();
    if !errors.is_empty() {
        tracing::debug!(error_count = errors.len(), "parsing finished with errors");
    }
    (program, errors)
}
