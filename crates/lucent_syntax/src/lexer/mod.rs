//! Lexer for the Lucent programming language.
//!
//! Handles tokenization including:
//! - Keywords and identifiers (maximal munch with reserved-word carve-out)
//! - Integral, string, and rune literals
//! - Registers (`$name`), operators, and punctuation
//! - Indentation-driven block structure (`Open`/`Level`/`Close` tokens)
//!
//! ## Module Structure
//!
//! - `tokens` - Token types (TokenKind, Token)
//! - `strings` - String/rune scanning and escapes
//! - `numbers` - Integral literal scanning
//! - `indent` - Open/Level/Close handling

mod indent;
mod numbers;
mod strings;
pub mod tokens;

pub use tokens::{Token, TokenKind, keyword_id};

use crate::ast::Span;
use crate::diagnostics::CompileError;
use lucent_core::lang::operators::OperatorId;
use lucent_core::lang::punctuation::PunctuationId;

/// Lexer for Lucent source code.
///
/// Converts source text into a stream of tokens. Lexical errors are
/// collected rather than aborting: an unterminated literal is fatal for
/// that literal only, and scanning continues so the rest of the file still
/// produces tokens.
pub struct Lexer<'a> {
    source: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    current_pos: usize,
    indent_stack: Vec<usize>,
    at_line_start: bool,
    /// Bracket depth for implicit line continuation (parens, brackets).
    bracket_depth: usize,
    tokens: Vec<Token>,
    errors: Vec<CompileError>,
}

/// Tokenize Lucent source text.
///
/// Always returns the token stream it managed to produce; lexical and
/// indentation errors are returned alongside instead of replacing it.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn lex(source: &str) -> (Vec<Token>, Vec<CompileError>) {
    Lexer::new(source).tokenize()
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source code.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            current_pos: 0,
            indent_stack: vec![0],
            at_line_start: true,
            bracket_depth: 0,
            tokens: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Tokenize the entire source code.
    ///
    /// The token stream always ends with `Close` tokens for every still-open
    /// block followed by a single `Eof` token.
    pub fn tokenize(mut self) -> (Vec<Token>, Vec<CompileError>) {
        while !self.is_at_end() {
            self.scan_token();
        }

        // End of input closes every level still open.
        while self.indent_stack.len() > 1 {
            self.indent_stack.pop();
            self.tokens.push(Token::new(
                TokenKind::Close,
                Span::new(self.current_pos, self.current_pos),
            ));
        }

        self.tokens.push(Token::new(
            TokenKind::Eof,
            Span::new(self.current_pos, self.current_pos),
        ));

        (self.tokens, self.errors)
    }

    // ========================================================================
    // Core character handling
    // ========================================================================

    fn is_at_end(&mut self) -> bool {
        self.chars.peek().is_none()
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn peek_next(&self) -> Option<char> {
        let mut iter = self.source[self.current_pos..].chars();
        iter.next();
        iter.next()
    }

    fn advance(&mut self) -> Option<char> {
        if let Some((pos, c)) = self.chars.next() {
            self.current_pos = pos + c.len_utf8();
            Some(c)
        } else {
            None
        }
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    // ========================================================================
    // Main scanning dispatch
    // ========================================================================

    fn scan_token(&mut self) {
        // Handle indentation at line start
        if self.at_line_start {
            self.handle_indentation();
            return;
        }

        // Skip whitespace (but not newlines)
        while let Some(c) = self.peek() {
            if c == ' ' || c == '\t' {
                self.advance();
            } else {
                break;
            }
        }

        let start = self.current_pos;

        let Some(c) = self.advance() else {
            return;
        };

        match c {
            // Comments and division
            '/' => {
                if self.match_char('/') {
                    while let Some(c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.advance();
                    }
                } else {
                    self.add_op(OperatorId::Slash, start);
                }
            }

            // Newlines: inside brackets they are implicit continuations and
            // carry no block structure.
            '\n' => {
                if self.bracket_depth == 0 {
                    self.at_line_start = true;
                }
            }
            '\r' => {}

            // Delimiters (tracking depth for implicit continuation)
            '(' => {
                self.bracket_depth += 1;
                self.add_punct(PunctuationId::LParen, start);
            }
            ')' => {
                self.bracket_depth = self.bracket_depth.saturating_sub(1);
                self.add_punct(PunctuationId::RParen, start);
            }
            '[' => {
                self.bracket_depth += 1;
                self.add_punct(PunctuationId::LBracket, start);
            }
            ']' => {
                self.bracket_depth = self.bracket_depth.saturating_sub(1);
                self.add_punct(PunctuationId::RBracket, start);
            }

            // Separators and markers
            ',' => self.add_punct(PunctuationId::Comma, start),
            ':' => self.add_punct(PunctuationId::Colon, start),
            ';' => self.add_punct(PunctuationId::Semicolon, start),
            '.' => self.add_punct(PunctuationId::Dot, start),
            '@' => {
                if self.match_char('@') {
                    self.add_punct(PunctuationId::AtAt, start);
                } else {
                    self.add_punct(PunctuationId::At, start);
                }
            }

            // Registers
            '$' => self.scan_register(start),

            // Literals
            '"' => self.scan_string(start),
            '\'' => self.scan_rune(start),

            // Operators
            '+' => self.add_op(OperatorId::Plus, start),
            '-' => self.add_op(OperatorId::Minus, start),
            '*' => self.add_op(OperatorId::Star, start),
            '%' => self.add_op(OperatorId::Percent, start),
            '^' => self.add_op(OperatorId::Caret, start),
            '#' => self.add_op(OperatorId::Hash, start),
            '&' => {
                if self.match_char('&') {
                    self.add_op(OperatorId::AndAnd, start);
                } else {
                    self.add_op(OperatorId::Amp, start);
                }
            }
            '|' => {
                if self.match_char('|') {
                    self.add_op(OperatorId::OrOr, start);
                } else {
                    self.add_op(OperatorId::Pipe, start);
                }
            }
            '=' => {
                if self.match_char('=') {
                    self.add_op(OperatorId::EqEq, start);
                } else {
                    self.add_op(OperatorId::Eq, start);
                }
            }
            '!' => {
                if self.match_char('=') {
                    self.add_op(OperatorId::NotEq, start);
                } else {
                    self.add_op(OperatorId::Bang, start);
                }
            }
            '<' => {
                if self.match_char('<') {
                    self.add_op(OperatorId::Shl, start);
                } else if self.match_char('=') {
                    self.add_op(OperatorId::LtEq, start);
                } else {
                    self.add_op(OperatorId::Lt, start);
                }
            }
            '>' => {
                if self.match_char('>') {
                    self.add_op(OperatorId::Shr, start);
                } else if self.match_char('=') {
                    self.add_op(OperatorId::GtEq, start);
                } else {
                    self.add_op(OperatorId::Gt, start);
                }
            }

            c if c.is_ascii_digit() => self.scan_integral(start, c),
            c if is_identifier_start(c) => self.scan_identifier(start, c),

            c => {
                self.errors.push(CompileError::lexical(
                    format!("unexpected character '{}'", c),
                    Span::new(start, self.current_pos),
                ));
            }
        }
    }

    // ========================================================================
    // Identifiers and registers
    // ========================================================================

    fn scan_identifier(&mut self, start: usize, first: char) {
        let mut name = String::from(first);
        while let Some(c) = self.peek() {
            if is_identifier_continue(c) {
                name.push(c);
                self.advance();
            } else {
                break;
            }
        }

        // Keyword recognition is a post-hoc check on the maximal match.
        let kind = match keyword_id(&name) {
            Some(id) => TokenKind::Keyword(id),
            None => TokenKind::Ident(name),
        };
        self.add_token(kind, start);
    }

    fn scan_register(&mut self, start: usize) {
        let mut name = String::new();
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() {
                name.push(c);
                self.advance();
            } else {
                break;
            }
        }

        if name.is_empty() {
            self.errors.push(CompileError::lexical(
                "expected register name after '$'",
                Span::new(start, self.current_pos),
            ));
        } else {
            self.add_token(TokenKind::Register(name), start);
        }
    }

    // ========================================================================
    // Token emission helpers
    // ========================================================================

    fn add_token(&mut self, kind: TokenKind, start: usize) {
        self.tokens
            .push(Token::new(kind, Span::new(start, self.current_pos)));
    }

    fn add_op(&mut self, id: OperatorId, start: usize) {
        self.add_token(TokenKind::Operator(id), start);
    }

    fn add_punct(&mut self, id: PunctuationId, start: usize) {
        self.add_token(TokenKind::Punctuation(id), start);
    }
}

fn is_identifier_start(c: char) -> bool {
    c == '_' || c.is_alphabetic()
}

fn is_identifier_continue(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lucent_core::lang::keywords::KeywordId;

    fn kinds(source: &str) -> Vec<TokenKind> {
        let (tokens, errors) = lex(source);
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
        tokens.into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn keywords_are_carved_out_of_identifiers() {
        let kinds = kinds("module moduleX fn fnord");
        assert_eq!(kinds[0], TokenKind::Keyword(KeywordId::Module));
        assert_eq!(kinds[1], TokenKind::Ident("moduleX".into()));
        assert_eq!(kinds[2], TokenKind::Keyword(KeywordId::Fn));
        assert_eq!(kinds[3], TokenKind::Ident("fnord".into()));
    }

    #[test]
    fn operators_use_maximal_munch() {
        let kinds = kinds("< << <= a <<2");
        assert_eq!(kinds[0], TokenKind::Operator(OperatorId::Lt));
        assert_eq!(kinds[1], TokenKind::Operator(OperatorId::Shl));
        assert_eq!(kinds[2], TokenKind::Operator(OperatorId::LtEq));
        assert_eq!(kinds[4], TokenKind::Operator(OperatorId::Shl));
    }

    #[test]
    fn compound_assignment_stays_two_tokens() {
        let kinds = kinds("x += 1");
        assert_eq!(kinds[1], TokenKind::Operator(OperatorId::Plus));
        assert_eq!(kinds[2], TokenKind::Operator(OperatorId::Eq));
    }

    #[test]
    fn registers_require_a_name() {
        let kinds = kinds("$rax");
        assert_eq!(kinds[0], TokenKind::Register("rax".into()));

        let (_, errors) = lex("$ x");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("register"));
    }

    #[test]
    fn annotation_sigils() {
        let kinds = kinds("@align @@entry");
        assert_eq!(kinds[0], TokenKind::Punctuation(PunctuationId::At));
        assert_eq!(kinds[2], TokenKind::Punctuation(PunctuationId::AtAt));
    }

    #[test]
    fn comments_are_discarded() {
        let kinds = kinds("let x // trailing note\n");
        assert_eq!(
            kinds,
            vec![
                TokenKind::Keyword(KeywordId::Let),
                TokenKind::Ident("x".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn blocks_open_separate_and_close() {
        let source = "while x:\n    f()\n    g()\nh()\n";
        let kinds = kinds(source);
        let open = kinds.iter().filter(|k| **k == TokenKind::Open).count();
        let close = kinds.iter().filter(|k| **k == TokenKind::Close).count();
        assert_eq!(open, 1);
        assert_eq!(close, 1);
        // f() and g() are separated by a Level; h() follows the Close.
        let close_at = kinds.iter().position(|k| *k == TokenKind::Close).unwrap();
        assert_eq!(kinds[close_at + 1], TokenKind::Level);
    }

    #[test]
    fn newlines_inside_brackets_are_continuations() {
        let source = "f(a,\n   b)\n";
        let kinds = kinds(source);
        assert!(!kinds.contains(&TokenKind::Open));
        assert!(!kinds.contains(&TokenKind::Close));
    }

    #[test]
    fn eof_closes_all_open_levels() {
        let source = "while a:\n    while b:\n        f()";
        let kinds = kinds(source);
        let close = kinds.iter().filter(|k| **k == TokenKind::Close).count();
        assert_eq!(close, 2);
        assert_eq!(kinds.last(), Some(&TokenKind::Eof));
    }

    #[test]
    fn unexpected_character_is_reported_once() {
        let (tokens, errors) = lex("let ` x");
        assert_eq!(errors.len(), 1);
        // Scanning continues after the bad character.
        assert!(tokens.iter().any(|t| t.kind == TokenKind::Ident("x".into())));
    }
}
