//! String and rune scanning for the Lucent lexer.
//!
//! Both literal forms use C-style backslash escapes. A malformed escape or a
//! missing terminator is fatal for the enclosing literal but never for the
//! file: the error is recorded and scanning resumes on the same line (or at
//! the newline, which is left in place so block structure survives).

use super::Lexer;
use super::tokens::TokenKind;
use crate::ast::Span;
use crate::diagnostics::CompileError;

impl<'a> Lexer<'a> {
    pub(super) fn scan_string(&mut self, start: usize) {
        let mut value = String::new();

        loop {
            match self.peek() {
                None | Some('\n') => {
                    self.errors.push(CompileError::lexical(
                        "unterminated string literal",
                        Span::new(start, self.current_pos),
                    ));
                    break;
                }
                Some('"') => {
                    self.advance();
                    break;
                }
                Some('\\') => {
                    self.advance();
                    if let Some(c) = self.scan_escape(start) {
                        value.push(c);
                    }
                }
                Some(c) => {
                    value.push(c);
                    self.advance();
                }
            }
        }

        // Emit what we have even on error so the parser can keep going.
        self.add_token(TokenKind::String(value), start);
    }

    pub(super) fn scan_rune(&mut self, start: usize) {
        let value = match self.peek() {
            None | Some('\n') => {
                self.errors.push(CompileError::lexical(
                    "unterminated rune literal",
                    Span::new(start, self.current_pos),
                ));
                return;
            }
            Some('\'') => {
                self.advance();
                self.errors.push(CompileError::lexical(
                    "empty rune literal",
                    Span::new(start, self.current_pos),
                ));
                return;
            }
            Some('\\') => {
                self.advance();
                self.scan_escape(start)
            }
            Some(c) => {
                self.advance();
                Some(c)
            }
        };

        if self.peek() == Some('\'') {
            self.advance();
        } else {
            self.errors.push(CompileError::lexical(
                "unterminated rune literal",
                Span::new(start, self.current_pos),
            ));
        }

        if let Some(c) = value {
            self.add_token(TokenKind::Rune(c), start);
        }
    }

    /// Scan one escape sequence, the backslash already consumed.
    fn scan_escape(&mut self, literal_start: usize) -> Option<char> {
        let Some(c) = self.advance() else {
            self.errors.push(CompileError::lexical(
                "unterminated escape sequence",
                Span::new(literal_start, self.current_pos),
            ));
            return None;
        };
        self.unescape(c, literal_start)
    }

    /// Resolve a single escape character, handling `\xNN` byte escapes.
    fn unescape(&mut self, c: char, literal_start: usize) -> Option<char> {
        match c {
            'n' => Some('\n'),
            't' => Some('\t'),
            'r' => Some('\r'),
            '0' => Some('\0'),
            '\\' => Some('\\'),
            '\'' => Some('\''),
            '"' => Some('"'),
            'x' => {
                let mut byte = 0u32;
                for _ in 0..2 {
                    match self.peek().and_then(|h| h.to_digit(16)) {
                        Some(d) => {
                            byte = byte * 16 + d;
                            self.advance();
                        }
                        None => {
                            self.errors.push(CompileError::lexical(
                                "expected two hex digits after '\\x'",
                                Span::new(literal_start, self.current_pos),
                            ));
                            return None;
                        }
                    }
                }
                char::from_u32(byte)
            }
            other => {
                self.errors.push(CompileError::lexical(
                    format!("invalid escape sequence '\\{}'", other),
                    Span::new(literal_start, self.current_pos),
                ));
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::lexer::{TokenKind, lex};

    fn single_string(source: &str) -> String {
        let (tokens, errors) = lex(source);
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
        match &tokens[0].kind {
            TokenKind::String(s) => s.clone(),
            other => panic!("expected string, got {other:?}"),
        }
    }

    #[test]
    fn plain_and_escaped_strings() {
        assert_eq!(single_string(r#""hello""#), "hello");
        assert_eq!(single_string(r#""a\tb\n""#), "a\tb\n");
        assert_eq!(single_string(r#""quote: \"hi\"""#), "quote: \"hi\"");
        assert_eq!(single_string(r#""\x41""#), "A");
    }

    #[test]
    fn runes() {
        let (tokens, errors) = lex("'a' '\\n' '\\''");
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
        assert_eq!(tokens[0].kind, TokenKind::Rune('a'));
        assert_eq!(tokens[1].kind, TokenKind::Rune('\n'));
        assert_eq!(tokens[2].kind, TokenKind::Rune('\''));
    }

    #[test]
    fn unterminated_string_is_recoverable() {
        let (tokens, errors) = lex("\"oops\nlet x = 1\n");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("unterminated string"));
        // The rest of the file still tokenizes.
        assert!(tokens.iter().any(|t| t.kind == TokenKind::Ident("x".into())));
    }

    #[test]
    fn invalid_escape_is_one_error() {
        let (tokens, errors) = lex(r#""a\qb""#);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("invalid escape"));
        // The literal survives minus the bad escape.
        assert_eq!(tokens[0].kind, TokenKind::String("ab".into()));
    }

    #[test]
    fn empty_rune_is_an_error() {
        let (_, errors) = lex("''");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("empty rune"));
    }
}
