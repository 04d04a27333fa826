//! Integral literal scanning for the Lucent lexer.
//!
//! Lucent integrals come in binary (`0b`), octal (`0o`), hexadecimal (`0x`),
//! and decimal forms. Interior `'` grouping separators are allowed but must
//! be surrounded by digits on both sides. Literals are always non-negative;
//! a leading `-` is the prefix negation operator.

use super::Lexer;
use super::tokens::TokenKind;
use crate::ast::Span;
use crate::diagnostics::CompileError;

impl<'a> Lexer<'a> {
    pub(super) fn scan_integral(&mut self, start: usize, first: char) {
        let (radix, mut digits) = if first == '0' {
            match self.peek() {
                Some('b') => {
                    self.advance();
                    (2, String::new())
                }
                Some('o') => {
                    self.advance();
                    (8, String::new())
                }
                Some('x') => {
                    self.advance();
                    (16, String::new())
                }
                _ => (10, String::from(first)),
            }
        } else {
            (10, String::from(first))
        };

        let mut previous_was_digit = radix == 10;
        let mut dangling_separator = false;

        while let Some(c) = self.peek() {
            if c == '\'' {
                if !previous_was_digit {
                    self.errors.push(CompileError::lexical(
                        "digit separator must follow a digit",
                        Span::new(start, self.current_pos),
                    ));
                }
                self.advance();
                previous_was_digit = false;
                dangling_separator = true;
            } else if c.is_digit(radix) {
                digits.push(c);
                self.advance();
                previous_was_digit = true;
                dangling_separator = false;
            } else {
                break;
            }
        }

        if dangling_separator {
            self.errors.push(CompileError::lexical(
                "digit separator may not end a literal",
                Span::new(start, self.current_pos),
            ));
        }

        // Swallow any trailing word characters so `0b102` reports one error
        // instead of splitting into a literal plus a stray identifier.
        if self.peek().is_some_and(|c| c.is_ascii_alphanumeric()) {
            let bad_start = self.current_pos;
            while self.peek().is_some_and(|c| c.is_ascii_alphanumeric()) {
                self.advance();
            }
            self.errors.push(CompileError::lexical(
                format!(
                    "invalid digit '{}' in base-{} literal",
                    &self.source[bad_start..self.current_pos],
                    radix
                ),
                Span::new(start, self.current_pos),
            ));
            return;
        }

        if digits.is_empty() {
            self.errors.push(CompileError::lexical(
                format!("missing digits in base-{} literal", radix),
                Span::new(start, self.current_pos),
            ));
            return;
        }

        match i128::from_str_radix(&digits, radix) {
            Ok(value) => self.add_token(TokenKind::Integral(value), start),
            Err(_) => {
                self.errors.push(CompileError::lexical(
                    format!("integer literal out of range: {}", digits),
                    Span::new(start, self.current_pos),
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::lexer::{TokenKind, lex};

    fn single_integral(source: &str) -> i128 {
        let (tokens, errors) = lex(source);
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
        match &tokens[0].kind {
            TokenKind::Integral(v) => *v,
            other => panic!("expected integral, got {other:?}"),
        }
    }

    #[test]
    fn all_four_bases() {
        assert_eq!(single_integral("42"), 42);
        assert_eq!(single_integral("0b1010"), 10);
        assert_eq!(single_integral("0o17"), 15);
        assert_eq!(single_integral("0xff"), 255);
        assert_eq!(single_integral("0xFF"), 255);
    }

    #[test]
    fn separators_are_stripped() {
        assert_eq!(single_integral("1'000'000"), 1_000_000);
        assert_eq!(single_integral("0b1111'0000"), 0xF0);
    }

    #[test]
    fn dangling_separators_are_rejected() {
        let (_, errors) = lex("1'");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("separator"));

        let (_, errors) = lex("0x'1f");
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn out_of_range_digits_are_one_error() {
        let (tokens, errors) = lex("0b102 x");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("invalid digit"));
        // The stray characters are swallowed; scanning resumes afterwards.
        assert!(tokens.iter().any(|t| t.kind == TokenKind::Ident("x".into())));
    }

    #[test]
    fn missing_digits_after_prefix() {
        let (_, errors) = lex("0x ");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("missing digits"));
    }
}