//! Indentation handling for the Lucent lexer.
//!
//! Maintains the indentation-column stack and emits the three synthetic
//! block tokens: `Open` when a line is deeper than the current level,
//! `Level` when it sits at the current level, and one `Close` per level
//! popped when it is shallower. A dedent landing between stack entries is
//! an indentation error, recovered by snapping to the nearest enclosing
//! level.

use super::Lexer;
use super::tokens::{Token, TokenKind};
use crate::ast::Span;
use crate::diagnostics::CompileError;

impl<'a> Lexer<'a> {
    pub(super) fn handle_indentation(&mut self) {
        let start = self.current_pos;
        let mut indent = 0;

        // Count leading whitespace; skip blank and comment-only lines
        // entirely so they never affect block structure.
        while let Some(c) = self.peek() {
            match c {
                ' ' => {
                    indent += 1;
                    self.advance();
                }
                '\t' => {
                    // Tabs count as 4 columns
                    indent += 4;
                    self.advance();
                }
                '/' if self.peek_next() == Some('/') => {
                    while let Some(c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.advance();
                    }
                    if self.peek() == Some('\n') {
                        self.advance();
                    }
                    return; // Stay at line start
                }
                '\n' => {
                    self.advance();
                    return; // Blank line - stay at line start
                }
                '\r' => {
                    self.advance();
                }
                _ => break,
            }
        }

        if self.is_at_end() {
            self.at_line_start = false;
            return;
        }

        let span = Span::new(start, self.current_pos);
        let current_indent = *self.indent_stack.last().unwrap_or(&0);

        if indent > current_indent {
            self.indent_stack.push(indent);
            self.tokens.push(Token::new(TokenKind::Open, span));
        } else if indent < current_indent {
            // Pop and close every level passed through
            while let Some(&top) = self.indent_stack.last() {
                if indent >= top {
                    break;
                }
                self.indent_stack.pop();
                self.tokens.push(Token::new(TokenKind::Close, span));
                if self.indent_stack.is_empty() {
                    self.indent_stack.push(0);
                    break;
                }
            }

            // Verify we landed on a level that is actually on the stack
            let final_indent = *self.indent_stack.last().unwrap_or(&0);
            if indent != final_indent {
                self.errors.push(CompileError::indentation(
                    format!(
                        "inconsistent dedent: expected {} columns, got {}",
                        final_indent, indent
                    ),
                    span,
                ));
            }

            // The landing line continues the enclosing block
            self.tokens.push(Token::new(TokenKind::Level, span));
        } else if !self.tokens.is_empty() {
            self.tokens.push(Token::new(TokenKind::Level, span));
        }

        self.at_line_start = false;
    }
}

#[cfg(test)]
mod tests {
    use crate::lexer::{TokenKind, lex};

    #[test]
    fn same_level_lines_emit_separators() {
        let (tokens, errors) = lex("a\nb\nc\n");
        assert!(errors.is_empty());
        let levels = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Level)
            .count();
        assert_eq!(levels, 2);
    }

    #[test]
    fn blank_and_comment_lines_are_invisible() {
        let (with, _) = lex("a\n\n// note\nb\n");
        let (without, _) = lex("a\nb\n");
        let kinds = |ts: &[crate::lexer::Token]| {
            ts.iter().map(|t| t.kind.clone()).collect::<Vec<_>>()
        };
        assert_eq!(kinds(&with), kinds(&without));
    }

    #[test]
    fn dedent_closes_every_level_passed_through() {
        let source = "a:\n    b:\n        c\nd\n";
        let (tokens, errors) = lex(source);
        assert!(errors.is_empty());
        // Dropping from two nested levels to the top closes both at once.
        let mut closes_in_a_row = 0;
        let mut max_run = 0;
        for t in &tokens {
            if t.kind == TokenKind::Close {
                closes_in_a_row += 1;
                max_run = max_run.max(closes_in_a_row);
            } else {
                closes_in_a_row = 0;
            }
        }
        assert_eq!(max_run, 2);
    }

    #[test]
    fn mismatched_dedent_is_an_indentation_error() {
        let source = "a:\n        b\n    c\n";
        let (_, errors) = lex(source);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("dedent"));
    }

    #[test]
    fn tabs_count_as_four_columns() {
        let (tabbed, e1) = lex("a:\n\tb\n");
        let (spaced, e2) = lex("a:\n    b\n");
        assert!(e1.is_empty() && e2.is_empty());
        let kinds = |ts: Vec<crate::lexer::Token>| {
            ts.into_iter().map(|t| t.kind).collect::<Vec<_>>()
        };
        assert_eq!(kinds(tabbed), kinds(spaced));
    }
}
