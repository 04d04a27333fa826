//! Diagnostics for the Lucent front end.
//!
//! [`CompileError`] is the internal value type collected during lexing and
//! parsing; [`Report`] is the user-facing miette diagnostic the CLI renders
//! with source context.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::ast::Span;

/// Error taxonomy for the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Unterminated literal, invalid escape, invalid numeral grouping.
    Lexical,
    /// Inconsistent dedent reported by the indentation scanner.
    Indentation,
    /// Unexpected token at a grammar position.
    Syntax,
    /// Grammar-shape violation the recursive descent cannot rule out, e.g.
    /// a `static` with neither type nor initializer.
    Structural,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Lexical => write!(f, "lexical error"),
            ErrorKind::Indentation => write!(f, "indentation error"),
            ErrorKind::Syntax => write!(f, "syntax error"),
            ErrorKind::Structural => write!(f, "structural error"),
        }
    }
}

/// A compile-time error with location information.
#[derive(Debug, Clone, PartialEq)]
pub struct CompileError {
    pub kind: ErrorKind,
    pub message: String,
    pub span: Span,
    /// Spellings the parser would have accepted at this position, if known.
    pub expected: Vec<String>,
}

impl CompileError {
    pub fn lexical(message: impl Into<String>, span: Span) -> Self {
        Self {
            kind: ErrorKind::Lexical,
            message: message.into(),
            span,
            expected: Vec::new(),
        }
    }

    pub fn indentation(message: impl Into<String>, span: Span) -> Self {
        Self {
            kind: ErrorKind::Indentation,
            message: message.into(),
            span,
            expected: Vec::new(),
        }
    }

    pub fn syntax(message: impl Into<String>, span: Span) -> Self {
        Self {
            kind: ErrorKind::Syntax,
            message: message.into(),
            span,
            expected: Vec::new(),
        }
    }

    pub fn structural(message: impl Into<String>, span: Span) -> Self {
        Self {
            kind: ErrorKind::Structural,
            message: message.into(),
            span,
            expected: Vec::new(),
        }
    }

    /// Syntax error naming the current construct and the expected tokens.
    pub fn expected_in(
        construct: &str,
        expected: &[&str],
        found: impl std::fmt::Display,
        span: Span,
    ) -> Self {
        let list = expected.join("`, `");
        Self {
            kind: ErrorKind::Syntax,
            message: format!("in {construct}: expected `{list}`, found {found}"),
            span,
            expected: expected.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Convert into a renderable report with the named source attached.
    pub fn into_report(self, file_name: &str, source: &str) -> Report {
        let len = self.span.end.saturating_sub(self.span.start).max(1);
        let help = if self.expected.is_empty() {
            None
        } else {
            Some(format!("expected one of: `{}`", self.expected.join("`, `")))
        };
        Report {
            message: self.message,
            kind: self.kind,
            src: NamedSource::new(file_name, source.to_string()),
            at: (self.span.start, len).into(),
            help,
        }
    }
}

impl std::fmt::Display for CompileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

/// User-facing diagnostic with source context, rendered by miette.
///
/// The source field is named `src`: thiserror treats a field named `source`
/// as the error cause, and `NamedSource` is not an error type.
#[derive(Debug, Error, Diagnostic)]
#[error("{kind}: {message}")]
pub struct Report {
    pub message: String,
    pub kind: ErrorKind,
    #[source_code]
    pub src: NamedSource<String>,
    #[label("here")]
    pub at: SourceSpan,
    #[help]
    pub help: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expected_in_records_the_token_set() {
        let err = CompileError::expected_in(
            "static declaration",
            &[":", "="],
            "`fn`",
            Span::new(3, 5),
        );
        assert_eq!(err.kind, ErrorKind::Syntax);
        assert_eq!(err.expected, vec![":".to_string(), "=".to_string()]);
        assert!(err.message.contains("static declaration"));
    }

    #[test]
    fn report_is_a_standalone_error() {
        let err = CompileError::syntax("expected a name", Span::new(0, 2));
        let report = err.into_report("demo.lc", "?? x");
        assert_eq!(report.src.name(), "demo.lc");
        // The attached source text is context, not a cause chain.
        let as_std: &dyn std::error::Error = &report;
        assert!(as_std.source().is_none());
    }

    #[test]
    fn report_keeps_the_span() {
        let err = CompileError::lexical("unterminated string literal", Span::new(4, 9));
        let report = err.into_report("demo.lc", "let s = \"oops");
        assert_eq!(report.at.offset(), 4);
        assert_eq!(report.at.len(), 5);
    }
}
