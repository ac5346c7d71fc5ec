//! Error types with source location tracking (spec §7).
//!
//! Lex/parse errors carry a [`Span`] and render a source-annotated, colored
//! message via [`HyperfixiError::display_with_source`]. Converters,
//! analyzers, and codegen never construct this type — per spec §7, only
//! parsers and strict-mode bundle validation produce errors.

use crate::span::{LineIndex, Span};
use crate::style::Style;
use crate::token::TokenKind;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum HyperfixiErrorKind {
    UnexpectedToken { expected: String, found: TokenKind },
    ExpectedKeyword { expected: String },
    UnknownCommand { name: String },
    UnexpectedEof,
}

impl fmt::Display for HyperfixiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HyperfixiErrorKind::UnexpectedToken { expected, found } => {
                write!(f, "expected {expected}, found {found:?}")
            }
            HyperfixiErrorKind::ExpectedKeyword { expected } => {
                write!(f, "expected keyword '{expected}'")
            }
            HyperfixiErrorKind::UnknownCommand { name } => {
                write!(f, "unknown command '{name}'")
            }
            HyperfixiErrorKind::UnexpectedEof => write!(f, "unexpected end of input"),
        }
    }
}

/// A parse error annotated with its source location.
#[derive(Debug, Clone, PartialEq)]
pub struct HyperfixiError {
    pub kind: HyperfixiErrorKind,
    pub span: Span,
}

impl HyperfixiError {
    pub fn new(kind: HyperfixiErrorKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn kind(&self) -> &HyperfixiErrorKind {
        &self.kind
    }

    /// Renders a multi-line, ANSI-colored message pointing at the offending
    /// span within `source`, e.g.:
    ///
    /// ```text
    /// error: expected keyword 'end', found Eof
    ///    1 | on click toggle .open
    ///      |                      ^
    /// ```
    pub fn display_with_source(&self, source: &str) -> String {
        let index = LineIndex::new(source);
        let pos = index.line_col(self.span.start.min(source.len()));
        let line_start = source[..self.span.start.min(source.len())]
            .rfind('\n')
            .map(|i| i + 1)
            .unwrap_or(0);
        let line_end = source[line_start..]
            .find('\n')
            .map(|off| line_start + off)
            .unwrap_or(source.len());
        let line_content = &source[line_start..line_end];

        let col = pos.column as usize;
        let len = self.span.len().max(1);
        let underline = format!("{}{}", " ".repeat(col), "^".repeat(len));

        format!(
            "{}: {}\n\n{:>4} {} {}\n     {} {}",
            Style::bold_red("error"),
            self.kind,
            Style::blue(&pos.line.to_string()),
            Style::blue("|"),
            line_content,
            Style::blue("|"),
            Style::red(&underline),
        )
    }
}

impl fmt::Display for HyperfixiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}..{}", self.kind, self.span.start, self.span.end)
    }
}

impl std::error::Error for HyperfixiError {}

pub type Result<T> = std::result::Result<T, HyperfixiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_with_source_points_at_span() {
        let err = HyperfixiError::new(
            HyperfixiErrorKind::UnexpectedEof,
            Span::new(3, 4),
        );
        let rendered = err.display_with_source("on click");
        assert!(rendered.contains("unexpected end of input"));
        assert!(rendered.contains("on click"));
    }

    #[test]
    fn display_trait_is_plain() {
        let err = HyperfixiError::new(
            HyperfixiErrorKind::UnknownCommand { name: "frobnicate".into() },
            Span::new(0, 10),
        );
        assert_eq!(format!("{err}"), "unknown command 'frobnicate' at 0..10");
    }
}
