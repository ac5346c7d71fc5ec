//! The tokenizer's output vocabulary (spec §3, §4.1).

use crate::span::Span;
use serde::{Deserialize, Serialize};

/// Variable scope sigils: `:x` is local, `$x` is global.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VarScope {
    Local,
    Global,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TokenKind {
    Identifier(String),
    Keyword(String),
    String(String),
    Number(String),
    /// `:x`
    LocalVar(String),
    /// `$x`
    GlobalVar(String),
    /// `#id`, `.class`, `[attr]`, `<tag.../>`
    Selector(String),
    /// `*opacity`
    StyleProperty(String),
    Operator(String),
    Symbol(char),
    Eof,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    /// Raw source text the token was lexed from.
    pub value: String,
    /// Absent when the token was synthesized rather than lexed; consumers
    /// fall back to synthetic coordinates for diagnostics in that case.
    pub position: Option<Span>,
}

impl Token {
    pub fn new(kind: TokenKind, value: impl Into<String>, position: Span) -> Self {
        Self {
            kind,
            value: value.into(),
            position: Some(position),
        }
    }

    pub fn synthetic(kind: TokenKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
            position: None,
        }
    }

    pub fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    /// True for tokens the core parser dispatches on as keywords, regardless
    /// of whether the lexer classified it `Keyword` or a generic identifier
    /// that happens to match a reserved word.
    pub fn text(&self) -> &str {
        &self.value
    }
}

/// Reserved words the lexer classifies as `Keyword` rather than `Identifier`.
/// Kept as a flat list (not a `HashSet`) since membership is checked once per
/// token during lexing and the list is small and stable.
pub const RESERVED_WORDS: &[&str] = &[
    "on", "init", "every", "from", "to", "into", "before", "after", "with", "as", "by", "over",
    "when", "where", "then", "and", "end", "if", "unless", "else", "repeat", "times", "while",
    "for", "each", "in", "fetch", "until", "forever", "not", "is", "matches", "contains",
    "includes", "has", "me", "it", "you", "my", "its", "set", "put", "toggle", "add", "remove",
    "show", "hide", "focus", "blur", "log", "wait", "send", "trigger", "increment", "decrement",
    "halt", "exit", "return", "scroll", "take", "throw", "default", "go", "append", "pick",
    "js", "copy", "make", "swap", "morph", "transition", "measure", "settle", "tell", "async",
    "install", "render", "break", "continue", "beep",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_synthetic_has_no_position() {
        let t = Token::synthetic(TokenKind::Eof, "");
        assert!(t.position.is_none());
        assert!(t.is_eof());
    }

    #[test]
    fn token_new_carries_span() {
        let t = Token::new(TokenKind::Identifier("me".into()), "me", Span::new(0, 2));
        assert_eq!(t.position, Some(Span::new(0, 2)));
    }
}
