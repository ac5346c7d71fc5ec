//! Protocol-shaped result types for the pure analyzers. Deliberately
//! hand-rolled rather than pulled from an LSP types crate: a server
//! wrapping these functions adapts them to its own protocol types at the
//! boundary, and this crate never depends on the server framework itself
//! (see the crate's top-level docs).

use hyperfixi_base::span::LineCol;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    pub start: LineCol,
    pub end: LineCol,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Info,
    Hint,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub range: Range,
    pub severity: Severity,
    pub message: String,
    pub code: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Handler,
    Command,
    Variable,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    pub range: Range,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Hover {
    pub contents: String,
    pub range: Range,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionKind {
    Keyword,
    Command,
    Variable,
    Selector,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionItem {
    pub label: String,
    pub kind: CompletionKind,
    pub detail: Option<String>,
}
