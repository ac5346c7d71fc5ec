//! `completions(source, offset)` (spec §6): a flat, context-free keyword and
//! command-name completion list. Deliberately dumb — no scope resolution, no
//! prefix filtering beyond what's already typed at `offset` — an editor's
//! own fuzzy matcher is expected to narrow this down.

use crate::types::{CompletionItem, CompletionKind};

/// Canonical command names, mirrors the codegen registry's dispatch table
/// (spec §4.8) without depending on the codegen crate itself.
const COMMANDS: &[&str] = &[
    "toggle", "add", "remove", "set", "put", "show", "hide", "focus", "blur", "log", "wait", "fetch", "send",
    "trigger", "increment", "decrement", "halt", "exit", "return", "scroll", "take", "throw", "default", "go",
    "append", "pick", "push-url", "replace-url", "get", "break", "continue", "beep", "js", "copy", "make", "swap",
    "morph", "transition", "measure", "settle", "install", "render", "tell", "async",
];

const KEYWORDS: &[&str] = &[
    "on", "init", "every", "end", "if", "unless", "else", "then", "repeat", "for", "each", "in", "while", "until",
    "times", "forever", "and", "or", "not", "to", "from", "into", "with", "as", "of", "the",
];

fn current_word(source: &str, offset: usize) -> &str {
    let start = source[..offset.min(source.len())]
        .rfind(|c: char| !c.is_ascii_alphanumeric() && c != '_' && c != '-')
        .map(|i| i + 1)
        .unwrap_or(0);
    &source[start..offset.min(source.len())]
}

/// Suggests commands and keywords whose name starts with whatever
/// identifier-like text precedes `offset`.
pub fn completions(source: &str, offset: usize) -> Vec<CompletionItem> {
    let prefix = current_word(source, offset);
    let mut out: Vec<CompletionItem> = COMMANDS
        .iter()
        .filter(|name| name.starts_with(prefix))
        .map(|name| CompletionItem { label: name.to_string(), kind: CompletionKind::Command, detail: None })
        .collect();
    out.extend(
        KEYWORDS
            .iter()
            .filter(|kw| kw.starts_with(prefix))
            .map(|kw| CompletionItem { label: kw.to_string(), kind: CompletionKind::Keyword, detail: None }),
    );
    out
}
