//! `symbols(source)` (spec §6): a flat outline of event handlers, the
//! commands each handler runs, and the local variables it declares.

use crate::types::{Range, Symbol, SymbolKind};
use hyperfixi_base::span::LineCol;
use hyperfixi_ir::{from_core, Node, Scope};
use hyperfixi_parser::Parser;

fn range_for(node: &Node) -> Range {
    match node.pos() {
        Some(pos) => Range {
            start: LineCol { line: pos.line, column: pos.column },
            end: LineCol { line: pos.line, column: pos.column },
        },
        None => Range { start: LineCol::default(), end: LineCol::default() },
    }
}

fn walk(node: &Node, out: &mut Vec<Symbol>) {
    match node {
        Node::Event { event, body, .. } => {
            out.push(Symbol { name: event.clone(), kind: SymbolKind::Handler, range: range_for(node) });
            for stmt in body {
                walk(stmt, out);
            }
        }
        Node::Command { name, args, target, modifiers, .. } => {
            out.push(Symbol { name: name.clone(), kind: SymbolKind::Command, range: range_for(node) });
            for arg in args {
                walk(arg, out);
            }
            if let Some(target) = target {
                walk(target, out);
            }
            for value in modifiers.values() {
                walk(value, out);
            }
        }
        Node::Variable { name, scope: Scope::Local, .. } => {
            out.push(Symbol { name: name.clone(), kind: SymbolKind::Variable, range: range_for(node) });
        }
        Node::If { then_branch, else_if_branches, else_branch, .. } => {
            for stmt in then_branch {
                walk(stmt, out);
            }
            for (_, body) in else_if_branches {
                for stmt in body {
                    walk(stmt, out);
                }
            }
            if let Some(body) = else_branch {
                for stmt in body {
                    walk(stmt, out);
                }
            }
        }
        Node::Repeat { body, .. } | Node::Foreach { body, .. } | Node::While { body, .. } => {
            for stmt in body {
                walk(stmt, out);
            }
        }
        _ => {}
    }
}

/// Walks the interchange tree for every handler, command invocation, and
/// local variable declared in `source`. Parse errors yield an empty list;
/// callers wanting the failure reason should pair this with
/// [`crate::diagnostics`].
pub fn symbols(source: &str) -> Vec<Symbol> {
    let Ok(core_nodes) = Parser::parse(source) else { return Vec::new() };
    let mut out = Vec::new();
    for core in &core_nodes {
        walk(&from_core(core), &mut out);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_handler_and_command_symbols() {
        let syms = symbols("on click toggle .open");
        assert!(syms.iter().any(|s| s.kind == SymbolKind::Handler && s.name == "click"));
        assert!(syms.iter().any(|s| s.kind == SymbolKind::Command && s.name == "toggle"));
    }

    #[test]
    fn finds_local_variable_symbols() {
        let syms = symbols("on click set :count to 1");
        assert!(syms.iter().any(|s| s.kind == SymbolKind::Variable && s.name == "count"));
    }

    #[test]
    fn unparseable_source_yields_no_symbols() {
        assert!(symbols("on click if :x show").is_empty());
    }
}
