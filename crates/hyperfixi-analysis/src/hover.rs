//! `hover(source, offset)` (spec §6): describes whatever command, event, or
//! variable sits at a byte offset.

use crate::types::{Hover, Range};
use hyperfixi_base::span::LineCol;
use hyperfixi_ir::{from_core, Node};
use hyperfixi_parser::Parser;

fn contains(node: &Node, offset: usize) -> bool {
    node.pos().is_some_and(|p| p.start <= offset && offset <= p.end)
}

fn children(node: &Node) -> Vec<&Node> {
    match node {
        Node::Binary { left, right, .. } => vec![left, right],
        Node::Unary { operand, .. } => vec![operand],
        Node::Member { object, property, .. } => vec![object, property],
        Node::Possessive { object, .. } => vec![object],
        Node::Call { callee, args, .. } => std::iter::once(callee.as_ref()).chain(args).collect(),
        Node::Positional { target, .. } => target.iter().map(Box::as_ref).collect(),
        Node::Event { body, target, .. } => target.iter().map(Box::as_ref).chain(body).collect(),
        Node::Command { args, target, modifiers, .. } => args
            .iter()
            .chain(target.iter().map(Box::as_ref))
            .chain(modifiers.values())
            .collect(),
        Node::If { condition, then_branch, else_if_branches, else_branch, .. } => {
            let mut out = vec![condition.as_ref()];
            out.extend(then_branch);
            for (cond, body) in else_if_branches {
                out.push(cond);
                out.extend(body);
            }
            if let Some(body) = else_branch {
                out.extend(body);
            }
            out
        }
        Node::Repeat { body, count, while_condition, .. } => count
            .iter()
            .map(Box::as_ref)
            .chain(while_condition.iter().map(Box::as_ref))
            .chain(body)
            .collect(),
        Node::Foreach { collection, body, .. } => std::iter::once(collection.as_ref()).chain(body).collect(),
        Node::While { condition, body, .. } => std::iter::once(condition.as_ref()).chain(body).collect(),
        Node::Literal { .. } | Node::Identifier { .. } | Node::Selector { .. } | Node::Variable { .. } => vec![],
    }
}

fn describe(node: &Node) -> String {
    match node {
        Node::Command { name, .. } => format!("command `{name}`"),
        Node::Event { event, .. } => format!("event handler `on {event}`"),
        Node::Variable { name, scope, .. } => format!("variable `{name}` ({scope:?})"),
        Node::Selector { value, .. } => format!("selector `{value}`"),
        Node::Identifier { value, .. } => format!("identifier `{value}`"),
        Node::Literal { value, .. } => format!("literal `{value:?}`"),
        Node::If { .. } => "conditional".to_string(),
        Node::Repeat { .. } => "repeat loop".to_string(),
        Node::Foreach { .. } => "for-each loop".to_string(),
        Node::While { .. } => "while loop".to_string(),
        Node::Binary { operator, .. } => format!("binary operator `{operator}`"),
        Node::Unary { operator, .. } => format!("unary operator `{operator}`"),
        Node::Member { .. } => "member access".to_string(),
        Node::Possessive { property, .. } => format!("possessive access `{property}`"),
        Node::Call { .. } => "call".to_string(),
        Node::Positional { position, .. } => format!("positional reference `{position}`"),
    }
}

fn narrowest<'a>(node: &'a Node, offset: usize) -> Option<&'a Node> {
    if !contains(node, offset) {
        return None;
    }
    for child in children(node) {
        if let Some(found) = narrowest(child, offset) {
            return Some(found);
        }
    }
    Some(node)
}

/// Finds the narrowest node spanning `offset` and describes it. `None` if
/// `source` fails to parse or nothing at `offset` carries a position.
pub fn hover(source: &str, offset: usize) -> Option<Hover> {
    let core_nodes = Parser::parse(source).ok()?;
    let nodes: Vec<Node> = core_nodes.iter().map(from_core).collect();
    let target = nodes.iter().find_map(|n| narrowest(n, offset))?;
    let pos = target.pos()?;
    let loc = LineCol { line: pos.line, column: pos.column };
    Some(Hover { contents: describe(target), range: Range { start: loc, end: loc } })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hovers_over_command_name() {
        let source = "on click toggle .open";
        let offset = source.find("toggle").unwrap();
        let result = hover(source, offset).unwrap();
        assert!(result.contents.contains("toggle"));
    }

    #[test]
    fn hovers_over_selector() {
        let source = "on click toggle .open";
        let offset = source.find(".open").unwrap();
        let result = hover(source, offset).unwrap();
        assert!(result.contents.contains("selector"));
    }

    #[test]
    fn out_of_range_offset_yields_none() {
        let source = "on click toggle .open";
        assert!(hover(source, source.len() + 50).is_none());
    }
}
