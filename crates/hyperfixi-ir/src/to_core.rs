//! `toCore`: interchange AST → coreAST (spec §4.6), the inverse of
//! [`crate::from_core`].
//!
//! Preserves positions when present; stamps [`Span::SYNTHETIC`] otherwise —
//! runtime execution depends only on tree structure, never on position.
//!
//! Two resolved Open Questions (spec §9) worth a note here: (1) `variable`
//! round-trips to `CoreNode::Variable` (not a bare `Identifier`) so scope is
//! actually retained, matching the round-trip invariant in spec §8 rather
//! than the letter of the "variable → identifier" phrasing; (2) `positional`
//! round-trips to `CoreNode::Positional` directly rather than through a
//! synthetic `callExpression`, since the core vocabulary here already has a
//! dedicated shape for it.

use crate::node::{LiteralValue, Node, Position, Scope};
use hyperfixi_base::{Span, VarScope};
use hyperfixi_parser::core_ast::{CoreNode, Literal};
use std::collections::HashMap;

fn span_from_pos(pos: Option<Position>) -> Span {
    pos.map(|p| Span::new(p.start, p.end)).unwrap_or(Span::SYNTHETIC)
}

fn empty_command(name: impl Into<String>, span: Span) -> CoreNode {
    CoreNode::Command {
        name: name.into(),
        args: Vec::new(),
        target: None,
        modifiers: HashMap::new(),
        is_blocking: false,
        condition: None,
        then_branch: None,
        else_if_branches: Vec::new(),
        else_branch: None,
        loop_variant: None,
        count: None,
        while_condition: None,
        item_name: None,
        index_name: None,
        collection: None,
        span: Some(span),
    }
}

pub fn to_core(node: &Node) -> CoreNode {
    match node {
        Node::Literal { value, pos } => {
            let v = match value {
                LiteralValue::String(s) => Literal::String(s.clone()),
                LiteralValue::Number(n) => Literal::Number(*n),
                LiteralValue::Bool(b) => Literal::Bool(*b),
                LiteralValue::Null => Literal::Null,
            };
            CoreNode::Literal { value: v, span: Some(span_from_pos(*pos)) }
        }
        Node::Identifier { value, pos, .. } => {
            CoreNode::Identifier { value: value.clone(), span: Some(span_from_pos(*pos)) }
        }
        Node::Selector { value, pos } => CoreNode::Selector { value: value.clone(), span: Some(span_from_pos(*pos)) },
        Node::Variable { name, scope, pos } => CoreNode::Variable {
            name: name.clone(),
            scope: match scope {
                Scope::Global => VarScope::Global,
                _ => VarScope::Local,
            },
            span: Some(span_from_pos(*pos)),
        },
        Node::Binary { operator, left, right, pos } => CoreNode::BinaryExpression {
            operator: operator.clone(),
            left: Box::new(to_core(left)),
            right: Box::new(to_core(right)),
            span: Some(span_from_pos(*pos)),
        },
        Node::Unary { operator, operand, pos } => CoreNode::UnaryExpression {
            operator: operator.clone(),
            argument: Box::new(to_core(operand)),
            span: Some(span_from_pos(*pos)),
        },
        Node::Member { object, property, computed, pos } => CoreNode::MemberExpression {
            object: Box::new(to_core(object)),
            property: Box::new(to_core(property)),
            computed: *computed,
            span: Some(span_from_pos(*pos)),
        },
        Node::Possessive { object, property, pos } => CoreNode::PossessiveExpression {
            object: Box::new(to_core(object)),
            property: property.clone(),
            span: Some(span_from_pos(*pos)),
        },
        Node::Call { callee, args, pos } => CoreNode::CallExpression {
            callee: Box::new(to_core(callee)),
            arguments: args.iter().map(to_core).collect(),
            span: Some(span_from_pos(*pos)),
        },
        Node::Positional { position, target, pos } => CoreNode::Positional {
            position: position.clone(),
            target: target.as_deref().map(to_core).map(Box::new),
            span: Some(span_from_pos(*pos)),
        },
        Node::Event { event, modifiers, body, pos, .. } => CoreNode::EventHandler {
            event: event.clone(),
            modifiers: modifiers.clone(),
            body: body.iter().map(to_core).collect(),
            span: Some(span_from_pos(*pos)),
        },
        Node::Command { name, args, target, modifiers, body, pos, .. } => {
            let span = span_from_pos(*pos);
            let mut command = empty_command(name.clone(), span);
            if let CoreNode::Command { args: a, target: t, modifiers: m, then_branch: tb, .. } = &mut command {
                *a = args.iter().map(to_core).collect();
                *t = target.as_deref().map(to_core).map(Box::new);
                *m = modifiers.iter().map(|(k, v)| (k.clone(), to_core(v))).collect();
                *tb = body.as_ref().map(|b| b.iter().map(to_core).collect());
            }
            command
        }
        Node::If { condition, then_branch, else_if_branches, else_branch, pos } => {
            let span = span_from_pos(*pos);
            CoreNode::Command {
                name: "if".into(),
                args: Vec::new(),
                target: None,
                modifiers: HashMap::new(),
                is_blocking: true,
                condition: Some(Box::new(to_core(condition))),
                then_branch: Some(then_branch.iter().map(to_core).collect()),
                else_if_branches: else_if_branches
                    .iter()
                    .map(|(cond, body)| (to_core(cond), body.iter().map(to_core).collect()))
                    .collect(),
                else_branch: else_branch.as_ref().map(|b| b.iter().map(to_core).collect()),
                loop_variant: None,
                count: None,
                while_condition: None,
                item_name: None,
                index_name: None,
                collection: None,
                span: Some(span),
            }
        }
        Node::Repeat { body, count, while_condition, pos } => {
            let span = span_from_pos(*pos);
            let loop_variant = if count.is_some() {
                "times"
            } else if while_condition.is_some() {
                "while"
            } else {
                "forever"
            };
            CoreNode::Command {
                name: "repeat".into(),
                args: Vec::new(),
                target: None,
                modifiers: HashMap::new(),
                is_blocking: true,
                condition: None,
                then_branch: Some(body.iter().map(to_core).collect()),
                else_if_branches: Vec::new(),
                else_branch: None,
                loop_variant: Some(loop_variant.into()),
                count: count.as_deref().map(to_core).map(Box::new),
                while_condition: while_condition.as_deref().map(to_core).map(Box::new),
                item_name: None,
                index_name: None,
                collection: None,
                span: Some(span),
            }
        }
        Node::Foreach { item_name, index_name, collection, body, pos } => {
            let span = span_from_pos(*pos);
            CoreNode::Command {
                name: "repeat".into(),
                args: Vec::new(),
                target: None,
                modifiers: HashMap::new(),
                is_blocking: true,
                condition: None,
                then_branch: Some(body.iter().map(to_core).collect()),
                else_if_branches: Vec::new(),
                else_branch: None,
                loop_variant: Some("for".into()),
                count: None,
                while_condition: None,
                item_name: Some(item_name.clone()),
                index_name: index_name.clone(),
                collection: Some(Box::new(to_core(collection))),
                span: Some(span),
            }
        }
        Node::While { condition, body, pos } => {
            let span = span_from_pos(*pos);
            CoreNode::Command {
                name: "repeat".into(),
                args: Vec::new(),
                target: None,
                modifiers: HashMap::new(),
                is_blocking: true,
                condition: None,
                then_branch: Some(body.iter().map(to_core).collect()),
                else_if_branches: Vec::new(),
                else_branch: None,
                loop_variant: Some("while".into()),
                count: None,
                while_condition: Some(Box::new(to_core(condition))),
                item_name: None,
                index_name: None,
                collection: None,
                span: Some(span),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::from_core::from_core;
    use hyperfixi_parser::Parser;

    #[test]
    fn round_trips_event_handler() {
        let ast = Parser::parse("on click toggle .open").unwrap();
        let ir = from_core(&ast[0]);
        let back = to_core(&ir);
        let rebuilt = from_core(&back);
        assert_eq!(rebuilt, ir);
    }

    #[test]
    fn round_trips_if_else() {
        let ast = Parser::parse("on click if :x show else hide end").unwrap();
        let ir = from_core(&ast[0]);
        let back = to_core(&ir);
        assert_eq!(from_core(&back), ir);
    }

    #[test]
    fn missing_position_stamps_synthetic_span() {
        let node = Node::identifier("me");
        let core = to_core(&node);
        assert_eq!(core.span(), Some(Span::SYNTHETIC));
    }

    #[test]
    fn variable_scope_round_trips() {
        let ast = Parser::parse("on click set $total to 1").unwrap();
        let ir = from_core(&ast[0]);
        let back = to_core(&ir);
        assert_eq!(from_core(&back), ir);
    }
}
