//! `fromCore`: coreAST → interchange AST (spec §4.4).
//!
//! Total function. `None` input (the `null`/`undefined` case in the
//! original) converts to a null literal, never panics.

use crate::node::{LiteralValue, Node, Position, Scope};
use crate::roles;
use hyperfixi_base::Span;
use hyperfixi_parser::core_ast::{CoreNode, Literal};
use std::collections::HashMap;

/// `Span` is a pure byte-offset range (see `hyperfixi_base::span` docs); it
/// never carries line/column, so those two interchange fields are always
/// stamped synthetic here. A caller wanting real line/column for diagnostics
/// recomputes them from source via `hyperfixi_base::LineIndex` at the point
/// of use rather than threading source text through every conversion.
fn pos_from_span(span: Option<Span>) -> Option<Position> {
    span.map(|s| Position { start: s.start, end: s.end, line: 1, column: 0 })
}

fn lit(value: LiteralValue) -> Node {
    Node::Literal { value, pos: None }
}

/// Converts a single core node. Matches `from_core_opt(Some(core))`.
pub fn from_core(core: &CoreNode) -> Node {
    match core {
        CoreNode::Literal { value, span } => {
            let v = match value {
                Literal::String(s) => LiteralValue::String(s.clone()),
                Literal::Number(n) => LiteralValue::Number(*n),
                Literal::Bool(b) => LiteralValue::Bool(*b),
                Literal::Null => LiteralValue::Null,
            };
            Node::Literal { value: v, pos: pos_from_span(*span) }
        }
        CoreNode::Identifier { value, span } => {
            Node::Identifier { value: value.clone(), name: None, pos: pos_from_span(*span) }
        }
        CoreNode::Selector { value, span } => Node::Selector { value: value.clone(), pos: pos_from_span(*span) },
        CoreNode::Variable { name, scope, span } => {
            Node::Variable { name: name.clone(), scope: Scope::from(*scope), pos: pos_from_span(*span) }
        }
        CoreNode::BinaryExpression { operator, left, right, span } => Node::Binary {
            operator: operator.clone(),
            left: Box::new(from_core(left)),
            right: Box::new(from_core(right)),
            pos: pos_from_span(*span),
        },
        CoreNode::UnaryExpression { operator, argument, span } => Node::Unary {
            operator: operator.clone(),
            operand: Box::new(from_core(argument)),
            pos: pos_from_span(*span),
        },
        CoreNode::MemberExpression { object, property, computed, span } => Node::Member {
            object: Box::new(from_core(object)),
            property: Box::new(from_core(property)),
            computed: *computed,
            pos: pos_from_span(*span),
        },
        CoreNode::PossessiveExpression { object, property, span } => Node::Possessive {
            object: Box::new(from_core(object)),
            property: property.clone(),
            pos: pos_from_span(*span),
        },
        CoreNode::CallExpression { callee, arguments, span } => Node::Call {
            callee: Box::new(from_core(callee)),
            args: arguments.iter().map(from_core).collect(),
            pos: pos_from_span(*span),
        },
        CoreNode::Positional { position, target, span } => Node::Positional {
            position: position.clone(),
            target: target.as_deref().map(from_core).map(Box::new),
            pos: pos_from_span(*span),
        },
        CoreNode::EventHandler { event, modifiers, body, span } => Node::Event {
            event: event.clone(),
            modifiers: modifiers.clone(),
            body: body.iter().map(from_core).collect(),
            target: None,
            pos: pos_from_span(*span),
        },
        CoreNode::Command { name, .. } if name == "if" || name == "unless" => from_core_if(core),
        CoreNode::Command { name, loop_variant, .. } if name == "repeat" => match loop_variant.as_deref() {
            Some("for") => from_core_foreach(core),
            Some("while") => from_core_while(core),
            _ => from_core_repeat(core),
        },
        CoreNode::Command { .. } => from_core_command(core),
        CoreNode::CommandSequence { children, span } => {
            let mut converted: Vec<Node> = children.iter().map(from_core).collect();
            if converted.len() == 1 {
                converted.pop().unwrap()
            } else {
                Node::Event {
                    event: "click".into(),
                    modifiers: Default::default(),
                    body: converted,
                    target: None,
                    pos: pos_from_span(*span),
                }
            }
        }
    }
}

/// Converts `Option<&CoreNode>`, the `null`/`undefined` entry point.
pub fn from_core_opt(core: Option<&CoreNode>) -> Node {
    core.map(from_core).unwrap_or_else(Node::null_literal)
}

fn from_core_if(core: &CoreNode) -> Node {
    let CoreNode::Command { condition, then_branch, else_if_branches, else_branch, span, .. } = core else {
        unreachable!()
    };
    Node::If {
        condition: Box::new(condition.as_deref().map(from_core).unwrap_or_else(Node::null_literal)),
        then_branch: then_branch.as_deref().unwrap_or(&[]).iter().map(from_core).collect(),
        else_if_branches: else_if_branches
            .iter()
            .map(|(cond, body)| (from_core(cond), body.iter().map(from_core).collect()))
            .collect(),
        else_branch: else_branch.as_ref().map(|b| b.iter().map(from_core).collect()),
        pos: pos_from_span(*span),
    }
}

fn from_core_repeat(core: &CoreNode) -> Node {
    let CoreNode::Command { then_branch, count, while_condition, span, .. } = core else { unreachable!() };
    Node::Repeat {
        body: then_branch.as_deref().unwrap_or(&[]).iter().map(from_core).collect(),
        count: count.as_deref().map(from_core).map(Box::new),
        while_condition: while_condition.as_deref().map(from_core).map(Box::new),
        pos: pos_from_span(*span),
    }
}

fn from_core_foreach(core: &CoreNode) -> Node {
    let CoreNode::Command { then_branch, item_name, index_name, collection, span, .. } = core else {
        unreachable!()
    };
    Node::Foreach {
        item_name: item_name.clone().unwrap_or_default(),
        index_name: index_name.clone(),
        collection: Box::new(collection.as_deref().map(from_core).unwrap_or_else(Node::null_literal)),
        body: then_branch.as_deref().unwrap_or(&[]).iter().map(from_core).collect(),
        pos: pos_from_span(*span),
    }
}

fn from_core_while(core: &CoreNode) -> Node {
    let CoreNode::Command { then_branch, while_condition, span, .. } = core else { unreachable!() };
    Node::While {
        condition: Box::new(while_condition.as_deref().map(from_core).unwrap_or_else(Node::null_literal)),
        body: then_branch.as_deref().unwrap_or(&[]).iter().map(from_core).collect(),
        pos: pos_from_span(*span),
    }
}

fn from_core_command(core: &CoreNode) -> Node {
    let CoreNode::Command { name, args, target, modifiers, then_branch, span, .. } = core else { unreachable!() };
    let ir_args: Vec<Node> = args.iter().map(from_core).collect();
    let ir_target = target.as_deref().map(from_core).map(Box::new);
    let ir_modifiers: HashMap<String, Node> = modifiers.iter().map(|(k, v)| (k.clone(), from_core(v))).collect();
    let roles = roles::infer_roles(name, &ir_args, &ir_modifiers, ir_target.as_deref());
    Node::Command {
        name: name.clone(),
        args: ir_args,
        target: ir_target,
        modifiers: ir_modifiers,
        roles,
        body: then_branch.as_ref().map(|b| b.iter().map(from_core).collect()),
        pos: pos_from_span(*span),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyperfixi_parser::Parser;

    #[test]
    fn event_handler_converts_to_event_node() {
        let ast = Parser::parse("on click toggle .open").unwrap();
        let node = from_core(&ast[0]);
        match node {
            Node::Event { event, body, .. } => {
                assert_eq!(event, "click");
                assert_eq!(body.len(), 1);
                assert!(matches!(body[0], Node::Command { .. }));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn if_command_becomes_if_node() {
        let ast = Parser::parse("on click if :x show end").unwrap();
        let Node::Event { body, .. } = from_core(&ast[0]) else { panic!("expected event") };
        assert!(matches!(body[0], Node::If { .. }));
    }

    #[test]
    fn repeat_times_becomes_repeat_node() {
        let ast = Parser::parse("on click repeat 3 times log \"x\" end").unwrap();
        let Node::Event { body, .. } = from_core(&ast[0]) else { panic!("expected event") };
        match &body[0] {
            Node::Repeat { count, .. } => assert!(count.is_some()),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn for_each_becomes_foreach_node() {
        let ast = Parser::parse("on click for each x in :items log x end").unwrap();
        let Node::Event { body, .. } = from_core(&ast[0]) else { panic!("expected event") };
        match &body[0] {
            Node::Foreach { item_name, .. } => assert_eq!(item_name, "x"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn set_command_gets_roles() {
        let ast = Parser::parse("on click set :count to 5").unwrap();
        let Node::Event { body, .. } = from_core(&ast[0]) else { panic!("expected event") };
        match &body[0] {
            Node::Command { roles, .. } => assert!(roles.as_ref().unwrap().contains_key("patient")),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn from_core_opt_none_is_null_literal() {
        assert_eq!(from_core_opt(None), Node::null_literal());
    }
}
