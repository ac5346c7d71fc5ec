//! The core parser's verbose AST vocabulary (spec §3, §4.2).
//!
//! This is front-end A's native shape — historically-shaped, node-kind-per-
//! construct, the way a hand-written recursive-descent parser naturally
//! grows. [`crate::alias`] normalizes surface keyword spelling before nodes
//! are built; `hyperfixi-ir::from_core` normalizes the *shape* into the
//! interchange vocabulary used by every downstream pass.

use hyperfixi_base::Span;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    String(String),
    Number(f64),
    Bool(bool),
    Null,
}

/// Event modifiers collected while parsing an `on` handler (spec §3).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventModifiers {
    pub once: bool,
    pub debounce: Option<i64>,
    pub throttle: Option<i64>,
    pub prevent: bool,
    pub stop: bool,
    pub capture: bool,
    pub passive: bool,
    pub from: Option<String>,
}

/// The verbose, front-end-A-native node vocabulary.
#[derive(Debug, Clone, PartialEq)]
pub enum CoreNode {
    Literal {
        value: Literal,
        span: Option<Span>,
    },
    Identifier {
        value: String,
        span: Option<Span>,
    },
    Selector {
        value: String,
        span: Option<Span>,
    },
    Variable {
        name: String,
        scope: hyperfixi_base::VarScope,
        span: Option<Span>,
    },
    BinaryExpression {
        operator: String,
        left: Box<CoreNode>,
        right: Box<CoreNode>,
        span: Option<Span>,
    },
    UnaryExpression {
        operator: String,
        argument: Box<CoreNode>,
        span: Option<Span>,
    },
    MemberExpression {
        object: Box<CoreNode>,
        property: Box<CoreNode>,
        computed: bool,
        span: Option<Span>,
    },
    /// Both `x's prop` and `prop of x` surface forms parse to this shape.
    PossessiveExpression {
        object: Box<CoreNode>,
        property: String,
        span: Option<Span>,
    },
    CallExpression {
        callee: Box<CoreNode>,
        arguments: Vec<CoreNode>,
        span: Option<Span>,
    },
    Positional {
        position: String,
        target: Option<Box<CoreNode>>,
        span: Option<Span>,
    },
    EventHandler {
        event: String,
        modifiers: EventModifiers,
        body: Vec<CoreNode>,
        span: Option<Span>,
    },
    /// The universal command shape. Control-flow constructs (`if`, `repeat`,
    /// `for`, `while`) are represented as commands too, distinguished by
    /// `name` and the block-specific fields below — matching `toCore`'s
    /// lowering of `if`/`repeat`/`foreach`/`while` back into `command`
    /// nodes (spec §4.6).
    Command {
        name: String,
        args: Vec<CoreNode>,
        target: Option<Box<CoreNode>>,
        modifiers: HashMap<String, CoreNode>,
        is_blocking: bool,
        condition: Option<Box<CoreNode>>,
        then_branch: Option<Vec<CoreNode>>,
        else_if_branches: Vec<(CoreNode, Vec<CoreNode>)>,
        else_branch: Option<Vec<CoreNode>>,
        loop_variant: Option<String>,
        count: Option<Box<CoreNode>>,
        while_condition: Option<Box<CoreNode>>,
        item_name: Option<String>,
        index_name: Option<String>,
        collection: Option<Box<CoreNode>>,
        span: Option<Span>,
    },
    CommandSequence {
        children: Vec<CoreNode>,
        span: Option<Span>,
    },
}

impl CoreNode {
    pub fn span(&self) -> Option<Span> {
        match self {
            CoreNode::Literal { span, .. }
            | CoreNode::Identifier { span, .. }
            | CoreNode::Selector { span, .. }
            | CoreNode::Variable { span, .. }
            | CoreNode::BinaryExpression { span, .. }
            | CoreNode::UnaryExpression { span, .. }
            | CoreNode::MemberExpression { span, .. }
            | CoreNode::PossessiveExpression { span, .. }
            | CoreNode::CallExpression { span, .. }
            | CoreNode::Positional { span, .. }
            | CoreNode::EventHandler { span, .. }
            | CoreNode::Command { span, .. }
            | CoreNode::CommandSequence { span, .. } => *span,
        }
    }

    pub fn identifier(name: impl Into<String>) -> Self {
        CoreNode::Identifier { value: name.into(), span: None }
    }
}
