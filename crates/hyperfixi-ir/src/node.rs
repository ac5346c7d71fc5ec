//! The interchange node vocabulary (spec §3): a 16-shape tagged union all
//! post-parse passes (codegen, analysis, the SQL variant's renderer) target.
//!
//! Unlike [`hyperfixi_parser::CoreNode`] this is not arena-allocated or
//! interned — see the crate's top-level docs for why an owned `Box<Node>`
//! tree is the right simplification here.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub use hyperfixi_parser::EventModifiers;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LiteralValue {
    String(String),
    Number(f64),
    Bool(bool),
    Null,
}

/// `variable`'s scope. `Element` has no core-parser counterpart (`:`/`$`
/// sigils only distinguish local/global); it exists for interchange nodes
/// synthesized directly by codegen or analysis passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Local,
    Global,
    Element,
}

impl From<hyperfixi_base::VarScope> for Scope {
    fn from(s: hyperfixi_base::VarScope) -> Self {
        match s {
            hyperfixi_base::VarScope::Local => Scope::Local,
            hyperfixi_base::VarScope::Global => Scope::Global,
        }
    }
}

/// Source span fields, 1-based line / 0-based column, carried on any node
/// that was lexed rather than synthesized (spec §3).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub start: usize,
    pub end: usize,
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub const SYNTHETIC: Position = Position { start: 0, end: 0, line: 1, column: 0 };
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Node {
    #[serde(rename = "literal")]
    Literal { value: LiteralValue, pos: Option<Position> },
    #[serde(rename = "identifier")]
    Identifier { value: String, name: Option<String>, pos: Option<Position> },
    #[serde(rename = "selector")]
    Selector { value: String, pos: Option<Position> },
    #[serde(rename = "variable")]
    Variable { name: String, scope: Scope, pos: Option<Position> },
    #[serde(rename = "binary")]
    Binary { operator: String, left: Box<Node>, right: Box<Node>, pos: Option<Position> },
    #[serde(rename = "unary")]
    Unary { operator: String, operand: Box<Node>, pos: Option<Position> },
    #[serde(rename = "member")]
    Member { object: Box<Node>, property: Box<Node>, computed: bool, pos: Option<Position> },
    #[serde(rename = "possessive")]
    Possessive { object: Box<Node>, property: String, pos: Option<Position> },
    #[serde(rename = "call")]
    Call { callee: Box<Node>, args: Vec<Node>, pos: Option<Position> },
    #[serde(rename = "positional")]
    Positional { position: String, target: Option<Box<Node>>, pos: Option<Position> },
    #[serde(rename = "event")]
    Event {
        event: String,
        modifiers: EventModifiers,
        body: Vec<Node>,
        target: Option<Box<Node>>,
        pos: Option<Position>,
    },
    #[serde(rename = "command")]
    Command {
        name: String,
        args: Vec<Node>,
        target: Option<Box<Node>>,
        modifiers: HashMap<String, Node>,
        roles: Option<HashMap<String, Node>>,
        /// A nested statement body, carried only for the handful of
        /// commands that scope one (`tell`, `async`, `fetch`'s `then`
        /// continuation). `None` for every other command.
        body: Option<Vec<Node>>,
        pos: Option<Position>,
    },
    #[serde(rename = "if")]
    If {
        condition: Box<Node>,
        then_branch: Vec<Node>,
        else_if_branches: Vec<(Node, Vec<Node>)>,
        else_branch: Option<Vec<Node>>,
        pos: Option<Position>,
    },
    #[serde(rename = "repeat")]
    Repeat {
        body: Vec<Node>,
        count: Option<Box<Node>>,
        while_condition: Option<Box<Node>>,
        pos: Option<Position>,
    },
    #[serde(rename = "foreach")]
    Foreach {
        item_name: String,
        index_name: Option<String>,
        collection: Box<Node>,
        body: Vec<Node>,
        pos: Option<Position>,
    },
    #[serde(rename = "while")]
    While { condition: Box<Node>, body: Vec<Node>, pos: Option<Position> },
}

impl Node {
    pub fn null_literal() -> Node {
        Node::Literal { value: LiteralValue::Null, pos: None }
    }

    pub fn identifier(name: impl Into<String>) -> Node {
        Node::Identifier { value: name.into(), name: None, pos: None }
    }

    pub fn pos(&self) -> Option<Position> {
        match self {
            Node::Literal { pos, .. }
            | Node::Identifier { pos, .. }
            | Node::Selector { pos, .. }
            | Node::Variable { pos, .. }
            | Node::Binary { pos, .. }
            | Node::Unary { pos, .. }
            | Node::Member { pos, .. }
            | Node::Possessive { pos, .. }
            | Node::Call { pos, .. }
            | Node::Positional { pos, .. }
            | Node::Event { pos, .. }
            | Node::Command { pos, .. }
            | Node::If { pos, .. }
            | Node::Repeat { pos, .. }
            | Node::Foreach { pos, .. }
            | Node::While { pos, .. } => *pos,
        }
    }

    /// Decision points this node contributes, per spec §6's cyclomatic
    /// definition: `if`, `while`, `foreach` count; `repeat` does not, since
    /// a `repeat N times` loop has no branch condition to decide.
    pub fn is_decision_point(&self) -> bool {
        matches!(self, Node::If { .. } | Node::While { .. } | Node::Foreach { .. })
    }
}
