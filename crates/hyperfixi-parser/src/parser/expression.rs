//! Expression precedence climbing and postfix parsing (spec §4.2).
//!
//! Full precedence: logical-or > logical-and > equality > comparison >
//! additive > multiplicative > unary > postfix > primary.
//!
//! Command positional arguments parse from [`parse_operand`], which starts
//! one level below logical-or/and: `and`/`or` read as command-sequence
//! separators (spec §4.2, §4.6) almost everywhere a bare argument is
//! expected, and only bind as boolean connectives inside an explicit
//! condition (`if`/`unless`/`while`) or a parenthesized sub-expression,
//! where [`parse_expression`] is used instead. This is the one genuine
//! grammar ambiguity the spec's design notes (§9) call out and leave to the
//! implementation to resolve.

use super::Parser;
use crate::core_ast::CoreNode;
use hyperfixi_base::{HyperfixiError, HyperfixiErrorKind, Result, TokenKind};

const EQUALITY_OPS: &[&str] = &["==", "!=", "is", "is not", "matches", "contains", "includes", "has"];
const COMPARISON_OPS: &[&str] = &["<", ">", "<=", ">="];
const ADDITIVE_OPS: &[&str] = &["+", "-"];
const MULTIPLICATIVE_OPS: &[&str] = &["*", "/", "%"];
const POSITIONAL_WORDS: &[&str] = &["first", "last", "next", "previous", "closest", "parent", "random"];

pub fn parse_expression(p: &mut Parser) -> Result<CoreNode> {
    parse_logical_or(p)
}

/// Entry point for command positional arguments — see module docs.
pub fn parse_operand(p: &mut Parser) -> Result<CoreNode> {
    parse_equality(p)
}

fn parse_logical_or(p: &mut Parser) -> Result<CoreNode> {
    let mut left = parse_logical_and(p)?;
    while p.is_keyword("or") || p.is_operator("||") {
        let span = p.current_span();
        p.advance();
        let right = parse_logical_and(p)?;
        left = CoreNode::BinaryExpression {
            operator: "or".into(),
            left: Box::new(left),
            right: Box::new(right),
            span: Some(span),
        };
    }
    Ok(left)
}

fn parse_logical_and(p: &mut Parser) -> Result<CoreNode> {
    let mut left = parse_equality(p)?;
    while p.is_keyword("and") || p.is_operator("&&") {
        let span = p.current_span();
        p.advance();
        let right = parse_equality(p)?;
        left = CoreNode::BinaryExpression {
            operator: "and".into(),
            left: Box::new(left),
            right: Box::new(right),
            span: Some(span),
        };
    }
    Ok(left)
}

fn parse_equality(p: &mut Parser) -> Result<CoreNode> {
    let mut left = parse_comparison(p)?;
    loop {
        let op = current_word(p);
        let matched = match op.as_deref() {
            Some("is") => {
                p.advance();
                if p.is_keyword("not") {
                    p.advance();
                    Some("is not".to_string())
                } else {
                    Some("is".to_string())
                }
            }
            Some(w) if EQUALITY_OPS.contains(&w) => {
                p.advance();
                Some(w.to_string())
            }
            _ => None,
        };
        let Some(operator) = matched else { break };
        let span = p.current_span();
        let right = parse_comparison(p)?;
        left = CoreNode::BinaryExpression {
            operator,
            left: Box::new(left),
            right: Box::new(right),
            span: Some(span),
        };
    }
    Ok(left)
}

fn parse_comparison(p: &mut Parser) -> Result<CoreNode> {
    let mut left = parse_additive(p)?;
    while let TokenKind::Operator(op) = p.peek_kind().clone() {
        if !COMPARISON_OPS.contains(&op.as_str()) {
            break;
        }
        let span = p.current_span();
        p.advance();
        let right = parse_additive(p)?;
        left = CoreNode::BinaryExpression {
            operator: op,
            left: Box::new(left),
            right: Box::new(right),
            span: Some(span),
        };
    }
    Ok(left)
}

fn parse_additive(p: &mut Parser) -> Result<CoreNode> {
    let mut left = parse_multiplicative(p)?;
    while let TokenKind::Operator(op) = p.peek_kind().clone() {
        if !ADDITIVE_OPS.contains(&op.as_str()) {
            break;
        }
        let span = p.current_span();
        p.advance();
        let right = parse_multiplicative(p)?;
        left = CoreNode::BinaryExpression {
            operator: op,
            left: Box::new(left),
            right: Box::new(right),
            span: Some(span),
        };
    }
    Ok(left)
}

fn parse_multiplicative(p: &mut Parser) -> Result<CoreNode> {
    let mut left = parse_unary(p)?;
    while let TokenKind::Operator(op) = p.peek_kind().clone() {
        if !MULTIPLICATIVE_OPS.contains(&op.as_str()) {
            break;
        }
        let span = p.current_span();
        p.advance();
        let right = parse_unary(p)?;
        left = CoreNode::BinaryExpression {
            operator: op,
            left: Box::new(left),
            right: Box::new(right),
            span: Some(span),
        };
    }
    Ok(left)
}

fn parse_unary(p: &mut Parser) -> Result<CoreNode> {
    let is_not = p.is_keyword("not") || p.is_operator("!");
    if is_not {
        let span = p.current_span();
        p.advance();
        let argument = parse_unary(p)?;
        return Ok(CoreNode::UnaryExpression { operator: "not".into(), argument: Box::new(argument), span: Some(span) });
    }
    if p.is_operator("-") {
        let span = p.current_span();
        p.advance();
        let argument = parse_unary(p)?;
        return Ok(CoreNode::UnaryExpression { operator: "-".into(), argument: Box::new(argument), span: Some(span) });
    }
    parse_postfix(p)
}

fn parse_postfix(p: &mut Parser) -> Result<CoreNode> {
    let mut expr = parse_primary(p)?;
    loop {
        if p.is_operator("'s") {
            p.advance();
            let prop = p.advance().text().to_string();
            expr = CoreNode::PossessiveExpression { object: Box::new(expr), property: prop, span: None };
            continue;
        }
        if let TokenKind::StyleProperty(name) = p.peek_kind().clone() {
            p.advance();
            expr = CoreNode::PossessiveExpression { object: Box::new(expr), property: format!("*{name}"), span: None };
            continue;
        }
        if p.is_symbol('.') {
            p.advance();
            let prop = p.advance().text().to_string();
            expr = CoreNode::MemberExpression {
                object: Box::new(expr),
                property: Box::new(CoreNode::identifier(prop)),
                computed: false,
                span: None,
            };
            continue;
        }
        if p.is_symbol('(') {
            p.advance();
            let mut args = Vec::new();
            while !p.is_symbol(')') && !p.is_eof() {
                args.push(parse_expression(p)?);
                if p.is_symbol(',') {
                    p.advance();
                }
            }
            if p.is_symbol(')') {
                p.advance();
            }
            expr = CoreNode::CallExpression { callee: Box::new(expr), arguments: args, span: None };
            continue;
        }
        if p.is_symbol('[') && !matches!(expr, CoreNode::Selector { .. }) {
            p.advance();
            let index = parse_expression(p)?;
            if p.is_symbol(']') {
                p.advance();
            }
            expr = CoreNode::MemberExpression { object: Box::new(expr), property: Box::new(index), computed: true, span: None };
            continue;
        }
        break;
    }
    Ok(expr)
}

fn parse_primary(p: &mut Parser) -> Result<CoreNode> {
    let span = p.current_span();
    match p.peek_kind().clone() {
        TokenKind::String(s) => {
            p.advance();
            Ok(CoreNode::Literal { value: crate::core_ast::Literal::String(unquote(&s)), span: Some(span) })
        }
        TokenKind::Number(s) => {
            p.advance();
            let n: f64 = s.trim_end_matches(|c: char| c.is_alphabetic()).parse().unwrap_or(0.0);
            Ok(CoreNode::Literal { value: crate::core_ast::Literal::Number(n), span: Some(span) })
        }
        TokenKind::Selector(s) => {
            p.advance();
            Ok(CoreNode::Selector { value: s, span: Some(span) })
        }
        TokenKind::LocalVar(name) => {
            p.advance();
            Ok(CoreNode::Variable { name, scope: hyperfixi_base::VarScope::Local, span: Some(span) })
        }
        TokenKind::GlobalVar(name) => {
            p.advance();
            Ok(CoreNode::Variable { name, scope: hyperfixi_base::VarScope::Global, span: Some(span) })
        }
        TokenKind::Symbol('(') => {
            p.advance();
            let inner = parse_expression(p)?;
            if p.is_symbol(')') {
                p.advance();
            }
            Ok(inner)
        }
        TokenKind::Symbol('[') => {
            p.advance();
            let mut items = Vec::new();
            while !p.is_symbol(']') && !p.is_eof() {
                items.push(parse_expression(p)?);
                if p.is_symbol(',') {
                    p.advance();
                }
            }
            if p.is_symbol(']') {
                p.advance();
            }
            Ok(CoreNode::CallExpression {
                callee: Box::new(CoreNode::identifier("array")),
                arguments: items,
                span: Some(span),
            })
        }
        TokenKind::Keyword(word) | TokenKind::Identifier(word) => {
            if word == "true" || word == "false" {
                p.advance();
                return Ok(CoreNode::Literal { value: crate::core_ast::Literal::Bool(word == "true"), span: Some(span) });
            }
            if word == "null" || word == "nothing" {
                p.advance();
                return Ok(CoreNode::Literal { value: crate::core_ast::Literal::Null, span: Some(span) });
            }
            if word == "my" || word == "its" {
                p.advance();
                let implicit_object = if word == "my" { "me" } else { "it" };
                let prop = p.advance().text().to_string();
                return Ok(CoreNode::PossessiveExpression {
                    object: Box::new(CoreNode::identifier(implicit_object)),
                    property: prop,
                    span: Some(span),
                });
            }
            if POSITIONAL_WORDS.contains(&word.as_str()) {
                p.advance();
                let target = if p.eat_keyword("in") {
                    Some(Box::new(parse_postfix(p)?))
                } else {
                    None
                };
                return Ok(CoreNode::Positional { position: word, target, span: Some(span) });
            }
            p.advance();
            Ok(CoreNode::identifier(word))
        }
        _ => Err(HyperfixiError::new(
            HyperfixiErrorKind::UnexpectedToken {
                expected: "expression".into(),
                found: p.peek_kind().clone(),
            },
            span,
        )),
    }
}

fn current_word(p: &Parser) -> Option<String> {
    match p.peek_kind() {
        TokenKind::Keyword(w) | TokenKind::Identifier(w) => Some(w.clone()),
        TokenKind::Operator(w) => Some(w.clone()),
        _ => None,
    }
}

fn unquote(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.len() >= 2 {
        let bytes = trimmed.as_bytes();
        let first = bytes[0];
        let last = bytes[bytes.len() - 1];
        if (first == b'"' || first == b'\'') && first == last {
            return trimmed[1..trimmed.len() - 1].replace("\\\"", "\"").replace("\\'", "'");
        }
    }
    trimmed.to_string()
}
