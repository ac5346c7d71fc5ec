//! Front-end A: recursive-descent core parser (spec §4.2).
//!
//! `[token] -> coreAST`. Standard precedence climbing for expressions;
//! command sub-parsers consume positional operands then trailing
//! prepositional modifiers.

mod expression;

use crate::alias::canonical_command_name;
use crate::core_ast::{CoreNode, EventModifiers, Literal};
use hyperfixi_base::{
    HyperfixiError, HyperfixiErrorKind, Result, Span, Token, TokenKind,
};
use std::collections::HashMap;

/// Prepositional modifier keywords a generic command may consume, each
/// followed by a single expression operand.
const MODIFIER_KEYWORDS: &[&str] = &[
    "to", "into", "before", "after", "from", "on", "with", "as", "by", "over", "when", "where",
];

/// Commands that introduce a nested block closed by `end`, rather than
/// consuming a flat modifier list.
const BLOCK_COMMANDS: &[&str] = &["if", "unless", "repeat", "for", "while", "fetch", "tell", "async"];

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    pub fn parse(source: &str) -> Result<Vec<CoreNode>> {
        let tokens = crate::lexer::tokenize(source);
        let mut parser = Parser::new(tokens);
        parser.parse_program()
    }

    // -- token stream helpers -------------------------------------------------

    fn current(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn peek_kind(&self) -> &TokenKind {
        &self.current().kind
    }

    fn is_eof(&self) -> bool {
        matches!(self.peek_kind(), TokenKind::Eof)
    }

    fn advance(&mut self) -> Token {
        let tok = self.current().clone();
        if !self.is_eof() {
            self.pos += 1;
        }
        tok
    }

    fn current_span(&self) -> Span {
        self.current().position.unwrap_or(Span::SYNTHETIC)
    }

    fn is_keyword(&self, word: &str) -> bool {
        matches!(self.peek_kind(), TokenKind::Keyword(k) if k == word)
            || matches!(self.peek_kind(), TokenKind::Identifier(k) if k == word)
    }

    fn is_symbol(&self, c: char) -> bool {
        matches!(self.peek_kind(), TokenKind::Symbol(s) if *s == c)
    }

    fn is_operator(&self, op: &str) -> bool {
        matches!(self.peek_kind(), TokenKind::Operator(o) if o == op)
    }

    fn eat_keyword(&mut self, word: &str) -> bool {
        if self.is_keyword(word) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect_keyword(&mut self, word: &str) -> Result<()> {
        if self.eat_keyword(word) {
            Ok(())
        } else {
            Err(HyperfixiError::new(
                HyperfixiErrorKind::ExpectedKeyword { expected: word.into() },
                self.current_span(),
            ))
        }
    }

    fn at_statement_boundary(&self) -> bool {
        self.is_eof()
            || self.is_keyword("then")
            || self.is_keyword("and")
            || self.is_keyword("end")
            || self.is_keyword("else")
    }

    // -- program / event handlers ---------------------------------------------

    pub fn parse_program(&mut self) -> Result<Vec<CoreNode>> {
        let mut handlers = Vec::new();
        while !self.is_eof() {
            handlers.push(self.parse_top_level()?);
        }
        Ok(handlers)
    }

    fn parse_top_level(&mut self) -> Result<CoreNode> {
        let start = self.current_span();
        if self.eat_keyword("on") {
            return self.parse_event_handler(start, None);
        }
        if self.eat_keyword("init") {
            return self.parse_event_handler_body(start, "init".into(), EventModifiers::default());
        }
        if self.eat_keyword("every") {
            let duration = self.parse_duration_literal()?;
            return self.parse_event_handler_body(
                start,
                format!("interval:{duration}"),
                EventModifiers::default(),
            );
        }
        // A bare command sequence at the top level: wrap, matching
        // `fromCore`'s policy of representing standalone sequences as a
        // synthetic `click` handler (spec §4.4).
        let commands = self.parse_command_sequence(&[])?;
        Ok(CoreNode::EventHandler {
            event: "click".into(),
            modifiers: EventModifiers::default(),
            body: commands,
            span: Some(start),
        })
    }

    fn parse_event_handler(&mut self, start: Span, _unused: Option<()>) -> Result<CoreNode> {
        let event = self.parse_event_name()?;
        let mut modifiers = EventModifiers::default();
        while self.is_symbol('.') {
            self.advance();
            self.parse_event_modifier(&mut modifiers)?;
        }
        if self.eat_keyword("from") {
            modifiers.from = Some(self.parse_selector_text()?);
        }
        self.parse_event_handler_body(start, event, modifiers)
    }

    fn parse_event_handler_body(
        &mut self,
        start: Span,
        event: String,
        modifiers: EventModifiers,
    ) -> Result<CoreNode> {
        let body = self.parse_command_sequence(&[])?;
        Ok(CoreNode::EventHandler { event, modifiers, body, span: Some(start) })
    }

    fn parse_event_name(&mut self) -> Result<String> {
        let tok = self.advance();
        Ok(tok.text().to_string())
    }

    fn parse_event_modifier(&mut self, modifiers: &mut EventModifiers) -> Result<()> {
        let word = self.advance().text().to_string();
        match word.as_str() {
            "once" => modifiers.once = true,
            "prevent" => modifiers.prevent = true,
            "stop" => modifiers.stop = true,
            "capture" => modifiers.capture = true,
            "passive" => modifiers.passive = true,
            "debounce" => modifiers.debounce = Some(self.parse_paren_number()?),
            "throttle" => modifiers.throttle = Some(self.parse_paren_number()?),
            _ => {}
        }
        Ok(())
    }

    fn parse_paren_number(&mut self) -> Result<i64> {
        if self.is_symbol('(') {
            self.advance();
            let n = match self.peek_kind() {
                TokenKind::Number(s) => s.trim_end_matches(|c: char| c.is_alphabetic()).parse().unwrap_or(0),
                _ => 0,
            };
            self.advance();
            if self.is_symbol(')') {
                self.advance();
            }
            Ok(n)
        } else {
            Ok(0)
        }
    }

    fn parse_duration_literal(&mut self) -> Result<i64> {
        match self.peek_kind().clone() {
            TokenKind::Number(s) => {
                self.advance();
                Ok(parse_duration_ms(&s))
            }
            _ => Ok(0),
        }
    }

    fn parse_selector_text(&mut self) -> Result<String> {
        let tok = self.advance();
        Ok(tok.text().to_string())
    }

    // -- command sequences -----------------------------------------------------

    /// Parses statements separated by `then`/`and` until `end`, one of
    /// `terminators`, or EOF.
    fn parse_command_sequence(&mut self, terminators: &[&str]) -> Result<Vec<CoreNode>> {
        let mut commands = Vec::new();
        loop {
            if self.is_eof() || self.is_keyword("end") || terminators.iter().any(|t| self.is_keyword(t)) {
                break;
            }
            commands.push(self.parse_command_or_control()?);
            while self.eat_keyword("then") || self.eat_keyword("and") {}
        }
        Ok(commands)
    }

    fn parse_command_or_control(&mut self) -> Result<CoreNode> {
        if self.is_keyword("if") || self.is_keyword("unless") {
            return self.parse_if();
        }
        if self.is_keyword("repeat") {
            return self.parse_repeat();
        }
        if self.is_keyword("for") {
            return self.parse_for();
        }
        if self.is_keyword("while") {
            return self.parse_while();
        }
        if self.is_keyword("fetch") {
            return self.parse_fetch();
        }
        if self.is_keyword("tell") {
            return self.parse_tell();
        }
        if self.is_keyword("async") {
            return self.parse_async();
        }
        self.parse_generic_command()
    }

    /// `tell target { … } end`: scopes a nested body to a rebound `me`/`you`.
    fn parse_tell(&mut self) -> Result<CoreNode> {
        let start = self.current_span();
        self.advance(); // tell
        let target = self.parse_operand()?;
        let body = self.parse_command_sequence(&[])?;
        self.expect_keyword("end")?;
        Ok(CoreNode::Command {
            name: "tell".into(),
            args: Vec::new(),
            target: Some(Box::new(target)),
            modifiers: HashMap::new(),
            is_blocking: true,
            condition: None,
            then_branch: Some(body),
            else_if_branches: Vec::new(),
            else_branch: None,
            loop_variant: None,
            count: None,
            while_condition: None,
            item_name: None,
            index_name: None,
            collection: None,
            span: Some(start),
        })
    }

    /// `async { … } end`: wraps a nested body in a fire-and-forget block.
    fn parse_async(&mut self) -> Result<CoreNode> {
        let start = self.current_span();
        self.advance(); // async
        let body = self.parse_command_sequence(&[])?;
        self.expect_keyword("end")?;
        Ok(CoreNode::Command {
            name: "async".into(),
            args: Vec::new(),
            target: None,
            modifiers: HashMap::new(),
            is_blocking: false,
            condition: None,
            then_branch: Some(body),
            else_if_branches: Vec::new(),
            else_branch: None,
            loop_variant: None,
            count: None,
            while_condition: None,
            item_name: None,
            index_name: None,
            collection: None,
            span: Some(start),
        })
    }

    fn parse_if(&mut self) -> Result<CoreNode> {
        let start = self.current_span();
        let negate = self.is_keyword("unless");
        self.advance(); // if | unless

        let mut condition = self.parse_expression()?;
        if negate {
            condition = CoreNode::UnaryExpression {
                operator: "not".into(),
                argument: Box::new(condition),
                span: Some(start),
            };
        }
        let then_branch = self.parse_command_sequence(&["else"])?;
        let mut else_if_branches = Vec::new();
        let mut else_branch = None;
        while self.eat_keyword("else") {
            if self.eat_keyword("if") {
                let cond = self.parse_expression()?;
                let body = self.parse_command_sequence(&["else"])?;
                else_if_branches.push((cond, body));
            } else {
                else_branch = Some(self.parse_command_sequence(&[])?);
                break;
            }
        }
        self.expect_keyword("end")?;
        Ok(CoreNode::Command {
            name: "if".into(),
            args: Vec::new(),
            target: None,
            modifiers: HashMap::new(),
            is_blocking: true,
            condition: Some(Box::new(condition)),
            then_branch: Some(then_branch),
            else_if_branches,
            else_branch,
            loop_variant: None,
            count: None,
            while_condition: None,
            item_name: None,
            index_name: None,
            collection: None,
            span: Some(start),
        })
    }

    fn parse_repeat(&mut self) -> Result<CoreNode> {
        let start = self.current_span();
        self.advance(); // repeat

        let (loop_variant, count, while_condition) = if self.eat_keyword("forever") {
            (Some("forever".to_string()), None, None)
        } else if self.eat_keyword("while") {
            let cond = self.parse_expression()?;
            (Some("while".to_string()), None, Some(cond))
        } else {
            let count_expr = self.parse_expression()?;
            self.eat_keyword("times");
            (Some("times".to_string()), Some(count_expr), None)
        };
        let body = self.parse_command_sequence(&[])?;
        self.expect_keyword("end")?;
        Ok(CoreNode::Command {
            name: "repeat".into(),
            args: Vec::new(),
            target: None,
            modifiers: HashMap::new(),
            is_blocking: true,
            condition: None,
            then_branch: None,
            else_if_branches: Vec::new(),
            else_branch: None,
            loop_variant,
            count: count.map(Box::new),
            while_condition: while_condition.map(Box::new),
            item_name: None,
            index_name: None,
            collection: None,
            span: Some(start),
        })
    }

    fn parse_for(&mut self) -> Result<CoreNode> {
        let start = self.current_span();
        self.advance(); // for
        self.eat_keyword("each");
        let item_name = self.advance().text().to_string();
        let index_name = if self.eat_keyword("with") {
            Some(self.advance().text().to_string())
        } else {
            None
        };
        self.expect_keyword("in")?;
        let collection = self.parse_expression()?;
        let body = self.parse_command_sequence(&[])?;
        self.expect_keyword("end")?;
        Ok(CoreNode::Command {
            name: "repeat".into(),
            args: Vec::new(),
            target: None,
            modifiers: HashMap::new(),
            is_blocking: true,
            condition: None,
            then_branch: Some(body),
            else_if_branches: Vec::new(),
            else_branch: None,
            loop_variant: Some("for".into()),
            count: None,
            while_condition: None,
            item_name: Some(item_name),
            index_name,
            collection: Some(Box::new(collection)),
            span: Some(start),
        })
    }

    fn parse_while(&mut self) -> Result<CoreNode> {
        let start = self.current_span();
        self.advance(); // while
        let condition = self.parse_expression()?;
        let body = self.parse_command_sequence(&[])?;
        self.expect_keyword("end")?;
        Ok(CoreNode::Command {
            name: "repeat".into(),
            args: Vec::new(),
            target: None,
            modifiers: HashMap::new(),
            is_blocking: true,
            condition: None,
            then_branch: Some(body),
            else_if_branches: Vec::new(),
            else_branch: None,
            loop_variant: Some("while".into()),
            count: None,
            while_condition: Some(Box::new(condition)),
            item_name: None,
            index_name: None,
            collection: None,
            span: Some(start),
        })
    }

    fn parse_fetch(&mut self) -> Result<CoreNode> {
        let start = self.current_span();
        self.advance(); // fetch
        let url = self.parse_expression()?;
        let mut modifiers = HashMap::new();
        if self.eat_keyword("as") {
            modifiers.insert("as".to_string(), self.parse_expression()?);
        }
        let body = if self.eat_keyword("then") {
            self.parse_command_sequence(&[])?
        } else {
            Vec::new()
        };
        self.expect_keyword("end")?;
        Ok(CoreNode::Command {
            name: "fetch".into(),
            args: vec![url],
            target: None,
            modifiers,
            is_blocking: true,
            condition: None,
            then_branch: Some(body),
            else_if_branches: Vec::new(),
            else_branch: None,
            loop_variant: None,
            count: None,
            while_condition: None,
            item_name: None,
            index_name: None,
            collection: None,
            span: Some(start),
        })
    }

    /// Generic command: `name` keyword, then positional operands, then
    /// trailing `modifier expr` pairs, until a statement boundary.
    fn parse_generic_command(&mut self) -> Result<CoreNode> {
        let start = self.current_span();
        let raw_name = self.advance().text().to_string();
        let name = canonical_command_name(&raw_name).to_string();

        if BLOCK_COMMANDS.contains(&name.as_str()) {
            // Unknown block-style keyword we don't special-case: consume a
            // single token and drop it (spec §4.2 "unknown command names
            // are swallowed by consuming one token").
            return Ok(CoreNode::Command {
                name,
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
                span: Some(start),
            });
        }

        let mut args = Vec::new();
        let mut modifiers = HashMap::new();

        while !self.at_statement_boundary() {
            if let TokenKind::Identifier(word) | TokenKind::Keyword(word) = self.peek_kind().clone() {
                if MODIFIER_KEYWORDS.contains(&word.as_str()) {
                    self.advance();
                    // `parse_operand`, not `parse_expression`: a bare
                    // `and`/`or` after a positional or modifier value is the
                    // command-sequence separator, not a logical operator.
                    let value = self.parse_operand()?;
                    modifiers.insert(word, value);
                    continue;
                }
            }
            args.push(self.parse_operand()?);
        }

        // `on <target>` is the one modifier that also doubles as the
        // command's implicit receiver (e.g. `toggle .open on #menu`);
        // everything else stays keyed in `modifiers`.
        let target = modifiers.get("on").cloned().map(Box::new);
        Ok(CoreNode::Command {
            name,
            args,
            target,
            modifiers,
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
            span: Some(start),
        })
    }

    // Exposed for the expression submodule.
    pub(crate) fn parse_expression(&mut self) -> Result<CoreNode> {
        expression::parse_expression(self)
    }

    /// Entry point for command positional arguments and modifier values:
    /// stops below logical-or/and so a bare `and`/`or` is left for the
    /// command-sequence separator loop to consume.
    fn parse_operand(&mut self) -> Result<CoreNode> {
        expression::parse_operand(self)
    }
}

/// Parses a duration literal like `2s`/`500ms` into milliseconds. Bare
/// numbers are treated as milliseconds already.
pub fn parse_duration_ms(text: &str) -> i64 {
    let trimmed = text.trim();
    if let Some(n) = trimmed.strip_suffix("ms") {
        return n.parse().unwrap_or(0);
    }
    if let Some(n) = trimmed.strip_suffix('s') {
        return n.parse::<f64>().map(|v| (v * 1000.0) as i64).unwrap_or(0);
    }
    trimmed.parse().unwrap_or(0)
}

impl CoreNode {
    pub fn literal_str(value: impl Into<String>) -> CoreNode {
        CoreNode::Literal { value: Literal::String(value.into()), span: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_event_handler() {
        let ast = Parser::parse("on click toggle .open").unwrap();
        assert_eq!(ast.len(), 1);
        match &ast[0] {
            CoreNode::EventHandler { event, body, .. } => {
                assert_eq!(event, "click");
                assert_eq!(body.len(), 1);
            }
            other => panic!("expected EventHandler, got {other:?}"),
        }
    }

    #[test]
    fn parses_modifiers_and_from() {
        let ast = Parser::parse("on click.once.prevent from #btn log \"hi\"").unwrap();
        match &ast[0] {
            CoreNode::EventHandler { modifiers, .. } => {
                assert!(modifiers.once);
                assert!(modifiers.prevent);
                assert_eq!(modifiers.from.as_deref(), Some("#btn"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn parses_if_else_end() {
        let ast = Parser::parse("on click if :x show else hide end").unwrap();
        match &ast[0] {
            CoreNode::EventHandler { body, .. } => match &body[0] {
                CoreNode::Command { name, then_branch, else_branch, .. } => {
                    assert_eq!(name, "if");
                    assert_eq!(then_branch.as_ref().unwrap().len(), 1);
                    assert!(else_branch.is_some());
                }
                other => panic!("unexpected {other:?}"),
            },
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn parses_repeat_times() {
        let ast = Parser::parse("on click repeat 3 times log \"hi\" end").unwrap();
        match &ast[0] {
            CoreNode::EventHandler { body, .. } => match &body[0] {
                CoreNode::Command { loop_variant, .. } => {
                    assert_eq!(loop_variant.as_deref(), Some("times"));
                }
                other => panic!("unexpected {other:?}"),
            },
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn parses_for_each_loop() {
        let ast = Parser::parse("on click for each x in :items log x end").unwrap();
        match &ast[0] {
            CoreNode::EventHandler { body, .. } => match &body[0] {
                CoreNode::Command { loop_variant, item_name, .. } => {
                    assert_eq!(loop_variant.as_deref(), Some("for"));
                    assert_eq!(item_name.as_deref(), Some("x"));
                }
                other => panic!("unexpected {other:?}"),
            },
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn parses_set_with_to_modifier() {
        let ast = Parser::parse("on click set :count to 5").unwrap();
        match &ast[0] {
            CoreNode::EventHandler { body, .. } => match &body[0] {
                CoreNode::Command { name, args, modifiers, .. } => {
                    assert_eq!(name, "set");
                    assert_eq!(args.len(), 1);
                    assert!(modifiers.contains_key("to"));
                }
                other => panic!("unexpected {other:?}"),
            },
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn every_synthesizes_interval_event() {
        let ast = Parser::parse("every 2s log \"tick\"").unwrap();
        match &ast[0] {
            CoreNode::EventHandler { event, .. } => assert_eq!(event, "interval:2000"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn init_is_event_on_init() {
        let ast = Parser::parse("init log \"ready\"").unwrap();
        match &ast[0] {
            CoreNode::EventHandler { event, .. } => assert_eq!(event, "init"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn duration_parses_ms_and_seconds() {
        assert_eq!(parse_duration_ms("500ms"), 500);
        assert_eq!(parse_duration_ms("2s"), 2000);
        assert_eq!(parse_duration_ms("10"), 10);
    }

    #[test]
    fn parses_tell_with_nested_body() {
        let ast = Parser::parse("on click tell .item toggle .open end").unwrap();
        match &ast[0] {
            CoreNode::EventHandler { body, .. } => match &body[0] {
                CoreNode::Command { name, target, then_branch, .. } => {
                    assert_eq!(name, "tell");
                    assert!(target.is_some());
                    assert_eq!(then_branch.as_ref().unwrap().len(), 1);
                }
                other => panic!("unexpected {other:?}"),
            },
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn parses_async_with_nested_body() {
        let ast = Parser::parse("on click async wait \"1s\" then log \"done\" end").unwrap();
        match &ast[0] {
            CoreNode::EventHandler { body, .. } => match &body[0] {
                CoreNode::Command { name, then_branch, is_blocking, .. } => {
                    assert_eq!(name, "async");
                    assert!(!is_blocking);
                    assert_eq!(then_branch.as_ref().unwrap().len(), 2);
                }
                other => panic!("unexpected {other:?}"),
            },
            other => panic!("unexpected {other:?}"),
        }
    }
}
