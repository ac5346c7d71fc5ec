//! The AOT code generator (spec §4.7–§4.10): lowers interchange nodes into
//! target-language statements, tracking helper dependencies through a
//! [`CodegenContext`] threaded down the expression/command hierarchy.

pub mod bundle;
pub mod context;
pub mod control_flow;
pub mod expr;
pub mod registry;

use context::CodegenContext;
use expr::{generate, GeneratedCode};
use hyperfixi_ir::Node;
use registry::CommandGenerator;
use std::collections::HashMap;

pub use context::SelectorCachePolicy;
pub use registry::CommandFields;

/// One compiled event handler: its statement body plus the bits the bundle
/// assembler needs (spec §3's `{code, async, sideEffects}` propagated up to
/// handler scope, and the accumulated helper closure).
pub struct HandlerArtifact {
    pub handler_id: String,
    pub event: String,
    pub code: String,
    pub is_async: bool,
    pub required_helpers: Vec<&'static str>,
}

/// Lowers one statement-level interchange node: a command dispatches
/// through the registry, control-flow nodes recurse through
/// [`control_flow`], anything else (a bare expression used for its side
/// effects) falls through to expression codegen.
fn generate_statement(
    node: &Node,
    ctx: &mut CodegenContext,
    registry: &HashMap<&'static str, CommandGenerator>,
) -> GeneratedCode {
    match node {
        Node::Command { name, .. } if name == "tell" => generate_tell(node, ctx, registry),
        Node::Command { name, .. } if name == "async" => generate_async(node, ctx, registry),
        Node::Command { .. } => registry::generate_command(node, registry, ctx)
            .unwrap_or_else(|| GeneratedCode::sync("/* unknown command */")),
        Node::If { .. } => {
            let mut emit = |body: &[Node], ctx: &mut CodegenContext| generate_body(body, ctx, registry);
            control_flow::generate_if(node, ctx, &mut emit).unwrap_or_else(|| GeneratedCode::sync("null"))
        }
        Node::Repeat { .. } => {
            let mut emit = |body: &[Node], ctx: &mut CodegenContext| generate_body(body, ctx, registry);
            control_flow::generate_repeat(node, ctx, &mut emit).unwrap_or_else(|| GeneratedCode::sync("null"))
        }
        Node::Foreach { .. } => {
            let mut emit = |body: &[Node], ctx: &mut CodegenContext| generate_body(body, ctx, registry);
            control_flow::generate_foreach(node, ctx, &mut emit).unwrap_or_else(|| GeneratedCode::sync("null"))
        }
        Node::While { .. } => {
            let mut emit = |body: &[Node], ctx: &mut CodegenContext| generate_body(body, ctx, registry);
            control_flow::generate_while(node, ctx, &mut emit).unwrap_or_else(|| GeneratedCode::sync("null"))
        }
        other => generate(other, ctx),
    }
}

/// `tell target { … }` (spec §4.8): rebinds `me`/`you` to `target` for the
/// scope of the nested body, restoring the previous binding afterward.
fn generate_tell(node: &Node, ctx: &mut CodegenContext, registry: &HashMap<&'static str, CommandGenerator>) -> GeneratedCode {
    let Node::Command { target: Some(target), body: Some(body), .. } = node else {
        return GeneratedCode::sync("/* malformed tell */");
    };
    let target_code = generate(target, ctx);
    let prev = ctx.next_id("_prevMe");
    let body_code = generate_body(body, ctx, registry);
    let code = format!(
        "{{\n  const {prev} = _ctx.me;\n  _ctx.me = _ctx.you = {};\n{}\n  _ctx.me = _ctx.you = {prev};\n}}",
        target_code.code,
        control_flow::indent(&body_code.code),
    );
    GeneratedCode { code, is_async: target_code.is_async || body_code.is_async, side_effects: true }
}

/// `async { … }` (spec §4.8, §5): wraps the nested body in a self-invoking
/// async block that is never awaited, introducing concurrent
/// fire-and-forget execution.
fn generate_async(node: &Node, ctx: &mut CodegenContext, registry: &HashMap<&'static str, CommandGenerator>) -> GeneratedCode {
    let Node::Command { body: Some(body), .. } = node else {
        return GeneratedCode::sync("/* malformed async */");
    };
    let body_code = generate_body(body, ctx, registry);
    let code = format!("(async () => {{\n{}\n}})();", control_flow::indent(&body_code.code));
    GeneratedCode { code, is_async: false, side_effects: true }
}

/// Sequences a statement list. An `await` prefix is added to each
/// individual async statement rather than wrapping the whole block, since
/// a later statement may depend on an earlier one's suspension having
/// already resolved (spec §5: suspension points propagate upward, ordering
/// within a body stays strict sequential).
pub fn generate_body(
    body: &[Node],
    ctx: &mut CodegenContext,
    registry: &HashMap<&'static str, CommandGenerator>,
) -> GeneratedCode {
    let mut lines = Vec::with_capacity(body.len());
    let mut is_async = false;
    let mut side_effects = false;
    for stmt in body {
        let generated = generate_statement(stmt, ctx, registry);
        is_async = is_async || generated.is_async;
        side_effects = side_effects || generated.side_effects;
        let line = if generated.is_async && !generated.code.trim_start().starts_with("await ") {
            format!("await {};", generated.code)
        } else {
            format!("{};", generated.code)
        };
        lines.push(line);
    }
    GeneratedCode { code: lines.join("\n"), is_async, side_effects }
}

/// Compiles one event handler (spec §3's handler-scoped compile call): an
/// interchange `Event` node in, a [`HandlerArtifact`] out. `handler_id`
/// becomes both the context's id-generator seed and the artifact's id.
pub fn compile_handler(
    node: &Node,
    handler_id: impl Into<String>,
    registry: &HashMap<&'static str, CommandGenerator>,
) -> Option<HandlerArtifact> {
    let Node::Event { event, body, .. } = node else { return None };
    let handler_id = handler_id.into();
    let mut ctx = CodegenContext::new(handler_id.clone());
    let generated = generate_body(body, &mut ctx, registry);
    Some(HandlerArtifact {
        handler_id,
        event: event.clone(),
        code: generated.code,
        is_async: generated.is_async,
        required_helpers: ctx.required_helpers().iter().copied().collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyperfixi_ir::from_core;
    use hyperfixi_parser::Parser;

    #[test]
    fn compiles_simple_handler_to_toggle_call() {
        let ast = Parser::parse("on click toggle .open").unwrap();
        let node = from_core(&ast[0]);
        let registry = registry::build();
        let artifact = compile_handler(&node, "h0", &registry).unwrap();
        assert_eq!(artifact.event, "click");
        assert!(artifact.code.contains("classList.toggle(\"open\")"));
        assert!(!artifact.is_async);
    }

    #[test]
    fn async_command_marks_handler_async() {
        let ast = Parser::parse("on click wait \"1s\"").unwrap();
        let node = from_core(&ast[0]);
        let registry = registry::build();
        let artifact = compile_handler(&node, "h0", &registry).unwrap();
        assert!(artifact.is_async);
        assert!(artifact.required_helpers.contains(&"wait"));
    }

    #[test]
    fn if_body_sequences_multiple_commands() {
        let ast = Parser::parse("on click if :x show then hide end").unwrap();
        let node = from_core(&ast[0]);
        let registry = registry::build();
        let artifact = compile_handler(&node, "h0", &registry).unwrap();
        assert!(artifact.code.contains("if ("));
        assert!(artifact.code.contains("display = \"\""));
        assert!(artifact.code.contains("display = \"none\""));
    }

    #[test]
    fn tell_rebinds_me_and_you_around_body() {
        let ast = Parser::parse("on click tell .item toggle .open end").unwrap();
        let node = from_core(&ast[0]);
        let registry = registry::build();
        let artifact = compile_handler(&node, "h0", &registry).unwrap();
        assert!(artifact.code.contains("_ctx.me = _ctx.you ="));
        assert!(artifact.code.contains("classList.toggle(\"open\")"));
    }

    #[test]
    fn async_block_is_not_awaited_by_its_handler() {
        let ast = Parser::parse("on click async wait \"1s\" end").unwrap();
        let node = from_core(&ast[0]);
        let registry = registry::build();
        let artifact = compile_handler(&node, "h0", &registry).unwrap();
        assert!(artifact.code.contains("(async () => {"));
        assert!(!artifact.is_async);
    }
}
