//! Control-flow codegen (spec §4.9): lowers `if`/`repeat`/`foreach`/`while`
//! interchange nodes into target-language control structures. Statement
//! bodies are generated by a caller-supplied emitter so this module stays
//! agnostic to how a body's individual statements get joined.

use crate::expr::{generate, GeneratedCode};
use crate::context::CodegenContext;
use hyperfixi_ir::Node;

/// Joins a list of body nodes into one generated block. The bundle
/// assembler supplies the real implementation (sequencing commands and
/// nested control-flow); tests pass a trivial stub.
pub type BodyEmitter<'a> = dyn FnMut(&[Node], &mut CodegenContext) -> GeneratedCode + 'a;

pub(crate) fn indent(code: &str) -> String {
    code.lines().map(|l| format!("  {l}")).collect::<Vec<_>>().join("\n")
}

fn json_str(s: &str) -> String {
    format!("{:?}", s)
}

pub fn generate_if(node: &Node, ctx: &mut CodegenContext, emit: &mut BodyEmitter) -> Option<GeneratedCode> {
    let Node::If { condition, then_branch, else_if_branches, else_branch, .. } = node else { return None };

    let cond = generate(condition, ctx);
    let then = emit(then_branch, ctx);
    let mut code = format!("if ({}) {{\n{}\n}}", cond.code, indent(&then.code));
    let mut is_async = cond.is_async || then.is_async;
    let mut side_effects = then.side_effects;

    for (branch_cond, branch_body) in else_if_branches {
        let bc = generate(branch_cond, ctx);
        let bb = emit(branch_body, ctx);
        code.push_str(&format!(" else if ({}) {{\n{}\n}}", bc.code, indent(&bb.code)));
        is_async = is_async || bc.is_async || bb.is_async;
        side_effects = side_effects || bb.side_effects;
    }

    if let Some(else_body) = else_branch {
        let eb = emit(else_body, ctx);
        code.push_str(&format!(" else {{\n{}\n}}", indent(&eb.code)));
        is_async = is_async || eb.is_async;
        side_effects = side_effects || eb.side_effects;
    }

    Some(GeneratedCode { code, is_async, side_effects })
}

pub fn generate_repeat(node: &Node, ctx: &mut CodegenContext, emit: &mut BodyEmitter) -> Option<GeneratedCode> {
    let Node::Repeat { body, count, while_condition, .. } = node else { return None };
    let cap = ctx.max_loop_iterations;

    if let Some(count_expr) = count {
        let count_code = generate(count_expr, ctx);
        let i = ctx.next_id("i");
        let body_code = emit(body, ctx);
        let code = format!(
            "for (let {i} = 0; {i} < Math.min({}, {cap}); {i}++) {{\n  _ctx.locals.set(\"index\", {i});\n{}\n}}",
            count_code.code,
            indent(&body_code.code)
        );
        return Some(GeneratedCode {
            code,
            is_async: count_code.is_async || body_code.is_async,
            side_effects: true,
        });
    }

    if let Some(cond) = while_condition {
        let cond_code = generate(cond, ctx);
        let body_code = emit(body, ctx);
        let counter = ctx.next_id("_iter");
        let code = format!(
            "let {counter} = 0;\nwhile ({}) {{\n  if ({counter}++ >= {cap}) break;\n{}\n}}",
            cond_code.code,
            indent(&body_code.code)
        );
        return Some(GeneratedCode {
            code,
            is_async: cond_code.is_async || body_code.is_async,
            side_effects: true,
        });
    }

    // Neither a count nor a while-condition: `repeat forever`, intended to
    // be broken out of from within its body.
    let body_code = emit(body, ctx);
    let counter = ctx.next_id("_iter");
    let code = format!(
        "let {counter} = 0;\nwhile (true) {{\n  if ({counter}++ >= {cap}) break;\n{}\n}}",
        indent(&body_code.code)
    );
    Some(GeneratedCode { code, is_async: body_code.is_async, side_effects: true })
}

pub fn generate_foreach(node: &Node, ctx: &mut CodegenContext, emit: &mut BodyEmitter) -> Option<GeneratedCode> {
    let Node::Foreach { item_name, index_name, collection, body, .. } = node else { return None };
    let coll = generate(collection, ctx);
    let arr = ctx.next_id("_arr");
    let i = ctx.next_id("i");
    let body_code = emit(body, ctx);
    let index_name = index_name.clone().unwrap_or_else(|| "index".to_string());
    let cap = ctx.max_loop_iterations;

    let code = format!(
        "const {arr} = Array.isArray({coll}) ? {coll} : Array.from({coll});\n\
for (let {i} = 0; {i} < Math.min({arr}.length, {cap}); {i}++) {{\n  \
_ctx.locals.set({item}, {arr}[{i}]);\n  \
_ctx.locals.set({index}, {i});\n{body}\n}}",
        coll = coll.code,
        item = json_str(item_name),
        index = json_str(&index_name),
        body = indent(&body_code.code),
    );
    Some(GeneratedCode { code, is_async: coll.is_async || body_code.is_async, side_effects: true })
}

pub fn generate_while(node: &Node, ctx: &mut CodegenContext, emit: &mut BodyEmitter) -> Option<GeneratedCode> {
    let Node::While { condition, body, .. } = node else { return None };
    let cond = generate(condition, ctx);
    let body_code = emit(body, ctx);
    let counter = ctx.next_id("_iter");
    let cap = ctx.max_loop_iterations;
    let code = format!(
        "let {counter} = 0;\nwhile ({}) {{\n  if ({counter}++ >= {cap}) break;\n{}\n}}",
        cond.code,
        indent(&body_code.code)
    );
    Some(GeneratedCode { code, is_async: cond.is_async || body_code.is_async, side_effects: true })
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyperfixi_ir::from_core;
    use hyperfixi_parser::Parser;

    fn control_node(src: &str) -> Node {
        let ast = Parser::parse(src).unwrap();
        let Node::Event { body, .. } = from_core(&ast[0]) else { panic!("expected event") };
        body.into_iter().next().unwrap()
    }

    fn stub_emit(body: &[Node], ctx: &mut CodegenContext) -> GeneratedCode {
        let parts: Vec<String> = body.iter().map(|n| generate(n, ctx).code).collect();
        GeneratedCode { code: parts.join(";\n"), is_async: false, side_effects: !parts.is_empty() }
    }

    #[test]
    fn if_without_else_renders_single_branch() {
        let node = control_node("on click if :x show end");
        let mut ctx = CodegenContext::new("h0");
        let mut emit: Box<BodyEmitter> = Box::new(stub_emit);
        let out = generate_if(&node, &mut ctx, &mut *emit).unwrap();
        assert!(out.code.starts_with("if ("));
        assert!(!out.code.contains("else"));
    }

    #[test]
    fn repeat_times_uses_counted_for_loop() {
        let node = control_node("on click repeat 3 times log \"x\" end");
        let mut ctx = CodegenContext::new("h0");
        let mut emit: Box<BodyEmitter> = Box::new(stub_emit);
        let out = generate_repeat(&node, &mut ctx, &mut *emit).unwrap();
        assert!(out.code.contains("for (let i0 = 0; i0 < Math.min(3, 1000); i0++)"));
    }

    #[test]
    fn foreach_binds_item_and_default_index() {
        let node = control_node("on click for each x in :items log x end");
        let mut ctx = CodegenContext::new("h0");
        let mut emit: Box<BodyEmitter> = Box::new(stub_emit);
        let out = generate_foreach(&node, &mut ctx, &mut *emit).unwrap();
        assert!(out.code.contains("_ctx.locals.set(\"x\""));
        assert!(out.code.contains("_ctx.locals.set(\"index\""));
    }

    #[test]
    fn while_loop_has_iteration_cap_guard() {
        let node = control_node("on click while :x log \"tick\" end");
        let mut ctx = CodegenContext::new("h0");
        let mut emit: Box<BodyEmitter> = Box::new(stub_emit);
        let out = generate_while(&node, &mut ctx, &mut *emit).unwrap();
        assert!(out.code.contains(">= 1000) break"));
    }
}
