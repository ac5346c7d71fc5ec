//! Expression codegen (spec §4.7): lowers interchange expressions to target
//! language expression strings.

use crate::context::{CodegenContext, SelectorCachePolicy};
use hyperfixi_ir::{LiteralValue, Node, Scope};

/// `{code, async, sideEffects}` (spec §3). These three bits propagate
/// upward through command and control-flow codegen to decide whether a
/// handler body must be wrapped in an async construct.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedCode {
    pub code: String,
    pub is_async: bool,
    pub side_effects: bool,
}

impl GeneratedCode {
    pub fn sync(code: impl Into<String>) -> Self {
        Self { code: code.into(), is_async: false, side_effects: false }
    }
}

/// Lowers a single interchange expression node.
pub fn generate(node: &Node, ctx: &mut CodegenContext) -> GeneratedCode {
    match node {
        Node::Literal { value, .. } => GeneratedCode::sync(literal_code(value)),
        Node::Identifier { value, .. } => GeneratedCode::sync(identifier_code(value, ctx)),
        Node::Variable { name, scope, .. } => {
            let code = match scope {
                Scope::Global => {
                    ctx.require_helper("globals");
                    format!("_rt.globals.get({})", json_string(name))
                }
                Scope::Local | Scope::Element => format!("_ctx.locals.get({})", json_string(name)),
            };
            GeneratedCode::sync(code)
        }
        Node::Selector { value, .. } => GeneratedCode::sync(selector_code(value, ctx)),
        Node::Possessive { object, property, .. } => {
            let obj = generate(object, ctx);
            let code = if let Some(style_prop) = property.strip_prefix('*') {
                format!("{}.style.{}", obj.code, sanitize_identifier(style_prop))
            } else if let Some(attr) = property.strip_prefix('@') {
                format!("{}.getAttribute({})", obj.code, json_string(attr))
            } else {
                format!("{}.{}", obj.code, sanitize_identifier(property))
            };
            GeneratedCode { code, is_async: obj.is_async, side_effects: obj.side_effects }
        }
        Node::Member { object, property, computed, .. } => {
            let obj = generate(object, ctx);
            let code = if *computed {
                let prop = generate(property, ctx);
                format!("{}[{}]", obj.code, prop.code)
            } else {
                format!("{}.{}", obj.code, member_field_name(property))
            };
            GeneratedCode { code, is_async: obj.is_async, side_effects: obj.side_effects }
        }
        Node::Binary { operator, left, right, .. } => {
            let l = generate(left, ctx);
            let r = generate(right, ctx);
            let code = match operator.as_str() {
                "and" => format!("({} && {})", l.code, r.code),
                "or" => format!("({} || {})", l.code, r.code),
                "is" => format!("({} === {})", l.code, r.code),
                "is not" => format!("({} !== {})", l.code, r.code),
                "contains" | "includes" | "has" => format!("{}.includes({})", l.code, r.code),
                "matches" => format!("{}.test({})", r.code, l.code),
                op => format!("({} {op} {})", l.code, r.code),
            };
            GeneratedCode { code, is_async: l.is_async || r.is_async, side_effects: l.side_effects || r.side_effects }
        }
        Node::Unary { operator, operand, .. } => {
            let o = generate(operand, ctx);
            let code = match operator.as_str() {
                "not" => format!("!({})", o.code),
                op => format!("{op}({})", o.code),
            };
            GeneratedCode { code, is_async: o.is_async, side_effects: o.side_effects }
        }
        Node::Call { callee, args, .. } => {
            let callee_code = generate(callee, ctx);
            let arg_codes: Vec<GeneratedCode> = args.iter().map(|a| generate(a, ctx)).collect();
            let joined = arg_codes.iter().map(|a| a.code.as_str()).collect::<Vec<_>>().join(", ");
            let is_async = callee_code.is_async || arg_codes.iter().any(|a| a.is_async);
            GeneratedCode {
                code: format!("{}({joined})", callee_code.code),
                is_async,
                side_effects: true,
            }
        }
        Node::Positional { position, target, .. } => {
            ctx.require_helper("positional");
            let code = match target {
                Some(t) => {
                    let t = generate(t, ctx);
                    format!("_rt.positional({}, {})", json_string(position), t.code)
                }
                None => format!("_rt.positional({})", json_string(position)),
            };
            GeneratedCode::sync(code)
        }
        // The remaining shapes (event/command/if/repeat/foreach/while) are
        // statement-level, not expressions; falling back to a literal-null
        // render keeps this function total the way `fromCore` is.
        _ => GeneratedCode::sync("null"),
    }
}

fn literal_code(value: &LiteralValue) -> String {
    match value {
        LiteralValue::String(s) => json_string(s),
        LiteralValue::Number(n) => {
            if n.fract() == 0.0 && n.is_finite() {
                format!("{n}")
            } else {
                n.to_string()
            }
        }
        LiteralValue::Bool(b) => b.to_string(),
        LiteralValue::Null => "null".to_string(),
    }
}

fn identifier_code(value: &str, ctx: &CodegenContext) -> String {
    match value {
        "me" => ctx.implicit_target.clone(),
        "it" => "_ctx.it".to_string(),
        "you" => "_ctx.you".to_string(),
        other => sanitize_identifier(other),
    }
}

fn selector_code(raw: &str, ctx: &CodegenContext) -> String {
    let scrubbed = scrub_selector(raw);
    if let Some(id) = scrubbed.strip_prefix('#') {
        return format!("document.getElementById({})", json_string(id));
    }
    if scrubbed.starts_with('.') && !scrubbed[1..].contains(['.', '#', '[']) {
        return match ctx.selector_cache_policy {
            SelectorCachePolicy::Cached => format!("_ctx.cachedQuery({})", json_string(&scrubbed)),
            SelectorCachePolicy::Direct => {
                format!("document.getElementsByClassName({})", json_string(&scrubbed[1..]))
            }
        };
    }
    format!("document.querySelectorAll({})", json_string(&scrubbed))
}

fn member_field_name(property: &Node) -> String {
    match property {
        Node::Identifier { value, .. } => sanitize_identifier(value),
        Node::Literal { value: LiteralValue::String(s), .. } => sanitize_identifier(s),
        other => sanitize_identifier(&format!("{other:?}")),
    }
}

fn sanitize_identifier(name: &str) -> String {
    name.chars().filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '$').collect()
}

/// Scrubs a selector/class substring down to characters valid in the
/// generated source (spec §4.7: `[A-Za-z0-9_\-#.\[\]="]`).
fn scrub_selector(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric() || "_-#.[]=\"".contains(*c))
        .collect()
}

/// JSON-style double-quoted string encoding (spec §4.7).
fn json_string(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 2);
    out.push('"');
    for c in raw.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> CodegenContext {
        CodegenContext::new("h0")
    }

    #[test]
    fn literal_string_is_json_quoted() {
        let node = Node::Literal { value: LiteralValue::String("hi\"there".into()), pos: None };
        assert_eq!(generate(&node, &mut ctx()).code, r#""hi\"there""#);
    }

    #[test]
    fn me_identifier_maps_to_implicit_target() {
        let node = Node::identifier("me");
        assert_eq!(generate(&node, &mut ctx()).code, "_ctx.me");
    }

    #[test]
    fn local_variable_reads_from_locals() {
        let node = Node::Variable { name: "count".into(), scope: Scope::Local, pos: None };
        assert_eq!(generate(&node, &mut ctx()).code, r#"_ctx.locals.get("count")"#);
    }

    #[test]
    fn global_variable_requires_globals_helper() {
        let node = Node::Variable { name: "total".into(), scope: Scope::Global, pos: None };
        let mut c = ctx();
        let out = generate(&node, &mut c);
        assert_eq!(out.code, r#"_rt.globals.get("total")"#);
        assert!(c.required_helpers().contains("globals"));
    }

    #[test]
    fn class_selector_uses_direct_policy_by_default() {
        let node = Node::Selector { value: ".open".into(), pos: None };
        assert_eq!(
            generate(&node, &mut ctx()).code,
            r#"document.getElementsByClassName("open")"#
        );
    }

    #[test]
    fn id_selector_uses_get_element_by_id() {
        let node = Node::Selector { value: "#menu".into(), pos: None };
        assert_eq!(generate(&node, &mut ctx()).code, r#"document.getElementById("menu")"#);
    }

    #[test]
    fn possessive_style_property_lowers_to_style_assign_target() {
        let node = Node::Possessive {
            object: Box::new(Node::identifier("me")),
            property: "*opacity".into(),
            pos: None,
        };
        assert_eq!(generate(&node, &mut ctx()).code, "_ctx.me.style.opacity");
    }

    #[test]
    fn binary_and_or_translate_to_js_operators() {
        let node = Node::Binary {
            operator: "and".into(),
            left: Box::new(Node::identifier("a")),
            right: Box::new(Node::identifier("b")),
            pos: None,
        };
        assert_eq!(generate(&node, &mut ctx()).code, "(a && b)");
    }

    #[test]
    fn call_expression_marks_side_effects() {
        let node = Node::Call { callee: Box::new(Node::identifier("doThing")), args: Vec::new(), pos: None };
        assert!(generate(&node, &mut ctx()).side_effects);
    }
}
