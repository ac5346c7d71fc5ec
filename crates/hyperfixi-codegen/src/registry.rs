//! Command codegen registry (spec §4.8): a mapping from canonical command
//! name to a generator function. Each generator reads `roles` when present,
//! otherwise falls back to `args`/`modifiers`/`target`; returns `None` when
//! its minimum required inputs are missing, never panics.

use crate::context::CodegenContext;
use crate::expr::{generate, GeneratedCode};
use hyperfixi_ir::{LiteralValue, Node};
use std::collections::HashMap;

pub type CommandGenerator = fn(&CommandFields, &mut CodegenContext) -> Option<GeneratedCode>;

/// The fields of a `Node::Command`, borrowed out for generator convenience.
pub struct CommandFields<'a> {
    pub name: &'a str,
    pub args: &'a [Node],
    pub target: Option<&'a Node>,
    pub modifiers: &'a HashMap<String, Node>,
    pub roles: Option<&'a HashMap<String, Node>>,
}

impl<'a> CommandFields<'a> {
    pub fn from_node(node: &'a Node) -> Option<Self> {
        match node {
            Node::Command { name, args, target, modifiers, roles, .. } => Some(CommandFields {
                name,
                args,
                target: target.as_deref(),
                modifiers,
                roles: roles.as_ref(),
            }),
            _ => None,
        }
    }

    fn role(&self, role_name: &str) -> Option<&'a Node> {
        self.roles.and_then(|r| r.get(role_name))
    }

    /// Reads a role by name, falling back to a positional arg index.
    fn role_or_arg(&self, role_name: &str, arg_idx: usize) -> Option<&'a Node> {
        self.role(role_name).or_else(|| self.args.get(arg_idx))
    }

    fn modifier(&self, key: &str) -> Option<&'a Node> {
        self.modifiers.get(key)
    }
}

fn literal_string(node: &Node) -> Option<&str> {
    match node {
        Node::Literal { value: LiteralValue::String(s), .. } => Some(s.as_str()),
        _ => None,
    }
}

/// Reads plain text out of a node regardless of whether role inference left
/// it as a string literal or lifted it to an identifier (spec §4.5's
/// `fetch` rule lifts `as`'s string modifier to an identifier in `roles`,
/// while the raw `modifiers` map still holds the original string literal).
fn as_text(node: &Node) -> Option<&str> {
    match node {
        Node::Literal { value: LiteralValue::String(s), .. } => Some(s.as_str()),
        Node::Identifier { value, .. } => Some(value.as_str()),
        _ => None,
    }
}

/// Parses a duration operand (number literal in ms, or a string literal like
/// `"2s"`/`"500ms"`, or an arbitrary expression) into generated milliseconds
/// code.
fn duration_ms_code(node: &Node, ctx: &mut CodegenContext) -> String {
    if let Node::Literal { value: LiteralValue::Number(n), .. } = node {
        return format!("{}", *n as i64);
    }
    if let Some(s) = literal_string(node) {
        if let Some(ms) = s.strip_suffix("ms") {
            if let Ok(n) = ms.parse::<i64>() {
                return n.to_string();
            }
        }
        if let Some(secs) = s.strip_suffix('s') {
            if let Ok(n) = secs.parse::<f64>() {
                return ((n * 1000.0) as i64).to_string();
            }
        }
        if let Ok(n) = s.parse::<i64>() {
            return n.to_string();
        }
    }
    generate(node, ctx).code
}

fn toggle(fields: &CommandFields, ctx: &mut CodegenContext) -> Option<GeneratedCode> {
    let patient = fields.role_or_arg("patient", 0)?;
    let target = fields.role("destination").or(fields.target).map(|t| generate(t, ctx).code).unwrap_or_else(|| ctx.implicit_target.clone());
    let code = match patient {
        Node::Selector { value, .. } if value.starts_with('.') => {
            format!("{target}.classList.toggle({})", json_str(&value[1..]))
        }
        Node::Possessive { property, .. } if property.starts_with('@') => {
            ctx.require_helper("toggleAttr");
            format!("_rt.toggleAttr({target}, {})", json_str(&property[1..]))
        }
        other => {
            ctx.require_helper("toggle");
            format!("_rt.toggle({target}, {})", generate(other, ctx).code)
        }
    };
    Some(GeneratedCode { code, is_async: false, side_effects: true })
}

fn add_cmd(fields: &CommandFields, ctx: &mut CodegenContext) -> Option<GeneratedCode> {
    let patient = fields.role_or_arg("patient", 0)?;
    let target = fields.role("destination").or(fields.target).map(|t| generate(t, ctx).code).unwrap_or_else(|| ctx.implicit_target.clone());
    let code = match patient {
        Node::Selector { value, .. } if value.starts_with('.') => {
            format!("{target}.classList.add({})", json_str(&value[1..]))
        }
        Node::Selector { value, .. } => {
            format!("{target}.insertAdjacentHTML(\"beforeend\", {})", json_str(value))
        }
        other => format!("{target}.appendChild({})", generate(other, ctx).code),
    };
    Some(GeneratedCode { code, is_async: false, side_effects: true })
}

fn remove_cmd(fields: &CommandFields, ctx: &mut CodegenContext) -> Option<GeneratedCode> {
    let patient = fields.role_or_arg("patient", 0);
    let target = fields.role("source").or(fields.target).map(|t| generate(t, ctx).code);
    let code = match patient {
        Some(Node::Selector { value, .. }) if value.starts_with('.') => {
            let t = target.unwrap_or_else(|| ctx.implicit_target.clone());
            format!("{t}.classList.remove({})", json_str(&value[1..]))
        }
        _ => {
            let t = target.unwrap_or_else(|| ctx.implicit_target.clone());
            format!("{t}.remove()")
        }
    };
    Some(GeneratedCode { code, is_async: false, side_effects: true })
}

fn set_cmd(fields: &CommandFields, ctx: &mut CodegenContext) -> Option<GeneratedCode> {
    let destination = fields.role_or_arg("destination", 0)?;
    let value = fields.role("patient").or_else(|| fields.modifier("to")).or_else(|| fields.args.get(1))?;
    let value_code = generate(value, ctx).code;
    let code = match destination {
        Node::Variable { name, scope, .. } => match scope {
            hyperfixi_ir::Scope::Global => {
                ctx.require_helper("globals");
                format!("_rt.globals.set({}, {value_code})", json_str(name))
            }
            _ => format!("_ctx.locals.set({}, {value_code})", json_str(name)),
        },
        Node::Possessive { object, property, .. } => {
            let obj = generate(object, ctx).code;
            if let Some(style_prop) = property.strip_prefix('*') {
                format!("{obj}.style.{} = {value_code}", sanitize(style_prop))
            } else if let Some(attr) = property.strip_prefix('@') {
                format!("{obj}.setAttribute({}, {value_code})", json_str(attr))
            } else {
                format!("{obj}.{} = {value_code}", sanitize(property))
            }
        }
        other => format!("{} = {value_code}", generate(other, ctx).code),
    };
    Some(GeneratedCode { code, is_async: false, side_effects: true })
}

fn put_cmd(fields: &CommandFields, ctx: &mut CodegenContext) -> Option<GeneratedCode> {
    let content = fields.role_or_arg("patient", 0)?;
    let content_code = generate(content, ctx).code;
    let destination = fields.role("destination").or(fields.target);
    let method = fields.role("method").and_then(literal_string).map(str::to_string).or_else(|| {
        ["into", "before", "after"].iter().find(|p| fields.modifier(p).is_some()).map(|s| s.to_string())
    });
    let dest_code = destination
        .map(|d| generate(d, ctx).code)
        .or_else(|| fields.modifier("into").or_else(|| fields.modifier("before")).or_else(|| fields.modifier("after")).map(|d| generate(d, ctx).code))
        .unwrap_or_else(|| ctx.implicit_target.clone());
    let code = match method.as_deref() {
        Some("before") => format!("{dest_code}.insertAdjacentHTML(\"beforebegin\", {content_code})"),
        Some("after") => format!("{dest_code}.insertAdjacentHTML(\"afterend\", {content_code})"),
        _ => format!("{dest_code}.innerHTML = {content_code}"),
    };
    Some(GeneratedCode { code, is_async: false, side_effects: true })
}

fn show(fields: &CommandFields, ctx: &mut CodegenContext) -> Option<GeneratedCode> {
    let target = fields.target.map(|t| generate(t, ctx).code).unwrap_or_else(|| ctx.implicit_target.clone());
    Some(GeneratedCode { code: format!("{target}.style.display = \"\""), is_async: false, side_effects: true })
}

fn hide(fields: &CommandFields, ctx: &mut CodegenContext) -> Option<GeneratedCode> {
    let target = fields.target.map(|t| generate(t, ctx).code).unwrap_or_else(|| ctx.implicit_target.clone());
    Some(GeneratedCode { code: format!("{target}.style.display = \"none\""), is_async: false, side_effects: true })
}

fn focus(fields: &CommandFields, ctx: &mut CodegenContext) -> Option<GeneratedCode> {
    let target = fields.target.map(|t| generate(t, ctx).code).unwrap_or_else(|| ctx.implicit_target.clone());
    Some(GeneratedCode { code: format!("{target}.focus()"), is_async: false, side_effects: true })
}

fn blur(fields: &CommandFields, ctx: &mut CodegenContext) -> Option<GeneratedCode> {
    let target = fields.target.map(|t| generate(t, ctx).code).unwrap_or_else(|| ctx.implicit_target.clone());
    Some(GeneratedCode { code: format!("{target}.blur()"), is_async: false, side_effects: true })
}

fn log(fields: &CommandFields, ctx: &mut CodegenContext) -> Option<GeneratedCode> {
    let args = fields.args.iter().map(|a| generate(a, ctx).code).collect::<Vec<_>>().join(", ");
    Some(GeneratedCode { code: format!("console.log({args})"), is_async: false, side_effects: true })
}

fn wait(fields: &CommandFields, ctx: &mut CodegenContext) -> Option<GeneratedCode> {
    let duration = fields.role_or_arg("duration", 0)?;
    ctx.require_helper("wait");
    let ms = duration_ms_code(duration, ctx);
    Some(GeneratedCode { code: format!("await _rt.wait({ms})"), is_async: true, side_effects: false })
}

fn fetch_cmd(fields: &CommandFields, ctx: &mut CodegenContext) -> Option<GeneratedCode> {
    let source = fields.role_or_arg("source", 0)?;
    let source_code = generate(source, ctx).code;
    let response_type = fields
        .role("responseType")
        .or_else(|| fields.modifier("as"))
        .and_then(as_text)
        .unwrap_or("text")
        .to_string();
    let helper = match response_type.as_str() {
        "json" => "fetchJSON",
        "html" => "fetchHTML",
        _ => "fetchText",
    };
    ctx.require_helper(match helper {
        "fetchJSON" => "fetchJSON",
        "fetchHTML" => "fetchHTML",
        _ => "fetchText",
    });
    Some(GeneratedCode {
        code: format!("_ctx.it = await _rt.{helper}({source_code})"),
        is_async: true,
        side_effects: true,
    })
}

fn send(fields: &CommandFields, ctx: &mut CodegenContext) -> Option<GeneratedCode> {
    let patient = fields.role_or_arg("patient", 0)?;
    let patient_code = generate(patient, ctx).code;
    let destination = fields.role("destination").or(fields.target).map(|t| generate(t, ctx).code).unwrap_or_else(|| ctx.implicit_target.clone());
    let detail = fields.modifier("with").map(|d| generate(d, ctx).code).unwrap_or_else(|| "{}".to_string());
    ctx.require_helper("send");
    Some(GeneratedCode {
        code: format!("_rt.send({destination}, {patient_code}, {detail})"),
        is_async: false,
        side_effects: true,
    })
}

fn increment(fields: &CommandFields, ctx: &mut CodegenContext) -> Option<GeneratedCode> {
    step(fields, ctx, 1.0)
}

fn decrement(fields: &CommandFields, ctx: &mut CodegenContext) -> Option<GeneratedCode> {
    step(fields, ctx, -1.0)
}

fn step(fields: &CommandFields, ctx: &mut CodegenContext, sign: f64) -> Option<GeneratedCode> {
    let destination = fields.role_or_arg("destination", 0)?;
    let quantity = fields.role("quantity").or_else(|| fields.modifier("by")).or_else(|| fields.args.get(1));
    let quantity_code = quantity.map(|q| generate(q, ctx).code).unwrap_or_else(|| "1".to_string());
    let op = if sign > 0.0 { "+" } else { "-" };
    let code = match destination {
        Node::Variable { name, .. } => format!(
            "_ctx.locals.set({0}, (parseFloat(_ctx.locals.get({0})) || 0) {op} ({1}))",
            json_str(name),
            quantity_code
        ),
        other => {
            let target = generate(other, ctx).code;
            format!(
                "{target}.textContent = (parseFloat({target}.textContent) || 0) {op} ({quantity_code})"
            )
        }
    };
    Some(GeneratedCode { code, is_async: false, side_effects: true })
}

fn halt(_fields: &CommandFields, _ctx: &mut CodegenContext) -> Option<GeneratedCode> {
    Some(GeneratedCode { code: "throw _rt.HALT".to_string(), is_async: false, side_effects: true })
}

fn exit(_fields: &CommandFields, _ctx: &mut CodegenContext) -> Option<GeneratedCode> {
    Some(GeneratedCode { code: "throw _rt.EXIT".to_string(), is_async: false, side_effects: true })
}

fn return_cmd(fields: &CommandFields, ctx: &mut CodegenContext) -> Option<GeneratedCode> {
    let code = match fields.args.first() {
        Some(v) => format!("return {}", generate(v, ctx).code),
        None => "return".to_string(),
    };
    Some(GeneratedCode { code, is_async: false, side_effects: true })
}

fn scroll(fields: &CommandFields, ctx: &mut CodegenContext) -> Option<GeneratedCode> {
    let target = fields.target.map(|t| generate(t, ctx).code).unwrap_or_else(|| ctx.implicit_target.clone());
    let smooth = fields.modifiers.contains_key("smooth") || fields.args.iter().any(|a| matches!(a, Node::Identifier { value, .. } if value == "smooth"));
    let behavior = if smooth { "smooth" } else { "auto" };
    Some(GeneratedCode {
        code: format!("{target}.scrollIntoView({{behavior: \"{behavior}\"}})"),
        is_async: false,
        side_effects: true,
    })
}

fn take(fields: &CommandFields, ctx: &mut CodegenContext) -> Option<GeneratedCode> {
    let patient = fields.role_or_arg("patient", 0)?;
    let class = match patient {
        Node::Selector { value, .. } if value.starts_with('.') => value[1..].to_string(),
        other => generate(other, ctx).code,
    };
    let target = fields.target.map(|t| generate(t, ctx).code).unwrap_or_else(|| ctx.implicit_target.clone());
    ctx.require_helper("take");
    Some(GeneratedCode {
        code: format!("_rt.take({target}, {})", json_str(&class)),
        is_async: false,
        side_effects: true,
    })
}

fn throw_cmd(fields: &CommandFields, ctx: &mut CodegenContext) -> Option<GeneratedCode> {
    let msg = fields.args.first().map(|a| generate(a, ctx).code).unwrap_or_else(|| json_str("Error"));
    Some(GeneratedCode { code: format!("throw new Error({msg})"), is_async: false, side_effects: true })
}

fn default_cmd(fields: &CommandFields, ctx: &mut CodegenContext) -> Option<GeneratedCode> {
    let destination = fields.role_or_arg("destination", 0)?;
    let value = fields.modifier("to").or_else(|| fields.args.get(1))?;
    let value_code = generate(value, ctx).code;
    let code = match destination {
        Node::Variable { name, .. } => format!(
            "if (_ctx.locals.get({0}) == null) _ctx.locals.set({0}, {value_code})",
            json_str(name)
        ),
        other => {
            let dest_code = generate(other, ctx).code;
            format!("if ({dest_code} == null) {dest_code} = {value_code}")
        }
    };
    Some(GeneratedCode { code, is_async: false, side_effects: true })
}

fn go(fields: &CommandFields, ctx: &mut CodegenContext) -> Option<GeneratedCode> {
    let arg = fields.args.first();
    let code = match arg {
        Some(Node::Identifier { value, .. }) if value == "back" => "history.back()".to_string(),
        Some(Node::Identifier { value, .. }) if value == "forward" => "history.forward()".to_string(),
        Some(other) => format!("location.assign({})", generate(other, ctx).code),
        None => return None,
    };
    Some(GeneratedCode { code, is_async: false, side_effects: true })
}

fn append(fields: &CommandFields, ctx: &mut CodegenContext) -> Option<GeneratedCode> {
    let content = fields.args.first()?;
    let content_code = generate(content, ctx).code;
    let target = fields
        .modifier("to")
        .or(fields.target)
        .map(|t| generate(t, ctx).code)
        .unwrap_or_else(|| ctx.implicit_target.clone());
    Some(GeneratedCode {
        code: format!("{target}.insertAdjacentHTML(\"beforeend\", {content_code})"),
        is_async: false,
        side_effects: true,
    })
}

fn pick(fields: &CommandFields, ctx: &mut CodegenContext) -> Option<GeneratedCode> {
    let collection = fields.modifier("from").or_else(|| fields.args.first())?;
    let code = generate(collection, ctx).code;
    ctx.require_helper("array");
    Some(GeneratedCode {
        code: format!("_ctx.it = _rt.array({code})[Math.floor(Math.random() * _rt.array({code}).length)]"),
        is_async: false,
        side_effects: true,
    })
}

fn push_url(fields: &CommandFields, ctx: &mut CodegenContext) -> Option<GeneratedCode> {
    let url = generate(fields.args.first()?, ctx).code;
    Some(GeneratedCode { code: format!("history.pushState(null, \"\", {url})"), is_async: false, side_effects: true })
}

fn replace_url(fields: &CommandFields, ctx: &mut CodegenContext) -> Option<GeneratedCode> {
    let url = generate(fields.args.first()?, ctx).code;
    Some(GeneratedCode {
        code: format!("history.replaceState(null, \"\", {url})"),
        is_async: false,
        side_effects: true,
    })
}

fn get(fields: &CommandFields, ctx: &mut CodegenContext) -> Option<GeneratedCode> {
    let expr = generate(fields.args.first()?, ctx).code;
    Some(GeneratedCode {
        code: format!("_ctx.it = _ctx.result = {expr}"),
        is_async: false,
        side_effects: true,
    })
}

fn break_cmd(_fields: &CommandFields, _ctx: &mut CodegenContext) -> Option<GeneratedCode> {
    Some(GeneratedCode { code: "break".to_string(), is_async: false, side_effects: false })
}

fn continue_cmd(_fields: &CommandFields, _ctx: &mut CodegenContext) -> Option<GeneratedCode> {
    Some(GeneratedCode { code: "continue".to_string(), is_async: false, side_effects: false })
}

fn beep(fields: &CommandFields, ctx: &mut CodegenContext) -> Option<GeneratedCode> {
    let value = fields.args.first().map(|a| generate(a, ctx).code).unwrap_or_else(|| "undefined".to_string());
    Some(GeneratedCode {
        code: format!("console.log(\"%c[beep]\", \"color: magenta\", {value})"),
        is_async: false,
        side_effects: true,
    })
}

fn js(fields: &CommandFields, ctx: &mut CodegenContext) -> Option<GeneratedCode> {
    let source = fields.args.first()?;
    match literal_string(source) {
        Some(code) => Some(GeneratedCode {
            code: format!("(function(ctx) {{ {code} }})(_ctx)"),
            is_async: false,
            side_effects: true,
        }),
        None => {
            let expr = generate(source, ctx).code;
            Some(GeneratedCode { code: format!("_ctx.it = ({expr})"), is_async: false, side_effects: true })
        }
    }
}

fn copy(fields: &CommandFields, ctx: &mut CodegenContext) -> Option<GeneratedCode> {
    let value = generate(fields.args.first()?, ctx).code;
    Some(GeneratedCode {
        code: format!("await navigator.clipboard.writeText(String({value}))"),
        is_async: true,
        side_effects: true,
    })
}

fn make(fields: &CommandFields, ctx: &mut CodegenContext) -> Option<GeneratedCode> {
    let spec = fields.args.first()?;
    let code = match spec {
        Node::Selector { value, .. } => {
            let tag = value.trim_start_matches('<').trim_end_matches("/>").trim_end_matches('>');
            let tag = tag.split_whitespace().next().unwrap_or("div");
            format!("document.createElement({})", json_str(tag))
        }
        Node::Literal { value: LiteralValue::String(s), .. } => format!("document.createElement({})", json_str(s)),
        other => format!("document.createElement({})", generate(other, ctx).code),
    };
    Some(GeneratedCode { code: format!("_ctx.it = {code}"), is_async: false, side_effects: true })
}

/// Strategy names `swap`'s leading positional operand may name (spec
/// §4.8); anything else at that position is the target, not a strategy.
const SWAP_STRATEGIES: &[&str] =
    &["innerHTML", "outerHTML", "beforeBegin", "afterBegin", "beforeEnd", "afterEnd", "delete", "morph"];

fn identifier_text(node: &Node) -> Option<&str> {
    match node {
        Node::Identifier { value, .. } => Some(value.as_str()),
        _ => None,
    }
}

/// `swap [strategy] target content` is fully positional (spec §4.8):
/// unlike most commands there is no modifier keyword to introduce the
/// strategy, so it is read off the leading arg only when that arg names a
/// known strategy; otherwise the leading arg is the target and the
/// strategy defaults to `innerHTML`.
fn swap(fields: &CommandFields, ctx: &mut CodegenContext) -> Option<GeneratedCode> {
    let mut args = fields.args.iter();
    let first = args.next()?;
    let (strategy, target_node) = match identifier_text(first).filter(|s| SWAP_STRATEGIES.contains(s)) {
        Some(s) => (s.to_string(), args.next()?),
        None => ("innerHTML".to_string(), first),
    };
    let content_node = args.next()?;
    let target = generate(target_node, ctx).code;
    let content = generate(content_node, ctx).code;
    let code = match strategy.as_str() {
        "delete" => format!("{target}.remove()"),
        "morph" => {
            ctx.require_helper("morph");
            format!("_rt.morph({target}, {content})")
        }
        "outerHTML" => format!("{target}.outerHTML = {content}"),
        "beforeBegin" | "afterBegin" | "beforeEnd" | "afterEnd" => {
            format!("{target}.insertAdjacentHTML({}, {content})", json_str(&strategy))
        }
        _ => format!("{target}.innerHTML = {content}"),
    };
    Some(GeneratedCode { code, is_async: false, side_effects: true })
}

fn morph(fields: &CommandFields, ctx: &mut CodegenContext) -> Option<GeneratedCode> {
    let target = fields.target.map(|t| generate(t, ctx).code).unwrap_or_else(|| ctx.implicit_target.clone());
    let content = generate(fields.args.first()?, ctx).code;
    ctx.require_helper("morph");
    Some(GeneratedCode { code: format!("_rt.morph({target}, {content})"), is_async: false, side_effects: true })
}

fn transition(fields: &CommandFields, ctx: &mut CodegenContext) -> Option<GeneratedCode> {
    let prop = fields.args.first()?;
    let prop_code = generate(prop, ctx).code;
    let value = fields.modifier("to").or_else(|| fields.args.get(1))?;
    let value_code = generate(value, ctx).code;
    let dur = fields.modifier("over").map(|d| duration_ms_code(d, ctx)).unwrap_or_else(|| "300".to_string());
    let timing = fields.modifier("with").and_then(literal_string).unwrap_or("ease").to_string();
    let target = fields.target.map(|t| generate(t, ctx).code).unwrap_or_else(|| ctx.implicit_target.clone());
    ctx.require_helper("transition");
    Some(GeneratedCode {
        code: format!("await _rt.transition({target}, {prop_code}, {value_code}, {dur}, {})", json_str(&timing)),
        is_async: true,
        side_effects: true,
    })
}

fn measure(fields: &CommandFields, ctx: &mut CodegenContext) -> Option<GeneratedCode> {
    let target = fields.target.map(|t| generate(t, ctx).code).unwrap_or_else(|| ctx.implicit_target.clone());
    let code = match fields.args.first().and_then(literal_string) {
        Some(prop) => format!("{target}.getBoundingClientRect().{}", sanitize(prop)),
        None => {
            ctx.require_helper("measure");
            format!("_rt.measure({target})")
        }
    };
    Some(GeneratedCode { code: format!("_ctx.it = {code}"), is_async: false, side_effects: false })
}

fn settle(fields: &CommandFields, ctx: &mut CodegenContext) -> Option<GeneratedCode> {
    let target = fields.target.map(|t| generate(t, ctx).code).unwrap_or_else(|| ctx.implicit_target.clone());
    let timeout = fields.modifier("for").map(|d| duration_ms_code(d, ctx)).unwrap_or_else(|| "5000".to_string());
    ctx.require_helper("settle");
    Some(GeneratedCode {
        code: format!("await _rt.settle({target}, {timeout})"),
        is_async: true,
        side_effects: false,
    })
}

fn install(fields: &CommandFields, ctx: &mut CodegenContext) -> Option<GeneratedCode> {
    let behavior = fields.args.first().and_then(as_text)?;
    let params = fields.args.get(1).map(|p| generate(p, ctx).code);
    let target = fields.modifier("on").or(fields.target).map(|t| generate(t, ctx).code).unwrap_or_else(|| ctx.implicit_target.clone());
    let code = match params {
        Some(p) => format!("_rt.installBehavior({target}, {}, {p})", json_str(behavior)),
        None => format!("_rt.installBehavior({target}, {})", json_str(behavior)),
    };
    Some(GeneratedCode { code, is_async: false, side_effects: true })
}

fn render(fields: &CommandFields, ctx: &mut CodegenContext) -> Option<GeneratedCode> {
    let template = generate(fields.args.first()?, ctx).code;
    let vars = fields.modifier("with").map(|v| generate(v, ctx).code).unwrap_or_else(|| "{}".to_string());
    let target = fields.target.map(|t| generate(t, ctx).code).unwrap_or_else(|| ctx.implicit_target.clone());
    Some(GeneratedCode {
        code: format!("{target}.innerHTML = _rt.render({template}, {vars})"),
        is_async: false,
        side_effects: true,
    })
}

fn sanitize(s: &str) -> String {
    s.chars().filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '$').collect()
}

fn json_str(s: &str) -> String {
    format!("{:?}", s)
}

/// Builds the canonical-name → generator registry (spec §4.8). `tell` and
/// `async` are intercepted in `lib.rs::generate_statement` before reaching
/// this registry, since both carry a nested body this registry's
/// `CommandGenerator` signature has no way to emit.
pub fn build() -> HashMap<&'static str, CommandGenerator> {
    let mut m: HashMap<&'static str, CommandGenerator> = HashMap::new();
    m.insert("toggle", toggle);
    m.insert("add", add_cmd);
    m.insert("remove", remove_cmd);
    m.insert("set", set_cmd);
    m.insert("put", put_cmd);
    m.insert("show", show);
    m.insert("hide", hide);
    m.insert("focus", focus);
    m.insert("blur", blur);
    m.insert("log", log);
    m.insert("wait", wait);
    m.insert("fetch", fetch_cmd);
    m.insert("send", send);
    m.insert("trigger", send);
    m.insert("increment", increment);
    m.insert("decrement", decrement);
    m.insert("halt", halt);
    m.insert("exit", exit);
    m.insert("return", return_cmd);
    m.insert("scroll", scroll);
    m.insert("take", take);
    m.insert("throw", throw_cmd);
    m.insert("default", default_cmd);
    m.insert("go", go);
    m.insert("append", append);
    m.insert("pick", pick);
    m.insert("push-url", push_url);
    m.insert("replace-url", replace_url);
    m.insert("get", get);
    m.insert("break", break_cmd);
    m.insert("continue", continue_cmd);
    m.insert("beep", beep);
    m.insert("js", js);
    m.insert("copy", copy);
    m.insert("make", make);
    m.insert("swap", swap);
    m.insert("morph", morph);
    m.insert("transition", transition);
    m.insert("measure", measure);
    m.insert("settle", settle);
    m.insert("install", install);
    m.insert("render", render);
    m
}

/// Looks up and runs a command's generator by canonical name. `None` means
/// either an unknown command (registry lookup miss) or a known command
/// whose generator declined due to missing inputs (spec §4.8 rule 4).
pub fn generate_command(node: &Node, registry: &HashMap<&'static str, CommandGenerator>, ctx: &mut CodegenContext) -> Option<GeneratedCode> {
    let fields = CommandFields::from_node(node)?;
    let generator = registry.get(fields.name)?;
    generator(&fields, ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyperfixi_ir::from_core;
    use hyperfixi_parser::Parser;

    fn command_node(src: &str) -> Node {
        let ast = Parser::parse(src).unwrap();
        let Node::Event { body, .. } = from_core(&ast[0]) else { panic!("expected event") };
        body.into_iter().next().unwrap()
    }

    #[test]
    fn set_with_to_modifier_scenario() {
        let node = command_node("on click set :count to 5");
        let registry = build();
        let mut ctx = CodegenContext::new("h0");
        let out = generate_command(&node, &registry, &mut ctx).unwrap();
        assert_eq!(out.code, r#"_ctx.locals.set("count", 5)"#);
        assert!(!out.is_async);
        assert!(out.side_effects);
    }

    #[test]
    fn set_possessive_style_scenario() {
        let node = command_node("on click set me's *opacity to \"0.5\"");
        let registry = build();
        let mut ctx = CodegenContext::new("h0");
        let out = generate_command(&node, &registry, &mut ctx).unwrap();
        assert_eq!(out.code, r#"_ctx.me.style.opacity = "0.5""#);
    }

    #[test]
    fn wait_with_unit_string_scenario() {
        let node = command_node("on click wait \"2s\"");
        let registry = build();
        let mut ctx = CodegenContext::new("h0");
        let out = generate_command(&node, &registry, &mut ctx).unwrap();
        assert_eq!(out.code, "await _rt.wait(2000)");
        assert!(out.is_async);
        assert!(ctx.required_helpers().contains("wait"));
    }

    #[test]
    fn fetch_as_json_scenario() {
        let node = command_node("on click fetch \"/api/users\" as \"json\" end");
        let registry = build();
        let mut ctx = CodegenContext::new("h0");
        let out = generate_command(&node, &registry, &mut ctx).unwrap();
        assert_eq!(out.code, r#"_ctx.it = await _rt.fetchJSON("/api/users")"#);
        assert!(ctx.required_helpers().contains("fetchJSON"));
    }

    #[test]
    fn unknown_command_returns_none() {
        let node = command_node("on click frobnicate");
        let registry = build();
        let mut ctx = CodegenContext::new("h0");
        assert!(generate_command(&node, &registry, &mut ctx).is_none());
    }

    #[test]
    fn trigger_is_alias_of_send() {
        let registry = build();
        assert!(std::ptr::eq(registry["trigger"] as *const (), registry["send"] as *const ()));
    }

    #[test]
    fn swap_with_explicit_strategy_is_fully_positional() {
        let node = command_node(r#"on click swap outerHTML #panel "new html""#);
        let registry = build();
        let mut ctx = CodegenContext::new("h0");
        let out = generate_command(&node, &registry, &mut ctx).unwrap();
        assert_eq!(out.code, r#"document.getElementById("panel").outerHTML = "new html""#);
    }

    #[test]
    fn swap_without_strategy_defaults_to_inner_html() {
        let node = command_node(r#"on click swap #panel "new html""#);
        let registry = build();
        let mut ctx = CodegenContext::new("h0");
        let out = generate_command(&node, &registry, &mut ctx).unwrap();
        assert_eq!(out.code, r#"document.getElementById("panel").innerHTML = "new html""#);
    }

    #[test]
    fn swap_morph_strategy_requires_the_morph_helper() {
        let node = command_node(r#"on click swap morph #panel "new html""#);
        let registry = build();
        let mut ctx = CodegenContext::new("h0");
        let out = generate_command(&node, &registry, &mut ctx).unwrap();
        assert!(out.code.contains("_rt.morph("));
        assert!(ctx.required_helpers().contains("morph"));
    }
}
