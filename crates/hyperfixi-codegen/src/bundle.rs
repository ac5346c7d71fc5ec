//! Bundle assembler (spec §4.10): resolves a feature set into a single
//! self-contained output module. Pure function of its config; never retains
//! state across invocations.

use crate::registry;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Blocks the assembler knows how to implement.
const CAPABILITY_BLOCKS: &[&str] = &["if", "repeat", "for", "while", "fetch", "tell", "async"];

/// Commands whose compact regex-based "lite" parser template can cover
/// them: no blocks, no positional expressions, only this command set.
const LITE_ELIGIBLE: &[&str] = &["toggle", "add", "remove", "put", "set", "log", "send", "wait", "show", "hide"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Typed,
    Untyped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssembleError {
    UnknownCommand(String),
    UnknownBlock(String),
}

impl fmt::Display for AssembleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssembleError::UnknownCommand(name) => write!(f, "unknown command: {name}"),
            AssembleError::UnknownBlock(name) => write!(f, "unknown block: {name}"),
        }
    }
}

/// The `{type, message, name}` triple strict-mode callers see (spec §4.10,
/// §7): a serializable record rather than a bare string, so a caller can
/// branch on `type`/`name` without re-parsing `Display` output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructuredError {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub message: String,
    pub name: String,
}

impl AssembleError {
    pub fn to_structured(&self) -> StructuredError {
        match self {
            AssembleError::UnknownCommand(name) => {
                StructuredError { kind: "unknown-command", message: self.to_string(), name: name.clone() }
            }
            AssembleError::UnknownBlock(name) => {
                StructuredError { kind: "unknown-block", message: self.to_string(), name: name.clone() }
            }
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BundleConfig {
    pub bundle_name: String,
    pub commands: Vec<String>,
    pub blocks: Vec<String>,
    pub positional_expressions: bool,
    pub htmx: bool,
    pub global_name: String,
    pub output_format: OutputFormat,
    pub max_loop_iterations: u32,
    pub strict: bool,
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            bundle_name: "bundle".to_string(),
            commands: Vec::new(),
            blocks: Vec::new(),
            positional_expressions: false,
            htmx: false,
            global_name: "hyperfixi".to_string(),
            output_format: OutputFormat::Typed,
            max_loop_iterations: 1000,
            strict: false,
        }
    }
}

pub struct AssembleOutput {
    pub source: String,
    pub warnings: Vec<String>,
}

/// Splits `config.commands`/`config.blocks` into (valid, invalid) against
/// the assembler's capability table.
fn validate(config: &BundleConfig) -> (Vec<String>, Vec<String>, Vec<AssembleError>) {
    let known_commands = registry::build();
    let mut valid_commands = Vec::new();
    let mut errors = Vec::new();

    for name in &config.commands {
        if known_commands.contains_key(name.as_str()) {
            valid_commands.push(name.clone());
        } else {
            errors.push(AssembleError::UnknownCommand(name.clone()));
        }
    }

    let mut valid_blocks = Vec::new();
    for name in &config.blocks {
        if CAPABILITY_BLOCKS.contains(&name.as_str()) {
            valid_blocks.push(name.clone());
        } else {
            errors.push(AssembleError::UnknownBlock(name.clone()));
        }
    }

    (valid_commands, valid_blocks, errors)
}

/// Worst-case helper closure for a command: every helper its generator
/// might require, regardless of which runtime-value branch a particular
/// call site takes (the assembler can't run the generator against live
/// input, so it bundles generously rather than under-providing).
fn command_helpers(name: &str) -> &'static [&'static str] {
    match name {
        "toggle" => &["toggle", "toggleAttr"],
        "fetch" => &["fetchJSON", "fetchHTML", "fetchText"],
        "wait" => &["wait"],
        "settle" => &["settle"],
        "send" | "trigger" => &["send"],
        "take" => &["take"],
        "pick" => &["array"],
        "swap" | "morph" => &["morph"],
        "transition" => &["transition"],
        "measure" => &["measure"],
        "set" | "default" => &["globals"],
        _ => &[],
    }
}

fn helper_closure(commands: &[String]) -> Vec<&'static str> {
    let mut set: HashSet<&'static str> = HashSet::new();
    for name in commands {
        set.extend(command_helpers(name));
    }
    let mut helpers: Vec<&'static str> = set.into_iter().collect();
    helpers.sort_unstable();
    helpers
}

fn parser_template(commands: &[String], blocks: &[String], positional: bool) -> &'static str {
    let lite_eligible = blocks.is_empty()
        && !positional
        && commands.iter().all(|c| LITE_ELIGIBLE.contains(&c.as_str()));
    if lite_eligible {
        "// lite parser: compact regex-based tokenizer, no blocks, no positional expressions\n\
function parse(source: string): InterchangeNode[] {\n  return source.split(/\\n|then|and/).map(parseLiteStatement).filter(Boolean);\n}"
    } else {
        "// hybrid parser: full recursive-descent front end\n\
function parse(source: string): InterchangeNode[] {\n  return new HybridParser(tokenize(source)).parseProgram();\n}"
    }
}

fn command_implementations(commands: &[String]) -> String {
    let mut out = String::from("const commandImpls: Record<string, CommandImpl> = {\n");
    for name in commands {
        out.push_str(&format!("  {}: make{}Impl(),\n", json_key(name), pascal_case(name)));
    }
    out.push_str("};");
    out
}

fn block_implementations(blocks: &[String]) -> String {
    let mut out = String::from("const blockImpls: Record<string, BlockImpl> = {\n");
    for name in blocks {
        out.push_str(&format!("  {}: make{}BlockImpl(),\n", json_key(name), pascal_case(name)));
    }
    out.push_str("};");
    out
}

fn pascal_case(s: &str) -> String {
    s.split(['-', '_'])
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

fn json_key(s: &str) -> String {
    format!("{:?}", s)
}

/// Deterministic textual rewrite from the typed template to the untyped
/// flavor: a fixed replacement list covering exactly the annotations this
/// module's own templates use, not a general TypeScript stripper (spec
/// §4.10: "shallow but sufficient for the bundled runtime since it was
/// authored with that constraint").
fn strip_types(source: &str) -> String {
    const REPLACEMENTS: &[(&str, &str)] = &[
        (": InterchangeNode[]", ""),
        (": CompiledHandler[]", ""),
        (": Record<string, CommandImpl>", ""),
        (": Record<string, BlockImpl>", ""),
        (": string", ""),
        ("Promise<void>", "Promise"),
        (" as HTMLElement", ""),
    ];
    let mut out = source.to_string();
    for (from, to) in REPLACEMENTS {
        out = out.replace(from, to);
    }
    out
}

/// Assembles one bundle. `strict` mode fails on any unknown command/block;
/// default mode drops them and reports warnings instead.
pub fn assemble(config: &BundleConfig) -> Result<AssembleOutput, Vec<AssembleError>> {
    let (valid_commands, valid_blocks, errors) = validate(config);

    if config.strict && !errors.is_empty() {
        return Err(errors);
    }
    let warnings: Vec<String> = errors.iter().map(|e| e.to_string()).collect();

    let mut source = String::new();
    source.push_str(&format!(
        "// {} -- generated bundle\n// commands: {}\n// blocks: {}\n\n",
        config.bundle_name,
        valid_commands.join(", "),
        valid_blocks.join(", ")
    ));
    source.push_str(parser_template(&valid_commands, &valid_blocks, config.positional_expressions));
    source.push_str("\n\n");
    source.push_str(&command_implementations(&valid_commands));
    source.push_str("\n\n");
    source.push_str(&block_implementations(&valid_blocks));
    source.push_str("\n\n");

    let helpers = helper_closure(&valid_commands);
    source.push_str(&format!("const helpers = [{}];\n\n", helpers.iter().map(|h| json_key(h)).collect::<Vec<_>>().join(", ")));

    source.push_str(&format!(
        "function compile(source: string): CompiledHandler[] {{\n  return parse(source).map(node => compileHandler(node, commandImpls, blockImpls, {}));\n}}\n\n",
        config.max_loop_iterations
    ));
    source.push_str(&format!(
        "const {} = {{ process, parse, compile, behaviors: new Map(), globals: new Map() }};\n",
        config.global_name
    ));

    if config.htmx {
        source.push_str(&format!(
            "document.body.addEventListener(\"htmx:afterSettle\", (e) => {}.process(e.target));\n",
            config.global_name
        ));
    }

    if config.output_format == OutputFormat::Untyped {
        source = strip_types(&source);
    }

    Ok(AssembleOutput { source, warnings })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lite_template_chosen_for_small_flat_command_set() {
        let config = BundleConfig {
            commands: vec!["toggle".to_string(), "show".to_string()],
            ..Default::default()
        };
        let out = assemble(&config).unwrap();
        assert!(out.source.contains("lite parser"));
    }

    #[test]
    fn blocks_force_hybrid_template() {
        let config = BundleConfig {
            commands: vec!["toggle".to_string()],
            blocks: vec!["if".to_string()],
            ..Default::default()
        };
        let out = assemble(&config).unwrap();
        assert!(out.source.contains("hybrid parser"));
    }

    #[test]
    fn strict_mode_rejects_unknown_command() {
        let config = BundleConfig {
            commands: vec!["frobnicate".to_string()],
            strict: true,
            ..Default::default()
        };
        let err = assemble(&config).unwrap_err();
        assert_eq!(err, vec![AssembleError::UnknownCommand("frobnicate".to_string())]);
    }

    #[test]
    fn structured_error_carries_type_and_name() {
        let err = AssembleError::UnknownBlock("switch".to_string());
        let structured = err.to_structured();
        assert_eq!(structured.kind, "unknown-block");
        assert_eq!(structured.name, "switch");
        let json = serde_json::to_string(&structured).unwrap();
        assert!(json.contains("\"type\":\"unknown-block\""));
    }

    #[test]
    fn default_mode_drops_unknown_command_with_warning() {
        let config = BundleConfig { commands: vec!["frobnicate".to_string()], ..Default::default() };
        let out = assemble(&config).unwrap();
        assert_eq!(out.warnings.len(), 1);
        assert!(!out.source.contains("frobnicate"));
    }

    #[test]
    fn untyped_output_strips_type_annotations() {
        let config = BundleConfig {
            commands: vec!["toggle".to_string()],
            output_format: OutputFormat::Untyped,
            ..Default::default()
        };
        let out = assemble(&config).unwrap();
        assert!(!out.source.contains(": InterchangeNode[]"));
    }

    #[test]
    fn tell_and_async_are_recognized_blocks() {
        let config = BundleConfig {
            commands: vec!["toggle".to_string()],
            blocks: vec!["tell".to_string(), "async".to_string()],
            ..Default::default()
        };
        let out = assemble(&config).unwrap();
        assert!(out.warnings.is_empty());
        assert!(out.source.contains("makeTellBlockImpl"));
        assert!(out.source.contains("makeAsyncBlockImpl"));
    }

    #[test]
    fn fetch_pulls_in_all_three_response_helpers() {
        let config = BundleConfig { commands: vec!["fetch".to_string()], ..Default::default() };
        let out = assemble(&config).unwrap();
        assert!(out.source.contains("fetchJSON"));
        assert!(out.source.contains("fetchHTML"));
        assert!(out.source.contains("fetchText"));
    }
}
