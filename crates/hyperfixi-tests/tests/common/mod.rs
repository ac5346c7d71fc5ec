use hyperfixi_codegen::{compile_handler, registry, HandlerArtifact};
use hyperfixi_ir::from_core;
use hyperfixi_parser::Parser;

/// Parses `source`, lowers its first event to the interchange form, and
/// compiles it through the full codegen registry. Panics on a parse
/// failure or a non-event top-level node, since every scenario here is
/// expected to parse cleanly.
pub fn compile_first_handler(source: &str) -> HandlerArtifact {
    let ast = Parser::parse(source).unwrap_or_else(|e| panic!("parse failed for {source:?}: {e:?}"));
    let node = from_core(&ast[0]);
    let registry = registry::build();
    compile_handler(&node, "h0", &registry).expect("expected an event node")
}
