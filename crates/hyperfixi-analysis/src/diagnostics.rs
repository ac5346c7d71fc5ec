//! `diagnostics(nodes, {source, cyclomaticThreshold, cognitiveThreshold})`
//! (spec §6): surfaces parse errors as structured, position-annotated
//! diagnostics, plus a warning for any handler whose cyclomatic or
//! cognitive complexity exceeds the given threshold. Pure function of
//! source text; no file I/O, no protocol wiring.

use crate::complexity::{calculate_cognitive, calculate_cyclomatic};
use crate::types::{Diagnostic, Range, Severity};
use hyperfixi_base::span::LineCol;
use hyperfixi_base::{HyperfixiError, LineIndex};
use hyperfixi_ir::{from_core, Node};
use hyperfixi_parser::Parser;

/// Complexity thresholds a handler's metrics are checked against. Defaults
/// match spec §6: `cyclomaticThreshold = 10`, `cognitiveThreshold = 15`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagnosticOptions {
    pub cyclomatic_threshold: u32,
    pub cognitive_threshold: u32,
}

impl Default for DiagnosticOptions {
    fn default() -> Self {
        Self { cyclomatic_threshold: 10, cognitive_threshold: 15 }
    }
}

fn to_diagnostic(error: &HyperfixiError, index: &LineIndex) -> Diagnostic {
    let start = index.line_col(error.span.start);
    let end = index.line_col(error.span.end.max(error.span.start));
    Diagnostic {
        range: Range { start, end },
        severity: Severity::Error,
        message: error.kind().to_string(),
        code: None,
    }
}

fn range_for(node: &Node) -> Range {
    match node.pos() {
        Some(pos) => {
            let point = LineCol { line: pos.line, column: pos.column };
            Range { start: point, end: point }
        }
        None => Range { start: LineCol::default(), end: LineCol::default() },
    }
}

fn complexity_diagnostic(node: &Node, name: &str, metric: &str, value: u32, threshold: u32) -> Diagnostic {
    Diagnostic {
        range: range_for(node),
        severity: Severity::Warning,
        message: format!("handler '{name}' has {metric} complexity {value}, exceeding the threshold of {threshold}"),
        code: Some(format!("{metric}-complexity")),
    }
}

fn handler_name(node: &Node) -> &str {
    match node {
        Node::Event { event, .. } => event.as_str(),
        _ => "<handler>",
    }
}

/// Parses `source`, reports the first error encountered (the core parser
/// stops at its first failure, spec §4.2), or, on success, checks every
/// top-level handler's cyclomatic and cognitive complexity against
/// `options` and reports a warning for each threshold exceeded.
///
/// `nodes` is accepted for spec-interface parity (pre-parsed handlers may
/// be passed in directly); when `None`, `source` is parsed fresh.
pub fn diagnostics_with_options(nodes: Option<&[Node]>, source: &str, options: DiagnosticOptions) -> Vec<Diagnostic> {
    let owned;
    let handlers: &[Node] = match nodes {
        Some(nodes) => nodes,
        None => match Parser::parse(source) {
            Ok(core_nodes) => {
                owned = core_nodes.iter().map(from_core).collect::<Vec<_>>();
                &owned
            }
            Err(e) => {
                let index = LineIndex::new(source);
                return vec![to_diagnostic(&e, &index)];
            }
        },
    };

    let mut diags = Vec::new();
    for handler in handlers {
        let cyclomatic = calculate_cyclomatic(handler);
        if cyclomatic > options.cyclomatic_threshold {
            diags.push(complexity_diagnostic(
                handler,
                handler_name(handler),
                "cyclomatic",
                cyclomatic,
                options.cyclomatic_threshold,
            ));
        }
        let cognitive = calculate_cognitive(handler);
        if cognitive > options.cognitive_threshold {
            diags.push(complexity_diagnostic(
                handler,
                handler_name(handler),
                "cognitive",
                cognitive,
                options.cognitive_threshold,
            ));
        }
    }
    diags
}

/// `diagnostics(source)`: the common case, default thresholds, parsing
/// `source` itself.
pub fn diagnostics(source: &str) -> Vec<Diagnostic> {
    diagnostics_with_options(None, source, DiagnosticOptions::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_source_has_no_diagnostics() {
        assert!(diagnostics("on click toggle .open").is_empty());
    }

    #[test]
    fn missing_end_reports_a_diagnostic() {
        let diags = diagnostics("on click if :x show");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].severity, Severity::Error);
    }

    #[test]
    fn complexity_above_threshold_emits_a_warning() {
        let source = "on click if :a if :b if :c show end end end";
        let diags = diagnostics_with_options(
            None,
            source,
            DiagnosticOptions { cyclomatic_threshold: 2, cognitive_threshold: 100 },
        );
        assert!(diags.iter().any(|d| d.severity == Severity::Warning && d.code.as_deref() == Some("cyclomatic-complexity")));
    }

    #[test]
    fn complexity_within_threshold_has_no_warning() {
        let diags = diagnostics_with_options(None, "on click if :x show end", DiagnosticOptions::default());
        assert!(diags.is_empty());
    }
}
