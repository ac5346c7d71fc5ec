//! End-to-end: the protocol-agnostic source analyzers (diagnostics,
//! symbols, hover, completions, complexity) against real source text.

use hyperfixi_analysis::{
    calculate_source_cognitive, calculate_source_complexity, completions, diagnostics, diagnostics_with_options,
    hover, symbols, DiagnosticOptions, Severity, SymbolKind,
};

#[test]
fn clean_source_has_no_diagnostics_and_exposes_its_symbols() {
    let source = "on click toggle .open";
    assert!(diagnostics(source).is_empty());

    let syms = symbols(source);
    assert!(syms.iter().any(|s| s.kind == SymbolKind::Handler));
    assert!(syms.iter().any(|s| s.kind == SymbolKind::Command));
}

#[test]
fn a_dangling_block_is_reported_as_an_error_diagnostic() {
    let diags = diagnostics("on click if :x show");
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].severity, Severity::Error);
}

#[test]
fn hovering_a_command_name_describes_it() {
    let source = "on click toggle .open";
    let offset = source.find("toggle").unwrap();
    let h = hover(source, offset).expect("expected a hover result over a command token");
    assert!(h.contents.to_lowercase().contains("toggle"));
}

#[test]
fn completions_narrow_to_the_current_prefix() {
    let source = "on click tog";
    let items = completions(source, source.len());
    assert!(items.iter().any(|c| c.label == "toggle"));
    assert!(!items.iter().any(|c| c.label == "send"));
}

#[test]
fn a_conditional_inside_a_loop_raises_cyclomatic_complexity() {
    let flat = calculate_source_complexity("on click log \"hi\"");
    let branchy = calculate_source_complexity("on click repeat 3 times if :x show end end");
    assert!(branchy > flat);
}

#[test]
fn repeat_does_not_count_as_a_cyclomatic_decision_point() {
    // `repeat N times` alone has no branch condition, so it shouldn't raise
    // complexity above the baseline of 1.
    assert_eq!(calculate_source_complexity("on click repeat 3 times log \"hi\" end"), 1);
}

#[test]
fn nesting_raises_cognitive_complexity_more_than_cyclomatic() {
    let source = "on click repeat 3 times if :x show end end";
    assert!(calculate_source_cognitive(source) > calculate_source_complexity(source));
}

#[test]
fn diagnostics_warn_when_cyclomatic_complexity_exceeds_the_threshold() {
    let source = "on click if :a if :b if :c show end end end";
    let diags = diagnostics_with_options(
        None,
        source,
        DiagnosticOptions { cyclomatic_threshold: 2, cognitive_threshold: 100 },
    );
    assert!(diags.iter().any(|d| d.severity == Severity::Warning));
}
