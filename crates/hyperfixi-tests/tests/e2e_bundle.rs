//! End-to-end: the bundle assembler's config -> generated-module contract.

use hyperfixi_codegen::bundle::{assemble, BundleConfig, OutputFormat};

#[test]
fn a_minimal_flat_command_set_gets_the_lite_parser() {
    let config = BundleConfig {
        bundle_name: "widgets".to_string(),
        commands: vec!["toggle".to_string(), "show".to_string(), "hide".to_string()],
        ..Default::default()
    };
    let out = assemble(&config).unwrap();
    assert!(out.warnings.is_empty());
    assert!(out.source.contains("lite parser"));
    assert!(out.source.contains("makeToggleImpl"));
}

#[test]
fn requesting_a_block_forces_the_hybrid_parser_and_pulls_its_impl() {
    let config = BundleConfig {
        commands: vec!["log".to_string()],
        blocks: vec!["tell".to_string()],
        ..Default::default()
    };
    let out = assemble(&config).unwrap();
    assert!(out.source.contains("hybrid parser"));
    assert!(out.source.contains("makeTellBlockImpl"));
}

#[test]
fn strict_mode_fails_closed_on_an_unknown_block() {
    let config = BundleConfig {
        blocks: vec!["switch".to_string()],
        strict: true,
        ..Default::default()
    };
    assert!(assemble(&config).is_err());
}

#[test]
fn default_mode_degrades_gracefully_with_a_warning() {
    let config = BundleConfig { blocks: vec!["switch".to_string()], ..Default::default() };
    let out = assemble(&config).unwrap();
    assert_eq!(out.warnings.len(), 1);
    assert!(!out.source.contains("makeSwitchBlockImpl"));
}

#[test]
fn untyped_output_is_free_of_the_lite_templates_type_annotations() {
    let config = BundleConfig {
        commands: vec!["log".to_string()],
        output_format: OutputFormat::Untyped,
        ..Default::default()
    };
    let out = assemble(&config).unwrap();
    assert!(!out.source.contains(": InterchangeNode[]"));
}

#[test]
fn htmx_mode_wires_the_afterSettle_listener() {
    let config = BundleConfig { commands: vec!["toggle".to_string()], htmx: true, ..Default::default() };
    let out = assemble(&config).unwrap();
    assert!(out.source.contains("htmx:afterSettle"));
}
