//! End-to-end: block constructs (`if`, `repeat`, `for each`, `while`,
//! `tell`, `async`) through the full pipeline.

mod common;
use common::compile_first_handler;

#[test]
fn if_else_renders_both_branches() {
    let artifact = compile_first_handler("on click if :x show else hide end");
    assert!(artifact.code.contains("if ("));
    assert!(artifact.code.contains("else"));
    assert!(artifact.code.contains("style.display = \"\""));
    assert!(artifact.code.contains("style.display = \"none\""));
}

#[test]
fn repeat_times_emits_a_counted_loop() {
    let artifact = compile_first_handler("on click repeat 3 times log \"hi\" end");
    assert!(artifact.code.contains("for (let"));
    assert!(artifact.code.contains("console.log(\"hi\")"));
}

#[test]
fn foreach_binds_the_loop_item() {
    let artifact = compile_first_handler("on click for each x in :items log x end");
    assert!(artifact.code.contains("_ctx.locals.set(\"x\""));
    assert!(artifact.code.contains("_ctx.locals.set(\"index\""));
}

#[test]
fn while_loop_has_an_iteration_cap() {
    let artifact = compile_first_handler("on click while :x log \"tick\" end");
    assert!(artifact.code.contains(">= 1000) break"));
}

#[test]
fn tell_rebinds_me_and_you_for_its_body() {
    let artifact = compile_first_handler("on click tell .item toggle .open end");
    assert!(artifact.code.contains("_ctx.me = _ctx.you ="));
    assert!(artifact.code.contains("classList.toggle(\"open\")"));
}

#[test]
fn async_body_runs_fire_and_forget() {
    let artifact = compile_first_handler("on click async wait \"1s\" then log \"done\" end");
    assert!(artifact.code.contains("(async () => {"));
    assert!(!artifact.is_async, "the wait inside async must not make the outer handler async");
}

#[test]
fn nested_if_inside_repeat_compiles() {
    let artifact = compile_first_handler("on click repeat 3 times if :x show end end");
    assert!(artifact.code.contains("for (let"));
    assert!(artifact.code.contains("if ("));
}
