//! Cyclomatic complexity (spec §6): one plus the number of decision points
//! in a handler's body, per [`hyperfixi_ir::Node::is_decision_point`].

use hyperfixi_ir::{from_core, Node};
use hyperfixi_parser::Parser;

fn count_decision_points(node: &Node, count: &mut u32) {
    if node.is_decision_point() {
        *count += 1;
    }
    match node {
        Node::Event { body, .. } => body.iter().for_each(|n| count_decision_points(n, count)),
        Node::Command { args, modifiers, .. } => {
            args.iter().for_each(|n| count_decision_points(n, count));
            modifiers.values().for_each(|n| count_decision_points(n, count));
        }
        Node::If { condition, then_branch, else_if_branches, else_branch, .. } => {
            count_decision_points(condition, count);
            then_branch.iter().for_each(|n| count_decision_points(n, count));
            for (cond, body) in else_if_branches {
                count_decision_points(cond, count);
                body.iter().for_each(|n| count_decision_points(n, count));
            }
            if let Some(body) = else_branch {
                body.iter().for_each(|n| count_decision_points(n, count));
            }
        }
        Node::Repeat { body, count: c, while_condition, .. } => {
            if let Some(c) = c {
                count_decision_points(c, count);
            }
            if let Some(w) = while_condition {
                count_decision_points(w, count);
            }
            body.iter().for_each(|n| count_decision_points(n, count));
        }
        Node::Foreach { collection, body, .. } => {
            count_decision_points(collection, count);
            body.iter().for_each(|n| count_decision_points(n, count));
        }
        Node::While { condition, body, .. } => {
            count_decision_points(condition, count);
            body.iter().for_each(|n| count_decision_points(n, count));
        }
        _ => {}
    }
}

/// Cyclomatic complexity of a single handler: `1 + decision points`.
pub fn calculate_cyclomatic(node: &Node) -> u32 {
    let mut count = 0;
    count_decision_points(node, &mut count);
    1 + count
}

/// Sum of cyclomatic complexity across every top-level handler in `source`.
/// `0` if `source` fails to parse.
pub fn calculate_source_complexity(source: &str) -> u32 {
    let Ok(core_nodes) = Parser::parse(source) else { return 0 };
    core_nodes.iter().map(|c| calculate_cyclomatic(&from_core(c))).sum()
}

/// Nesting-weighted walk for cognitive complexity (spec §6): each decision
/// point contributes `1 + depth`, and `if`/`repeat`/`foreach`/`while`/`event`
/// all increment the depth seen by their children (unlike cyclomatic
/// complexity, `repeat` and `event` count toward nesting here even though
/// `repeat` is never itself a decision point).
fn walk_cognitive(node: &Node, depth: u32, total: &mut u32) {
    if node.is_decision_point() {
        *total += 1 + depth;
    }
    match node {
        Node::Event { body, .. } => body.iter().for_each(|n| walk_cognitive(n, depth + 1, total)),
        Node::Command { args, modifiers, .. } => {
            args.iter().for_each(|n| walk_cognitive(n, depth, total));
            modifiers.values().for_each(|n| walk_cognitive(n, depth, total));
        }
        Node::If { condition, then_branch, else_if_branches, else_branch, .. } => {
            walk_cognitive(condition, depth, total);
            then_branch.iter().for_each(|n| walk_cognitive(n, depth + 1, total));
            for (cond, body) in else_if_branches {
                walk_cognitive(cond, depth, total);
                body.iter().for_each(|n| walk_cognitive(n, depth + 1, total));
            }
            if let Some(body) = else_branch {
                body.iter().for_each(|n| walk_cognitive(n, depth + 1, total));
            }
        }
        Node::Repeat { body, count: c, while_condition, .. } => {
            if let Some(c) = c {
                walk_cognitive(c, depth, total);
            }
            if let Some(w) = while_condition {
                walk_cognitive(w, depth, total);
            }
            body.iter().for_each(|n| walk_cognitive(n, depth + 1, total));
        }
        Node::Foreach { collection, body, .. } => {
            walk_cognitive(collection, depth, total);
            body.iter().for_each(|n| walk_cognitive(n, depth + 1, total));
        }
        Node::While { condition, body, .. } => {
            walk_cognitive(condition, depth, total);
            body.iter().for_each(|n| walk_cognitive(n, depth + 1, total));
        }
        _ => {}
    }
}

/// Cognitive complexity of a single handler (spec §6): sum of `(1 + nesting
/// depth)` per decision point.
pub fn calculate_cognitive(node: &Node) -> u32 {
    let mut total = 0;
    walk_cognitive(node, 0, &mut total);
    total
}

/// Sum of cognitive complexity across every top-level handler in `source`.
/// `0` if `source` fails to parse.
pub fn calculate_source_cognitive(source: &str) -> u32 {
    let Ok(core_nodes) = Parser::parse(source) else { return 0 };
    core_nodes.iter().map(|c| calculate_cognitive(&from_core(c))).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn straight_line_handler_has_complexity_one() {
        assert_eq!(calculate_source_complexity("on click toggle .open"), 1);
    }

    #[test]
    fn if_else_adds_one_decision_point() {
        assert_eq!(calculate_source_complexity("on click if :x show else hide end"), 2);
    }

    #[test]
    fn nested_loop_and_conditional_accumulate() {
        // `repeat` is not itself a decision point (spec §6): only the
        // nested `if` raises cyclomatic complexity above the baseline 1.
        let source = "on click repeat 3 times if :x show end end";
        assert_eq!(calculate_source_complexity(source), 2);
    }

    #[test]
    fn cognitive_complexity_weighs_nesting_depth() {
        // event(+1) -> repeat(+1) -> if(+1): the if decision point sits at
        // depth 2, contributing 1 + 2 = 3; repeat contributes nothing since
        // it is not itself a decision point.
        let source = "on click repeat 3 times if :x show end end";
        assert_eq!(calculate_source_cognitive(source), 3);
    }

    #[test]
    fn flat_if_has_lower_cognitive_complexity_than_nested_if() {
        let flat = "on click if :x show end";
        let nested = "on click repeat 3 times if :x show end end";
        assert!(calculate_source_cognitive(nested) > calculate_source_cognitive(flat));
    }
}
