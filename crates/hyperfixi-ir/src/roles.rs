//! Command role inference (spec §4.5).
//!
//! Heuristic and command-name-driven: unknown command names get no roles.
//! Pure function of `(name, args, modifiers, target)` — same inputs always
//! produce the same role map (spec §8).

use crate::node::{LiteralValue, Node};
use std::collections::HashMap;

fn lift_string_to_identifier(node: &Node) -> Node {
    match node {
        Node::Literal { value: LiteralValue::String(s), .. } => Node::identifier(s.clone()),
        other => other.clone(),
    }
}

/// Builds the `roles` map for a command node, or `None` for command names
/// with no entry in the inference table (empty maps are never returned —
/// spec §4.5 "empty role maps are elided").
pub fn infer_roles(
    name: &str,
    args: &[Node],
    modifiers: &HashMap<String, Node>,
    target: Option<&Node>,
) -> Option<HashMap<String, Node>> {
    let mut roles = HashMap::new();

    match name {
        "set" => {
            if let Some(dest) = args.first() {
                roles.insert("destination".to_string(), dest.clone());
            }
            let patient = modifiers.get("to").cloned().or_else(|| args.get(1).cloned());
            if let Some(p) = patient {
                roles.insert("patient".to_string(), p);
            }
        }
        "put" => {
            if let Some(patient) = args.first() {
                roles.insert("patient".to_string(), patient.clone());
            }
            let (method, destination) = ["into", "before", "after"]
                .iter()
                .find_map(|prep| modifiers.get(*prep).map(|n| (prep.to_string(), n.clone())))
                .map(|(prep, n)| (Some(prep), Some(n)))
                .unwrap_or_else(|| {
                    let dest = target.cloned();
                    let method = modifiers
                        .get("position")
                        .and_then(|n| match n {
                            Node::Literal { value: LiteralValue::String(s), .. } => Some(s.clone()),
                            _ => None,
                        });
                    (method, dest)
                });
            if let Some(dest) = destination {
                roles.insert("destination".to_string(), dest);
            }
            if let Some(m) = method {
                roles.insert("method".to_string(), Node::Literal { value: LiteralValue::String(m), pos: None });
            }
        }
        "increment" | "decrement" => {
            if let Some(dest) = args.first() {
                roles.insert("destination".to_string(), dest.clone());
            }
            let quantity = modifiers.get("by").cloned().or_else(|| args.get(1).cloned());
            if let Some(q) = quantity {
                roles.insert("quantity".to_string(), q);
            }
        }
        "fetch" => {
            if let Some(source) = args.first() {
                roles.insert("source".to_string(), source.clone());
            }
            if let Some(as_mod) = modifiers.get("as") {
                roles.insert("responseType".to_string(), lift_string_to_identifier(as_mod));
            }
        }
        "wait" | "settle" => {
            if let Some(duration) = args.first() {
                roles.insert("duration".to_string(), duration.clone());
            }
        }
        "toggle" | "add" => {
            if let Some(patient) = args.first() {
                roles.insert("patient".to_string(), patient.clone());
            }
            if let Some(dest) = target {
                roles.insert("destination".to_string(), dest.clone());
            }
        }
        "remove" => {
            if let Some(patient) = args.first() {
                roles.insert("patient".to_string(), patient.clone());
            }
            if let Some(source) = target {
                roles.insert("source".to_string(), source.clone());
            }
        }
        "send" | "trigger" => {
            if let Some(patient) = args.first() {
                roles.insert("patient".to_string(), patient.clone());
            }
            if let Some(dest) = target {
                roles.insert("destination".to_string(), dest.clone());
            }
        }
        _ => return None,
    }

    if roles.is_empty() {
        None
    } else {
        Some(roles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit_num(n: f64) -> Node {
        Node::Literal { value: LiteralValue::Number(n), pos: None }
    }

    #[test]
    fn set_prefers_to_modifier_over_arg1() {
        let args = vec![Node::identifier("count")];
        let mut modifiers = HashMap::new();
        modifiers.insert("to".to_string(), lit_num(5.0));
        let roles = infer_roles("set", &args, &modifiers, None).unwrap();
        assert_eq!(roles.get("patient"), Some(&lit_num(5.0)));
        assert_eq!(roles.get("destination"), Some(&Node::identifier("count")));
    }

    #[test]
    fn unknown_command_gets_no_roles() {
        assert_eq!(infer_roles("frobnicate", &[], &HashMap::new(), None), None);
    }

    #[test]
    fn toggle_destination_comes_from_target() {
        let args = vec![Node::Selector { value: ".open".into(), pos: None }];
        let target = Node::Selector { value: "#menu".into(), pos: None };
        let roles = infer_roles("toggle", &args, &HashMap::new(), Some(&target)).unwrap();
        assert_eq!(roles.get("destination"), Some(&target));
    }

    #[test]
    fn fetch_lifts_string_response_type_to_identifier() {
        let args = vec![Node::Literal { value: LiteralValue::String("/api".into()), pos: None }];
        let mut modifiers = HashMap::new();
        modifiers.insert(
            "as".to_string(),
            Node::Literal { value: LiteralValue::String("json".into()), pos: None },
        );
        let roles = infer_roles("fetch", &args, &modifiers, None).unwrap();
        assert_eq!(roles.get("responseType"), Some(&Node::identifier("json")));
    }

    #[test]
    fn empty_role_map_is_elided() {
        let roles = infer_roles("wait", &[], &HashMap::new(), None);
        assert!(roles.is_none());
    }
}
