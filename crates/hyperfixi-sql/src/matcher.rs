//! Pattern matcher (spec §4.3): matches a token stream against the schema
//! table for a given profile, producing a role-annotated [`SemanticNode`].

use crate::node::{RoleValue, SemanticNode};
use crate::profile::{Profile, WordOrder};
use crate::schema::CommandSchema;
use std::collections::HashMap;

/// Finds the schema whose localized keyword appears in `tokens` and fills
/// in its roles. `None` when no schema's keyword is present.
pub fn match_semantic_node(tokens: &[String], profile: &Profile, schemas: &[CommandSchema]) -> Option<SemanticNode> {
    let schema = schemas
        .iter()
        .find(|s| profile.keywords.get(s.action).is_some_and(|kw| tokens.iter().any(|t| t == kw)))?;
    let localized_action = profile.keywords[schema.action];

    let mut remaining: Vec<String> = tokens.to_vec();
    if let Some(pos) = remaining.iter().position(|t| t == localized_action) {
        remaining.remove(pos);
    }

    let mut ordered_roles = schema.roles.clone();
    // VSO shares SVO's role-position table here; the two differ only in
    // where the verb (action keyword, already stripped above) sits, not in
    // argument order, so no separate `vso_position` field is needed.
    ordered_roles.sort_by_key(|r| match profile.word_order {
        WordOrder::Sov => r.sov_position,
        WordOrder::Svo | WordOrder::Vso => r.svo_position,
    });

    let mut roles = HashMap::new();
    for role_schema in &ordered_roles {
        if let Some(marker) = role_schema.marker {
            let Some(localized_marker) = profile.markers.get(marker) else { continue };
            let Some(mpos) = remaining.iter().position(|t| t == localized_marker) else { continue };
            remaining.remove(mpos);
            let value = if role_schema.greedy {
                remaining.split_off(mpos.min(remaining.len())).join(",")
            } else if mpos < remaining.len() {
                remaining.remove(mpos)
            } else {
                continue;
            };
            roles.insert(role_schema.name.to_string(), RoleValue { value, role_type: role_schema.role_type });
        } else if role_schema.greedy {
            if remaining.is_empty() {
                continue;
            }
            let value = remaining.drain(..).collect::<Vec<_>>().join(",");
            roles.insert(role_schema.name.to_string(), RoleValue { value, role_type: role_schema.role_type });
            break;
        } else if !remaining.is_empty() {
            let value = remaining.remove(0);
            roles.insert(role_schema.name.to_string(), RoleValue { value, role_type: role_schema.role_type });
        }
    }

    Some(SemanticNode { action: schema.action.to_string(), roles, start: 0, end: tokens.len() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{english, japanese};
    use crate::schema::schemas;
    use crate::tokenizer::tokenize;

    #[test]
    fn matches_drop_table_english() {
        let profile = english();
        let tokens = tokenize("drop-table users", &profile);
        let node = match_semantic_node(&tokens, &profile, &schemas()).unwrap();
        assert_eq!(node.action, "drop-table");
        assert_eq!(node.role("table"), Some("users"));
    }

    #[test]
    fn matches_add_column_with_markers() {
        let profile = english();
        let tokens = tokenize("add-column users column email type text", &profile);
        let node = match_semantic_node(&tokens, &profile, &schemas()).unwrap();
        assert_eq!(node.role("table"), Some("users"));
        assert_eq!(node.role("column"), Some("email"));
        assert_eq!(node.role("columnType"), Some("text"));
    }

    #[test]
    fn matches_japanese_sov_order() {
        let profile = japanese();
        let tokens = tokenize("users テーブル削除", &profile);
        let node = match_semantic_node(&tokens, &profile, &schemas()).unwrap();
        assert_eq!(node.action, "drop-table");
        assert_eq!(node.role("table"), Some("users"));
    }

    #[test]
    fn unrecognized_action_returns_none() {
        let profile = english();
        let tokens = tokenize("frobnicate users", &profile);
        assert!(match_semantic_node(&tokens, &profile, &schemas()).is_none());
    }
}
