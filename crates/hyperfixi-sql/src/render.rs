//! `renderSQLiteMgmt` (spec §6): the inverse of the pattern matcher, turning
//! a semantic node back into a natural-language surface string for a given
//! target language.

use crate::node::SemanticNode;
use crate::profile::{lookup, WordOrder};
use crate::schema::schemas;

pub fn render_sqlite_mgmt(node: &SemanticNode, language_code: &str) -> Result<String, String> {
    let profile = lookup(language_code).ok_or_else(|| format!("unsupported language code {language_code:?}"))?;
    let schema = schemas()
        .into_iter()
        .find(|s| s.action == node.action)
        .ok_or_else(|| format!("unknown action {:?}", node.action))?;
    let localized_action = *profile
        .keywords
        .get(schema.action)
        .ok_or_else(|| format!("profile {} has no keyword for {}", profile.language_code, schema.action))?;

    let mut ordered_roles = schema.roles.clone();
    ordered_roles.sort_by_key(|r| match profile.word_order {
        WordOrder::Sov => r.sov_position,
        WordOrder::Svo | WordOrder::Vso => r.svo_position,
    });

    let mut parts = Vec::new();
    for role_schema in &ordered_roles {
        let Some(value) = node.role(role_schema.name) else { continue };
        if let Some(marker) = role_schema.marker {
            if let Some(localized_marker) = profile.markers.get(marker) {
                parts.push((*localized_marker).to_string());
            }
        }
        if role_schema.greedy {
            parts.extend(value.split(',').map(str::to_string));
        } else {
            parts.push(value.to_string());
        }
    }

    let surface = match profile.word_order {
        WordOrder::Sov => {
            parts.push(localized_action.to_string());
            parts.join(" ")
        }
        WordOrder::Svo | WordOrder::Vso => {
            let mut out = vec![localized_action.to_string()];
            out.extend(parts);
            out.join(" ")
        }
    };
    Ok(surface)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::match_semantic_node;
    use crate::profile::{english, japanese};
    use crate::tokenizer::tokenize;

    #[test]
    fn renders_english_drop_table() {
        let profile = english();
        let tokens = tokenize("drop-table users", &profile);
        let node = match_semantic_node(&tokens, &profile, &schemas()).unwrap();
        assert_eq!(render_sqlite_mgmt(&node, "en").unwrap(), "drop-table users");
    }

    #[test]
    fn renders_japanese_with_verb_last() {
        let profile = japanese();
        let tokens = tokenize("users テーブル削除", &profile);
        let node = match_semantic_node(&tokens, &profile, &schemas()).unwrap();
        assert_eq!(render_sqlite_mgmt(&node, "ja").unwrap(), "users テーブル削除");
    }

    #[test]
    fn translates_between_languages() {
        let profile = english();
        let tokens = tokenize("drop-table users", &profile);
        let node = match_semantic_node(&tokens, &profile, &schemas()).unwrap();
        assert_eq!(render_sqlite_mgmt(&node, "es").unwrap(), "eliminar-tabla users");
    }

    #[test]
    fn unsupported_language_is_an_error() {
        let profile = english();
        let tokens = tokenize("drop-table users", &profile);
        let node = match_semantic_node(&tokens, &profile, &schemas()).unwrap();
        assert!(render_sqlite_mgmt(&node, "zz").is_err());
    }
}
