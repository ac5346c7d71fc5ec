//! Multilingual tokenizer (spec §4.3): each profile keyword and marker is
//! matched as a single token even when the source script concatenates
//! words without whitespace (CJK), so the pattern matcher never has to
//! split a compound keyword itself.

use crate::profile::Profile;

fn known_tokens(profile: &Profile) -> Vec<&'static str> {
    let mut tokens: Vec<&'static str> = profile.keywords.values().copied().collect();
    tokens.extend(profile.markers.values().copied());
    tokens.sort_by_key(|t| std::cmp::Reverse(t.chars().count()));
    tokens
}

/// Splits `source` into tokens, preferring the longest known keyword or
/// marker match at the current position before falling back to a
/// whitespace-delimited word.
pub fn tokenize(source: &str, profile: &Profile) -> Vec<String> {
    let known = known_tokens(profile);
    let mut tokens = Vec::new();
    let mut rest = source.trim_start();

    while !rest.is_empty() {
        if let Some(matched) = known.iter().find(|t| rest.starts_with(*t)) {
            tokens.push((*matched).to_string());
            rest = rest[matched.len()..].trim_start();
            continue;
        }
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let (word, remainder) = rest.split_at(end);
        tokens.push(word.trim_end_matches(',').to_string());
        rest = remainder.trim_start();
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::english;

    #[test]
    fn splits_english_on_whitespace() {
        let tokens = tokenize("drop-table users", &english());
        assert_eq!(tokens, vec!["drop-table", "users"]);
    }

    #[test]
    fn matches_marker_as_its_own_token() {
        let tokens = tokenize("add-column users column email type text", &english());
        assert_eq!(tokens, vec!["add-column", "users", "column", "email", "type", "text"]);
    }
}
