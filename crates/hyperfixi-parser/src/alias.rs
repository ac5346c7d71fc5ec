//! Command keyword alias normalization (spec §4.2).
//!
//! Command parsing dispatches on the *canonical* name; surface synonyms are
//! folded here before dispatch so the rest of the pipeline only ever sees
//! one spelling per command.

const ALIASES: &[(&str, &str)] = &[
    ("flip", "toggle"),
    ("switch", "toggle"),
    ("display", "show"),
    ("reveal", "show"),
];

/// Normalizes a command keyword to its canonical spelling. Names with no
/// alias entry pass through unchanged.
pub fn canonical_command_name(name: &str) -> &str {
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == name)
        .map(|(_, canon)| *canon)
        .unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flip_normalizes_to_toggle() {
        assert_eq!(canonical_command_name("flip"), "toggle");
    }

    #[test]
    fn unknown_name_passes_through() {
        assert_eq!(canonical_command_name("set"), "set");
    }
}
