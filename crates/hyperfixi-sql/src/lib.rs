//! The multilingual DSL-to-SQL compiler variant (spec §4.3, §6): a second
//! front-end (schema-driven pattern matching, not recursive descent) over a
//! parallel pipeline shape, producing SQLite DDL from source text in any
//! registered language.

pub mod generator;
pub mod matcher;
pub mod node;
pub mod profile;
pub mod render;
pub mod schema;
pub mod tokenizer;

pub use node::SemanticNode;
pub use render::render_sqlite_mgmt;

/// `compile(source, languageCode)` (spec §6): `Ok` carries the generated
/// SQL, `Err` a structured list of diagnostics. Never panics; an
/// unrecognized language or action is reported, not a crash.
#[derive(Debug, Clone, PartialEq)]
pub enum CompileResult {
    Ok { code: String },
    Err { errors: Vec<String> },
}

pub fn compile(source: &str, language_code: &str) -> CompileResult {
    let Some(profile) = profile::lookup(language_code) else {
        return CompileResult::Err { errors: vec![format!("unsupported language code {language_code:?}")] };
    };

    let tokens = tokenizer::tokenize(source, &profile);
    let schemas = schema::schemas();
    let Some(node) = matcher::match_semantic_node(&tokens, &profile, &schemas) else {
        return CompileResult::Err { errors: vec![format!("no known command recognized in {source:?}")] };
    };

    match generator::generate_sql(&node) {
        Ok(code) => CompileResult::Ok { code },
        Err(e) => CompileResult::Err { errors: vec![e] },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compiles_english_drop_table() {
        let result = compile("drop-table users", "en");
        assert_eq!(result, CompileResult::Ok { code: "DROP TABLE IF EXISTS users".to_string() });
    }

    #[test]
    fn compiles_spanish_drop_table_to_english_sql() {
        let result = compile("eliminar-tabla usuarios", "es");
        assert_eq!(result, CompileResult::Ok { code: "DROP TABLE IF EXISTS usuarios".to_string() });
    }

    #[test]
    fn unsupported_language_reports_error() {
        let result = compile("drop-table users", "zz");
        assert!(matches!(result, CompileResult::Err { .. }));
    }

    #[test]
    fn unrecognized_command_reports_error() {
        let result = compile("frobnicate users", "en");
        assert!(matches!(result, CompileResult::Err { .. }));
    }
}
