//! SQL generator (spec §4.3, §6): lowers a [`SemanticNode`] to SQLite DDL.
//! Output is always English-keyword standard SQL regardless of source
//! language.

use crate::node::SemanticNode;

fn sql_type(raw: &str) -> &str {
    match raw.to_ascii_lowercase().as_str() {
        "int" | "integer" | "number" => "INTEGER",
        "text" | "string" | "str" => "TEXT",
        "real" | "float" | "double" => "REAL",
        "blob" | "bytes" => "BLOB",
        _ => "TEXT",
    }
}

/// Parses a `name:type,name:type` column-definition remainder (the
/// convention this variant's schemas use for `create-table`'s greedy
/// `columns` role) into SQL column clauses.
fn column_defs(raw: &str) -> Result<String, String> {
    let mut defs = Vec::new();
    for entry in raw.split(',') {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }
        let Some((name, ty)) = entry.split_once(':') else {
            return Err(format!("malformed column definition: {entry:?}"));
        };
        defs.push(format!("{} {}", name.trim(), sql_type(ty.trim())));
    }
    if defs.is_empty() {
        return Err("create-table requires at least one column".to_string());
    }
    Ok(defs.join(", "))
}

/// Generates one SQL statement from a semantic node, or a structured error
/// string when a required role is missing or malformed.
pub fn generate_sql(node: &SemanticNode) -> Result<String, String> {
    match node.action.as_str() {
        "create-table" => {
            let table = node.role("table").ok_or("create-table missing table role")?;
            let columns = node.role("columns").ok_or("create-table missing columns role")?;
            Ok(format!("CREATE TABLE {table} ({})", column_defs(columns)?))
        }
        "drop-table" => {
            let table = node.role("table").ok_or("drop-table missing table role")?;
            Ok(format!("DROP TABLE IF EXISTS {table}"))
        }
        "rename-table" => {
            let table = node.role("table").ok_or("rename-table missing table role")?;
            let new_name = node.role("newName").ok_or("rename-table missing newName role")?;
            Ok(format!("ALTER TABLE {table} RENAME TO {new_name}"))
        }
        "add-column" => {
            let table = node.role("table").ok_or("add-column missing table role")?;
            let column = node.role("column").ok_or("add-column missing column role")?;
            let column_type = node.role("columnType").ok_or("add-column missing columnType role")?;
            Ok(format!("ALTER TABLE {table} ADD COLUMN {column} {}", sql_type(column_type)))
        }
        "drop-column" => {
            let table = node.role("table").ok_or("drop-column missing table role")?;
            let column = node.role("column").ok_or("drop-column missing column role")?;
            Ok(format!("ALTER TABLE {table} DROP COLUMN {column}"))
        }
        "create-index" => {
            let index = node.role("index").ok_or("create-index missing index role")?;
            let table = node.role("table").ok_or("create-index missing table role")?;
            let column = node.role("column").ok_or("create-index missing column role")?;
            Ok(format!("CREATE INDEX {index} ON {table} ({column})"))
        }
        "drop-index" => {
            let index = node.role("index").ok_or("drop-index missing index role")?;
            Ok(format!("DROP INDEX {index}"))
        }
        other => Err(format!("no SQL generator registered for action {other:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::RoleValue;
    use crate::schema::RoleType;
    use std::collections::HashMap;

    fn node(action: &str, roles: &[(&str, &str, RoleType)]) -> SemanticNode {
        let mut map = HashMap::new();
        for (name, value, role_type) in roles {
            map.insert(name.to_string(), RoleValue { value: value.to_string(), role_type: *role_type });
        }
        SemanticNode { action: action.to_string(), roles: map, start: 0, end: 0 }
    }

    #[test]
    fn create_table_builds_column_list() {
        let n = node(
            "create-table",
            &[
                ("table", "users", RoleType::TableName),
                ("columns", "id:integer,name:text", RoleType::Remainder),
            ],
        );
        assert_eq!(generate_sql(&n).unwrap(), "CREATE TABLE users (id INTEGER, name TEXT)");
    }

    #[test]
    fn drop_table_is_minimal() {
        let n = node("drop-table", &[("table", "users", RoleType::TableName)]);
        assert_eq!(generate_sql(&n).unwrap(), "DROP TABLE IF EXISTS users");
    }

    #[test]
    fn missing_role_is_a_structured_error() {
        let n = node("drop-table", &[]);
        assert!(generate_sql(&n).is_err());
    }
}
