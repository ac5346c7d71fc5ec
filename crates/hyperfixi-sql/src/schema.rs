//! Declarative command schemas (spec §4.3): each schema names an `action`
//! and a list of roles a pattern match fills in from the source sentence.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleType {
    TableName,
    ColumnName,
    ColumnType,
    IndexName,
    Remainder,
}

/// A role's position in SVO- and SOV-ordered languages, an optional marker
/// token (preposition/postposition) that introduces it in source text, and
/// whether it greedily consumes everything remaining (used for a trailing
/// column-definition list).
#[derive(Debug, Clone)]
pub struct RoleSchema {
    pub name: &'static str,
    pub role_type: RoleType,
    pub svo_position: usize,
    pub sov_position: usize,
    pub marker: Option<&'static str>,
    pub greedy: bool,
}

#[derive(Debug, Clone)]
pub struct CommandSchema {
    pub action: &'static str,
    pub primary_role: &'static str,
    pub roles: Vec<RoleSchema>,
}

fn role(name: &'static str, role_type: RoleType, svo: usize, sov: usize) -> RoleSchema {
    RoleSchema { name, role_type, svo_position: svo, sov_position: sov, marker: None, greedy: false }
}

fn marked_role(name: &'static str, role_type: RoleType, svo: usize, sov: usize, marker: &'static str) -> RoleSchema {
    RoleSchema { name, role_type, svo_position: svo, sov_position: sov, marker: Some(marker), greedy: false }
}

/// The fixed set of DDL command schemas this compiler variant knows about.
pub fn schemas() -> Vec<CommandSchema> {
    vec![
        CommandSchema {
            action: "create-table",
            primary_role: "table",
            roles: vec![
                role("table", RoleType::TableName, 0, 0),
                RoleSchema {
                    name: "columns",
                    role_type: RoleType::Remainder,
                    svo_position: 1,
                    sov_position: 1,
                    marker: None,
                    greedy: true,
                },
            ],
        },
        CommandSchema {
            action: "drop-table",
            primary_role: "table",
            roles: vec![role("table", RoleType::TableName, 0, 0)],
        },
        CommandSchema {
            action: "rename-table",
            primary_role: "table",
            roles: vec![role("table", RoleType::TableName, 0, 0), marked_role("newName", RoleType::TableName, 1, 2, "to")],
        },
        CommandSchema {
            action: "add-column",
            primary_role: "table",
            roles: vec![
                role("table", RoleType::TableName, 0, 0),
                marked_role("column", RoleType::ColumnName, 1, 2, "column"),
                marked_role("columnType", RoleType::ColumnType, 2, 3, "type"),
            ],
        },
        CommandSchema {
            action: "drop-column",
            primary_role: "table",
            roles: vec![
                role("table", RoleType::TableName, 0, 0),
                marked_role("column", RoleType::ColumnName, 1, 2, "column"),
            ],
        },
        CommandSchema {
            action: "create-index",
            primary_role: "table",
            roles: vec![
                role("index", RoleType::IndexName, 0, 0),
                marked_role("table", RoleType::TableName, 1, 2, "on"),
                marked_role("column", RoleType::ColumnName, 2, 3, "column"),
            ],
        },
        CommandSchema {
            action: "drop-index",
            primary_role: "table",
            roles: vec![role("index", RoleType::IndexName, 0, 0)],
        },
    ]
}
