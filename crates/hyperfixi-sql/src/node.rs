//! The semantic node this compiler variant's pattern parser produces (spec
//! §3): `{action, roles, source span}`.

use crate::schema::RoleType;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub struct RoleValue {
    pub value: String,
    pub role_type: RoleType,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SemanticNode {
    pub action: String,
    pub roles: HashMap<String, RoleValue>,
    pub start: usize,
    pub end: usize,
}

impl SemanticNode {
    pub fn role(&self, name: &str) -> Option<&str> {
        self.roles.get(name).map(|r| r.value.as_str())
    }
}
