//! The interchange AST: a single normalized node vocabulary every post-parse
//! pass (codegen, the SQL-DSL variant, the pure analyzers) targets, plus the
//! `fromCore`/`toCore` converters that adapt it to/from the core parser's
//! verbose vocabulary (spec §4.4–§4.6, §9).

pub mod from_core;
pub mod node;
pub mod roles;
pub mod to_core;

pub use from_core::{from_core, from_core_opt};
pub use node::{EventModifiers, LiteralValue, Node, Position, Scope};
pub use to_core::to_core;
