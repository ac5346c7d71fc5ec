//! Workspace-wide end-to-end scenarios, exercised from `tests/` against
//! every crate's public API rather than its internals. This crate ships no
//! runtime code of its own.
