#![cfg_attr(docsrs, feature(doc_cfg))]

//! # hyperfixi-base
//!
//! Pure structural atoms shared across the hyperfixi toolchain: the
//! tokenizer's [`Token`] vocabulary, source [`Span`]s and line/column
//! tracking, and the hand-rolled [`HyperfixiError`] + ANSI [`Style`] used for
//! diagnostics.
//!
//! This crate has no knowledge of the DSL's grammar or of code generation —
//! only the generic infrastructure every other crate in the workspace builds
//! upon.

pub mod error;
pub mod span;
pub mod style;
pub mod token;

pub use error::{HyperfixiError, HyperfixiErrorKind, Result};
pub use span::{LineCol, LineIndex, Span};
pub use style::Style;
pub use token::{Token, TokenKind, VarScope, RESERVED_WORDS};
