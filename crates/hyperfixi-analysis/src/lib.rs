//! Pure, protocol-agnostic source analyzers (spec §6): diagnostics,
//! symbols, hover, completions, and complexity, each a plain function over
//! source text. None of this wires up a language server; a caller embeds
//! these in whatever transport (stdio, a browser worker, a test harness) it
//! needs.

pub mod complexity;
pub mod completions;
pub mod diagnostics;
pub mod hover;
pub mod symbols;
pub mod types;

pub use complexity::{
    calculate_cognitive, calculate_cyclomatic, calculate_source_cognitive, calculate_source_complexity,
};
pub use completions::completions;
pub use diagnostics::{diagnostics, diagnostics_with_options, DiagnosticOptions};
pub use hover::hover;
pub use symbols::symbols;
pub use types::{CompletionItem, CompletionKind, Diagnostic, Hover, Range, Severity, Symbol, SymbolKind};
