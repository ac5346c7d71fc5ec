//! Command-line interface for the hyperfixi compiler.
//!
//! Each subcommand maps onto one stage of the compiler pipeline: `parse`
//! stops at the core AST, `compile` runs a single handler through codegen,
//! `sql` drives the multilingual DSL-to-SQL variant, and `bundle` assembles
//! a runtime bundle from a config file.

use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hyperfixi")]
#[command(about = "Compiler toolchain for the hyperfixi behavior DSL", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a source file and print its core AST as JSON.
    Parse {
        /// Path to a hyperfixi source file.
        file: PathBuf,
    },

    /// Compile every handler in a source file to JavaScript.
    Compile {
        /// Path to a hyperfixi source file.
        file: PathBuf,
    },

    /// Compile a DSL-to-SQL source file for a given language.
    Sql {
        /// Path to a DSL-to-SQL source file.
        file: PathBuf,
        /// BCP-47-style language code (e.g. `en`, `es`, `ja`, `ar`).
        #[arg(long, default_value = "en")]
        lang: String,
    },

    /// Assemble a runtime bundle from a JSON config file.
    Bundle {
        /// Path to a `BundleConfig` JSON file.
        file: PathBuf,
    },

    /// Print diagnostics, symbols, and cyclomatic complexity for a source file.
    Analyze {
        /// Path to a hyperfixi source file.
        file: PathBuf,
    },
}

pub fn run_cli() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Parse { file } => cmd_parse(&file),
        Commands::Compile { file } => cmd_compile(&file),
        Commands::Sql { file, lang } => cmd_sql(&file, &lang),
        Commands::Bundle { file } => cmd_bundle(&file),
        Commands::Analyze { file } => cmd_analyze(&file),
    }
}

fn cmd_parse(file: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let source = fs::read_to_string(file)?;
    let core_nodes = hyperfixi_parser::Parser::parse(&source).map_err(|e| e.display_with_source(&source))?;
    let nodes: Vec<hyperfixi_ir::Node> = core_nodes.iter().map(hyperfixi_ir::from_core).collect();
    println!("{}", serde_json::to_string_pretty(&nodes)?);
    Ok(())
}

fn cmd_compile(file: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let source = fs::read_to_string(file)?;
    let core_nodes = hyperfixi_parser::Parser::parse(&source).map_err(|e| e.display_with_source(&source))?;
    let registry = hyperfixi_codegen::registry::build();

    let mut compiled_any = false;
    for (i, core) in core_nodes.iter().enumerate() {
        let node = hyperfixi_ir::from_core(core);
        if let Some(artifact) = hyperfixi_codegen::compile_handler(&node, format!("handler_{i}"), &registry) {
            compiled_any = true;
            println!("// handler: {}", artifact.event);
            println!("{}", artifact.code);
        }
    }
    if !compiled_any {
        log::warn!("no handlers compiled from {}", file.display());
    }
    Ok(())
}

fn cmd_sql(file: &PathBuf, lang: &str) -> Result<(), Box<dyn std::error::Error>> {
    let source = fs::read_to_string(file)?;
    match hyperfixi_sql::compile(&source, lang) {
        hyperfixi_sql::CompileResult::Ok { code } => {
            println!("{code}");
            Ok(())
        }
        hyperfixi_sql::CompileResult::Err { errors } => Err(errors.join("; ").into()),
    }
}

fn cmd_bundle(file: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let config_json = fs::read_to_string(file)?;
    let config: hyperfixi_codegen::bundle::BundleConfig = serde_json::from_str(&config_json)?;
    let output = hyperfixi_codegen::bundle::assemble(&config).map_err(|errs| {
        let structured: Vec<_> = errs.iter().map(hyperfixi_codegen::bundle::AssembleError::to_structured).collect();
        serde_json::to_string(&structured).unwrap_or_else(|_| "bundle assembly failed".to_string())
    })?;
    for warning in &output.warnings {
        log::warn!("{warning}");
    }
    println!("{}", output.source);
    Ok(())
}

fn cmd_analyze(file: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let source = fs::read_to_string(file)?;
    for diagnostic in hyperfixi_analysis::diagnostics(&source) {
        println!("error: {} ({}:{})", diagnostic.message, diagnostic.range.start.line, diagnostic.range.start.column);
    }
    for symbol in hyperfixi_analysis::symbols(&source) {
        println!("{:?} {}", symbol.kind, symbol.name);
    }
    println!("complexity: {}", hyperfixi_analysis::calculate_source_complexity(&source));
    Ok(())
}
