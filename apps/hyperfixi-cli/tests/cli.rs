use clap::Parser;
use hyperfixi_cli::{Cli, Commands};
use std::io::Write;

#[test]
fn parses_compile_subcommand_with_file_argument() {
    let cli = Cli::parse_from(["hyperfixi", "compile", "handlers.hf"]);
    match cli.command {
        Commands::Compile { file } => assert_eq!(file.to_str(), Some("handlers.hf")),
        other => panic!("expected Compile, got a different subcommand: {:?}", std::mem::discriminant(&other)),
    }
}

#[test]
fn parses_sql_subcommand_with_lang_flag() {
    let cli = Cli::parse_from(["hyperfixi", "sql", "schema.hf", "--lang", "es"]);
    match cli.command {
        Commands::Sql { file, lang } => {
            assert_eq!(file.to_str(), Some("schema.hf"));
            assert_eq!(lang, "es");
        }
        other => panic!("expected Sql, got a different subcommand: {:?}", std::mem::discriminant(&other)),
    }
}

#[test]
fn sql_subcommand_defaults_to_english() {
    let cli = Cli::parse_from(["hyperfixi", "sql", "schema.hf"]);
    match cli.command {
        Commands::Sql { lang, .. } => assert_eq!(lang, "en"),
        other => panic!("expected Sql, got a different subcommand: {:?}", std::mem::discriminant(&other)),
    }
}

#[test]
fn reads_a_real_temp_file_for_analyze() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "on click toggle .open").unwrap();
    let cli = Cli::parse_from(["hyperfixi", "analyze", file.path().to_str().unwrap()]);
    match cli.command {
        Commands::Analyze { file: path } => assert_eq!(path.as_path(), file.path()),
        other => panic!("expected Analyze, got a different subcommand: {:?}", std::mem::discriminant(&other)),
    }
}
