//! Command-line interface.

pub mod convert;
pub mod db;
pub mod parse;
pub mod rules;

use crate::config::SqftclConfig;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// Exit code for a missing input file.
pub const EXIT_INPUT_NOT_FOUND: i32 = 2;

#[derive(Parser)]
#[command(name = "sqftcl", version, about = "Convert SQF scripts to Tcl")]
pub struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Project root holding .sqftcl/config.toml (defaults to current directory)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Convert an SQF file to Tcl, or to a TOS_COM report
    Convert(convert::ConvertArgs),
    /// Print classified statements as JSON
    Parse(parse::ParseArgs),
    /// Compile a report rule table and summarize it
    Rules(rules::RulesArgs),
    /// Validate an argument database and list its commands
    Db(db::DbArgs),
}

/// Errors the CLI reports with a dedicated exit code or message.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),
    #[error("Input file is empty: {}", .0.display())]
    EmptyInput(PathBuf),
}

/// Run a parsed command line.
pub fn run(cli: Cli) -> anyhow::Result<()> {
    let root = match cli.root {
        Some(root) => root,
        None => std::env::current_dir()?,
    };
    let config = SqftclConfig::load(&root);

    match cli.command {
        Command::Convert(args) => convert::run(args, &config, cli.debug),
        Command::Parse(args) => parse::run(args),
        Command::Rules(args) => rules::run(args),
        Command::Db(args) => db::run(args),
    }
}

/// Process exit code for an error returned by [`run`].
pub fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<CliError>() {
        Some(CliError::InputNotFound(_)) => EXIT_INPUT_NOT_FOUND,
        _ => 1,
    }
}

/// Read a source file, rejecting missing and blank inputs.
pub(crate) fn read_source(path: &Path) -> anyhow::Result<String> {
    use anyhow::Context;

    if !path.exists() {
        return Err(CliError::InputNotFound(path.to_path_buf()).into());
    }
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    if source.trim().is_empty() {
        return Err(CliError::EmptyInput(path.to_path_buf()).into());
    }
    Ok(source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_input_exit_code() {
        let err = read_source(Path::new("/definitely/not/here.sqf")).unwrap_err();
        assert_eq!(exit_code(&err), EXIT_INPUT_NOT_FOUND);
    }

    #[test]
    fn test_blank_input_rejected() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("blank.sqf");
        std::fs::write(&path, " \n\t\n").unwrap();
        let err = read_source(&path).unwrap_err();
        assert!(matches!(err.downcast_ref::<CliError>(), Some(CliError::EmptyInput(_))));
        assert_eq!(exit_code(&err), 1);
    }

    #[test]
    fn test_cli_parses_convert_flags() {
        let cli = Cli::try_parse_from([
            "sqftcl", "convert", "in.sqf", "out.tcl", "--no-report", "--db", "args.txt", "--debug",
        ])
        .unwrap();
        assert!(cli.debug);
        let Command::Convert(args) = cli.command else {
            panic!("expected convert");
        };
        assert_eq!(args.report_flag(), Some(false));
        assert_eq!(args.db, Some(PathBuf::from("args.txt")));
    }

    #[test]
    fn test_report_flags_conflict() {
        assert!(Cli::try_parse_from(["sqftcl", "convert", "a.sqf", "--report", "--no-report"]).is_err());
    }
}
