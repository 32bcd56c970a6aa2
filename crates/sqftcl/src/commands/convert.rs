//! Convert command - SQF to Tcl, or to a report.

use crate::argdb::ArgDatabase;
use crate::config::SqftclConfig;
use anyhow::Context;
use clap::Args;
use sqftcl_syntax::{ConvertOptions, convert, persist, reader_for_extension, writer_for_language};
use std::path::{Path, PathBuf};

/// Output path meaning "write to stdout".
const STDOUT_PATH: &str = "-";

#[derive(Args)]
pub struct ConvertArgs {
    /// Input .sqf file
    pub input: PathBuf,

    /// Output file ("-" for stdout; defaults to the input with a .tcl extension)
    pub output: Option<PathBuf>,

    /// Force report-style conversion
    #[arg(long, conflicts_with = "no_report")]
    pub report: bool,

    /// Force direct translation even when the source looks like a report
    #[arg(long)]
    pub no_report: bool,

    /// Rule table (YAML) customizing report mappings; selects report mode
    #[arg(long)]
    pub rules: Option<PathBuf>,

    /// Argument database (.txt, `<command> <priority> <argument>` per line)
    #[arg(long)]
    pub db: Option<PathBuf>,
}

impl ConvertArgs {
    /// Tri-state report flag from `--report` / `--no-report`.
    pub fn report_flag(&self) -> Option<bool> {
        match (self.report, self.no_report) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }

    /// Conversion options, with config values filling unset flags.
    pub fn options(&self, config: &SqftclConfig, debug: bool) -> ConvertOptions {
        ConvertOptions {
            report: self.report_flag().or(config.convert.report),
            rules_path: self.rules.clone(),
            default_rules_path: config.convert.rules.clone(),
            db_path: self.db.clone().or_else(|| config.convert.db.clone()),
            debug,
        }
    }
}

/// Default output location: the input path with the Tcl writer's extension.
pub fn default_output_path(input: &Path) -> PathBuf {
    let ext = writer_for_language("tcl")
        .map(|w| w.extension())
        .unwrap_or("tcl");
    input.with_extension(ext)
}

/// Run the convert command
pub fn run(args: ConvertArgs, config: &SqftclConfig, debug: bool) -> anyhow::Result<()> {
    let source = super::read_source(&args.input)?;

    let known_input = args
        .input
        .extension()
        .and_then(|e| e.to_str())
        .and_then(reader_for_extension)
        .is_some();
    if !known_input {
        tracing::warn!(path = %args.input.display(), "input does not have an .sqf extension");
    }

    let options = args.options(config, debug);
    if let Some(db_path) = &options.db_path {
        let db = ArgDatabase::load(db_path)
            .with_context(|| format!("Failed to load argument database {}", db_path.display()))?;
        tracing::info!(
            commands = db.commands().len(),
            entries = db.len(),
            "argument database ready"
        );
    }

    let mode = options.mode_for(&source);
    tracing::debug!(?mode, input = %args.input.display(), "converting");
    let output = convert(&source, &options);

    match args.output {
        Some(path) if path.as_os_str() == STDOUT_PATH => {
            println!("{output}");
        }
        output_path => {
            let path = output_path.unwrap_or_else(|| default_output_path(&args.input));
            persist(&output, &path)?;
            println!("Wrote: {}", path.display());
        }
    }
    Ok(())
}
