//! Parse command - dump classified statements as JSON.

use anyhow::Context;
use clap::Args;
use sqftcl_syntax::{reader_for_extension, reader_for_language};
use std::path::PathBuf;

#[derive(Args)]
pub struct ParseArgs {
    /// Input .sqf file
    pub input: PathBuf,
}

/// Run the parse command
pub fn run(args: ParseArgs) -> anyhow::Result<()> {
    let source = super::read_source(&args.input)?;

    let reader = args
        .input
        .extension()
        .and_then(|e| e.to_str())
        .and_then(reader_for_extension)
        .or_else(|| reader_for_language("sqf"))
        .context("No SQF reader registered")?;

    let program = reader.read(&source);
    println!("{}", serde_json::to_string_pretty(&program)?);
    Ok(())
}
