//! Rules command - compile a rule table strictly and summarize it.

use anyhow::Context;
use clap::Args;
use sqftcl_rules_config::RulesConfig;
use sqftcl_syntax::RuleTable;
use std::path::PathBuf;

#[derive(Args)]
pub struct RulesArgs {
    /// Rule table YAML file
    pub path: PathBuf,
}

/// Run the rules command
pub fn run(args: RulesArgs) -> anyhow::Result<()> {
    let config = RulesConfig::load(&args.path)?;
    let table = RuleTable::compile(&config)
        .with_context(|| format!("Invalid rule table {}", args.path.display()))?;

    let (header, titles, send, verify) = table.counts();
    println!("{}", args.path.display());
    if config.is_empty() {
        println!("  (no custom rules; built-in rules only)");
    }
    println!("  header rules:  {header}");
    println!("  title rules:   {titles}");
    println!("  send rules:    {send}");
    println!("  verify rules:  {verify}");
    Ok(())
}
