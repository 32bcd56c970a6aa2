//! Db command - validate an argument database and list it.

use crate::argdb::ArgDatabase;
use clap::Args;
use std::path::PathBuf;

#[derive(Args)]
pub struct DbArgs {
    /// Argument database file
    pub path: PathBuf,
}

/// Run the db command
pub fn run(args: DbArgs) -> anyhow::Result<()> {
    let db = ArgDatabase::load(&args.path)?;
    print!("{}", render(&db));
    Ok(())
}

/// One line per command: its arguments in priority order.
pub fn render(db: &ArgDatabase) -> String {
    let mut out = String::new();
    for command in db.commands() {
        let args: Vec<String> = db
            .arguments(command)
            .iter()
            .map(|e| format!("{} ({})", e.argument, e.priority))
            .collect();
        out.push_str(&format!("{command}: {}\n", args.join(", ")));
    }
    out
}
