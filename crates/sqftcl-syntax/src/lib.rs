//! Surface-level translation of SQF scripts to Tcl.
//!
//! `sqftcl-syntax` classifies SQF statements into a small set of shapes and
//! emits equivalent Tcl. It maps syntax, not semantics: expressions are
//! rewritten textually and anything outside the known shapes is carried
//! through as a visible `# TODO` comment.
//!
//! # Architecture
//!
//! ```text
//!  source ──> split_statements ──> classify ──> Program ──> TclWriter ──> Tcl
//!     │                                            ^             │
//!     │                                            └─ block bodies re-read
//!     └────> generate_report (line scan + RuleTable) ─────────────────> report
//! ```
//!
//! [`select_mode`] picks the path; [`convert`] runs it.
//!
//! # Example
//!
//! ```
//! use sqftcl_syntax::{ConvertOptions, convert};
//!
//! let tcl = convert("_value = 5;\nsleep 1;", &ConvertOptions::default());
//! assert_eq!(tcl, "set value 5\nafter 1000");
//! ```

pub mod expr;
pub mod input;
pub mod ir;
pub mod mode;
pub mod output;
pub mod registry;
pub mod report;
pub mod traits;

use std::path::{Path, PathBuf};

// Re-exports: IR types
pub use ir::{Payload, Program, Statement, Stmt};

// Re-exports: Traits
pub use traits::{Reader, Writer};

// Re-exports: Registry
pub use registry::{
    reader_for_extension, reader_for_language, readers, writer_for_language, writers,
};

// Re-exports: Built-in reader and writer
pub use input::{SqfReader, read_sqf};
pub use output::{TclWriter, TclWriterImpl};

// Re-exports: Report mode
pub use mode::{Mode, select_mode};
pub use report::{RuleError, RuleTable, generate_report};

/// Error returned by [`persist`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Options for a single [`convert`] call.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Force report mode on (`Some(true)`) or off (`Some(false)`).
    pub report: Option<bool>,
    /// Rule table supplied by the caller. Its presence selects report mode.
    pub rules_path: Option<PathBuf>,
    /// Rule table used when report mode is chosen and `rules_path` is unset.
    /// Never selects report mode by itself.
    pub default_rules_path: Option<PathBuf>,
    /// Argument database location, carried for the surrounding tooling.
    pub db_path: Option<PathBuf>,
    /// Log every classified statement at info level.
    pub debug: bool,
}

impl ConvertOptions {
    /// The mode [`convert`] would use for `source`.
    pub fn mode_for(&self, source: &str) -> Mode {
        select_mode(source, self.report, self.rules_path.as_deref())
    }

    fn effective_rules_path(&self) -> Option<&Path> {
        self.rules_path
            .as_deref()
            .or(self.default_rules_path.as_deref())
    }
}

/// Convert SQF source to Tcl, or to a report when report mode is selected.
///
/// Never fails: unknown statements become marker comments and an unusable
/// rule table falls back to the built-in rules.
pub fn convert(source: &str, options: &ConvertOptions) -> String {
    if let Some(db) = &options.db_path {
        tracing::debug!(path = %db.display(), "argument database passed through");
    }

    let mode = options.mode_for(source);
    tracing::debug!(?mode, "selected conversion mode");

    match mode {
        Mode::Report => {
            let rules = RuleTable::load_or_builtin(options.effective_rules_path());
            generate_report(source, &rules)
        }
        Mode::Direct => {
            let program = read_sqf(source);
            if program.is_empty() {
                tracing::debug!("source has no statements");
            } else {
                tracing::debug!(statements = program.len(), "classified source");
            }
            if options.debug {
                for statement in &program.body {
                    tracing::info!(
                        kind = statement.stmt.kind_name(),
                        source = %statement.source,
                        "statement"
                    );
                }
            }
            TclWriter::emit(&program)
        }
    }
}

/// Write `text` to `path`, creating or replacing the file.
pub fn persist(text: &str, path: &Path) -> Result<(), Error> {
    std::fs::write(path, text).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = text.len(), "wrote output");
    Ok(())
}
