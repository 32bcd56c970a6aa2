//! Argument database: per-command argument names with a priority index.
//!
//! One entry per line:
//!
//! ```text
//! <command> <priority> <argument>
//! CM00001 3 IRU_Drft_Bias
//! ```
//!
//! Blank lines and lines starting with `#` are ignored.

use std::path::{Path, PathBuf};

/// Error loading an argument database.
#[derive(Debug, thiserror::Error)]
pub enum ArgDbError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: expected `<command> <priority> <argument>`, got {content:?}")]
    Malformed { line: usize, content: String },
}

/// One `<command> <priority> <argument>` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgEntry {
    pub command: String,
    pub priority: i64,
    pub argument: String,
}

/// Parsed argument database, in file order.
#[derive(Debug, Clone, Default)]
pub struct ArgDatabase {
    entries: Vec<ArgEntry>,
}

impl ArgDatabase {
    /// Read and parse a database file.
    pub fn load(path: &Path) -> Result<Self, ArgDbError> {
        let text = std::fs::read_to_string(path).map_err(|source| ArgDbError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self::parse(&text)?;
        tracing::debug!(path = %path.display(), entries = db.len(), "loaded argument database");
        Ok(db)
    }

    /// Parse database text. The argument name is the rest of the line after
    /// the priority, so it may contain spaces.
    pub fn parse(text: &str) -> Result<Self, ArgDbError> {
        let mut entries = Vec::new();
        for (idx, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let malformed = || ArgDbError::Malformed {
                line: idx + 1,
                content: line.to_string(),
            };

            let (command, rest) = line.split_once(char::is_whitespace).ok_or_else(malformed)?;
            let rest = rest.trim_start();
            let (priority, argument) =
                rest.split_once(char::is_whitespace).ok_or_else(malformed)?;
            let priority: i64 = priority.parse().map_err(|_| malformed())?;
            let argument = argument.trim();
            if argument.is_empty() {
                return Err(malformed());
            }

            entries.push(ArgEntry {
                command: command.to_string(),
                priority,
                argument: argument.to_string(),
            });
        }
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct command names in first-seen order.
    pub fn commands(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for entry in &self.entries {
            if !seen.contains(&entry.command.as_str()) {
                seen.push(entry.command.as_str());
            }
        }
        seen
    }

    /// Arguments of `command`, lowest priority first. Equal priorities keep
    /// file order.
    pub fn arguments(&self, command: &str) -> Vec<&ArgEntry> {
        let mut args: Vec<&ArgEntry> = self
            .entries
            .iter()
            .filter(|e| e.command == command)
            .collect();
        args.sort_by_key(|e| e.priority);
        args
    }
}
