//! Rule table configuration for report-mode conversion.
//!
//! A rule table is a YAML file that overrides the built-in report patterns.
//! Every key is optional; an absent key keeps the built-in behavior for that
//! category only.
//!
//! ```yaml
//! header:
//!   - match: TOS_COM
//!     text: "0.1 TOS_COM"
//! titles:
//!   - "^vehicle"
//! send_command:
//!   pattern: '^C\s+(?P<name>\w+)\s*(?:;\s*(?P<text>.+))?$'
//!   format: "        {name}     {text}"
//! verify:
//!   pattern: '(?P<var>\w+)\s*=\s*(?P<val>\w+)\s*(?:;\s*(?P<label>.+))?$'
//!   format: "            {var}: state :: Cnt {label} := {val}"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Template used for send-command rules that omit `format`.
pub const DEFAULT_SEND_FORMAT: &str = "{name} {text}";

/// Template used for verify rules that omit `format`.
pub const DEFAULT_VERIFY_FORMAT: &str = "{var} {val} {label}";

/// Error loading a rule table file.
#[derive(Debug, thiserror::Error)]
pub enum RulesConfigError {
    #[error("failed to read rule table {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse rule table {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Header detection entry: a line containing `match` produces `text` as the report header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct HeaderRule {
    #[serde(rename = "match")]
    pub match_text: Option<String>,
    pub text: Option<String>,
}

/// A line pattern with named captures plus the template they fill.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TemplateRule {
    pub pattern: String,
    pub format: Option<String>,
}

impl TemplateRule {
    /// The template, or `default` when the rule has none.
    pub fn format_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.format.as_deref().unwrap_or(default)
    }
}

/// Root of a rule table file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RulesConfig {
    pub header: Option<Vec<HeaderRule>>,
    pub titles: Option<Vec<String>>,
    pub send_command: Option<TemplateRule>,
    pub verify: Option<TemplateRule>,
}

impl RulesConfig {
    /// Parse a rule table from YAML text.
    ///
    /// An empty document is an empty table.
    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        // A bare `null` document deserializes to `None`.
        let parsed: Option<Self> = serde_yaml::from_str(text)?;
        Ok(parsed.unwrap_or_default())
    }

    /// Load a rule table from a file.
    pub fn load(path: &Path) -> Result<Self, RulesConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| RulesConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content).map_err(|source| RulesConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// True when no key is set.
    pub fn is_empty(&self) -> bool {
        self.header.is_none()
            && self.titles.is_none()
            && self.send_command.is_none()
            && self.verify.is_none()
    }
}
