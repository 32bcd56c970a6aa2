//! Configuration system for sqftcl.
//!
//! Loads config from:
//! 1. Global: ~/.config/sqftcl/config.toml
//! 2. Per-project: .sqftcl/config.toml (overrides global)
//!
//! Example config.toml:
//! ```toml
//! [convert]
//! rules = "rules.yaml"        # default rule table for report mode
//! db = "args.txt"             # default argument database
//! report = false              # default for --report/--no-report
//! ```
//!
//! Relative paths are resolved against the directory holding the config file.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Conversion defaults.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ConvertConfig {
    /// Rule table used when report mode is selected without `--rules`.
    pub rules: Option<PathBuf>,
    /// Argument database used when `--db` is not given.
    pub db: Option<PathBuf>,
    /// Report mode default when neither `--report` nor `--no-report` is given.
    pub report: Option<bool>,
}

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct SqftclConfig {
    pub convert: ConvertConfig,
}

impl SqftclConfig {
    /// Load configuration for a project.
    ///
    /// Loads global config from ~/.config/sqftcl/config.toml,
    /// then merges with per-project config from .sqftcl/config.toml.
    pub fn load(root: &Path) -> Self {
        Self::load_with_global(root, Self::global_config_path().as_deref())
    }

    /// Like [`load`](Self::load), with an explicit global config location.
    pub fn load_with_global(root: &Path, global_path: Option<&Path>) -> Self {
        let mut config = Self::default();

        if let Some(global_path) = global_path {
            if let Some(global) = Self::load_file(global_path) {
                config = config.merge(global);
            }
        }

        let project_path = root.join(".sqftcl").join("config.toml");
        if let Some(project) = Self::load_file(&project_path) {
            config = config.merge(project);
        }

        config
    }

    /// Get the global config path.
    fn global_config_path() -> Option<PathBuf> {
        let config_home = std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .ok()
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))?;
        Some(config_home.join("sqftcl").join("config.toml"))
    }

    /// Load config from a file path. Unreadable files are skipped; files that
    /// do not parse are skipped with a warning.
    fn load_file(path: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        let config: Self = match toml::from_str(&content) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(path = %path.display(), "ignoring invalid config: {err}");
                return None;
            }
        };
        let base = path.parent().unwrap_or(Path::new("."));
        Some(config.resolve_paths(base))
    }

    fn resolve_paths(self, base: &Path) -> Self {
        let resolve = |p: Option<PathBuf>| {
            p.map(|p| if p.is_relative() { base.join(p) } else { p })
        };
        Self {
            convert: ConvertConfig {
                rules: resolve(self.convert.rules),
                db: resolve(self.convert.db),
                report: self.convert.report,
            },
        }
    }

    /// Merge another config into this one. Keys set in `other` win.
    fn merge(self, other: Self) -> Self {
        Self {
            convert: ConvertConfig {
                rules: other.convert.rules.or(self.convert.rules),
                db: other.convert.db.or(self.convert.db),
                report: other.convert.report.or(self.convert.report),
            },
        }
    }
}
