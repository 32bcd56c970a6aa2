//! Report-mode conversion.
//!
//! Reformats company-style command scripts into a fixed tabular layout:
//!
//! ```text
//! 0.1 TOS_COM
//!     Send commands
//!         CM1     send it
//!     Verify Telemetry
//!             x: state :: Cnt label := 1
//!
//!         END
//! ```
//!
//! Scanning is line-oriented and independent of the SQF reader. Each category
//! is an ordered list of rules; a rule table from disk prepends its own rule
//! to the built-in one, so lines the custom rule misses still get the default
//! treatment.

use regex::{Captures, Regex, RegexBuilder};
use sqftcl_rules_config::{
    DEFAULT_SEND_FORMAT, DEFAULT_VERIFY_FORMAT, HeaderRule as HeaderConfig, RulesConfig,
    TemplateRule,
};
use std::path::Path;

/// Header text used when no rule table supplies one.
pub const DEFAULT_HEADER: &str = "0.1 TOS_COM";

/// Substring that marks a header line by default.
pub const HEADER_MARKER: &str = "TOS_COM";

const SEND_SECTION: &str = "    Send commands";
const VERIFY_SECTION: &str = "    Verify Telemetry";
const END_MARKER: &str = "        END";

const BUILTIN_TITLE: &str = "^vehicle";
const BUILTIN_SEND_PATTERN: &str = r"(?i)^C\s+(?P<name>[A-Za-z0-9_]+)\s*(?:;\s*(?P<text>.+))?$";
const BUILTIN_SEND_FORMAT: &str = "        {name}     {text}";
const BUILTIN_VERIFY_PATTERN: &str =
    r"(?P<var>[A-Za-z0-9_]+)\s*=\s*(?P<val>[A-Za-z0-9_]+)\s*(?:;\s*(?P<label>.+))?$";
const BUILTIN_VERIFY_FORMAT: &str = "            {var}: state :: Cnt {label} := {val}";

/// A rule pattern that failed to compile.
#[derive(Debug, thiserror::Error)]
#[error("invalid {category} pattern {pattern:?}: {source}")]
pub struct RuleError {
    pub category: &'static str,
    pub pattern: String,
    #[source]
    pub source: regex::Error,
}

#[derive(Debug, Clone)]
struct HeaderRule {
    needle: String,
    text: String,
    ignore_case: bool,
}

impl HeaderRule {
    fn matches(&self, line: &str) -> bool {
        if self.ignore_case {
            line.to_uppercase().contains(&self.needle.to_uppercase())
        } else {
            line.contains(&self.needle)
        }
    }
}

/// Where a line rule's pattern may match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Anchor {
    /// Only at the start of the line.
    Start,
    /// Anywhere in the line.
    Anywhere,
}

/// A compiled pattern plus the template its named captures fill.
#[derive(Debug, Clone)]
struct LineRule {
    regex: Regex,
    template: String,
    anchor: Anchor,
}

impl LineRule {
    fn new(
        category: &'static str,
        pattern: &str,
        template: &str,
        anchor: Anchor,
    ) -> Result<Self, RuleError> {
        let regex = Regex::new(pattern).map_err(|source| RuleError {
            category,
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self {
            regex,
            template: template.to_string(),
            anchor,
        })
    }

    fn from_config(
        category: &'static str,
        rule: &TemplateRule,
        default_format: &str,
        anchor: Anchor,
    ) -> Result<Self, RuleError> {
        Self::new(category, &rule.pattern, rule.format_or(default_format), anchor)
    }

    fn apply(&self, line: &str) -> Option<String> {
        let caps = self.regex.captures(line)?;
        if self.anchor == Anchor::Start && caps.get(0)?.start() != 0 {
            return None;
        }
        Some(render_template(&self.template, &self.regex, &caps))
    }
}

/// Fill `{name}` placeholders from named captures.
///
/// Groups that did not participate render as empty strings. Placeholders that
/// name no group are kept verbatim. `{{` and `}}` produce literal braces.
fn render_template(template: &str, regex: &Regex, caps: &Captures) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(pos) = rest.find(['{', '}']) {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        if let Some(after) = tail.strip_prefix("{{") {
            out.push('{');
            rest = after;
            continue;
        }
        if let Some(after) = tail.strip_prefix("}}") {
            out.push('}');
            rest = after;
            continue;
        }

        if tail.starts_with('{') {
            if let Some(close) = tail.find('}') {
                let name = &tail[1..close];
                if regex.capture_names().flatten().any(|n| n == name) {
                    out.push_str(caps.name(name).map_or("", |m| m.as_str().trim()));
                } else {
                    out.push_str(&tail[..=close]);
                }
                rest = &tail[close + 1..];
                continue;
            }
        }

        out.push_str(&tail[..1]);
        rest = &tail[1..];
    }

    out.push_str(rest);
    out.trim_end().to_string()
}

/// Compiled report rules: one ordered rule list per category.
#[derive(Debug, Clone)]
pub struct RuleTable {
    header: Vec<HeaderRule>,
    titles: Vec<Regex>,
    send: Vec<LineRule>,
    verify: Vec<LineRule>,
}

impl RuleTable {
    /// The built-in rules.
    pub fn builtin() -> Self {
        Self {
            header: vec![HeaderRule {
                needle: HEADER_MARKER.to_string(),
                text: DEFAULT_HEADER.to_string(),
                ignore_case: true,
            }],
            titles: vec![compile_title(BUILTIN_TITLE).unwrap()],
            send: vec![
                LineRule::new(
                    "send_command",
                    BUILTIN_SEND_PATTERN,
                    BUILTIN_SEND_FORMAT,
                    Anchor::Start,
                )
                .unwrap(),
            ],
            verify: vec![
                LineRule::new(
                    "verify",
                    BUILTIN_VERIFY_PATTERN,
                    BUILTIN_VERIFY_FORMAT,
                    Anchor::Anywhere,
                )
                .unwrap(),
            ],
        }
    }

    /// Compile a rule table, failing on the first invalid pattern.
    pub fn compile(config: &RulesConfig) -> Result<Self, RuleError> {
        let (table, errors) = Self::compile_parts(config);
        match errors.into_iter().next() {
            Some(err) => Err(err),
            None => Ok(table),
        }
    }

    /// Compile a rule table, keeping built-in rules for any category whose
    /// patterns do not compile.
    pub fn compile_lenient(config: &RulesConfig) -> Self {
        let (table, errors) = Self::compile_parts(config);
        for err in errors {
            tracing::warn!("{err}; using built-in {} rules", err.category);
        }
        table
    }

    /// Load a rule table from `path`, or the built-in rules when there is no
    /// path or the file cannot be read or parsed.
    pub fn load_or_builtin(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::builtin();
        };
        match RulesConfig::load(path) {
            Ok(config) => {
                tracing::debug!(path = %path.display(), "loaded rule table");
                Self::compile_lenient(&config)
            }
            Err(err) => {
                tracing::warn!("{err}; using built-in report rules");
                Self::builtin()
            }
        }
    }

    fn compile_parts(config: &RulesConfig) -> (Self, Vec<RuleError>) {
        let mut table = Self::builtin();
        let mut errors = Vec::new();

        if let Some(header) = &config.header {
            table.header = header_rules(header);
        }

        if let Some(titles) = &config.titles {
            match titles
                .iter()
                .map(|t| compile_title(t))
                .collect::<Result<Vec<_>, _>>()
            {
                Ok(compiled) => table.titles = compiled,
                Err(err) => errors.push(err),
            }
        }

        if let Some(rule) = &config.send_command {
            match LineRule::from_config("send_command", rule, DEFAULT_SEND_FORMAT, Anchor::Start) {
                Ok(compiled) => table.send.insert(0, compiled),
                Err(err) => errors.push(err),
            }
        }

        if let Some(rule) = &config.verify {
            match LineRule::from_config("verify", rule, DEFAULT_VERIFY_FORMAT, Anchor::Anywhere) {
                Ok(compiled) => table.verify.insert(0, compiled),
                Err(err) => errors.push(err),
            }
        }

        (table, errors)
    }

    /// Number of rules per category: (header, titles, send, verify).
    pub fn counts(&self) -> (usize, usize, usize, usize) {
        (
            self.header.len(),
            self.titles.len(),
            self.send.len(),
            self.verify.len(),
        )
    }

    fn header_text(&self, line: &str) -> Option<&str> {
        self.header
            .iter()
            .find(|h| h.matches(line))
            .map(|h| h.text.as_str())
    }

    fn is_title(&self, line: &str) -> bool {
        self.titles
            .iter()
            .any(|t| t.find(line).is_some_and(|m| m.start() == 0))
    }

    fn send_entry(&self, line: &str) -> Option<String> {
        self.send.iter().find_map(|rule| rule.apply(line))
    }

    fn verify_entry(&self, line: &str) -> Option<String> {
        self.verify.iter().find_map(|rule| rule.apply(line))
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::builtin()
    }
}

fn compile_title(pattern: &str) -> Result<Regex, RuleError> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|source| RuleError {
            category: "titles",
            pattern: pattern.to_string(),
            source,
        })
}

fn header_rules(config: &[HeaderConfig]) -> Vec<HeaderRule> {
    config
        .iter()
        .filter_map(|h| {
            let needle = h.match_text.as_ref().filter(|m| !m.is_empty())?;
            Some(HeaderRule {
                needle: needle.clone(),
                text: h.text.clone().unwrap_or_else(|| DEFAULT_HEADER.to_string()),
                ignore_case: false,
            })
        })
        .collect()
}

/// Entries collected while scanning, flushed once into the report.
#[derive(Debug, Default)]
struct Accumulator {
    header: Option<String>,
    send: Vec<String>,
    verify: Vec<String>,
    end: bool,
}

impl Accumulator {
    fn render(self) -> String {
        let mut out: Vec<String> = Vec::new();
        if let Some(header) = self.header {
            out.push(header);
        }
        if !self.send.is_empty() {
            out.push(SEND_SECTION.to_string());
            out.extend(self.send);
        }
        if !self.verify.is_empty() {
            out.push(VERIFY_SECTION.to_string());
            out.extend(self.verify);
            out.push(String::new());
        }
        if self.end {
            out.push(END_MARKER.to_string());
        }
        out.join("\n")
    }
}

fn is_verify_line(clean: &str) -> bool {
    clean.to_uppercase().contains("VERIFY") && clean.contains('=')
}

/// Convert source text into a report using `rules`.
pub fn generate_report(source: &str, rules: &RuleTable) -> String {
    let mut acc = Accumulator::default();

    for raw in source.lines() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let clean = line.trim_start_matches(';').trim();

        if acc.header.is_none() {
            if let Some(text) = rules.header_text(clean) {
                acc.header = Some(text.to_string());
            }
        }

        if rules.is_title(clean) {
            tracing::debug!(line, "skipping title line");
            continue;
        }

        if let Some(entry) = rules.send_entry(line) {
            tracing::debug!(line, "send command");
            acc.send.push(entry);
            continue;
        }

        if is_verify_line(clean) {
            if let Some(entry) = rules.verify_entry(clean) {
                tracing::debug!(line, "verify entry");
                acc.verify.push(entry);
                continue;
            }
        }

        if clean.eq_ignore_ascii_case("END") {
            acc.end = true;
        }
    }

    acc.render()
}
