//! Choosing between direct translation and report mode.

use serde::Serialize;
use std::path::Path;

/// Substring that marks a source as a report-style script.
pub const REPORT_SNIFF_MARKER: &str = "TOS_COM";

/// Output produced by a conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// SQF statements translated to Tcl.
    Direct,
    /// Lines reformatted into the tabular report.
    Report,
}

/// Decide the conversion mode.
///
/// Precedence, highest first:
/// 1. an explicit `report` flag (`Some(true)` / `Some(false)`),
/// 2. an explicitly supplied rule table location selects report mode,
/// 3. the source containing [`REPORT_SNIFF_MARKER`] selects report mode,
/// 4. otherwise direct translation.
pub fn select_mode(source: &str, report: Option<bool>, rules_location: Option<&Path>) -> Mode {
    match report {
        Some(true) => Mode::Report,
        Some(false) => Mode::Direct,
        None if rules_location.is_some() => Mode::Report,
        None if source.contains(REPORT_SNIFF_MARKER) => Mode::Report,
        None => Mode::Direct,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAIN: &str = "_x = 1;";
    const MARKED: &str = "; TOS_COM\nC CM1";

    #[test]
    fn test_forced_flag_wins() {
        let rules = Path::new("rules.yaml");
        assert_eq!(select_mode(PLAIN, Some(true), None), Mode::Report);
        assert_eq!(select_mode(MARKED, Some(false), None), Mode::Direct);
        assert_eq!(select_mode(MARKED, Some(false), Some(rules)), Mode::Direct);
    }

    #[test]
    fn test_rules_location_forces_report() {
        assert_eq!(
            select_mode(PLAIN, None, Some(Path::new("rules.yaml"))),
            Mode::Report
        );
    }

    #[test]
    fn test_content_sniffing() {
        assert_eq!(select_mode(MARKED, None, None), Mode::Report);
        assert_eq!(select_mode(PLAIN, None, None), Mode::Direct);
        // Sniffing is case-sensitive.
        assert_eq!(select_mode("tos_com", None, None), Mode::Direct);
    }
}
