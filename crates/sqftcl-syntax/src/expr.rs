//! Expression rewriting from SQF to Tcl variable-reference syntax.
//!
//! The rewrite is lexical. Every identifier-like token loses its leading
//! private marker (`_`) and gains the Tcl sigil (`$`); integer literals are left
//! alone. Operators, precedence and reserved words are not looked at, so
//! `alive _u` becomes `$alive $u`.

use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Tcl variable-reference prefix.
pub const SIGIL: char = '$';

/// Leading marker SQF uses for private variables.
pub const PRIVATE_MARKER: char = '_';

static TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[A-Za-z0-9_]+").unwrap());

/// Strip the private-variable marker from a name.
///
/// A name made only of markers is returned unchanged.
pub fn strip_private_marker(name: &str) -> &str {
    let stripped = name.trim_start_matches(PRIVATE_MARKER);
    if stripped.is_empty() { name } else { stripped }
}

/// Rewrite an SQF expression fragment into Tcl reference syntax.
pub fn rewrite_expr(expr: &str) -> String {
    let rewritten = TOKEN.replace_all(expr, |caps: &Captures| {
        let token = strip_private_marker(&caps[0]);
        if token.bytes().all(|b| b.is_ascii_digit()) {
            token.to_string()
        } else {
            format!("{SIGIL}{token}")
        }
    });

    let mut out = rewritten.into_owned();
    while out.contains("$$") {
        out = out.replace("$$", "$");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_private_variable() {
        assert_eq!(rewrite_expr("_value > 3"), "$value > 3");
    }

    #[test]
    fn test_bare_identifiers() {
        assert_eq!(rewrite_expr("a && b"), "$a && $b");
    }

    #[test]
    fn test_numbers_untouched() {
        assert_eq!(rewrite_expr("_i <= 10"), "$i <= 10");
        assert_eq!(rewrite_expr("_x == _1"), "$x == 1");
    }

    #[test]
    fn test_only_leading_marker_stripped() {
        assert_eq!(rewrite_expr("_my_var + 1"), "$my_var + 1");
    }

    #[test]
    fn test_existing_sigil_not_doubled() {
        assert_eq!(rewrite_expr("$a + _b"), "$a + $b");
        assert!(!rewrite_expr("$$a").contains("$$"));
    }

    #[test]
    fn test_reserved_words_are_rewritten_too() {
        assert_eq!(rewrite_expr("alive _u"), "$alive $u");
    }

    #[test]
    fn test_strip_private_marker() {
        assert_eq!(strip_private_marker("_i"), "i");
        assert_eq!(strip_private_marker("__i"), "i");
        assert_eq!(strip_private_marker("i"), "i");
        assert_eq!(strip_private_marker("_"), "_");
    }
}
