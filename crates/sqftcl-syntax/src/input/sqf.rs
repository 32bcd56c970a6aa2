//! SQF reader.
//!
//! A forgiving, pattern-based reader: source text is split into top-level
//! statements (semicolons inside `{ ... }` do not terminate a statement) and
//! each statement is matched against a fixed, ordered list of shapes. The
//! first shape that matches wins; anything else becomes `Unrecognized`.

use crate::expr::strip_private_marker;
use crate::ir::{Payload, Program, Statement, Stmt};
use crate::traits::Reader;
use regex::Regex;
use std::sync::LazyLock;

/// Static instance of the SQF reader for registry.
pub static SQF_READER: SqfReader = SqfReader;

/// SQF reader implementing the Reader trait.
pub struct SqfReader;

impl Reader for SqfReader {
    fn language(&self) -> &'static str {
        "sqf"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["sqf"]
    }

    fn read(&self, source: &str) -> Program {
        read_sqf(source)
    }
}

/// Split and classify SQF source.
pub fn read_sqf(source: &str) -> Program {
    let body = split_statements(source)
        .into_iter()
        .map(|raw| {
            let stmt = classify(&raw);
            tracing::debug!(kind = stmt.kind_name(), source = %raw, "classified statement");
            Statement::new(raw, stmt)
        })
        .collect();
    Program::new(body)
}

// ============================================================================
// Splitting
// ============================================================================

/// Split source text into top-level statements.
///
/// A `;` ends a statement only at brace depth zero and stays part of it. Depth
/// never drops below zero, so stray `}` are harmless. Brace-free statements
/// spanning several lines are split into one statement per non-empty line,
/// which recovers comment lines that carry no terminator.
pub fn split_statements(source: &str) -> Vec<String> {
    let mut statements = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;

    for ch in source.chars() {
        current.push(ch);
        match ch {
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            ';' if depth == 0 => {
                push_statement(&mut statements, &current);
                current.clear();
            }
            _ => {}
        }
    }
    push_statement(&mut statements, &current);

    statements
}

fn push_statement(out: &mut Vec<String>, raw: &str) {
    let stmt = raw.trim();
    if stmt.is_empty() {
        return;
    }

    if !stmt.contains(['{', '}']) {
        out.extend(
            stmt.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(String::from),
        );
        return;
    }

    // Block statements stay whole, but `//` lines in front of them are their own statements.
    if stmt.starts_with("//") {
        if let Some((comment, rest)) = stmt.split_once('\n') {
            out.push(comment.trim().to_string());
            push_statement(out, rest);
            return;
        }
    }

    out.push(stmt.to_string());
}

// ============================================================================
// Classification
// ============================================================================

static LINE_COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^//\s?(.*)$").unwrap());

static COMPANY_COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^;\s?(.*)$").unwrap());

static ASSIGNMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^_?([A-Za-z0-9_]+)\s*=\s*([^=\s].*)$").unwrap());

// `VERIFY  xx2 = tos_mode1 ;` - an assignment after a leading keyword.
static KEYWORD_ASSIGNMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^[^"\[\]{}()=]*?\b_?([A-Za-z0-9_]+)\s*=\s*([^=\s].*)$"#).unwrap()
});

static IF_HEAD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^if\s*\((.+?)\)\s*then\s*\{").unwrap());

static ELSE_HEAD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*else\s*\{").unwrap());

static FOR_HEAD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^for\s+"?_?([A-Za-z0-9_]+)"?\s+from\s+(-?\d+)\s+to\s+(-?\d+)\s+do\s*\{"#)
        .unwrap()
});

static WHILE_HEAD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^while\s*\{").unwrap());

static DO_HEAD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*do\s*\{").unwrap());

static HINT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)^hint\s+(.+)$").unwrap());

static FORMAT_CALL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^format\s*\[(.+)\]").unwrap());

static SLEEP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^sleep\s+([0-9.]+)\s*;?$").unwrap());

/// Classify a single statement.
pub fn classify(statement: &str) -> Stmt {
    let s = statement.trim();

    if let Some(caps) = LINE_COMMENT
        .captures(s)
        .or_else(|| COMPANY_COMMENT.captures(s))
    {
        return Stmt::comment(caps[1].trim());
    }

    if let Some(stmt) = parse_assignment(s) {
        return stmt;
    }

    parse_conditional(s)
        .or_else(|| parse_counted_loop(s))
        .or_else(|| parse_conditional_loop(s))
        .or_else(|| parse_print(s))
        .or_else(|| parse_delay(s))
        .unwrap_or(Stmt::Unrecognized)
}

fn parse_assignment(s: &str) -> Option<Stmt> {
    let caps = ASSIGNMENT.captures(s).or_else(|| {
        if s.contains(['{', '}']) {
            None
        } else {
            KEYWORD_ASSIGNMENT.captures(s)
        }
    })?;
    Some(Stmt::assignment(
        strip_private_marker(&caps[1]),
        strip_semicolon(&caps[2]),
    ))
}

fn parse_conditional(s: &str) -> Option<Stmt> {
    let head = IF_HEAD.captures(s)?;
    let condition = head[1].trim();
    let block_start = head.get(0)?.end() - 1;
    let (body, rest) = take_block(&s[block_start..])?;

    let (else_body, rest) = match ELSE_HEAD.find(rest) {
        Some(m) => {
            let (else_body, rest) = take_block(&rest[m.end() - 1..])?;
            (Some(else_body.trim().to_string()), rest)
        }
        None => (None, rest),
    };

    if !is_statement_end(rest) {
        return None;
    }

    Some(Stmt::Conditional {
        condition: condition.to_string(),
        body: body.trim().to_string(),
        else_body,
    })
}

fn parse_counted_loop(s: &str) -> Option<Stmt> {
    let head = FOR_HEAD.captures(s)?;
    let start = head[2].parse().ok()?;
    let end = head[3].parse().ok()?;
    let block_start = head.get(0)?.end() - 1;
    let (body, rest) = take_block(&s[block_start..])?;
    if !is_statement_end(rest) {
        return None;
    }

    Some(Stmt::CountedLoop {
        var: strip_private_marker(&head[1]).to_string(),
        start,
        end,
        body: body.trim().to_string(),
    })
}

fn parse_conditional_loop(s: &str) -> Option<Stmt> {
    let head = WHILE_HEAD.find(s)?;
    let (condition, rest) = take_block(&s[head.end() - 1..])?;
    let condition = condition.trim();
    if condition.is_empty() {
        return None;
    }

    let body_head = DO_HEAD.find(rest)?;
    let (body, rest) = take_block(&rest[body_head.end() - 1..])?;
    if !is_statement_end(rest) {
        return None;
    }

    Some(Stmt::ConditionalLoop {
        condition: condition.to_string(),
        body: body.trim().to_string(),
    })
}

fn parse_print(s: &str) -> Option<Stmt> {
    let caps = HINT.captures(s)?;
    let payload = strip_semicolon(&caps[1]);

    let payload = match FORMAT_CALL.captures(payload) {
        Some(call) => parse_format_args(&call[1]),
        None => Payload::Text {
            text: payload.to_string(),
        },
    };
    Some(Stmt::Print { payload })
}

/// Split the inside of `format [...]` into the template and its first argument.
fn parse_format_args(inner: &str) -> Payload {
    let inner = inner.trim();

    let (template, rest) = match inner.strip_prefix('"') {
        Some(quoted) => match closing_quote(quoted) {
            Some(close) => (&quoted[..close], &quoted[close + 1..]),
            None => (quoted, ""),
        },
        None => match inner.split_once(',') {
            Some((template, rest)) => (template.trim(), rest),
            None => (inner, ""),
        },
    };

    let rest = rest.trim_start();
    let args = rest.strip_prefix(',').unwrap_or(rest);
    let argument = args
        .split(',')
        .next()
        .map(str::trim)
        .filter(|arg| !arg.is_empty())
        .map(String::from);

    Payload::Format {
        template: template.to_string(),
        argument,
    }
}

/// Index of the quote that closes a string body. `""` is an escaped quote.
fn closing_quote(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'"' {
            if bytes.get(i + 1) == Some(&b'"') {
                i += 2;
                continue;
            }
            return Some(i);
        }
        i += 1;
    }
    None
}

fn parse_delay(s: &str) -> Option<Stmt> {
    let caps = SLEEP.captures(s)?;
    let seconds: f64 = caps[1].parse().ok()?;
    Some(Stmt::Delay { seconds })
}

/// Split `text`, which starts at `{`, into the block contents and whatever
/// follows the matching `}`.
fn take_block(text: &str) -> Option<(&str, &str)> {
    let inner = text.strip_prefix('{')?;
    let mut depth = 1usize;
    for (i, ch) in inner.char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some((&inner[..i], &inner[i + 1..]));
                }
            }
            _ => {}
        }
    }
    None
}

fn is_statement_end(rest: &str) -> bool {
    matches!(rest.trim(), "" | ";")
}

fn strip_semicolon(s: &str) -> &str {
    s.trim_end().trim_end_matches(';').trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<&'static str> {
        read_sqf(source)
            .body
            .iter()
            .map(|s| s.stmt.kind_name())
            .collect()
    }

    #[test]
    fn test_split_respects_braces() {
        let stmts = split_statements("a = 1; if (a > 0) then { b = 2; c = 3; }; d = 4;");
        assert_eq!(
            stmts,
            vec![
                "a = 1;",
                "if (a > 0) then { b = 2; c = 3; };",
                "d = 4;",
            ]
        );
    }

    #[test]
    fn test_split_trailing_unterminated() {
        assert_eq!(split_statements("x = 1; hint \"bye\""), vec!["x = 1;", "hint \"bye\""]);
    }

    #[test]
    fn test_split_loose_lines() {
        let stmts = split_statements("// first\n// second\n_x = 1;");
        assert_eq!(stmts, vec!["// first", "// second", "_x = 1;"]);
    }

    #[test]
    fn test_split_peels_comment_before_block() {
        let stmts = split_statements("// guard\nif (a) then {\n  b = 1;\n};");
        assert_eq!(stmts[0], "// guard");
        assert!(stmts[1].starts_with("if (a) then {"));
        assert_eq!(stmts.len(), 2);
    }

    #[test]
    fn test_split_stray_closing_brace() {
        let stmts = split_statements("}; x = 1;");
        assert_eq!(stmts, vec!["};", "x = 1;"]);
    }

    #[test]
    fn test_split_unbalanced_open_brace_runs_to_end() {
        let stmts = split_statements("if (a) then { b = 1; c = 2;");
        assert_eq!(stmts.len(), 1);
    }

    #[test]
    fn test_comments() {
        assert_eq!(classify("// hello"), Stmt::comment("hello"));
        assert_eq!(classify("; company note"), Stmt::comment("company note"));
    }

    #[test]
    fn test_assignment_strips_private_marker() {
        assert_eq!(classify("_value = 5;"), Stmt::assignment("value", "5"));
        assert_eq!(classify("count = _a + 1;"), Stmt::assignment("count", "_a + 1"));
    }

    #[test]
    fn test_assignment_after_keyword() {
        assert_eq!(
            classify("VERIFY  xx2 = tos_mode1 ;"),
            Stmt::assignment("xx2", "tos_mode1")
        );
    }

    #[test]
    fn test_comparison_is_not_assignment() {
        assert_eq!(classify("_x == 3;"), Stmt::Unrecognized);
        assert!(matches!(
            classify("if (_x == 3) then { hint \"three\"; };"),
            Stmt::Conditional { .. }
        ));
    }

    #[test]
    fn test_assignment_inside_block_is_not_hoisted() {
        let stmt = classify("if (a > b) then { x = 1; };");
        assert_eq!(
            stmt,
            Stmt::Conditional {
                condition: "a > b".into(),
                body: "x = 1;".into(),
                else_body: None,
            }
        );
    }

    #[test]
    fn test_conditional_with_nested_parens() {
        let stmt = classify("if ((alive _u) && (_n > 2)) then { hint \"ok\"; };");
        let Stmt::Conditional { condition, .. } = stmt else {
            panic!("expected conditional");
        };
        assert_eq!(condition, "(alive _u) && (_n > 2)");
    }

    #[test]
    fn test_conditional_else() {
        let stmt = classify("if (a) then { x = 1; } else { x = 2; };");
        assert_eq!(
            stmt,
            Stmt::Conditional {
                condition: "a".into(),
                body: "x = 1;".into(),
                else_body: Some("x = 2;".into()),
            }
        );
    }

    #[test]
    fn test_nested_conditional_body_kept_whole() {
        let stmt = classify("if (a) then { if (b) then { x = 1; }; };");
        let Stmt::Conditional { condition, body, .. } = stmt else {
            panic!("expected conditional");
        };
        assert_eq!(condition, "a");
        assert_eq!(body, "if (b) then { x = 1; };");
    }

    #[test]
    fn test_trailing_junk_after_block_is_unrecognized() {
        assert_eq!(classify("if (a) then { x = 1; } junk;"), Stmt::Unrecognized);
    }

    #[test]
    fn test_counted_loop() {
        let stmt = classify("for \"_i\" from 0 to 3 do {\n    hint format [\"Index: %1\", _i];\n};");
        assert_eq!(
            stmt,
            Stmt::CountedLoop {
                var: "i".into(),
                start: 0,
                end: 3,
                body: "hint format [\"Index: %1\", _i];".into(),
            }
        );
    }

    #[test]
    fn test_counted_loop_negative_bounds() {
        let Stmt::CountedLoop { start, end, .. } = classify("for \"_k\" from -2 to 2 do { };")
        else {
            panic!("expected counted loop");
        };
        assert_eq!((start, end), (-2, 2));
    }

    #[test]
    fn test_conditional_loop() {
        assert_eq!(
            classify("while {_n < 10} do { _n = _n + 1; };"),
            Stmt::ConditionalLoop {
                condition: "_n < 10".into(),
                body: "_n = _n + 1;".into(),
            }
        );
    }

    #[test]
    fn test_print_plain() {
        assert_eq!(
            classify("hint \"Value is high\";"),
            Stmt::Print {
                payload: Payload::Text {
                    text: "\"Value is high\"".into()
                }
            }
        );
    }

    #[test]
    fn test_print_format_keeps_first_argument() {
        assert_eq!(
            classify("hint format [\"%1 of %2\", _i, _n];"),
            Stmt::Print {
                payload: Payload::Format {
                    template: "%1 of %2".into(),
                    argument: Some("_i".into()),
                }
            }
        );
    }

    #[test]
    fn test_print_format_template_with_comma() {
        let Stmt::Print {
            payload: Payload::Format { template, argument },
        } = classify("hint format [\"a, b: %1\", _x];")
        else {
            panic!("expected format payload");
        };
        assert_eq!(template, "a, b: %1");
        assert_eq!(argument.as_deref(), Some("_x"));
    }

    #[test]
    fn test_print_format_template_with_escaped_quotes() {
        assert_eq!(
            classify("hint format [\"He said \"\"hi\"\" at %1\", _x];"),
            Stmt::Print {
                payload: Payload::Format {
                    template: "He said \"\"hi\"\" at %1".into(),
                    argument: Some("_x".into()),
                }
            }
        );
    }

    #[test]
    fn test_print_format_without_arguments() {
        assert_eq!(
            classify("hint format [\"static\"];"),
            Stmt::Print {
                payload: Payload::Format {
                    template: "static".into(),
                    argument: None,
                }
            }
        );
    }

    #[test]
    fn test_delay() {
        assert_eq!(classify("sleep 1;"), Stmt::Delay { seconds: 1.0 });
        assert_eq!(classify("sleep 0.25;"), Stmt::Delay { seconds: 0.25 });
    }

    #[test]
    fn test_malformed_delay_is_unrecognized() {
        assert_eq!(classify("sleep 1.2.3;"), Stmt::Unrecognized);
    }

    #[test]
    fn test_unrecognized() {
        assert_eq!(classify("player setDamage 1;"), Stmt::Unrecognized);
    }

    #[test]
    fn test_every_statement_gets_one_record() {
        let source = "// c\n_a = 1;\nfoo bar;\nsleep 2;\nhint \"x\";";
        assert_eq!(
            kinds(source),
            vec!["comment", "assignment", "unrecognized", "delay", "print"]
        );
    }

    #[test]
    fn test_record_keeps_source_text() {
        let program = read_sqf("player setDamage 1;");
        assert_eq!(program.body[0].source, "player setDamage 1;");
    }
}
