//! Tcl writer.
//!
//! Emits one line (or one block) per statement record. Block bodies are
//! re-read from their raw text and emitted by a fresh writer, then indented
//! one level, so nesting depth is only limited by the source.

use crate::expr::{SIGIL, rewrite_expr, strip_private_marker};
use crate::input::read_sqf;
use crate::ir::{Payload, Program, Statement, Stmt};
use crate::traits::Writer;

/// Static instance of the Tcl writer for registry.
pub static TCL_WRITER: TclWriterImpl = TclWriterImpl;

/// Tcl writer implementing the Writer trait.
pub struct TclWriterImpl;

impl Writer for TclWriterImpl {
    fn language(&self) -> &'static str {
        "tcl"
    }

    fn extension(&self) -> &'static str {
        "tcl"
    }

    fn write(&self, program: &Program) -> String {
        TclWriter::emit(program)
    }
}

/// Marker prefixed to statements that could not be translated.
pub const UNTRANSLATED_MARKER: &str = "# TODO: Could not automatically translate: ";

const INDENT: &str = "    ";

/// Emits statement records as Tcl source.
pub struct TclWriter {
    lines: Vec<String>,
}

impl TclWriter {
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Emit a program to Tcl source. Lines are joined with `\n`, without a
    /// trailing newline.
    pub fn emit(program: &Program) -> String {
        let mut writer = Self::new();
        writer.write_program(program);
        writer.lines.join("\n")
    }

    fn write_program(&mut self, program: &Program) {
        for statement in &program.body {
            self.write_statement(statement);
        }
    }

    fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    fn write_statement(&mut self, statement: &Statement) {
        match &statement.stmt {
            Stmt::Comment { text } => {
                if text.is_empty() {
                    self.push("#");
                } else {
                    self.push(format!("# {text}"));
                }
            }

            Stmt::Assignment { name, value } => {
                self.push(format!("set {} {}", strip_private_marker(name), value));
            }

            Stmt::Conditional {
                condition,
                body,
                else_body,
            } => {
                self.push(format!("if {{{}}} {{", rewrite_expr(condition)));
                self.write_body(body);
                if let Some(else_body) = else_body {
                    self.push("} else {");
                    self.write_body(else_body);
                }
                self.push("}");
            }

            Stmt::CountedLoop {
                var,
                start,
                end,
                body,
            } => {
                self.push(format!(
                    "for {{set {var} {start}}} {{{SIGIL}{var} <= {end}}} {{incr {var}}} {{"
                ));
                self.write_body(body);
                self.push("}");
            }

            Stmt::ConditionalLoop { condition, body } => {
                self.push(format!("while {{{}}} {{", rewrite_expr(condition)));
                self.write_body(body);
                self.push("}");
            }

            Stmt::Print { payload } => self.write_print(payload),

            Stmt::Delay { seconds } => {
                self.push(format!("after {}", delay_millis(*seconds)));
            }

            Stmt::Unrecognized => {
                let mut lines = statement.source.lines();
                let first = lines.next().unwrap_or_default();
                self.push(format!("{UNTRANSLATED_MARKER}{first}"));
                for line in lines {
                    self.push(format!("# {line}"));
                }
            }
        }
    }

    fn write_print(&mut self, payload: &Payload) {
        match payload {
            Payload::Format { template, argument } => {
                let text = match argument {
                    Some(arg) => template.replace("%1", &rewrite_expr(arg)),
                    None => template.clone(),
                };
                self.push(format!("puts \"{text}\""));
            }
            Payload::Text { text } => self.push(format!("puts {text}")),
        }
    }

    /// Translate a raw block body and append it one level deeper.
    fn write_body(&mut self, body: &str) {
        let inner = Self::emit(&read_sqf(body));
        for line in inner.lines().filter(|l| !l.trim().is_empty()) {
            self.push(format!("{INDENT}{line}"));
        }
    }
}

impl Default for TclWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Whole milliseconds in `seconds`, truncated.
pub fn delay_millis(seconds: f64) -> i64 {
    (seconds * 1000.0) as i64
}
