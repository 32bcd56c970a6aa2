//! Classified statement records.
//!
//! The reader turns each top-level SQF statement into one [`Statement`]: the
//! original text plus a [`Stmt`] describing which shape matched. Block bodies
//! stay as raw text; writers re-read them when they descend.

use serde::Serialize;

/// A sequence of classified statements, in source order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Program {
    pub body: Vec<Statement>,
}

impl Program {
    pub fn new(body: Vec<Statement>) -> Self {
        Self { body }
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }
}

/// One source statement and the shape it was classified as.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statement {
    /// The statement text as it appeared in the source (trimmed).
    pub source: String,
    #[serde(flatten)]
    pub stmt: Stmt,
}

impl Statement {
    pub fn new(source: impl Into<String>, stmt: Stmt) -> Self {
        Self {
            source: source.into(),
            stmt,
        }
    }
}

/// Statement shapes recognized by the SQF reader.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Stmt {
    /// `// text` or `; text`
    Comment { text: String },

    /// `name = value;` - `name` already has its private `_` marker stripped.
    Assignment { name: String, value: String },

    /// `if (condition) then { body } [else { else_body }];`
    Conditional {
        condition: String,
        body: String,
        else_body: Option<String>,
    },

    /// `for "var" from start to end do { body };` - `end` is inclusive.
    CountedLoop {
        var: String,
        start: i64,
        end: i64,
        body: String,
    },

    /// `while { condition } do { body };`
    ConditionalLoop { condition: String, body: String },

    /// `hint payload;`
    Print { payload: Payload },

    /// `sleep seconds;`
    Delay { seconds: f64 },

    /// Anything else. The original text lives in [`Statement::source`].
    Unrecognized,
}

impl Stmt {
    /// Short name of the shape, used in logs.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Stmt::Comment { .. } => "comment",
            Stmt::Assignment { .. } => "assignment",
            Stmt::Conditional { .. } => "conditional",
            Stmt::CountedLoop { .. } => "counted_loop",
            Stmt::ConditionalLoop { .. } => "conditional_loop",
            Stmt::Print { .. } => "print",
            Stmt::Delay { .. } => "delay",
            Stmt::Unrecognized => "unrecognized",
        }
    }

    pub fn comment(text: impl Into<String>) -> Self {
        Stmt::Comment { text: text.into() }
    }

    pub fn assignment(name: impl Into<String>, value: impl Into<String>) -> Self {
        Stmt::Assignment {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Argument of a `hint` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Payload {
    /// Any payload that is not a `format [...]` call, kept verbatim (quotes included).
    Text { text: String },

    /// `format ["template", arg, ...]` - only the first argument is kept.
    Format {
        template: String,
        argument: Option<String>,
    },
}
