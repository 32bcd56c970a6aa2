//! Traits for language readers and writers.

use crate::ir::Program;

/// A reader classifies source text into statement records.
///
/// Reading never fails: statements that match no known shape become
/// [`Stmt::Unrecognized`](crate::Stmt::Unrecognized).
pub trait Reader: Send + Sync {
    /// Language identifier (e.g., "sqf").
    fn language(&self) -> &'static str;

    /// File extensions this reader handles.
    fn extensions(&self) -> &'static [&'static str];

    /// Classify source text.
    fn read(&self, source: &str) -> Program;
}

/// A writer emits statement records as source code in a target language.
pub trait Writer: Send + Sync {
    /// Language identifier (e.g., "tcl").
    fn language(&self) -> &'static str;

    /// File extension for output (e.g., "tcl").
    fn extension(&self) -> &'static str;

    /// Emit the records as source code.
    fn write(&self, program: &Program) -> String;
}
