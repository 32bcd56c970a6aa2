//! Output writers - emit statement records as source code.

pub mod tcl;

pub use tcl::{TCL_WRITER, TclWriter, TclWriterImpl, UNTRANSLATED_MARKER};
