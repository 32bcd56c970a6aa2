//! Registry of built-in readers and writers.

use crate::traits::{Reader, Writer};

static READERS: &[&dyn Reader] = &[&crate::input::sqf::SQF_READER];

static WRITERS: &[&dyn Writer] = &[&crate::output::tcl::TCL_WRITER];

/// Get a reader by language name.
pub fn reader_for_language(lang: &str) -> Option<&'static dyn Reader> {
    READERS.iter().find(|r| r.language() == lang).copied()
}

/// Get a reader by file extension.
pub fn reader_for_extension(ext: &str) -> Option<&'static dyn Reader> {
    READERS
        .iter()
        .find(|r| r.extensions().iter().any(|e| e.eq_ignore_ascii_case(ext)))
        .copied()
}

/// Get a writer by language name.
pub fn writer_for_language(lang: &str) -> Option<&'static dyn Writer> {
    WRITERS.iter().find(|w| w.language() == lang).copied()
}

/// All built-in readers.
pub fn readers() -> &'static [&'static dyn Reader] {
    READERS
}

/// All built-in writers.
pub fn writers() -> &'static [&'static dyn Writer] {
    WRITERS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reader_lookup() {
        let reader = reader_for_language("sqf").expect("sqf reader");
        assert_eq!(reader.language(), "sqf");
        assert!(reader.extensions().contains(&"sqf"));

        let reader = reader_for_extension("SQF").expect("sqf extension");
        assert_eq!(reader.language(), "sqf");
        assert!(reader_for_extension("lua").is_none());
    }

    #[test]
    fn test_writer_lookup() {
        let writer = writer_for_language("tcl").expect("tcl writer");
        assert_eq!(writer.language(), "tcl");
        assert_eq!(writer.extension(), "tcl");
    }

    #[test]
    fn test_roundtrip_via_registry() {
        let reader = reader_for_language("sqf").unwrap();
        let writer = writer_for_language("tcl").unwrap();

        let ir = reader.read("_x = 1 + 2;");
        let tcl = writer.write(&ir);

        assert_eq!(tcl, "set x 1 + 2");
    }

    #[test]
    fn test_listing() {
        assert_eq!(readers().len(), 1);
        assert_eq!(writers().len(), 1);
    }
}
