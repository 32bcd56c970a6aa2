use sqftcl_rules_config::{RulesConfig, RulesConfigError};
use std::io::Write;
use tempfile::TempDir;

#[test]
fn load_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rules.yaml");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(
        file,
        r#"
header:
  - match: TOS_COM
    text: "0.2 TOS_COM"
"#
    )
    .unwrap();

    let config = RulesConfig::load(&path).unwrap();
    let header = config.header.unwrap();
    assert_eq!(header.len(), 1);
    assert_eq!(header[0].text.as_deref(), Some("0.2 TOS_COM"));
}

#[test]
fn missing_file_is_read_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.yaml");
    let err = RulesConfig::load(&path).unwrap_err();
    assert!(matches!(err, RulesConfigError::Read { .. }));
    assert!(err.to_string().contains("absent.yaml"));
}

#[test]
fn unparsable_file_is_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.yaml");
    std::fs::write(&path, "header: {match: [").unwrap();
    let err = RulesConfig::load(&path).unwrap_err();
    assert!(matches!(err, RulesConfigError::Parse { .. }));
}
