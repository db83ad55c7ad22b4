// strans-core/tests/config_integration_tests.rs
use anyhow::Result;
use std::io::Write;
use tempfile::NamedTempFile;

use strans_core::{StransError, TransformEngine, TransformScript};

#[test]
fn test_load_from_file() -> Result<()> {
    let yaml_content = r#"
expressions:
  - 's/(\w+)@example\.com/\1@example.org/g'
  - "y/A-Z/a-z/"
  - ""
"#;
    let mut file = NamedTempFile::new()?;
    file.write_all(yaml_content.as_bytes())?;

    let script = TransformScript::load_from_file(file.path())?;
    assert_eq!(script.expressions.len(), 3);

    let pipeline = script.compile()?;
    assert_eq!(pipeline.len(), 2);
    assert_eq!(pipeline.apply("Mail BOB@example.com"), "mail bob@example.org");
    Ok(())
}

#[test]
fn test_load_missing_file() {
    let result = TransformScript::load_from_file("/no/such/strans/script.yaml");
    assert!(matches!(result, Err(StransError::IoError(_))));
}

#[test]
fn test_load_malformed_yaml() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    file.write_all(b"expressions: [unclosed")?;
    assert!(matches!(
        TransformScript::load_from_file(file.path()),
        Err(StransError::ScriptFormat(_))
    ));
    Ok(())
}

#[test]
fn test_compile_error_names_expression() {
    let script = TransformScript::from(vec!["s/ok/ok/".to_string(), "s9a9b9".to_string()]);
    let err = script.compile().unwrap_err();
    assert_eq!(err.to_string(), "1: s9a9b9: invalid delimiter: s9a9b9");
}
