// inputguard-core/tests/config_integration_tests.rs
use anyhow::Result;
use std::io::Write;
use tempfile::NamedTempFile;

use inputguard_core::config::{self, SanitizerConfig};
use inputguard_core::{headless_sanitize_string, PipelineEngine, SanitizationEngine, SanitizerError};

#[test]
fn test_default_tables() {
    let config = SanitizerConfig::default();
    assert_eq!(config.max_string_length, config::MAX_STRING_LENGTH);
    assert_eq!(config.rejection_sentinel, "Request Blocked");
    assert!(config.dangerous_functions.iter().any(|f| f == "ls"));
    assert!(config.sql_keywords.iter().any(|k| k == "UNION"));
    assert_eq!(config.allowed_punctuation, "@._-,:<>[]{}|");
}

#[test]
fn test_load_from_file() -> Result<()> {
    let yaml_content = r#"
max_string_length: 32
rejection_sentinel: "Blocked"
dangerous_functions:
  - curl
  - wget
"#;
    let mut file = NamedTempFile::new()?;
    file.write_all(yaml_content.as_bytes())?;
    let config = SanitizerConfig::load_from_file(file.path())?;
    assert_eq!(config.max_string_length, 32);
    assert_eq!(config.rejection_sentinel, "Blocked");
    assert_eq!(config.dangerous_functions, vec!["curl", "wget"]);
    // Omitted tables fall back to the built-in ones.
    assert_eq!(config.sql_keywords.len(), config::SQL_KEYWORDS.len());
    assert_eq!(config.nosql_operators.len(), config::NOSQL_OPERATORS.len());
    Ok(())
}

#[test_log::test]
fn test_loaded_tables_drive_the_engine() -> Result<()> {
    let yaml_content = r#"
max_string_length: 16
dangerous_functions: [curl]
"#;
    let mut file = NamedTempFile::new()?;
    file.write_all(yaml_content.as_bytes())?;
    let config = SanitizerConfig::load_from_file(file.path())?;
    let engine = PipelineEngine::new(config)?;

    assert_eq!(engine.sanitize_str("curl ls"), "ls");
    assert_eq!(engine.sanitize_str(&"x".repeat(17)), "Request Blocked");
    Ok(())
}

#[test]
fn test_load_from_file_invalid_yaml() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    file.write_all(b"sql_keywords: [unclosed\n")?;
    let err = SanitizerConfig::load_from_file(file.path()).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to parse config file"));
    Ok(())
}

#[test_log::test]
fn test_load_from_file_rejects_invalid_tables() -> Result<()> {
    let yaml_content = r#"
sql_keywords: ["DROP", "drop"]
dangerous_functions: ["rm -rf"]
"#;
    let mut file = NamedTempFile::new()?;
    file.write_all(yaml_content.as_bytes())?;
    let err = SanitizerConfig::load_from_file(file.path()).unwrap_err();
    let message = format!("{:#}", err);
    assert!(message.contains("Duplicate token in `sql_keywords`"));
    assert!(message.contains("must consist of word characters only"));
    Ok(())
}

#[test]
fn test_load_from_missing_file() {
    let err = SanitizerConfig::load_from_file("/nonexistent/inputguard/tables.yaml").unwrap_err();
    assert!(err.to_string().contains("Failed to read config file"));
    match err.downcast_ref::<SanitizerError>() {
        Some(SanitizerError::Io(io)) => assert_eq!(io.kind(), std::io::ErrorKind::NotFound),
        other => panic!("expected an I/O error, got {:?}", other),
    }
}

#[test]
fn test_equal_tables_share_a_fingerprint_across_sources() -> Result<()> {
    let from_yaml = SanitizerConfig::from_yaml_str("{}")?;
    assert_eq!(from_yaml, SanitizerConfig::default());
    assert_eq!(from_yaml.fingerprint(), SanitizerConfig::default().fingerprint());
    Ok(())
}

#[test]
fn test_headless_string_uses_given_tables() -> Result<()> {
    let config = SanitizerConfig::from_yaml_str("allowed_punctuation: \"@\"\n")?;
    assert_eq!(headless_sanitize_string(config, "a.b-c@d")?, "abc@d");
    Ok(())
}
