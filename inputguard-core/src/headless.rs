// File: inputguard-core/src/headless.rs

//! `headless.rs`
//! Convenience wrappers for one-shot sanitization without holding an engine.
//!
//! The only fallible parts are parsing the JSON text and compiling a custom
//! table set; sanitization itself never fails.

use anyhow::{Context, Result};
use log::debug;

use crate::config::SanitizerConfig;
use crate::default_engine;
use crate::engine::SanitizationEngine;
use crate::engines::pipeline_engine::PipelineEngine;
use crate::errors::SanitizerError;
use crate::value::Value;

/// Parses `text` as JSON, sanitizes it with the built-in tables and serializes it
/// back to compact JSON. Object key order is preserved.
pub fn headless_sanitize_json(text: &str) -> Result<String> {
    let value: Value = serde_json::from_str(text)
        .map_err(SanitizerError::from)
        .context("Failed to parse JSON input")?;
    debug!("Headless JSON sanitize of a top-level {}.", value.kind());
    let sanitized = default_engine().sanitize(value);
    serde_json::to_string(&sanitized)
        .map_err(SanitizerError::from)
        .context("Failed to serialize sanitized JSON")
}

/// Runs `content` through the string pipeline compiled from `config`.
///
/// # Arguments
///
/// * `config` - The table set to compile (cached by fingerprint).
/// * `content` - The string to be sanitized, treated as a single leaf.
pub fn headless_sanitize_string(config: SanitizerConfig, content: &str) -> Result<String> {
    let engine = PipelineEngine::new(config)?;
    Ok(engine.sanitize_str(content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[test]
    fn test_headless_sanitize_json_nested() -> Result<()> {
        let input = r#"{"user":{"name":"<script>","role":"admin"},"tags":["<script>","ok"],"n":7,"flag":null}"#;
        let output = headless_sanitize_json(input)?;
        assert_eq!(
            output,
            r#"{"user":{"name":"script","role":"admin"},"tags":["script","ok"],"n":7,"flag":null}"#
        );
        Ok(())
    }

    #[test]
    fn test_headless_sanitize_json_keeps_big_integers() -> Result<()> {
        let output = headless_sanitize_json(r#"[123456789012345678901234567890, 1.5]"#)?;
        assert_eq!(output, "[123456789012345678901234567890,1.5]");
        Ok(())
    }

    #[test]
    fn test_headless_sanitize_json_keeps_number_literals() -> Result<()> {
        let output = headless_sanitize_json("[1e400, 0.10000000000000000000001, -2.50e3]")?;
        assert_eq!(output, "[1e400,0.10000000000000000000001,-2.50e3]");
        Ok(())
    }

    #[test]
    fn test_headless_sanitize_json_rejects_malformed_input() {
        let err = headless_sanitize_json("{not json").unwrap_err();
        assert!(err.to_string().contains("Failed to parse JSON input"));
        assert!(matches!(
            err.downcast_ref::<SanitizerError>(),
            Some(SanitizerError::Serialization(_))
        ));
    }

    #[test]
    fn test_headless_sanitize_string_with_custom_tables() -> Result<()> {
        let config = SanitizerConfig {
            dangerous_functions: vec!["curl".to_string()],
            ..SanitizerConfig::default()
        };
        assert_eq!(headless_sanitize_string(config, "curl evil.sh")?, "evil.sh");
        Ok(())
    }

    #[test]
    fn test_headless_sanitize_string_rejects_bad_tables() {
        let config = SanitizerConfig {
            max_string_length: 0,
            ..SanitizerConfig::default()
        };
        assert!(headless_sanitize_string(config, "anything").is_err());
    }
}
