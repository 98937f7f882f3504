//! Configuration management for `inputguard-core`.
//!
//! This module defines the table set the string pipeline is compiled from: the
//! size threshold, the rejection sentinel, the SQL/NoSQL/dangerous-function token
//! lists and the allow-listed punctuation. `SanitizerConfig::default()` is the
//! authoritative table set; a YAML file can pin a different set for a deployment
//! or a test suite, with any omitted field falling back to the defaults.
//!
//! Known policy gap: the allow-list admits `<` and `>`. The shell-metacharacter
//! stage runs earlier and removes them, so they do not survive in practice, but
//! the allow-list alone does not block HTML markup.
//!
//! License: MIT OR Apache-2.0

use anyhow::{anyhow, Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::path::Path;

use crate::errors::SanitizerError;

/// Strings longer than this (in UTF-16 code units) are rejected outright.
pub const MAX_STRING_LENGTH: usize = 10_000;

/// Replacement for a string leaf that fails the size or XML guard.
pub const REJECTION_SENTINEL: &str = "Request Blocked";

/// Maximum allowed length for a single blocklist token.
pub const MAX_TOKEN_LENGTH: usize = 64;

/// SQL keywords removed as whole words, case-insensitively.
pub const SQL_KEYWORDS: &[&str] = &[
    "SELECT", "INSERT", "UPDATE", "DELETE", "DROP", "UNION", "TABLE", "OR", "AND",
];

/// The SQL line-comment marker, removed wherever it appears.
pub const SQL_COMMENT_MARKER: &str = "--";

/// NoSQL query operators removed as literal tokens, case-insensitively.
pub const NOSQL_OPERATORS: &[&str] = &["$where", "$gt", "$lt", "$or"];

/// Function and command names removed as whole words, case-insensitively.
pub const DANGEROUS_FUNCTIONS: &[&str] = &[
    "eval", "exec", "system", "spawn", "whoami", "etcpasswd", "cat", "touch", "shutdown",
    "uname", "ls",
];

/// Punctuation that survives the allow-list, on top of ASCII letters, digits and whitespace.
pub const ALLOWED_PUNCTUATION: &str = "@._-,:<>[]{}|";

/// The table set a pipeline is compiled from.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SanitizerConfig {
    /// Size guard threshold, in UTF-16 code units.
    pub max_string_length: usize,
    /// Value substituted for blocked string leaves.
    pub rejection_sentinel: String,
    /// Whole-word SQL keywords.
    pub sql_keywords: Vec<String>,
    /// Literal NoSQL operator tokens.
    pub nosql_operators: Vec<String>,
    /// Whole-word function/command blocklist.
    pub dangerous_functions: Vec<String>,
    /// Extra characters kept by the allow-list filter.
    pub allowed_punctuation: String,
}

impl Default for SanitizerConfig {
    fn default() -> Self {
        Self {
            max_string_length: MAX_STRING_LENGTH,
            rejection_sentinel: REJECTION_SENTINEL.to_string(),
            sql_keywords: to_owned_list(SQL_KEYWORDS),
            nosql_operators: to_owned_list(NOSQL_OPERATORS),
            dangerous_functions: to_owned_list(DANGEROUS_FUNCTIONS),
            allowed_punctuation: ALLOWED_PUNCTUATION.to_string(),
        }
    }
}

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl SanitizerConfig {
    /// Loads a table set from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading sanitizer tables from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .map_err(SanitizerError::from)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_yaml_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        info!(
            "Loaded tables from {} ({} SQL keywords, {} NoSQL operators, {} dangerous functions).",
            path.display(),
            config.sql_keywords.len(),
            config.nosql_operators.len(),
            config.dangerous_functions.len()
        );
        Ok(config)
    }

    /// Parses and validates a table set from a YAML string.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let config: SanitizerConfig =
            serde_yml::from_str(text).context("Failed to parse sanitizer tables")?;
        config.validate()?;
        debug!("Parsed sanitizer tables with fingerprint {}.", config.fingerprint());
        Ok(config)
    }

    /// Checks table integrity, reporting every problem at once.
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();

        if self.max_string_length == 0 {
            errors.push("`max_string_length` must be greater than 0.".to_string());
        }
        if self.rejection_sentinel.is_empty() {
            errors.push("`rejection_sentinel` cannot be empty.".to_string());
        }

        validate_token_list("sql_keywords", &self.sql_keywords, true, &mut errors);
        validate_token_list("nosql_operators", &self.nosql_operators, false, &mut errors);
        validate_token_list("dangerous_functions", &self.dangerous_functions, true, &mut errors);

        if self
            .allowed_punctuation
            .chars()
            .any(|c| c.is_ascii_alphanumeric() || c.is_whitespace() || !c.is_ascii())
        {
            errors.push(
                "`allowed_punctuation` may only contain ASCII punctuation characters.".to_string(),
            );
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(anyhow!("Sanitizer table validation failed:\n{}", errors.join("\n")))
        }
    }

    /// Hex SHA-256 of the canonical JSON form. Equal tables have equal fingerprints.
    pub fn fingerprint(&self) -> String {
        // Serializing a struct of strings and integers cannot fail.
        let canonical = serde_json::to_vec(self).unwrap_or_default();
        let mut hasher = Sha256::new();
        hasher.update(&canonical);
        hex::encode(hasher.finalize())
    }
}

fn validate_token_list(field: &str, tokens: &[String], whole_word: bool, errors: &mut Vec<String>) {
    let mut seen = HashSet::new();
    for token in tokens {
        if token.is_empty() {
            errors.push(format!("`{}` contains an empty token.", field));
            continue;
        }
        if !seen.insert(token.to_lowercase()) {
            errors.push(format!("Duplicate token in `{}`: '{}'.", field, token));
        }
        if token.len() > MAX_TOKEN_LENGTH {
            errors.push(format!(
                "`{}`: {}",
                field,
                SanitizerError::TokenLengthExceeded(token.clone(), token.len(), MAX_TOKEN_LENGTH)
            ));
        }
        if whole_word && !token.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            errors.push(format!(
                "Token '{}' in `{}` must consist of word characters only.",
                token, field
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tables_are_valid() {
        assert!(SanitizerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_falls_back_to_defaults() {
        let config = SanitizerConfig::from_yaml_str("max_string_length: 64\n").unwrap();
        assert_eq!(config.max_string_length, 64);
        assert_eq!(config.rejection_sentinel, REJECTION_SENTINEL);
        assert_eq!(config.sql_keywords.len(), SQL_KEYWORDS.len());
    }

    #[test]
    fn test_validation_reports_all_problems() {
        let config = SanitizerConfig {
            max_string_length: 0,
            sql_keywords: vec!["DROP".into(), "drop".into(), "".into()],
            dangerous_functions: vec!["rm -rf".into()],
            ..SanitizerConfig::default()
        };
        let message = config.validate().unwrap_err().to_string();
        assert!(message.contains("max_string_length"));
        assert!(message.contains("Duplicate token"));
        assert!(message.contains("empty token"));
        assert!(message.contains("word characters only"));
    }

    #[test]
    fn test_overlong_token_is_rejected() {
        let config = SanitizerConfig {
            nosql_operators: vec!["$".repeat(MAX_TOKEN_LENGTH + 1)],
            ..SanitizerConfig::default()
        };
        let message = config.validate().unwrap_err().to_string();
        assert!(message.contains("exceeds maximum allowed (64)"));
    }

    #[test]
    fn test_fingerprint_tracks_table_contents() {
        let default = SanitizerConfig::default();
        let mut changed = SanitizerConfig::default();
        changed.dangerous_functions.push("curl".to_string());
        assert_eq!(default.fingerprint(), SanitizerConfig::default().fingerprint());
        assert_ne!(default.fingerprint(), changed.fingerprint());
    }
}
