//! stages.rs - The ordered stages of the string pipeline.
//!
//! Order is load-bearing: later stages operate on the output of earlier ones and
//! several of them are only safe because an earlier stage already stripped the
//! confounding characters (e.g. shell metacharacters go before SQL keywords so
//! `;DROP` and `DROP;` reduce to the same intermediate form).
//!
//! License: MIT OR APACHE 2.0

use serde::{Deserialize, Serialize};
use std::fmt;

/// Matches a loose XML declaration + DOCTYPE + closing tag document shape. Case-sensitive.
pub const XML_DOCUMENT_PATTERN: &str = r"<\?xml[\s\S]*?<!DOCTYPE[\s\S]*?>[\s\S]*?</.*?>";

/// Runs of shell metacharacters; a run is removed as a single match.
pub const SHELL_METACHARACTERS_PATTERN: &str = r"[;&|><`]+";

/// C0 controls, DEL and the C1 control range.
pub const CONTROL_CHARACTERS_PATTERN: &str = r"[\x00-\x1F\x7F-\x9F]";

/// `<script>` blocks and `<img ... onerror=...>` fragments. Compiled case-insensitive.
pub const XSS_TAGS_PATTERN: &str = r"<script.*?>.*?</script>|<img.*?onerror=.*?>";

/// CRLF, lone CR or lone LF.
pub const HEADER_NEWLINES_PATTERN: &str = r"\r\n|\r|\n";

/// Anything left in the U+0080..=U+00FF range after folding.
pub const EXTENDED_ASCII_PATTERN: &str = r"[\x80-\xFF]";

/// `..`, `//`, a backslash, or `./`.
pub const PATH_TRAVERSAL_PATTERN: &str = r"\.\.|//|\\|\./";

/// One step of the string pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    SizeGuard,
    XmlGuard,
    Fold,
    ShellMetacharacters,
    ControlCharacters,
    SqlKeywords,
    #[serde(rename = "nosql_operators")]
    NoSqlOperators,
    XssTags,
    HeaderNewlines,
    ExtendedAscii,
    AllowList,
    PathTraversal,
    DangerousFunctions,
    Trim,
}

impl Stage {
    /// Every stage, in execution order.
    pub const ALL: [Stage; 14] = [
        Stage::SizeGuard,
        Stage::XmlGuard,
        Stage::Fold,
        Stage::ShellMetacharacters,
        Stage::ControlCharacters,
        Stage::SqlKeywords,
        Stage::NoSqlOperators,
        Stage::XssTags,
        Stage::HeaderNewlines,
        Stage::ExtendedAscii,
        Stage::AllowList,
        Stage::PathTraversal,
        Stage::DangerousFunctions,
        Stage::Trim,
    ];

    /// The two pre-checks that short-circuit to the rejection sentinel.
    pub const GUARDS: [Stage; 2] = [Stage::SizeGuard, Stage::XmlGuard];

    /// The rewriting stages, in execution order.
    pub const TRANSFORMS: [Stage; 12] = [
        Stage::Fold,
        Stage::ShellMetacharacters,
        Stage::ControlCharacters,
        Stage::SqlKeywords,
        Stage::NoSqlOperators,
        Stage::XssTags,
        Stage::HeaderNewlines,
        Stage::ExtendedAscii,
        Stage::AllowList,
        Stage::PathTraversal,
        Stage::DangerousFunctions,
        Stage::Trim,
    ];

    pub fn is_guard(&self) -> bool {
        matches!(self, Stage::SizeGuard | Stage::XmlGuard)
    }

    /// 1-based position in the pipeline.
    pub fn position(&self) -> usize {
        Stage::ALL
            .iter()
            .position(|s| s == self)
            .map_or(0, |i| i + 1)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Stage::SizeGuard => "size_guard",
            Stage::XmlGuard => "xml_guard",
            Stage::Fold => "fold",
            Stage::ShellMetacharacters => "shell_metacharacters",
            Stage::ControlCharacters => "control_characters",
            Stage::SqlKeywords => "sql_keywords",
            Stage::NoSqlOperators => "nosql_operators",
            Stage::XssTags => "xss_tags",
            Stage::HeaderNewlines => "header_newlines",
            Stage::ExtendedAscii => "extended_ascii",
            Stage::AllowList => "allow_list",
            Stage::PathTraversal => "path_traversal",
            Stage::DangerousFunctions => "dangerous_functions",
            Stage::Trim => "trim",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Stage::SizeGuard => "Reject strings longer than the size threshold",
            Stage::XmlGuard => "Reject XML documents carrying a DOCTYPE",
            Stage::Fold => "Transliterate accented/Cyrillic letters; '-' becomes '_'",
            Stage::ShellMetacharacters => "Remove runs of ; & | > < `",
            Stage::ControlCharacters => "Remove C0/C1 control characters",
            Stage::SqlKeywords => "Remove whole-word SQL keywords and '--'",
            Stage::NoSqlOperators => "Remove NoSQL query operators",
            Stage::XssTags => "Remove <script> blocks and <img onerror> fragments",
            Stage::HeaderNewlines => "Remove CR/LF sequences",
            Stage::ExtendedAscii => "Remove U+0080..U+00FF",
            Stage::AllowList => "Remove characters outside the allow-list",
            Stage::PathTraversal => "Remove '..', '//', '\\' and './'",
            Stage::DangerousFunctions => "Remove whole-word dangerous function names",
            Stage::Trim => "Trim surrounding whitespace",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Builds an alternation of literal tokens, e.g. `SELECT|INSERT`.
pub fn literal_alternation(tokens: &[String]) -> String {
    tokens
        .iter()
        .map(|t| regex::escape(t))
        .collect::<Vec<_>>()
        .join("|")
}

/// Whole-word alternation: `(?-u:\b)(?:a|b)(?-u:\b)`.
///
/// Boundaries are ASCII-only. Non-ASCII letters are not word characters here, so
/// `日DROP` still loses `DROP` before a later stage drops the `日`.
pub fn whole_word_pattern(words: &[String]) -> String {
    format!(r"(?-u:\b)(?:{})(?-u:\b)", literal_alternation(words))
}

/// Character class matching everything outside the allow-list.
pub fn disallowed_characters_pattern(allowed_punctuation: &str) -> String {
    let extra: String = allowed_punctuation
        .chars()
        .map(|c| regex::escape(&c.to_string()))
        .collect();
    format!(r"[^a-zA-Z0-9\s{}]", extra)
}

/// `true` when `input` is longer than `limit` UTF-16 code units.
pub fn exceeds_length(input: &str, limit: usize) -> bool {
    // UTF-16 never needs more units than UTF-8 needs bytes.
    if input.len() <= limit {
        return false;
    }
    input.encode_utf16().count() > limit
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_partition_covers_all() {
        let mut joined: Vec<Stage> = Stage::GUARDS.to_vec();
        joined.extend_from_slice(&Stage::TRANSFORMS);
        assert_eq!(joined, Stage::ALL.to_vec());
    }

    #[test]
    fn test_positions_are_one_based() {
        assert_eq!(Stage::SizeGuard.position(), 1);
        assert_eq!(Stage::Trim.position(), 14);
    }

    #[test]
    fn test_disallowed_pattern_escapes_class_metacharacters() {
        let pattern = disallowed_characters_pattern("-[]^");
        let re = regex::Regex::new(&pattern).unwrap();
        assert_eq!(re.replace_all("a-b[c]^d!e", ""), "a-b[c]^de");
    }

    #[test]
    fn test_exceeds_length_counts_utf16_units() {
        assert!(!exceeds_length("aaaa", 4));
        assert!(exceeds_length("aaaaa", 4));
        // Two-byte chars: 4 chars = 8 bytes but only 4 UTF-16 units.
        assert!(!exceeds_length("éééé", 4));
        // An astral char needs two UTF-16 units.
        assert!(exceeds_length("aaa😀", 4));
    }

    #[test]
    fn test_whole_word_pattern_escapes_tokens() {
        let words = vec!["a.b".to_string(), "cat".to_string()];
        assert_eq!(whole_word_pattern(&words), r"(?-u:\b)(?:a\.b|cat)(?-u:\b)");
    }
}
