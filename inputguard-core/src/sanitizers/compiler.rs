//! compiler.rs - Compiles a `SanitizerConfig` into a ready-to-run pipeline.
//!
//! Every regex the string pipeline needs is built once per table set and kept in
//! a process-wide cache keyed by the config fingerprint. After construction a
//! `CompiledPipeline` is immutable and shared by `Arc`, so engines built from the
//! same tables across threads reuse one compilation.
//!
//! License: MIT OR APACHE 2.0

use anyhow::Result;
use lazy_static::lazy_static;
use log::{debug, warn};
use regex::{Regex, RegexBuilder};
use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::config::{SanitizerConfig, SQL_COMMENT_MARKER};
use crate::errors::SanitizerError;
use crate::fold::fold_characters;
use crate::sanitizers::stages::{
    disallowed_characters_pattern, exceeds_length, literal_alternation, whole_word_pattern,
    Stage, CONTROL_CHARACTERS_PATTERN, EXTENDED_ASCII_PATTERN, HEADER_NEWLINES_PATTERN,
    PATH_TRAVERSAL_PATTERN, SHELL_METACHARACTERS_PATTERN, XML_DOCUMENT_PATTERN,
    XSS_TAGS_PATTERN,
};

/// Size limit for a single compiled regex.
const REGEX_SIZE_LIMIT: usize = 10 * (1 << 20);

/// The compiled form of a table set: one matcher per regex-driven stage.
#[derive(Debug)]
pub struct CompiledPipeline {
    /// Fingerprint of the `SanitizerConfig` this was compiled from.
    pub fingerprint: String,
    /// Size guard threshold, in UTF-16 code units.
    pub max_string_length: usize,
    /// Replacement for blocked string leaves.
    pub rejection_sentinel: String,
    xml_document: Regex,
    shell_metacharacters: Regex,
    control_characters: Regex,
    sql_keywords: Regex,
    nosql_operators: Option<Regex>,
    xss_tags: Regex,
    header_newlines: Regex,
    extended_ascii: Regex,
    disallowed_characters: Regex,
    path_traversal: Regex,
    dangerous_functions: Option<Regex>,
}

impl CompiledPipeline {
    /// Size pre-check.
    pub fn is_oversized(&self, input: &str) -> bool {
        exceeds_length(input, self.max_string_length)
    }

    /// XML/DOCTYPE structural pre-check.
    pub fn is_xml_document(&self, input: &str) -> bool {
        self.xml_document.is_match(input)
    }

    /// Runs exactly one rewriting stage over the whole input.
    ///
    /// Guards never rewrite; for them the input is returned unchanged. Use
    /// [`is_oversized`](Self::is_oversized) and [`is_xml_document`](Self::is_xml_document)
    /// to evaluate the guards.
    pub fn apply<'a>(&self, stage: Stage, input: &'a str) -> Cow<'a, str> {
        match stage {
            Stage::SizeGuard | Stage::XmlGuard => Cow::Borrowed(input),
            Stage::Fold => Cow::Owned(fold_characters(input)),
            Stage::ShellMetacharacters => self.shell_metacharacters.replace_all(input, ""),
            Stage::ControlCharacters => self.control_characters.replace_all(input, ""),
            Stage::SqlKeywords => self.sql_keywords.replace_all(input, ""),
            Stage::NoSqlOperators => remove_optional(self.nosql_operators.as_ref(), input),
            Stage::XssTags => self.xss_tags.replace_all(input, ""),
            Stage::HeaderNewlines => self.header_newlines.replace_all(input, ""),
            Stage::ExtendedAscii => self.extended_ascii.replace_all(input, ""),
            Stage::AllowList => self.disallowed_characters.replace_all(input, ""),
            Stage::PathTraversal => self.path_traversal.replace_all(input, ""),
            Stage::DangerousFunctions => remove_optional(self.dangerous_functions.as_ref(), input),
            Stage::Trim => Cow::Borrowed(input.trim()),
        }
    }
}

fn remove_optional<'a>(regex: Option<&Regex>, input: &'a str) -> Cow<'a, str> {
    match regex {
        Some(re) => re.replace_all(input, ""),
        None => Cow::Borrowed(input),
    }
}

lazy_static! {
    /// A thread-safe, global cache for compiled pipelines, keyed by config fingerprint.
    static ref COMPILED_PIPELINE_CACHE: RwLock<HashMap<String, Arc<CompiledPipeline>>> =
        RwLock::new(HashMap::new());
}

/// Compiles `config` into a `CompiledPipeline`.
///
/// The config is validated first; every failing stage is reported in a single error.
pub fn compile_pipeline(config: &SanitizerConfig) -> Result<CompiledPipeline, SanitizerError> {
    config
        .validate()
        .map_err(|e| SanitizerError::InvalidConfig(e.to_string()))?;

    debug!("Starting compilation of sanitizer pipeline.");
    let mut errors: Vec<SanitizerError> = Vec::new();

    let sql_pattern = if config.sql_keywords.is_empty() {
        regex::escape(SQL_COMMENT_MARKER)
    } else {
        format!(
            "{}|{}",
            whole_word_pattern(&config.sql_keywords),
            regex::escape(SQL_COMMENT_MARKER)
        )
    };
    let nosql_pattern = (!config.nosql_operators.is_empty())
        .then(|| literal_alternation(&config.nosql_operators));
    let dangerous_pattern = (!config.dangerous_functions.is_empty())
        .then(|| whole_word_pattern(&config.dangerous_functions));
    let disallowed_pattern = disallowed_characters_pattern(&config.allowed_punctuation);

    let xml_document = build(Stage::XmlGuard, XML_DOCUMENT_PATTERN, false, &mut errors);
    let shell_metacharacters =
        build(Stage::ShellMetacharacters, SHELL_METACHARACTERS_PATTERN, false, &mut errors);
    let control_characters =
        build(Stage::ControlCharacters, CONTROL_CHARACTERS_PATTERN, false, &mut errors);
    let sql_keywords = build(Stage::SqlKeywords, &sql_pattern, true, &mut errors);
    let nosql_operators = nosql_pattern
        .map(|p| build(Stage::NoSqlOperators, &p, true, &mut errors));
    let xss_tags = build(Stage::XssTags, XSS_TAGS_PATTERN, true, &mut errors);
    let header_newlines = build(Stage::HeaderNewlines, HEADER_NEWLINES_PATTERN, false, &mut errors);
    let extended_ascii = build(Stage::ExtendedAscii, EXTENDED_ASCII_PATTERN, false, &mut errors);
    let disallowed_characters = build(Stage::AllowList, &disallowed_pattern, false, &mut errors);
    let path_traversal = build(Stage::PathTraversal, PATH_TRAVERSAL_PATTERN, false, &mut errors);
    let dangerous_functions = dangerous_pattern
        .map(|p| build(Stage::DangerousFunctions, &p, true, &mut errors));

    if config.nosql_operators.is_empty() {
        warn!("NoSQL operator list is empty; that stage will pass input through.");
    }
    if config.dangerous_functions.is_empty() {
        warn!("Dangerous-function list is empty; that stage will pass input through.");
    }

    if !errors.is_empty() {
        let error_message = errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<String>>()
            .join("\n");
        return Err(SanitizerError::Fatal(format!(
            "Failed to compile {} stage(s):\n{}",
            errors.len(),
            error_message
        )));
    }

    // Every `build` above succeeded, so each slot is populated.
    let missing = || SanitizerError::Fatal("pipeline stage missing after compilation".to_string());
    let pipeline = CompiledPipeline {
        fingerprint: config.fingerprint(),
        max_string_length: config.max_string_length,
        rejection_sentinel: config.rejection_sentinel.clone(),
        xml_document: xml_document.ok_or_else(missing)?,
        shell_metacharacters: shell_metacharacters.ok_or_else(missing)?,
        control_characters: control_characters.ok_or_else(missing)?,
        sql_keywords: sql_keywords.ok_or_else(missing)?,
        nosql_operators: nosql_operators.flatten(),
        xss_tags: xss_tags.ok_or_else(missing)?,
        header_newlines: header_newlines.ok_or_else(missing)?,
        extended_ascii: extended_ascii.ok_or_else(missing)?,
        disallowed_characters: disallowed_characters.ok_or_else(missing)?,
        path_traversal: path_traversal.ok_or_else(missing)?,
        dangerous_functions: dangerous_functions.flatten(),
    };

    debug!(
        "Finished compiling sanitizer pipeline {}.",
        &pipeline.fingerprint
    );
    Ok(pipeline)
}

fn build(
    stage: Stage,
    pattern: &str,
    case_insensitive: bool,
    errors: &mut Vec<SanitizerError>,
) -> Option<Regex> {
    debug!("Compiling stage '{}' with pattern '{:?}'", stage, pattern);
    match RegexBuilder::new(pattern)
        .case_insensitive(case_insensitive)
        .size_limit(REGEX_SIZE_LIMIT)
        .build()
    {
        Ok(regex) => {
            log::debug!(
                target: "inputguard_core::sanitizer",
                "Stage '{}' compiled successfully.",
                stage
            );
            Some(regex)
        }
        Err(e) => {
            errors.push(SanitizerError::PatternCompilation(stage.name().to_string(), e));
            None
        }
    }
}

/// Gets a `CompiledPipeline` from the cache or compiles it if not found.
pub fn get_or_compile_pipeline(config: &SanitizerConfig) -> Result<Arc<CompiledPipeline>> {
    let cache_key = config.fingerprint();

    {
        let cache = COMPILED_PIPELINE_CACHE
            .read()
            .map_err(|_| SanitizerError::Fatal("compiled pipeline cache poisoned".to_string()))?;
        if let Some(pipeline) = cache.get(&cache_key) {
            debug!("Serving compiled pipeline from cache for key: {}", &cache_key);
            return Ok(Arc::clone(pipeline));
        }
    }

    debug!("Compiled pipeline not found in cache. Compiling now.");
    let compiled = Arc::new(compile_pipeline(config)?);

    COMPILED_PIPELINE_CACHE
        .write()
        .map_err(|_| SanitizerError::Fatal("compiled pipeline cache poisoned".to_string()))?
        .insert(cache_key.clone(), Arc::clone(&compiled));

    debug!("Successfully compiled and cached pipeline for key: {}", &cache_key);
    Ok(compiled)
}
