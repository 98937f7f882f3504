// inputguard-core/src/lib.rs
//! # InputGuard Core Library
//!
//! `inputguard-core` is a pure, recursive input sanitization engine for untrusted
//! request data. It takes an arbitrary value (string, number, boolean, null,
//! sequence or nested mapping) and returns a cleansed value with the same shape,
//! in which every string leaf has been pushed through a fixed, ordered pipeline
//! of pattern-removal stages.
//!
//! The engine is a heuristic filter, not a parser. It does not understand SQL or
//! HTML; it removes character classes and tokens that commonly carry injection
//! payloads, and replaces oversized strings and XML documents with a rejection
//! sentinel.
//!
//! ## Modules
//!
//! * `value`: The `Value` model handed to the engine, with JSON conversions.
//! * `config`: The table set (`SanitizerConfig`) and its built-in defaults.
//! * `fold`: Accent and Cyrillic look-alike folding.
//! * `sanitizers`: Stage definitions and the compiler that builds the pipeline.
//! * `engine`: Defines the `SanitizationEngine` trait and the recursive walk.
//! * `engines`: Concrete implementations of the `SanitizationEngine` trait.
//! * `trace`: Stage-by-stage records of a pipeline run and log redaction helpers.
//! * `headless`: One-shot convenience wrappers.
//! * `request`: Sanitization of request body, query and path parameters.
//!
//! ## String pipeline
//!
//! | # | Stage | Effect |
//! |---|-------|--------|
//! | 1 | size guard | longer than 10,000 UTF-16 units → sentinel |
//! | 2 | XML guard | `<?xml ... <!DOCTYPE ...> ... </...>` → sentinel |
//! | 3 | fold | accented/Cyrillic letters → ASCII; `-` → `_` |
//! | 4 | shell metacharacters | remove runs of ``; & \| > < ` `` |
//! | 5 | control characters | remove C0, DEL and C1 |
//! | 6 | SQL keywords | remove whole-word keywords and `--` |
//! | 7 | NoSQL operators | remove `$where`, `$gt`, `$lt`, `$or` |
//! | 8 | XSS tags | remove `<script>` blocks and `<img onerror>` fragments |
//! | 9 | header newlines | remove CR/LF |
//! | 10 | extended ASCII | remove U+0080..U+00FF |
//! | 11 | allow-list | keep letters, digits, whitespace and `@._-,:<>[]{}\|` |
//! | 12 | path traversal | remove `..`, `//`, `\`, `./` |
//! | 13 | dangerous functions | remove whole-word `eval`, `exec`, `cat`, `ls`, ... |
//! | 14 | trim | trim surrounding whitespace |
//!
//! ## Usage Example
//!
//! ```rust
//! use inputguard_core::{sanitize, Mapping, Value};
//!
//! let mut user = Mapping::new();
//! user.insert("name", Value::from("<script>"));
//! user.insert("age", Value::from(42));
//!
//! let cleaned = sanitize(Value::Mapping(user));
//! let cleaned = cleaned.as_mapping().unwrap();
//! assert_eq!(cleaned.get("name").unwrap().as_str(), Some("script"));
//! assert_eq!(cleaned.get("age"), Some(&Value::from(42)));
//! ```
//!
//! ## Error Handling
//!
//! Sanitization is total: it never returns an error and never panics. Loading
//! and compiling custom tables returns `anyhow::Result`, with `SanitizerError`
//! describing the specific failure.
//!
//! ---
//! License: MIT OR APACHE 2.0

pub mod config;
pub mod engine;
pub mod engines;
pub mod errors;
pub mod fold;
pub mod headless;
pub mod request;
pub mod sanitizers;
pub mod trace;
pub mod value;

use once_cell::sync::Lazy;

/// Re-exports the table configuration and its built-in defaults.
pub use config::{
    SanitizerConfig, ALLOWED_PUNCTUATION, DANGEROUS_FUNCTIONS, MAX_STRING_LENGTH,
    MAX_TOKEN_LENGTH, NOSQL_OPERATORS, REJECTION_SENTINEL, SQL_COMMENT_MARKER, SQL_KEYWORDS,
};

/// Re-exports the custom error type for clear error reporting.
pub use errors::SanitizerError;

pub use engine::SanitizationEngine;
pub use engines::pipeline_engine::PipelineEngine;

pub use fold::{fold_characters, fold_table, FOLD_TABLE};

pub use headless::{headless_sanitize_json, headless_sanitize_string};

pub use request::{sanitize_request, RequestInput};

pub use sanitizers::compiler::{compile_pipeline, get_or_compile_pipeline, CompiledPipeline};
pub use sanitizers::stages::Stage;

pub use trace::{redact_sensitive, BlockReason, PipelineTrace, StageStep};

pub use value::{Mapping, Number, Value};

static DEFAULT_ENGINE: Lazy<PipelineEngine> = Lazy::new(|| {
    PipelineEngine::with_defaults().expect("built-in sanitizer tables must compile")
});

/// The process-wide engine over the built-in table set.
pub fn default_engine() -> &'static PipelineEngine {
    &DEFAULT_ENGINE
}

/// Sanitizes `value` with the built-in tables.
pub fn sanitize(value: Value) -> Value {
    default_engine().sanitize(value)
}

/// Runs one string through the built-in pipeline.
pub fn sanitize_str(input: &str) -> String {
    default_engine().sanitize_str(input)
}
