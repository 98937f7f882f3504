// inputguard-core/src/engine.rs
//! Defines the core SanitizationEngine trait.
//!
//! The `SanitizationEngine` trait decouples callers (the request helper, the
//! headless wrappers, the CLI) from how the string pipeline is executed. Only
//! the string-level methods are required; the recursive walk over composite
//! values is provided so every engine shares the same shape-preserving policy.
//!
//! License: MIT OR APACHE 2.0

use crate::config::SanitizerConfig;
use crate::sanitizers::compiler::CompiledPipeline;
use crate::trace::PipelineTrace;
use crate::value::Value;

/// A trait that defines the core functionality of a sanitization engine.
pub trait SanitizationEngine: Send + Sync {
    /// Runs a single string through the pipeline.
    ///
    /// Never fails: the result is either the cleansed string or the rejection
    /// sentinel.
    fn sanitize_str(&self, input: &str) -> String;

    /// Runs a single string through the pipeline, recording every stage.
    fn trace_str(&self, input: &str) -> PipelineTrace;

    /// Returns the compiled pipeline used by the engine.
    fn compiled_pipeline(&self) -> &CompiledPipeline;

    /// Returns a reference to the engine's table configuration.
    fn get_config(&self) -> &SanitizerConfig;

    /// Sanitizes an arbitrary value.
    ///
    /// Strings go through [`sanitize_str`](Self::sanitize_str). Sequences and
    /// mappings are rebuilt with every element sanitized; mapping keys are kept
    /// verbatim. Everything else is returned as is.
    fn sanitize(&self, value: Value) -> Value {
        match value {
            Value::String(s) => Value::String(self.sanitize_str(&s)),
            Value::Sequence(items) => {
                Value::Sequence(items.into_iter().map(|v| self.sanitize(v)).collect())
            }
            Value::Mapping(map) => Value::Mapping(map.map_values(|v| self.sanitize(v))),
            other @ (Value::Null | Value::Bool(_) | Value::Number(_) | Value::Opaque) => other,
        }
    }
}
