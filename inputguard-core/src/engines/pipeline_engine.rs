// inputguard-core/src/engines/pipeline_engine.rs
//! A `SanitizationEngine` implementation that runs the compiled stage pipeline
//! over every string leaf.
//! License: MIT OR APACHE 2.0

use std::borrow::Cow;
use std::sync::Arc;

use anyhow::{Context, Result};
use log::debug;

use crate::config::SanitizerConfig;
use crate::engine::SanitizationEngine;
use crate::sanitizers::compiler::{get_or_compile_pipeline, CompiledPipeline};
use crate::sanitizers::stages::Stage;
use crate::trace::{log_block_debug, log_stage_change_debug, BlockReason, PipelineTrace, StageStep};

#[derive(Debug, Clone)]
pub struct PipelineEngine {
    pipeline: Arc<CompiledPipeline>,
    config: SanitizerConfig,
}

impl PipelineEngine {
    pub fn new(config: SanitizerConfig) -> Result<Self> {
        let pipeline = get_or_compile_pipeline(&config)
            .context("Failed to compile sanitizer tables for PipelineEngine")?;
        debug!("PipelineEngine ready with tables {}.", pipeline.fingerprint);
        Ok(Self { pipeline, config })
    }

    /// Engine over the built-in table set.
    pub fn with_defaults() -> Result<Self> {
        Self::new(SanitizerConfig::default())
    }
}

/// Evaluates both guards, then every rewriting stage in order.
///
/// `observe` sees each rewriting stage's output and whether it differs from the
/// stage's input. Returns the block reason instead of an output when a guard fires.
fn run_stages<F>(pipeline: &CompiledPipeline, input: &str, mut observe: F) -> Result<String, BlockReason>
where
    F: FnMut(Stage, &str, bool),
{
    if pipeline.is_oversized(input) {
        let reason = BlockReason::Oversized {
            length: input.encode_utf16().count(),
            limit: pipeline.max_string_length,
        };
        log_block_debug(module_path!(), &reason);
        return Err(reason);
    }
    if pipeline.is_xml_document(input) {
        let reason = BlockReason::XmlDocument;
        log_block_debug(module_path!(), &reason);
        return Err(reason);
    }

    let mut current: Cow<str> = Cow::Borrowed(input);
    for stage in Stage::TRANSFORMS {
        // Regex replacement borrows when nothing matched; trim borrows a shorter slice.
        let rewritten = match pipeline.apply(stage, &current) {
            Cow::Owned(s) => Some(s),
            Cow::Borrowed(s) if s.len() != current.len() => Some(s.to_string()),
            Cow::Borrowed(_) => None,
        };
        let changed = match rewritten {
            Some(next) if next != *current => {
                log_stage_change_debug(module_path!(), stage, &current, &next);
                current = Cow::Owned(next);
                true
            }
            _ => false,
        };
        observe(stage, &current, changed);
    }
    Ok(current.into_owned())
}

impl SanitizationEngine for PipelineEngine {
    fn sanitize_str(&self, input: &str) -> String {
        run_stages(&self.pipeline, input, |_, _, _| {})
            .unwrap_or_else(|_| self.pipeline.rejection_sentinel.clone())
    }

    fn trace_str(&self, input: &str) -> PipelineTrace {
        let mut steps = Vec::with_capacity(Stage::TRANSFORMS.len());
        let outcome = run_stages(&self.pipeline, input, |stage, output, changed| {
            steps.push(StageStep {
                stage,
                output: output.to_string(),
                changed,
            })
        });
        let input_length = input.encode_utf16().count();
        match outcome {
            Ok(output) => PipelineTrace {
                input_length,
                steps,
                blocked: None,
                output,
            },
            Err(reason) => PipelineTrace {
                input_length,
                steps,
                blocked: Some(reason),
                output: self.pipeline.rejection_sentinel.clone(),
            },
        }
    }

    fn compiled_pipeline(&self) -> &CompiledPipeline {
        &self.pipeline
    }

    fn get_config(&self) -> &SanitizerConfig {
        &self.config
    }
}
