// inputguard-core/src/trace.rs
//! Provides the data structures for a stage-by-stage record of one pipeline run,
//! plus helpers for logging attacker-supplied content without leaking it.

use lazy_static::lazy_static;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::sanitizers::stages::Stage;

lazy_static! {
    /// Whether raw input snippets may appear in debug logs.
    static ref PII_DEBUG_ALLOWED: bool = {
        std::env::var("INPUTGUARD_ALLOW_DEBUG_PII")
            .map(|s| s.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    };
}

/// Why a guard replaced the string with the rejection sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum BlockReason {
    /// Length in UTF-16 code units exceeded the limit.
    Oversized { length: usize, limit: usize },
    /// The input looked like an XML document with a DOCTYPE.
    XmlDocument,
}

impl BlockReason {
    pub fn stage(&self) -> Stage {
        match self {
            BlockReason::Oversized { .. } => Stage::SizeGuard,
            BlockReason::XmlDocument => Stage::XmlGuard,
        }
    }
}

/// The output of one rewriting stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageStep {
    pub stage: Stage,
    pub output: String,
    pub changed: bool,
}

/// A full record of a string passing through the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PipelineTrace {
    /// Input length in UTF-16 code units.
    pub input_length: usize,
    /// One entry per executed rewriting stage; empty when a guard blocked the input.
    pub steps: Vec<StageStep>,
    #[serde(default)]
    pub blocked: Option<BlockReason>,
    pub output: String,
}

impl PipelineTrace {
    pub fn is_blocked(&self) -> bool {
        self.blocked.is_some()
    }

    /// Stages that actually rewrote their input.
    pub fn changed_stages(&self) -> impl Iterator<Item = Stage> + '_ {
        self.steps.iter().filter(|s| s.changed).map(|s| s.stage)
    }
}

pub fn redact_sensitive(s: &str) -> String {
    const MAX_LEN: usize = 8;
    if s.len() <= MAX_LEN {
        "[REDACTED]".to_string()
    } else {
        format!("[REDACTED: {} chars]", s.len())
    }
}

fn get_loggable_content(sensitive_content: &str) -> String {
    if *PII_DEBUG_ALLOWED {
        sensitive_content.to_string()
    } else {
        redact_sensitive(sensitive_content)
    }
}

pub fn log_stage_change_debug(module_path: &str, stage: Stage, before: &str, after: &str) {
    debug!(
        "{} Stage '{}' rewrote input: Before='{}', After='{}'",
        module_path,
        stage,
        get_loggable_content(before),
        get_loggable_content(after)
    );
}

pub fn log_block_debug(module_path: &str, reason: &BlockReason) {
    match reason {
        BlockReason::Oversized { length, limit } => debug!(
            "{} Blocked string of {} UTF-16 units (limit {}).",
            module_path, length, limit
        ),
        BlockReason::XmlDocument => {
            debug!("{} Blocked string matching the XML document guard.", module_path)
        }
    }
}
