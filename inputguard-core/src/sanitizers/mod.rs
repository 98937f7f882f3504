//! The string pipeline: stage definitions and the compiler that turns a
//! `SanitizerConfig` into a cached, immutable set of regexes.
//!
//! `stages` owns the stage order and the fixed patterns; `compiler` owns the
//! table-dependent patterns and the process-wide compile cache.

pub mod compiler;
pub mod stages;
