// inputguard-core/src/engines/mod.rs
//! This module contains the sanitization engine implementations.
//!
//! Each engine is a separate file within this directory and implements the
//! `SanitizationEngine` trait.
//!
//! # License
//! MIT OR APACHE 2.0

pub mod pipeline_engine;
