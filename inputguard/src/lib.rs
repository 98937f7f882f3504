// inputguard/src/lib.rs
//! # InputGuard CLI Application
//!
//! This crate provides the command-line interface for the `inputguard-core`
//! sanitization engine: sanitizing JSON documents, request containers and raw
//! text, tracing a single string through every pipeline stage, and printing the
//! active table set.

pub mod cli;
pub mod commands;
pub mod errors;
pub mod logger;
pub mod ui;
