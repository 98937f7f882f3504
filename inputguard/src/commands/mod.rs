// inputguard/src/commands/mod.rs
//! Subcommand implementations and the I/O helpers they share.

pub mod sanitize;
pub mod tables;
pub mod trace;

use anyhow::{Context, Result};
use inputguard_core::{PipelineEngine, SanitizerConfig};
use is_terminal::IsTerminal;
use log::{debug, info};
use std::fs;
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;

use crate::ui::output_format;

/// Helper for printing info messages to stderr.
pub fn info_msg(msg: impl AsRef<str>) {
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = output_format::print_info_message(&mut io::stderr(), msg.as_ref(), stderr_supports_color);
}

/// Helper for printing warning messages to stderr.
pub fn warn_msg(msg: impl AsRef<str>) {
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = output_format::print_warn_message(&mut io::stderr(), msg.as_ref(), stderr_supports_color);
}

/// Helper for printing error messages to stderr.
pub fn error_msg(msg: impl AsRef<str>) {
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = output_format::print_error_message(&mut io::stderr(), msg.as_ref(), stderr_supports_color);
}

/// Builds the engine from `--config`, or from the built-in tables.
pub fn load_engine(config_path: Option<&Path>) -> Result<PipelineEngine> {
    let config = match config_path {
        Some(path) => SanitizerConfig::load_from_file(path)
            .with_context(|| format!("Failed to load sanitizer tables from {}", path.display()))?,
        None => {
            debug!("No --config given; using built-in sanitizer tables.");
            SanitizerConfig::default()
        }
    };
    PipelineEngine::new(config)
}

/// Reads the whole input file, or all of stdin.
pub fn read_all_input(input_file: Option<&Path>) -> Result<String> {
    match input_file {
        Some(path) => {
            info!("Reading input from file: {}", path.display());
            fs::read_to_string(path)
                .with_context(|| format!("Failed to read input file: {}", path.display()))
        }
        None => {
            info!("Reading input from stdin.");
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read from stdin")?;
            Ok(buffer)
        }
    }
}

/// Opens the output file, or stdout.
pub fn open_output(output: Option<&Path>, quiet: bool) -> Result<Box<dyn Write>> {
    match output {
        Some(path) => {
            if !quiet {
                info_msg(format!("Writing sanitized content to file: {}", path.display()));
            }
            let file = fs::File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}
