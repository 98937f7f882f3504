// inputguard/src/commands/trace.rs
//! The `trace` command: runs one string through the pipeline and reports every stage.

use anyhow::{Context, Result};
use inputguard_core::{PipelineTrace, SanitizationEngine};
use log::info;
use std::io::{self, Write};

use crate::cli::TraceCommand;
use crate::commands::read_all_input;
use crate::errors::CliError;
use crate::ui::stage_table::{display_snippet, render_trace};

pub fn run_trace(engine: &dyn SanitizationEngine, cmd: &TraceCommand) -> Result<()> {
    let input = match &cmd.text {
        Some(text) => text.clone(),
        None => read_all_input(None)?,
    };
    let trace = engine.trace_str(&input);
    info!(
        "Traced input of {} UTF-16 units through {} stages.",
        trace.input_length,
        trace.steps.len()
    );

    let stdout = io::stdout();
    let mut writer = stdout.lock();
    if cmd.json_stdout {
        let json = serde_json::to_string_pretty(&trace).context("Failed to serialize trace")?;
        writeln!(writer, "{}", json)?;
    } else {
        write_trace_report(&trace, &mut writer)?;
    }
    writer.flush()?;

    match trace.blocked {
        Some(reason) if cmd.fail_on_block => Err(CliError::GuardBlocked(reason).into()),
        _ => Ok(()),
    }
}

fn write_trace_report<W: Write>(trace: &PipelineTrace, writer: &mut W) -> Result<()> {
    writeln!(writer, "{}", render_trace(trace))?;
    match &trace.blocked {
        Some(reason) => writeln!(
            writer,
            "Blocked by {} ({} UTF-16 units). Output: {}",
            reason.stage(),
            trace.input_length,
            display_snippet(&trace.output)
        )?,
        None => writeln!(writer, "Output: {}", display_snippet(&trace.output))?,
    }
    Ok(())
}
