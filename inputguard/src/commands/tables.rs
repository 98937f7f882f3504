// inputguard/src/commands/tables.rs
//! The `tables` command: shows the table set the engine was compiled from.

use anyhow::{Context, Result};
use inputguard_core::{SanitizationEngine, SanitizerConfig, Stage};
use serde::Serialize;
use std::io::{self, Write};

use crate::cli::TablesCommand;
use crate::ui::stage_table::{render_config, render_stages};

#[derive(Debug, Serialize)]
struct StageInfo {
    position: usize,
    stage: Stage,
    description: &'static str,
}

#[derive(Debug, Serialize)]
struct TablesReport<'a> {
    fingerprint: &'a str,
    tables: &'a SanitizerConfig,
    stages: Vec<StageInfo>,
}

fn build_report(engine: &dyn SanitizationEngine) -> TablesReport<'_> {
    TablesReport {
        fingerprint: &engine.compiled_pipeline().fingerprint,
        tables: engine.get_config(),
        stages: Stage::ALL
            .iter()
            .map(|stage| StageInfo {
                position: stage.position(),
                stage: *stage,
                description: stage.description(),
            })
            .collect(),
    }
}

pub fn run_tables(engine: &dyn SanitizationEngine, cmd: &TablesCommand) -> Result<()> {
    let report = build_report(engine);
    let stdout = io::stdout();
    let mut writer = stdout.lock();

    if cmd.json_stdout {
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize tables")?;
        writeln!(writer, "{}", json)?;
    } else {
        writeln!(writer, "Fingerprint: {}", report.fingerprint)?;
        writeln!(writer, "{}", render_config(report.tables))?;
        writeln!(writer, "{}", render_stages())?;
    }
    writer.flush()?;
    Ok(())
}
