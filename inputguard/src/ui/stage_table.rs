// inputguard/src/ui/stage_table.rs
//! Tabular rendering of pipeline traces and table sets.

use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, Color, ContentArrangement, Table};
use inputguard_core::{PipelineTrace, SanitizerConfig, Stage};

/// Longest snippet shown in a table cell, in characters.
const MAX_SNIPPET_CHARS: usize = 60;

/// Escapes control characters and shortens long strings for display.
pub fn display_snippet(s: &str) -> String {
    let escaped: String = s.escape_debug().collect();
    if escaped.chars().count() <= MAX_SNIPPET_CHARS {
        return escaped;
    }
    let head: String = escaped.chars().take(MAX_SNIPPET_CHARS - 3).collect();
    format!("{}...", head)
}

fn new_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(
        headers
            .iter()
            .map(|h| Cell::new(h).fg(Color::Cyan))
            .collect::<Vec<_>>(),
    );
    table
}

/// One row per pipeline stage: guards first, then every rewriting stage.
pub fn render_trace(trace: &PipelineTrace) -> Table {
    let mut table = new_table(&["#", "Stage", "Result", "Output"]);
    let blocked_at = trace.blocked.as_ref().map(|r| r.stage());

    for guard in Stage::GUARDS {
        let result = match blocked_at {
            Some(stage) if stage == guard => Cell::new("BLOCKED").fg(Color::Red),
            // A guard after the one that fired never ran.
            Some(stage) if stage.position() < guard.position() => Cell::new("skipped"),
            _ => Cell::new("pass").fg(Color::Green),
        };
        table.add_row(vec![
            Cell::new(guard.position()),
            Cell::new(guard.name()),
            result,
            Cell::new(""),
        ]);
    }

    for step in &trace.steps {
        let result = if step.changed {
            Cell::new("changed").fg(Color::Yellow)
        } else {
            Cell::new("-")
        };
        table.add_row(vec![
            Cell::new(step.stage.position()),
            Cell::new(step.stage.name()),
            result,
            Cell::new(display_snippet(&step.output)),
        ]);
    }
    table
}

/// The active table set, one field per row.
pub fn render_config(config: &SanitizerConfig) -> Table {
    let mut table = new_table(&["Table", "Value"]);
    table.add_row(vec![
        Cell::new("max_string_length"),
        Cell::new(config.max_string_length),
    ]);
    table.add_row(vec![
        Cell::new("rejection_sentinel"),
        Cell::new(&config.rejection_sentinel),
    ]);
    table.add_row(vec![
        Cell::new("sql_keywords"),
        Cell::new(config.sql_keywords.join(", ")),
    ]);
    table.add_row(vec![
        Cell::new("nosql_operators"),
        Cell::new(config.nosql_operators.join(", ")),
    ]);
    table.add_row(vec![
        Cell::new("dangerous_functions"),
        Cell::new(config.dangerous_functions.join(", ")),
    ]);
    table.add_row(vec![
        Cell::new("allowed_punctuation"),
        Cell::new(&config.allowed_punctuation),
    ]);
    table
}

/// Every stage in execution order with a short description.
pub fn render_stages() -> Table {
    let mut table = new_table(&["#", "Stage", "Effect"]);
    for stage in Stage::ALL {
        table.add_row(vec![
            Cell::new(stage.position()),
            Cell::new(stage.name()),
            Cell::new(stage.description()),
        ]);
    }
    table
}
