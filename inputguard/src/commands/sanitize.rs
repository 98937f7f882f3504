// inputguard/src/commands/sanitize.rs
//! The `sanitize` command: JSON documents, request containers or raw text.

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use log::{debug, info};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};

use inputguard_core::{sanitize_request, RequestInput, SanitizationEngine, Value};

use crate::cli::{InputFormat, SanitizeCommand};
use crate::commands::{open_output, read_all_input, warn_msg};
use crate::errors::CliError;
use crate::ui::diff_viewer;

/// A parsed JSON input: either a bare value or a request with its three containers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Document {
    Request(RequestInput),
    Value(Value),
}

/// Parses `text` as JSON, as a request when `request` is set.
pub fn parse_document(text: &str, request: bool) -> Result<Document> {
    if request {
        let parsed: RequestInput =
            serde_json::from_str(text).context("Failed to parse request JSON")?;
        Ok(Document::Request(parsed))
    } else {
        let parsed: Value = serde_json::from_str(text).context("Failed to parse JSON input")?;
        Ok(Document::Value(parsed))
    }
}

pub fn sanitize_document(engine: &dyn SanitizationEngine, document: Document) -> Document {
    match document {
        Document::Request(request) => Document::Request(sanitize_request(engine, request)),
        Document::Value(value) => Document::Value(engine.sanitize(value)),
    }
}

pub fn render_document(document: &Document, pretty: bool) -> Result<String> {
    let rendered = if pretty {
        serde_json::to_string_pretty(document)
    } else {
        serde_json::to_string(document)
    };
    rendered.context("Failed to serialize sanitized JSON")
}

/// The main operation runner for the `sanitize` command.
pub fn run_sanitize(engine: &dyn SanitizationEngine, cmd: &SanitizeCommand, quiet: bool) -> Result<()> {
    info!("Starting sanitize operation.");
    if cmd.request && cmd.format != InputFormat::Json {
        return Err(CliError::RequestNeedsJson.into());
    }

    let supports_color = cmd.output.is_none() && io::stdout().is_terminal();
    let mut writer = open_output(cmd.output.as_deref(), quiet)?;

    if cmd.line_buffered {
        let reader: Box<dyn BufRead> = match cmd.input_file.as_deref() {
            Some(path) => Box::new(BufReader::new(File::open(path).with_context(|| {
                format!("Failed to open input file: {}", path.display())
            })?)),
            None => Box::new(io::stdin().lock()),
        };
        run_line_buffered(engine, reader, &mut writer, cmd.format, cmd.request)?;
    } else {
        let input = read_all_input(cmd.input_file.as_deref())?;
        match cmd.format {
            InputFormat::Json => {
                let document = parse_document(&input, cmd.request)?;
                let sanitized = sanitize_document(engine, document.clone());
                if cmd.diff {
                    let before = render_document(&document, true)?;
                    let after = render_document(&sanitized, true)?;
                    diff_viewer::print_diff(&before, &after, &mut writer, supports_color)?;
                } else {
                    writeln!(writer, "{}", render_document(&sanitized, cmd.pretty)?)?;
                }
            }
            InputFormat::Text => {
                let pipeline = engine.compiled_pipeline();
                if !quiet && (pipeline.is_oversized(&input) || pipeline.is_xml_document(&input)) {
                    warn_msg("Input was replaced with the rejection sentinel.");
                }
                let sanitized = engine.sanitize_str(&input);
                debug!(
                    "Content sanitized. Original length: {}, Sanitized length: {}",
                    input.len(),
                    sanitized.len()
                );
                if cmd.diff {
                    diff_viewer::print_diff(&input, &sanitized, &mut writer, supports_color)?;
                } else {
                    writeln!(writer, "{}", sanitized)?;
                }
            }
        }
    }

    writer.flush().context("Failed to flush output")?;
    info!("Sanitize operation completed.");
    Ok(())
}

/// Sanitizes `reader` one line at a time, flushing after every line.
///
/// Text lines are sanitized as single strings. In JSON mode every non-blank line
/// must be a complete JSON document (JSON Lines).
pub fn run_line_buffered<R: BufRead, W: Write + ?Sized>(
    engine: &dyn SanitizationEngine,
    reader: R,
    writer: &mut W,
    format: InputFormat,
    request: bool,
) -> Result<()> {
    for (index, line) in reader.lines().enumerate() {
        let line = line.context("Failed to read input line")?;
        let output = match format {
            InputFormat::Text => engine.sanitize_str(&line),
            InputFormat::Json => {
                if line.trim().is_empty() {
                    continue;
                }
                let document = parse_document(&line, request)
                    .with_context(|| format!("Invalid JSON on line {}", index + 1))?;
                render_document(&sanitize_document(engine, document), false)?
            }
        };
        writeln!(writer, "{}", output)?;
        writer.flush()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use inputguard_core::default_engine;
    use std::io::Cursor;

    #[test]
    fn request_document_keeps_absent_containers_absent() {
        let document = parse_document(r#"{"query": {"q": "a;b"}}"#, true).unwrap();
        let sanitized = sanitize_document(default_engine(), document);
        assert_eq!(render_document(&sanitized, false).unwrap(), r#"{"query":{"q":"ab"}}"#);
    }

    #[test]
    fn bare_document_preserves_key_order() {
        let document = parse_document(r#"{"z": "<b>", "a": 1}"#, false).unwrap();
        let sanitized = sanitize_document(default_engine(), document);
        assert_eq!(render_document(&sanitized, false).unwrap(), r#"{"z":"b","a":1}"#);
    }

    #[test]
    fn line_buffered_text_sanitizes_each_line() {
        let mut out = Vec::new();
        let input = Cursor::new("ok\n;ls\n' OR 1=1; --\n");
        run_line_buffered(default_engine(), input, &mut out, InputFormat::Text, false).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "ok\n\n11 __\n");
    }

    #[test]
    fn line_buffered_json_skips_blank_lines() {
        let mut out = Vec::new();
        let input = Cursor::new("[\"<x>\"]\n\n{\"k\": \"$gt\"}\n");
        run_line_buffered(default_engine(), input, &mut out, InputFormat::Json, false).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "[\"x\"]\n{\"k\":\"\"}\n");
    }

    #[test]
    fn line_buffered_json_reports_line_number() {
        let mut out = Vec::new();
        let input = Cursor::new("{}\n{broken\n");
        let err = run_line_buffered(default_engine(), input, &mut out, InputFormat::Json, false)
            .unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }
}
