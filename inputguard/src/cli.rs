// inputguard/src/cli.rs
//! This file defines the command-line interface (CLI) for the inputguard application,
//! including all available commands and their arguments.
//! License: MIT OR APACHE 2.0

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "inputguard",
    author = "Relay",
    version = env!("CARGO_PKG_VERSION"),
    about = "Sanitize untrusted request data",
    long_about = "InputGuard pushes untrusted input (JSON request bodies, query maps or raw strings) through a fixed pipeline of removal stages that strip shell metacharacters, SQL and NoSQL operators, script tags, control characters and path traversal sequences. Oversized strings and XML documents with a DOCTYPE are replaced with a rejection sentinel.",
    arg_required_else_help = true
)]
pub struct Cli {
    /// Disable informational messages
    #[arg(long, short = 'q', global = true, help = "Suppress all informational and debug messages.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG)
    #[arg(long, short = 'd', global = true, conflicts_with = "quiet", help = "Enable debug logging.")]
    pub debug: bool,

    /// Path to a custom table configuration file (YAML).
    #[arg(
        long = "config",
        value_name = "FILE",
        env = "INPUTGUARD_CONFIG",
        global = true,
        help = "Path to a custom sanitizer table file (YAML)."
    )]
    pub config: Option<PathBuf>,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// All available commands for the `inputguard` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sanitizes JSON or text from a file or stdin.
    #[command(about = "Sanitizes JSON or text from a file or stdin.")]
    Sanitize(SanitizeCommand),

    /// Shows what every pipeline stage does to a single string.
    #[command(about = "Shows what every pipeline stage does to a single string.")]
    Trace(TraceCommand),

    /// Prints the active sanitizer tables and their fingerprint.
    #[command(about = "Prints the active sanitizer tables and their fingerprint.")]
    Tables(TablesCommand),
}

/// How `sanitize` interprets its input.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
pub enum InputFormat {
    /// A JSON document; every string leaf is sanitized.
    #[default]
    Json,
    /// Raw text, sanitized as a single string.
    Text,
}

/// Arguments for the `sanitize` command.
#[derive(Parser, Debug)]
pub struct SanitizeCommand {
    /// Path to an input file (reads from stdin if not provided).
    #[arg(long, short = 'i', value_name = "FILE", help = "Read input from a specified file instead of stdin.")]
    pub input_file: Option<PathBuf>,

    /// Write sanitized output to this file instead of stdout.
    #[arg(long, short = 'o', value_name = "FILE", help = "Write output to a specified file instead of stdout.")]
    pub output: Option<PathBuf>,

    /// Input format.
    #[arg(long, value_enum, default_value_t = InputFormat::Json, help = "Interpret input as a JSON document or as raw text.")]
    pub format: InputFormat,

    /// Treat the JSON input as a request with `body`, `query` and `params` containers.
    #[arg(long, help = "Treat JSON input as a {body, query, params} request.")]
    pub request: bool,

    /// Process input line by line (useful for streaming data from pipes).
    #[arg(
        long = "line-buffered",
        conflicts_with = "diff",
        help = "Process input line by line: one string per line in text mode, one JSON document per line in JSON mode."
    )]
    pub line_buffered: bool,

    /// Pretty-print JSON output.
    #[arg(long, help = "Pretty-print JSON output.")]
    pub pretty: bool,

    /// Show a unified diff to highlight the changes made.
    #[arg(long, short = 'D', help = "Show a unified diff of input and output instead of the output alone.")]
    pub diff: bool,
}

/// Arguments for the `trace` command.
#[derive(Parser, Debug)]
pub struct TraceCommand {
    /// The string to trace (reads all of stdin if not provided).
    #[arg(value_name = "TEXT", help = "The string to trace; stdin is read as one string when omitted.")]
    pub text: Option<String>,

    /// Print the trace as JSON to stdout.
    #[arg(long = "json-stdout", help = "Print the trace to stdout as JSON.")]
    pub json_stdout: bool,

    /// Exit with code 2 when a guard replaced the input with the rejection sentinel.
    #[arg(long = "fail-on-block", help = "Exit with code 2 if the input is blocked by a guard.")]
    pub fail_on_block: bool,
}

/// Arguments for the `tables` command.
#[derive(Parser, Debug)]
pub struct TablesCommand {
    /// Print the tables as JSON to stdout.
    #[arg(long = "json-stdout", help = "Print the tables to stdout as JSON.")]
    pub json_stdout: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["inputguard", "trace", "x", "-q", "--config", "t.yaml"]).unwrap();
        assert!(cli.quiet);
        assert_eq!(cli.config, Some(PathBuf::from("t.yaml")));
        match cli.command {
            Commands::Trace(cmd) => assert_eq!(cmd.text.as_deref(), Some("x")),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn sanitize_defaults_to_json() {
        let cli = Cli::try_parse_from(["inputguard", "sanitize"]).unwrap();
        match cli.command {
            Commands::Sanitize(cmd) => {
                assert_eq!(cmd.format, InputFormat::Json);
                assert!(!cmd.request);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn line_buffered_conflicts_with_diff() {
        assert!(Cli::try_parse_from(["inputguard", "sanitize", "--line-buffered", "--diff"]).is_err());
    }
}
