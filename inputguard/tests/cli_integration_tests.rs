// inputguard/tests/cli_integration_tests.rs
//! Command-line integration tests for the `sanitize` and `tables` commands.
//!
//! The tests run the real `inputguard` binary through `assert_cmd`, feeding it
//! stdin and checking stdout, stderr and the exit status. `tempfile` provides
//! isolated input, output and table files.

use anyhow::Result;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::io::Write;
use tempfile::{tempdir, NamedTempFile};

use inputguard_core::SanitizerConfig;

/// Helper to build the `inputguard` command with a clean environment.
fn inputguard() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo_bin!("inputguard"));
    cmd.env_remove("INPUTGUARD_CONFIG");
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Helper function to strip ANSI escape codes from a string.
fn strip_ansi(s: &[u8]) -> String {
    let cleaned = strip_ansi_escapes::strip(s);
    String::from_utf8_lossy(&cleaned).to_string()
}

fn write_tables(yaml: &str) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    file.write_all(yaml.as_bytes())?;
    Ok(file)
}

#[test_log::test]
fn test_sanitize_json_from_stdin() {
    inputguard()
        .arg("sanitize")
        .write_stdin(r#"{"user":{"name":"<script>","role":"admin"},"tags":["<script>","ok"],"n":7}"#)
        .assert()
        .success()
        .stdout(r#"{"user":{"name":"script","role":"admin"},"tags":["script","ok"],"n":7}"#.to_string() + "\n");
}

#[test]
fn test_sanitize_json_pretty() {
    inputguard()
        .args(["sanitize", "--pretty"])
        .write_stdin(r#"{"a":"b;c"}"#)
        .assert()
        .success()
        .stdout("{\n  \"a\": \"bc\"\n}\n");
}

#[test]
fn test_sanitize_request_containers() {
    inputguard()
        .args(["sanitize", "--request"])
        .write_stdin(r#"{"body":{"comment":"<img src=x onerror=alert(1)>"},"params":{"id":"../etc"}}"#)
        .assert()
        .success()
        .stdout(
            r#"{"body":{"comment":"img srcx onerroralert1"},"params":{"id":"etc"}}"#.to_string()
                + "\n",
        );
}

#[test]
fn test_sanitize_json_keeps_number_literals() {
    inputguard()
        .arg("sanitize")
        .write_stdin("[1e400, 0.10000000000000000000001, 12345678901234567890123]")
        .assert()
        .success()
        .stdout("[1e400,0.10000000000000000000001,12345678901234567890123]\n");
}

#[test]
fn test_request_flag_requires_json() {
    inputguard()
        .args(["sanitize", "--request", "--format", "text"])
        .write_stdin("x")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("`--request` requires `--format json`"));
}

#[test]
fn test_sanitize_text_treats_input_as_one_string() {
    inputguard()
        .args(["sanitize", "--format", "text"])
        .write_stdin("echo hi; rm -rf /\n")
        .assert()
        .success()
        .stdout("echo hi rm _rf\n");
}

#[test]
fn test_sanitize_text_line_buffered() {
    inputguard()
        .args(["sanitize", "--format", "text", "--line-buffered"])
        .write_stdin("Hello World\n;ls\n&&shutdown -h now\n")
        .assert()
        .success()
        .stdout("Hello World\n\n_h now\n");
}

#[test]
fn test_sanitize_json_lines() {
    inputguard()
        .args(["sanitize", "--line-buffered"])
        .write_stdin("{\"q\":\"$where\"}\n\n[1,\"a--b\"]\n")
        .assert()
        .success()
        .stdout("{\"q\":\"\"}\n[1,\"a__b\"]\n");
}

#[test]
fn test_invalid_json_fails() {
    inputguard()
        .arg("sanitize")
        .write_stdin("{not json")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to parse JSON input"));
}

#[test]
fn test_oversized_text_warns_and_blocks() {
    inputguard()
        .args(["sanitize", "--format", "text"])
        .write_stdin("A".repeat(10_001))
        .assert()
        .success()
        .stdout("Request Blocked\n")
        .stderr(predicate::str::contains("rejection sentinel"));
}

#[test]
fn test_sanitize_file_to_file() -> Result<()> {
    let dir = tempdir()?;
    let input_path = dir.path().join("input.json");
    let output_path = dir.path().join("output.json");
    fs::write(&input_path, r#"["<x>", true, null]"#)?;

    inputguard()
        .args(["sanitize", "-i"])
        .arg(&input_path)
        .arg("-o")
        .arg(&output_path)
        .assert()
        .success()
        .stdout("")
        .stderr(predicate::str::contains("Writing sanitized content to file"));

    assert_eq!(fs::read_to_string(&output_path)?, "[\"x\",true,null]\n");
    Ok(())
}

#[test]
fn test_quiet_suppresses_info_messages() -> Result<()> {
    let dir = tempdir()?;
    let output_path = dir.path().join("out.txt");

    inputguard()
        .args(["-q", "sanitize", "--format", "text", "-o"])
        .arg(&output_path)
        .write_stdin("ok")
        .assert()
        .success()
        .stderr("");

    assert_eq!(fs::read_to_string(&output_path)?, "ok\n");
    Ok(())
}

#[test]
fn test_missing_input_file_fails() {
    inputguard()
        .args(["sanitize", "-i", "/nonexistent/inputguard/input.json"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to read input file"));
}

#[test]
fn test_text_diff_view() {
    let assert = inputguard()
        .args(["sanitize", "--format", "text", "--diff"])
        .write_stdin("safe\nDROP TABLE users;\n")
        .assert()
        .success();
    let stdout = strip_ansi(&assert.get_output().stdout);
    assert!(stdout.contains("--- Diff View ---"));
    assert!(stdout.contains("-DROP TABLE users;"));
    assert!(stdout.contains("+safeDROP  users"));
}

#[test]
fn test_json_diff_view() {
    let assert = inputguard()
        .args(["sanitize", "--diff"])
        .write_stdin(r#"{"keep":"ok","cmd":"cat x"}"#)
        .assert()
        .success();
    let stdout = strip_ansi(&assert.get_output().stdout);
    assert!(stdout.contains(" \"keep\": \"ok\","));
    assert!(stdout.contains("-  \"cmd\": \"cat x\""));
    assert!(stdout.contains("+  \"cmd\": \"x\""));
}

#[test]
fn test_custom_tables_from_config_flag() -> Result<()> {
    let tables = write_tables("dangerous_functions: [curl]\n")?;
    inputguard()
        .args(["sanitize", "--format", "text", "--config"])
        .arg(tables.path())
        .write_stdin("curl ls")
        .assert()
        .success()
        .stdout("ls\n");
    Ok(())
}

#[test]
fn test_custom_tables_from_environment() -> Result<()> {
    let tables = write_tables("rejection_sentinel: \"nope\"\nmax_string_length: 3\n")?;
    inputguard()
        .env("INPUTGUARD_CONFIG", tables.path())
        .args(["sanitize", "--format", "text"])
        .write_stdin("abcd")
        .assert()
        .success()
        .stdout("nope\n");
    Ok(())
}

#[test]
fn test_invalid_tables_fail() -> Result<()> {
    let tables = write_tables("max_string_length: 0\n")?;
    inputguard()
        .arg("--config")
        .arg(tables.path())
        .arg("tables")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to load sanitizer tables"))
        .stderr(predicate::str::contains("max_string_length"));
    Ok(())
}

#[test]
fn test_tables_prints_fingerprint_and_stages() {
    let fingerprint = SanitizerConfig::default().fingerprint();
    inputguard()
        .arg("tables")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Fingerprint: {}", fingerprint)))
        .stdout(predicate::str::contains("dangerous_functions"))
        .stdout(predicate::str::contains("path_traversal"));
}

#[test]
fn test_tables_json_reflects_custom_tables() -> Result<()> {
    let tables = write_tables("sql_keywords: [SELECT]\n")?;
    let assert = inputguard()
        .args(["tables", "--json-stdout", "--config"])
        .arg(tables.path())
        .assert()
        .success();
    let json: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout)?;
    assert_eq!(json["tables"]["sql_keywords"], serde_json::json!(["SELECT"]));
    assert_eq!(json["stages"].as_array().map(Vec::len), Some(14));
    Ok(())
}

#[test]
fn test_debug_flag_enables_logging() {
    inputguard()
        .args(["-d", "sanitize", "--format", "text"])
        .write_stdin("x")
        .assert()
        .success()
        .stderr(predicate::str::contains("DEBUG"));
}
