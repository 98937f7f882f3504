// inputguard/src/ui/diff_viewer.rs
//! Line-based unified diff between the raw input and the sanitized output.

use anyhow::Result;
use diffy::{create_patch, Line as DiffLine};
use owo_colors::OwoColorize;
use std::io::Write;

/// Writes a `-`/`+` line diff of `original` against `sanitized`.
///
/// Removed lines are red and added lines green when `supports_color` is set.
pub fn print_diff<W: Write>(
    original: &str,
    sanitized: &str,
    writer: &mut W,
    supports_color: bool,
) -> Result<()> {
    let patch = create_patch(original, sanitized);

    if supports_color {
        writeln!(writer, "{}", "--- Diff View ---".yellow().bold())?;
    } else {
        writeln!(writer, "--- Diff View ---")?;
    }

    let mut changes = 0usize;
    for hunk in patch.hunks() {
        for line_change in hunk.lines() {
            match line_change {
                DiffLine::Delete(s) => {
                    changes += 1;
                    let line = format!("-{}", s.trim_end_matches('\n'));
                    if supports_color {
                        writeln!(writer, "{}", line.red())?;
                    } else {
                        writeln!(writer, "{}", line)?;
                    }
                }
                DiffLine::Insert(s) => {
                    changes += 1;
                    let line = format!("+{}", s.trim_end_matches('\n'));
                    if supports_color {
                        writeln!(writer, "{}", line.green())?;
                    } else {
                        writeln!(writer, "{}", line)?;
                    }
                }
                DiffLine::Context(s) => {
                    writeln!(writer, " {}", s.trim_end_matches('\n'))?;
                }
            }
        }
    }

    if changes == 0 {
        writeln!(writer, "No changes detected.")?;
    }
    Ok(())
}
