// inputguard/src/ui/output_format.rs
//! Status messages printed to stderr, colored when the stream is a terminal.

use owo_colors::{AnsiColors, OwoColorize};
use std::io::{self, Write};

fn print_message<W: Write>(
    writer: &mut W,
    label: &str,
    color: AnsiColors,
    message: &str,
    supports_color: bool,
) -> io::Result<()> {
    if supports_color {
        writeln!(writer, "{} {}", label.color(color).bold(), message)
    } else {
        writeln!(writer, "{} {}", label, message)
    }
}

pub fn print_info_message<W: Write>(writer: &mut W, message: &str, supports_color: bool) -> io::Result<()> {
    print_message(writer, "[info]", AnsiColors::Cyan, message, supports_color)
}

pub fn print_warn_message<W: Write>(writer: &mut W, message: &str, supports_color: bool) -> io::Result<()> {
    print_message(writer, "[warn]", AnsiColors::Yellow, message, supports_color)
}

pub fn print_error_message<W: Write>(writer: &mut W, message: &str, supports_color: bool) -> io::Result<()> {
    print_message(writer, "[error]", AnsiColors::Red, message, supports_color)
}
