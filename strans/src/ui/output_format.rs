//! Formatting of diagnostic messages written to stderr.

use owo_colors::OwoColorize;
use std::io::{self, Write};

/// Writes an error line, in bold red when the writer is a color-capable terminal.
pub fn print_error_message<W: Write>(writer: &mut W, msg: &str, supports_color: bool) -> io::Result<()> {
    if supports_color {
        writeln!(writer, "{}", msg.red().bold())
    } else {
        writeln!(writer, "{}", msg)
    }
}

/// Writes a warning line, in yellow when the writer is a color-capable terminal.
pub fn print_warn_message<W: Write>(writer: &mut W, msg: &str, supports_color: bool) -> io::Result<()> {
    if supports_color {
        writeln!(writer, "{}", msg.yellow())
    } else {
        writeln!(writer, "{}", msg)
    }
}
