//! Console rendering of the change report.
//!
//! Report lines go to stdout, one per line:
//! - additions in bright green
//! - deletions in bright red
//! - warnings in bold yellow
//! - the final confirmation uncolored
//!
//! The caller's color flag alone decides whether escape codes are written;
//! colored's terminal detection only feeds the default of that flag.

use crate::sync::ReportLine;
use colored::{Color, Colorize};
use std::io::{self, Write};

/// Renders a single report line.
#[must_use]
pub fn render_line(line: &ReportLine, color: bool) -> String {
    match line {
        ReportLine::Warning(message) => paint(message.clone(), color, Color::Yellow, true),
        ReportLine::Added(key) => paint(format!("Added:   {key}"), color, Color::BrightGreen, false),
        ReportLine::Deleted(key) => {
            paint(format!("Deleted: {key}"), color, Color::BrightRed, false)
        }
        ReportLine::Updated(path) => format!("JSON file '{}' updated.", path.display()),
    }
}

/// Wraps `text` in the escape codes for `fg` when colors are on.
fn paint(text: String, color: bool, fg: Color, bold: bool) -> String {
    if !color {
        return text;
    }
    let weight = if bold { "1;" } else { "" };
    format!("\x1b[{weight}{}m{text}\x1b[0m", fg.to_fg_str())
}

/// Writes every report line to `out`.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_report<W: Write>(out: &mut W, report: &[ReportLine], color: bool) -> io::Result<()> {
    for line in report {
        writeln!(out, "{}", render_line(line, color))?;
    }
    out.flush()
}

/// Prints one report line to stdout.
///
/// # Errors
///
/// Returns an error if stdout is closed.
pub fn print_line(line: &ReportLine, color: bool) -> io::Result<()> {
    write_report(&mut io::stdout().lock(), std::slice::from_ref(line), color)
}

/// Prints an error message in bold red to stderr.
pub fn error(message: &str) {
    eprintln!("{} {}", "Error:".red().bold(), message);
}
