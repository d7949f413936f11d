//! Rendering a `ListOutcome` to the terminal.

use crossterm::style::Stylize;
use crossterm::tty::IsTty;
use ib_03_usage_report::ListOutcome;
use std::io::{self, Write};

/// Whether stderr should carry colour: a terminal and `NO_COLOR` unset.
pub fn stderr_supports_color() -> bool {
    std::env::var_os("NO_COLOR").is_none() && io::stderr().is_tty()
}

/// Write links to `out` and error lines to `err`, red when `color` is set.
pub fn write_outcome<O: Write, E: Write>(
    outcome: &ListOutcome,
    out: &mut O,
    err: &mut E,
    color: bool,
) -> io::Result<()> {
    for link in outcome.output_lines() {
        writeln!(out, "{link}")?;
    }
    out.flush()?;

    for line in outcome.error_lines() {
        if color && !line.is_empty() {
            writeln!(err, "{}", line.as_str().red())?;
        } else {
            writeln!(err, "{line}")?;
        }
    }
    err.flush()
}
