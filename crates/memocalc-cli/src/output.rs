//! REPL output formatting.

use std::io::{self, Write};

/// Banner printed when the session starts.
pub const BANNER: &str = "Calculator started. Type 'help' for commands.";

/// Lines of the `help` command, in display order.
pub const HELP_LINES: [&str; 10] = [
    "\nAvailable commands:",
    "  add, subtract, multiply, divide, power, root - Perform calculations",
    "  history - Show calculation history",
    "  clear - Clear calculation history",
    "  undo - Undo the last calculation",
    "  redo - Redo the last undone calculation",
    "  save - Save calculation history to file",
    "  load - Load calculation history from file",
    "  exit - Exit the calculator",
    "",
];

/// Write the help text.
pub fn write_help(out: &mut impl Write) -> io::Result<()> {
    for line in HELP_LINES {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

/// Write a numbered history listing, or a notice when it is empty.
pub fn write_history(out: &mut impl Write, entries: &[String]) -> io::Result<()> {
    if entries.is_empty() {
        return writeln!(out, "No calculations in history");
    }
    writeln!(out, "\nCalculation History:")?;
    for (i, entry) in entries.iter().enumerate() {
        writeln!(out, "{}. {entry}", i + 1)?;
    }
    Ok(())
}
