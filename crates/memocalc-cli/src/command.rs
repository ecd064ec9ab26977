//! Parsing of REPL command lines.

use memocalc_core::Operation;

/// One line of user input at the command prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Exit,
    History,
    Clear,
    Undo,
    Redo,
    Save,
    Load,
    /// One of the operation commands (`add`, `subtract`, ...).
    Calculate(Operation),
    /// Anything else, trimmed and lowercased.
    Unknown(String),
}

impl Command {
    /// Parse a command line. Case and surrounding whitespace are ignored.
    #[must_use]
    pub fn parse(line: &str) -> Self {
        let command = line.trim().to_lowercase();
        match command.as_str() {
            "help" => Self::Help,
            "exit" => Self::Exit,
            "history" => Self::History,
            "clear" => Self::Clear,
            "undo" => Self::Undo,
            "redo" => Self::Redo,
            "save" => Self::Save,
            "load" => Self::Load,
            other => match Operation::from_command(other) {
                Ok(op) => Self::Calculate(op),
                Err(_) => Self::Unknown(command),
            },
        }
    }
}
