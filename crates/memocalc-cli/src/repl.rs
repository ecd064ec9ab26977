//! Line-oriented interactive session over any reader/writer pair.

use std::io::{self, BufRead, ErrorKind, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use memocalc_core::{
    AutoSaveObserver, CalcError, Calculator, CalculatorConfig, LoggingObserver, Operation,
};
use tracing::{error, info};

use crate::command::Command;
use crate::output::{write_help, write_history, BANNER};

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The user typed `exit`.
    Exit,
    /// Input reached end of file.
    EndOfInput,
}

enum Flow {
    Continue,
    Stop(SessionEnd),
}

enum Input {
    Line(String),
    Cancelled,
    Interrupted,
    End,
}

/// Create a calculator with the logging and autosave observers attached.
pub fn build_calculator(config: CalculatorConfig) -> Result<Calculator, CalcError> {
    let mut calculator = Calculator::new(config)?;
    let auto_save = calculator.config().auto_save;
    calculator.add_observer(Arc::new(LoggingObserver::new()));
    calculator.add_observer(Arc::new(AutoSaveObserver::new(calculator.store(), auto_save)));
    Ok(calculator)
}

/// Interactive calculator session.
pub struct Repl<R, W> {
    calculator: Calculator,
    input: R,
    output: W,
    interrupt: Arc<AtomicBool>,
}

impl<R: BufRead, W: Write> Repl<R, W> {
    pub fn new(calculator: Calculator, input: R, output: W) -> Self {
        Self {
            calculator,
            input,
            output,
            interrupt: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Share an interrupt flag, typically set from a Ctrl+C handler.
    ///
    /// A set flag abandons the command or operand being read; the session
    /// then continues at the command prompt.
    #[must_use]
    pub fn with_interrupt(mut self, flag: Arc<AtomicBool>) -> Self {
        self.interrupt = flag;
        self
    }

    #[must_use]
    pub fn calculator(&self) -> &Calculator {
        &self.calculator
    }

    #[must_use]
    pub fn output(&self) -> &W {
        &self.output
    }

    /// Release the calculator and writer.
    pub fn into_parts(self) -> (Calculator, W) {
        (self.calculator, self.output)
    }

    /// Run commands until `exit` or end of input.
    ///
    /// Only I/O failures on the reader or writer are returned; calculator
    /// errors are reported to the user and the session continues.
    pub fn run(&mut self) -> io::Result<SessionEnd> {
        writeln!(self.output, "{BANNER}")?;
        info!("Interactive session started");

        loop {
            let line = match self.prompt("\nEnter command: ")? {
                Input::Line(line) => line,
                Input::Interrupted | Input::Cancelled => {
                    self.interrupted()?;
                    continue;
                }
                Input::End => return self.end_of_input(),
            };
            if let Flow::Stop(end) = self.dispatch(Command::parse(&line))? {
                return Ok(end);
            }
        }
    }

    fn dispatch(&mut self, command: Command) -> io::Result<Flow> {
        match command {
            Command::Help => write_help(&mut self.output)?,
            Command::Exit => {
                match self.calculator.save_history() {
                    Ok(()) => writeln!(self.output, "History saved successfully.")?,
                    Err(e) => writeln!(self.output, "Warning: Could not save history: {e}")?,
                }
                writeln!(self.output, "Goodbye!")?;
                info!("Interactive session ended");
                return Ok(Flow::Stop(SessionEnd::Exit));
            }
            Command::History => write_history(&mut self.output, &self.calculator.show_history())?,
            Command::Clear => {
                self.calculator.clear_history();
                writeln!(self.output, "History cleared")?;
            }
            Command::Undo => {
                let msg = if self.calculator.undo() {
                    "Operation undone"
                } else {
                    "Nothing to undo"
                };
                writeln!(self.output, "{msg}")?;
            }
            Command::Redo => {
                let msg = if self.calculator.redo() {
                    "Operation redone"
                } else {
                    "Nothing to redo"
                };
                writeln!(self.output, "{msg}")?;
            }
            Command::Save => match self.calculator.save_history() {
                Ok(()) => writeln!(self.output, "History saved successfully")?,
                Err(e) => writeln!(self.output, "Error saving history: {e}")?,
            },
            Command::Load => match self.calculator.load_history() {
                Ok(()) => writeln!(self.output, "History loaded successfully")?,
                Err(e) => writeln!(self.output, "Error loading history: {e}")?,
            },
            Command::Calculate(op) => return self.calculate(op),
            Command::Unknown(cmd) => writeln!(
                self.output,
                "Unknown command: '{cmd}'. Type 'help' for available commands."
            )?,
        }
        Ok(Flow::Continue)
    }

    fn calculate(&mut self, operation: Operation) -> io::Result<Flow> {
        writeln!(self.output, "\nEnter numbers (or 'cancel' to abort):")?;

        let a = match self.operand("First number: ")? {
            Input::Line(a) => a,
            other => return self.abandon(other),
        };
        let b = match self.operand("Second number: ")? {
            Input::Line(b) => b,
            other => return self.abandon(other),
        };

        self.calculator.set_operation(operation);
        let previous = self.calculator.history().last().cloned();
        let outcome = self.calculator.perform(&a, &b);

        // An observer failure still leaves the calculation recorded.
        let recorded = self
            .calculator
            .history()
            .last()
            .filter(|calc| previous.as_ref() != Some(*calc));
        if let Some(calc) = recorded {
            let precision = self.calculator.config().precision;
            writeln!(self.output, "\nResult: {}", calc.format_result(precision))?;
        }
        if let Err(e) = outcome {
            error!(operation = %operation, error = %e, "Calculation failed");
            writeln!(self.output, "Error: {e}")?;
        }
        Ok(Flow::Continue)
    }

    fn abandon(&mut self, input: Input) -> io::Result<Flow> {
        match input {
            Input::End => self.end_of_input().map(Flow::Stop),
            Input::Interrupted => self.interrupted().map(|()| Flow::Continue),
            Input::Line(_) | Input::Cancelled => {
                writeln!(self.output, "Operation cancelled")?;
                Ok(Flow::Continue)
            }
        }
    }

    fn operand(&mut self, prompt: &str) -> io::Result<Input> {
        Ok(match self.prompt(prompt)? {
            Input::Line(raw) if raw.trim().eq_ignore_ascii_case("cancel") => Input::Cancelled,
            other => other,
        })
    }

    fn prompt(&mut self, prompt: &str) -> io::Result<Input> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        // Ctrl+C lands in the flag; it is seen once the pending read returns.
        let mut line = String::new();
        let read = match self.input.read_line(&mut line) {
            Err(e) if e.kind() == ErrorKind::Interrupted => return Ok(Input::Interrupted),
            other => other?,
        };
        if self.interrupt.swap(false, Ordering::SeqCst) {
            return Ok(Input::Interrupted);
        }
        if read == 0 {
            return Ok(Input::End);
        }
        Ok(Input::Line(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn interrupted(&mut self) -> io::Result<()> {
        writeln!(self.output, "\nOperation cancelled")?;
        info!("Input interrupted");
        Ok(())
    }

    fn end_of_input(&mut self) -> io::Result<SessionEnd> {
        writeln!(self.output, "\nInput terminated. Exiting...")?;
        info!("Input terminated");
        Ok(SessionEnd::EndOfInput)
    }
}
