//! # memocalc-cli
//!
//! Interactive command loop, command parsing, and output formatting.

pub mod command;
pub mod output;
pub mod repl;

pub use command::Command;
pub use repl::{build_calculator, Repl, SessionEnd};
