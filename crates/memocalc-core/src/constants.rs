//! Defaults for calculator configuration and persistence.

/// Default maximum number of calculations kept in history.
pub const DEFAULT_MAX_HISTORY_SIZE: usize = 1000;

/// Default maximum number of mementos kept on the undo stack.
pub const DEFAULT_MAX_UNDO_DEPTH: usize = 100;

/// Default number of decimal places used when formatting results.
pub const DEFAULT_PRECISION: u32 = 10;

/// Largest scale a `rust_decimal::Decimal` can carry.
pub const MAX_PRECISION: u32 = 28;

/// Directory (under the base directory) holding the log file.
pub const LOG_DIR_NAME: &str = "logs";

/// Log file name.
pub const LOG_FILE_NAME: &str = "calculator.log";

/// Directory (under the base directory) holding persisted history.
pub const HISTORY_DIR_NAME: &str = "history";

/// Persisted history file name.
pub const HISTORY_FILE_NAME: &str = "calculator_history.csv";

/// Column order of the persisted history table.
pub const HISTORY_COLUMNS: [&str; 5] = ["operation", "operand1", "operand2", "result", "timestamp"];

/// `strftime` format used for every timestamp the core renders.
///
/// `%.f` emits only as many fractional digits as needed, so rendering then
/// parsing a timestamp is lossless.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";
