//! Application errors and exit codes.

use std::path::PathBuf;

use memocalc_core::{CalcError, ConfigError};

/// Exit codes returned by the binary.
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: u8 = 0;
    /// Generic error.
    pub const ERROR_GENERIC: u8 = 1;
    /// Invalid configuration or unusable storage location.
    pub const ERROR_CONFIG: u8 = 4;
}

/// Failure while setting up the application around the calculator.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("cannot determine current directory: {0}")]
    CurrentDir(#[source] std::io::Error),

    #[error("cannot open log file {}: {source}", path.display())]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot install log subscriber: {0}")]
    Subscriber(String),
}

/// Map an application error to the process exit code.
#[must_use]
pub fn exit_code(err: &anyhow::Error) -> u8 {
    if err.downcast_ref::<AppError>().is_some() || err.downcast_ref::<ConfigError>().is_some() {
        return exit_codes::ERROR_CONFIG;
    }
    match err.downcast_ref::<CalcError>() {
        Some(CalcError::Config(_)) => exit_codes::ERROR_CONFIG,
        _ => exit_codes::ERROR_GENERIC,
    }
}
