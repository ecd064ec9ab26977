//! Calculator configuration and derived storage paths.

use std::path::{Path, PathBuf};

use rust_decimal::Decimal;

use crate::constants::{
    DEFAULT_MAX_HISTORY_SIZE, DEFAULT_MAX_UNDO_DEPTH, DEFAULT_PRECISION, HISTORY_DIR_NAME,
    HISTORY_FILE_NAME, LOG_DIR_NAME, LOG_FILE_NAME, MAX_PRECISION,
};
use crate::errors::ConfigError;

/// Options supplied once at calculator construction.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculatorConfig {
    /// Root directory for logs and persisted history.
    pub base_dir: PathBuf,
    /// Maximum number of calculations kept in history.
    pub max_history_size: usize,
    /// Maximum number of mementos kept on the undo stack.
    pub max_undo_depth: usize,
    /// Save history after every calculation.
    pub auto_save: bool,
    /// Decimal places used when formatting results.
    pub precision: u32,
    /// Largest accepted operand magnitude.
    pub max_input_value: Decimal,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            base_dir: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            max_history_size: DEFAULT_MAX_HISTORY_SIZE,
            max_undo_depth: DEFAULT_MAX_UNDO_DEPTH,
            auto_save: true,
            precision: DEFAULT_PRECISION,
            max_input_value: Decimal::MAX,
        }
    }
}

impl CalculatorConfig {
    /// Default configuration rooted at `base_dir`.
    #[must_use]
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn log_dir(&self) -> PathBuf {
        self.base_dir.join(LOG_DIR_NAME)
    }

    #[must_use]
    pub fn log_file(&self) -> PathBuf {
        self.log_dir().join(LOG_FILE_NAME)
    }

    #[must_use]
    pub fn history_dir(&self) -> PathBuf {
        self.base_dir.join(HISTORY_DIR_NAME)
    }

    #[must_use]
    pub fn history_file(&self) -> PathBuf {
        self.history_dir().join(HISTORY_FILE_NAME)
    }

    /// Check every option against its allowed range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_history_size == 0 {
            return Err(invalid("max_history_size", "must be at least 1"));
        }
        if self.max_undo_depth == 0 {
            return Err(invalid("max_undo_depth", "must be at least 1"));
        }
        if self.precision == 0 || self.precision > MAX_PRECISION {
            return Err(invalid(
                "precision",
                &format!("must be between 1 and {MAX_PRECISION}"),
            ));
        }
        if self.max_input_value <= Decimal::ZERO {
            return Err(invalid("max_input_value", "must be positive"));
        }
        Ok(())
    }

    /// Create the log and history directories.
    pub fn ensure_directories(&self) -> Result<(), ConfigError> {
        create_dir(&self.log_dir())?;
        create_dir(&self.history_dir())
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field,
        reason: reason.to_string(),
    }
}

fn create_dir(path: &Path) -> Result<(), ConfigError> {
    std::fs::create_dir_all(path).map_err(|source| ConfigError::Directory {
        path: path.to_path_buf(),
        source,
    })
}
