//! Error types for the calculator core.
//!
//! `ValidationError` covers bad user input, `OperationError` covers
//! everything else a calculation or history operation can fail with.
//! Messages are part of the contract: callers match on their prefixes.

use std::path::PathBuf;

/// Bad user-supplied operand.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The text is not a parseable number.
    #[error("Invalid number format: {0}")]
    InvalidNumber(String),

    /// The magnitude exceeds the configured maximum input value.
    #[error("Value exceeds maximum allowed: {0}")]
    ExceedsMaximum(String),
}

/// Failure of an operation, of the calculator, or of its collaborators.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OperationError {
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    #[error("Division by zero is not allowed")]
    DivisionByZero,

    #[error("Negative exponents are not supported")]
    NegativeExponent,

    #[error("Cannot calculate root of negative number")]
    NegativeRoot,

    #[error("Zero root is undefined")]
    ZeroRoot,

    #[error("No operation set")]
    NoOperation,

    /// Overflow or an undefined intermediate result.
    #[error("{0}")]
    Arithmetic(String),

    /// Unexpected failure while performing a calculation.
    #[error("Operation failed: {0}")]
    Failed(String),

    /// Malformed serialized calculation or memento.
    #[error("Invalid calculation data: {0}")]
    InvalidData(String),

    #[error("Failed to save history: {0}")]
    SaveFailed(String),

    #[error("Failed to load history: {0}")]
    LoadFailed(String),

    /// Raised by an observer while handling a notification.
    #[error("Observer failed: {0}")]
    Observer(String),
}

impl OperationError {
    /// Whether this is one of the documented per-operation domain errors.
    #[must_use]
    pub fn is_domain_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownOperation(_)
                | Self::DivisionByZero
                | Self::NegativeExponent
                | Self::NegativeRoot
                | Self::ZeroRoot
        )
    }
}

/// Invalid configuration or failed environment setup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid configuration: {field} {reason}")]
    InvalidValue {
        field: &'static str,
        reason: String,
    },

    #[error("failed to create directory {}: {source}", path.display())]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Umbrella error returned by calculator entry points.
#[derive(Debug, thiserror::Error)]
pub enum CalcError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Operation(#[from] OperationError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
