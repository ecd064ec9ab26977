//! # memocalc-core
//!
//! Calculation engine for MemoCalc: decimal arithmetic operations, an
//! immutable calculation record, observers notified after every
//! calculation, and a history with memento-based undo/redo that can be
//! persisted as CSV.

pub mod calculation;
pub mod calculator;
pub mod config;
pub mod constants;
pub mod errors;
pub mod input;
pub mod memento;
pub mod observer;
pub mod observers;
pub mod operations;
pub mod store;

// Re-exports
pub use calculation::{Calculation, CalculationRecord};
pub use calculator::Calculator;
pub use config::CalculatorConfig;
pub use errors::{CalcError, ConfigError, OperationError, ValidationError};
pub use input::InputValidator;
pub use memento::{CalculatorMemento, MementoRecord};
pub use observer::{CalculationObserver, ObserverSet};
pub use observers::{AutoSaveObserver, LoggingObserver};
pub use operations::Operation;
pub use rust_decimal::Decimal;
pub use store::{CsvHistoryStore, HistoryStore, MemoryHistoryStore, StoreError};
