//! The calculator: active operation, bounded history, undo/redo stacks of
//! mementos, and registered observers.
//!
//! Every successful `perform` pushes a snapshot of the history as it was
//! *before* the call onto the undo stack and empties the redo stack.
//! `undo`/`redo` swap the live history with the top snapshot of the
//! respective stack, saving the current history on the opposite stack.

use std::collections::VecDeque;
use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, error, info, warn};

use crate::calculation::{Calculation, CalculationRecord};
use crate::config::CalculatorConfig;
use crate::errors::{CalcError, ConfigError, OperationError};
use crate::input::InputValidator;
use crate::memento::CalculatorMemento;
use crate::observer::{CalculationObserver, ObserverSet};
use crate::operations::Operation;
use crate::store::{CsvHistoryStore, HistoryStore};

/// Undoable calculator with persistent history.
pub struct Calculator {
    config: CalculatorConfig,
    history: Vec<Calculation>,
    undo_stack: VecDeque<CalculatorMemento>,
    redo_stack: Vec<CalculatorMemento>,
    operation: Option<Operation>,
    observers: ObserverSet,
    store: Arc<dyn HistoryStore>,
}

impl Calculator {
    /// Create a calculator persisting to the CSV file named by the
    /// configuration.
    pub fn new(config: CalculatorConfig) -> Result<Self, CalcError> {
        let store = Arc::new(CsvHistoryStore::new(config.history_file()));
        Self::with_store(config, store)
    }

    /// Create a calculator backed by `store`.
    ///
    /// Invalid configuration or failure to create the storage directories
    /// is fatal. Failure to load existing history is logged and the
    /// calculator starts empty.
    pub fn with_store(
        config: CalculatorConfig,
        store: Arc<dyn HistoryStore>,
    ) -> Result<Self, CalcError> {
        config.validate()?;
        config.ensure_directories()?;

        let mut calculator = Self {
            config,
            history: Vec::new(),
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            operation: None,
            observers: ObserverSet::new(),
            store,
        };

        if let Err(e) = calculator.load_history() {
            warn!(error = %e, "Could not load existing history");
        }

        info!(
            base_dir = %calculator.config.base_dir.display(),
            max_history_size = calculator.config.max_history_size,
            max_undo_depth = calculator.config.max_undo_depth,
            "Calculator initialized with configuration"
        );
        Ok(calculator)
    }

    #[must_use]
    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    /// Change the history bound. Takes effect on the next `perform`.
    pub fn set_max_history_size(&mut self, size: usize) -> Result<(), ConfigError> {
        if size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_history_size",
                reason: "must be at least 1".to_string(),
            });
        }
        self.config.max_history_size = size;
        Ok(())
    }

    /// The persistence collaborator used by `save_history`/`load_history`.
    #[must_use]
    pub fn store(&self) -> Arc<dyn HistoryStore> {
        Arc::clone(&self.store)
    }

    /// Register an observer. Returns `false` if it was already registered.
    pub fn add_observer(&mut self, observer: Arc<dyn CalculationObserver>) -> bool {
        let added = self.observers.add(observer);
        if added {
            info!("Added observer");
        }
        added
    }

    /// Unregister an observer. Unknown observers are ignored.
    pub fn remove_observer(&mut self, observer: &Arc<dyn CalculationObserver>) -> bool {
        let removed = self.observers.remove(observer);
        if removed {
            info!("Removed observer");
        }
        removed
    }

    #[must_use]
    pub fn has_observer(&self, observer: &Arc<dyn CalculationObserver>) -> bool {
        self.observers.contains(observer)
    }

    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Select the operation used by subsequent `perform` calls.
    pub fn set_operation(&mut self, operation: Operation) {
        self.operation = Some(operation);
        info!(operation = %operation, "Set operation");
    }

    #[must_use]
    pub fn operation(&self) -> Option<Operation> {
        self.operation
    }

    /// Apply the active operation to two raw operands and record the result.
    ///
    /// Input validation errors and per-operation domain errors are returned
    /// unchanged; any other computation failure becomes
    /// `OperationError::Failed`. Observer failures are returned as-is, after
    /// the calculation has been recorded.
    pub fn perform(&mut self, a: &str, b: &str) -> Result<Decimal, CalcError> {
        let operation = self.operation.ok_or(OperationError::NoOperation)?;

        let calculation = self.compute(operation, a, b).inspect_err(|e| {
            error!(operation = %operation, error = %e, "Calculation rejected");
        })?;

        self.push_undo(CalculatorMemento::capture(&self.history));
        self.redo_stack.clear();

        self.history.push(calculation.clone());
        self.trim_history();

        self.observers.notify_all(&calculation, &self.history)?;

        info!(
            operation = %operation,
            result = %calculation.result(),
            "Performed calculation"
        );
        Ok(calculation.result())
    }

    fn compute(&self, operation: Operation, a: &str, b: &str) -> Result<Calculation, CalcError> {
        let a = InputValidator::validate_number(a, &self.config)?;
        let b = InputValidator::validate_number(b, &self.config)?;
        Calculation::new(operation, a, b).map_err(|e| {
            if e.is_domain_error() {
                e.into()
            } else {
                OperationError::Failed(e.to_string()).into()
            }
        })
    }

    fn trim_history(&mut self) {
        let max = self.config.max_history_size;
        if self.history.len() > max {
            let excess = self.history.len() - max;
            self.history.drain(..excess);
            debug!(dropped = excess, "Trimmed history");
        }
    }

    fn push_undo(&mut self, memento: CalculatorMemento) {
        self.undo_stack.push_back(memento);
        while self.undo_stack.len() > self.config.max_undo_depth {
            self.undo_stack.pop_front();
        }
    }

    /// Restore the history saved before the most recent change.
    ///
    /// Returns `false`, changing nothing, when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(memento) = self.undo_stack.pop_back() else {
            return false;
        };
        self.redo_stack.push(CalculatorMemento::capture(&self.history));
        self.history = memento.into_history();
        info!(entries = self.history.len(), "Undo applied");
        true
    }

    /// Re-apply the most recently undone change.
    ///
    /// Returns `false`, changing nothing, when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(memento) = self.redo_stack.pop() else {
            return false;
        };
        self.push_undo(CalculatorMemento::capture(&self.history));
        self.history = memento.into_history();
        info!(entries = self.history.len(), "Redo applied");
        true
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    #[must_use]
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    #[must_use]
    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// Empty history and both undo/redo stacks.
    pub fn clear_history(&mut self) {
        self.history.clear();
        self.undo_stack.clear();
        self.redo_stack.clear();
        info!("History cleared");
    }

    /// Current history, oldest first.
    #[must_use]
    pub fn history(&self) -> &[Calculation] {
        &self.history
    }

    /// Short renderings of every calculation, oldest first.
    #[must_use]
    pub fn show_history(&self) -> Vec<String> {
        self.history.iter().map(ToString::to_string).collect()
    }

    /// Tabular view of history, one record per calculation.
    #[must_use]
    pub fn history_rows(&self) -> Vec<CalculationRecord> {
        self.history.iter().map(Calculation::to_record).collect()
    }

    /// Memento of the current history.
    #[must_use]
    pub fn snapshot(&self) -> CalculatorMemento {
        CalculatorMemento::capture(&self.history)
    }

    /// Write the full history to the store.
    pub fn save_history(&self) -> Result<(), OperationError> {
        let rows = self.history_rows();
        self.store.write(&rows).map_err(|e| {
            error!(error = %e, "Failed to save history");
            OperationError::SaveFailed(e.to_string())
        })?;
        info!(entries = rows.len(), "History saved");
        Ok(())
    }

    /// Replace the history with the stored one. A missing store yields an
    /// empty history; on failure the current history is kept.
    pub fn load_history(&mut self) -> Result<(), OperationError> {
        let rows = self
            .store
            .read()
            .map_err(|e| OperationError::LoadFailed(e.to_string()))?;

        let Some(rows) = rows else {
            self.history.clear();
            info!("No history file found, starting with empty history");
            return Ok(());
        };

        let history = rows
            .iter()
            .map(Calculation::from_record)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| OperationError::LoadFailed(e.to_string()))?;
        self.history = history;
        info!(entries = self.history.len(), "Loaded history");
        Ok(())
    }
}
