//! Concrete observer implementations.

use std::sync::Arc;

use tracing::{debug, info};

use crate::calculation::Calculation;
use crate::errors::OperationError;
use crate::observer::CalculationObserver;
use crate::store::HistoryStore;

/// Observer that logs every calculation.
#[derive(Debug, Default)]
pub struct LoggingObserver;

impl LoggingObserver {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl CalculationObserver for LoggingObserver {
    fn notify(&self, calc: &Calculation, _history: &[Calculation]) -> Result<(), OperationError> {
        info!(
            "Calculation performed: {} ({}, {}) = {}",
            calc.operation(),
            calc.operand1(),
            calc.operand2(),
            calc.result()
        );
        Ok(())
    }
}

/// Observer that writes the full history to a store after each calculation.
pub struct AutoSaveObserver {
    store: Arc<dyn HistoryStore>,
    enabled: bool,
}

impl AutoSaveObserver {
    /// Create an autosave observer; when `enabled` is false it does nothing.
    #[must_use]
    pub fn new(store: Arc<dyn HistoryStore>, enabled: bool) -> Self {
        Self { store, enabled }
    }
}

impl CalculationObserver for AutoSaveObserver {
    fn notify(&self, _calc: &Calculation, history: &[Calculation]) -> Result<(), OperationError> {
        if !self.enabled {
            return Ok(());
        }
        let rows: Vec<_> = history.iter().map(Calculation::to_record).collect();
        self.store
            .write(&rows)
            .map_err(|e| OperationError::SaveFailed(e.to_string()))?;
        debug!(entries = rows.len(), "History auto-saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::CalculationRecord;
    use crate::operations::Operation;
    use crate::store::{MemoryHistoryStore, StoreError};
    use rust_decimal::Decimal;

    struct BrokenStore;

    impl HistoryStore for BrokenStore {
        fn write(&self, _rows: &[CalculationRecord]) -> Result<(), StoreError> {
            Err(StoreError::Io(std::io::Error::other("disk full")))
        }

        fn read(&self) -> Result<Option<Vec<CalculationRecord>>, StoreError> {
            Ok(None)
        }
    }

    fn sample() -> Calculation {
        Calculation::new(Operation::Addition, Decimal::TWO, Decimal::ONE).unwrap()
    }

    #[test]
    fn logging_observer_accepts_calculation() {
        let calc = sample();
        assert!(LoggingObserver::new().notify(&calc, &[]).is_ok());
    }

    #[test]
    fn autosave_writes_history() {
        let store = Arc::new(MemoryHistoryStore::new());
        let observer = AutoSaveObserver::new(store.clone(), true);
        let calc = sample();
        observer.notify(&calc, std::slice::from_ref(&calc)).unwrap();

        let rows = store.rows().unwrap();
        assert_eq!(rows, vec![calc.to_record()]);
    }

    #[test]
    fn autosave_disabled_does_nothing() {
        let store = Arc::new(MemoryHistoryStore::new());
        let observer = AutoSaveObserver::new(store.clone(), false);
        let calc = sample();
        observer.notify(&calc, std::slice::from_ref(&calc)).unwrap();
        assert!(store.rows().is_none());
    }

    #[test]
    fn autosave_failure_is_save_error() {
        let observer = AutoSaveObserver::new(Arc::new(BrokenStore), true);
        let calc = sample();
        let err = observer.notify(&calc, &[]).unwrap_err();
        assert!(err.to_string().starts_with("Failed to save history"));
        assert!(err.to_string().contains("disk full"));
    }
}
