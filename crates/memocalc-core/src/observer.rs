//! Observer pattern for recorded calculations.
//!
//! Observers are shared with the caller (`Arc`) and only referenced by the
//! calculator. The set keeps insertion order and ignores duplicate
//! registrations of the same instance.

use std::sync::Arc;

use crate::calculation::Calculation;
use crate::errors::OperationError;

/// Listener notified after each successful calculation.
pub trait CalculationObserver: Send + Sync {
    /// Handle a calculation that was just appended to `history`.
    ///
    /// `history` is the calculator's history after the append, oldest
    /// first. An error aborts notification and reaches the caller of
    /// `perform`.
    fn notify(&self, calculation: &Calculation, history: &[Calculation])
        -> Result<(), OperationError>;
}

/// Ordered set of registered observers.
#[derive(Default)]
pub struct ObserverSet {
    observers: Vec<Arc<dyn CalculationObserver>>,
}

impl ObserverSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer. Returns `false` if this instance is already
    /// registered.
    pub fn add(&mut self, observer: Arc<dyn CalculationObserver>) -> bool {
        if self.contains(&observer) {
            return false;
        }
        self.observers.push(observer);
        true
    }

    /// Unregister an observer. Unknown observers are ignored.
    pub fn remove(&mut self, observer: &Arc<dyn CalculationObserver>) -> bool {
        let before = self.observers.len();
        self.observers.retain(|o| !same_instance(o, observer));
        self.observers.len() != before
    }

    #[must_use]
    pub fn contains(&self, observer: &Arc<dyn CalculationObserver>) -> bool {
        self.observers.iter().any(|o| same_instance(o, observer))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Notify every observer in registration order, stopping at the first
    /// failure.
    pub fn notify_all(
        &self,
        calculation: &Calculation,
        history: &[Calculation],
    ) -> Result<(), OperationError> {
        for observer in &self.observers {
            observer.notify(calculation, history)?;
        }
        Ok(())
    }
}

// Compare data pointers only; vtable pointers for the same type may differ.
fn same_instance(a: &Arc<dyn CalculationObserver>, b: &Arc<dyn CalculationObserver>) -> bool {
    std::ptr::eq(
        Arc::as_ptr(a).cast::<()>(),
        Arc::as_ptr(b).cast::<()>(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::Operation;
    use parking_lot::Mutex;
    use rust_decimal::Decimal;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingObserver {
        count: AtomicUsize,
    }

    impl CountingObserver {
        fn new() -> Self {
            Self {
                count: AtomicUsize::new(0),
            }
        }
    }

    impl CalculationObserver for CountingObserver {
        fn notify(&self, _: &Calculation, _: &[Calculation]) -> Result<(), OperationError> {
            self.count.fetch_add(1, Ordering::Relaxed);
            Ok(())
        }
    }

    struct OrderRecorder {
        id: usize,
        log: Arc<Mutex<Vec<usize>>>,
    }

    impl CalculationObserver for OrderRecorder {
        fn notify(&self, _: &Calculation, _: &[Calculation]) -> Result<(), OperationError> {
            self.log.lock().push(self.id);
            Ok(())
        }
    }

    struct FailingObserver;

    impl CalculationObserver for FailingObserver {
        fn notify(&self, _: &Calculation, _: &[Calculation]) -> Result<(), OperationError> {
            Err(OperationError::Observer("refused".into()))
        }
    }

    fn sample() -> Calculation {
        Calculation::new(Operation::Addition, Decimal::ONE, Decimal::ONE).unwrap()
    }

    #[test]
    fn add_ignores_duplicates() {
        let mut set = ObserverSet::new();
        let counter = Arc::new(CountingObserver::new());
        let observer: Arc<dyn CalculationObserver> = counter.clone();

        assert!(set.add(observer.clone()));
        assert!(!set.add(observer.clone()));
        assert_eq!(set.len(), 1);

        let calc = sample();
        set.notify_all(&calc, std::slice::from_ref(&calc)).unwrap();
        assert_eq!(counter.count.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn remove_is_idempotent() {
        let mut set = ObserverSet::new();
        let observer: Arc<dyn CalculationObserver> = Arc::new(CountingObserver::new());
        let stranger: Arc<dyn CalculationObserver> = Arc::new(CountingObserver::new());

        set.add(observer.clone());
        assert!(!set.remove(&stranger));
        assert!(set.remove(&observer));
        assert!(!set.remove(&observer));
        assert!(set.is_empty());
        assert!(!set.contains(&observer));
    }

    #[test]
    fn notifies_in_registration_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut set = ObserverSet::new();
        for id in 0..3 {
            set.add(Arc::new(OrderRecorder {
                id,
                log: Arc::clone(&log),
            }));
        }

        let calc = sample();
        set.notify_all(&calc, &[]).unwrap();
        set.notify_all(&calc, &[]).unwrap();
        assert_eq!(*log.lock(), vec![0, 1, 2, 0, 1, 2]);
    }

    #[test]
    fn failure_stops_notification() {
        let mut set = ObserverSet::new();
        let counter = Arc::new(CountingObserver::new());
        set.add(Arc::new(FailingObserver));
        set.add(counter.clone());

        let calc = sample();
        let err = set.notify_all(&calc, &[]).unwrap_err();
        assert_eq!(err, OperationError::Observer("refused".into()));
        assert_eq!(counter.count.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn empty_set_notify_is_ok() {
        let set = ObserverSet::new();
        let calc = sample();
        assert!(set.notify_all(&calc, &[]).is_ok());
    }
}
