//! Property-based tests for the calculator history and operations.
//!
//! Calculators are backed by an in-memory store so each case only touches
//! the temporary directory created for it.

use std::sync::Arc;

use proptest::prelude::*;
use rust_decimal::Decimal;
use tempfile::TempDir;

use memocalc_core::{Calculation, Calculator, CalculatorConfig, MemoryHistoryStore, Operation};

fn calculator(max_history: usize, max_undo: usize) -> (TempDir, Calculator) {
    let dir = TempDir::new().unwrap();
    let config = CalculatorConfig {
        max_history_size: max_history,
        max_undo_depth: max_undo,
        ..CalculatorConfig::with_base_dir(dir.path())
    };
    let calc = Calculator::with_store(config, Arc::new(MemoryHistoryStore::new())).unwrap();
    (dir, calc)
}

fn operation() -> impl Strategy<Value = Operation> {
    prop::sample::select(Operation::ALL.to_vec())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// History never exceeds its bound and keeps the newest entries.
    #[test]
    fn history_is_bounded(max in 1usize..8, values in prop::collection::vec(-1000i64..1000, 1..20)) {
        let (_dir, mut calc) = calculator(max, 100);
        calc.set_operation(Operation::Addition);
        for v in &values {
            calc.perform(&v.to_string(), "1").unwrap();
            prop_assert!(calc.history().len() <= max);
        }
        let last = calc.history().last().unwrap();
        prop_assert_eq!(last.operand1(), Decimal::from(*values.last().unwrap()));
    }

    /// Undoing every step and then redoing every step restores the history.
    #[test]
    fn undo_redo_round_trip(values in prop::collection::vec(0i64..500, 1..12)) {
        let (_dir, mut calc) = calculator(1000, 100);
        calc.set_operation(Operation::Multiplication);
        for v in &values {
            calc.perform(&v.to_string(), "3").unwrap();
        }
        let full = calc.history().to_vec();

        for _ in &values {
            prop_assert!(calc.undo());
        }
        prop_assert!(calc.history().is_empty());
        prop_assert!(!calc.undo());

        for _ in &values {
            prop_assert!(calc.redo());
        }
        prop_assert_eq!(calc.history(), full.as_slice());
        prop_assert!(!calc.redo());
    }

    /// A successful calculation always empties the redo stack.
    #[test]
    fn perform_clears_redo(steps in 1usize..6, undos in 1usize..6) {
        let (_dir, mut calc) = calculator(1000, 100);
        calc.set_operation(Operation::Subtraction);
        for i in 0..steps {
            calc.perform(&i.to_string(), "1").unwrap();
        }
        for _ in 0..undos {
            calc.undo();
        }
        calc.perform("7", "2").unwrap();
        prop_assert_eq!(calc.redo_depth(), 0);
        prop_assert!(!calc.redo());
    }

    /// The undo stack never grows past its configured depth.
    #[test]
    fn undo_depth_is_bounded(depth in 1usize..5, steps in 1usize..12) {
        let (_dir, mut calc) = calculator(1000, depth);
        calc.set_operation(Operation::Addition);
        for i in 0..steps {
            calc.perform(&i.to_string(), "0").unwrap();
            prop_assert!(calc.undo_depth() <= depth);
        }
        prop_assert_eq!(calc.undo_depth(), steps.min(depth));
    }

    /// Record serialization preserves every field.
    #[test]
    fn record_round_trip(op in operation(), a in 1i64..10_000, b in 1i64..6) {
        let calc = Calculation::new(op, Decimal::from(a), Decimal::from(b)).unwrap();
        let restored = Calculation::from_record(&calc.to_record()).unwrap();
        prop_assert_eq!(restored, calc);
    }

    /// Division by any non-zero integer matches multiplication back.
    #[test]
    fn division_inverts_multiplication(a in -10_000i64..10_000, b in 1i64..1000) {
        let a = Decimal::from(a);
        let b = Decimal::from(b);
        let product = Operation::Multiplication.apply(a, b).unwrap();
        prop_assert_eq!(Operation::Division.apply(product, b).unwrap(), a);
    }
}
