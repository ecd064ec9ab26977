//! Shared helpers for the workspace integration tests.

use std::str::FromStr;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use tempfile::TempDir;

use memocalc_core::{Calculator, CalculatorConfig, MemoryHistoryStore};

/// Parse a decimal literal, panicking on malformed test input.
#[must_use]
pub fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap_or_else(|e| panic!("bad decimal literal {s:?}: {e}"))
}

/// A fixed timestamp for deterministic records.
#[must_use]
pub fn fixed_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|d| d.and_hms_opt(12, 0, 0))
        .unwrap_or_default()
}

/// Default configuration rooted in a fresh temporary directory.
#[must_use]
pub fn temp_config() -> (TempDir, CalculatorConfig) {
    let dir = TempDir::new().unwrap_or_else(|e| panic!("cannot create temp dir: {e}"));
    let config = CalculatorConfig::with_base_dir(dir.path());
    (dir, config)
}

/// Calculator backed by the CSV file under a fresh temporary directory.
#[must_use]
pub fn csv_calculator() -> (TempDir, Calculator) {
    let (dir, config) = temp_config();
    let calc = Calculator::new(config).unwrap_or_else(|e| panic!("calculator init: {e}"));
    (dir, calc)
}

/// Calculator backed by an in-memory store.
#[must_use]
pub fn memory_calculator() -> (TempDir, Calculator, Arc<MemoryHistoryStore>) {
    let (dir, config) = temp_config();
    let store = Arc::new(MemoryHistoryStore::new());
    let calc = Calculator::with_store(config, store.clone())
        .unwrap_or_else(|e| panic!("calculator init: {e}"));
    (dir, calc, store)
}
