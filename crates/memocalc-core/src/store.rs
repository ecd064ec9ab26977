//! Persistence collaborators for calculation history.
//!
//! A store exchanges ordered rows of [`CalculationRecord`]. Reading a store
//! that does not exist yields `None`; writing always creates the store,
//! even for an empty history.

use std::fs::File;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use crate::calculation::CalculationRecord;
use crate::constants::HISTORY_COLUMNS;

/// Persistence failure.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("unexpected columns: {0}")]
    Columns(String),
}

/// Backing storage for history rows.
pub trait HistoryStore: Send + Sync {
    /// Replace the stored rows.
    fn write(&self, rows: &[CalculationRecord]) -> Result<(), StoreError>;

    /// Read the stored rows, or `None` if nothing has been stored yet.
    fn read(&self) -> Result<Option<Vec<CalculationRecord>>, StoreError>;
}

/// CSV file with a `operation,operand1,operand2,result,timestamp` header.
pub struct CsvHistoryStore {
    path: PathBuf,
}

impl CsvHistoryStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HistoryStore for CsvHistoryStore {
    fn write(&self, rows: &[CalculationRecord]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        // Header written by hand so an empty history still yields a
        // well-formed table.
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&self.path)?;
        writer.write_record(HISTORY_COLUMNS)?;
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        Ok(())
    }

    fn read(&self) -> Result<Option<Vec<CalculationRecord>>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let file = File::open(&self.path)?;
        let mut reader = csv::Reader::from_reader(file);

        let headers = reader.headers()?.clone();
        if headers.is_empty() {
            return Ok(Some(Vec::new()));
        }
        let missing: Vec<&str> = HISTORY_COLUMNS
            .iter()
            .copied()
            .filter(|col| !headers.iter().any(|h| h == *col))
            .collect();
        if !missing.is_empty() {
            return Err(StoreError::Columns(format!("missing {}", missing.join(", "))));
        }

        let rows = reader
            .deserialize::<CalculationRecord>()
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Some(rows))
    }
}

/// In-memory store, useful for embedding and tests.
#[derive(Default)]
pub struct MemoryHistoryStore {
    rows: Mutex<Option<Vec<CalculationRecord>>>,
}

impl MemoryHistoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `rows`.
    #[must_use]
    pub fn with_rows(rows: Vec<CalculationRecord>) -> Self {
        Self {
            rows: Mutex::new(Some(rows)),
        }
    }

    /// Copy of the currently stored rows.
    #[must_use]
    pub fn rows(&self) -> Option<Vec<CalculationRecord>> {
        self.rows.lock().clone()
    }
}

impl HistoryStore for MemoryHistoryStore {
    fn write(&self, rows: &[CalculationRecord]) -> Result<(), StoreError> {
        *self.rows.lock() = Some(rows.to_vec());
        Ok(())
    }

    fn read(&self) -> Result<Option<Vec<CalculationRecord>>, StoreError> {
        Ok(self.rows.lock().clone())
    }
}
