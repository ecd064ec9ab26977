//! Snapshots of calculator history for undo/redo.

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::calculation::{format_timestamp, parse_timestamp, Calculation, CalculationRecord};
use crate::errors::OperationError;

/// Serialized memento: ordered calculation records plus capture time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MementoRecord {
    pub history: Vec<CalculationRecord>,
    pub timestamp: String,
}

/// Immutable copy of a history sequence taken at one instant.
///
/// The memento owns its own `Vec`, so later changes to the live history
/// never reach a captured snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalculatorMemento {
    history: Vec<Calculation>,
    timestamp: NaiveDateTime,
}

impl CalculatorMemento {
    /// Copy `history` and stamp it with the current time.
    #[must_use]
    pub fn capture(history: &[Calculation]) -> Self {
        Self::capture_at(history, Local::now().naive_local())
    }

    /// Copy `history` with an explicit capture time.
    #[must_use]
    pub fn capture_at(history: &[Calculation], timestamp: NaiveDateTime) -> Self {
        Self {
            history: history.to_vec(),
            timestamp,
        }
    }

    #[must_use]
    pub fn history(&self) -> &[Calculation] {
        &self.history
    }

    #[must_use]
    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    /// Consume the memento, yielding the captured history.
    #[must_use]
    pub fn into_history(self) -> Vec<Calculation> {
        self.history
    }

    #[must_use]
    pub fn to_record(&self) -> MementoRecord {
        MementoRecord {
            history: self.history.iter().map(Calculation::to_record).collect(),
            timestamp: format_timestamp(self.timestamp),
        }
    }

    pub fn from_record(record: &MementoRecord) -> Result<Self, OperationError> {
        let history = record
            .history
            .iter()
            .map(Calculation::from_record)
            .collect::<Result<Vec<_>, _>>()?;
        let timestamp = parse_timestamp(&record.timestamp).ok_or_else(|| {
            OperationError::InvalidData(format!("invalid timestamp '{}'", record.timestamp))
        })?;
        Ok(Self { history, timestamp })
    }

    /// Encode as a JSON document.
    pub fn to_json(&self) -> Result<String, OperationError> {
        serde_json::to_string(&self.to_record())
            .map_err(|e| OperationError::InvalidData(e.to_string()))
    }

    /// Decode a JSON document produced by [`CalculatorMemento::to_json`].
    pub fn from_json(json: &str) -> Result<Self, OperationError> {
        let record: MementoRecord =
            serde_json::from_str(json).map_err(|e| OperationError::InvalidData(e.to_string()))?;
        Self::from_record(&record)
    }
}
