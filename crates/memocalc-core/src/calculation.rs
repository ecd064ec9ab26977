//! A single recorded calculation and its serialized record form.

use std::fmt;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::constants::TIMESTAMP_FORMAT;
use crate::errors::OperationError;
use crate::input::parse_decimal;
use crate::operations::Operation;

/// Text form of a calculation: five logical fields, all strings.
///
/// This is the row exchanged with the persistence collaborator and the
/// element type of a serialized memento.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationRecord {
    pub operation: String,
    pub operand1: String,
    pub operand2: String,
    pub result: String,
    pub timestamp: String,
}

/// An immutable calculation: operands, operation, result and creation time.
///
/// The result is computed once at construction. Equality compares every
/// field, timestamp included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Calculation {
    operation: Operation,
    operand1: Decimal,
    operand2: Decimal,
    result: Decimal,
    timestamp: NaiveDateTime,
}

impl Calculation {
    /// Compute `operation(operand1, operand2)` stamped with the current time.
    pub fn new(
        operation: Operation,
        operand1: Decimal,
        operand2: Decimal,
    ) -> Result<Self, OperationError> {
        Self::at(operation, operand1, operand2, Local::now().naive_local())
    }

    /// Compute `operation(operand1, operand2)` with an explicit timestamp.
    pub fn at(
        operation: Operation,
        operand1: Decimal,
        operand2: Decimal,
        timestamp: NaiveDateTime,
    ) -> Result<Self, OperationError> {
        let result = operation.apply(operand1, operand2)?;
        Ok(Self {
            operation,
            operand1,
            operand2,
            result,
            timestamp,
        })
    }

    /// Build a calculation from a canonical operation name such as `"Addition"`.
    pub fn from_name(
        name: &str,
        operand1: Decimal,
        operand2: Decimal,
    ) -> Result<Self, OperationError> {
        Self::new(name.parse()?, operand1, operand2)
    }

    #[must_use]
    pub fn operation(&self) -> Operation {
        self.operation
    }

    #[must_use]
    pub fn operand1(&self) -> Decimal {
        self.operand1
    }

    #[must_use]
    pub fn operand2(&self) -> Decimal {
        self.operand2
    }

    #[must_use]
    pub fn result(&self) -> Decimal {
        self.result
    }

    #[must_use]
    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    /// Render the result rounded to `precision` decimal places, without
    /// trailing zeros.
    #[must_use]
    pub fn format_result(&self, precision: u32) -> String {
        self.result.round_dp(precision).normalize().to_string()
    }

    /// Exact text form: decimals as decimal strings, timestamp as ISO-8601.
    #[must_use]
    pub fn to_record(&self) -> CalculationRecord {
        CalculationRecord {
            operation: self.operation.name().to_string(),
            operand1: self.operand1.to_string(),
            operand2: self.operand2.to_string(),
            result: self.result.to_string(),
            timestamp: format_timestamp(self.timestamp),
        }
    }

    /// Rebuild a calculation from its record.
    ///
    /// The result is recomputed from the operation and operands; a stored
    /// result that disagrees is logged and replaced.
    pub fn from_record(record: &CalculationRecord) -> Result<Self, OperationError> {
        let operand1 = parse_field("operand1", &record.operand1)?;
        let operand2 = parse_field("operand2", &record.operand2)?;
        let stored_result = parse_field("result", &record.result)?;
        let timestamp = parse_timestamp(&record.timestamp).ok_or_else(|| {
            OperationError::InvalidData(format!("invalid timestamp '{}'", record.timestamp))
        })?;

        let operation: Operation = record.operation.parse()?;
        let calc = Self::at(operation, operand1, operand2, timestamp)?;
        if calc.result != stored_result {
            warn!(
                stored = %stored_result,
                computed = %calc.result,
                "Loaded calculation result differs from computed result"
            );
        }
        Ok(calc)
    }

    /// Untyped form, one JSON object with the five record keys.
    #[must_use]
    pub fn to_value(&self) -> serde_json::Value {
        let record = self.to_record();
        serde_json::json!({
            "operation": record.operation,
            "operand1": record.operand1,
            "operand2": record.operand2,
            "result": record.result,
            "timestamp": record.timestamp,
        })
    }

    /// Parse the untyped form; a missing or mistyped key is invalid data.
    pub fn from_value(value: &serde_json::Value) -> Result<Self, OperationError> {
        let record: CalculationRecord = serde_json::from_value(value.clone())
            .map_err(|e| OperationError::InvalidData(e.to_string()))?;
        Self::from_record(&record)
    }
}

impl fmt::Display for Calculation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({}, {}) = {}",
            self.operation, self.operand1, self.operand2, self.result
        )
    }
}

fn parse_field(field: &str, raw: &str) -> Result<Decimal, OperationError> {
    parse_decimal(raw)
        .ok_or_else(|| OperationError::InvalidData(format!("{field} is not a decimal: '{raw}'")))
}

/// Render a timestamp as ISO-8601 (`2024-01-01T12:00:00.123456`).
#[must_use]
pub fn format_timestamp(ts: NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Parse an ISO-8601 date or date-time. An offset, if present, is dropped
/// after converting to the wall time it denotes.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(ts) = NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT) {
        return Some(ts);
    }
    if let Ok(ts) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(ts);
    }
    if let Ok(ts) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M") {
        return Some(ts);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.naive_local());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN))
}
