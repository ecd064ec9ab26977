//! Validation of raw user-supplied operands.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::config::CalculatorConfig;
use crate::errors::ValidationError;

/// Parse plain (`12.5`) or scientific (`1.25e1`) decimal notation.
pub(crate) fn parse_decimal(raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}

/// Turns raw operand text into decimals the calculator accepts.
pub struct InputValidator;

impl InputValidator {
    /// Parse `raw`, check its magnitude against `max_input_value`, and
    /// return it normalised (`2.50` becomes `2.5`).
    pub fn validate_number(raw: &str, config: &CalculatorConfig) -> Result<Decimal, ValidationError> {
        let value = parse_decimal(raw)
            .ok_or_else(|| ValidationError::InvalidNumber(raw.trim().to_string()))?;
        if value.abs() > config.max_input_value {
            return Err(ValidationError::ExceedsMaximum(
                config.max_input_value.to_string(),
            ));
        }
        Ok(value.normalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        Decimal::from_str_exact(s).unwrap()
    }

    #[test]
    fn parses_plain_and_scientific() {
        assert_eq!(parse_decimal("42"), Some(d("42")));
        assert_eq!(parse_decimal("  -3.75 "), Some(d("-3.75")));
        assert_eq!(parse_decimal("1.5e3"), Some(d("1500")));
        assert_eq!(parse_decimal("2e-2"), Some(d("0.02")));
    }

    #[test]
    fn rejects_non_numbers() {
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("abc"), None);
        assert_eq!(parse_decimal("1.2.3"), None);
        assert_eq!(parse_decimal("NaN"), None);
    }

    #[test]
    fn validate_normalises() {
        let config = CalculatorConfig::default();
        assert_eq!(
            InputValidator::validate_number("2.500", &config).unwrap().to_string(),
            "2.5"
        );
    }

    #[test]
    fn validate_invalid_format() {
        let config = CalculatorConfig::default();
        let err = InputValidator::validate_number("invalid", &config).unwrap_err();
        assert_eq!(err, ValidationError::InvalidNumber("invalid".into()));
        assert_eq!(err.to_string(), "Invalid number format: invalid");
    }

    #[test]
    fn validate_maximum() {
        let config = CalculatorConfig {
            max_input_value: d("100"),
            ..CalculatorConfig::default()
        };
        assert!(InputValidator::validate_number("100", &config).is_ok());
        assert!(InputValidator::validate_number("-100", &config).is_ok());
        let err = InputValidator::validate_number("100.01", &config).unwrap_err();
        assert_eq!(err.to_string(), "Value exceeds maximum allowed: 100");
    }
}
