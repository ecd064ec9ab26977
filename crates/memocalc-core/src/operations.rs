//! The six arithmetic operations.
//!
//! `Operation` is a closed set: every kind maps to a pure function of two
//! decimal operands. Lookup by user-facing command name (`add`, `root`, ...)
//! goes through [`Operation::from_command`]; lookup by the canonical name
//! stored in history (`Addition`, `Root`, ...) goes through `FromStr`.

use std::fmt;
use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, MathematicalOps};

use crate::errors::OperationError;

/// Newton iterations applied on top of the `exp(ln(a) / n)` estimate for
/// integral root degrees.
const ROOT_REFINEMENT_STEPS: usize = 4;

/// Arithmetic operation kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Addition,
    Subtraction,
    Multiplication,
    Division,
    Power,
    Root,
}

impl Operation {
    /// Every operation, in command listing order.
    pub const ALL: [Operation; 6] = [
        Operation::Addition,
        Operation::Subtraction,
        Operation::Multiplication,
        Operation::Division,
        Operation::Power,
        Operation::Root,
    ];

    /// Canonical name, as rendered in history and persisted rows.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Addition => "Addition",
            Self::Subtraction => "Subtraction",
            Self::Multiplication => "Multiplication",
            Self::Division => "Division",
            Self::Power => "Power",
            Self::Root => "Root",
        }
    }

    /// Command name typed by the user to select this operation.
    #[must_use]
    pub fn command(self) -> &'static str {
        match self {
            Self::Addition => "add",
            Self::Subtraction => "subtract",
            Self::Multiplication => "multiply",
            Self::Division => "divide",
            Self::Power => "power",
            Self::Root => "root",
        }
    }

    /// Select an operation by command name (case-insensitive).
    pub fn from_command(command: &str) -> Result<Self, OperationError> {
        let wanted = command.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|op| op.command() == wanted)
            .ok_or_else(|| OperationError::UnknownOperation(command.to_string()))
    }

    /// Validate the operands and compute the result.
    pub fn apply(self, a: Decimal, b: Decimal) -> Result<Decimal, OperationError> {
        match self {
            Self::Addition => a
                .checked_add(b)
                .ok_or_else(|| overflow(self)),
            Self::Subtraction => a
                .checked_sub(b)
                .ok_or_else(|| overflow(self)),
            Self::Multiplication => a
                .checked_mul(b)
                .ok_or_else(|| overflow(self)),
            Self::Division => divide(a, b),
            Self::Power => power(a, b),
            Self::Root => root(a, b),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = OperationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.name() == s)
            .ok_or_else(|| OperationError::UnknownOperation(s.to_string()))
    }
}

fn overflow(op: Operation) -> OperationError {
    OperationError::Arithmetic(format!("{op} overflowed the decimal range"))
}

fn divide(a: Decimal, b: Decimal) -> Result<Decimal, OperationError> {
    if b.is_zero() {
        return Err(OperationError::DivisionByZero);
    }
    a.checked_div(b).ok_or_else(|| overflow(Operation::Division))
}

fn power(a: Decimal, b: Decimal) -> Result<Decimal, OperationError> {
    if b < Decimal::ZERO {
        return Err(OperationError::NegativeExponent);
    }

    if b.fract().is_zero() {
        return match b.to_u64() {
            Some(exp) => a.checked_powu(exp).ok_or_else(|| overflow(Operation::Power)),
            None => huge_integer_power(a, b),
        };
    }

    if a.is_zero() {
        return Ok(Decimal::ZERO);
    }
    if a < Decimal::ZERO {
        return Err(OperationError::Arithmetic(
            "fractional power of a negative number is not real".to_string(),
        ));
    }
    a.checked_powd(b).ok_or_else(|| overflow(Operation::Power))
}

/// `a^b` for an integral exponent beyond `u64`. Only bases whose powers stay
/// bounded have a representable result.
fn huge_integer_power(a: Decimal, b: Decimal) -> Result<Decimal, OperationError> {
    if a.is_zero() || a == Decimal::ONE {
        return Ok(a);
    }
    if a == Decimal::NEGATIVE_ONE {
        let even = (b % Decimal::TWO).is_zero();
        return Ok(if even { Decimal::ONE } else { Decimal::NEGATIVE_ONE });
    }
    if a.abs() < Decimal::ONE {
        return Ok(Decimal::ZERO);
    }
    Err(overflow(Operation::Power))
}

fn root(a: Decimal, b: Decimal) -> Result<Decimal, OperationError> {
    if a < Decimal::ZERO {
        return Err(OperationError::NegativeRoot);
    }
    if b.is_zero() {
        return Err(OperationError::ZeroRoot);
    }

    if a.is_zero() {
        if b > Decimal::ZERO {
            return Ok(Decimal::ZERO);
        }
        return Err(OperationError::Arithmetic(
            "zero has no root of negative degree".to_string(),
        ));
    }

    let index = Decimal::ONE
        .checked_div(b)
        .ok_or_else(|| overflow(Operation::Root))?;
    let estimate = a
        .checked_powd(index)
        .ok_or_else(|| overflow(Operation::Root))?;

    match b.to_u64() {
        Some(degree) if b.fract().is_zero() && degree > 1 => {
            Ok(refine_root(a, degree, estimate))
        }
        _ => Ok(estimate),
    }
}

/// Polish an n-th root estimate with Newton's method:
/// `x' = ((n - 1) * x + a / x^(n - 1)) / n`.
///
/// Returns the best value reached before any step would overflow.
fn refine_root(a: Decimal, degree: u64, estimate: Decimal) -> Decimal {
    let n = Decimal::from(degree);
    let n_minus_one = Decimal::from(degree - 1);

    let step = |x: Decimal| -> Option<Decimal> {
        let denom = x.checked_powu(degree - 1)?;
        let quotient = a.checked_div(denom)?;
        n_minus_one.checked_mul(x)?.checked_add(quotient)?.checked_div(n)
    };

    let mut x = estimate;
    for _ in 0..ROOT_REFINEMENT_STEPS {
        match step(x) {
            Some(next) if next == x => break,
            Some(next) if next > Decimal::ZERO => x = next,
            _ => break,
        }
    }
    x
}
