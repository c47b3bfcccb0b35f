//! Numeric values flowing through evaluation.
//!
//! Integers stay exact while they fit in an `i128`; anything with a decimal
//! point or exponent, and any integer operation that overflows, moves to `f64`.

use super::error::{CalcError, Result};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    Int(i128),
    Float(f64),
}

impl Number {
    /// Parse one operand. Text with `.`, `e` or `E` is floating point.
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();
        if text.is_empty() {
            return Err(CalcError::InvalidNumberFormat);
        }

        let is_float = text.contains(['.', 'e', 'E']);
        if !is_float && let Ok(value) = text.parse::<i128>() {
            return Ok(Self::Int(value));
        }

        text.parse::<f64>()
            .map(Self::Float)
            .map_err(|_| CalcError::InvalidNumberFormat)
    }

    pub fn as_f64(self) -> f64 {
        match self {
            Self::Int(value) => value as f64,
            Self::Float(value) => value,
        }
    }

    pub fn is_zero(self) -> bool {
        match self {
            Self::Int(value) => value == 0,
            Self::Float(value) => value == 0.0,
        }
    }

    pub fn is_negative(self) -> bool {
        match self {
            Self::Int(value) => value < 0,
            Self::Float(value) => value < 0.0,
        }
    }

    pub fn is_finite(self) -> bool {
        match self {
            Self::Int(_) => true,
            Self::Float(value) => value.is_finite(),
        }
    }

    /// Integer view, only for values that were integers to begin with.
    pub fn as_int(self) -> Option<i128> {
        match self {
            Self::Int(value) => Some(value),
            Self::Float(_) => None,
        }
    }

    pub fn add(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Self::Int(a), Self::Int(b)) => a
                .checked_add(b)
                .map_or_else(|| Self::Float(a as f64 + b as f64), Self::Int),
            (a, b) => Self::Float(a.as_f64() + b.as_f64()),
        }
    }

    pub fn sub(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Self::Int(a), Self::Int(b)) => a
                .checked_sub(b)
                .map_or_else(|| Self::Float(a as f64 - b as f64), Self::Int),
            (a, b) => Self::Float(a.as_f64() - b.as_f64()),
        }
    }

    pub fn mul(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Self::Int(a), Self::Int(b)) => a
                .checked_mul(b)
                .map_or_else(|| Self::Float(a as f64 * b as f64), Self::Int),
            (a, b) => Self::Float(a.as_f64() * b.as_f64()),
        }
    }

    /// Division; an exact quotient comes back as an integer.
    pub fn div(self, rhs: Self) -> Result<Self> {
        if rhs.is_zero() {
            return Err(CalcError::DivideByZero);
        }

        if let (Self::Int(a), Self::Int(b)) = (self, rhs) {
            if let Some(0) = a.checked_rem(b)
                && let Some(quotient) = a.checked_div(b)
            {
                return Ok(Self::Int(quotient));
            }
            return Ok(Self::Float(a as f64 / b as f64));
        }

        let (a, b) = (self.as_f64(), rhs.as_f64());
        let quotient = a / b;
        if a % b == 0.0 && quotient.is_finite() && quotient.abs() < i128::MAX as f64 {
            return Ok(Self::Int(quotient as i128));
        }
        Ok(Self::Float(quotient))
    }

    /// Truncated remainder: the result takes the sign of the dividend.
    pub fn rem(self, rhs: Self) -> Result<Self> {
        if rhs.is_zero() {
            return Err(CalcError::ModuloByZero);
        }

        match (self, rhs) {
            (Self::Int(a), Self::Int(b)) => Ok(a
                .checked_rem(b)
                .map_or(Self::Int(0), Self::Int)),
            (a, b) => Ok(Self::Float(a.as_f64() % b.as_f64())),
        }
    }

    pub fn abs(self) -> Self {
        match self {
            Self::Int(value) => value
                .checked_abs()
                .map_or_else(|| Self::Float((value as f64).abs()), Self::Int),
            Self::Float(value) => Self::Float(value.abs()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kinds() {
        assert_eq!(Number::parse("42"), Ok(Number::Int(42)));
        assert_eq!(Number::parse("-7"), Ok(Number::Int(-7)));
        assert_eq!(Number::parse("2.5"), Ok(Number::Float(2.5)));
        assert_eq!(Number::parse("1.5e20"), Ok(Number::Float(1.5e20)));
        assert_eq!(Number::parse("5."), Ok(Number::Float(5.0)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(Number::parse(""), Err(CalcError::InvalidNumberFormat));
        assert_eq!(Number::parse("-"), Err(CalcError::InvalidNumberFormat));
        assert_eq!(Number::parse("5^2"), Err(CalcError::InvalidNumberFormat));
    }

    #[test]
    fn test_integer_overflow_falls_back_to_float() {
        let big = Number::Int(i128::MAX);
        assert!(matches!(big.add(Number::Int(1)), Number::Float(_)));
        assert!(matches!(big.mul(Number::Int(2)), Number::Float(_)));
    }

    #[test]
    fn test_exact_division_stays_integer() {
        assert_eq!(Number::Int(12).div(Number::Int(4)), Ok(Number::Int(3)));
        assert_eq!(Number::Float(7.5).div(Number::Float(2.5)), Ok(Number::Int(3)));
        assert_eq!(Number::Int(1).div(Number::Int(4)), Ok(Number::Float(0.25)));
    }

    #[test]
    fn test_zero_divisors() {
        assert_eq!(
            Number::Int(5).div(Number::Float(0.0)),
            Err(CalcError::DivideByZero)
        );
        assert_eq!(
            Number::Int(5).rem(Number::Int(0)),
            Err(CalcError::ModuloByZero)
        );
    }

    #[test]
    fn test_remainder_follows_dividend_sign() {
        assert_eq!(Number::Int(-7).rem(Number::Int(3)), Ok(Number::Int(-1)));
        assert_eq!(Number::Int(7).rem(Number::Int(-3)), Ok(Number::Int(1)));
        assert_eq!(Number::Float(5.5).rem(Number::Int(2)), Ok(Number::Float(1.5)));
    }
}
