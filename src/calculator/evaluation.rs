//! Numeric core and result formatting.
//!
//! Takes the raw text of two sides and an operator, resolves any pending
//! power or root on each side, applies the operator and renders the value
//! back into the fixed or scientific string written to the display buffers.

use super::error::{CalcError, Result};
use super::number::Number;
use super::operand::Operand;
use super::operator::Operator;
use tracing::debug;

/// Character budget of the active display line.
pub const CURRENT_WIDTH: usize = 16;

/// Values at or beyond this magnitude are shown in scientific notation.
const FIXED_LIMIT: f64 = 1e16;

/// Largest accepted factorial operand.
pub const FACTORIAL_LIMIT: i128 = 100;

/// Mantissa precision for scientific notation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SciPrecision {
    /// Ten fractional digits with trailing zeros trimmed (binary operations).
    Full,
    /// Five fractional digits, kept as-is (power, root, factorial shown alone).
    Short,
}

/// Evaluate `left op right` where each side may carry a power or root.
pub fn evaluate_expression(left: &str, op: Operator, right: &str) -> Result<Number> {
    let lhs = Operand::parse(left)?.resolve()?;
    let rhs = Operand::parse(right)?.resolve()?;

    let result = match op {
        Operator::Add => lhs.add(rhs),
        Operator::Sub => lhs.sub(rhs),
        Operator::Mul => lhs.mul(rhs),
        Operator::Div => lhs.div(rhs)?,
        Operator::Mod => lhs.rem(rhs)?,
    };

    debug!(left, %op, right, ?result, "evaluated expression");
    Ok(result)
}

/// Factorial of a non-negative integer no larger than [`FACTORIAL_LIMIT`].
///
/// Exact while the product fits in an `i128`, floating point after that.
pub fn factorial(value: Number) -> Result<Number> {
    let n = match value {
        Number::Int(n) if n >= 0 => n,
        _ => return Err(CalcError::FactorialDomainError),
    };
    if n > FACTORIAL_LIMIT {
        return Err(CalcError::FactorialOverflow);
    }

    let mut result = Number::Int(1);
    for k in 2..=n {
        result = result.mul(Number::Int(k));
    }
    Ok(result)
}

/// Format a value for the active display line.
pub fn format_number(value: Number, precision: SciPrecision) -> String {
    match value {
        Number::Int(n) if (n as f64).abs() < FIXED_LIMIT => n.to_string(),
        Number::Int(n) => format_scientific(n as f64, precision),
        Number::Float(f) => format_float(f, precision),
    }
}

fn format_float(value: f64, precision: SciPrecision) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        let msg = if value.is_sign_positive() { "inf" } else { "-inf" };
        return msg.to_string();
    }
    if value.abs() >= FIXED_LIMIT {
        return format_scientific(value, precision);
    }

    if value == 0.0 {
        return "0".to_string();
    }

    let rendered = format!("{}", value);
    if rendered.len() <= CURRENT_WIDTH {
        return rendered;
    }

    // Round to whatever the integer part leaves of the width budget.
    let integer_len = format_integral(value.trunc()).len();
    if integer_len >= CURRENT_WIDTH {
        format_integral(value.round())
    } else {
        let decimals = CURRENT_WIDTH - integer_len;
        trim_fraction(&format!("{:.*}", decimals, value))
    }
}

/// Render an integral float without a fractional part or negative zero.
fn format_integral(value: f64) -> String {
    let text = format!("{:.0}", value);
    if text == "-0" { "0".to_string() } else { text }
}

fn format_scientific(value: f64, precision: SciPrecision) -> String {
    match precision {
        SciPrecision::Short => format!("{:.5e}", value),
        SciPrecision::Full => {
            let formatted = format!("{:.10e}", value);
            match formatted.split_once('e') {
                Some((mantissa, exponent)) => {
                    format!("{}e{}", trim_fraction(mantissa), exponent)
                }
                None => formatted,
            }
        }
    }
}

/// Drop trailing zeros after a decimal point, and the point itself if bare.
fn trim_fraction(text: &str) -> String {
    if !text.contains('.') {
        return text.to_string();
    }
    let trimmed = text.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_evaluation() {
        let result = evaluate_expression("12", Operator::Add, "7").unwrap();
        assert_eq!(format_number(result, SciPrecision::Full), "19");
    }

    #[test]
    fn test_sides_resolve_power_and_root() {
        let result = evaluate_expression("2^3", Operator::Mul, "2√16").unwrap();
        assert_eq!(result, Number::Int(32));
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(
            evaluate_expression("5", Operator::Div, "0"),
            Err(CalcError::DivideByZero)
        );
        assert_eq!(
            evaluate_expression("5", Operator::Mod, "0.0"),
            Err(CalcError::ModuloByZero)
        );
    }

    #[test]
    fn test_invalid_side() {
        assert_eq!(
            evaluate_expression("5", Operator::Add, "-"),
            Err(CalcError::InvalidNumberFormat)
        );
    }

    #[test]
    fn test_float_noise_is_rounded_away() {
        let result = evaluate_expression("0.1", Operator::Add, "0.2").unwrap();
        assert_eq!(format_number(result, SciPrecision::Full), "0.3");
    }

    #[test]
    fn test_long_decimal_rounds_to_budget() {
        let result = evaluate_expression("1000000", Operator::Div, "7").unwrap();
        // 142857.14285714287 has six integer digits, leaving ten decimals.
        assert_eq!(format_number(result, SciPrecision::Full), "142857.1428571429");
    }

    #[test]
    fn test_short_results_are_kept_as_is() {
        let result = evaluate_expression("0.00000000001", Operator::Add, "0").unwrap();
        assert_eq!(format_number(result, SciPrecision::Full), "0.00000000001");

        let result = evaluate_expression("7.00000000005", Operator::Add, "0").unwrap();
        assert_eq!(format_number(result, SciPrecision::Full), "7.00000000005");

        assert_eq!(
            format_number(Number::Float(4.99999999999999), SciPrecision::Full),
            "4.99999999999999"
        );
        assert_eq!(format_number(Number::Float(-0.0), SciPrecision::Full), "0");
    }

    #[test]
    fn test_scientific_notation() {
        assert_eq!(format_number(Number::Float(1e20), SciPrecision::Full), "1e20");
        assert_eq!(
            format_number(Number::Float(1.2345e20), SciPrecision::Full),
            "1.2345e20"
        );
        assert_eq!(
            format_number(Number::Int(2_432_902_008_176_640_000), SciPrecision::Short),
            "2.43290e18"
        );
    }

    #[test]
    fn test_integers_below_limit_stay_plain() {
        assert_eq!(
            format_number(Number::Int(6_402_373_705_728_000), SciPrecision::Short),
            "6402373705728000"
        );
    }

    #[test]
    fn test_non_finite_markers() {
        assert_eq!(format_number(Number::Float(f64::INFINITY), SciPrecision::Full), "inf");
        assert_eq!(
            format_number(Number::Float(f64::NEG_INFINITY), SciPrecision::Full),
            "-inf"
        );
        assert_eq!(format_number(Number::Float(f64::NAN), SciPrecision::Full), "nan");
    }

    #[test]
    fn test_factorial_bounds() {
        assert_eq!(factorial(Number::Int(5)), Ok(Number::Int(120)));
        assert_eq!(factorial(Number::Int(0)), Ok(Number::Int(1)));
        assert_eq!(factorial(Number::Int(101)), Err(CalcError::FactorialOverflow));
        assert_eq!(factorial(Number::Int(-1)), Err(CalcError::FactorialDomainError));
        assert_eq!(
            factorial(Number::Float(4.5)),
            Err(CalcError::FactorialDomainError)
        );
    }

    #[test]
    fn test_large_factorial_formats_short() {
        let result = factorial(Number::Int(100)).unwrap();
        assert_eq!(format_number(result, SciPrecision::Short), "9.33262e157");
    }
}
