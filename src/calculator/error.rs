//! Error taxonomy for the expression engine.
//!
//! Every variant is recoverable: the engine turns it into an
//! `"Error: <message>"` display and waits for a digit, a minus or a clear.

use thiserror::Error;

/// Result type for calculator operations.
pub type Result<T> = std::result::Result<T, CalcError>;

/// Conditions raised while evaluating user input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum CalcError {
    #[error("Cannot divide by zero")]
    DivideByZero,

    #[error("Cannot perform modulo operation with zero")]
    ModuloByZero,

    /// Negative or non-integer exponent.
    #[error("Exponent must be a non-negative integer")]
    InvalidExponent,

    /// `0^0`.
    #[error("0^0 is undefined")]
    UndefinedResult,

    /// Non-positive or non-integer root index.
    #[error("Root index must be a positive integer")]
    InvalidRootIndex,

    #[error("Cannot take the root of a negative number")]
    NegativeRadicand,

    /// Negative or non-integer factorial operand.
    #[error("Factorial is only defined for non-negative integers")]
    FactorialDomainError,

    /// Factorial operand above 100.
    #[error("Factorial of numbers greater than 100 is too large")]
    FactorialOverflow,

    /// A unary operation was requested while a binary expression is pending.
    #[error("The total expression is not empty. Clear it first!")]
    PendingExpressionNotEmpty,

    /// The total expression did not split on exactly one operator.
    #[error("Invalid number of operators")]
    InvalidOperatorCount,

    /// A side could not be read as a number after unary resolution.
    #[error("Invalid number format")]
    InvalidNumberFormat,
}

impl CalcError {
    /// Text written to the active display line.
    pub fn display_message(&self) -> String {
        format!("Error: {}", self)
    }
}
