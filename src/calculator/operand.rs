//! Tagged form of one side of an expression.
//!
//! The buffers keep power and root as raw text (`5^3`, `3√27`) for display;
//! evaluation parses each side into an [`Operand`] and resolves it here.

use super::error::{CalcError, Result};
use super::number::Number;
use super::operator::UnaryOp;
use tracing::trace;

/// Distance from an integer below which a root result snaps to it.
const ROOT_SNAP_EPSILON: f64 = 1e-10;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Operand {
    Plain(Number),
    Power { base: Number, exponent: Number },
    /// A missing index means square root.
    Root { index: Option<Number>, radicand: Number },
}

impl Operand {
    /// Parse the raw text of one side.
    ///
    /// An empty right-hand side of a marker counts as `0`, which is what the
    /// engine inserts for a dangling `^` or `√`.
    pub fn parse(text: &str) -> Result<Self> {
        if let Some((base, exponent)) = text.split_once(UnaryOp::POWER_MARKER) {
            return Ok(Self::Power {
                base: Number::parse(base)?,
                exponent: parse_marker_operand(exponent)?,
            });
        }

        if let Some((index, radicand)) = text.split_once(UnaryOp::ROOT_MARKER) {
            let index = if index.is_empty() {
                None
            } else {
                Some(Number::parse(index)?)
            };
            return Ok(Self::Root {
                index,
                radicand: parse_marker_operand(radicand)?,
            });
        }

        Number::parse(text).map(Self::Plain)
    }

    /// Check if the operand still carries a power or root.
    pub fn is_compound(&self) -> bool {
        !matches!(self, Self::Plain(_))
    }

    /// Apply the pending power or root, if any.
    pub fn resolve(self) -> Result<Number> {
        match self {
            Self::Plain(value) => Ok(value),
            Self::Power { base, exponent } => power(base, exponent),
            Self::Root { index, radicand } => root(index.unwrap_or(Number::Int(2)), radicand),
        }
    }
}

fn parse_marker_operand(text: &str) -> Result<Number> {
    if text.is_empty() {
        Ok(Number::Int(0))
    } else {
        Number::parse(text)
    }
}

/// `base^exponent` for a non-negative integer exponent.
pub fn power(base: Number, exponent: Number) -> Result<Number> {
    let exponent = match exponent {
        Number::Int(value) if value >= 0 => value,
        _ => return Err(CalcError::InvalidExponent),
    };

    if base.is_zero() && exponent == 0 {
        return Err(CalcError::UndefinedResult);
    }

    let result = match base {
        Number::Int(value) => u32::try_from(exponent)
            .ok()
            .and_then(|exp| value.checked_pow(exp))
            .map_or_else(
                || Number::Float((value as f64).powf(exponent as f64)),
                Number::Int,
            ),
        Number::Float(value) => Number::Float(value.powf(exponent as f64)),
    };

    trace!(?base, %exponent, ?result, "resolved power");
    Ok(result)
}

/// Real `index`-th root of `radicand`.
pub fn root(index: Number, radicand: Number) -> Result<Number> {
    let index = match index {
        Number::Int(value) if value > 0 => value,
        _ => return Err(CalcError::InvalidRootIndex),
    };

    if radicand.is_negative() {
        return Err(CalcError::NegativeRadicand);
    }

    let x = radicand.as_f64();
    let value = match index {
        1 => x,
        2 => x.sqrt(),
        3 => x.cbrt(),
        n => x.powf(1.0 / n as f64),
    };

    let rounded = value.round();
    let result = if (value - rounded).abs() < ROOT_SNAP_EPSILON && rounded.abs() < i128::MAX as f64
    {
        Number::Int(rounded as i128)
    } else {
        Number::Float(value)
    };

    trace!(%index, ?radicand, ?result, "resolved root");
    Ok(result)
}
