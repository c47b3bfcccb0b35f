//! Calculator core driven by discrete key events.
//!
//! This module provides functionality to:
//! - Accumulate typed operands and binary operators into display buffers
//! - Evaluate pending expressions, including power, root, factorial and abs
//! - Parse key scripts typed at the terminal into events
//! - Copy results to the clipboard

mod clipboard;
mod engine;
mod error;
mod evaluation;
mod expression;
mod keys;
mod number;
mod operand;
mod operator;

pub use clipboard::copy_to_clipboard;
pub use engine::{CalculatorState, DisplayLimits, DisplayState, ExpressionEngine};
pub use error::{CalcError, Result};
pub use evaluation::{SciPrecision, evaluate_expression, factorial, format_number};
pub use expression::{separators, signal};
pub use keys::{KeyParseError, parse_keys};
pub use number::Number;
pub use operand::{Operand, power, root};
pub use operator::{Digit, KeyEvent, Operator, UnaryOp};
