//! The keystroke-driven expression engine.
//!
//! [`ExpressionEngine`] owns a [`CalculatorState`] and mutates it in response
//! to discrete input events. The total line holds committed `operand operator`
//! pairs; the current line holds the operand being typed. As soon as the total
//! line collects a second binary operator the first one is evaluated, so at
//! rest there is never more than one pending operator.

use super::error::CalcError;
use super::evaluation::{
    CURRENT_WIDTH, SciPrecision, evaluate_expression, factorial, format_number,
};
use super::expression::{pending_operator, separators, signal, split};
use super::number::Number;
use super::operand::Operand;
use super::operator::{Digit, KeyEvent, Operator, UnaryOp};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// The two display buffers and the "just evaluated" flag.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CalculatorState {
    /// Committed `operand operator` pairs, e.g. `12+`.
    pub total: String,
    /// Operand being typed, a result, or an error marker.
    pub current: String,
    /// Set after an evaluation; the next digit starts a fresh operand.
    pub just_evaluated: bool,
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self {
            total: String::new(),
            current: "0".to_string(),
            just_evaluated: false,
        }
    }
}

/// Character budgets of the display lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplayLimits {
    /// Width of the current line; also caps digit entry.
    pub current_width: usize,
    pub total_width: usize,
    /// Width of the current line while it shows an error message.
    pub error_width: usize,
}

impl Default for DisplayLimits {
    fn default() -> Self {
        Self {
            current_width: CURRENT_WIDTH,
            total_width: 30,
            error_width: 80,
        }
    }
}

/// What the front end shows after each event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DisplayState {
    pub total: String,
    pub current: String,
    pub is_error: bool,
}

/// Event-driven calculator core.
#[derive(Clone, Debug, Default)]
pub struct ExpressionEngine {
    state: CalculatorState,
    limits: DisplayLimits,
    last_error: Option<CalcError>,
}

impl ExpressionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(limits: DisplayLimits) -> Self {
        Self {
            limits,
            ..Self::default()
        }
    }

    pub fn state(&self) -> &CalculatorState {
        &self.state
    }

    pub fn limits(&self) -> DisplayLimits {
        self.limits
    }

    /// The error currently on display, if any.
    pub fn last_error(&self) -> Option<CalcError> {
        self.last_error
    }

    /// Dispatch one input event.
    pub fn apply(&mut self, event: KeyEvent) {
        trace!(?event, "key event");
        match event {
            KeyEvent::Digit(d) => self.input_digit(d),
            KeyEvent::Decimal => self.input_decimal(),
            KeyEvent::Operator(op) => self.input_operator(op),
            KeyEvent::Special(op) => self.input_special(op),
            KeyEvent::Delete => self.delete(),
            KeyEvent::Clear => self.clear(),
            KeyEvent::Equals => self.equals(),
        }
    }

    pub fn input_digit(&mut self, digit: Digit) {
        let c = digit.as_char();

        if is_marker(&self.state.current) || self.state.just_evaluated {
            self.state.current = c.to_string();
            self.state.just_evaluated = false;
            self.last_error = None;
            return;
        }

        if self.state.current == "0" {
            self.state.current = c.to_string();
            return;
        }

        if self.at_capacity() {
            trace!(digit = %c, "current line full, digit dropped");
            return;
        }
        self.state.current.push(c);
    }

    pub fn input_decimal(&mut self) {
        let current = &self.state.current;
        if is_marker(current) {
            return;
        }

        if self.state.just_evaluated || current.is_empty() {
            self.state.current = "0.".to_string();
            self.state.just_evaluated = false;
            return;
        }

        if current.contains('.') || current.ends_with('-') || self.at_capacity() {
            return;
        }

        if ends_with_unary_marker(current) {
            self.state.current.push('0');
        }
        self.state.current.push('.');
    }

    /// Remove the last character of the current line. Markers are kept.
    pub fn delete(&mut self) {
        if is_marker(&self.state.current) {
            return;
        }

        self.state.current.pop();
        if self.state.current.is_empty() {
            self.state.current = "0".to_string();
        }
        self.state.just_evaluated = false;
    }

    pub fn clear(&mut self) {
        debug!("clear");
        self.state = CalculatorState::default();
        self.last_error = None;
    }

    pub fn input_operator(&mut self, op: Operator) {
        self.normalize_current();

        if is_marker(&self.state.current) {
            // Only a minus leaves an error, starting a negative number.
            if op == Operator::Sub {
                self.state.current = "-".to_string();
                self.state.just_evaluated = false;
                self.last_error = None;
            }
            return;
        }

        // A lone zero never becomes an operand; with an operator pending it
        // means the user is swapping that operator.
        let no_operand = self.state.current.is_empty() || self.state.current == "0";

        if no_operand && op == Operator::Sub {
            self.state.current = "-".to_string();
            self.state.just_evaluated = false;
            return;
        }

        if no_operand && self.state.total.is_empty() {
            self.state.total = format!("0{}", op);
            self.state.current.clear();
            return;
        }

        // A sign still waiting for its digits.
        if self.state.current.ends_with('-') {
            return;
        }

        if ends_with_unary_marker(&self.state.current) {
            if op == Operator::Sub {
                if !self.at_capacity() {
                    self.state.current.push('-');
                }
                return;
            }
            self.state.current.push('0');
        }

        let pending = pending_operator(&self.state.total).map(|(head, _)| head.to_string());
        match pending {
            Some(head) if no_operand || self.state.just_evaluated => {
                debug!(total = %self.state.total, %op, "replacing pending operator");
                self.state.total = format!("{}{}", head, op);
                if no_operand {
                    self.state.current.clear();
                }
                return;
            }
            _ => {}
        }

        let operand = std::mem::take(&mut self.state.current);
        self.state.total.push_str(&operand);
        self.state.total.push(op.token());
        self.state.just_evaluated = false;
        trace!(total = %self.state.total, "operator committed");

        if signal(&self.state.total) {
            self.auto_evaluate();
        }
    }

    pub fn input_special(&mut self, op: UnaryOp) {
        match op {
            UnaryOp::Power | UnaryOp::Root => self.insert_unary_marker(op),
            UnaryOp::Factorial => self.handle_factorial(),
            UnaryOp::AbsoluteValue => self.handle_absolute_value(),
        }
    }

    pub fn handle_factorial(&mut self) {
        self.apply_unary(UnaryOp::Factorial);
    }

    pub fn handle_absolute_value(&mut self) {
        self.apply_unary(UnaryOp::AbsoluteValue);
    }

    /// Modulo is binary and is entered like any other operator.
    pub fn handle_modulo(&mut self) {
        self.input_operator(Operator::Mod);
    }

    pub fn equals(&mut self) {
        if is_marker(&self.state.current) {
            return;
        }
        self.normalize_current();

        if self.state.total.is_empty() {
            self.resolve_current();
            return;
        }

        let Some((left, op)) = pending_operator(&self.state.total)
            .map(|(left, op)| (left.to_string(), op))
        else {
            self.fail(CalcError::InvalidOperatorCount);
            return;
        };
        if !separators(&left).is_empty() {
            self.fail(CalcError::InvalidOperatorCount);
            return;
        }

        let right = if self.state.current.is_empty() {
            "0"
        } else {
            self.state.current.as_str()
        };

        match evaluate_expression(&left, op, right) {
            Ok(value) => self.commit(format_number(value, SciPrecision::Full), None),
            Err(err) => self.fail(err),
        }
    }

    /// The display lines, clipped to their budgets.
    pub fn display_state(&self) -> DisplayState {
        let is_error = self.last_error.is_some();
        let current = if self.state.current.is_empty() {
            "0".to_string()
        } else if is_error {
            clip(&self.state.current, self.limits.error_width)
        } else {
            clip(&self.state.current, self.limits.current_width)
        };

        DisplayState {
            total: clip(&self.state.total, self.limits.total_width),
            current,
            is_error,
        }
    }

    /// Evaluate the first of two pending operators, keeping the second.
    fn auto_evaluate(&mut self) {
        let Some((expr, trailing)) = pending_operator(&self.state.total) else {
            self.fail(CalcError::InvalidOperatorCount);
            return;
        };

        let outcome = split(expr)
            .and_then(|parts| evaluate_expression(parts.left, parts.operator, parts.right));
        match outcome {
            Ok(value) => self.commit(format_number(value, SciPrecision::Full), Some(trailing)),
            Err(err) => self.fail(err),
        }
    }

    /// `=` with nothing pending: resolve a power or root on its own.
    fn resolve_current(&mut self) {
        let current = &self.state.current;
        if !current.contains([UnaryOp::POWER_MARKER, UnaryOp::ROOT_MARKER]) {
            if Number::parse(current).is_ok() {
                self.state.just_evaluated = true;
            }
            return;
        }

        match Operand::parse(current).and_then(Operand::resolve) {
            Ok(value) => self.commit(format_number(value, SciPrecision::Short), None),
            Err(err) => self.fail(err),
        }
    }

    fn insert_unary_marker(&mut self, op: UnaryOp) {
        let Some(marker) = op.marker() else {
            return;
        };
        let current = &self.state.current;

        if is_marker(current)
            || current.contains([UnaryOp::POWER_MARKER, UnaryOp::ROOT_MARKER])
            || current.ends_with('.')
            || current.ends_with('-')
        {
            return;
        }

        if current.is_empty() || (current == "0" && self.state.total.is_empty()) {
            // Without an index the root is a square root; a power needs a base.
            self.state.current = match op {
                UnaryOp::Root => marker.to_string(),
                _ => format!("0{}", marker),
            };
            return;
        }

        if self.at_capacity() {
            return;
        }
        self.state.current.push(marker);
        self.state.just_evaluated = false;
    }

    fn apply_unary(&mut self, op: UnaryOp) {
        if is_marker(&self.state.current) {
            return;
        }
        if !self.state.total.is_empty() {
            self.fail(CalcError::PendingExpressionNotEmpty);
            return;
        }

        let text = if self.state.current.is_empty() {
            "0"
        } else {
            self.state.current.as_str()
        };

        let outcome = Operand::parse(text).and_then(|operand| {
            let value = operand.resolve()?;
            match op {
                UnaryOp::Factorial => Ok((factorial(value)?, SciPrecision::Short)),
                _ if operand.is_compound() => Ok((value.abs(), SciPrecision::Short)),
                _ => Ok((value.abs(), SciPrecision::Full)),
            }
        });

        match outcome {
            Ok((value, precision)) => {
                debug!(?op, ?value, "applied unary operation");
                self.commit(format_number(value, precision), None);
            }
            Err(err) => self.fail(err),
        }
    }

    /// Tidy the operand before it is committed or evaluated.
    fn normalize_current(&mut self) {
        let current = &mut self.state.current;
        if is_marker(current) {
            return;
        }

        if current.ends_with('.') {
            current.pop();
        }
        if current.ends_with(['e', 'E']) {
            current.push('0');
        }

        if current.contains([UnaryOp::POWER_MARKER, UnaryOp::ROOT_MARKER]) {
            return;
        }
        if let Some((integer, fraction)) = current.split_once('.')
            && fraction.chars().all(|c| c == '0')
            && let Ok(value) = integer.parse::<i128>()
        {
            *current = value.to_string();
        }
    }

    /// Write a result; `trailing` keeps a pending operator on the total line.
    fn commit(&mut self, text: String, trailing: Option<Operator>) {
        debug!(result = %text, ?trailing, "evaluation result");

        self.state.total = match trailing {
            Some(op) if !is_marker(&text) => format!("{}{}", text, op),
            _ => String::new(),
        };
        self.state.current = text;
        self.state.just_evaluated = true;
    }

    fn fail(&mut self, err: CalcError) {
        debug!(error = %err, "evaluation failed");
        self.state.total.clear();
        self.state.current = err.display_message();
        self.state.just_evaluated = false;
        self.last_error = Some(err);
    }

    fn at_capacity(&self) -> bool {
        self.state.current.chars().count() >= self.limits.current_width
    }
}

/// Check if the text is an error or non-finite marker rather than a number.
fn is_marker(text: &str) -> bool {
    text.starts_with("Error") || text.contains("inf") || text.contains("nan")
}

fn ends_with_unary_marker(text: &str) -> bool {
    text.chars().last().is_some_and(UnaryOp::is_marker)
}

fn clip(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}
