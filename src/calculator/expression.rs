//! Scanning the total expression for binary operators.
//!
//! A character only separates two operands when it is an operator token that
//! is not a sign: a `-` at the start or right after another operator belongs
//! to the following number, and anything directly after a unary marker or a
//! scientific-notation `e` is part of the preceding operand.

use super::error::{CalcError, Result};
use super::operator::{Operator, UnaryOp};

/// Operator count that triggers an automatic evaluation.
pub const SIGNAL_THRESHOLD: usize = 2;

/// The pieces of a total expression holding exactly one separator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SplitExpression<'a> {
    pub left: &'a str,
    pub operator: Operator,
    pub right: &'a str,
}

/// Byte offsets and operators of every separating operator in `expr`.
pub fn separators(expr: &str) -> Vec<(usize, Operator)> {
    let mut found = Vec::new();
    let mut prev: Option<char> = None;

    for (idx, c) in expr.char_indices() {
        if let Some(op) = Operator::from_token(c)
            && is_separator(op, prev)
        {
            found.push((idx, op));
        }
        prev = Some(c);
    }

    found
}

fn is_separator(op: Operator, prev: Option<char>) -> bool {
    let Some(prev) = prev else {
        // Leading operator is a sign.
        return false;
    };

    if UnaryOp::is_marker(prev) || prev == 'e' || prev == 'E' {
        return false;
    }

    !(op == Operator::Sub && Operator::is_token(prev))
}

/// Check if `total` holds enough operators to auto-evaluate.
pub fn signal(total: &str) -> bool {
    separators(total).len() >= SIGNAL_THRESHOLD
}

/// Split off the trailing pending operator, if `total` ends in one.
pub fn pending_operator(total: &str) -> Option<(&str, Operator)> {
    let (idx, op) = separators(total).pop()?;
    (idx + 1 == total.len()).then(|| (&total[..idx], op))
}

/// Split an expression without trailing operator into `left op right`.
pub fn split(expr: &str) -> Result<SplitExpression<'_>> {
    match separators(expr).as_slice() {
        [(idx, op)] => Ok(SplitExpression {
            left: &expr[..*idx],
            operator: *op,
            right: &expr[idx + 1..],
        }),
        _ => Err(CalcError::InvalidOperatorCount),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signs_are_not_separators() {
        assert_eq!(separators("-5+"), vec![(2, Operator::Add)]);
        assert_eq!(
            separators("5*-3+"),
            vec![(1, Operator::Mul), (4, Operator::Add)]
        );
    }

    #[test]
    fn test_markers_and_exponent_bind_operators() {
        assert_eq!(separators("2^-3+"), vec![(4, Operator::Add)]);
        assert_eq!(separators("1.5e-7*"), vec![(6, Operator::Mul)]);
        assert_eq!(separators("√-4"), Vec::new());
    }

    #[test]
    fn test_signal_fires_on_second_operator() {
        assert!(!signal("5+"));
        assert!(signal("5+3*"));
        assert!(!signal("5*-"));
        assert!(signal("-5--3+"));
        assert!(!signal(""));
    }

    #[test]
    fn test_pending_operator() {
        assert_eq!(pending_operator("12+"), Some(("12", Operator::Add)));
        assert_eq!(pending_operator("12"), None);
        assert_eq!(pending_operator("-"), None);
    }

    #[test]
    fn test_split_on_single_separator() {
        let split = split("5*-3").unwrap();
        assert_eq!(split.left, "5");
        assert_eq!(split.operator, Operator::Mul);
        assert_eq!(split.right, "-3");
    }

    #[test]
    fn test_split_handles_multibyte_marker() {
        let split = split("2√16+3").unwrap();
        assert_eq!(split.left, "2√16");
        assert_eq!(split.right, "3");
    }

    #[test]
    fn test_split_rejects_wrong_operator_count() {
        assert_eq!(split("12"), Err(CalcError::InvalidOperatorCount));
        assert_eq!(split("1+2+3"), Err(CalcError::InvalidOperatorCount));
    }
}
