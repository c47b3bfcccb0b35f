//! Operator vocabulary shared by the engine, the key parser and the renderer.

use serde::Serialize;
use std::fmt;

/// Binary operators that separate the operands of the total expression.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

impl Operator {
    /// All binary operators, in button order.
    pub const ALL: [Operator; 5] = [
        Operator::Add,
        Operator::Sub,
        Operator::Mul,
        Operator::Div,
        Operator::Mod,
    ];

    /// Canonical ASCII token stored in the expression buffers.
    pub fn token(self) -> char {
        match self {
            Self::Add => '+',
            Self::Sub => '-',
            Self::Mul => '*',
            Self::Div => '/',
            Self::Mod => '%',
        }
    }

    /// Glyph shown to the user.
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "×",
            Self::Div => "÷",
            Self::Mod => "mod",
        }
    }

    /// Look up an operator by its ASCII token.
    pub fn from_token(c: char) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.token() == c)
    }

    /// Check if a character is one of the binary operator tokens.
    pub fn is_token(c: char) -> bool {
        Self::from_token(c).is_some()
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

/// Operations bound to the special buttons.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum UnaryOp {
    /// `a^b`, completed by typing the exponent after the marker.
    Power,
    /// `n√x`, completed by typing the radicand after the marker.
    Root,
    Factorial,
    AbsoluteValue,
}

impl UnaryOp {
    pub const POWER_MARKER: char = '^';
    pub const ROOT_MARKER: char = '√';

    /// Marker character embedded in the operand, for the two-sided operations.
    pub fn marker(self) -> Option<char> {
        match self {
            Self::Power => Some(Self::POWER_MARKER),
            Self::Root => Some(Self::ROOT_MARKER),
            Self::Factorial | Self::AbsoluteValue => None,
        }
    }

    /// Check if a character is a unary marker.
    pub fn is_marker(c: char) -> bool {
        c == Self::POWER_MARKER || c == Self::ROOT_MARKER
    }
}

/// A single decimal digit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Digit(u8);

impl Digit {
    /// Create a digit, returning `None` outside `0..=9`.
    pub fn new(value: u8) -> Option<Self> {
        (value <= 9).then_some(Self(value))
    }

    /// Create a digit from its ASCII character.
    pub fn from_char(c: char) -> Option<Self> {
        c.to_digit(10).map(|d| Self(d as u8))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn as_char(self) -> char {
        char::from(b'0' + self.0)
    }
}

/// One discrete input event delivered by the front end.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum KeyEvent {
    Digit(Digit),
    Decimal,
    Operator(Operator),
    Special(UnaryOp),
    Delete,
    Clear,
    Equals,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_tokens_round_trip() {
        for op in Operator::ALL {
            assert_eq!(Operator::from_token(op.token()), Some(op));
        }
        assert_eq!(Operator::from_token('^'), None);
    }

    #[test]
    fn test_modulo_glyph() {
        assert_eq!(Operator::Mod.glyph(), "mod");
        assert_eq!(Operator::Mod.token(), '%');
    }

    #[test]
    fn test_digit_bounds() {
        assert!(Digit::new(9).is_some());
        assert!(Digit::new(10).is_none());
        assert_eq!(Digit::from_char('7').map(Digit::value), Some(7));
        assert_eq!(Digit::new(3).map(Digit::as_char), Some('3'));
        assert!(Digit::from_char('x').is_none());
    }

    #[test]
    fn test_markers() {
        assert_eq!(UnaryOp::Power.marker(), Some('^'));
        assert_eq!(UnaryOp::Factorial.marker(), None);
        assert!(UnaryOp::is_marker('√'));
        assert!(!UnaryOp::is_marker('-'));
    }
}
