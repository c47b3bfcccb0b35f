//! Key scripts for the terminal front end.
//!
//! Turns a line such as `12 + 7 × 2 =` or `5 fact` into the key events a
//! button panel would have produced. Display glyphs (`×`, `÷`, `√`, `⌫`) are
//! accepted so that anything the renderer prints can be typed back in.

use super::operator::{Digit, KeyEvent, Operator, UnaryOp};
use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

lazy_static! {
    /// One key token at the start of the remaining input.
    /// Words come first so that `mod` is not read as something shorter.
    static ref KEY_TOKEN: Regex = Regex::new(
        r"^(?i:mod|abs|pow|root|sqrt|fact|del|clear|\|x\|)|^[0-9.+\-*/%×÷^√!=<⌫cC]"
    ).unwrap();
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyParseError {
    #[error("unrecognized key {found:?} at offset {offset}")]
    UnknownKey { found: String, offset: usize },
}

/// Parse a key script into events.
///
/// Whitespace separates nothing and is skipped; every other character must
/// belong to a key token.
pub fn parse_keys(input: &str) -> Result<Vec<KeyEvent>, KeyParseError> {
    let mut events = Vec::new();
    let mut offset = 0;

    while offset < input.len() {
        let rest = &input[offset..];

        let trimmed = rest.trim_start();
        if trimmed.len() != rest.len() {
            offset += rest.len() - trimmed.len();
            continue;
        }

        let Some(token) = KEY_TOKEN.find(rest) else {
            let found = rest.chars().next().map(String::from).unwrap_or_default();
            return Err(KeyParseError::UnknownKey { found, offset });
        };

        if let Some(event) = key_event(token.as_str()) {
            events.push(event);
        }
        offset += token.end();
    }

    Ok(events)
}

/// Map one matched token to its event.
fn key_event(token: &str) -> Option<KeyEvent> {
    let event = match token.to_ascii_lowercase().as_str() {
        "mod" => KeyEvent::Operator(Operator::Mod),
        "abs" | "|x|" => KeyEvent::Special(UnaryOp::AbsoluteValue),
        "pow" | "^" => KeyEvent::Special(UnaryOp::Power),
        "root" | "sqrt" | "√" => KeyEvent::Special(UnaryOp::Root),
        "fact" | "!" => KeyEvent::Special(UnaryOp::Factorial),
        "del" | "<" | "⌫" => KeyEvent::Delete,
        "clear" | "c" => KeyEvent::Clear,
        "=" => KeyEvent::Equals,
        "." => KeyEvent::Decimal,
        "×" => KeyEvent::Operator(Operator::Mul),
        "÷" => KeyEvent::Operator(Operator::Div),
        other => {
            let c = other.chars().next()?;
            if let Some(digit) = Digit::from_char(c) {
                KeyEvent::Digit(digit)
            } else {
                KeyEvent::Operator(Operator::from_token(c)?)
            }
        }
    };
    Some(event)
}
