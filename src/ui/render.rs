//! Terminal rendering of the calculator display.
//!
//! The engine keeps ASCII tokens in its buffers; this is where `*`, `/` and
//! `%` become `×`, `÷` and `mod` on the way to the screen.

use crate::calculator::{DisplayState, separators};
use anyhow::{Context, Result};
use serde::Serialize;

/// How the display is written out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderOptions {
    pub glyphs: bool,
    pub json: bool,
}

/// A display state prepared for output.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DisplayView {
    /// The pending expression, with glyphs when enabled.
    pub expression: String,
    /// The active line: operand, result or error message.
    pub display_result: String,
    pub is_error: bool,
}

impl DisplayView {
    pub fn from_display_state(state: &DisplayState, glyphs: bool) -> Self {
        let expression = if glyphs {
            with_glyphs(&state.total)
        } else {
            state.total.clone()
        };

        Self {
            expression,
            display_result: state.current.clone(),
            is_error: state.is_error,
        }
    }

    /// Text to copy to the clipboard.
    /// Errors are copied as their message, so the user can still paste it.
    pub fn text_for_clipboard(&self) -> &str {
        &self.display_result
    }

    /// Render as text or JSON, per `options`.
    pub fn render(&self, options: RenderOptions) -> Result<String> {
        if options.json {
            serde_json::to_string(self).context("Failed to serialize display state")
        } else {
            Ok(self.render_text())
        }
    }

    /// Two lines: the expression, then the active value.
    pub fn render_text(&self) -> String {
        let marker = if self.is_error { "!" } else { "=" };
        format!("{}\n{} {}", self.expression, marker, self.display_result)
    }
}

/// Swap the separating operator tokens for their display glyphs.
///
/// Signs are left alone; only operators that split two operands change.
pub fn with_glyphs(total: &str) -> String {
    let seps = separators(total);
    let mut out = String::with_capacity(total.len() + seps.len() * 4);
    let mut next = seps.iter().peekable();

    for (idx, c) in total.char_indices() {
        match next.peek() {
            Some((pos, op)) if *pos == idx => {
                let glyph = op.glyph();
                if glyph.len() > 1 {
                    out.push(' ');
                    out.push_str(glyph);
                    out.push(' ');
                } else {
                    out.push_str(glyph);
                }
                next.next();
            }
            _ => out.push(c),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(total: &str, current: &str, is_error: bool) -> DisplayState {
        DisplayState {
            total: total.to_string(),
            current: current.to_string(),
            is_error,
        }
    }

    #[test]
    fn test_glyph_substitution() {
        assert_eq!(with_glyphs("12*"), "12×");
        assert_eq!(with_glyphs("8/"), "8÷");
        assert_eq!(with_glyphs("17%"), "17 mod ");
        assert_eq!(with_glyphs("-5+"), "-5+");
        assert_eq!(with_glyphs(""), "");
    }

    #[test]
    fn test_glyphs_disabled() {
        let view = DisplayView::from_display_state(&state("6*", "2", false), false);
        assert_eq!(view.expression, "6*");
    }

    #[test]
    fn test_render_text() {
        let view = DisplayView::from_display_state(&state("6*", "2", false), true);
        assert_eq!(view.render_text(), "6×\n= 2");

        let view = DisplayView::from_display_state(
            &state("", "Error: Cannot divide by zero", true),
            true,
        );
        assert_eq!(view.render_text(), "\n! Error: Cannot divide by zero");
        assert_eq!(view.text_for_clipboard(), "Error: Cannot divide by zero");
    }

    #[test]
    fn test_render_json() {
        let view = DisplayView::from_display_state(&state("12+", "7", false), true);
        let json = view
            .render(RenderOptions {
                glyphs: true,
                json: true,
            })
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["expression"], "12+");
        assert_eq!(value["display_result"], "7");
        assert_eq!(value["is_error"], false);
    }
}
