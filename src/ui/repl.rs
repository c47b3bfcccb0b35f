//! Line-oriented front end: each input line is a key script.

use super::render::{DisplayView, RenderOptions};
use crate::calculator::{ExpressionEngine, KeyEvent, copy_to_clipboard, parse_keys};
use crate::config::Config;
use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use tracing::{debug, warn};

/// An engine together with the front-end options applied around it.
pub struct Session {
    engine: ExpressionEngine,
    options: RenderOptions,
    copy_on_equals: bool,
}

impl Session {
    pub fn new(config: &Config, json: bool) -> Self {
        Self {
            engine: ExpressionEngine::with_limits(config.display.limits),
            options: RenderOptions {
                glyphs: config.display.glyphs,
                json,
            },
            copy_on_equals: config.clipboard.copy_on_equals,
        }
    }

    pub fn engine(&self) -> &ExpressionEngine {
        &self.engine
    }

    /// Parse and apply one key script.
    pub fn feed(&mut self, script: &str) -> Result<()> {
        let events = parse_keys(script).context("Invalid key script")?;
        debug!(count = events.len(), "applying key script");

        for event in &events {
            self.engine.apply(*event);
        }

        if self.copy_on_equals && events.contains(&KeyEvent::Equals) {
            self.copy_current();
        }
        Ok(())
    }

    pub fn view(&self) -> DisplayView {
        DisplayView::from_display_state(&self.engine.display_state(), self.options.glyphs)
    }

    pub fn render(&self) -> Result<String> {
        self.view().render(self.options)
    }

    /// Copy the active value. Clipboard failures are logged, not fatal.
    pub fn copy_current(&self) {
        let view = self.view();
        if let Err(err) = copy_to_clipboard(view.text_for_clipboard()) {
            warn!("{:#}", err);
        }
    }
}

/// Read key scripts from `input` until EOF or `quit`/`exit`.
pub fn run_interactive<R: BufRead, W: Write>(
    session: &mut Session,
    input: R,
    mut output: W,
) -> Result<()> {
    writeln!(output, "{}", session.render()?)?;

    for line in input.lines() {
        let line = line.context("Failed to read input")?;
        let line = line.trim();

        if matches!(line, "quit" | "exit") {
            break;
        }
        if line.is_empty() {
            continue;
        }

        if let Err(err) = session.feed(line) {
            writeln!(output, "{:#}", err)?;
            continue;
        }
        writeln!(output, "{}", session.render()?)?;
    }

    output.flush()?;
    Ok(())
}
