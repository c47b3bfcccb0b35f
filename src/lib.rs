//! Keystroke-driven calculator engine.
//!
//! The [`calculator`] module holds the engine itself; [`ui`] and [`config`]
//! make up the terminal front end built on top of it.

pub mod calculator;
pub mod config;
pub mod ui;

pub use calculator::{DisplayState, ExpressionEngine, KeyEvent};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
