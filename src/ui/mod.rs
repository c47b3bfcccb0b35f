pub mod render;
pub mod repl;

pub use render::{DisplayView, RenderOptions, with_glyphs};
pub use repl::{Session, run_interactive};
