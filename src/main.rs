//! keycalc: a button-panel calculator driven from the terminal.

use anyhow::Result;
use clap::Parser;
use keycalc::config;
use keycalc::ui::{Session, run_interactive};
use std::io;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Keystroke calculator with a total and a current display line
#[derive(Parser, Debug)]
#[command(name = "keycalc")]
#[command(about = "Keystroke-driven calculator", long_about = None)]
#[command(version)]
struct Args {
    /// Run a single key script (e.g. "12+7*2=") and print the display
    #[arg(short, long, value_name = "SCRIPT")]
    keys: Option<String>,

    /// Print the display state as JSON
    #[arg(long)]
    json: bool,

    /// Copy the resulting value to the clipboard
    #[arg(long)]
    copy: bool,

    /// Path to configuration file (config.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbosity level (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(args.verbose);
    info!("keycalc v{}", keycalc::VERSION);

    let config = config::resolve(args.config.as_deref())?;
    let mut session = Session::new(&config, args.json);

    match &args.keys {
        Some(script) => {
            session.feed(script)?;
            println!("{}", session.render()?);
        }
        None => {
            let stdin = io::stdin();
            run_interactive(&mut session, stdin.lock(), io::stdout().lock())?;
        }
    }

    if args.copy {
        session.copy_current();
    }

    Ok(())
}

/// Initialize logging; `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
