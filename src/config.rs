//! Configuration loading for the terminal front end.
//!
//! Every field has a default, so a missing file or a partial file is fine.

use crate::calculator::DisplayLimits;
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub display: DisplayConfig,
    pub clipboard: ClipboardConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplayConfig {
    #[serde(flatten)]
    pub limits: DisplayLimits,
    /// Render `×`, `÷` and `mod` instead of the ASCII tokens.
    pub glyphs: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            limits: DisplayLimits::default(),
            glyphs: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ClipboardConfig {
    pub copy_on_equals: bool,
}

impl Config {
    fn validate(&self) -> Result<()> {
        let limits = &self.display.limits;
        for (name, width) in [
            ("current_width", limits.current_width),
            ("total_width", limits.total_width),
            ("error_width", limits.error_width),
        ] {
            if width == 0 {
                bail!("display.{} must be at least 1", name);
            }
        }
        Ok(())
    }
}

/// `<config_dir>/keycalc/config.toml`, if the platform has a config dir.
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("keycalc").join("config.toml"))
}

/// Load configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    config
        .validate()
        .with_context(|| format!("Invalid config file: {:?}", path))?;

    debug!(?path, ?config, "loaded config");
    Ok(config)
}

/// Load the explicit path, else the default location, else defaults.
///
/// An explicit path must exist; the default location is optional.
pub fn resolve(explicit: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        return load_config(path);
    }

    match default_path() {
        Some(path) if path.exists() => load_config(&path),
        _ => Ok(Config::default()),
    }
}
