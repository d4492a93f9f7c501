//! Config file resolution.

use std::path::PathBuf;

use anyhow::{Context, Result};

/// Resolves the config file path.
///
/// - If `file` is `Some`, returns it unchanged.
/// - If `dir` is `Some`, returns `{dir}/config.toml`.
/// - Otherwise returns `~/.config/seriesly/config.toml`.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined (when both
/// `file` and `dir` are `None`).
pub fn resolve_config_path(file: Option<&PathBuf>, dir: Option<&PathBuf>) -> Result<PathBuf> {
    if let Some(f) = file {
        return Ok(f.clone());
    }
    if let Some(d) = dir {
        return Ok(d.join("config.toml"));
    }

    let home = std::env::var("HOME").context("HOME environment variable is not set")?;
    Ok(PathBuf::from(home)
        .join(".config")
        .join("seriesly")
        .join("config.toml"))
}
