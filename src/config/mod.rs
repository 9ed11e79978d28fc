//! Configuration loading
//!
//! Layers, lowest to highest precedence: built-in defaults, a TOML file,
//! `LANGSNIFF_*` environment variables, then CLI overrides (see [`merge`]).

use crate::domain::Config;
use anyhow::{Context, Result};
use figment::providers::{Env, Format, Toml};
use figment::Figment;
use std::path::{Path, PathBuf};

pub mod merge;

pub use merge::{merge_cli_with_config, CliOverrides};

/// Config file names looked up in the anchor directory, in order.
pub const CONFIG_FILE_NAMES: &[&str] = &["langsniff.toml", ".langsniff.toml"];

/// Prefix for environment overrides (`LANGSNIFF_PROFILE=compact`).
pub const ENV_PREFIX: &str = "LANGSNIFF_";

/// Load configuration from `explicit`, or from the first config file found
/// in `anchor`, layered under environment overrides.
pub fn load_config(anchor: &Path, explicit: Option<&Path>) -> Result<Config> {
    // Field defaults come from serde; seeding the figment with them would
    // make the `language`/`extension_map` aliases collide with the real keys.
    let mut figment = Figment::new();

    match resolve_config_path(anchor, explicit)? {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config file");
            figment = figment.merge(Toml::file(&path));
        }
        None => tracing::debug!(anchor = %anchor.display(), "no config file found"),
    }

    figment
        .merge(Env::prefixed(ENV_PREFIX))
        .extract()
        .context("Failed to load langsniff configuration")
}

fn resolve_config_path(anchor: &Path, explicit: Option<&Path>) -> Result<Option<PathBuf>> {
    if let Some(path) = explicit {
        if !path.is_file() {
            anyhow::bail!("Config file not found: {}", path.display());
        }
        return Ok(Some(path.to_path_buf()));
    }
    Ok(CONFIG_FILE_NAMES.iter().map(|name| anchor.join(name)).find(|p| p.is_file()))
}
