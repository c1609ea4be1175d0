// Path: crates/cli/src/util.rs

use anyhow::{Context, Result};
use dpos_types::config::DposConfig;
use std::fs;
use std::path::Path;

/// Loads an engine configuration, or the defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<DposConfig> {
    let Some(path) = path else {
        return Ok(DposConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("failed to parse config {}", path.display()))
}

/// Decodes hex with or without a `0x` prefix.
pub fn decode_hex(input: &str) -> Result<Vec<u8>> {
    let trimmed = input.trim();
    let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    hex::decode(digits).context("input is not valid hex")
}
