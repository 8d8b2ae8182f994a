pub mod config;
pub mod geometry;
pub mod score;
pub mod watch;

use std::path::Path;

use anyhow::{Context, Result};
use cardcheck_core::config::CardCheckConfig;

/// Load the config file if one was given, otherwise the defaults.
pub fn load_config(path: Option<&Path>) -> Result<CardCheckConfig> {
    match path {
        Some(p) => CardCheckConfig::load(p)
            .with_context(|| format!("Failed to load config from {}", p.display())),
        None => Ok(CardCheckConfig::default()),
    }
}
