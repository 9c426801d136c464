//! CLI command implementations.

pub mod clear;
pub mod daemon;
pub mod dirs;

use std::path::Path;

use cachesweep::config::{default_config_path, BasePaths, RootsConfig};
use cachesweep::sweep::CacheSweeper;

use crate::error::CliError;

/// Application name used for platform base-path discovery.
const APP_NAME: &str = "cachesweep";

/// Build a sweeper from the given roots document, or the default path.
pub fn load_sweeper(config_path: Option<&Path>) -> Result<CacheSweeper, CliError> {
    let config = match config_path {
        Some(path) => RootsConfig::load_from(path)?,
        None => RootsConfig::load_from(&default_config_path())?,
    };
    Ok(CacheSweeper::new(config, BasePaths::discover(APP_NAME)))
}
