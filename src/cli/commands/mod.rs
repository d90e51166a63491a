//! CLI command handlers for `edgebundle`.
//!
//! Each subcommand is implemented in its own submodule.

pub mod config;
pub mod render;
pub mod tree;

use edge_bundle::config::Config;
use std::path::{Path, PathBuf};

/// Input file from the command line, falling back to the configured default
pub fn resolve_input(input_file: Option<&Path>, config: &Config) -> Result<PathBuf, String> {
    match input_file {
        Some(path) => Ok(path.to_path_buf()),
        None if !config.paths.input.is_empty() => Ok(PathBuf::from(&config.paths.input)),
        None => Err("✗ No input file given and config `input` is empty".to_string()),
    }
}
