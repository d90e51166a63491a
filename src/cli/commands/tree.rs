//! Tree command handler

use edge_bundle::config::Config;
use edge_bundle::core::builder::DiagramData;
use edge_bundle::{error, info};
use std::path::Path;

/// Print the taxonomy of a relationship CSV with aggregated label weights.
///
/// # Errors
/// Returns a `✗`-prefixed message when the input cannot be loaded
pub fn run(input_file: Option<&Path>, config: &Config) -> Result<(), String> {
    let input_file = super::resolve_input(input_file, config)?;
    let mut data = DiagramData::from_csv(&input_file).map_err(|e| {
        error!("Failed to load {}: {e}", input_file.display());
        format!("✗ Failed to load {}: {e}", input_file.display())
    })?;
    info!("Relationships loaded: {}", input_file.display());

    let root = data.taxonomy.root();
    data.taxonomy.value(root);
    print!("{}", data.taxonomy);
    Ok(())
}
