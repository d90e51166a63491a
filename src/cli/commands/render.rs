//! Render command handler
//!
//! Reads a relationship CSV, lays out its taxonomy and writes the six-panel
//! edge bundling diagram as SVG or HTML.

use edge_bundle::config::Config;
use edge_bundle::core::builder::DiagramData;
use edge_bundle::core::layout::{Partition, Weighting};
use edge_bundle::core::models::Category;
use edge_bundle::core::render::{DiagramContext, OutputFormat, RenderOptions};
use edge_bundle::{error, info, verbose};
use std::path::{Path, PathBuf};

/// Arguments of one render invocation
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderRequest<'a> {
    /// Input CSV; config `input` when absent
    pub input_file: Option<&'a Path>,
    /// Output path; derived from the input name when absent
    pub output: Option<&'a Path>,
    /// Output format name
    pub format: &'a str,
    /// Weighting override
    pub weighting: Option<&'a str>,
    /// Tension override
    pub tension: Option<f64>,
    /// Highlight override; an empty string disables highlighting
    pub highlight: Option<&'a str>,
}

/// Run the render command.
///
/// # Errors
/// Returns a `✗`-prefixed message when any step fails
pub fn run(request: &RenderRequest, config: &Config) -> Result<(), String> {
    let format = request
        .format
        .parse::<OutputFormat>()
        .map_err(|e| format!("✗ {e}. Use: svg or html"))?;
    let options = resolve_options(request, config)?;
    let input_file = super::resolve_input(request.input_file, config)?;

    let mut data = DiagramData::from_csv(&input_file).map_err(|e| {
        error!("Failed to load {}: {e}", input_file.display());
        format!("✗ Failed to load {}: {e}", input_file.display())
    })?;
    info!("Relationships loaded: {}", input_file.display());

    let partition = Partition::compute(&mut data.taxonomy, options.weighting);
    verbose!(
        "Laid out {} nodes over {} levels ({} weighting)",
        partition.len(),
        data.taxonomy.height(),
        options.weighting
    );

    let output_path = match request.output {
        Some(path) => path.to_path_buf(),
        None => default_output_path(&input_file, &config.paths.out_dir, format)?,
    };

    let title = input_file
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("diagram");
    let ctx = DiagramContext::new(&data, &partition, &options, title);
    format.writer().generate(&ctx, &output_path).map_err(|e| {
        error!("Writing {} failed: {e}", output_path.display());
        format!("✗ Failed to write {format} diagram: {e}")
    })?;

    println!("✓ Diagram generated: {}", output_path.display());
    info!("Diagram exported to: {}", output_path.display());
    print_summary(&data);
    Ok(())
}

/// Config diagram settings with the command-line overrides applied
fn resolve_options(request: &RenderRequest, config: &Config) -> Result<RenderOptions, String> {
    let mut options = config
        .diagram
        .to_render_options()
        .map_err(|e| format!("✗ Invalid diagram config: {e}"))?;

    if let Some(weighting) = request.weighting {
        options.weighting = weighting
            .parse::<Weighting>()
            .map_err(|e| format!("✗ {e}"))?;
    }
    if let Some(tension) = request.tension {
        if !(0.0..=1.0).contains(&tension) {
            return Err(format!("✗ Tension must be between 0 and 1, got {tension}"));
        }
        options.tension = tension;
    }
    if let Some(highlight) = request.highlight {
        options.highlight = (!highlight.is_empty()).then(|| highlight.to_string());
    }
    Ok(options)
}

/// `<out_dir>/<input stem>_bundle.<ext>`, creating `out_dir` if needed
fn default_output_path(
    input_file: &Path,
    out_dir: &str,
    format: OutputFormat,
) -> Result<PathBuf, String> {
    let out_dir = if out_dir.is_empty() {
        PathBuf::from(".")
    } else {
        PathBuf::from(out_dir)
    };
    std::fs::create_dir_all(&out_dir).map_err(|e| {
        format!(
            "✗ Failed to create output directory {}: {e}",
            out_dir.display()
        )
    })?;

    let stem = input_file
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("diagram");
    Ok(out_dir.join(format!("{stem}_bundle.{}", format.extension())))
}

fn print_summary(data: &DiagramData) {
    println!("\n=== Summary ===");
    println!("Nodes: {}", data.taxonomy.len() - 1);
    println!("Leaves: {}", data.taxonomy.leaf_count());
    println!("Links: {}", data.links.total());
    for category in Category::ALL {
        println!(
            "  {:<4} {}",
            category.legend_label(),
            data.links.get(category).len()
        );
    }
}
