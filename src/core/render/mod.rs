//! Diagram rendering
//!
//! Turns laid-out diagram data into an SVG document (optionally wrapped in an
//! HTML page). All drawing parameters travel in [`RenderOptions`]; nothing is
//! kept in global state.

pub mod formats;
pub mod geometry;
pub mod palette;

use crate::core::builder::DiagramData;
use crate::core::layout::{Partition, Weighting};
use crate::core::models::{Category, LinkBuckets, Taxonomy};
use std::collections::BTreeMap;
use std::error::Error;
use std::path::Path;

pub use formats::{HtmlWriter, OutputFormat, SvgWriter};
pub use geometry::RadiusScale;
pub use palette::OrdinalScale;

/// Drawing parameters
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Logical canvas width
    pub width: f64,
    /// Logical canvas height
    pub height: f64,
    /// Display scale applied to the canvas
    pub scale: f64,
    /// Bundle tension in `[0, 1]`
    pub tension: f64,
    /// Partition weighting
    pub weighting: Weighting,
    /// Path whose links are drawn highlighted
    pub highlight: Option<String>,
    /// Node names coloured as another name
    pub color_aliases: BTreeMap<String, String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
            scale: 0.5,
            tension: 0.85,
            weighting: Weighting::Label,
            highlight: Some("Spleen, Gr1".to_string()),
            color_aliases: BTreeMap::from([("Serum".to_string(), "CD11b".to_string())]),
        }
    }
}

impl RenderOptions {
    /// Radius scale for this canvas
    #[must_use]
    pub fn radius_scale(&self) -> RadiusScale {
        RadiusScale::for_height(self.height)
    }
}

/// Where and how one category's sub-plot is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Panel {
    /// Category shown in this panel
    pub category: Category,
    /// Column in sixths of the canvas width
    pub column: u32,
    /// Row in quarters of the canvas height
    pub row: u32,
    /// CSS class of the link paths
    pub link_class: &'static str,
}

/// Panels in drawing order: three columns, positive outcomes on top
pub const PANELS: [Panel; 6] = [
    Panel { category: Category::PlusPlus, column: 1, row: 1, link_class: "edge blue" },
    Panel { category: Category::PlusMinus, column: 1, row: 3, link_class: "edge" },
    Panel { category: Category::MinusPlus, column: 3, row: 1, link_class: "edge green" },
    Panel { category: Category::MinusMinus, column: 3, row: 3, link_class: "edge" },
    Panel { category: Category::UnknownPlus, column: 5, row: 1, link_class: "edge purple" },
    Panel { category: Category::UnknownMinus, column: 5, row: 3, link_class: "edge" },
];

impl Panel {
    /// Translation of the panel's centre on the logical canvas
    #[must_use]
    pub fn origin(&self, options: &RenderOptions) -> (f64, f64) {
        (
            f64::from(self.column) * options.width / 6.0,
            f64::from(self.row) * options.height / 4.0,
        )
    }
}

/// Data context for diagram rendering
#[derive(Debug, Clone, Copy)]
pub struct DiagramContext<'a> {
    /// Taxonomy the links point into
    pub taxonomy: &'a Taxonomy,
    /// Bucketed links
    pub links: &'a LinkBuckets,
    /// Layout of the taxonomy
    pub partition: &'a Partition,
    /// Drawing parameters
    pub options: &'a RenderOptions,
    /// Title for formats that show one
    pub title: &'a str,
}

impl<'a> DiagramContext<'a> {
    /// Create a new diagram context
    #[must_use]
    pub const fn new(
        data: &'a DiagramData,
        partition: &'a Partition,
        options: &'a RenderOptions,
        title: &'a str,
    ) -> Self {
        Self {
            taxonomy: &data.taxonomy,
            links: &data.links,
            partition,
            options,
            title,
        }
    }
}

/// Trait for diagram writers
pub trait DiagramWriter {
    /// Render the diagram and write it to a file
    ///
    /// # Errors
    /// Returns an error if rendering or file writing fails
    fn generate(&self, ctx: &DiagramContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let content = self.render(ctx)?;
        std::fs::write(output_path, content)?;
        Ok(())
    }

    /// Render the diagram as a string
    ///
    /// # Errors
    /// Returns an error if rendering fails
    fn render(&self, ctx: &DiagramContext) -> Result<String, Box<dyn Error>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panel_origins() {
        let options = RenderOptions::default();
        assert_eq!(PANELS[0].origin(&options), (200.0, 200.0));
        assert_eq!(PANELS[3].origin(&options), (600.0, 600.0));
        assert_eq!(PANELS[5].origin(&options), (1000.0, 600.0));
    }

    #[test]
    fn test_panels_cover_every_category_once() {
        let categories: Vec<_> = PANELS.iter().map(|p| p.category).collect();
        assert_eq!(categories, Category::ALL);
    }
}
