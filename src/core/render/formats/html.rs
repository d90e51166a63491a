//! HTML page writer
//!
//! Wraps the SVG document in a self-contained page with a title and a small
//! table of link counts per category.

use crate::core::render::formats::svg::SvgWriter;
use crate::core::render::{DiagramContext, DiagramWriter};
use askama::Template;
use std::error::Error;

/// Askama template for the page
#[derive(Template)]
#[template(path = "chart.html")]
struct ChartPage<'a> {
    title: &'a str,
    svg: &'a str,
    link_count: usize,
    node_count: usize,
    category_counts: Vec<(String, usize)>,
}

/// HTML diagram writer
pub struct HtmlWriter;

impl HtmlWriter {
    /// Create a new HTML writer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for HtmlWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagramWriter for HtmlWriter {
    fn render(&self, ctx: &DiagramContext) -> Result<String, Box<dyn Error>> {
        let svg = SvgWriter::render_document(ctx);
        let page = ChartPage {
            title: ctx.title,
            svg: &svg,
            link_count: ctx.links.total(),
            node_count: ctx.taxonomy.len(),
            category_counts: ctx
                .links
                .iter()
                .map(|(category, links)| (category.legend_label(), links.len()))
                .collect(),
        };
        Ok(page.render()?)
    }
}
