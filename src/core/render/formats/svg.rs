//! SVG diagram writer
//!
//! Produces a standalone SVG document: six radial panels, one per link
//! category, each showing the taxonomy as concentric arcs with the category's
//! links bundled over it, plus a legend across the middle of the canvas.

use crate::core::layout::{bundle, Cell};
use crate::core::models::{Category, NodeId};
use crate::core::render::geometry::{arc_path, bundle_line, fmt_num, label_rotation, polar};
use crate::core::render::palette::OrdinalScale;
use crate::core::render::{DiagramContext, DiagramWriter, Panel, RadiusScale, PANELS};
use std::error::Error;
use std::fmt::Write;

/// Styles embedded in every document
const STYLESHEET: &str = include_str!("../../../../templates/diagram.css");

/// Horizontal spacing between legend entries
const LEGEND_SPACING: f64 = 50.0;

/// SVG diagram writer
pub struct SvgWriter;

impl SvgWriter {
    /// Create a new SVG writer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Render the full SVG document
    #[must_use]
    pub fn render_document(ctx: &DiagramContext) -> String {
        let options = ctx.options;
        let mut node_colors = OrdinalScale::category20c();
        let mut link_colors = OrdinalScale::category10();
        for category in Category::ALL {
            link_colors.color(category.code());
        }

        let mut svg = String::new();
        let _ = writeln!(
            svg,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\" viewBox=\"0 0 {} {}\">",
            fmt_num(options.width * options.scale),
            fmt_num(options.height * options.scale),
            fmt_num(options.width),
            fmt_num(options.height)
        );
        let _ = writeln!(svg, "<style>\n{STYLESHEET}</style>");

        for panel in &PANELS {
            Self::write_panel(&mut svg, ctx, panel, &mut node_colors, &mut link_colors);
        }
        Self::write_legend(&mut svg, ctx, &mut link_colors);

        svg.push_str("</svg>\n");
        svg
    }

    fn write_panel(
        svg: &mut String,
        ctx: &DiagramContext,
        panel: &Panel,
        node_colors: &mut OrdinalScale,
        link_colors: &mut OrdinalScale,
    ) {
        let options = ctx.options;
        let radius = options.radius_scale();
        let (tx, ty) = panel.origin(options);
        let code = panel.category.code();

        let _ = writeln!(
            svg,
            "  <g class=\"panel\" data-category=\"{}\" transform=\"translate({}, {})\">",
            escape_xml(code),
            fmt_num(tx),
            fmt_num(ty)
        );

        for cell in ctx.partition.cells() {
            Self::write_node(svg, ctx, cell, radius, node_colors);
        }

        let highlight = options.highlight.as_deref();
        for route in bundle(ctx.taxonomy, ctx.links.get(panel.category)) {
            let points: Vec<_> = route
                .iter()
                .map(|&id| {
                    let cell = ctx.partition.get(id);
                    polar(radius.apply(cell.y), cell.mid_angle())
                })
                .collect();
            let highlighted = highlight.is_some_and(|path| {
                let touches = |id: Option<&NodeId>| {
                    id.is_some_and(|&id| ctx.taxonomy.ends_with_path(id, path))
                };
                touches(route.first()) || touches(route.last())
            });
            let (class, stroke) = if highlighted {
                (format!("{} hi", panel.link_class), "black")
            } else {
                (panel.link_class.to_string(), link_colors.color(code))
            };
            let _ = writeln!(
                svg,
                "    <path class=\"{class}\" d=\"{}\" style=\"stroke: {stroke}\"/>",
                bundle_line(&points, options.tension)
            );
        }

        svg.push_str("  </g>\n");
    }

    fn write_node(
        svg: &mut String,
        ctx: &DiagramContext,
        cell: &Cell,
        radius: RadiusScale,
        node_colors: &mut OrdinalScale,
    ) {
        let node = ctx.taxonomy.node(cell.id);
        let color_key = ctx
            .options
            .color_aliases
            .get(&node.name)
            .unwrap_or(&node.name);
        let fill = node_colors.color(color_key);
        let inner = radius.apply(cell.y);
        let outer = radius.apply(cell.y + cell.dy);
        let display = if cell.depth == 0 {
            " display=\"none\""
        } else {
            ""
        };

        let _ = writeln!(svg, "    <g{display}>");
        let _ = writeln!(
            svg,
            "      <path class=\"arc\" d=\"{}\" style=\"fill: {fill}; stroke-width: 1\"/>",
            arc_path(cell.x, cell.x + cell.dx, inner, outer)
        );
        let _ = writeln!(
            svg,
            "      <text transform=\"rotate({})\" x=\"{}\" dx=\".15em\" dy=\".35em\" class=\"arclabel\">{}</text>",
            fmt_num(label_rotation(cell.mid_angle())),
            fmt_num(inner),
            escape_xml(&node.name)
        );
        svg.push_str("    </g>\n");
    }

    fn write_legend(svg: &mut String, ctx: &DiagramContext, link_colors: &mut OrdinalScale) {
        let options = ctx.options;
        let y = options.height / 2.0 + 5.0;
        for (i, category) in Category::ALL.into_iter().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let x = (i as f64 - 2.0).mul_add(LEGEND_SPACING, options.width / 2.0);
            let _ = writeln!(
                svg,
                "  <text x=\"{}\" y=\"{}\" class=\"legendtext\" style=\"fill: {}\">{}</text>",
                fmt_num(x),
                fmt_num(y),
                link_colors.color(category.code()),
                escape_xml(&category.legend_label())
            );
        }
    }
}

impl Default for SvgWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagramWriter for SvgWriter {
    fn render(&self, ctx: &DiagramContext) -> Result<String, Box<dyn Error>> {
        Ok(Self::render_document(ctx))
    }
}

/// Escape text for use in SVG/XML content and attributes
#[must_use]
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("CD4+ & <T>"), "CD4+ &amp; &lt;T&gt;");
        assert_eq!(escape_xml("\"a'"), "&quot;a&apos;");
    }
}
