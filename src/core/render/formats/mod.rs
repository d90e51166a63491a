//! Output format implementations
//!
//! Provides writers for the supported output formats: SVG and HTML.

pub mod html;
pub mod svg;

pub use html::HtmlWriter;
pub use svg::SvgWriter;

use super::DiagramWriter;
use std::fmt;
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Standalone SVG document
    #[default]
    Svg,
    /// HTML page embedding the SVG
    Html,
}

impl OutputFormat {
    /// Get the file extension for this format
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Html => "html",
        }
    }

    /// Writer for this format
    #[must_use]
    pub fn writer(&self) -> Box<dyn DiagramWriter> {
        match self {
            Self::Svg => Box::new(SvgWriter::new()),
            Self::Html => Box::new(HtmlWriter::new()),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "html" | "htm" => Ok(Self::Html),
            _ => Err(format!("Unknown output format: {s}")),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Svg => write!(f, "svg"),
            Self::Html => write!(f, "html"),
        }
    }
}
