//! Ordinal colour scales
//!
//! Keys are assigned colours in the order they are first seen, cycling through
//! the palette once it is exhausted.

/// Ten saturated colours, used for link categories
pub const CATEGORY10: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

/// Five hue groups of four shades, used for taxonomy arcs
pub const CATEGORY20C: [&str; 20] = [
    "#3182bd", "#6baed6", "#9ecae1", "#c6dbef", "#e6550d", "#fd8d3c", "#fdae6b", "#fdd0a2",
    "#31a354", "#74c476", "#a1d99b", "#c7e9c0", "#756bb1", "#9e9ac8", "#bcbddc", "#dadaeb",
    "#636363", "#969696", "#bdbdbd", "#d9d9d9",
];

/// Maps keys to palette colours by first appearance
#[derive(Debug, Clone)]
pub struct OrdinalScale {
    range: &'static [&'static str],
    domain: Vec<String>,
}

impl OrdinalScale {
    /// Scale over an arbitrary palette
    #[must_use]
    pub const fn new(range: &'static [&'static str]) -> Self {
        Self {
            range,
            domain: Vec::new(),
        }
    }

    /// Scale over [`CATEGORY10`]
    #[must_use]
    pub const fn category10() -> Self {
        Self::new(&CATEGORY10)
    }

    /// Scale over [`CATEGORY20C`]
    #[must_use]
    pub const fn category20c() -> Self {
        Self::new(&CATEGORY20C)
    }

    /// Colour for `key`, registering it if new
    pub fn color(&mut self, key: &str) -> &'static str {
        let slot = match self.domain.iter().position(|k| k == key) {
            Some(slot) => slot,
            None => {
                self.domain.push(key.to_string());
                self.domain.len() - 1
            }
        };
        self.range[slot % self.range.len()]
    }
}
