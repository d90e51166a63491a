//! Builds the taxonomy and category buckets from parsed rows

use crate::core::models::{Category, LinkBuckets, LinkRecord, Taxonomy};
use crate::core::parser::{parse_relations_csv, unescape, RelationRow};
use crate::debug;
use std::error::Error;
use std::path::Path;

/// Everything a diagram is drawn from
#[derive(Debug, Clone, Default)]
pub struct DiagramData {
    /// Trie of every path seen in a kept row
    pub taxonomy: Taxonomy,
    /// Links bucketed by category
    pub links: LinkBuckets,
}

impl DiagramData {
    /// Read a relationship CSV and build the diagram data from it
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let rows = parse_relations_csv(&path)?;
        debug!(
            "Parsed {} rows from {}",
            rows.len(),
            path.as_ref().display()
        );
        Ok(build_diagram(&rows))
    }
}

/// Resolve every row's paths into one shared taxonomy and bucket the links
///
/// Rows whose `uninfected` + `infected` code is not one of the six categories
/// are skipped before their paths are resolved, so they contribute no nodes.
#[must_use]
pub fn build_diagram(rows: &[RelationRow]) -> DiagramData {
    let mut data = DiagramData::default();
    let root = data.taxonomy.root();

    for row in rows {
        let Some(category) = Category::from_columns(&row.uninfected, &row.infected) else {
            continue;
        };
        let source = data.taxonomy.get_or_add_path(root, &unescape(&row.source));
        let target = data.taxonomy.get_or_add_path(root, &unescape(&row.target));
        data.links.push(category, LinkRecord { source, target });
    }

    data
}
