//! Hierarchical bundle routing: each link follows the tree through the least
//! common ancestor of its endpoints.

use crate::core::models::{LinkRecord, NodeId, Taxonomy};

/// Least common ancestor of two nodes
#[must_use]
pub fn least_common_ancestor(taxonomy: &Taxonomy, a: NodeId, b: NodeId) -> NodeId {
    let (mut a, mut b) = (a, b);
    while taxonomy.node(a).depth() > taxonomy.node(b).depth() {
        a = parent_of(taxonomy, a);
    }
    while taxonomy.node(b).depth() > taxonomy.node(a).depth() {
        b = parent_of(taxonomy, b);
    }
    while a != b {
        a = parent_of(taxonomy, a);
        b = parent_of(taxonomy, b);
    }
    a
}

fn parent_of(taxonomy: &Taxonomy, id: NodeId) -> NodeId {
    // Only the root lacks a parent, and the root is never climbed past
    taxonomy.node(id).parent().unwrap_or(id)
}

/// Node sequence for a link: source, up to the common ancestor, down to target
///
/// A self-link yields a single node.
#[must_use]
pub fn bundle_path(taxonomy: &Taxonomy, link: LinkRecord) -> Vec<NodeId> {
    let lca = least_common_ancestor(taxonomy, link.source, link.target);

    let mut path = vec![link.source];
    if link.source != lca {
        path.extend(taxonomy.ancestors(link.source).take_while(|&n| n != lca));
        path.push(lca);
    }

    let mut descent: Vec<NodeId> = Vec::new();
    let mut current = link.target;
    while current != lca {
        descent.push(current);
        current = parent_of(taxonomy, current);
    }
    path.extend(descent.into_iter().rev());
    path
}

/// Bundle paths for a sequence of links, in order
#[must_use]
pub fn bundle(taxonomy: &Taxonomy, links: &[LinkRecord]) -> Vec<Vec<NodeId>> {
    links
        .iter()
        .map(|&link| bundle_path(taxonomy, link))
        .collect()
}
