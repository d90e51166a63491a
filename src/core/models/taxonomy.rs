//! Name trie built from comma-space delimited taxonomy paths

use std::collections::HashMap;
use std::fmt;

/// Separator between path segments, e.g. `"Spleen, Gr1"`
pub const PATH_SEPARATOR: &str = ", ";

/// Name given to the root of every taxonomy
pub const ROOT_NAME: &str = "root";

/// Index of a node inside a [`Taxonomy`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in the taxonomy's arena
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// A single named level of the taxonomy
#[derive(Debug, Clone)]
pub struct TrieNode {
    /// Segment name
    pub name: String,
    /// Children in first-insertion order
    children: Vec<NodeId>,
    /// Name -> child lookup, kept in step with `children`
    child_index: HashMap<String, NodeId>,
    /// Parent node (`None` only for the root)
    parent: Option<NodeId>,
    /// Distance from the root
    depth: usize,
    /// Memoized aggregate weight
    value: Option<usize>,
}

impl TrieNode {
    fn new(name: String, parent: Option<NodeId>, depth: usize) -> Self {
        Self {
            name,
            children: Vec::new(),
            child_index: HashMap::new(),
            parent,
            depth,
            value: None,
        }
    }

    /// Children in the order they were first inserted
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Parent node, `None` for the root
    #[must_use]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Distance from the root (root is 0)
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Memoized aggregate, if it has been computed
    #[must_use]
    pub const fn cached_value(&self) -> Option<usize> {
        self.value
    }

    /// Whether the node has no children
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Label length used for sizing
    fn name_len(&self) -> usize {
        self.name.chars().count()
    }
}

/// Arena-backed trie of taxonomy paths rooted at a node named `"root"`
///
/// Nodes are only ever appended, so a [`NodeId`] stays valid for the life of
/// the taxonomy. Sibling names are unique.
#[derive(Debug, Clone)]
pub struct Taxonomy {
    nodes: Vec<TrieNode>,
}

impl Taxonomy {
    /// Create a taxonomy holding only the root node
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![TrieNode::new(ROOT_NAME.to_string(), None, 0)],
        }
    }

    /// The root node id
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Borrow a node
    ///
    /// # Panics
    /// Panics if `id` was not produced by this taxonomy
    #[must_use]
    pub fn node(&self, id: NodeId) -> &TrieNode {
        &self.nodes[id.0]
    }

    /// Total number of nodes, root included
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when only the root exists
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// All node ids in creation order
    pub fn ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId)
    }

    /// Number of nodes without children
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    /// Height of the tree counted in levels (a lone root has height 1)
    #[must_use]
    pub fn height(&self) -> usize {
        self.nodes.iter().map(|n| n.depth).max().unwrap_or(0) + 1
    }

    /// Find the child of `parent` named `name`, creating it if absent
    pub fn get_or_add_child(&mut self, parent: NodeId, name: &str) -> NodeId {
        if let Some(&existing) = self.nodes[parent.0].child_index.get(name) {
            return existing;
        }
        let id = NodeId(self.nodes.len());
        let depth = self.nodes[parent.0].depth + 1;
        self.nodes
            .push(TrieNode::new(name.to_string(), Some(parent), depth));
        let parent_node = &mut self.nodes[parent.0];
        parent_node.children.push(id);
        parent_node.child_index.insert(name.to_string(), id);
        id
    }

    /// Walk `path` from `start`, creating missing segments, and return the node reached
    ///
    /// An empty path resolves to `start` itself.
    pub fn get_or_add_path(&mut self, start: NodeId, path: &str) -> NodeId {
        if path.is_empty() {
            return start;
        }
        path.split(PATH_SEPARATOR)
            .fold(start, |node, segment| self.get_or_add_child(node, segment))
    }

    /// Look up an existing path without modifying the taxonomy
    #[must_use]
    pub fn find_path(&self, start: NodeId, path: &str) -> Option<NodeId> {
        if path.is_empty() {
            return Some(start);
        }
        path.split(PATH_SEPARATOR).try_fold(start, |node, segment| {
            self.nodes[node.0].child_index.get(segment).copied()
        })
    }

    /// Aggregate weight of the subtree at `id`, memoized per node
    ///
    /// A leaf weighs the length of its name. An inner node weighs the sum of its
    /// children, but never less than the length of its own name.
    pub fn value(&mut self, id: NodeId) -> usize {
        if let Some(cached) = self.nodes[id.0].value {
            return cached;
        }
        // Post-order over the uncomputed part of the subtree
        let mut pending = vec![(id, false)];
        while let Some((current, children_done)) = pending.pop() {
            let node = &self.nodes[current.0];
            if node.value.is_some() {
                continue;
            }
            if children_done {
                let total: usize = node
                    .children
                    .iter()
                    .map(|child| self.nodes[child.0].value.unwrap_or_default())
                    .sum();
                let value = total.max(node.name_len());
                self.nodes[current.0].value = Some(value);
            } else {
                pending.push((current, true));
                pending.extend(
                    node.children
                        .iter()
                        .filter(|child| self.nodes[child.0].value.is_none())
                        .map(|&child| (child, false)),
                );
            }
        }
        self.nodes[id.0].value.unwrap_or_default()
    }

    /// Ancestors of `id` from its parent up to the root
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.nodes[id.0].parent, |current| {
            self.nodes[current.0].parent
        })
    }

    /// Whether the trailing segments of `id`'s path equal `path`
    ///
    /// `"Spleen, Gr1"` matches any `Gr1` node whose parent is `Spleen`.
    #[must_use]
    pub fn ends_with_path(&self, id: NodeId, path: &str) -> bool {
        if path.is_empty() {
            return false;
        }
        let mut lineage = std::iter::once(id).chain(self.ancestors(id));
        path.rsplit(PATH_SEPARATOR).all(|segment| {
            lineage
                .next()
                .is_some_and(|n| n != self.root() && self.nodes[n.0].name == segment)
        })
    }

    /// Segment names from the root's child down to `id`, joined with `", "`
    #[must_use]
    pub fn path_of(&self, id: NodeId) -> String {
        let mut names: Vec<&str> = std::iter::once(id)
            .chain(self.ancestors(id))
            .filter(|&n| n != self.root())
            .map(|n| self.nodes[n.0].name.as_str())
            .collect();
        names.reverse();
        names.join(PATH_SEPARATOR)
    }
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Taxonomy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut pending = vec![(self.root(), 0)];
        while let Some((id, indent)) = pending.pop() {
            let node = self.node(id);
            match node.value {
                Some(value) => writeln!(f, "{:indent$}{} ({value})", "", node.name)?,
                None => writeln!(f, "{:indent$}{}", "", node.name)?,
            }
            pending.extend(node.children.iter().rev().map(|&child| (child, indent + 2)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_taxonomy_has_only_root() {
        let tax = Taxonomy::new();
        assert_eq!(tax.len(), 1);
        assert!(tax.is_empty());
        assert_eq!(tax.node(tax.root()).name, "root");
        assert!(tax.node(tax.root()).children().is_empty());
    }

    #[test]
    fn test_path_resolution_is_idempotent() {
        let mut tax = Taxonomy::new();
        let root = tax.root();
        let first = tax.get_or_add_path(root, "Spleen, Gr1");
        let second = tax.get_or_add_path(root, "Spleen, Gr1");

        assert_eq!(first, second);
        assert_eq!(tax.len(), 3);
        assert_eq!(tax.node(root).children().len(), 1);
    }

    #[test]
    fn test_shared_prefix_shares_nodes() {
        let mut tax = Taxonomy::new();
        let root = tax.root();
        let b = tax.get_or_add_path(root, "A, B");
        let c = tax.get_or_add_path(root, "A, C");

        assert_ne!(b, c);
        assert_eq!(tax.node(b).parent(), tax.node(c).parent());
        let a = tax.node(b).parent().unwrap();
        assert_eq!(tax.node(a).name, "A");
        assert_eq!(tax.node(a).children(), &[b, c]);
    }

    #[test]
    fn test_children_keep_insertion_order() {
        let mut tax = Taxonomy::new();
        let root = tax.root();
        for name in ["Zeta", "Alpha", "Mid"] {
            tax.get_or_add_child(root, name);
        }
        let names: Vec<_> = tax
            .node(root)
            .children()
            .iter()
            .map(|&id| tax.node(id).name.clone())
            .collect();
        assert_eq!(names, ["Zeta", "Alpha", "Mid"]);
    }

    #[test]
    fn test_empty_path_returns_start() {
        let mut tax = Taxonomy::new();
        let root = tax.root();
        assert_eq!(tax.get_or_add_path(root, ""), root);
        assert_eq!(tax.len(), 1);
    }

    #[test]
    fn test_value_of_leaf_is_name_length() {
        let mut tax = Taxonomy::new();
        let root = tax.root();
        let leaf = tax.get_or_add_path(root, "Blood, Monocyte");
        assert_eq!(tax.value(leaf), "Monocyte".len());
    }

    #[test]
    fn test_value_example_tree() {
        let mut tax = Taxonomy::new();
        let root = tax.root();
        let b = tax.get_or_add_path(root, "A, B");
        tax.get_or_add_path(root, "A, C");
        let a = tax.node(b).parent().unwrap();

        assert_eq!(tax.value(a), 2);
        // root: max(4, 2)
        assert_eq!(tax.value(root), 4);
    }

    #[test]
    fn test_value_never_below_own_name() {
        let mut tax = Taxonomy::new();
        let root = tax.root();
        let leaf = tax.get_or_add_path(root, "LongOrganName, X");
        let organ = tax.node(leaf).parent().unwrap();
        assert_eq!(tax.value(organ), "LongOrganName".len());
    }

    #[test]
    fn test_value_is_memoized() {
        let mut tax = Taxonomy::new();
        let root = tax.root();
        let leaf = tax.get_or_add_path(root, "A, B");
        assert_eq!(tax.node(leaf).cached_value(), None);
        let first = tax.value(root);
        assert_eq!(tax.node(leaf).cached_value(), Some(1));

        // Memo is not recomputed even though the tree grew
        tax.get_or_add_path(root, "A, Something");
        assert_eq!(tax.value(root), first);
    }

    #[test]
    fn test_find_path_and_path_of() {
        let mut tax = Taxonomy::new();
        let root = tax.root();
        let gr1 = tax.get_or_add_path(root, "Spleen, Gr1");
        assert_eq!(tax.find_path(root, "Spleen, Gr1"), Some(gr1));
        assert_eq!(tax.find_path(root, "Spleen, B220"), None);
        assert_eq!(tax.path_of(gr1), "Spleen, Gr1");
        assert_eq!(tax.path_of(root), "");
    }

    #[test]
    fn test_ends_with_path() {
        let mut tax = Taxonomy::new();
        let root = tax.root();
        let deep = tax.get_or_add_path(root, "Mouse, Spleen, Gr1");
        let other = tax.get_or_add_path(root, "Blood, Gr1");

        assert!(tax.ends_with_path(deep, "Spleen, Gr1"));
        assert!(tax.ends_with_path(deep, "Gr1"));
        assert!(!tax.ends_with_path(other, "Spleen, Gr1"));
        assert!(!tax.ends_with_path(deep, ""));
        assert!(!tax.ends_with_path(deep, "root, Mouse, Spleen, Gr1"));
    }

    #[test]
    fn test_height_and_leaves() {
        let mut tax = Taxonomy::new();
        assert_eq!(tax.height(), 1);
        let root = tax.root();
        tax.get_or_add_path(root, "A, B, C");
        tax.get_or_add_path(root, "D");
        assert_eq!(tax.height(), 4);
        assert_eq!(tax.leaf_count(), 2);
    }

    #[test]
    fn test_display_shows_values_once_computed() {
        let mut tax = Taxonomy::new();
        let root = tax.root();
        tax.get_or_add_path(root, "A, B");
        tax.value(root);
        let shown = tax.to_string();
        assert!(shown.contains("root (4)"));
        assert!(shown.contains("  A (1)"));
        assert!(shown.contains("    B (1)"));
    }

    #[test]
    fn test_display_is_preorder_in_insertion_order() {
        let mut tax = Taxonomy::new();
        let root = tax.root();
        tax.get_or_add_path(root, "A, B");
        tax.get_or_add_path(root, "D");
        tax.get_or_add_path(root, "A, C");
        tax.value(root);
        assert_eq!(
            tax.to_string(),
            "root (4)\n  A (2)\n    B (1)\n    C (1)\n  D (1)\n"
        );
    }
}
