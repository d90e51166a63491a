//! Radial partition layout
//!
//! Every node gets an angular interval `[x, x + dx]` inside `[0, 2π]` and a
//! radial band `[y, y + dy]` inside `[0, 1]`. Bands are equally thick, one per
//! tree level. Siblings are laid out in ascending name order, each taking a
//! share of its parent's angle proportional to its weight.

use crate::core::models::{NodeId, Taxonomy};
use std::f64::consts::TAU;
use std::fmt;
use std::str::FromStr;

/// How node weights are chosen for angular sizing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Weighting {
    /// Aggregated label weight, so every label has room at any depth
    #[default]
    Label,
    /// Every leaf weighs 1; inner nodes sum their children
    Uniform,
}

impl FromStr for Weighting {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "label" => Ok(Self::Label),
            "uniform" => Ok(Self::Uniform),
            _ => Err(format!("Unknown weighting: '{s}'. Use: label or uniform")),
        }
    }
}

impl fmt::Display for Weighting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Label => write!(f, "label"),
            Self::Uniform => write!(f, "uniform"),
        }
    }
}

/// Layout of a single node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    /// Node this cell belongs to
    pub id: NodeId,
    /// Start angle in radians, clockwise from 12 o'clock
    pub x: f64,
    /// Angular extent in radians
    pub dx: f64,
    /// Inner edge of the radial band, in `[0, 1]`
    pub y: f64,
    /// Radial band thickness
    pub dy: f64,
    /// Distance from the root
    pub depth: usize,
    /// Weight used for sizing
    pub weight: f64,
}

impl Cell {
    /// Angle through the middle of the cell
    #[must_use]
    pub fn mid_angle(&self) -> f64 {
        self.x + self.dx / 2.0
    }
}

/// Laid-out taxonomy, cells in pre-order with siblings sorted by name
#[derive(Debug, Clone)]
pub struct Partition {
    cells: Vec<Cell>,
    /// Node index -> position in `cells`
    slots: Vec<usize>,
}

impl Partition {
    /// Lay out `taxonomy` with the given weighting
    ///
    /// Takes the taxonomy mutably because label weighting fills in the
    /// per-node value memo.
    #[must_use]
    pub fn compute(taxonomy: &mut Taxonomy, weighting: Weighting) -> Self {
        let weights = node_weights(taxonomy, weighting);
        #[allow(clippy::cast_precision_loss)]
        let dy = 1.0 / taxonomy.height() as f64;

        let mut partition = Self {
            cells: Vec::with_capacity(taxonomy.len()),
            slots: vec![0; taxonomy.len()],
        };
        partition.position(taxonomy, &weights, dy);
        partition
    }

    /// Place every node in pre-order, siblings in name order
    fn position(&mut self, taxonomy: &Taxonomy, weights: &[f64], dy: f64) {
        let mut pending = vec![(taxonomy.root(), 0.0, TAU)];
        while let Some((id, x, dx)) = pending.pop() {
            let node = taxonomy.node(id);
            let weight = weights[id.index()];
            self.slots[id.index()] = self.cells.len();
            #[allow(clippy::cast_precision_loss)]
            self.cells.push(Cell {
                id,
                x,
                dx,
                y: node.depth() as f64 * dy,
                dy,
                depth: node.depth(),
                weight,
            });

            let scale = if weight > 0.0 { dx / weight } else { 0.0 };
            let mut start = x;
            let mut placed = Vec::with_capacity(node.children().len());
            for child in sorted_children(taxonomy, id) {
                let child_dx = weights[child.index()] * scale;
                placed.push((child, start, child_dx));
                start += child_dx;
            }
            // Reversed so the first sibling is popped first
            pending.extend(placed.into_iter().rev());
        }
    }

    /// Cell of a node
    #[must_use]
    pub fn get(&self, id: NodeId) -> &Cell {
        &self.cells[self.slots[id.index()]]
    }

    /// Cells in pre-order
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of cells
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True when nothing was laid out
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Children of `id` in ascending name order
fn sorted_children(taxonomy: &Taxonomy, id: NodeId) -> Vec<NodeId> {
    let mut children = taxonomy.node(id).children().to_vec();
    children.sort_by(|a, b| taxonomy.node(*a).name.cmp(&taxonomy.node(*b).name));
    children
}

#[allow(clippy::cast_precision_loss)]
fn node_weights(taxonomy: &mut Taxonomy, weighting: Weighting) -> Vec<f64> {
    match weighting {
        Weighting::Label => taxonomy
            .ids()
            .collect::<Vec<_>>()
            .into_iter()
            .map(|id| taxonomy.value(id) as f64)
            .collect(),
        Weighting::Uniform => {
            let mut weights = vec![0.0; taxonomy.len()];
            // Children are always created after their parent, so a reverse sweep
            // sees every child before its parent.
            for id in taxonomy.ids().collect::<Vec<_>>().into_iter().rev() {
                let node = taxonomy.node(id);
                if node.is_leaf() {
                    weights[id.index()] = 1.0;
                }
                if let Some(parent) = node.parent() {
                    weights[parent.index()] += weights[id.index()];
                }
            }
            weights
        }
    }
}
