//! Layout of the taxonomy: radial partition cells and bundled link routes

pub mod bundle;
pub mod partition;

pub use bundle::{bundle, bundle_path, least_common_ancestor};
pub use partition::{Cell, Partition, Weighting};
