//! Data models for taxonomy diagrams

pub mod category;
pub mod taxonomy;

pub use category::{Category, LinkBuckets, LinkRecord};
pub use taxonomy::{NodeId, Taxonomy, TrieNode};
