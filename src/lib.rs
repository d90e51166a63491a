//! Shared library for `edge-bundle`
//! Contains the taxonomy model, layout and rendering used by the CLI

pub mod core;
pub mod logger;

pub use crate::core::{config, get_version};
