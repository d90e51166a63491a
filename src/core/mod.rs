//! Core module for diagram construction and rendering

pub mod builder;
pub mod config;
pub mod layout;
pub mod models;
pub mod parser;
pub mod render;

/// Returns the current version of the `edge-bundle` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
