//! compdoc: component metadata for documentation sites.
//!
//! The models and loader live in `compdoc-core`; this crate adds the
//! configuration, text rendering and the read-only HTTP API used by the
//! `compdoc` binary.

pub mod api;
pub mod config;
pub mod render;

pub use compdoc_core::{catalog, error, models, Catalog};
