//! Metadata models and loader for component documentation.
//!
//! A documentation build describes each pipeline component with a small
//! metadata record. This crate turns those records into validated values:
//!
//! - [`models::Source`]: an ingestion component, with its delivery guarantee,
//!   output types and the [`models::Field`]s it emits.
//! - [`catalog::Catalog`]: every source of one build, loaded from TOML or JSON
//!   documents.
//! - [`models::PageLayout`]: what a component's documentation page shows,
//!   derived from its page metadata.
//!
//! Construction is all-or-nothing. A record either becomes a fully valid value
//! or yields a [`MetadataError`] naming the offending attribute.

mod attributes;
pub mod catalog;
pub mod error;
pub mod models;

pub use attributes::Attributes;
pub use catalog::Catalog;
pub use error::{CatalogError, FailureReason, MetadataError, SourceFailure};
