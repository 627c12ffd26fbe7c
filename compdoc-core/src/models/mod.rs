//! Domain models for compdoc.
//!
//! # Core Concepts
//!
//! - [`Component`]: attributes every documented component shares (name, title,
//!   description, maturity status).
//! - [`Source`]: a component that ingests data. Carries a
//!   [`DeliveryGuarantee`], the kinds of data it emits and its [`Field`]s.
//! - [`Field`]: one named attribute of the data a source emits. Table-typed
//!   fields nest further fields.
//!
//! # Page Layout
//!
//! - [`PageMetadata`]: the metadata attached to a rendered documentation page.
//! - [`PageLayout`]: what that page shows (head tags, badges, table of
//!   contents, resource links, last-updated line).
//!
//! All models are immutable once constructed.

mod component;
mod field;
mod page;
mod source;

pub use component::*;
pub use field::*;
pub use page::*;
pub use source::*;
