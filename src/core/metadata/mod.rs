//! core::metadata
//!
//! Normalized test metadata.
//!
//! # Modules
//!
//! - [`schema`] - The `Metadata` sum type
//! - [`kind`] - Kind tags, per-kind predicates and filters
//! - [`collection`] - Ordered metadata collections
//!
//! # Architecture
//!
//! Parsers turn raw declarations into [`Metadata`] values and hand them out
//! as a [`MetadataCollection`]. The collection is the unit a scheduler
//! consumes: one per class/method pair, class-level entries first.

pub mod collection;
pub mod kind;
pub mod schema;

pub use collection::MetadataCollection;
pub use kind::{MetadataKind, UnknownKind};
pub use schema::Metadata;
