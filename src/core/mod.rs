//! core
//!
//! Core domain types, schemas, and operations for testmeta.
//!
//! # Modules
//!
//! - [`types`] - Strong types: Namespace
//! - [`requirement`] - Version requirements and version comparison
//! - [`metadata`] - Metadata schema, kinds and collections
//! - [`dependency`] - Dependency descriptors and target algebra
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid states at compile time
//! - Schemas are closed and self-describing
//! - Values are immutable; every operation returns a new value

pub mod config;
pub mod dependency;
pub mod metadata;
pub mod requirement;
pub mod types;
