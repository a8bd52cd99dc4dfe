//! source
//!
//! Where raw declarations come from.
//!
//! # Modules
//!
//! - [`traits`] - The `DeclarationSource` trait and `SourceError`
//! - [`declaration`] - Raw declaration values
//! - [`manifest`] - TOML/JSON manifest files as a declaration source
//!
//! # Architecture
//!
//! The parser depends only on the [`DeclarationSource`] trait. The
//! manifest is the one in-crate implementation; tests and embedders can
//! supply their own.

pub mod declaration;
pub mod manifest;
pub mod traits;

pub use declaration::Declaration;
pub use manifest::{Manifest, ManifestClass, ManifestError, ManifestFormat, ManifestMethod};
pub use traits::{DeclarationSource, SourceError};
