//! testmeta - Normalized test metadata and dependency descriptors
//!
//! testmeta turns the declarations attached to test classes and test
//! methods (groups, lifecycle hooks, requirements, coverage intent,
//! dependencies and so on) into one closed set of immutable metadata
//! values, and provides the small set algebra a test scheduler needs to
//! combine dependency declarations.
//!
//! # Architecture
//!
//! The codebase follows a layered architecture:
//!
//! - [`core`] - Metadata schema, dependency descriptors, requirements, config
//! - [`source`] - Where raw declarations come from (`DeclarationSource`)
//! - [`parser`] - Mapping declarations to metadata
//! - [`cli`] - Command-line interface (`tmeta`)
//! - [`ui`] - Output formatting
//!
//! # Scope
//!
//! testmeta only produces facts. It does not run tests, decide outcomes,
//! or build and validate a dependency graph; a scheduler does that with
//! the collections and descriptors produced here.
//!
//! # Example
//!
//! ```
//! use testmeta::core::dependency::{filter_invalid, merge_unique, TestDependency};
//! use testmeta::parser::{AttributeParser, Parser};
//! use testmeta::source::Manifest;
//!
//! let manifest = Manifest::from_toml_str(r#"
//!     [[class]]
//!     name = "CartTest"
//!
//!     [[class.method]]
//!     name = "testTotal"
//!     declarations = [{ name = "testmeta::Depends", args = ["testAdd"] }]
//! "#).unwrap();
//!
//! let parser = AttributeParser::new(manifest);
//! let declared = parser.for_method("CartTest", "testTotal").unwrap().dependencies();
//! let annotated = vec![TestDependency::from_annotation_text("CartTest", "clone testAdd")];
//!
//! let all = filter_invalid(&merge_unique(&declared, &annotated));
//! assert_eq!(all.len(), 1);
//! assert!(!all[0].use_deep_clone());
//! ```

pub mod cli;
pub mod core;
pub mod parser;
pub mod source;
pub mod ui;
