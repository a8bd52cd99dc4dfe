//! parser
//!
//! Turning raw declarations into normalized metadata.
//!
//! # Modules
//!
//! - [`attribute`] - `AttributeParser`, the structured-declaration parser
//! - [`registry`] - Short name to constructor lookup tables
//! - [`chain`] - `ParserChain`, combining several parsers
//!
//! # Contract
//!
//! A parser answers three questions for a test class: what is declared on
//! the class, what is declared on one method, and both together (class
//! entries first). Every answer is a whole [`MetadataCollection`] or an
//! error; a failing declaration never yields a partial collection.
//!
//! # Example
//!
//! ```
//! use testmeta::parser::{AttributeParser, Parser};
//! use testmeta::source::Manifest;
//!
//! let manifest = Manifest::from_toml_str(r#"
//!     [[class]]
//!     name = "CartTest"
//!     declarations = [{ name = "testmeta::Small" }]
//!
//!     [[class.method]]
//!     name = "testTotal"
//!     declarations = [
//!         { name = "testmeta::Test" },
//!         { name = "testmeta::Depends", args = ["testAdd"] },
//!     ]
//! "#).unwrap();
//!
//! let parser = AttributeParser::new(manifest);
//! let metadata = parser.for_class_and_method("CartTest", "testTotal").unwrap();
//!
//! assert_eq!(metadata.group_names(), ["small"]);
//! assert_eq!(metadata.dependencies()[0].target(), "CartTest::testAdd");
//! ```

pub mod attribute;
pub mod chain;
pub mod registry;

pub use attribute::AttributeParser;
pub use chain::ParserChain;
pub use registry::{Constructor, MappingContext, Registry};

use thiserror::Error;

use crate::core::metadata::MetadataCollection;
use crate::core::requirement::RequirementError;
use crate::source::SourceError;

/// Errors from parsing declarations.
///
/// Every variant except `Source` names the offending declaration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error(transparent)]
    Source(#[from] SourceError),

    /// A required argument is missing or has the wrong type.
    #[error("invalid arguments for '{declaration}': {reason}")]
    InvalidArguments { declaration: String, reason: String },

    /// Inline JSON test data could not be decoded into data sets.
    #[error("malformed test data in '{declaration}': {message}")]
    MalformedTestData {
        declaration: String,
        message: String,
    },

    /// A version requirement did not parse.
    #[error("invalid version requirement in '{declaration}': {source}")]
    InvalidRequirement {
        declaration: String,
        source: RequirementError,
    },
}

/// A producer of metadata for test classes and methods.
pub trait Parser: Send + Sync {
    /// Metadata declared on the class itself.
    fn for_class(&self, class_name: &str) -> Result<MetadataCollection, ParseError>;

    /// Metadata declared on one method.
    fn for_method(
        &self,
        class_name: &str,
        method_name: &str,
    ) -> Result<MetadataCollection, ParseError>;

    /// Class metadata followed by method metadata.
    fn for_class_and_method(
        &self,
        class_name: &str,
        method_name: &str,
    ) -> Result<MetadataCollection, ParseError> {
        let class_level = self.for_class(class_name)?;
        let method_level = self.for_method(class_name, method_name)?;
        Ok(class_level.merge_with(&method_level))
    }
}

impl<P: Parser + ?Sized> Parser for Box<P> {
    fn for_class(&self, class_name: &str) -> Result<MetadataCollection, ParseError> {
        (**self).for_class(class_name)
    }

    fn for_method(
        &self,
        class_name: &str,
        method_name: &str,
    ) -> Result<MetadataCollection, ParseError> {
        (**self).for_method(class_name, method_name)
    }

    fn for_class_and_method(
        &self,
        class_name: &str,
        method_name: &str,
    ) -> Result<MetadataCollection, ParseError> {
        (**self).for_class_and_method(class_name, method_name)
    }
}
