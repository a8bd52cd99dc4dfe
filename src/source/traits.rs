//! source::traits
//!
//! Declaration source trait definition.
//!
//! # Design
//!
//! Parsers never inspect test code directly. They ask a `DeclarationSource`
//! for the raw declarations attached to a class or to one of its methods,
//! and get them back in declaration order. Anything that can answer those
//! two questions (a manifest file, a reflection bridge, a fixture in a
//! test) can feed the parser.
//!
//! Implementations must be thread-safe (Send + Sync) so one source can be
//! shared by parsers running on several threads.

use thiserror::Error;

use super::declaration::Declaration;

/// Errors from looking up declarations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// No class of that name is known to the source.
    #[error("unknown class '{0}'")]
    UnknownClass(String),

    /// The class is known but has no method of that name.
    #[error("unknown method '{class}::{method}'")]
    UnknownMethod { class: String, method: String },
}

/// Trait for providers of raw declarations.
pub trait DeclarationSource: Send + Sync {
    /// Declarations attached to the class itself, in declaration order.
    fn class_declarations(&self, class_name: &str) -> Result<Vec<Declaration>, SourceError>;

    /// Declarations attached to one method of the class, in declaration order.
    fn method_declarations(
        &self,
        class_name: &str,
        method_name: &str,
    ) -> Result<Vec<Declaration>, SourceError>;
}

impl<S: DeclarationSource + ?Sized> DeclarationSource for &S {
    fn class_declarations(&self, class_name: &str) -> Result<Vec<Declaration>, SourceError> {
        (**self).class_declarations(class_name)
    }

    fn method_declarations(
        &self,
        class_name: &str,
        method_name: &str,
    ) -> Result<Vec<Declaration>, SourceError> {
        (**self).method_declarations(class_name, method_name)
    }
}

impl<S: DeclarationSource + ?Sized> DeclarationSource for std::sync::Arc<S> {
    fn class_declarations(&self, class_name: &str) -> Result<Vec<Declaration>, SourceError> {
        (**self).class_declarations(class_name)
    }

    fn method_declarations(
        &self,
        class_name: &str,
        method_name: &str,
    ) -> Result<Vec<Declaration>, SourceError> {
        (**self).method_declarations(class_name, method_name)
    }
}
