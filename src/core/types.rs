//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`Namespace`] - Validated declaration namespace prefix
//!
//! # Validation
//!
//! These types enforce validity at construction time. Invalid values
//! cannot be represented, preventing entire classes of bugs.
//!
//! # Examples
//!
//! ```
//! use testmeta::core::types::Namespace;
//!
//! let ns = Namespace::new("testmeta::").unwrap();
//! assert_eq!(ns.strip("testmeta::Group"), Some("Group"));
//! assert_eq!(ns.strip("other::Group"), None);
//!
//! // Invalid constructions fail at creation time
//! assert!(Namespace::new("").is_err());
//! assert!(Namespace::new("has space::").is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The namespace owning this framework's declarations unless configured otherwise.
pub const DEFAULT_NAMESPACE: &str = "testmeta::";

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid namespace: {0}")]
    InvalidNamespace(String),
}

/// A validated declaration namespace.
///
/// A declaration belongs to the framework iff its fully qualified name
/// starts with the namespace. The remainder is the declaration's short
/// name, which is what the parser registry is keyed on.
///
/// Namespaces must:
/// - Not be empty
/// - Not contain whitespace or ASCII control characters
///
/// # Example
///
/// ```
/// use testmeta::core::types::Namespace;
///
/// let ns = Namespace::default();
/// assert_eq!(ns.as_str(), "testmeta::");
/// assert_eq!(ns.qualify("Depends"), "testmeta::Depends");
/// assert!(ns.contains("testmeta::Depends"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Namespace(String);

impl Namespace {
    /// Create a new validated namespace.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidNamespace` if the prefix is empty or
    /// contains whitespace or control characters.
    pub fn new(prefix: impl Into<String>) -> Result<Self, TypeError> {
        let prefix = prefix.into();
        Self::validate(&prefix)?;
        Ok(Self(prefix))
    }

    fn validate(prefix: &str) -> Result<(), TypeError> {
        if prefix.is_empty() {
            return Err(TypeError::InvalidNamespace(
                "namespace cannot be empty".into(),
            ));
        }
        if prefix.chars().any(char::is_whitespace) {
            return Err(TypeError::InvalidNamespace(format!(
                "namespace '{prefix}' cannot contain whitespace"
            )));
        }
        if prefix.chars().any(|c| c.is_ascii_control()) {
            return Err(TypeError::InvalidNamespace(
                "namespace cannot contain control characters".into(),
            ));
        }
        Ok(())
    }

    /// Check whether a fully qualified declaration name lives in this namespace.
    pub fn contains(&self, name: &str) -> bool {
        self.strip(name).is_some()
    }

    /// Strip the namespace from a fully qualified name.
    ///
    /// Returns `None` if the name is outside the namespace or if nothing
    /// is left after the prefix.
    pub fn strip<'a>(&self, name: &'a str) -> Option<&'a str> {
        name.strip_prefix(self.0.as_str())
            .filter(|short| !short.is_empty())
    }

    /// Build the fully qualified name of a short declaration name.
    pub fn qualify(&self, short: &str) -> String {
        format!("{}{}", self.0, short)
    }

    /// Get the namespace as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Namespace {
    fn default() -> Self {
        Self(DEFAULT_NAMESPACE.to_string())
    }
}

impl TryFrom<String> for Namespace {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Namespace> for String {
    fn from(ns: Namespace) -> Self {
        ns.0
    }
}

impl AsRef<str> for Namespace {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Namespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod namespace {
        use super::*;

        #[test]
        fn valid_namespaces() {
            assert!(Namespace::new("testmeta::").is_ok());
            assert!(Namespace::new("PHPUnit\\Framework\\Attributes\\").is_ok());
            assert!(Namespace::new("x").is_ok());
        }

        #[test]
        fn empty_rejected() {
            assert_eq!(
                Namespace::new(""),
                Err(TypeError::InvalidNamespace(
                    "namespace cannot be empty".into()
                ))
            );
        }

        #[test]
        fn whitespace_rejected() {
            assert!(Namespace::new("test meta::").is_err());
            assert!(Namespace::new("testmeta::\t").is_err());
        }

        #[test]
        fn strip_requires_prefix() {
            let ns = Namespace::default();
            assert_eq!(ns.strip("testmeta::Test"), Some("Test"));
            assert_eq!(ns.strip("testmeta:Test"), None);
            assert_eq!(ns.strip("Test"), None);
        }

        #[test]
        fn bare_namespace_is_not_a_declaration() {
            let ns = Namespace::default();
            assert!(!ns.contains("testmeta::"));
        }

        #[test]
        fn serde_roundtrip_validates() {
            let ns: Namespace = serde_json::from_str("\"app::attr::\"").unwrap();
            assert_eq!(ns.as_str(), "app::attr::");

            let bad: Result<Namespace, _> = serde_json::from_str("\"\"");
            assert!(bad.is_err());
        }
    }
}
