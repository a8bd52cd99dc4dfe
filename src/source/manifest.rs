//! source::manifest
//!
//! File-backed declaration source.
//!
//! # Format
//!
//! A manifest lists test classes, their methods, and the raw declarations
//! attached to each, in declaration order:
//!
//! ```toml
//! [[class]]
//! name = "App\\CartTest"
//! declarations = [{ name = "testmeta::Group", args = ["checkout"] }]
//!
//! [[class.method]]
//! name = "testTotal"
//! declarations = [
//!     { name = "testmeta::Test" },
//!     { name = "testmeta::Depends", args = ["testAdd"] },
//! ]
//! ```
//!
//! Files ending in `.json` are read as JSON with the same shape; anything
//! else is read as TOML.
//!
//! # Example
//!
//! ```
//! use testmeta::source::{DeclarationSource, Manifest};
//!
//! let manifest = Manifest::from_toml_str(r#"
//!     [[class]]
//!     name = "CartTest"
//!
//!     [[class.method]]
//!     name = "testAdd"
//!     declarations = [{ name = "testmeta::Test" }]
//! "#).unwrap();
//!
//! let decls = manifest.method_declarations("CartTest", "testAdd").unwrap();
//! assert_eq!(decls[0].name, "testmeta::Test");
//! assert!(manifest.class_declarations("Missing").is_err());
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::declaration::Declaration;
use super::traits::{DeclarationSource, SourceError};

/// Errors from loading a manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read manifest '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse manifest '{path}': {message}")]
    ParseError { path: PathBuf, message: String },
}

/// Serialization format of a manifest file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
    Toml,
    Json,
}

impl ManifestFormat {
    /// Pick the format from a file extension.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ManifestFormat::Json,
            _ => ManifestFormat::Toml,
        }
    }
}

/// A test method and its declarations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManifestMethod {
    pub name: String,

    #[serde(default)]
    pub declarations: Vec<Declaration>,
}

/// A test class, its declarations and its methods.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManifestClass {
    pub name: String,

    #[serde(default)]
    pub declarations: Vec<Declaration>,

    #[serde(default, rename = "method")]
    pub methods: Vec<ManifestMethod>,
}

impl ManifestClass {
    fn method(&self, method_name: &str) -> Option<&ManifestMethod> {
        self.methods.iter().find(|m| m.name == method_name)
    }
}

/// A set of classes with their declarations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(default, rename = "class")]
    pub classes: Vec<ManifestClass>,
}

impl Manifest {
    /// Load a manifest file, choosing the format by extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not match the
    /// manifest shape.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let contents = fs::read_to_string(path).map_err(|e| ManifestError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let parsed = match ManifestFormat::from_path(path) {
            ManifestFormat::Json => Self::from_json_str(&contents),
            ManifestFormat::Toml => Self::from_toml_str(&contents),
        };

        let manifest = parsed.map_err(|message| ManifestError::ParseError {
            path: path.to_path_buf(),
            message,
        })?;

        tracing::debug!(
            path = %path.display(),
            classes = manifest.classes.len(),
            "loaded manifest"
        );
        Ok(manifest)
    }

    /// Parse TOML text. The error is the parser's message.
    pub fn from_toml_str(contents: &str) -> Result<Self, String> {
        toml::from_str(contents).map_err(|e| e.to_string())
    }

    /// Parse JSON text. The error is the parser's message.
    pub fn from_json_str(contents: &str) -> Result<Self, String> {
        serde_json::from_str(contents).map_err(|e| e.to_string())
    }

    /// The first class with the given name.
    pub fn class(&self, class_name: &str) -> Option<&ManifestClass> {
        self.classes.iter().find(|c| c.name == class_name)
    }

    /// Class names in file order.
    pub fn class_names(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(|c| c.name.as_str())
    }

    fn require_class(&self, class_name: &str) -> Result<&ManifestClass, SourceError> {
        self.class(class_name)
            .ok_or_else(|| SourceError::UnknownClass(class_name.to_string()))
    }
}

impl DeclarationSource for Manifest {
    fn class_declarations(&self, class_name: &str) -> Result<Vec<Declaration>, SourceError> {
        Ok(self.require_class(class_name)?.declarations.clone())
    }

    fn method_declarations(
        &self,
        class_name: &str,
        method_name: &str,
    ) -> Result<Vec<Declaration>, SourceError> {
        let class = self.require_class(class_name)?;
        class
            .method(method_name)
            .map(|m| m.declarations.clone())
            .ok_or_else(|| SourceError::UnknownMethod {
                class: class_name.to_string(),
                method: method_name.to_string(),
            })
    }
}
