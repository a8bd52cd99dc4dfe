//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Global Config
//!
//! Located at (in order of precedence):
//! 1. `$TESTMETA_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/testmeta/config.toml`
//! 3. `~/.testmeta/config.toml`
//!
//! # Project Config
//!
//! Located at `<root>/.testmeta/config.toml` (canonical).
//!
//! # Validation
//!
//! Config values are validated after parsing to ensure they conform to
//! expected formats (e.g., namespace must be a valid declaration prefix).

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::core::types::Namespace;

/// How the CLI renders results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Global configuration (user scope).
///
/// # Example
///
/// ```toml
/// namespace = "testmeta::"
/// format = "json"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Declaration namespace prefix
    pub namespace: Option<String>,

    /// Default output format
    pub format: Option<OutputFormat>,
}

impl GlobalConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_namespace(self.namespace.as_deref())
    }
}

/// Project configuration.
///
/// # Example
///
/// ```toml
/// namespace = "acme::testing::"
/// manifest = "tests/declarations.toml"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    /// Declaration namespace prefix, overrides the global one
    pub namespace: Option<String>,

    /// Default manifest path, relative to the project root
    pub manifest: Option<PathBuf>,
}

impl ProjectConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_namespace(self.namespace.as_deref())?;

        if let Some(manifest) = &self.manifest {
            if manifest.as_os_str().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "manifest path cannot be empty".to_string(),
                ));
            }
        }

        Ok(())
    }
}

fn validate_namespace(namespace: Option<&str>) -> Result<(), ConfigError> {
    if let Some(ns) = namespace {
        Namespace::new(ns).map_err(|e| ConfigError::InvalidValue(e.to_string()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    mod global_config {
        use super::*;

        #[test]
        fn parse_full() {
            let toml = r#"
                namespace = "acme::"
                format = "json"
            "#;

            let config: GlobalConfig = toml::from_str(toml).unwrap();
            assert_eq!(config.namespace.as_deref(), Some("acme::"));
            assert_eq!(config.format, Some(OutputFormat::Json));
            assert!(config.validate().is_ok());
        }

        #[test]
        fn parse_empty() {
            let config: GlobalConfig = toml::from_str("").unwrap();
            assert_eq!(config, GlobalConfig::default());
        }

        #[test]
        fn unknown_format_rejected() {
            let result: Result<GlobalConfig, _> = toml::from_str(r#"format = "yaml""#);
            assert!(result.is_err());
        }

        #[test]
        fn namespace_with_whitespace_rejected() {
            let config = GlobalConfig {
                namespace: Some("acme ::".into()),
                ..Default::default()
            };
            assert!(matches!(
                config.validate(),
                Err(ConfigError::InvalidValue(_))
            ));
        }
    }

    mod project_config {
        use super::*;

        #[test]
        fn parse_full() {
            let toml = r#"
                namespace = "acme::testing::"
                manifest = "tests/declarations.toml"
            "#;

            let config: ProjectConfig = toml::from_str(toml).unwrap();
            assert_eq!(
                config.manifest,
                Some(PathBuf::from("tests/declarations.toml"))
            );
            assert!(config.validate().is_ok());
        }

        #[test]
        fn empty_namespace_rejected() {
            let config = ProjectConfig {
                namespace: Some(String::new()),
                ..Default::default()
            };
            assert!(config.validate().is_err());
        }

        #[test]
        fn empty_manifest_rejected() {
            let config = ProjectConfig {
                manifest: Some(PathBuf::new()),
                ..Default::default()
            };
            assert!(config.validate().is_err());
        }

        #[test]
        fn format_is_global_only() {
            let result: Result<ProjectConfig, _> = toml::from_str(r#"format = "json""#);
            assert!(result.is_err());
        }
    }
}
