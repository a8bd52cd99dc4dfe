//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! testmeta has two configuration scopes:
//! - **Global**: User-level settings
//! - **Project**: Settings for one test suite, found under its root
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file
//! 3. Project config file
//! 4. CLI flags (not handled here)
//!
//! # Global Config Locations
//!
//! Searched in order, first existing file wins:
//! 1. `$TESTMETA_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/testmeta/config.toml`
//! 3. `~/.testmeta/config.toml`
//!
//! # Project Config Locations
//!
//! Searched in order:
//! 1. `.testmeta/config.toml` (canonical)
//! 2. `testmeta.toml` (compatibility, warns)
//!
//! # Example
//!
//! ```no_run
//! use testmeta::core::config::Config;
//! use std::path::Path;
//!
//! let result = Config::load(Some(Path::new("/path/to/project"))).unwrap();
//! let config = result.config;
//!
//! println!("Namespace: {}", config.namespace());
//! println!("Format: {}", config.format());
//! if let Some(manifest) = config.manifest() {
//!     println!("Manifest: {}", manifest.display());
//! }
//! ```

pub mod schema;

pub use schema::{GlobalConfig, OutputFormat, ProjectConfig};

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::core::types::Namespace;

/// Environment variable naming an explicit global config file.
pub const CONFIG_ENV_VAR: &str = "TESTMETA_CONFIG";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Warnings generated during config loading.
#[derive(Debug, Clone)]
pub struct ConfigWarning {
    /// The warning message.
    pub message: String,
    /// The path that triggered the warning.
    pub path: PathBuf,
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct ConfigLoadResult {
    /// The loaded configuration.
    pub config: Config,
    /// Any warnings generated during loading.
    pub warnings: Vec<ConfigWarning>,
}

/// Merged configuration from all sources.
///
/// This struct provides accessor methods that apply precedence rules
/// automatically. Project config overrides global config.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Global configuration
    pub global: GlobalConfig,
    /// Project configuration (if a project root was given and has one)
    pub project: Option<ProjectConfig>,
    /// Root the project config was looked up under
    project_root: Option<PathBuf>,
    /// Path to the global config file (if loaded)
    global_path: Option<PathBuf>,
    /// Path to the project config file (if loaded)
    project_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// If `project_root` is provided, also loads project config.
    ///
    /// # Errors
    ///
    /// Returns an error if config files exist but cannot be parsed or hold
    /// invalid values. Missing config files are not an error (defaults are
    /// used).
    pub fn load(project_root: Option<&Path>) -> Result<ConfigLoadResult, ConfigError> {
        Self::load_from(&Self::global_candidates(), project_root)
    }

    fn load_from(
        global_candidates: &[PathBuf],
        project_root: Option<&Path>,
    ) -> Result<ConfigLoadResult, ConfigError> {
        let mut warnings = Vec::new();

        let (global, global_path) = match global_candidates.iter().find(|p| p.exists()) {
            Some(path) => (read_config::<GlobalConfig>(path)?, Some(path.clone())),
            None => (GlobalConfig::default(), None),
        };

        let (project, project_path) = match project_root {
            Some(root) => Self::load_project(root, &mut warnings)?,
            None => (None, None),
        };

        global.validate()?;
        if let Some(ref p) = project {
            p.validate()?;
        }

        for warning in &warnings {
            tracing::warn!(path = %warning.path.display(), "{}", warning.message);
        }

        Ok(ConfigLoadResult {
            config: Config {
                global,
                project,
                project_root: project_root.map(Path::to_path_buf),
                global_path,
                project_path,
            },
            warnings,
        })
    }

    /// Global config locations in search order.
    fn global_candidates() -> Vec<PathBuf> {
        let mut candidates = Vec::new();

        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            candidates.push(PathBuf::from(path));
        }

        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            candidates.push(PathBuf::from(xdg_home).join("testmeta/config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            candidates.push(home.join(".testmeta/config.toml"));
        }

        candidates
    }

    /// Load project configuration from standard locations.
    fn load_project(
        root: &Path,
        warnings: &mut Vec<ConfigWarning>,
    ) -> Result<(Option<ProjectConfig>, Option<PathBuf>), ConfigError> {
        // 1. Check .testmeta/config.toml (canonical)
        let canonical = Self::project_config_path(root);
        if canonical.exists() {
            let config = read_config(&canonical)?;
            return Ok((Some(config), Some(canonical)));
        }

        // 2. Check testmeta.toml (compatibility)
        let compat = root.join("testmeta.toml");
        if compat.exists() {
            warnings.push(ConfigWarning {
                message: format!(
                    "Using deprecated config location. Please move to '{}'",
                    canonical.display()
                ),
                path: compat.clone(),
            });
            let config = read_config(&compat)?;
            return Ok((Some(config), Some(compat)));
        }

        Ok((None, None))
    }

    /// Get the canonical path for project config.
    ///
    /// Returns `.testmeta/config.toml` relative to the given root.
    pub fn project_config_path(root: &Path) -> PathBuf {
        root.join(".testmeta/config.toml")
    }

    // =========================================================================
    // Accessor methods with precedence
    // =========================================================================

    /// Get the declaration namespace.
    ///
    /// Defaults to `testmeta::` if not configured.
    pub fn namespace(&self) -> Namespace {
        self.project
            .as_ref()
            .and_then(|p| p.namespace.as_deref())
            .or(self.global.namespace.as_deref())
            .and_then(|ns| Namespace::new(ns).ok())
            .unwrap_or_default()
    }

    /// Get the output format.
    ///
    /// Defaults to `text` if not configured.
    pub fn format(&self) -> OutputFormat {
        self.global.format.unwrap_or_default()
    }

    /// Get the default manifest, resolved against the project root.
    ///
    /// Returns `None` if not configured.
    pub fn manifest(&self) -> Option<PathBuf> {
        let manifest = self.project.as_ref()?.manifest.as_ref()?;
        Some(match &self.project_root {
            Some(root) if manifest.is_relative() => root.join(manifest),
            _ => manifest.clone(),
        })
    }

    /// Get the path to the loaded global config file.
    pub fn global_config_loaded_from(&self) -> Option<&Path> {
        self.global_path.as_deref()
    }

    /// Get the path to the loaded project config file.
    pub fn project_config_loaded_from(&self) -> Option<&Path> {
        self.project_path.as_deref()
    }
}

/// Read and parse one config file.
fn read_config<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
