//! cli
//!
//! Command-line interface layer for testmeta.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Install the log subscriber
//! - Delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. It resolves the working directory, configuration
//! and manifest, then hands off to [`crate::parser`] and
//! [`crate::core::dependency`]. Library errors are converted to `anyhow`
//! here and nowhere else.

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::core::config::{Config, ConfigLoadResult};
use crate::ui::output::Verbosity;

/// Execution context shared by all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Working directory (the `--cwd` override or the process directory)
    pub cwd: PathBuf,
    /// Output verbosity
    pub verbosity: Verbosity,
}

impl Context {
    /// Resolve a user-supplied path against the working directory.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_relative() {
            self.cwd.join(path)
        } else {
            path.to_path_buf()
        }
    }

    /// Load configuration with the working directory as project root.
    pub fn load_config(&self) -> Result<ConfigLoadResult> {
        Config::load(Some(&self.cwd)).context("Failed to load configuration")
    }
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();
    let verbosity = Verbosity::from_flags(cli.quiet, cli.debug);

    init_tracing(verbosity)?;

    let cwd = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to determine working directory")?,
    };

    let ctx = Context { cwd, verbosity };
    tracing::debug!(cwd = %ctx.cwd.display(), "starting");

    commands::dispatch(cli.command, &ctx)
}

/// Install the stderr log subscriber.
///
/// `RUST_LOG` takes precedence over the level implied by the flags.
fn init_tracing(verbosity: Verbosity) -> Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(verbosity.log_level()).into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing subscriber: {e}"))
}
