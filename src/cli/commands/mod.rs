//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Resolves configuration and the manifest
//! 2. Calls the parser and dependency algebra
//! 3. Formats and displays output
//!
//! Handlers never print library errors themselves; they add context and
//! return them to `main`.

mod completion;
mod config_cmd;
mod deps;
mod metadata;

pub use completion::completion;
pub use config_cmd::config;
pub use deps::deps;
pub use metadata::metadata;

use std::path::PathBuf;

use anyhow::{bail, Context as _, Result};

use super::args::{Command, Target};
use super::Context;
use crate::core::config::OutputFormat;
use crate::parser::AttributeParser;
use crate::source::Manifest;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Metadata {
            target,
            method,
            kinds,
            json,
        } => metadata(ctx, &target, method.as_deref(), &kinds, json),
        Command::Deps {
            target,
            method,
            annotations,
            passed,
            json,
        } => deps(ctx, &target, &method, &annotations, &passed, json),
        Command::Config => config(ctx),
        Command::Completion { shell } => completion(shell),
    }
}

/// A parser over the target's manifest, plus the output format to use.
pub(crate) struct Session {
    pub parser: AttributeParser<Manifest>,
    pub format: OutputFormat,
}

impl Session {
    /// Load configuration and the manifest for `target`.
    ///
    /// An explicit manifest argument wins over the configured one; `--json`
    /// wins over the configured format.
    pub fn open(ctx: &Context, target: &Target, json: bool) -> Result<Self> {
        let config = ctx.load_config()?.config;

        let manifest_path: PathBuf = match (&target.manifest, config.manifest()) {
            (Some(path), _) => ctx.resolve(path),
            (None, Some(configured)) => configured,
            (None, None) => bail!(
                "No manifest given and none configured. Pass a manifest path or set \
                 'manifest' in .testmeta/config.toml"
            ),
        };

        let manifest = Manifest::load(&manifest_path)
            .with_context(|| format!("Failed to load manifest {}", manifest_path.display()))?;

        let format = if json {
            OutputFormat::Json
        } else {
            config.format()
        };

        Ok(Self {
            parser: AttributeParser::with_namespace(manifest, config.namespace()),
            format,
        })
    }
}
