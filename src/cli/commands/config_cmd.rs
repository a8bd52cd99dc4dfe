//! config command - Show effective configuration

use std::path::Path;

use anyhow::Result;

use crate::cli::Context;
use crate::ui::output;

/// Print the effective configuration and the files it was read from.
pub fn config(ctx: &Context) -> Result<()> {
    let loaded = ctx.load_config()?;
    let config = &loaded.config;

    let manifest = config
        .manifest()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(not set)".to_string());

    let lines = [
        "# Effective Configuration".to_string(),
        format!("namespace = {}", config.namespace()),
        format!("format = {}", config.format()),
        format!("manifest = {manifest}"),
        String::new(),
        "# Sources".to_string(),
        format!("global = {}", source(config.global_config_loaded_from())),
        format!("project = {}", source(config.project_config_loaded_from())),
    ];

    for line in lines {
        output::print(line, ctx.verbosity);
    }

    Ok(())
}

fn source(path: Option<&Path>) -> String {
    path.map(|p| p.display().to_string())
        .unwrap_or_else(|| "(defaults)".to_string())
}
