//! metadata command - Show declared metadata for a class or method

use anyhow::{Context as _, Result};

use super::Session;
use crate::cli::args::Target;
use crate::cli::Context;
use crate::core::config::OutputFormat;
use crate::core::metadata::MetadataKind;
use crate::parser::Parser;
use crate::ui::output;

/// Show the metadata of a class, or of a class and method together.
pub fn metadata(
    ctx: &Context,
    target: &Target,
    method: Option<&str>,
    kinds: &[MetadataKind],
    json: bool,
) -> Result<()> {
    let session = Session::open(ctx, target, json)?;
    let class_name = target.class_name.as_str();

    let mut collection = match method {
        Some(method) => session
            .parser
            .for_class_and_method(class_name, method)
            .with_context(|| format!("Failed to parse {class_name}::{method}"))?,
        None => session
            .parser
            .for_class(class_name)
            .with_context(|| format!("Failed to parse {class_name}"))?,
    };

    if !kinds.is_empty() {
        collection = collection.of_kinds(kinds);
    }

    match session.format {
        OutputFormat::Json => output::print_json(&collection)?,
        OutputFormat::Text => {
            for item in &collection {
                output::print(item, ctx.verbosity);
            }
        }
    }

    Ok(())
}
