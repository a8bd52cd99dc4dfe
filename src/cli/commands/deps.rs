//! deps command - Show outstanding dependencies of a test method

use anyhow::{Context as _, Result};
use serde::Serialize;

use super::Session;
use crate::cli::args::Target;
use crate::cli::Context;
use crate::core::config::OutputFormat;
use crate::core::dependency::{diff, filter_invalid, merge_unique, CloneMode, TestDependency};
use crate::parser::Parser;
use crate::ui::output;

/// One outstanding dependency as shown to the user.
#[derive(Debug, Serialize)]
struct DependencyView {
    target: String,
    clone_mode: CloneMode,
}

impl From<&TestDependency> for DependencyView {
    fn from(dep: &TestDependency) -> Self {
        Self {
            target: dep.target(),
            clone_mode: dep.clone_mode(),
        }
    }
}

impl std::fmt::Display for DependencyView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.clone_mode {
            CloneMode::None => write!(f, "{}", self.target),
            CloneMode::Deep => write!(f, "{} (deep clone)", self.target),
            CloneMode::Shallow => write!(f, "{} (shallow clone)", self.target),
        }
    }
}

/// Declared dependencies plus annotation dependencies, minus passed targets.
pub fn deps(
    ctx: &Context,
    target: &Target,
    method: &str,
    annotations: &[String],
    passed: &[String],
    json: bool,
) -> Result<()> {
    let session = Session::open(ctx, target, json)?;
    let class_name = target.class_name.as_str();

    let declared = session
        .parser
        .for_class_and_method(class_name, method)
        .with_context(|| format!("Failed to parse {class_name}::{method}"))?
        .dependencies();

    let annotated: Vec<TestDependency> = annotations
        .iter()
        .map(|text| TestDependency::from_annotation_text(class_name, text))
        .collect();

    let passed: Vec<TestDependency> = passed
        .iter()
        .map(|t| TestDependency::new(t, None, None))
        .collect();

    let outstanding = diff(
        &filter_invalid(&merge_unique(&declared, &annotated)),
        &passed,
    );
    tracing::debug!(
        declared = declared.len(),
        annotated = annotated.len(),
        outstanding = outstanding.len(),
        "resolved dependencies"
    );

    let views: Vec<DependencyView> = outstanding.iter().map(DependencyView::from).collect();

    match session.format {
        OutputFormat::Json => output::print_json(&views)?,
        OutputFormat::Text if !views.is_empty() => {
            output::print(output::format_list(&views, ""), ctx.verbosity)
        }
        OutputFormat::Text => {}
    }

    Ok(())
}
