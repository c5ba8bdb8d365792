//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod render;

pub(crate) use check::CheckArgs;
pub(crate) use render::RenderArgs;

use std::path::Path;

use rcg_config::Config;
use rcg_dom::Document;
use rcg_transform::{CodeGroupTransform, TransformReport};

use crate::error::CliError;

/// Parse a Markdown file and run the code group transform over it.
///
/// Standalone output wraps the fragment before transforming so assets land in
/// the real `<head>`.
pub(crate) fn transform_file(
    input: &Path,
    config: &Config,
) -> Result<(Document, TransformReport), CliError> {
    let markdown = std::fs::read_to_string(input).map_err(|source| CliError::Read {
        path: input.to_path_buf(),
        source,
    })?;

    let mut doc = Document::from_markdown(&markdown);
    if config.output.standalone {
        doc = doc.into_standalone(config.output.title.as_deref());
    }

    let report = CodeGroupTransform::new(&config.code_group).transform(&mut doc);
    tracing::info!(
        input = %input.display(),
        groups = report.groups_rewritten,
        "Transformed document"
    );
    Ok((doc, report))
}
