//! Requirement document to regression checklist generation

pub mod emitter;

pub use emitter::ChecklistEmitter;

use crate::models::{ChecklistConfig, ChecklistItem, ChecklistResult, ChecklistSummary};
use crate::parser::RequirementExtractor;
use std::path::{Path, PathBuf};

/// Outcome of a checklist run
#[derive(Debug, Clone)]
pub struct ChecklistReport {
    pub output: PathBuf,
    pub items: Vec<ChecklistItem>,
    pub summary: ChecklistSummary,
}

/// Default output path: `ЧекЛист-<stem>.csv` next to the input
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let parent = input.parent().unwrap_or_else(|| Path::new(""));
    parent.join(format!("ЧекЛист-{}.csv", stem))
}

/// Extract requirements from `input` and write the checklist CSV to `output`
pub fn generate(
    config: &ChecklistConfig,
    input: &Path,
    output: &Path,
) -> ChecklistResult<ChecklistReport> {
    let extractor = RequirementExtractor::new(config)?;
    let items = extractor.extract_file(input)?;

    let emitter = ChecklistEmitter::new(config.platforms.clone());
    emitter.write_file(&items, output)?;

    let summary = ChecklistSummary::from_items(&items);
    Ok(ChecklistReport {
        output: output.to_path_buf(),
        items,
        summary,
    })
}
