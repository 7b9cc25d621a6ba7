//! OpenAPI document to API checklist generation

pub mod cases;
pub mod openapi;
pub mod writer;

pub use openapi::OpenApiDocument;
pub use writer::ApiChecklistWriter;

use crate::models::{ApiInfo, ApiTestCase, ChecklistResult};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Outcome of an API checklist run
#[derive(Debug, Clone)]
pub struct ApiChecklistReport {
    pub output: PathBuf,
    pub project: String,
    pub info: ApiInfo,
    pub endpoints: usize,
    pub cases: Vec<ApiTestCase>,
}

impl ApiChecklistReport {
    /// Case count per section
    pub fn per_section(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for case in &self.cases {
            *counts.entry(case.section.clone()).or_insert(0) += 1;
        }
        counts
    }
}

/// Default output path: `API-ЧекЛист-<stem>.csv` next to the input
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let parent = input.parent().unwrap_or_else(|| Path::new(""));
    parent.join(format!("API-ЧекЛист-{}.csv", stem))
}

/// Read the OpenAPI document at `input` and write its API checklist to `output`
///
/// The project defaults to the document title.
pub fn generate(
    input: &Path,
    output: &Path,
    project: Option<&str>,
) -> ChecklistResult<ApiChecklistReport> {
    let document = OpenApiDocument::load(input)?;
    let info = document.info();
    let endpoints = document.endpoints();
    let cases = cases::generate_all(&endpoints);

    let project = project.map(String::from).unwrap_or_else(|| info.title.clone());
    ApiChecklistWriter::new(project.as_str()).write_file(&cases, output)?;

    tracing::debug!(endpoints = endpoints.len(), cases = cases.len(), "api checklist generated");
    Ok(ApiChecklistReport {
        output: output.to_path_buf(),
        project,
        info,
        endpoints: endpoints.len(),
        cases,
    })
}
