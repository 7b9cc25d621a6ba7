//! JSON to Markdown conversion of files and directories

pub mod json_markdown;

pub use json_markdown::{is_table_compatible, MarkdownRenderer};

use crate::models::{RenderConfig, RenderError, RenderResult};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Fields checked, in order, for a document title
const TITLE_FIELDS: [&str; 3] = ["testName", "name", "title"];

/// Result of converting one file during a directory run
#[derive(Debug)]
pub struct Conversion {
    pub source: PathBuf,
    pub result: RenderResult<PathBuf>,
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

/// Title for a converted document: a title-like field, else the humanized file stem
pub fn document_title(data: &Value, path: &Path) -> String {
    let from_data = TITLE_FIELDS
        .iter()
        .filter_map(|field| data.get(*field).and_then(Value::as_str))
        .find(|title| !title.is_empty());

    match from_data {
        Some(title) => title.to_string(),
        None => {
            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            title_case(&stem.replace(['-', '_'], " "))
        }
    }
}

/// Uppercase the first letter of every word and lowercase the rest
fn title_case(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut in_word = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if in_word {
                result.extend(c.to_lowercase());
            } else {
                result.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            result.push(c);
            in_word = false;
        }
    }
    result
}

/// Convert one JSON file to Markdown
///
/// Writes next to the input with an `.md` extension unless `output` is given.
/// Returns the path written.
pub fn convert_file(
    json_path: &Path,
    output: Option<&Path>,
    config: RenderConfig,
) -> RenderResult<PathBuf> {
    if !json_path.exists() {
        return Err(RenderError::NotFound(json_path.to_path_buf()));
    }
    if !is_json(json_path) {
        return Err(RenderError::NotJson(json_path.to_path_buf()));
    }

    let md_path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| json_path.with_extension("md"));

    let content = fs::read_to_string(json_path)
        .map_err(|e| RenderError::Read(json_path.to_path_buf(), e))?;
    let data: Value = serde_json::from_str(&content)
        .map_err(|e| RenderError::Parse(json_path.to_path_buf(), e))?;

    let title = document_title(&data, json_path);
    let markdown = MarkdownRenderer::new(config).document(&data, Some(&title));
    fs::write(&md_path, markdown).map_err(|e| RenderError::Write(md_path.clone(), e))?;

    tracing::debug!(source = %json_path.display(), target = %md_path.display(), "converted");
    Ok(md_path)
}

/// Convert every JSON file under `dir`, recursively
///
/// Failures are collected per file; one bad file does not stop the run.
pub fn convert_dir(dir: &Path, config: RenderConfig) -> RenderResult<Vec<Conversion>> {
    if !dir.is_dir() {
        return Err(RenderError::NotADirectory(dir.to_path_buf()));
    }

    let mut sources: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && is_json(e.path()))
        .map(|e| e.into_path())
        .collect();
    sources.sort();

    Ok(sources
        .into_iter()
        .map(|source| {
            let result = convert_file(&source, None, config);
            Conversion { source, result }
        })
        .collect())
}

/// JSON files in `root` and its immediate, non-hidden subdirectories
pub fn find_json_candidates(root: &Path) -> RenderResult<Vec<PathBuf>> {
    let mut found = json_files_in(root)?;

    let mut subdirs: Vec<PathBuf> = fs::read_dir(root)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_dir())
        .filter(|p| {
            p.file_name()
                .map(|n| !n.to_string_lossy().starts_with('.'))
                .unwrap_or(false)
        })
        .collect();
    subdirs.sort();

    for subdir in subdirs {
        found.extend(json_files_in(&subdir)?);
    }

    Ok(found)
}

fn json_files_in(dir: &Path) -> RenderResult<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file() && is_json(p))
        .collect();
    files.sort();
    Ok(files)
}
