use std::path::PathBuf;

/// Result type for checklist extraction
pub type ChecklistResult<T> = Result<T, ChecklistError>;

/// Errors that can occur while extracting or writing a checklist
#[derive(Debug, thiserror::Error)]
pub enum ChecklistError {
    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("Failed to read '{}': {}", .0.display(), .1)]
    Read(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse API description '{}': {}", .0.display(), .1)]
    InvalidJson(PathBuf, #[source] serde_json::Error),

    #[error("Failed to write checklist: {0}")]
    Write(#[from] std::io::Error),

    #[error("Failed to write CSV row: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid pattern '{pattern}' in classifier rules: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Result type for JSON to Markdown rendering
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur while converting JSON documents to Markdown
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Expected a .json file, got '{}'", .0.display())]
    NotJson(PathBuf),

    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Failed to parse JSON in '{}': {}", .0.display(), .1)]
    Parse(PathBuf, #[source] serde_json::Error),

    #[error("Failed to read '{}': {}", .0.display(), .1)]
    Read(PathBuf, #[source] std::io::Error),

    #[error("Failed to write '{}': {}", .0.display(), .1)]
    Write(PathBuf, #[source] std::io::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
