// QAKit - QA documentation toolkit
// Turns requirement documents and OpenAPI descriptions into checklists and JSON test artifacts into Markdown

pub mod api;
pub mod checklist;
pub mod cli;
pub mod models;
pub mod parser;
pub mod render;

pub use anyhow::{Context, Result};
pub use colored::Colorize;

// Re-export commonly used types
pub use api::{ApiChecklistWriter, OpenApiDocument};
pub use checklist::{ChecklistEmitter, ChecklistReport};
pub use models::{ChecklistItem, QakitConfig};
pub use parser::RequirementExtractor;
pub use render::MarkdownRenderer;
