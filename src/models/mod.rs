pub mod api;
pub mod checklist;
pub mod config;
pub mod error;

pub use api::{ApiChecklistJsonOutput, ApiInfo, ApiTestCase, CaseKind, Endpoint, Parameter};
pub use checklist::{ChecklistItem, ChecklistJsonOutput, ChecklistRow, ChecklistSummary};
pub use config::{ChecklistConfig, ClassifierRules, QakitConfig, RenderConfig, CONFIG_FILE};
pub use error::{ChecklistError, ChecklistResult, RenderError, RenderResult};
