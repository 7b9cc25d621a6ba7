pub mod api_checklist;
pub mod checklist;
pub mod json_to_md;
