use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// A single extracted check, before numbering
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChecklistItem {
    /// Section the item was found in (e.g. "2.3 Школа")
    pub section: String,

    /// Check text shown in the "name" column
    pub name: String,

    /// Introductory sentence of the list this item belongs to, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl ChecklistItem {
    pub fn new(section: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            section: section.into(),
            name: name.into(),
            context: None,
        }
    }

    pub fn with_context(mut self, context: Option<String>) -> Self {
        self.context = context;
        self
    }

    /// Items ending with a colon group the checks below them and get no number
    pub fn is_label(&self) -> bool {
        self.name.trim_end().ends_with(':')
    }
}

/// A row of the rendered checklist table
#[derive(Debug, Clone, PartialEq)]
pub enum ChecklistRow<'a> {
    /// Column titles
    Header,
    /// Section divider, written when the section changes
    Section(&'a str),
    /// Executable check with its sequence number
    Check { number: usize, item: &'a ChecklistItem },
    /// Grouping label without a number
    Label(&'a ChecklistItem),
}

/// Extraction statistics printed after generation
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ChecklistSummary {
    /// Numbered checks
    pub checks: usize,
    /// Colon-terminated grouping labels
    pub labels: usize,
    /// Distinct sections holding at least one item
    pub sections: usize,
    /// Numbered checks per section, sorted by section
    pub per_section: BTreeMap<String, usize>,
}

impl ChecklistSummary {
    pub fn from_items(items: &[ChecklistItem]) -> Self {
        let mut summary = Self::default();
        let mut sections = HashSet::new();

        for item in items {
            sections.insert(item.section.as_str());
            if item.is_label() {
                summary.labels += 1;
            } else {
                summary.checks += 1;
                *summary.per_section.entry(item.section.clone()).or_insert(0) += 1;
            }
        }

        summary.sections = sections.len();
        summary
    }
}

/// JSON output of `qakit checklist --json`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChecklistJsonOutput {
    pub project: String,
    pub output: String,
    pub summary: ChecklistSummary,
    pub items: Vec<ChecklistItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_detection() {
        assert!(ChecklistItem::new("2 Меню", "Меню содержит кнопки:").is_label());
        assert!(ChecklistItem::new("2 Меню", "Меню содержит кнопки:  ").is_label());
        assert!(!ChecklistItem::new("2 Меню", "Кнопка отображается").is_label());
    }

    #[test]
    fn test_summary_counts() {
        let items = vec![
            ChecklistItem::new("2.1 Меню", "Меню содержит кнопки:"),
            ChecklistItem::new("2.1 Меню", "Кнопка старта отображается"),
            ChecklistItem::new("2.2 Склад", "Список предметов доступен"),
            ChecklistItem::new("2.2 Склад", "Сортировка по редкости работает"),
            ChecklistItem::new("2.3 Лор", "Разделы:"),
        ];

        let summary = ChecklistSummary::from_items(&items);
        assert_eq!(summary.checks, 3);
        assert_eq!(summary.labels, 2);
        assert_eq!(summary.sections, 3);
        assert_eq!(summary.per_section.get("2.1 Меню"), Some(&1));
        assert_eq!(summary.per_section.get("2.2 Склад"), Some(&2));
        // Sections with only labels have no numbered checks to report
        assert_eq!(summary.per_section.get("2.3 Лор"), None);
    }

    #[test]
    fn test_summary_empty() {
        let summary = ChecklistSummary::from_items(&[]);
        assert_eq!(summary, ChecklistSummary::default());
    }

    #[test]
    fn test_context_skipped_when_absent() {
        let item = ChecklistItem::new("2 Меню", "Кнопка отображается");
        let json = serde_json::to_string(&item).unwrap();
        assert!(!json.contains("context"));

        let item = item.with_context(Some("Меню содержит".to_string()));
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains("\"context\":\"Меню содержит\""));
    }
}
