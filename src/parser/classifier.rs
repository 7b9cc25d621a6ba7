use crate::models::{ChecklistError, ChecklistResult, ClassifierRules};
use crate::parser::normalize::normalize;
use regex::{Regex, RegexBuilder};

/// Heuristic classifier deciding whether a text fragment is a testable requirement
///
/// Built once from [`ClassifierRules`]; classification itself is pure.
#[derive(Debug, Clone)]
pub struct Classifier {
    min_length: usize,
    max_length: usize,
    list_min_length: usize,
    functional_markers: Vec<String>,
    conditional_openers: Vec<String>,
    list_markers: Vec<String>,
    descriptive: Vec<Regex>,
    excluded: Vec<Regex>,
}

impl Classifier {
    /// Compile the classifier from rules
    pub fn new(rules: &ClassifierRules) -> ChecklistResult<Self> {
        Ok(Self {
            min_length: rules.min_length,
            max_length: rules.max_length,
            list_min_length: rules.list_min_length,
            functional_markers: lowercase_all(&rules.functional_markers),
            conditional_openers: lowercase_all(&rules.conditional_openers),
            list_markers: lowercase_all(&rules.list_markers),
            descriptive: compile_all(&rules.descriptive_patterns)?,
            excluded: compile_all(&rules.exclude_patterns)?,
        })
    }

    /// Check whether a raw fragment reads as a functional requirement
    ///
    /// Structural noise is detected on the raw text (it is mostly markup);
    /// length, narrative and vocabulary checks run on the normalized text.
    pub fn is_requirement(&self, fragment: &str) -> bool {
        let raw = fragment.trim();
        if self.excluded.iter().any(|re| re.is_match(raw)) {
            tracing::trace!(fragment = raw, "rejected: structural noise");
            return false;
        }

        let text = normalize(raw);
        let len = text.chars().count();
        if len < self.min_length || len > self.max_length {
            tracing::trace!(fragment = %text, len, "rejected: length");
            return false;
        }

        if self.is_descriptive(&text) {
            tracing::trace!(fragment = %text, "rejected: descriptive");
            return false;
        }

        let lower = text.to_lowercase();
        let accepted = self.functional_markers.iter().any(|m| lower.contains(m.as_str()))
            || self.conditional_openers.iter().any(|o| lower.starts_with(o.as_str()));

        if !accepted {
            tracing::trace!(fragment = %text, "rejected: no requirement markers");
        }
        accepted
    }

    /// Check whether a cleaned list item is worth a checklist row
    ///
    /// Short category entries ("Оружие", "Сортировка по рангу") pass when they
    /// mention a list marker; anything at least as long as a regular
    /// requirement passes as well.
    pub fn is_list_item(&self, cleaned: &str) -> bool {
        let len = cleaned.chars().count();
        if len < self.list_min_length {
            return false;
        }

        if self.is_descriptive(cleaned) {
            return false;
        }

        let lower = cleaned.to_lowercase();
        if self.list_markers.iter().any(|m| lower.contains(m.as_str())) {
            return true;
        }

        len >= self.min_length
    }

    /// Check whether text matches a narrative pattern (flavor text, project overview)
    pub fn is_descriptive(&self, text: &str) -> bool {
        self.descriptive.iter().any(|re| re.is_match(text))
    }
}

fn lowercase_all(items: &[String]) -> Vec<String> {
    items.iter().map(|s| s.to_lowercase()).collect()
}

fn compile_all(patterns: &[String]) -> ChecklistResult<Vec<Regex>> {
    patterns
        .iter()
        .map(|pattern| {
            RegexBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .map_err(|source| ChecklistError::InvalidPattern {
                    pattern: pattern.clone(),
                    source,
                })
        })
        .collect()
}
