use crate::parser::normalize::normalize;
use regex::Regex;
use std::sync::LazyLock;

/// `### [2.3.3 Склад]{.mark}`
static MARKED_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(#{1,6})\s*\[(\d+(?:\.\d+)*\.?)\s+([^\]]+)\](?:\{[^}]*\})?").unwrap()
});
/// `## 2.3 Школа`
static NUMBERED_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})\s*(\d+(?:\.\d+)*\.?)\s*(.+)$").unwrap());
/// `### Интерфейс`
static PLAIN_HEADING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.+)$").unwrap());

/// A heading recognized on a single line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Heading {
    /// Heading with a dotted section number
    Numbered {
        level: usize,
        path: String,
        title: String,
    },
    /// Heading without a number
    Unnumbered { level: usize, title: String },
}

impl Heading {
    /// Parse a line as a heading, numbered forms first
    ///
    /// Lines that only look partly like headings are not headings; callers
    /// treat them as ordinary text.
    pub fn parse(line: &str) -> Option<Self> {
        let captures = MARKED_HEADING
            .captures(line)
            .or_else(|| NUMBERED_HEADING.captures(line));

        if let Some(captures) = captures {
            return Some(Heading::Numbered {
                level: captures[1].len(),
                path: captures[2].trim_end_matches('.').to_string(),
                title: normalize(&captures[3]),
            });
        }

        PLAIN_HEADING.captures(line).map(|captures| Heading::Unnumbered {
            level: captures[1].len(),
            title: normalize(&captures[2]),
        })
    }
}

/// Outcome of feeding a numbered heading to the [`Sectionizer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeChange {
    /// Heading is inside the configured prefix; it is now the current section
    Entered,
    /// Heading left the configured prefix; extraction stops
    Left,
    /// Heading is outside the prefix and extraction was already off
    Ignored,
}

/// Tracks the current section and whether extraction is active
///
/// Scope is a plain string-prefix test on the section number, so a start
/// section of "2" also matches "20.1".
#[derive(Debug, Clone)]
pub struct Sectionizer {
    start_section: String,
    current: String,
    active: bool,
}

impl Sectionizer {
    pub fn new(start_section: impl Into<String>) -> Self {
        Self {
            start_section: start_section.into(),
            current: String::new(),
            active: false,
        }
    }

    /// Whether lines are currently being extracted
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Display name of the current section ("2.3 Школа")
    pub fn current(&self) -> &str {
        &self.current
    }

    /// Update scope from a numbered heading
    pub fn enter(&mut self, path: &str, title: &str) -> ScopeChange {
        if path.starts_with(&self.start_section) {
            self.active = true;
            self.current = format!("{} {}", path, title);
            tracing::debug!(section = %self.current, "entered section");
            ScopeChange::Entered
        } else if self.active {
            self.active = false;
            tracing::debug!(path, "left extraction scope");
            ScopeChange::Left
        } else {
            ScopeChange::Ignored
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_numbered_heading() {
        assert_eq!(
            Heading::parse("## 2.3 Школа"),
            Some(Heading::Numbered {
                level: 2,
                path: "2.3".to_string(),
                title: "Школа".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_numbered_heading_trailing_dot() {
        assert_eq!(
            Heading::parse("# 2. Функциональные требования"),
            Some(Heading::Numbered {
                level: 1,
                path: "2".to_string(),
                title: "Функциональные требования".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_marked_heading() {
        assert_eq!(
            Heading::parse("### [2.3.3 Склад]{.mark}"),
            Some(Heading::Numbered {
                level: 3,
                path: "2.3.3".to_string(),
                title: "Склад".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_unnumbered_heading() {
        assert_eq!(
            Heading::parse("### **Интерфейс**"),
            Some(Heading::Unnumbered {
                level: 3,
                title: "Интерфейс".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_not_a_heading() {
        assert_eq!(Heading::parse("Обычный текст"), None);
        assert_eq!(Heading::parse("####### слишком глубоко"), None);
        assert_eq!(Heading::parse("#"), None);
    }

    #[test]
    fn test_prefix_activation() {
        let mut s = Sectionizer::new("2");
        assert!(!s.is_active());

        assert_eq!(s.enter("1", "Введение"), ScopeChange::Ignored);
        assert!(!s.is_active());

        assert_eq!(s.enter("2.1", "Меню"), ScopeChange::Entered);
        assert!(s.is_active());
        assert_eq!(s.current(), "2.1 Меню");

        assert_eq!(s.enter("2.2", "Склад"), ScopeChange::Entered);
        assert_eq!(s.current(), "2.2 Склад");
    }

    #[test]
    fn test_leaving_prefix_deactivates_until_it_recurs() {
        let mut s = Sectionizer::new("2");
        s.enter("2.1", "Меню");

        assert_eq!(s.enter("3.1", "Монетизация"), ScopeChange::Left);
        assert!(!s.is_active());
        assert_eq!(s.enter("3.2", "Реклама"), ScopeChange::Ignored);
        assert!(!s.is_active());

        assert_eq!(s.enter("2.4", "Арена"), ScopeChange::Entered);
        assert!(s.is_active());
        assert_eq!(s.current(), "2.4 Арена");
    }

    #[test]
    fn test_prefix_is_string_comparison() {
        let mut s = Sectionizer::new("2");
        assert_eq!(s.enter("20.1", "Приложение"), ScopeChange::Entered);
    }
}
