//! Line-by-line requirement extraction.
//!
//! A requirements document is walked once, top to bottom. Numbered headings
//! move the [`Sectionizer`]; fenced code and pipe tables are skipped; prose
//! lines are buffered into paragraphs and flushed at blank lines, headings and
//! list items. Each flushed paragraph or list item goes through the
//! [`Classifier`] and, when accepted, becomes a [`ChecklistItem`].

use crate::models::{ChecklistConfig, ChecklistError, ChecklistItem, ChecklistResult};
use crate::parser::classifier::Classifier;
use crate::parser::normalize::{normalize, strip_list_marker, to_check_text};
use crate::parser::sectionizer::{Heading, ScopeChange, Sectionizer};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static BULLET_ITEM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*[-*•]\s+(.+)$").unwrap());
static ORDINAL_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\d+[.)]\s+(.+)$").unwrap());
static FIGURE_CAPTION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\*?Рис\.").unwrap());

/// Paragraphs with at least this many semicolons are treated as inline lists
const INLINE_LIST_SEMICOLONS: usize = 2;

/// Inline list parts must be longer than this (in characters)
const INLINE_LIST_MIN_PART: usize = 5;

/// What the assembler is doing with the lines it receives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Outside the configured sections; lines are ignored
    Idle,
    /// Inside an in-scope section, collecting paragraph lines
    Buffering,
    /// Inside a fenced code block
    InCodeBlock,
    /// Inside a pipe table
    InTable,
}

/// Extracts checklist items from a requirements document
#[derive(Debug, Clone)]
pub struct RequirementExtractor {
    classifier: Classifier,
    start_section: String,
    split_markers: Vec<String>,
    split_min_length: usize,
    intro_min_length: usize,
    list_min_length: usize,
}

impl RequirementExtractor {
    pub fn new(config: &ChecklistConfig) -> ChecklistResult<Self> {
        Ok(Self {
            classifier: Classifier::new(&config.rules)?,
            start_section: config.start_section.clone(),
            split_markers: config.rules.split_markers.clone(),
            split_min_length: config.rules.split_min_length,
            intro_min_length: config.rules.intro_min_length,
            list_min_length: config.rules.list_min_length,
        })
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Extract items from a Markdown file
    pub fn extract_file(&self, path: &Path) -> ChecklistResult<Vec<ChecklistItem>> {
        if !path.exists() {
            return Err(ChecklistError::InputNotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| ChecklistError::Read(path.to_path_buf(), e))?;
        Ok(self.extract(&content))
    }

    /// Extract items from Markdown text
    pub fn extract(&self, content: &str) -> Vec<ChecklistItem> {
        let mut assembler = Assembler::new(self);
        for line in content.trim_start_matches('\u{feff}').lines() {
            assembler.feed(line);
        }
        assembler.finish()
    }
}

/// Per-document state of a single extraction pass
struct Assembler<'a> {
    extractor: &'a RequirementExtractor,
    sectionizer: Sectionizer,
    mode: Mode,
    /// Mode to restore when the current code fence closes
    before_fence: Mode,
    buffer: Vec<String>,
    list_context: Option<String>,
    items: Vec<ChecklistItem>,
}

impl<'a> Assembler<'a> {
    fn new(extractor: &'a RequirementExtractor) -> Self {
        Self {
            extractor,
            sectionizer: Sectionizer::new(extractor.start_section.clone()),
            mode: Mode::Idle,
            before_fence: Mode::Idle,
            buffer: Vec::new(),
            list_context: None,
            items: Vec::new(),
        }
    }

    /// Mode to return to after a code block or table closes
    fn resting_mode(&self) -> Mode {
        if self.sectionizer.is_active() {
            Mode::Buffering
        } else {
            Mode::Idle
        }
    }

    fn feed(&mut self, line: &str) {
        let trimmed = line.trim();

        if trimmed.starts_with("```") {
            if self.mode == Mode::InCodeBlock {
                self.mode = self.before_fence;
            } else {
                self.before_fence = self.mode;
                self.mode = Mode::InCodeBlock;
            }
            return;
        }
        if self.mode == Mode::InCodeBlock {
            return;
        }

        if line.matches('|').count() >= 2 {
            self.mode = Mode::InTable;
            return;
        }
        if self.mode == Mode::InTable {
            if trimmed.is_empty() {
                self.mode = self.resting_mode();
            }
            return;
        }

        match Heading::parse(line) {
            Some(Heading::Numbered { path, title, .. }) => {
                self.on_numbered_heading(&path, &title);
                return;
            }
            Some(Heading::Unnumbered { .. }) if self.mode == Mode::Buffering => {
                self.flush();
                return;
            }
            _ => {}
        }

        if self.mode != Mode::Buffering {
            return;
        }

        if trimmed.is_empty() {
            self.flush();
            return;
        }

        if let Some(item_text) = list_item_text(line) {
            self.on_list_item(item_text);
            return;
        }

        if !trimmed.starts_with('!')
            && !trimmed.starts_with('>')
            && !trimmed.starts_with("---")
            && !FIGURE_CAPTION.is_match(trimmed)
        {
            self.buffer.push(trimmed.to_string());
        }
    }

    fn finish(mut self) -> Vec<ChecklistItem> {
        if self.sectionizer.is_active() {
            self.flush();
        }
        tracing::debug!(items = self.items.len(), "extraction finished");
        self.items
    }

    fn on_numbered_heading(&mut self, path: &str, title: &str) {
        if self.sectionizer.is_active() {
            self.flush();
        }
        self.buffer.clear();
        self.list_context = None;

        if self.sectionizer.enter(path, title) == ScopeChange::Entered {
            // "2.3 Раздел: statement" carries a requirement in the title itself
            if let Some((_, statement)) = title.split_once(':') {
                let statement = statement.trim();
                if self.extractor.classifier.is_requirement(statement) {
                    self.push(to_check_text(statement), None);
                }
            }
        }

        self.mode = self.resting_mode();
    }

    fn on_list_item(&mut self, item_text: &str) {
        if !self.buffer.is_empty() {
            let paragraph = self.buffer.join(" ");
            self.buffer.clear();

            match paragraph.trim_end().strip_suffix(':') {
                Some(intro) => {
                    self.list_context = Some(normalize(intro));
                }
                None => {
                    self.emit_paragraph(&paragraph);
                    self.list_context = None;
                }
            }
        }

        let cleaned = to_check_text(item_text);
        if cleaned.chars().count() < self.extractor.list_min_length {
            return;
        }

        let classifier = &self.extractor.classifier;
        if classifier.is_requirement(item_text) || classifier.is_list_item(&cleaned) {
            let context = self.list_context.clone();
            self.push(cleaned, context);
        }
    }

    fn flush(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        let paragraph = self.buffer.join(" ");
        self.buffer.clear();
        self.emit_paragraph(&paragraph);
        self.list_context = None;
    }

    fn emit_paragraph(&mut self, text: &str) {
        let extractor = self.extractor;
        let classifier = &extractor.classifier;
        if classifier.is_descriptive(text) {
            tracing::trace!(paragraph = text, "skipped descriptive paragraph");
            return;
        }

        let mut accepted = Vec::new();

        if text.matches(';').count() >= INLINE_LIST_SEMICOLONS {
            if let Some((intro, _)) = text.split_once(':') {
                let intro = intro.trim();
                if intro.chars().count() > extractor.intro_min_length
                    && classifier.is_requirement(intro)
                {
                    accepted.push(to_check_text(intro));
                }
            }

            for part in inline_list_parts(text) {
                if classifier.is_requirement(&part) {
                    accepted.push(to_check_text(&part));
                }
            }
        } else if classifier.is_requirement(text) {
            for clause in split_clauses(text, &extractor.split_markers, extractor.split_min_length) {
                if classifier.is_requirement(&clause) {
                    accepted.push(to_check_text(&clause));
                }
            }
        }

        for name in accepted {
            self.push(name, None);
        }
    }

    fn push(&mut self, name: String, context: Option<String>) {
        let item = ChecklistItem::new(self.sectionizer.current(), name).with_context(context);
        tracing::debug!(section = %item.section, item = %item.name, "accepted");
        self.items.push(item);
    }
}

/// Text of a bulleted or numbered list item line
fn list_item_text(line: &str) -> Option<&str> {
    BULLET_ITEM
        .captures(line)
        .or_else(|| ORDINAL_ITEM.captures(line))
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str())
}

/// Split a semicolon-separated paragraph into candidate items
fn inline_list_parts(text: &str) -> Vec<String> {
    text.split([';', '\n'])
        .map(str::trim)
        .filter(|part| part.chars().count() > INLINE_LIST_MIN_PART)
        .map(strip_list_marker)
        .filter(|part| part.chars().count() > INLINE_LIST_MIN_PART)
        .collect()
}

/// Recursively split a compound requirement on conjunction markers
///
/// The first marker whose split leaves both halves longer than `min_len`
/// characters wins; each half is split again. Text with no applicable marker
/// is returned as a single clause.
pub fn split_clauses(text: &str, markers: &[String], min_len: usize) -> Vec<String> {
    for marker in markers {
        if let Some((head, tail)) = text.split_once(marker.as_str()) {
            if head.chars().count() > min_len && tail.chars().count() > min_len {
                let mut clauses = split_clauses(head, markers, min_len);
                clauses.extend(split_clauses(tail, markers, min_len));
                return clauses;
            }
        }
    }
    vec![text.to_string()]
}
