//! JSON to Markdown rendering.
//!
//! Objects become headed sections and nested bullet lists; arrays of flat,
//! similarly-shaped objects become pipe tables; scalars render inline.

use crate::models::RenderConfig;
use serde_json::{Map, Value};
use std::collections::HashSet;

const INDENT: &str = "  ";
const EMPTY_ARRAY: &str = "*пустой массив*";
const ELEMENT_LABEL: &str = "Элемент";
const OBJECT_CELL_CHARS: usize = 50;

/// Key sets may differ from the first row by at most this share of its keys
const TABLE_KEY_TOLERANCE: f64 = 0.3;

/// Renders JSON values as Markdown
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownRenderer {
    config: RenderConfig,
}

impl MarkdownRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Render a whole document, optionally under a `# title` heading
    ///
    /// Top-level object keys become `##` sections; a top-level string field
    /// named `comment` is rendered as a quote instead.
    pub fn document(&self, data: &Value, title: Option<&str>) -> String {
        let mut lines = Vec::new();

        if let Some(title) = title {
            lines.push(format!("# {}", title));
            lines.push(String::new());
        }

        match data {
            Value::Object(map) => {
                for (key, value) in map {
                    if let ("comment", Value::String(comment)) = (key.as_str(), value) {
                        lines.push(format!("> {}", comment));
                        lines.push(String::new());
                        continue;
                    }

                    lines.push(format!("## {}", key));
                    lines.push(String::new());
                    lines.push(self.section_body(value));
                    lines.push(String::new());
                }
            }
            Value::Array(items) if is_table_compatible(items) => lines.push(self.table(items)),
            other => lines.push(self.value(other, 0)),
        }

        lines.join("\n")
    }

    fn section_body(&self, value: &Value) -> String {
        match value {
            Value::Array(items) if is_table_compatible(items) => self.table(items),
            Value::Object(map) => self.object(map, 0),
            other => self.value(other, 0),
        }
    }

    /// Render any value at the given nesting level
    pub fn value(&self, value: &Value, level: usize) -> String {
        let indent = INDENT.repeat(level);

        match value {
            Value::Null => format!("{}*null*", indent),
            Value::Bool(b) => format!("{}`{}`", indent, b),
            Value::Number(n) => format!("{}`{}`", indent, n),
            Value::String(s) => {
                let escaped = s.replace('|', "\\|").replace('\n', "<br>");
                let max = self.config.max_inline_len;
                format!("{}{}", indent, ellipsize(&escaped, max, max))
            }
            Value::Array(items) if items.is_empty() => format!("{}{}", indent, EMPTY_ARRAY),
            Value::Array(items) if items.iter().all(is_scalar) => {
                let inline: Vec<String> = items
                    .iter()
                    .map(|item| self.value(item, 0).trim().to_string())
                    .collect();
                format!("{}{}", indent, inline.join(", "))
            }
            Value::Array(items) => {
                let mut lines = Vec::new();
                for (i, item) in items.iter().enumerate() {
                    match item {
                        Value::Object(map) => {
                            lines.push(format!("{}- **{} {}:**", indent, ELEMENT_LABEL, i + 1));
                            lines.push(self.object(map, level + 1));
                        }
                        other => {
                            lines.push(format!("{}- {}", indent, self.value(other, 0).trim()));
                        }
                    }
                }
                lines.join("\n")
            }
            Value::Object(map) => self.object(map, level),
        }
    }

    /// Render an object as a bullet list of `**key:** value` entries
    pub fn object(&self, map: &Map<String, Value>, level: usize) -> String {
        let indent = INDENT.repeat(level);
        let mut lines = Vec::new();

        for (key, value) in map {
            match value {
                Value::Object(nested) => {
                    lines.push(format!("{}- **{}:**", indent, key));
                    lines.push(self.object(nested, level + 1));
                }
                Value::Array(items) if !items.is_empty() && !items.iter().all(is_scalar) => {
                    lines.push(format!("{}- **{}:**", indent, key));
                    lines.push(self.value(value, level + 1));
                }
                _ => {
                    lines.push(format!("{}- **{}:** {}", indent, key, self.value(value, 0).trim()));
                }
            }
        }

        lines.join("\n")
    }

    /// Render an array of objects as a pipe table
    ///
    /// Columns are the union of all keys in order of first appearance.
    pub fn table(&self, items: &[Value]) -> String {
        if items.is_empty() {
            return EMPTY_ARRAY.to_string();
        }

        let mut columns: Vec<&str> = Vec::new();
        for map in items.iter().filter_map(Value::as_object) {
            for key in map.keys() {
                if !columns.contains(&key.as_str()) {
                    columns.push(key);
                }
            }
        }

        let header = format!("| {} |", columns.join(" | "));
        let separator = format!("| {} |", vec!["---"; columns.len()].join(" | "));

        let mut lines = vec![header, separator];
        for item in items {
            let cells: Vec<String> = columns
                .iter()
                .map(|column| match item.get(*column) {
                    Some(value) => self.cell(value),
                    None => String::new(),
                })
                .collect();
            lines.push(format!("| {} |", cells.join(" | ")));
        }

        lines.join("\n")
    }

    fn cell(&self, value: &Value) -> String {
        match value {
            Value::Array(items) => items.iter().map(plain).collect::<Vec<_>>().join(", "),
            Value::Object(_) => value.to_string().chars().take(OBJECT_CELL_CHARS).collect(),
            Value::Null => "-".to_string(),
            Value::Bool(true) => "✓".to_string(),
            Value::Bool(false) => "✗".to_string(),
            other => {
                let text = plain(other).replace('|', "\\|").replace('\n', " ");
                let max = self.config.max_cell_len;
                ellipsize(&text, max, max.saturating_sub(3))
            }
        }
    }
}

fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Array(_) | Value::Object(_))
}

/// Text of a value without Markdown decoration
fn plain(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Cut text longer than `max` characters down to `keep` characters plus "..."
fn ellipsize(text: &str, max: usize, keep: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(keep).collect();
    cut.push_str("...");
    cut
}

/// Whether an array can be shown as a table
///
/// Requires a non-empty array of objects whose key sets stay close to the
/// first object's and whose values are scalars, empty containers or arrays of
/// scalars.
pub fn is_table_compatible(items: &[Value]) -> bool {
    let Some(first) = items.first().and_then(Value::as_object) else {
        return false;
    };
    let first_keys: HashSet<&str> = first.keys().map(String::as_str).collect();
    let tolerance = first_keys.len() as f64 * TABLE_KEY_TOLERANCE;

    for item in items {
        let Some(map) = item.as_object() else {
            return false;
        };

        let keys: HashSet<&str> = map.keys().map(String::as_str).collect();
        if first_keys.symmetric_difference(&keys).count() as f64 > tolerance {
            return false;
        }

        for value in map.values() {
            match value {
                Value::Object(nested) if !nested.is_empty() => return false,
                Value::Array(nested) if !nested.iter().all(is_scalar) => return false,
                _ => {}
            }
        }
    }

    true
}
