//! Inline Markdown cleanup for requirement text.
//!
//! Requirement documents are usually produced by converting Word files, so
//! they carry pandoc span attributes (`{.mark}`, `{.underline}`), wiki-style
//! links and escaped quotes. [`normalize`] strips all of that down to the
//! visible text; [`to_check_text`] additionally shapes a fragment into the
//! form used in checklist rows.

use regex::Regex;
use std::sync::LazyLock;

static WIKI_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[([^\]]+)\]\]\([^)]+\)").unwrap());
static LINK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\([^)]+\)").unwrap());
static BARE_URL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\(https?://[^)]+\)").unwrap());
static ANCHOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\(#[^)]+\)").unwrap());
static SPAN_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\.(?:underline|mark)\}").unwrap());
static BOLD_STAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*([^*]+)\*\*").unwrap());
static ITALIC_STAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*([^*]+)\*").unwrap());
static BOLD_UNDERSCORE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"__([^_]+)__").unwrap());
static ITALIC_UNDERSCORE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"_([^_]+)_").unwrap());
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

static BULLET_PREFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[-*•]\s*").unwrap());
static ORDINAL_PREFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+[.)]\s*").unwrap());
static TRAILING_SEMICOLONS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r";+\s*$").unwrap());

/// Check text longer than this is cut at a natural break
const MAX_CHECK_CHARS: usize = 250;

/// Break points tried in order when cutting long check text
const CUTOFF_PATTERNS: &[&str] = &[". ", ", т.е.", ", где ", ", который ", ", которая "];

/// Strip inline Markdown markup, returning the visible text with collapsed whitespace.
///
/// The result is stable: `normalize(&normalize(s)) == normalize(s)`.
///
/// # Example
/// ```
/// use qakit::parser::normalize;
/// let text = "**Кнопка** [Старт](#start) {.mark}отображается";
/// assert_eq!(normalize(text), "Кнопка Старт отображается");
/// ```
pub fn normalize(text: &str) -> String {
    let mut current = clean_once(text);
    // Every rewrite shortens the string except whitespace collapse, which is
    // stable after one pass, so this terminates.
    loop {
        let next = clean_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn clean_once(text: &str) -> String {
    let text = WIKI_LINK.replace_all(text, "$1");
    let text = LINK.replace_all(&text, "$1");

    let text = BARE_URL.replace_all(&text, "");
    let text = ANCHOR.replace_all(&text, "");

    let text = SPAN_ATTR.replace_all(&text, "");
    let text = BOLD_STAR.replace_all(&text, "$1");
    let text = ITALIC_STAR.replace_all(&text, "$1");
    let text = BOLD_UNDERSCORE.replace_all(&text, "$1");
    let text = ITALIC_UNDERSCORE.replace_all(&text, "$1");

    let text = text.replace(['[', ']'], "").replace("\\\"", "\"");

    WHITESPACE.replace_all(&text, " ").trim().to_string()
}

/// Remove a leading bullet (`-`, `*`, `•`) and then a leading ordinal (`1.`, `2)`).
pub fn strip_list_marker(text: &str) -> String {
    let text = BULLET_PREFIX.replace(text, "");
    ORDINAL_PREFIX.replace(&text, "").into_owned()
}

/// Shape a requirement fragment into checklist row text.
///
/// Normalizes markup, drops list markers and trailing `;`/`.`, and cuts
/// overly long text at the first natural break found between characters 80
/// and 200.
pub fn to_check_text(text: &str) -> String {
    let text = normalize(text);
    let text = strip_list_marker(&text);
    let text = TRAILING_SEMICOLONS.replace(&text, "");
    let text = text.trim_end_matches('.');
    let mut text = WHITESPACE.replace_all(text, " ").into_owned();

    if text.chars().count() > MAX_CHECK_CHARS {
        for pattern in CUTOFF_PATTERNS {
            if let Some(byte_idx) = text.find(pattern) {
                let char_idx = text[..byte_idx].chars().count();
                if 80 < char_idx && char_idx < 200 {
                    text.truncate(byte_idx);
                    break;
                }
            }
        }
    }

    text.trim().to_string()
}
