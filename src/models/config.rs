use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file name, looked up in the working directory
pub const CONFIG_FILE: &str = "qakit.toml";

// =============================================================================
// Classifier Rules
// =============================================================================

/// Vocabulary and thresholds for the requirement classifier
///
/// Everything here is plain data so teams can tune extraction for their own
/// documents without touching the parser.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierRules {
    /// Fragments shorter than this (in characters) are rejected
    #[serde(default = "default_min_length")]
    pub min_length: usize,

    /// Fragments longer than this (in characters) are rejected
    #[serde(default = "default_max_length")]
    pub max_length: usize,

    /// Minimum length of a list item accepted through the list-category rule
    #[serde(default = "default_list_min_length")]
    pub list_min_length: usize,

    /// Lead-in before a colon must be longer than this to become its own item
    #[serde(default = "default_intro_min_length")]
    pub intro_min_length: usize,

    /// Both halves must be longer than this for a clause split to apply
    #[serde(default = "default_split_min_length")]
    pub split_min_length: usize,

    /// Words whose presence marks a functional requirement (lowercase)
    #[serde(default = "default_functional_markers")]
    pub functional_markers: Vec<String>,

    /// Sentence openers that mark conditional or quantified requirements
    #[serde(default = "default_conditional_openers")]
    pub conditional_openers: Vec<String>,

    /// Category words that make short list items worth keeping
    #[serde(default = "default_list_markers")]
    pub list_markers: Vec<String>,

    /// Regex patterns for narrative text (matched case-insensitively)
    #[serde(default = "default_descriptive_patterns")]
    pub descriptive_patterns: Vec<String>,

    /// Regex patterns for structural noise (matched case-insensitively on raw text)
    #[serde(default = "default_exclude_patterns")]
    pub exclude_patterns: Vec<String>,

    /// Conjunction markers used to split compound requirements, tried in order
    #[serde(default = "default_split_markers")]
    pub split_markers: Vec<String>,
}

fn default_min_length() -> usize {
    15
}

fn default_max_length() -> usize {
    400
}

fn default_list_min_length() -> usize {
    5
}

fn default_intro_min_length() -> usize {
    20
}

fn default_split_min_length() -> usize {
    30
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn default_functional_markers() -> Vec<String> {
    strings(&[
        // obligation and capability
        "должен", "должна", "должно", "должны",
        "может", "могут", "можно",
        // presentation
        "отображается", "отображаются", "отображение",
        "доступен", "доступна", "доступно", "доступны",
        "содержит", "содержится", "содержат",
        "позволяет", "позволяют",
        "поддерживает", "поддерживается",
        "выполняется", "выполняет",
        "происходит", "осуществляется",
        "открывается", "закрывается",
        "включает", "включается",
        "имеет", "имеют",
        "использует", "используется", "используют",
        // interaction
        "при нажатии", "при выборе", "при вводе",
        // actors and UI nouns
        "игрок", "пользователь", "персонаж",
        "система", "функция", "механика",
        "кнопка", "экран", "меню", "список",
        "сортировка", "фильтр",
        // state changes
        "начисляется", "расходуется", "получает",
        "увеличивается", "уменьшается", "снижается",
        "активируется", "деактивируется",
        "работает", "срабатывает",
    ])
}

fn default_conditional_openers() -> Vec<String> {
    strings(&[
        "в ", "на ", "при ", "после ", "до ", "для ", "если ",
        "каждый", "каждая", "каждое", "все ", "любой", "любая",
    ])
}

fn default_list_markers() -> Vec<String> {
    strings(&[
        "сортировка", "фильтр", "категория",
        "оружие", "броня", "расходуем",
        "повышение", "понижение", "улучшение",
        "продать", "купить", "выставить",
        "по имен", "по ранг", "по редкост", "по названи",
        "валюта", "soft", "hard",
    ])
}

fn default_descriptive_patterns() -> Vec<String> {
    strings(&[
        r"тело .* сковано",
        r"тело .* инструмент",
        r"закаленное тело",
        r"разум .* холодный",
        r"тело в поту",
        r"расстеленные по полу",
        r"он .* на вершине",
        r"путь был долог",
        r"она прекрасна",
        r"тропа славы",
        r"краткая суть проекта",
        r"ближайшие аналоги",
        r"название проекта",
        r"жанр:",
        r"платформа:",
        r"локализация:",
        r"формат:",
        r"стиль:",
        r"режим игры",
        r"графическая часть",
        r"технические требования",
        r"все значения указаны для тестов",
    ])
}

fn default_exclude_patterns() -> Vec<String> {
    strings(&[
        r"^рис\.",
        r"^таблица",
        r"^\*\*",
        r"^\[\[",
        r"^!\[",
        r"^---",
        r"^\s*$",
        r"^#",
        r"^GIF",
        r"^Формула",
        r"^Значения? указан",
        r"^Текст .* будет определен",
        r"^Точный список",
        r"^Подробнее",
        r"^Список возможных",
        r"^Пример",
    ])
}

fn default_split_markers() -> Vec<String> {
    strings(&[
        ", а также",
        ", а ",
        ". Кроме того,",
        ". Также ",
        ". При этом ",
        ", при этом ",
        ", где ",
    ])
}

impl Default for ClassifierRules {
    fn default() -> Self {
        Self {
            min_length: default_min_length(),
            max_length: default_max_length(),
            list_min_length: default_list_min_length(),
            intro_min_length: default_intro_min_length(),
            split_min_length: default_split_min_length(),
            functional_markers: default_functional_markers(),
            conditional_openers: default_conditional_openers(),
            list_markers: default_list_markers(),
            descriptive_patterns: default_descriptive_patterns(),
            exclude_patterns: default_exclude_patterns(),
            split_markers: default_split_markers(),
        }
    }
}

// =============================================================================
// Checklist Configuration
// =============================================================================

/// Settings for `qakit checklist`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChecklistConfig {
    /// Section-number prefix that enables extraction (string prefix match)
    #[serde(default = "default_start_section")]
    pub start_section: String,

    /// Platform result columns written between the name and version columns
    #[serde(default = "default_platforms")]
    pub platforms: Vec<String>,

    /// Classifier vocabulary and thresholds
    #[serde(default)]
    pub rules: ClassifierRules,
}

fn default_start_section() -> String {
    "2".to_string()
}

fn default_platforms() -> Vec<String> {
    strings(&["Android", "IOS", "ПК"])
}

impl Default for ChecklistConfig {
    fn default() -> Self {
        Self {
            start_section: default_start_section(),
            platforms: default_platforms(),
            rules: ClassifierRules::default(),
        }
    }
}

// =============================================================================
// Renderer Configuration
// =============================================================================

/// Settings for `qakit json-to-md`
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Inline strings longer than this are truncated with "..."
    #[serde(default = "default_max_inline_len")]
    pub max_inline_len: usize,

    /// Table cells longer than this are truncated with "..."
    #[serde(default = "default_max_cell_len")]
    pub max_cell_len: usize,
}

fn default_max_inline_len() -> usize {
    100
}

fn default_max_cell_len() -> usize {
    50
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_inline_len: default_max_inline_len(),
            max_cell_len: default_max_cell_len(),
        }
    }
}

// =============================================================================
// Qakit Configuration
// =============================================================================

/// Qakit configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QakitConfig {
    /// Checklist extraction settings
    #[serde(default)]
    pub checklist: ChecklistConfig,

    /// JSON to Markdown settings
    #[serde(default)]
    pub json_to_md: RenderConfig,
}

impl QakitConfig {
    /// Load config from an explicit path, or from `qakit.toml` in `project_root`
    ///
    /// A missing default file yields the built-in defaults; a missing explicit
    /// path is an error.
    pub fn load(project_root: &Path, explicit: Option<&Path>) -> anyhow::Result<Self> {
        let config_path: PathBuf = match explicit {
            Some(path) => {
                if !path.exists() {
                    anyhow::bail!("Config file not found: {}", path.display());
                }
                path.to_path_buf()
            }
            None => {
                let path = project_root.join(CONFIG_FILE);
                if !path.exists() {
                    return Ok(Self::default());
                }
                path
            }
        };

        tracing::debug!(path = %config_path.display(), "loading config");
        let content = std::fs::read_to_string(&config_path)?;
        let config: QakitConfig = toml::from_str(&content)?;
        Ok(config)
    }
}
