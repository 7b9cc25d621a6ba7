//! Integration tests for checklist generation
//!
//! Drives the whole pipeline: Markdown requirements document in, CSV out.

use qakit::checklist::{self, default_output_path};
use qakit::models::{ChecklistConfig, ChecklistError, QakitConfig};
use qakit::parser::normalize;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const BOM: &str = "\u{feff}";

const GAME_REQUIREMENTS: &str = r#"# Техническое задание

## 1 Общие сведения

Пользователь должен прочитать лицензионное соглашение.

## 2 Функциональные требования

### 2.1 Главное меню

Главное меню должно открываться при запуске игры.

Главное меню содержит кнопки:

- Кнопка старта боя
- Кнопка выхода из игры

### 2.2 Склад

```
Склад должен игнорировать этот код
```

| Предмет | Цена |
|---|---|
| Меч | 100 |

Склад должен хранить предметы игрока; предметы должны сортироваться по редкости; склад должен показывать вес предметов

## 3 Монетизация

### 3.1 Магазин

Пользователь может купить премиум-подписку.
"#;

fn write_doc(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn read_rows(path: &Path) -> Vec<Vec<String>> {
    let text = fs::read_to_string(path).unwrap();
    let text = text.strip_prefix(BOM).expect("checklist starts with a BOM");
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(text.as_bytes());
    reader
        .records()
        .map(|r| r.unwrap().iter().map(String::from).collect())
        .collect()
}

#[test]
fn test_empty_document_yields_header_only() {
    let temp = TempDir::new().unwrap();
    let input = write_doc(temp.path(), "empty.md", "");
    let output = temp.path().join("out.csv");

    let report = checklist::generate(&ChecklistConfig::default(), &input, &output).unwrap();
    assert!(report.items.is_empty());

    let rows = read_rows(&output);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][0], "№ п\\п");
    assert_eq!(rows[0].len(), 8);
}

#[test]
fn test_full_document() {
    let temp = TempDir::new().unwrap();
    let input = write_doc(temp.path(), "game.md", GAME_REQUIREMENTS);
    let output = default_output_path(&input);

    let report = checklist::generate(&ChecklistConfig::default(), &input, &output).unwrap();
    assert_eq!(output, temp.path().join("ЧекЛист-game.csv"));

    let names: Vec<&str> = report.items.iter().map(|i| i.name.as_str()).collect();
    assert!(names.contains(&"Главное меню должно открываться при запуске игры"));
    assert!(names.contains(&"Кнопка старта боя"));
    assert!(names.contains(&"предметы должны сортироваться по редкости"));
    assert!(!names.iter().any(|n| n.contains("лицензионное")));
    assert!(!names.iter().any(|n| n.contains("игнорировать")));
    assert!(!names.iter().any(|n| n.contains("премиум")));

    let rows = read_rows(&output);
    let header_rows = rows.iter().filter(|r| r[0] == "№ п\\п").count();
    assert_eq!(header_rows, 1);
    assert!(rows.iter().all(|r| r.len() == 8));

    let sections: Vec<&str> = rows
        .iter()
        .filter(|r| r[1].is_empty() && !r[0].is_empty())
        .map(|r| r[0].as_str())
        .collect();
    assert_eq!(sections, vec!["2.1 Главное меню", "2.2 Склад"]);
}

#[test]
fn test_numbering_gapless_across_sections() {
    let temp = TempDir::new().unwrap();
    let input = write_doc(temp.path(), "game.md", GAME_REQUIREMENTS);
    let output = temp.path().join("out.csv");

    let report = checklist::generate(&ChecklistConfig::default(), &input, &output).unwrap();

    let numbers: Vec<usize> = read_rows(&output)
        .iter()
        .skip(1)
        .filter_map(|r| r[0].parse().ok())
        .collect();
    assert_eq!(numbers, (1..=report.summary.checks).collect::<Vec<_>>());

    let labels = read_rows(&output)
        .into_iter()
        .filter(|r| r[0].is_empty() && r[1].ends_with(':'))
        .count();
    assert_eq!(labels, report.summary.labels);
}

#[test]
fn test_start_section_selects_scope() {
    let temp = TempDir::new().unwrap();
    let input = write_doc(temp.path(), "game.md", GAME_REQUIREMENTS);
    let output = temp.path().join("out.csv");

    let config = ChecklistConfig {
        start_section: "3".to_string(),
        ..ChecklistConfig::default()
    };
    let report = checklist::generate(&config, &input, &output).unwrap();

    assert_eq!(report.items.len(), 1);
    assert_eq!(report.items[0].name, "Пользователь может купить премиум-подписку");
    assert_eq!(report.items[0].section, "3.1 Магазин");
}

#[test]
fn test_heading_statement_respects_scope() {
    let temp = TempDir::new().unwrap();
    let input = write_doc(
        temp.path(),
        "heading.md",
        "## 2.3 Раздел: Функция X должна отображать кнопку\n",
    );
    let output = temp.path().join("out.csv");

    let in_scope = checklist::generate(&ChecklistConfig::default(), &input, &output).unwrap();
    assert!(!in_scope.items.is_empty());

    let config = ChecklistConfig {
        start_section: "3".to_string(),
        ..ChecklistConfig::default()
    };
    let out_of_scope = checklist::generate(&config, &input, &output).unwrap();
    assert!(out_of_scope.items.is_empty());
    assert_eq!(read_rows(&output).len(), 1);
}

#[test]
fn test_custom_platforms_from_config() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("qakit.toml"),
        "[checklist]\nplatforms = [\"Web\", \"Desktop\"]\n",
    )
    .unwrap();
    let config = QakitConfig::load(temp.path(), None).unwrap();

    let input = write_doc(
        temp.path(),
        "doc.md",
        "## 2.1 Вход\n\nПользователь должен войти по паролю.\n",
    );
    let output = temp.path().join("out.csv");
    checklist::generate(&config.checklist, &input, &output).unwrap();

    let rows = read_rows(&output);
    assert_eq!(rows[0][2..4], ["Web".to_string(), "Desktop".to_string()]);
    assert!(rows.iter().all(|r| r.len() == 7));
}

#[test]
fn test_missing_input_is_error() {
    let temp = TempDir::new().unwrap();
    let output = temp.path().join("out.csv");
    let err = checklist::generate(
        &ChecklistConfig::default(),
        &temp.path().join("missing.md"),
        &output,
    )
    .unwrap_err();

    assert!(matches!(err, ChecklistError::InputNotFound(_)));
    assert!(!output.exists());
}

#[test]
fn test_normalize_is_idempotent_on_document_text() {
    for line in GAME_REQUIREMENTS.lines() {
        let once = normalize(line);
        assert_eq!(normalize(&once), once, "not idempotent for {:?}", line);
    }
}
