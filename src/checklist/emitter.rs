use crate::models::{ChecklistItem, ChecklistResult, ChecklistRow};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// UTF-8 byte order mark; spreadsheet tools use it to detect the encoding
pub(crate) const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

const NUMBER_COLUMN: &str = "№ п\\п";
const NAME_COLUMN: &str = "Название";
const TRAILING_COLUMNS: [&str; 3] = ["Версия сборки", "Ссылка на баг-репорт", "Комментарий"];

/// Lays out checklist items as section-grouped, numbered rows and writes them as CSV
pub struct ChecklistEmitter {
    platforms: Vec<String>,
}

impl ChecklistEmitter {
    /// Create an emitter with one result column per platform
    pub fn new(platforms: Vec<String>) -> Self {
        Self { platforms }
    }

    /// Number of columns in every row
    pub fn width(&self) -> usize {
        2 + self.platforms.len() + TRAILING_COLUMNS.len()
    }

    /// Column titles
    pub fn header(&self) -> Vec<String> {
        let mut header = vec![NUMBER_COLUMN.to_string(), NAME_COLUMN.to_string()];
        header.extend(self.platforms.iter().cloned());
        header.extend(TRAILING_COLUMNS.iter().map(|c| c.to_string()));
        header
    }

    /// Lay out items as rows
    ///
    /// A section row precedes each run of items from the same section.
    /// Colon-terminated items become unnumbered labels; every other item gets
    /// the next number of a single counter starting at 1.
    pub fn rows<'a>(&self, items: &'a [ChecklistItem]) -> Vec<ChecklistRow<'a>> {
        let mut rows = vec![ChecklistRow::Header];
        let mut current_section: Option<&str> = None;
        let mut number = 0;

        for item in items {
            if current_section != Some(item.section.as_str()) {
                current_section = Some(item.section.as_str());
                rows.push(ChecklistRow::Section(&item.section));
            }

            if item.is_label() {
                rows.push(ChecklistRow::Label(item));
            } else {
                number += 1;
                rows.push(ChecklistRow::Check { number, item });
            }
        }

        rows
    }

    /// Render a row as CSV fields; execution-tracking columns stay empty
    pub fn record(&self, row: &ChecklistRow<'_>) -> Vec<String> {
        let mut record = match row {
            ChecklistRow::Header => return self.header(),
            ChecklistRow::Section(section) => vec![section.to_string(), String::new()],
            ChecklistRow::Check { number, item } => vec![number.to_string(), item.name.clone()],
            ChecklistRow::Label(item) => vec![String::new(), item.name.clone()],
        };
        record.resize(self.width(), String::new());
        record
    }

    /// Write all rows as CSV
    pub fn write<W: Write>(&self, items: &[ChecklistItem], writer: W) -> ChecklistResult<()> {
        let mut csv = csv::WriterBuilder::new().flexible(false).from_writer(writer);
        for row in self.rows(items) {
            csv.write_record(self.record(&row))?;
        }
        csv.flush()?;
        Ok(())
    }

    /// Write the checklist to a CSV file, prefixed with a UTF-8 BOM
    pub fn write_file(&self, items: &[ChecklistItem], path: &Path) -> ChecklistResult<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        writer.write_all(UTF8_BOM)?;
        self.write(items, &mut writer)?;
        writer.flush()?;
        tracing::debug!(path = %path.display(), items = items.len(), "checklist written");
        Ok(())
    }
}

impl Default for ChecklistEmitter {
    fn default() -> Self {
        Self::new(crate::models::ChecklistConfig::default().platforms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_items() -> Vec<ChecklistItem> {
        vec![
            ChecklistItem::new("2.1 Меню", "Меню содержит кнопки:"),
            ChecklistItem::new("2.1 Меню", "Кнопка старта отображается"),
            ChecklistItem::new("2.1 Меню", "Кнопка выхода отображается"),
            ChecklistItem::new("2.2 Склад", "Склад доступен с главного экрана"),
        ]
    }

    fn write_to_string(emitter: &ChecklistEmitter, items: &[ChecklistItem]) -> String {
        let mut buffer = Vec::new();
        emitter.write(items, &mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_header_columns() {
        let emitter = ChecklistEmitter::default();
        assert_eq!(
            emitter.header(),
            vec![
                "№ п\\п",
                "Название",
                "Android",
                "IOS",
                "ПК",
                "Версия сборки",
                "Ссылка на баг-репорт",
                "Комментарий",
            ]
        );
        assert_eq!(emitter.width(), 8);
    }

    #[test]
    fn test_empty_checklist_is_header_only() {
        let emitter = ChecklistEmitter::default();
        assert_eq!(emitter.rows(&[]), vec![ChecklistRow::Header]);

        let output = write_to_string(&emitter, &[]);
        assert_eq!(output.lines().count(), 1);
        assert!(output.starts_with("№ п\\п,Название,"));
    }

    #[test]
    fn test_rows_group_by_section() {
        let emitter = ChecklistEmitter::default();
        let items = sample_items();
        let rows = emitter.rows(&items);

        assert_eq!(rows.len(), 7);
        assert_eq!(rows[0], ChecklistRow::Header);
        assert_eq!(rows[1], ChecklistRow::Section("2.1 Меню"));
        assert_eq!(rows[2], ChecklistRow::Label(&items[0]));
        assert_eq!(rows[3], ChecklistRow::Check { number: 1, item: &items[1] });
        assert_eq!(rows[4], ChecklistRow::Check { number: 2, item: &items[2] });
        assert_eq!(rows[5], ChecklistRow::Section("2.2 Склад"));
        assert_eq!(rows[6], ChecklistRow::Check { number: 3, item: &items[3] });
    }

    #[test]
    fn test_numbering_is_gapless() {
        let emitter = ChecklistEmitter::default();
        let mut items = Vec::new();
        for i in 0..20 {
            let name = if i % 4 == 0 {
                format!("Группа {}:", i)
            } else {
                format!("Проверка {}", i)
            };
            items.push(ChecklistItem::new(format!("2.{} Раздел", i / 5), name));
        }

        let numbers: Vec<usize> = emitter
            .rows(&items)
            .iter()
            .filter_map(|row| match row {
                ChecklistRow::Check { number, .. } => Some(*number),
                _ => None,
            })
            .collect();

        assert_eq!(numbers, (1..=15).collect::<Vec<_>>());
    }

    #[test]
    fn test_records_pad_to_width() {
        let emitter = ChecklistEmitter::new(vec!["Web".to_string()]);
        let items = sample_items();
        let rows = emitter.rows(&items);

        assert_eq!(emitter.record(&rows[1]), vec!["2.1 Меню", "", "", "", "", ""]);
        assert_eq!(emitter.record(&rows[2]), vec!["", "Меню содержит кнопки:", "", "", "", ""]);
        assert_eq!(
            emitter.record(&rows[3]),
            vec!["1", "Кнопка старта отображается", "", "", "", ""]
        );
    }

    #[test]
    fn test_csv_quoting() {
        let emitter = ChecklistEmitter::default();
        let items = vec![ChecklistItem::new("2.1 Меню", "Кнопки \"Да\", \"Нет\" отображаются")];
        let output = write_to_string(&emitter, &items);
        assert!(output.contains("1,\"Кнопки \"\"Да\"\", \"\"Нет\"\" отображаются\",,,,,,"));
    }

    #[test]
    fn test_write_file_has_bom() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("checklist.csv");
        ChecklistEmitter::default().write_file(&sample_items(), &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(UTF8_BOM));
        let text = String::from_utf8(bytes[UTF8_BOM.len()..].to_vec()).unwrap();
        assert_eq!(text.lines().count(), 7);
    }
}
