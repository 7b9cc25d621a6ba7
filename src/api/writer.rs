use crate::checklist::emitter::UTF8_BOM;
use crate::models::{ApiTestCase, ChecklistResult};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

const HEADER: [&str; 12] = [
    "№",
    "Section",
    "Endpoint",
    "Method",
    "Type",
    "Input (Body / Params / Token)",
    "Expected Code",
    "Expected Result",
    "Actual Result",
    "Proofs",
    "Comment",
    "QA",
];

/// Execution-tracking columns left for the tester
const TRACKING_COLUMNS: usize = 4;

const LEGEND: [(&str, &str); 3] = [
    ("Actual Result", "- Фактический код ответа и результат"),
    ("Proofs", "- Доказательства (скриншоты, логи)"),
    ("X", "- Баг (результат не соответствует ожидаемому)"),
];

const CASE_TYPES: [(&str, &str); 8] = [
    ("Positive", "- Успешный сценарий с валидными данными"),
    ("Validation", "- Проверка валидации входных данных"),
    ("Unauthorized", "- Запрос без токена авторизации"),
    ("Forbidden", "- Запрос с недостаточными правами"),
    ("Not Found", "- Запрос с несуществующим ID"),
    ("Duplicate", "- Попытка создать дубликат"),
    ("Rate-Limit", "- Превышение лимита запросов"),
    ("State", "- Проверка состояния (уже выполнено, не завершено и т.д.)"),
];

/// Writes API checks as a CSV sheet: title, header, numbered rows, legend
pub struct ApiChecklistWriter {
    project: String,
}

impl ApiChecklistWriter {
    pub fn new(project: impl Into<String>) -> Self {
        Self { project: project.into() }
    }

    fn title(&self) -> String {
        if self.project.is_empty() {
            "API Чек-лист".to_string()
        } else {
            format!("API Чек-лист: {}", self.project)
        }
    }

    /// CSV fields of the `number`-th case
    pub fn record(number: usize, case: &ApiTestCase) -> Vec<String> {
        let mut record = vec![
            number.to_string(),
            case.section.clone(),
            case.endpoint.clone(),
            case.method.clone(),
            case.kind.to_string(),
            case.input.clone(),
            case.expected_code.clone(),
            case.expected_result.clone(),
        ];
        record.resize(record.len() + TRACKING_COLUMNS, String::new());
        record
    }

    pub fn write<W: Write>(&self, cases: &[ApiTestCase], writer: W) -> ChecklistResult<()> {
        let mut csv = csv::WriterBuilder::new().flexible(true).from_writer(writer);

        csv.write_record([self.title()])?;
        csv.write_record(HEADER)?;
        for (index, case) in cases.iter().enumerate() {
            csv.write_record(Self::record(index + 1, case))?;
        }

        csv.write_record([""])?;
        csv.write_record(["Легенда:"])?;
        for (term, meaning) in LEGEND {
            csv.write_record([term, meaning])?;
        }
        csv.write_record([""])?;
        csv.write_record(["Типы тестов:"])?;
        for (kind, meaning) in CASE_TYPES {
            csv.write_record([kind, meaning])?;
        }

        csv.flush()?;
        Ok(())
    }

    /// Write to a file, prefixed with a UTF-8 BOM
    pub fn write_file(&self, cases: &[ApiTestCase], path: &Path) -> ChecklistResult<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        writer.write_all(UTF8_BOM)?;
        self.write(cases, &mut writer)?;
        writer.flush()?;
        tracing::debug!(path = %path.display(), cases = cases.len(), "api checklist written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CaseKind;
    use tempfile::TempDir;

    fn case(kind: CaseKind, input: &str) -> ApiTestCase {
        ApiTestCase {
            section: "Auth".to_string(),
            endpoint: "/api/auth/signin".to_string(),
            method: "POST".to_string(),
            kind,
            input: input.to_string(),
            expected_code: "200".to_string(),
            expected_result: "OK".to_string(),
        }
    }

    fn read_records(bytes: &[u8]) -> Vec<Vec<String>> {
        csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(bytes)
            .records()
            .map(|r| r.unwrap().iter().map(String::from).collect())
            .collect()
    }

    #[test]
    fn test_layout() {
        let cases = vec![
            case(CaseKind::Positive, r#"{"login": "superadmin"}"#),
            case(CaseKind::InvalidField("password".into()), "x, y"),
        ];
        let mut buffer = Vec::new();
        ApiChecklistWriter::new("Арена").write(&cases, &mut buffer).unwrap();
        let records = read_records(&buffer);

        assert_eq!(records[0], vec!["API Чек-лист: Арена"]);
        assert_eq!(records[1], HEADER.to_vec());
        assert_eq!(records[2][0], "1");
        assert_eq!(records[2][5], r#"{"login": "superadmin"}"#);
        assert_eq!(records[3][0], "2");
        assert_eq!(records[3][4], "Validation - password");
        assert_eq!(records[3][5], "x, y");
        assert_eq!(records[3].len(), 12);
        assert!(records[3][8..].iter().all(String::is_empty));

        let flat: Vec<&str> = records.iter().map(|r| r[0].as_str()).collect();
        assert!(flat.contains(&"Легенда:"));
        assert!(flat.contains(&"Типы тестов:"));
        assert_eq!(records.last().unwrap()[0], "State");
    }

    #[test]
    fn test_title_without_project() {
        let mut buffer = Vec::new();
        ApiChecklistWriter::new("").write(&[], &mut buffer).unwrap();
        let records = read_records(&buffer);
        assert_eq!(records[0], vec!["API Чек-лист"]);
        assert_eq!(records[1][0], "№");
    }

    #[test]
    fn test_write_file_has_bom() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("api.csv");
        ApiChecklistWriter::new("x")
            .write_file(&[case(CaseKind::Unauthorized, "без токена")], &path)
            .unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(UTF8_BOM));
        assert!(String::from_utf8_lossy(&bytes).contains("без токена"));
    }
}
