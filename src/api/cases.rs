//! API check generation.
//!
//! Every endpoint gets a positive case. Validation, authorization, not-found
//! and response-driven cases are added when the operation's shape calls for
//! them.

use crate::models::{ApiTestCase, CaseKind, Endpoint};
use serde_json::{json, Map, Value};

/// Fields with a known invalid value and the expected validation message
const VALIDATION_FIELDS: [(&str, &str, &str); 4] = [
    ("email", "invalid", "Ошибка валидации email"),
    ("password", "123", "Ошибка валидации пароля"),
    ("confirmPassword", "different_password", "Пароли должны совпадать"),
    ("nickname", "", "Никнейм не может быть пустым"),
];

/// Paths reachable without a token
const PUBLIC_PATHS: [&str; 7] = [
    "/auth/signup",
    "/auth/signin",
    "/auth/restore",
    "/auth/reset",
    "/auth/sendverification",
    "/auth/verifyemail",
    "/buildinginfo",
];

const SUCCESS_CODES: [&str; 3] = ["200", "201", "204"];

/// Path fragment to "entity not found" message
const NOT_FOUND_MESSAGES: [(&str, &str); 8] = [
    ("/user", "Пользователь не найден"),
    ("/character", "Персонаж не найден"),
    ("/building", "Здание не найдено"),
    ("/match", "Матч не найден"),
    ("/event", "Событие не найдено"),
    ("/tournament", "Турнир не найден"),
    ("/admin", "Администратор не найден"),
    ("/role", "Роль не найдена"),
];

/// Generate cases for all endpoints, in endpoint order
pub fn generate_all(endpoints: &[Endpoint]) -> Vec<ApiTestCase> {
    endpoints.iter().flat_map(generate_for_endpoint).collect()
}

/// Generate the cases for one endpoint
pub fn generate_for_endpoint(endpoint: &Endpoint) -> Vec<ApiTestCase> {
    let case = |kind: CaseKind, input: String, code: &str, result: String| ApiTestCase {
        section: endpoint.section().to_string(),
        endpoint: endpoint.path.clone(),
        method: endpoint.method.clone(),
        kind,
        input,
        expected_code: code.to_string(),
        expected_result: result,
    };

    let mut cases = vec![case(
        CaseKind::Positive,
        input_description(endpoint),
        success_code(endpoint),
        success_description(endpoint),
    )];

    if let Some(properties) = endpoint.body_properties() {
        for (name, _) in properties {
            let Some((_, invalid, message)) = VALIDATION_FIELDS
                .iter()
                .find(|(field, _, _)| field.eq_ignore_ascii_case(name))
            else {
                continue;
            };
            cases.push(case(
                CaseKind::InvalidField(name.clone()),
                body_with_invalid_field(properties, name, invalid),
                "400",
                message.to_string(),
            ));
        }

        // one missing-field case is enough
        if let Some(field) = endpoint
            .required_fields()
            .into_iter()
            .find(|field| properties.contains_key(*field))
        {
            cases.push(case(
                CaseKind::MissingField(field.to_string()),
                body_without_field(properties, field),
                "400",
                format!("Отсутствует обязательное поле {}", field),
            ));
        }
    }

    if requires_auth(endpoint) {
        cases.push(case(
            CaseKind::Unauthorized,
            "без токена".to_string(),
            "401",
            "Требуется авторизация".to_string(),
        ));
        if is_admin(endpoint) {
            cases.push(case(
                CaseKind::Forbidden,
                "Authorization: Bearer $USER_TOKEN".to_string(),
                "403",
                "Доступ запрещен".to_string(),
            ));
        }
    }

    if has_id_param(endpoint) {
        cases.push(case(
            CaseKind::NotFound,
            "id=non_existent_uuid + токен".to_string(),
            "404",
            not_found_message(endpoint).to_string(),
        ));
    }

    for (code, response) in &endpoint.responses {
        let description = response
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or_default();
        let lower = description.to_lowercase();

        match code.as_str() {
            "409" if !lower.contains("duplicate")
                && (lower.contains("exists") || lower.contains("уже")) =>
            {
                cases.push(case(
                    CaseKind::Duplicate,
                    input_description(endpoint),
                    "409",
                    description.to_string(),
                ));
            }
            "429" => cases.push(case(
                CaseKind::RateLimit,
                "10 запросов подряд".to_string(),
                "429",
                "Превышен лимит запросов".to_string(),
            )),
            _ => {}
        }
    }

    cases
}

fn is_admin(endpoint: &Endpoint) -> bool {
    endpoint.path.to_lowercase().contains("/admin/")
}

/// Whether the endpoint needs a token
///
/// A declared `security` requirement wins; otherwise known public auth paths
/// are open and anything under `/api/` or `/admin/` is protected.
pub fn requires_auth(endpoint: &Endpoint) -> bool {
    if endpoint.secured {
        return true;
    }
    let lower = endpoint.path.to_lowercase();
    if PUBLIC_PATHS.iter().any(|public| lower.contains(public)) {
        return false;
    }
    endpoint.path.contains("/api/") || endpoint.path.contains("/admin/")
}

fn has_id_param(endpoint: &Endpoint) -> bool {
    endpoint.path.contains("{id}")
        || endpoint
            .path_parameters()
            .any(|p| p.name.to_lowercase().contains("id"))
}

fn success_code(endpoint: &Endpoint) -> &'static str {
    SUCCESS_CODES
        .iter()
        .find(|code| endpoint.responses.contains_key(**code))
        .copied()
        .unwrap_or("200")
}

fn success_description(endpoint: &Endpoint) -> String {
    let documented = SUCCESS_CODES
        .iter()
        .filter_map(|code| endpoint.response_description(code))
        .find(|description| !description.is_empty());
    if let Some(description) = documented {
        return description.to_string();
    }

    if !endpoint.summary.is_empty() {
        return endpoint.summary.clone();
    }
    match endpoint.method.as_str() {
        "GET" => "Данные получены",
        "POST" => "Создано успешно",
        "PUT" | "PATCH" => "Обновлено успешно",
        "DELETE" => "Удалено успешно",
        _ => "Успешно",
    }
    .to_string()
}

fn not_found_message(endpoint: &Endpoint) -> &'static str {
    let lower = endpoint.path.to_lowercase();
    NOT_FOUND_MESSAGES
        .iter()
        .find(|(fragment, _)| lower.contains(fragment))
        .map(|(_, message)| *message)
        .unwrap_or("Не найдено")
}

/// Path parameters, sample body and token hint of a valid request
pub fn input_description(endpoint: &Endpoint) -> String {
    let mut parts: Vec<String> = endpoint
        .path_parameters()
        .map(|p| format!("{}=valid_uuid", p.name))
        .collect();

    if let Some(body) = &endpoint.request_body {
        let empty = Map::new();
        let properties = body
            .get("properties")
            .and_then(Value::as_object)
            .unwrap_or(&empty);
        parts.push(inline_json(&sample_body(properties)));
    }

    if requires_auth(endpoint) {
        parts.push(if is_admin(endpoint) { "+ админ токен" } else { "+ токен" }.to_string());
    }

    if parts.is_empty() {
        "без параметров".to_string()
    } else {
        parts.join(" ")
    }
}

fn property_type(schema: &Value) -> &str {
    schema.get("type").and_then(Value::as_str).unwrap_or("string")
}

/// Plausible valid body; properties of unsupported types are left out
fn sample_body(properties: &Map<String, Value>) -> Value {
    let mut body = Map::new();
    for (name, schema) in properties {
        let lower = name.to_lowercase();
        let value = if lower.contains("email") {
            if lower.contains("admin") {
                json!("admin@example.com")
            } else {
                json!("test@example.com")
            }
        } else if lower.contains("password") {
            json!("Test123!")
        } else if lower.contains("nickname") {
            json!("TestUser")
        } else if lower.contains("login") {
            json!("superadmin")
        } else if lower.contains("id") {
            json!("valid_uuid")
        } else if lower.contains("code") {
            json!("getcode")
        } else {
            match property_type(schema) {
                "string" => json!("string_value"),
                "integer" => json!(0),
                "number" => json!(0.0),
                "boolean" => json!(true),
                "array" => json!([]),
                _ => continue,
            }
        };
        body.insert(name.clone(), value);
    }
    Value::Object(body)
}

fn default_value(name: &str, schema: &Value) -> Value {
    let lower = name.to_lowercase();
    if lower.contains("email") {
        json!("test@example.com")
    } else if lower.contains("password") {
        json!("Test123!")
    } else if lower.contains("nickname") {
        json!("TestUser")
    } else {
        match property_type(schema) {
            "integer" => json!(0),
            "boolean" => json!(true),
            _ => json!("value"),
        }
    }
}

fn body_with_invalid_field(properties: &Map<String, Value>, field: &str, invalid: &str) -> String {
    let body: Map<String, Value> = properties
        .iter()
        .map(|(name, schema)| {
            let value = if name == field {
                json!(invalid)
            } else {
                default_value(name, schema)
            };
            (name.clone(), value)
        })
        .collect();
    inline_json(&Value::Object(body))
}

fn body_without_field(properties: &Map<String, Value>, field: &str) -> String {
    let body: Map<String, Value> = properties
        .iter()
        .filter(|(name, _)| name.as_str() != field)
        .map(|(name, schema)| (name.clone(), default_value(name, schema)))
        .collect();
    inline_json(&Value::Object(body))
}

/// Single-line JSON with a space after `:` and `,`
pub fn inline_json(value: &Value) -> String {
    match value {
        Value::Object(map) => {
            let entries: Vec<String> = map
                .iter()
                .map(|(key, value)| format!("{}: {}", Value::from(key.as_str()), inline_json(value)))
                .collect();
            format!("{{{}}}", entries.join(", "))
        }
        Value::Array(items) => {
            let items: Vec<String> = items.iter().map(inline_json).collect();
            format!("[{}]", items.join(", "))
        }
        other => other.to_string(),
    }
}
