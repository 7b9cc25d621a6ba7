use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// Title and version from the `info` block of an OpenAPI document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiInfo {
    pub title: String,
    pub version: String,
}

/// A path or query parameter of an operation
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    /// `path`, `query`, `header` or `cookie`
    pub location: String,
}

/// One HTTP operation of the API
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoint {
    pub path: String,
    /// Upper-case HTTP method
    pub method: String,
    pub summary: String,
    pub tags: Vec<String>,
    pub parameters: Vec<Parameter>,
    /// Resolved request body schema; `None` when absent or empty
    pub request_body: Option<Map<String, Value>>,
    /// Response code to response object, in document order
    pub responses: Map<String, Value>,
    /// Operation declares a non-empty `security` requirement
    pub secured: bool,
}

impl Endpoint {
    /// Checklist section: the first tag, or `Default`
    pub fn section(&self) -> &str {
        self.tags.first().map(String::as_str).unwrap_or("Default")
    }

    /// Properties of the request body schema, if any
    pub fn body_properties(&self) -> Option<&Map<String, Value>> {
        self.request_body
            .as_ref()
            .and_then(|body| body.get("properties"))
            .and_then(Value::as_object)
    }

    /// Names listed in the request body's `required` array
    pub fn required_fields(&self) -> Vec<&str> {
        self.request_body
            .as_ref()
            .and_then(|body| body.get("required"))
            .and_then(Value::as_array)
            .map(|fields| fields.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    pub fn path_parameters(&self) -> impl Iterator<Item = &Parameter> {
        self.parameters.iter().filter(|p| p.location == "path")
    }

    /// Description of a documented response code
    pub fn response_description(&self, code: &str) -> Option<&str> {
        self.responses
            .get(code)
            .and_then(|response| response.get("description"))
            .and_then(Value::as_str)
    }
}

/// Kind of generated API check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum CaseKind {
    Positive,
    /// Known field sent with an invalid value
    InvalidField(String),
    /// Required field left out of the body
    MissingField(String),
    Unauthorized,
    Forbidden,
    NotFound,
    Duplicate,
    RateLimit,
}

impl fmt::Display for CaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaseKind::Positive => write!(f, "Positive"),
            CaseKind::InvalidField(field) => write!(f, "Validation - {}", field),
            CaseKind::MissingField(field) => write!(f, "Validation - missing {}", field),
            CaseKind::Unauthorized => write!(f, "Unauthorized"),
            CaseKind::Forbidden => write!(f, "Forbidden"),
            CaseKind::NotFound => write!(f, "Not Found"),
            CaseKind::Duplicate => write!(f, "Duplicate"),
            CaseKind::RateLimit => write!(f, "Rate-Limit"),
        }
    }
}

impl From<CaseKind> for String {
    fn from(kind: CaseKind) -> Self {
        kind.to_string()
    }
}

/// A single generated API check
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiTestCase {
    pub section: String,
    pub endpoint: String,
    pub method: String,
    pub kind: CaseKind,
    /// Body, parameters and token description
    pub input: String,
    pub expected_code: String,
    pub expected_result: String,
}

/// JSON output of `qakit api-checklist --json`
#[derive(Debug, Clone, Serialize)]
pub struct ApiChecklistJsonOutput {
    pub project: String,
    pub api: ApiInfo,
    pub output: String,
    pub endpoints: usize,
    pub per_section: BTreeMap<String, usize>,
    pub cases: Vec<ApiTestCase>,
}
