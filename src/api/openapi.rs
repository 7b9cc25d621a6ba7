//! OpenAPI / Swagger JSON reading.

use crate::models::{ApiInfo, ChecklistError, ChecklistResult, Endpoint, Parameter};
use serde_json::{Map, Value};
use std::path::Path;

const HTTP_METHODS: [&str; 7] = ["get", "post", "put", "patch", "delete", "options", "head"];

/// A parsed OpenAPI document
#[derive(Debug, Clone)]
pub struct OpenApiDocument {
    root: Value,
}

impl OpenApiDocument {
    pub fn new(root: Value) -> Self {
        Self { root }
    }

    /// Load a JSON OpenAPI document from disk
    pub fn load(path: &Path) -> ChecklistResult<Self> {
        if !path.exists() {
            return Err(ChecklistError::InputNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| ChecklistError::Read(path.to_path_buf(), e))?;
        let root = serde_json::from_str(&content)
            .map_err(|e| ChecklistError::InvalidJson(path.to_path_buf(), e))?;
        Ok(Self::new(root))
    }

    pub fn info(&self) -> ApiInfo {
        let field = |name: &str, default: &str| {
            self.root
                .get("info")
                .and_then(|info| info.get(name))
                .and_then(Value::as_str)
                .unwrap_or(default)
                .to_string()
        };
        ApiInfo {
            title: field("title", "Unknown API"),
            version: field("version", "1.0.0"),
        }
    }

    /// Follow a local `#/a/b/c` reference
    pub fn resolve_ref(&self, reference: &str) -> Option<&Value> {
        let pointer = reference.strip_prefix('#')?;
        if !pointer.starts_with('/') {
            return None;
        }
        self.root.pointer(pointer)
    }

    /// The value itself, or its target when it is a `$ref` object
    fn resolved<'a>(&'a self, value: &'a Value) -> &'a Value {
        match value.get("$ref").and_then(Value::as_str) {
            Some(reference) => self.resolve_ref(reference).unwrap_or(&Value::Null),
            None => value,
        }
    }

    /// All operations, in document order
    ///
    /// Non-method keys of a path item (`parameters`, `summary`, ...) are skipped.
    pub fn endpoints(&self) -> Vec<Endpoint> {
        let Some(paths) = self.root.get("paths").and_then(Value::as_object) else {
            return Vec::new();
        };

        let mut endpoints = Vec::new();
        for (path, item) in paths {
            let Some(operations) = item.as_object() else {
                continue;
            };
            for (method, operation) in operations {
                if !HTTP_METHODS.contains(&method.to_lowercase().as_str()) {
                    continue;
                }
                endpoints.push(self.endpoint(path, method, operation));
            }
        }

        tracing::debug!(count = endpoints.len(), "parsed endpoints");
        endpoints
    }

    fn endpoint(&self, path: &str, method: &str, operation: &Value) -> Endpoint {
        let text = |name: &str| {
            operation
                .get(name)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };

        let tags = match operation.get("tags").and_then(Value::as_array) {
            Some(tags) => tags.iter().filter_map(Value::as_str).map(String::from).collect(),
            None => vec!["Default".to_string()],
        };

        let parameters = operation
            .get("parameters")
            .and_then(Value::as_array)
            .map(|params| {
                params
                    .iter()
                    .map(|param| self.resolved(param))
                    .map(|param| Parameter {
                        name: param
                            .get("name")
                            .and_then(Value::as_str)
                            .unwrap_or("id")
                            .to_string(),
                        location: param
                            .get("in")
                            .and_then(Value::as_str)
                            .unwrap_or_default()
                            .to_string(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        let responses = operation
            .get("responses")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();

        let secured = operation
            .get("security")
            .and_then(Value::as_array)
            .is_some_and(|requirements| !requirements.is_empty());

        Endpoint {
            path: path.to_string(),
            method: method.to_uppercase(),
            summary: text("summary"),
            tags,
            parameters,
            request_body: self.request_schema(operation),
            responses,
            secured,
        }
    }

    /// Schema of the first declared request body content type
    fn request_schema(&self, operation: &Value) -> Option<Map<String, Value>> {
        let content = operation
            .get("requestBody")
            .and_then(|body| body.get("content"))
            .and_then(Value::as_object)?;
        let (_, media) = content.iter().next()?;
        let schema = media.get("schema")?;
        self.resolved(schema)
            .as_object()
            .filter(|schema| !schema.is_empty())
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn document() -> OpenApiDocument {
        OpenApiDocument::new(json!({
            "openapi": "3.0.1",
            "info": {"title": "Arena API", "version": "2.1"},
            "paths": {
                "/api/auth/signup": {
                    "parameters": [],
                    "post": {
                        "tags": ["Auth"],
                        "summary": "Регистрация",
                        "requestBody": {
                            "content": {
                                "application/json": {
                                    "schema": {"$ref": "#/components/schemas/SignUp"}
                                }
                            }
                        },
                        "responses": {"201": {"description": "Created"}}
                    }
                },
                "/api/users/{id}": {
                    "get": {
                        "parameters": [{"$ref": "#/components/parameters/Id"}],
                        "security": [{"Bearer": []}],
                        "responses": {"200": {"description": "OK"}, "404": {"description": "Not found"}}
                    },
                    "delete": {"tags": [], "security": []}
                }
            },
            "components": {
                "schemas": {
                    "SignUp": {
                        "type": "object",
                        "required": ["email"],
                        "properties": {"email": {"type": "string"}, "password": {"type": "string"}}
                    }
                },
                "parameters": {"Id": {"name": "id", "in": "path"}}
            }
        }))
    }

    #[test]
    fn test_info() {
        let info = document().info();
        assert_eq!(info.title, "Arena API");
        assert_eq!(info.version, "2.1");

        let empty = OpenApiDocument::new(json!({})).info();
        assert_eq!(empty.title, "Unknown API");
        assert_eq!(empty.version, "1.0.0");
    }

    #[test]
    fn test_resolve_ref() {
        let doc = document();
        assert!(doc.resolve_ref("#/components/schemas/SignUp").is_some());
        assert!(doc.resolve_ref("#/components/schemas/Missing").is_none());
        assert!(doc.resolve_ref("other.json#/x").is_none());
        assert!(doc.resolve_ref("").is_none());
    }

    #[test]
    fn test_endpoints() {
        let endpoints = document().endpoints();
        assert_eq!(endpoints.len(), 3);

        let signup = &endpoints[0];
        assert_eq!(signup.method, "POST");
        assert_eq!(signup.section(), "Auth");
        assert_eq!(signup.summary, "Регистрация");
        assert_eq!(signup.required_fields(), vec!["email"]);
        assert!(!signup.secured);

        let get_user = &endpoints[1];
        assert_eq!(get_user.section(), "Default");
        assert_eq!(get_user.parameters[0].name, "id");
        assert_eq!(get_user.parameters[0].location, "path");
        assert!(get_user.secured);
        assert!(get_user.request_body.is_none());
        let codes: Vec<&str> = get_user.responses.keys().map(String::as_str).collect();
        assert_eq!(codes, vec!["200", "404"]);

        let delete = &endpoints[2];
        assert_eq!(delete.method, "DELETE");
        assert!(delete.tags.is_empty());
        assert!(!delete.secured);
    }

    #[test]
    fn test_document_without_paths() {
        assert!(OpenApiDocument::new(json!({"info": {}})).endpoints().is_empty());
    }

    #[test]
    fn test_load_errors() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("swagger.json");
        assert!(matches!(
            OpenApiDocument::load(&missing),
            Err(ChecklistError::InputNotFound(_))
        ));

        std::fs::write(&missing, "{broken").unwrap();
        assert!(matches!(
            OpenApiDocument::load(&missing),
            Err(ChecklistError::InvalidJson(..))
        ));
    }
}
