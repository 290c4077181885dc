use serde::Serialize;
use serde_json::Value;

use super::SchemaId;

/// Pseudo-field used when the payload as a whole has the wrong shape.
pub const BODY_FIELD: &str = "$body";

/// Machine-readable reason a field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationCode {
    Missing,
    InvalidType,
    Empty,
    InvalidEmail,
    TooShort,
}

/// A single rejected field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub field: &'static str,
    pub code: ViolationCode,
    pub message: String,
}

impl Violation {
    pub fn new(field: &'static str, code: ViolationCode, message: impl Into<String>) -> Self {
        Self {
            field,
            code,
            message: message.into(),
        }
    }

    pub(crate) fn missing(field: &'static str) -> Self {
        Self::new(field, ViolationCode::Missing, format!("{field} is required"))
    }

    pub(crate) fn invalid_type(field: &'static str, found: &Value) -> Self {
        Self::new(
            field,
            ViolationCode::InvalidType,
            format!("{field} must be a string, found {}", json_kind(found)),
        )
    }

    pub(crate) fn body_not_object(found: &Value) -> Self {
        Self::new(
            BODY_FIELD,
            ViolationCode::InvalidType,
            format!("payload must be a JSON object, found {}", json_kind(found)),
        )
    }
}

/// Every violation collected while checking one payload against one schema.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{schema} payload rejected: {}", summarize(.violations))]
pub struct ValidationFailure {
    pub schema: SchemaId,
    pub violations: Vec<Violation>,
}

impl ValidationFailure {
    pub fn new(schema: SchemaId, violations: Vec<Violation>) -> Self {
        Self { schema, violations }
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.violations.iter().map(|violation| violation.field)
    }

    pub fn has_violation(&self, field: &str, code: ViolationCode) -> bool {
        self.violations
            .iter()
            .any(|violation| violation.field == field && violation.code == code)
    }
}

fn summarize(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|violation| violation.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
