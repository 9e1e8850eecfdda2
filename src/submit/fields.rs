use serde_json::Value;

use crate::error::AppError;

pub const MISSING_FIELDS: &str = "Name and Value are required.";

/// The validated pair a request must carry.
pub struct SubmissionFields {
    pub name: String,
    pub value: String,
}

/// Pull `name` and `value` out of a parsed body. Both must be present,
/// textual, and non-empty; anything else is a validation failure.
pub fn extract(raw: &Value) -> Result<SubmissionFields, AppError> {
    match (text_field(raw, "name"), text_field(raw, "value")) {
        (Some(name), Some(value)) => Ok(SubmissionFields { name, value }),
        _ => Err(AppError::Validation(MISSING_FIELDS.to_string())),
    }
}

fn text_field(raw: &Value, key: &str) -> Option<String> {
    raw.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
