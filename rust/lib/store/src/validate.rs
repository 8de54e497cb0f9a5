//! Required-field presence checks for create requests.
//!
//! Presence follows JavaScript truthiness: `null`, `false`, `0`, `NaN` and
//! the empty string all count as missing. No type or format validation
//! happens here.

use hrms_core::ServiceError;
use serde_json::{Map, Value};

/// Whether a JSON value is "truthy".
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Fail with a 400 naming every required field that is absent or falsy.
pub fn check_required(body: &Map<String, Value>, required: &[&str]) -> Result<(), ServiceError> {
    let missing: Vec<&str> = required
        .iter()
        .copied()
        .filter(|field| !body.get(*field).is_some_and(is_truthy))
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ServiceError::Validation(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )))
    }
}

/// Require the request body to be a JSON object.
pub fn as_object(body: &Value) -> Result<&Map<String, Value>, ServiceError> {
    body.as_object()
        .ok_or_else(|| ServiceError::Validation("request body must be a JSON object".into()))
}
