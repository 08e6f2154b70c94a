//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod budget;
pub mod forecast;
pub mod health;
pub mod savings;

// Re-export all handlers for use in router
pub use budget::*;
pub use forecast::*;
pub use health::*;
pub use savings::*;

use serde_json::{Map, Value};

use crate::AppError;

/// Parse a request body that must be a JSON object
pub(crate) fn parse_json_object(bytes: &[u8]) -> Result<Map<String, Value>, AppError> {
    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(AppError::bad_request("Request body must be a JSON object")),
        Err(_) => Err(AppError::bad_request("Invalid JSON")),
    }
}

/// Read a number from a JSON number or numeric string
///
/// Clients send amounts both ways, so `"35000"` and `35000` are equivalent.
/// Non-finite values are rejected.
pub(crate) fn coerce_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    number.is_finite().then_some(number)
}

/// Read an integer from a JSON number or integer string
///
/// Fractional numbers truncate toward zero (`6.5` -> `6`); fractional
/// strings such as `"6.5"` are rejected.
pub(crate) fn coerce_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.abs() < i64::MAX as f64)
                .map(|f| f.trunc() as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}
