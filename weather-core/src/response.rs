use serde_json::Value;

use crate::{
    error::{Result, WeatherError},
    infocode,
    model::JsonMap,
};

/// Decode a JSON body into an object.
pub(crate) fn decode(body: &str) -> Result<JsonMap> {
    serde_json::from_str::<JsonMap>(body).map_err(|err| WeatherError::Http {
        message: format!("Failed to decode response body: {err}"),
        code: None,
        source: Some(Box::new(err)),
    })
}

/// Fail unless the upstream `status` field is 1.
///
/// `status` is compared numerically, so `1`, `"1"` and `1.0` all succeed.
pub fn check(response: &JsonMap) -> Result<()> {
    if status_is_ok(response.get("status")) {
        return Ok(());
    }

    let code = response.get("infocode").and_then(code_string);
    let message = infocode::describe(code.as_deref());

    tracing::warn!(infocode = code.as_deref().unwrap_or("-"), "upstream API reported failure: {message}");

    Err(WeatherError::http(message, code.as_deref().and_then(|c| c.parse().ok())))
}

fn status_is_ok(status: Option<&Value>) -> bool {
    match status {
        Some(Value::Number(n)) => n.as_f64() == Some(1.0),
        Some(Value::String(s)) => s.trim().parse::<f64>().is_ok_and(|v| v == 1.0),
        Some(Value::Bool(b)) => *b,
        _ => false,
    }
}

fn code_string(code: &Value) -> Option<String> {
    match code {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
