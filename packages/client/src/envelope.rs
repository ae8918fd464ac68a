// ABOUTME: Response body conventions of the console backend
// ABOUTME: `{ "data": ... }` success envelope and `{ "message": ... }` error bodies

use reqwest::StatusCode;
use serde_json::Value;

/// Payload of a success body: the `data` member when present, the whole body otherwise
pub fn unwrap_envelope(body: Value) -> Value {
    match body {
        Value::Object(mut map) if map.contains_key("data") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

/// Parse a 2xx body. An empty body is `null`.
pub fn parse_success_body(body: &[u8]) -> Result<Value, serde_json::Error> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(body).map(unwrap_envelope)
}

/// Server-supplied message from an error body, if the body is JSON with a non-empty string `message`
pub fn parse_error_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    value
        .get("message")?
        .as_str()
        .filter(|message| !message.trim().is_empty())
        .map(str::to_string)
}

/// Message for a non-2xx response, falling back to `HTTP <status>`
pub fn failure_message(status: StatusCode, body: &[u8]) -> String {
    parse_error_message(body).unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
}
