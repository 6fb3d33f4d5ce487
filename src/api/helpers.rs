//! Proxy response builders shared by the HTTP-facing handlers.
//!
//! API Gateway expects `{statusCode, headers, body}` where `body` is a
//! string, so JSON payloads are always encoded before they leave here.

use serde::Serialize;
use serde_json::{Map, Value, json};

// ============================================================================
// Headers
// ============================================================================

fn json_headers() -> Map<String, Value> {
    let mut headers = Map::new();
    headers.insert("Content-Type".into(), json!("application/json"));
    headers
}

/// Headers for the browser-facing booking API.
#[must_use]
pub fn cors_headers() -> Map<String, Value> {
    let mut headers = json_headers();
    headers.insert(
        "Access-Control-Allow-Headers".into(),
        json!("Content-Type,X-Amz-Date,Authorization,X-Api-Key,X-Amz-Security-Token"),
    );
    headers.insert("Access-Control-Allow-Origin".into(), json!("*"));
    headers.insert("Access-Control-Allow-Methods".into(), json!("*"));
    headers.insert("Accept-Version".into(), json!("*"));
    headers
}

// ============================================================================
// Response Builders
// ============================================================================

fn build(status_code: u16, headers: Map<String, Value>, body: String) -> Value {
    json!({
        "statusCode": status_code,
        "headers": headers,
        "body": body,
    })
}

fn encode<T: Serialize + ?Sized>(body: &T) -> String {
    serde_json::to_string(body).unwrap_or_else(|_| "{}".to_string())
}

/// Returns a response whose body is `body` encoded as JSON.
#[must_use]
pub fn json_response<T: Serialize + ?Sized>(status_code: u16, body: &T) -> Value {
    build(status_code, json_headers(), encode(body))
}

/// Same as [`json_response`] with the CORS header set.
#[must_use]
pub fn cors_response<T: Serialize + ?Sized>(status_code: u16, body: &T) -> Value {
    build(status_code, cors_headers(), encode(body))
}

/// Returns an error response with the given status code and message.
#[must_use]
pub fn err_response(status_code: u16, message: &str) -> Value {
    json_response(status_code, &error_body(status_code, message))
}

#[must_use]
pub fn cors_err_response(status_code: u16, message: &str) -> Value {
    cors_response(status_code, &error_body(status_code, message))
}

#[must_use]
pub fn text_response(status_code: u16, text: &str) -> Value {
    let mut headers = Map::new();
    headers.insert("Content-Type".into(), json!("text/plain"));
    build(status_code, headers, text.to_string())
}

fn error_body(status_code: u16, message: &str) -> Value {
    json!({ "statusCode": status_code, "message": message })
}

/// Decodes the JSON `body` of a proxy response. Test and logging helper.
#[must_use]
pub fn response_body(response: &Value) -> Option<Value> {
    response
        .get("body")
        .and_then(Value::as_str)
        .and_then(|b| serde_json::from_str(b).ok())
}
