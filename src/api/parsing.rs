use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::{Map, Value};

use crate::errors::TaskError;

pub const UNKNOWN: &str = "UNKNOWN";

pub fn v_path<'a>(root: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut cur = root;
    for key in path {
        cur = cur.get(*key)?;
    }
    Some(cur)
}

pub fn v_str<'a>(root: &'a Value, path: &[&str]) -> Option<&'a str> {
    v_path(root, path).and_then(|v| v.as_str())
}

/// HTTP method of a REST (`httpMethod`) or HTTP API (`requestContext.http`) event.
pub fn request_method(event: &Value) -> &str {
    v_str(event, &["httpMethod"])
        .or_else(|| v_str(event, &["requestContext", "http", "method"]))
        .unwrap_or(UNKNOWN)
}

pub fn request_path(event: &Value) -> &str {
    v_str(event, &["rawPath"])
        .or_else(|| v_str(event, &["requestContext", "http", "path"]))
        .unwrap_or(UNKNOWN)
}

/// Route template (`/tables/{tableId}`) for REST events, else the raw path.
pub fn resource(event: &Value) -> &str {
    v_str(event, &["resource"]).unwrap_or_else(|| request_path(event))
}

pub fn query_param<'a>(event: &'a Value, name: &str) -> Option<&'a str> {
    v_str(event, &["queryStringParameters", name])
}

pub fn path_param<'a>(event: &'a Value, name: &str) -> Option<&'a str> {
    v_str(event, &["pathParameters", name])
}

pub fn get_header_value<'a>(headers: &'a Value, name: &str) -> Option<&'a str> {
    if let Some(v) = headers.get(name).and_then(|s| s.as_str()) {
        return Some(v);
    }
    headers.as_object().and_then(|map| {
        map.iter().find_map(|(k, v)| {
            if k.eq_ignore_ascii_case(name) {
                v.as_str()
            } else {
                None
            }
        })
    })
}

/// Raw request body, decoded from base64 when API Gateway flagged it so.
///
/// # Errors
///
/// Returns a parse error if the body is flagged as base64 but is not valid
/// base64 or UTF-8.
pub fn extract_body(event: &Value) -> Result<Option<String>, TaskError> {
    let Some(body) = event.get("body").and_then(Value::as_str) else {
        return Ok(None);
    };

    let encoded = event
        .get("isBase64Encoded")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    if !encoded {
        return Ok(Some(body.to_string()));
    }

    let bytes = STANDARD.decode(body)?;
    String::from_utf8(bytes)
        .map(Some)
        .map_err(|e| TaskError::ParseError(format!("body is not valid UTF-8: {e}")))
}

/// Parses the request body as a JSON object. A missing or blank body is an
/// empty object.
///
/// # Errors
///
/// Returns a parse error when the body is not a JSON object.
pub fn parse_json_body(event: &Value) -> Result<Map<String, Value>, TaskError> {
    let Some(body) = extract_body(event)? else {
        return Ok(Map::new());
    };
    if body.trim().is_empty() {
        return Ok(Map::new());
    }

    match serde_json::from_str::<Value>(&body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(TaskError::ParseError("body is not a JSON object".to_string())),
        Err(e) => Err(TaskError::ParseError(format!("invalid JSON body: {e}"))),
    }
}
