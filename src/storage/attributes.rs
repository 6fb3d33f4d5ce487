//! Conversions between native JSON and DynamoDB attribute values.
//!
//! Two wire shapes show up in practice: the typed JSON carried by stream
//! records (`{"key": {"S": "CACHE_TTL_SEC"}}`) and the SDK `AttributeValue`
//! used for reads and writes. Both are mapped onto `serde_json::Value` so the
//! handlers only ever deal with plain JSON.

use std::collections::HashMap;

use aws_sdk_dynamodb::primitives::Blob;
use aws_sdk_dynamodb::types::AttributeValue;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Number, Value};
use tracing::debug;

use crate::errors::TaskError;

pub type Item = HashMap<String, AttributeValue>;

// ============================================================================
// Stream images
// ============================================================================

/// Decodes a stream image (`NewImage`/`OldImage`) into a plain JSON object.
///
/// Attributes with an unrecognised type descriptor are dropped.
#[must_use]
pub fn decode_image(image: &Map<String, Value>) -> Map<String, Value> {
    image
        .iter()
        .filter_map(|(name, typed)| match decode_typed(typed) {
            Some(value) => Some((name.clone(), value)),
            None => {
                debug!(attribute = %name, "Skipping attribute with unsupported type");
                None
            }
        })
        .collect()
}

/// Decodes one typed attribute such as `{"N": "42"}`.
#[must_use]
pub fn decode_typed(typed: &Value) -> Option<Value> {
    let (descriptor, raw) = typed.as_object()?.iter().next()?;
    match descriptor.as_str() {
        "S" | "B" => raw.as_str().map(|s| Value::String(s.to_string())),
        "N" => raw.as_str().map(parse_number),
        "BOOL" => raw.as_bool().map(Value::Bool),
        "NULL" => Some(Value::Null),
        "M" => raw.as_object().map(|m| Value::Object(decode_image(m))),
        "L" => raw
            .as_array()
            .map(|items| Value::Array(items.iter().filter_map(decode_typed).collect())),
        "SS" | "BS" => raw.as_array().map(|items| {
            Value::Array(
                items
                    .iter()
                    .filter_map(|s| s.as_str().map(|s| Value::String(s.to_string())))
                    .collect(),
            )
        }),
        "NS" => raw.as_array().map(|items| {
            Value::Array(items.iter().filter_map(|s| s.as_str().map(parse_number)).collect())
        }),
        _ => None,
    }
}

/// DynamoDB numbers travel as strings; whole numbers become integers.
#[must_use]
pub fn parse_number(raw: &str) -> Value {
    let raw = raw.trim();
    if let Ok(i) = raw.parse::<i64>() {
        return Value::from(i);
    }
    if let Ok(u) = raw.parse::<u64>() {
        return Value::from(u);
    }
    raw.parse::<f64>()
        .ok()
        .and_then(|f| {
            if f.fract() == 0.0 && f.abs() < 9.0e15 {
                #[allow(clippy::cast_possible_truncation)]
                Some(Number::from(f as i64))
            } else {
                Number::from_f64(f)
            }
        })
        .map_or_else(|| Value::String(raw.to_string()), Value::Number)
}

// ============================================================================
// SDK attribute values
// ============================================================================

#[must_use]
pub fn to_attribute(value: &Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(b) => AttributeValue::Bool(*b),
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::String(s) => AttributeValue::S(s.clone()),
        Value::Array(items) => AttributeValue::L(items.iter().map(to_attribute).collect()),
        Value::Object(map) => AttributeValue::M(
            map.iter()
                .map(|(k, v)| (k.clone(), to_attribute(v)))
                .collect(),
        ),
    }
}

#[must_use]
pub fn from_attribute(attribute: &AttributeValue) -> Value {
    match attribute {
        AttributeValue::S(s) => Value::String(s.clone()),
        AttributeValue::N(n) => parse_number(n),
        AttributeValue::Bool(b) => Value::Bool(*b),
        AttributeValue::M(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), from_attribute(v)))
                .collect(),
        ),
        AttributeValue::L(items) => Value::Array(items.iter().map(from_attribute).collect()),
        AttributeValue::Ss(items) => {
            Value::Array(items.iter().map(|s| Value::String(s.clone())).collect())
        }
        AttributeValue::Ns(items) => Value::Array(items.iter().map(|n| parse_number(n)).collect()),
        AttributeValue::B(blob) => Value::String(encode_blob(blob)),
        AttributeValue::Bs(blobs) => {
            Value::Array(blobs.iter().map(|b| Value::String(encode_blob(b))).collect())
        }
        _ => Value::Null,
    }
}

fn encode_blob(blob: &Blob) -> String {
    STANDARD.encode(blob.as_ref())
}

/// Serializes a model into a DynamoDB item. The model must serialize to a map.
pub fn to_item<T: Serialize>(model: &T) -> Result<Item, TaskError> {
    match serde_json::to_value(model)? {
        Value::Object(map) => Ok(map
            .iter()
            .map(|(k, v)| (k.clone(), to_attribute(v)))
            .collect()),
        other => Err(TaskError::SerializationError(format!(
            "expected a map, got {other}"
        ))),
    }
}

pub fn item_to_json(item: &Item) -> Value {
    Value::Object(
        item.iter()
            .map(|(k, v)| (k.clone(), from_attribute(v)))
            .collect(),
    )
}

pub fn from_item<T: DeserializeOwned>(item: &Item) -> Result<T, TaskError> {
    serde_json::from_value(item_to_json(item)).map_err(TaskError::from)
}
