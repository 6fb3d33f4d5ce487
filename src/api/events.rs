//! Stores user-submitted events in the `Events` table.

use chrono::{DateTime, SecondsFormat, Utc};
use lambda_runtime::{Error, LambdaEvent};
use serde_json::{Map, Value, json};
use tracing::{error, info};
use uuid::Uuid;

use super::helpers::json_response;
use super::parsing::parse_json_body;
use crate::core::config::EventsConfig;
use crate::core::handler::into_response;
use crate::core::models::Event;
use crate::errors::TaskError;
use crate::storage::ItemStore;
use crate::storage::attributes::to_item;

/// The fields a caller submits.
#[derive(Debug, Clone, PartialEq)]
pub struct EventRequest {
    pub principal_id: Value,
    pub content: Map<String, Value>,
}

/// Reads `principalId` and `content` from a direct invocation payload or,
/// when present, from the JSON body of a proxy event.
///
/// # Errors
///
/// Returns a validation error when `principalId` is missing or `content`
/// is not an object, and a parse error for an unreadable body.
pub fn validate_request(event: &Value) -> Result<EventRequest, TaskError> {
    let source = if event.get("body").is_some_and(Value::is_string) {
        Value::Object(parse_json_body(event)?)
    } else {
        event.clone()
    };

    let principal_id = match source.get("principalId") {
        Some(Value::Null) | None => {
            return Err(TaskError::ValidationError(
                "principalId is required".to_string(),
            ));
        }
        Some(id) => id.clone(),
    };

    let content = match source.get("content") {
        None | Some(Value::Null) => Map::new(),
        Some(Value::Object(map)) => map.clone(),
        Some(_) => {
            return Err(TaskError::ValidationError(
                "content must be a JSON object".to_string(),
            ));
        }
    };

    Ok(EventRequest {
        principal_id,
        content,
    })
}

#[must_use]
pub fn build_event(request: EventRequest, now: DateTime<Utc>) -> Event {
    Event {
        id: Uuid::new_v4().to_string(),
        principal_id: request.principal_id,
        created_at: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        body: request.content,
    }
}

/// Persists the event and answers 201 with the stored record.
///
/// # Errors
///
/// Propagates validation and storage failures.
pub async fn handle_request(
    store: &dyn ItemStore,
    config: &EventsConfig,
    event: &Value,
    now: DateTime<Utc>,
) -> Result<Value, TaskError> {
    let request = validate_request(event)?;
    let record = build_event(request, now);
    info!(table = %config.table_name, id = %record.id, "Saving event");

    store
        .put_item(&config.table_name, to_item(&record)?)
        .await
        .inspect_err(|e| error!("Failed to save event {}: {}", record.id, e))?;

    Ok(json_response(
        201,
        &json!({ "statusCode": 201, "event": record }),
    ))
}

#[tracing::instrument(level = "info", skip(store, config, event))]
pub async fn function_handler(
    store: &dyn ItemStore,
    config: &EventsConfig,
    event: LambdaEvent<Value>,
) -> Result<Value, Error> {
    info!("Events API received request: {:?}", event.payload);
    Ok(into_response(
        handle_request(store, config, &event.payload, Utc::now()).await,
    ))
}
