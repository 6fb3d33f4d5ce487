use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;
use tracing::info;

use super::records;

pub const MISSING_BODY: &str = "No body";

/// Logs each record body; records without one are reported as `No body`.
pub fn handle_sqs_event(payload: &Value) -> Vec<String> {
    records(payload)
        .iter()
        .map(|record| {
            let body = record
                .get("body")
                .and_then(Value::as_str)
                .unwrap_or(MISSING_BODY);
            info!("Received SQS message: {}", body);
            body.to_string()
        })
        .collect()
}

#[tracing::instrument(level = "info", skip(event))]
pub async fn function_handler(event: LambdaEvent<Value>) -> Result<u16, Error> {
    let messages = handle_sqs_event(&event.payload);
    info!(count = messages.len(), "SQS batch processed");
    Ok(200)
}
