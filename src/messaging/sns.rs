use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;
use tracing::{error, info};

use super::records;
use crate::api::parsing::v_str;

/// Logs each `Sns.Message` and returns them in delivery order.
///
/// A record without a message is logged as an error and skipped.
pub fn handle_sns_event(payload: &Value) -> Vec<String> {
    let mut messages = Vec::new();
    for record in records(payload) {
        match v_str(record, &["Sns", "Message"]) {
            Some(message) => {
                info!("Received SNS message: {}", message);
                messages.push(message.to_string());
            }
            None => {
                let missing = if record.get("Sns").is_some() { "Message" } else { "Sns" };
                error!("Missing expected key in the record: '{}'", missing);
            }
        }
    }
    messages
}

#[tracing::instrument(level = "info", skip(event))]
pub async fn function_handler(event: LambdaEvent<Value>) -> Result<u16, Error> {
    let messages = handle_sns_event(&event.payload);
    info!(count = messages.len(), "SNS batch processed");
    Ok(200)
}
