//! Every minute: write a batch of fresh UUIDs to S3.

use chrono::{DateTime, Utc};
use lambda_runtime::{Error, LambdaEvent};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Value, json};
use tracing::{error, info};
use uuid::Uuid;

use crate::core::config::UuidConfig;
use crate::core::models::UuidBatch;
use crate::errors::TaskError;
use crate::storage::ObjectStore;
use crate::storage::s3::content_type_for;

pub const BATCH_SIZE: usize = 10;
pub const SUCCESS_MESSAGE: &str = "Successfully generated UUIDs and uploaded to S3.";

#[must_use]
pub fn generate_batch() -> UuidBatch {
    UuidBatch {
        ids: (0..BATCH_SIZE).map(|_| Uuid::new_v4().to_string()).collect(),
    }
}

/// Object key: the UTC timestamp with millisecond precision, e.g.
/// `2024-01-01T00:00:00.000Z.json`.
#[must_use]
pub fn object_key(now: DateTime<Utc>) -> String {
    format!("{}.json", now.format("%Y-%m-%dT%H:%M:%S%.3fZ"))
}

/// Pretty-printed JSON with a four-space indent.
///
/// # Errors
///
/// Returns a serialization error if the batch cannot be encoded.
pub fn render_batch(batch: &UuidBatch) -> Result<Vec<u8>, TaskError> {
    let mut out = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(b"    "));
    batch.serialize(&mut serializer)?;
    Ok(out)
}

/// # Errors
///
/// Returns an error if the upload fails.
pub async fn handle_request(
    store: &dyn ObjectStore,
    config: &UuidConfig,
    now: DateTime<Utc>,
) -> Result<Value, TaskError> {
    info!("Generating {} UUIDs...", BATCH_SIZE);
    let batch = generate_batch();
    let key = object_key(now);
    let body = render_batch(&batch)?;

    info!("Uploading file '{}' to S3 bucket '{}'...", key, config.target_bucket);
    store
        .put_object(&config.target_bucket, &key, body, &content_type_for(&key))
        .await
        .inspect_err(|e| error!("Failed to upload file: {}", e))?;
    info!("File '{}' successfully uploaded.", key);

    Ok(json!({ "statusCode": 200, "body": SUCCESS_MESSAGE }))
}

#[tracing::instrument(level = "info", skip(store, config, event))]
pub async fn function_handler(
    store: &dyn ObjectStore,
    config: &UuidConfig,
    event: LambdaEvent<Value>,
) -> Result<Value, Error> {
    info!("Scheduled event received: {:?}", event.payload);
    handle_request(store, config, Utc::now())
        .await
        .map_err(Error::from)
}
