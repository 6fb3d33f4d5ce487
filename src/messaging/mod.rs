//! SNS and SQS subscribers that log every delivered message.

pub mod sns;
pub mod sqs;

use serde_json::Value;

/// The `Records` array of a batch event; absent means an empty batch.
pub(crate) fn records(payload: &Value) -> &[Value] {
    payload
        .get("Records")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}
