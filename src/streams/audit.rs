//! Turns `Configuration` table changes into `Audit` rows.
//!
//! An insert yields one row carrying the whole new item. A modification
//! yields one row per attribute whose value changed, with both the old and
//! the new value. Removals are not audited.

use chrono::{DateTime, SecondsFormat, Utc};
use lambda_runtime::{Error, LambdaEvent};
use serde_json::{Map, Value};
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::api::parsing::{v_path, v_str};
use crate::core::config::AuditConfig;
use crate::core::models::AuditRecord;
use crate::errors::TaskError;
use crate::messaging::records;
use crate::storage::ItemStore;
use crate::storage::attributes::{decode_image, to_item};

pub const KEY_ATTRIBUTE: &str = "key";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AuditOutcome {
    pub records: usize,
    pub written: usize,
    pub failed: usize,
}

fn image<'a>(record: &'a Value, name: &str) -> Result<&'a Map<String, Value>, TaskError> {
    v_path(record, &["dynamodb", name])
        .and_then(Value::as_object)
        .ok_or_else(|| TaskError::ParseError(format!("stream record has no {name}")))
}

fn item_key(item: &Map<String, Value>) -> Result<String, TaskError> {
    match item.get(KEY_ATTRIBUTE) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        _ => Err(TaskError::ParseError(format!(
            "item has no '{KEY_ATTRIBUTE}' attribute"
        ))),
    }
}

fn audit_row(
    item_key: &str,
    modification_time: &str,
    updated_attribute: Option<String>,
    old_value: Option<Value>,
    new_value: Value,
) -> AuditRecord {
    AuditRecord {
        id: Uuid::new_v4().to_string(),
        item_key: item_key.to_string(),
        modification_time: modification_time.to_string(),
        updated_attribute,
        old_value,
        new_value,
    }
}

/// Audit rows for a single stream record. Unsupported event names yield none.
///
/// # Errors
///
/// Returns a parse error when a required image or the item key is missing.
pub fn audit_records_for(
    record: &Value,
    modification_time: &str,
) -> Result<Vec<AuditRecord>, TaskError> {
    let event_name = v_str(record, &["eventName"]).unwrap_or_default();

    match event_name {
        "INSERT" => {
            let new_item = decode_image(image(record, "NewImage")?);
            let key = item_key(&new_item)?;
            debug!(item_key = %key, "INSERT event");
            Ok(vec![audit_row(
                &key,
                modification_time,
                None,
                None,
                Value::Object(new_item),
            )])
        }
        "MODIFY" => {
            let new_item = decode_image(image(record, "NewImage")?);
            let old_item = decode_image(image(record, "OldImage")?);
            let key = item_key(&new_item)?;

            let rows = new_item
                .iter()
                .filter(|(attr, new_value)| old_item.get(*attr) != Some(*new_value))
                .map(|(attr, new_value)| {
                    debug!(item_key = %key, attribute = %attr, "MODIFY event");
                    audit_row(
                        &key,
                        modification_time,
                        Some(attr.clone()),
                        Some(old_item.get(attr).cloned().unwrap_or(Value::Null)),
                        new_value.clone(),
                    )
                })
                .collect();
            Ok(rows)
        }
        other => {
            debug!("Unsupported event type: {}", other);
            Ok(Vec::new())
        }
    }
}

/// Writes the audit rows for every record in the batch.
///
/// Failures are logged per record and never abort the batch.
pub async fn process_stream_event(
    store: &dyn ItemStore,
    config: &AuditConfig,
    payload: &Value,
    now: DateTime<Utc>,
) -> AuditOutcome {
    let modification_time = now.to_rfc3339_opts(SecondsFormat::Millis, true);
    let batch = records(payload);

    let mut outcome = AuditOutcome {
        records: batch.len(),
        ..AuditOutcome::default()
    };
    if batch.is_empty() {
        debug!("No records to process.");
        return outcome;
    }

    for record in batch {
        let rows = match audit_records_for(record, &modification_time) {
            Ok(rows) => rows,
            Err(e) => {
                error!("Skipping stream record: {}", e);
                outcome.failed += 1;
                continue;
            }
        };

        for row in rows {
            let item = match to_item(&row) {
                Ok(item) => item,
                Err(e) => {
                    error!("Failed to encode audit row {}: {}", row.id, e);
                    outcome.failed += 1;
                    continue;
                }
            };
            match store.put_item(&config.audit_table_name, item).await {
                Ok(()) => outcome.written += 1,
                Err(e) => {
                    error!("Failed to write audit row for {}: {}", row.item_key, e);
                    outcome.failed += 1;
                }
            }
        }
    }

    outcome
}

#[tracing::instrument(level = "info", skip(store, config, event))]
pub async fn function_handler(
    store: &dyn ItemStore,
    config: &AuditConfig,
    event: LambdaEvent<Value>,
) -> Result<u16, Error> {
    let outcome = process_stream_event(store, config, &event.payload, Utc::now()).await;
    info!(
        records = outcome.records,
        written = outcome.written,
        failed = outcome.failed,
        "Stream batch processed"
    );
    Ok(200)
}
