mod common;

use chrono::{TimeZone, Utc};
use common::RecordingItemStore;
use lambda_tasks::core::config::AuditConfig;
use lambda_tasks::storage::attributes::item_to_json;
use lambda_tasks::streams::{audit_records_for, process_stream_event};
use serde_json::{Value, json};

const MODIFIED_AT: &str = "2024-05-01T12:30:00.000Z";

fn config() -> AuditConfig {
    AuditConfig {
        audit_table_name: "Audit".to_string(),
    }
}

fn insert_record(key: &str, value: i64) -> Value {
    json!({
        "eventName": "INSERT",
        "dynamodb": {
            "NewImage": {
                "key": { "S": key },
                "value": { "N": value.to_string() }
            }
        }
    })
}

fn modify_record(key: &str, old: i64, new: i64) -> Value {
    json!({
        "eventName": "MODIFY",
        "dynamodb": {
            "OldImage": { "key": { "S": key }, "value": { "N": old.to_string() } },
            "NewImage": { "key": { "S": key }, "value": { "N": new.to_string() } }
        }
    })
}

#[test]
fn test_insert_produces_full_item_row() {
    let rows = audit_records_for(&insert_record("CACHE_TTL_SEC", 3600), MODIFIED_AT).unwrap();

    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.item_key, "CACHE_TTL_SEC");
    assert_eq!(row.modification_time, MODIFIED_AT);
    assert_eq!(row.new_value, json!({ "key": "CACHE_TTL_SEC", "value": 3600 }));
    assert!(row.updated_attribute.is_none());
    assert!(row.old_value.is_none());
}

#[test]
fn test_modify_produces_row_per_changed_attribute() {
    let rows = audit_records_for(&modify_record("CACHE_TTL_SEC", 3600, 7200), MODIFIED_AT).unwrap();

    assert_eq!(rows.len(), 1, "Only 'value' changed");
    let row = &rows[0];
    assert_eq!(row.updated_attribute.as_deref(), Some("value"));
    assert_eq!(row.old_value, Some(json!(3600)));
    assert_eq!(row.new_value, json!(7200));
}

#[test]
fn test_modify_with_new_attribute() {
    let record = json!({
        "eventName": "MODIFY",
        "dynamodb": {
            "OldImage": { "key": { "S": "k" } },
            "NewImage": { "key": { "S": "k" }, "owner": { "S": "ops" } }
        }
    });

    let rows = audit_records_for(&record, MODIFIED_AT).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].updated_attribute.as_deref(), Some("owner"));
    assert_eq!(rows[0].old_value, Some(Value::Null));
}

#[test]
fn test_modify_without_changes_produces_nothing() {
    let rows = audit_records_for(&modify_record("k", 1, 1), MODIFIED_AT).unwrap();
    assert!(rows.is_empty());
}

#[test]
fn test_remove_is_not_audited() {
    let record = json!({ "eventName": "REMOVE", "dynamodb": { "OldImage": { "key": { "S": "k" } } } });
    assert!(audit_records_for(&record, MODIFIED_AT).unwrap().is_empty());
}

#[test]
fn test_insert_without_key_is_an_error() {
    let record = json!({
        "eventName": "INSERT",
        "dynamodb": { "NewImage": { "value": { "N": "1" } } }
    });
    assert!(audit_records_for(&record, MODIFIED_AT).is_err());
}

#[tokio::test]
async fn test_batch_writes_rows_and_skips_bad_records() {
    let store = RecordingItemStore::default();
    let payload = json!({
        "Records": [
            insert_record("A", 1),
            { "eventName": "INSERT", "dynamodb": {} },
            modify_record("B", 1, 2)
        ]
    });
    let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();

    let outcome = process_stream_event(&store, &config(), &payload, now).await;

    assert_eq!(outcome.records, 3);
    assert_eq!(outcome.written, 2);
    assert_eq!(outcome.failed, 1);

    let puts = store.puts();
    assert!(puts.iter().all(|(table, _)| table == "Audit"));
    let first = item_to_json(&puts[0].1);
    assert_eq!(first["itemKey"], "A");
    assert_eq!(first["modificationTime"], MODIFIED_AT);
    assert!(first.get("oldValue").is_none(), "Inserts carry no old value");
}

#[tokio::test]
async fn test_batch_store_failures_are_counted() {
    let store = RecordingItemStore::failing();
    let payload = json!({ "Records": [insert_record("A", 1)] });

    let outcome = process_stream_event(&store, &config(), &payload, Utc::now()).await;

    assert_eq!(outcome.written, 0);
    assert_eq!(outcome.failed, 1);
}

#[tokio::test]
async fn test_empty_batch() {
    let store = RecordingItemStore::default();
    let outcome = process_stream_event(&store, &config(), &json!({ "Records": [] }), Utc::now()).await;

    assert_eq!(outcome.records, 0);
    assert!(store.puts().is_empty());
}
