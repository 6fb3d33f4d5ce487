use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A user-submitted event persisted to the `Events` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub principal_id: Value,
    pub created_at: String,
    pub body: Map<String, Value>,
}

/// One change-history row written to the `Audit` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditRecord {
    pub id: String,
    pub item_key: String,
    pub modification_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_attribute: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_value: Option<Value>,
    pub new_value: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UuidBatch {
    pub ids: Vec<String>,
}

/// The subset of an Open-Meteo response kept in the `Weather` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub elevation: f64,
    pub generationtime_ms: f64,
    pub hourly: HourlySeries,
    pub hourly_units: HourlyUnits,
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: String,
    pub timezone_abbreviation: String,
    pub utc_offset_seconds: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlySeries {
    /// Open-Meteo reports hours without data as `null`.
    pub temperature_2m: Vec<Option<f64>>,
    pub time: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyUnits {
    pub temperature_2m: String,
    pub time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRecord {
    pub id: String,
    pub forecast: Forecast,
}

/// Restaurant table metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub id: i64,
    pub number: i64,
    pub places: i64,
    pub is_vip: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_order: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: i64,
    pub reservation_id: String,
    pub table_number: i64,
    pub client_name: String,
    pub phone_number: String,
    pub date: String,
    pub slot_time_start: String,
    pub slot_time_end: String,
}
