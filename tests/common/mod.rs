#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use lambda_tasks::clients::{ForecastQuery, IdentityProvider, WeatherSource};
use lambda_tasks::core::models::{Reservation, Table};
use lambda_tasks::errors::TaskError;
use lambda_tasks::storage::{Item, ItemStore, ObjectStore, ReservationRepository, TableRepository};
use serde_json::{Value, json};

// ============================================================================
// DynamoDB item writer
// ============================================================================

#[derive(Default)]
pub struct RecordingItemStore {
    pub puts: Mutex<Vec<(String, Item)>>,
    pub fail: bool,
}

impl RecordingItemStore {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn puts(&self) -> Vec<(String, Item)> {
        self.puts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ItemStore for RecordingItemStore {
    async fn put_item(&self, table: &str, item: Item) -> Result<(), TaskError> {
        if self.fail {
            return Err(TaskError::AwsError("PutItem throttled".into()));
        }
        self.puts.lock().unwrap().push((table.to_string(), item));
        Ok(())
    }
}

// ============================================================================
// S3
// ============================================================================

#[derive(Debug, Clone)]
pub struct StoredObject {
    pub bucket: String,
    pub key: String,
    pub body: Vec<u8>,
    pub content_type: String,
}

#[derive(Default)]
pub struct RecordingObjectStore {
    pub objects: Mutex<Vec<StoredObject>>,
    pub fail: bool,
}

impl RecordingObjectStore {
    pub fn objects(&self) -> Vec<StoredObject> {
        self.objects.lock().unwrap().clone()
    }
}

#[async_trait]
impl ObjectStore for RecordingObjectStore {
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<(), TaskError> {
        if self.fail {
            return Err(TaskError::AwsError("AccessDenied".into()));
        }
        self.objects.lock().unwrap().push(StoredObject {
            bucket: bucket.to_string(),
            key: key.to_string(),
            body,
            content_type: content_type.to_string(),
        });
        Ok(())
    }
}

// ============================================================================
// Weather
// ============================================================================

pub struct StubWeather {
    pub response: Result<Value, String>,
    pub queries: Mutex<Vec<ForecastQuery>>,
}

impl StubWeather {
    pub fn returning(document: Value) -> Self {
        Self {
            response: Ok(document),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            response: Err(message.to_string()),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn queries(&self) -> Vec<ForecastQuery> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl WeatherSource for StubWeather {
    async fn forecast(&self, query: &ForecastQuery) -> Result<Value, TaskError> {
        self.queries.lock().unwrap().push(query.clone());
        self.response.clone().map_err(TaskError::HttpError)
    }
}

/// A trimmed Open-Meteo response for Berlin.
pub fn sample_forecast() -> Value {
    json!({
        "elevation": 38.0,
        "generationtime_ms": 12.34,
        "hourly": {
            "temperature_2m": [1.2, 3.4],
            "time": ["2025-01-02T00:00", "2025-01-02T01:00"]
        },
        "hourly_units": {
            "temperature_2m": "°C",
            "time": "iso8601"
        },
        "latitude": 52.52,
        "longitude": 13.419998,
        "timezone": "GMT",
        "timezone_abbreviation": "GMT",
        "utc_offset_seconds": 0,
        "current": { "temperature_2m": 2.1 }
    })
}

// ============================================================================
// Identity
// ============================================================================

#[derive(Default)]
pub struct FakeIdentity {
    pub users: Mutex<HashMap<String, String>>,
    /// Simulates a pending challenge: sign-in succeeds without a token.
    pub withhold_token: bool,
}

#[async_trait]
impl IdentityProvider for FakeIdentity {
    async fn sign_up(&self, email: &str, password: &str) -> Result<(), TaskError> {
        let mut users = self.users.lock().unwrap();
        if users.contains_key(email) {
            return Err(TaskError::AwsError("UsernameExistsException".into()));
        }
        if password.len() < 8 {
            return Err(TaskError::AwsError("InvalidPasswordException".into()));
        }
        users.insert(email.to_string(), password.to_string());
        Ok(())
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Option<String>, TaskError> {
        let users = self.users.lock().unwrap();
        match users.get(email) {
            Some(stored) if stored == password => {
                if self.withhold_token {
                    Ok(None)
                } else {
                    Ok(Some(format!("id-token-for-{email}")))
                }
            }
            _ => Err(TaskError::AwsError("NotAuthorizedException".into())),
        }
    }
}

// ============================================================================
// Booking storage
// ============================================================================

#[derive(Default)]
pub struct InMemoryBooking {
    pub tables: Mutex<Vec<Table>>,
    pub reservations: Mutex<Vec<Reservation>>,
    pub fail_reads: bool,
    /// Fails only the per-table, per-date reservation lookup.
    pub fail_reservation_lookup: bool,
    pub fail_writes: bool,
}

impl InMemoryBooking {
    pub fn with_tables(tables: Vec<Table>) -> Self {
        Self {
            tables: Mutex::new(tables),
            ..Self::default()
        }
    }

    pub fn reservations(&self) -> Vec<Reservation> {
        self.reservations.lock().unwrap().clone()
    }

    fn read_guard(&self) -> Result<(), TaskError> {
        if self.fail_reads {
            Err(TaskError::AwsError("Scan failed".into()))
        } else {
            Ok(())
        }
    }

    fn write_guard(&self) -> Result<(), TaskError> {
        if self.fail_writes {
            Err(TaskError::AwsError("PutItem failed".into()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl TableRepository for InMemoryBooking {
    async fn list_tables(&self) -> Result<Vec<Table>, TaskError> {
        self.read_guard()?;
        Ok(self.tables.lock().unwrap().clone())
    }

    async fn put_table(&self, table: &Table) -> Result<(), TaskError> {
        self.write_guard()?;
        let mut tables = self.tables.lock().unwrap();
        tables.retain(|t| t.id != table.id);
        tables.push(table.clone());
        Ok(())
    }

    async fn get_table(&self, id: i64) -> Result<Option<Table>, TaskError> {
        self.read_guard()?;
        Ok(self.tables.lock().unwrap().iter().find(|t| t.id == id).cloned())
    }

    async fn table_number_exists(&self, number: i64) -> Result<bool, TaskError> {
        self.read_guard()?;
        Ok(self.tables.lock().unwrap().iter().any(|t| t.number == number))
    }
}

#[async_trait]
impl ReservationRepository for InMemoryBooking {
    async fn list_reservations(&self) -> Result<Vec<Reservation>, TaskError> {
        self.read_guard()?;
        Ok(self.reservations())
    }

    async fn reservations_for(
        &self,
        table_number: i64,
        date: &str,
    ) -> Result<Vec<Reservation>, TaskError> {
        self.read_guard()?;
        if self.fail_reservation_lookup {
            return Err(TaskError::AwsError("Scan failed".into()));
        }
        Ok(self
            .reservations()
            .into_iter()
            .filter(|r| r.table_number == table_number && r.date == date)
            .collect())
    }

    async fn put_reservation(&self, reservation: &Reservation) -> Result<(), TaskError> {
        self.write_guard()?;
        self.reservations.lock().unwrap().push(reservation.clone());
        Ok(())
    }
}

pub fn table(id: i64, number: i64) -> Table {
    Table {
        id,
        number,
        places: 4,
        is_vip: false,
        min_order: None,
    }
}

/// Status code and decoded JSON body of a proxy response.
pub fn status_and_body(response: &Value) -> (u64, Value) {
    let status = response["statusCode"].as_u64().expect("statusCode");
    let body = lambda_tasks::api::helpers::response_body(response).unwrap_or(Value::Null);
    (status, body)
}
