use std::collections::HashMap;

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::AttributeValue;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::attributes::{Item, from_item, to_item};
use super::{ItemStore, ReservationRepository, TableRepository};
use crate::core::models::{Reservation, Table};
use crate::errors::TaskError;

/// Plain `PutItem` writer shared by the event, audit and forecast handlers.
#[derive(Clone)]
pub struct DynamoItemStore {
    client: Client,
}

impl DynamoItemStore {
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    #[must_use]
    pub fn from_conf(config: &SdkConfig) -> Self {
        Self::new(Client::new(config))
    }
}

#[async_trait]
impl ItemStore for DynamoItemStore {
    async fn put_item(&self, table: &str, item: Item) -> Result<(), TaskError> {
        self.client
            .put_item()
            .table_name(table)
            .set_item(Some(item))
            .send()
            .await?;
        debug!(table = %table, "PutItem succeeded");
        Ok(())
    }
}

/// Decodes scanned rows one by one. Rows that do not match the model are
/// logged and skipped so a single bad row cannot hide the rest of the table.
pub(crate) fn decode_rows<T: DeserializeOwned>(table: &str, items: &[Item]) -> Vec<T> {
    items
        .iter()
        .filter_map(|item| match from_item(item) {
            Ok(row) => Some(row),
            Err(e) => {
                warn!(table = %table, "Skipping malformed row: {}", e);
                None
            }
        })
        .collect()
}

/// A scan filter; `number` and `date` are DynamoDB reserved words, so every
/// attribute goes through a `#name` placeholder.
struct ScanFilter {
    expression: String,
    names: HashMap<String, String>,
    values: HashMap<String, AttributeValue>,
}

impl ScanFilter {
    fn eq(conditions: &[(&str, AttributeValue)]) -> Self {
        let mut names = HashMap::new();
        let mut values = HashMap::new();
        let mut clauses = Vec::with_capacity(conditions.len());

        for (idx, (attribute, value)) in conditions.iter().enumerate() {
            let name = format!("#a{idx}");
            let placeholder = format!(":v{idx}");
            clauses.push(format!("{name} = {placeholder}"));
            names.insert(name, (*attribute).to_string());
            values.insert(placeholder, value.clone());
        }

        Self {
            expression: clauses.join(" AND "),
            names,
            values,
        }
    }
}

/// Booking data access over the `Tables` and `Reservations` tables.
#[derive(Clone)]
pub struct DynamoBookingStore {
    client: Client,
    tables_table: String,
    reservations_table: String,
}

impl DynamoBookingStore {
    pub fn new(
        client: Client,
        tables_table: impl Into<String>,
        reservations_table: impl Into<String>,
    ) -> Self {
        Self {
            client,
            tables_table: tables_table.into(),
            reservations_table: reservations_table.into(),
        }
    }

    /// Full scan, following `LastEvaluatedKey` until the table is exhausted.
    async fn scan_all(&self, table: &str, filter: Option<&ScanFilter>) -> Result<Vec<Item>, TaskError> {
        let mut items = Vec::new();
        let mut start_key: Option<Item> = None;

        loop {
            let mut request = self
                .client
                .scan()
                .table_name(table)
                .set_exclusive_start_key(start_key.take());
            if let Some(filter) = filter {
                request = request
                    .filter_expression(&filter.expression)
                    .set_expression_attribute_names(Some(filter.names.clone()))
                    .set_expression_attribute_values(Some(filter.values.clone()));
            }

            let page = request.send().await?;
            items.extend(page.items.unwrap_or_default());

            match page.last_evaluated_key {
                Some(key) if !key.is_empty() => start_key = Some(key),
                _ => break,
            }
        }

        debug!(table = %table, count = items.len(), "Scan finished");
        Ok(items)
    }
}

#[async_trait]
impl TableRepository for DynamoBookingStore {
    async fn list_tables(&self) -> Result<Vec<Table>, TaskError> {
        let items = self.scan_all(&self.tables_table, None).await?;
        Ok(decode_rows(&self.tables_table, &items))
    }

    async fn put_table(&self, table: &Table) -> Result<(), TaskError> {
        self.client
            .put_item()
            .table_name(&self.tables_table)
            .set_item(Some(to_item(table)?))
            .send()
            .await?;
        Ok(())
    }

    async fn get_table(&self, id: i64) -> Result<Option<Table>, TaskError> {
        let result = self
            .client
            .get_item()
            .table_name(&self.tables_table)
            .key("id", AttributeValue::N(id.to_string()))
            .send()
            .await?;

        match result.item {
            Some(item) => Ok(Some(from_item(&item)?)),
            None => Ok(None),
        }
    }

    async fn table_number_exists(&self, number: i64) -> Result<bool, TaskError> {
        let filter = ScanFilter::eq(&[("number", AttributeValue::N(number.to_string()))]);
        let items = self.scan_all(&self.tables_table, Some(&filter)).await?;
        Ok(!items.is_empty())
    }
}

#[async_trait]
impl ReservationRepository for DynamoBookingStore {
    async fn list_reservations(&self) -> Result<Vec<Reservation>, TaskError> {
        let items = self.scan_all(&self.reservations_table, None).await?;
        Ok(decode_rows(&self.reservations_table, &items))
    }

    async fn reservations_for(
        &self,
        table_number: i64,
        date: &str,
    ) -> Result<Vec<Reservation>, TaskError> {
        let filter = ScanFilter::eq(&[
            ("tableNumber", AttributeValue::N(table_number.to_string())),
            ("date", AttributeValue::S(date.to_string())),
        ]);
        let items = self
            .scan_all(&self.reservations_table, Some(&filter))
            .await?;
        Ok(decode_rows(&self.reservations_table, &items))
    }

    async fn put_reservation(&self, reservation: &Reservation) -> Result<(), TaskError> {
        self.client
            .put_item()
            .table_name(&self.reservations_table)
            .set_item(Some(to_item(reservation)?))
            .send()
            .await?;
        Ok(())
    }
}
