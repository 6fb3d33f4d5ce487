//! Persistence seams and their AWS-backed implementations.

pub mod attributes;
pub mod dynamo;
pub mod s3;

use async_trait::async_trait;

use crate::core::models::{Reservation, Table};
use crate::errors::TaskError;

pub use attributes::Item;
pub use dynamo::{DynamoBookingStore, DynamoItemStore};
pub use s3::S3ObjectStore;

/// Writes a single item into a DynamoDB table.
#[async_trait]
pub trait ItemStore: Send + Sync {
    async fn put_item(&self, table: &str, item: Item) -> Result<(), TaskError>;
}

#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<(), TaskError>;
}

#[async_trait]
pub trait TableRepository: Send + Sync {
    async fn list_tables(&self) -> Result<Vec<Table>, TaskError>;
    async fn put_table(&self, table: &Table) -> Result<(), TaskError>;
    async fn get_table(&self, id: i64) -> Result<Option<Table>, TaskError>;
    async fn table_number_exists(&self, number: i64) -> Result<bool, TaskError>;
}

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    async fn list_reservations(&self) -> Result<Vec<Reservation>, TaskError>;

    /// Reservations for one table on one date (`yyyy-MM-dd`).
    async fn reservations_for(
        &self,
        table_number: i64,
        date: &str,
    ) -> Result<Vec<Reservation>, TaskError>;

    async fn put_reservation(&self, reservation: &Reservation) -> Result<(), TaskError>;
}
