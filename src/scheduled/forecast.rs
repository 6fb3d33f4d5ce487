//! Fetches the hourly temperature forecast and stores it in the `Weather`
//! table.

use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;
use tracing::{error, info};
use uuid::Uuid;

use crate::api::helpers::json_response;
use crate::clients::{ForecastQuery, WeatherSource};
use crate::core::config::ForecastConfig;
use crate::core::handler::into_response;
use crate::core::models::{Forecast, ForecastRecord};
use crate::errors::TaskError;
use crate::storage::ItemStore;
use crate::storage::attributes::to_item;

pub const HOURLY_VARIABLES: &str = "temperature_2m";

/// Keeps only the fields persisted in the `Weather` table.
///
/// # Errors
///
/// Returns a serialization error when the document lacks one of those fields.
pub fn extract_forecast(document: Value) -> Result<Forecast, TaskError> {
    serde_json::from_value(document)
        .map_err(|e| TaskError::SerializationError(format!("unexpected forecast document: {e}")))
}

/// # Errors
///
/// Propagates fetch, decode and store failures.
pub async fn handle_request(
    weather: &dyn WeatherSource,
    store: &dyn ItemStore,
    config: &ForecastConfig,
) -> Result<Value, TaskError> {
    let query = ForecastQuery::new(config.latitude, config.longitude, HOURLY_VARIABLES);
    let document = weather.forecast(&query).await?;

    let record = ForecastRecord {
        id: Uuid::new_v4().to_string(),
        forecast: extract_forecast(document)?,
    };
    info!(table = %config.target_table, id = %record.id, "Saving forecast");

    store
        .put_item(&config.target_table, to_item(&record)?)
        .await
        .inspect_err(|e| error!("Failed to save forecast {}: {}", record.id, e))?;

    Ok(json_response(200, &record))
}

#[tracing::instrument(level = "info", skip(weather, store, config, event))]
pub async fn function_handler(
    weather: &dyn WeatherSource,
    store: &dyn ItemStore,
    config: &ForecastConfig,
    event: LambdaEvent<Value>,
) -> Result<Value, Error> {
    info!("Forecast processor invoked: {:?}", event.payload);
    Ok(into_response(handle_request(weather, store, config).await))
}
