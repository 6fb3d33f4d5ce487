//! Forecast proxy: answers with the Open-Meteo document for the requested
//! coordinates.

use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;
use tracing::{error, info};

use super::helpers::{json_response, text_response};
use super::parsing::query_param;
use crate::clients::{ForecastQuery, WeatherSource};
use crate::core::config::{DEFAULT_LATITUDE, DEFAULT_LONGITUDE};
use crate::core::handler::into_response;
use crate::errors::TaskError;

pub const CURRENT_VARIABLES: &str = "temperature_2m,wind_speed_10m";
pub const HOURLY_VARIABLES: &str = "temperature_2m,relative_humidity_2m,wind_speed_10m";

fn coordinate(event: &Value, name: &str, default: f64) -> Result<f64, TaskError> {
    match query_param(event, name) {
        Some(raw) => raw.trim().parse::<f64>().map_err(|_| {
            TaskError::ValidationError(format!("Query parameter {name} must be a number"))
        }),
        None => Ok(default),
    }
}

/// Builds the forecast query from `queryStringParameters`, falling back to
/// the default coordinates.
///
/// # Errors
///
/// Returns a validation error for coordinates that are not numbers.
pub fn validate_request(event: &Value) -> Result<ForecastQuery, TaskError> {
    let latitude = coordinate(event, "latitude", DEFAULT_LATITUDE)?;
    let longitude = coordinate(event, "longitude", DEFAULT_LONGITUDE)?;
    Ok(ForecastQuery::new(latitude, longitude, HOURLY_VARIABLES).with_current(CURRENT_VARIABLES))
}

/// # Errors
///
/// Only validation errors escape; upstream failures become a 500 response.
pub async fn handle_request(weather: &dyn WeatherSource, event: &Value) -> Result<Value, TaskError> {
    let query = validate_request(event)?;

    match weather.forecast(&query).await {
        Ok(forecast) => Ok(json_response(200, &forecast)),
        Err(e) => {
            error!("Error fetching weather: {}", e);
            Ok(text_response(500, &format!("Error: {e}")))
        }
    }
}

#[tracing::instrument(level = "info", skip(weather, event))]
pub async fn function_handler(
    weather: &dyn WeatherSource,
    event: LambdaEvent<Value>,
) -> Result<Value, Error> {
    info!("Weather API received request: {:?}", event.payload);
    Ok(into_response(handle_request(weather, &event.payload).await))
}
