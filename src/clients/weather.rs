//! Open-Meteo forecast client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{error, info};
use url::Url;

use super::WeatherSource;
use crate::errors::TaskError;

pub const OPEN_METEO_URL: &str = "https://api.open-meteo.com/v1/forecast";

static HTTP_CLIENT: std::sync::LazyLock<Client> = std::sync::LazyLock::new(|| {
    Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .unwrap_or_else(|_| Client::new())
});

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastQuery {
    pub latitude: f64,
    pub longitude: f64,
    /// Comma-separated `current` variables, if any.
    pub current: Option<String>,
    /// Comma-separated `hourly` variables.
    pub hourly: String,
}

impl ForecastQuery {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64, hourly: &str) -> Self {
        Self {
            latitude,
            longitude,
            current: None,
            hourly: hourly.to_string(),
        }
    }

    #[must_use]
    pub fn with_current(mut self, current: &str) -> Self {
        self.current = Some(current.to_string());
        self
    }
}

#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    http: Client,
    base_url: String,
}

impl Default for OpenMeteoClient {
    fn default() -> Self {
        Self::new(OPEN_METEO_URL)
    }
}

impl OpenMeteoClient {
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            http: HTTP_CLIENT.clone(),
            base_url: base_url.to_string(),
        }
    }

    /// Builds the request URL for `query`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured base URL is not a valid URL.
    pub fn build_url(&self, query: &ForecastQuery) -> Result<Url, TaskError> {
        let mut params = vec![
            ("latitude", query.latitude.to_string()),
            ("longitude", query.longitude.to_string()),
        ];
        if let Some(current) = &query.current {
            params.push(("current", current.clone()));
        }
        params.push(("hourly", query.hourly.clone()));

        Url::parse_with_params(&self.base_url, &params)
            .map_err(|e| TaskError::ConfigError(format!("invalid weather API URL: {e}")))
    }
}

#[async_trait]
impl WeatherSource for OpenMeteoClient {
    async fn forecast(&self, query: &ForecastQuery) -> Result<Value, TaskError> {
        let url = self.build_url(query)?;
        info!(url = %url, "Requesting forecast");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| {
                error!("Weather API request failed: {}", e);
                TaskError::from(e)
            })?;

        Ok(response.json::<Value>().await?)
    }
}
