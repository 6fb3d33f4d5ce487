//! Clients for the external services the handlers call.

pub mod cognito;
pub mod weather;

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::TaskError;

pub use cognito::CognitoIdentityProvider;
pub use weather::{ForecastQuery, OpenMeteoClient};

#[async_trait]
pub trait WeatherSource: Send + Sync {
    /// Fetches a forecast and returns the raw JSON document.
    async fn forecast(&self, query: &ForecastQuery) -> Result<Value, TaskError>;
}

/// User registration and password sign-in.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Registers the user and confirms them right away.
    async fn sign_up(&self, email: &str, password: &str) -> Result<(), TaskError>;

    /// Returns the ID token, or `None` when the provider answered without
    /// an authentication result (e.g. a pending challenge).
    async fn sign_in(&self, email: &str, password: &str) -> Result<Option<String>, TaskError>;
}
