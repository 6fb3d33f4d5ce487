use std::env;

use aws_config::meta::region::RegionProviderChain;
use aws_config::{BehaviorVersion, Region, SdkConfig};

use crate::errors::TaskError;

pub const DEFAULT_REGION: &str = "eu-central-1";
pub const DEFAULT_LATITUDE: f64 = 50.4375;
pub const DEFAULT_LONGITUDE: f64 = 30.5;

fn required(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String, TaskError> {
    lookup(key)
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| TaskError::ConfigError(format!("{key} is not set")))
}

fn or_default(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    lookup(key)
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn float_or_default(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: f64,
) -> Result<f64, TaskError> {
    match lookup(key).filter(|v| !v.trim().is_empty()) {
        Some(raw) => raw
            .trim()
            .parse::<f64>()
            .map_err(|e| TaskError::ConfigError(format!("{key}: {e}"))),
        None => Ok(default),
    }
}

fn env_lookup(key: &str) -> Option<String> {
    env::var(key).ok()
}

/// Loads the shared AWS configuration.
///
/// An explicit `region` variable wins; otherwise the default provider chain
/// is consulted and `eu-central-1` is the last resort.
pub async fn load_aws_config() -> SdkConfig {
    let explicit = env_lookup("region").map(Region::new);
    let region = RegionProviderChain::first_try(explicit)
        .or_default_provider()
        .or_else(Region::from_static(DEFAULT_REGION));

    aws_config::defaults(BehaviorVersion::latest())
        .region(region)
        .load()
        .await
}

#[derive(Debug, Clone)]
pub struct EventsConfig {
    pub table_name: String,
}

impl EventsConfig {
    pub fn from_env() -> Result<Self, TaskError> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, TaskError> {
        Ok(Self {
            table_name: or_default(&lookup, "table_name", "Events"),
        })
    }
}

#[derive(Debug, Clone)]
pub struct AuditConfig {
    pub audit_table_name: String,
}

impl AuditConfig {
    pub fn from_env() -> Result<Self, TaskError> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, TaskError> {
        Ok(Self {
            audit_table_name: or_default(&lookup, "AUDIT_TABLE_NAME", "Audit"),
        })
    }
}

#[derive(Debug, Clone)]
pub struct UuidConfig {
    pub target_bucket: String,
}

impl UuidConfig {
    pub fn from_env() -> Result<Self, TaskError> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, TaskError> {
        Ok(Self {
            target_bucket: or_default(&lookup, "target_bucket", "uuid-storage"),
        })
    }
}

#[derive(Debug, Clone)]
pub struct ForecastConfig {
    pub target_table: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl ForecastConfig {
    pub fn from_env() -> Result<Self, TaskError> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, TaskError> {
        Ok(Self {
            target_table: or_default(&lookup, "target_table", "Weather"),
            latitude: float_or_default(&lookup, "latitude", DEFAULT_LATITUDE)?,
            longitude: float_or_default(&lookup, "longitude", DEFAULT_LONGITUDE)?,
        })
    }
}

/// Settings for the booking API: the Cognito user pool plus both tables.
#[derive(Debug, Clone)]
pub struct BookingConfig {
    pub user_pool_id: String,
    pub client_id: String,
    pub tables_table: String,
    pub reservations_table: String,
}

impl BookingConfig {
    pub fn from_env() -> Result<Self, TaskError> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, TaskError> {
        Ok(Self {
            user_pool_id: required(&lookup, "cup_id")?,
            client_id: required(&lookup, "cup_client_id")?,
            tables_table: required(&lookup, "tables_table")?,
            reservations_table: required(&lookup, "reservations_table")?,
        })
    }
}
