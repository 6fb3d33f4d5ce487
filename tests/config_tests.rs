use std::collections::HashMap;

use lambda_tasks::core::config::{
    AuditConfig, BookingConfig, DEFAULT_LATITUDE, DEFAULT_LONGITUDE, EventsConfig, ForecastConfig,
    UuidConfig,
};

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn test_defaults_when_unset() {
    let empty = lookup(&[]);

    assert_eq!(EventsConfig::from_lookup(&empty).unwrap().table_name, "Events");
    assert_eq!(AuditConfig::from_lookup(&empty).unwrap().audit_table_name, "Audit");
    assert_eq!(UuidConfig::from_lookup(&empty).unwrap().target_bucket, "uuid-storage");

    let forecast = ForecastConfig::from_lookup(&empty).unwrap();
    assert_eq!(forecast.target_table, "Weather");
    assert_eq!(forecast.latitude, DEFAULT_LATITUDE);
    assert_eq!(forecast.longitude, DEFAULT_LONGITUDE);
}

#[test]
fn test_explicit_values_win() {
    let vars = lookup(&[
        ("table_name", "cmtr-Events"),
        ("AUDIT_TABLE_NAME", "cmtr-Audit"),
        ("target_bucket", "cmtr-uuid"),
        ("target_table", "cmtr-Weather"),
        ("latitude", "52.52"),
        ("longitude", " 13.41 "),
    ]);

    assert_eq!(EventsConfig::from_lookup(&vars).unwrap().table_name, "cmtr-Events");
    assert_eq!(AuditConfig::from_lookup(&vars).unwrap().audit_table_name, "cmtr-Audit");
    assert_eq!(UuidConfig::from_lookup(&vars).unwrap().target_bucket, "cmtr-uuid");

    let forecast = ForecastConfig::from_lookup(&vars).unwrap();
    assert_eq!(forecast.target_table, "cmtr-Weather");
    assert_eq!(forecast.latitude, 52.52);
    assert_eq!(forecast.longitude, 13.41);
}

#[test]
fn test_blank_values_fall_back_to_defaults() {
    let vars = lookup(&[("table_name", "  ")]);
    assert_eq!(EventsConfig::from_lookup(&vars).unwrap().table_name, "Events");
}

#[test]
fn test_invalid_coordinate_is_config_error() {
    let vars = lookup(&[("latitude", "north")]);
    let err = ForecastConfig::from_lookup(&vars).unwrap_err();
    assert!(err.to_string().starts_with("Configuration error: latitude"));
}

#[test]
fn test_booking_requires_every_variable() {
    let full = [
        ("cup_id", "eu-central-1_pool"),
        ("cup_client_id", "client"),
        ("tables_table", "Tables"),
        ("reservations_table", "Reservations"),
    ];

    let config = BookingConfig::from_lookup(lookup(&full)).unwrap();
    assert_eq!(config.user_pool_id, "eu-central-1_pool");
    assert_eq!(config.reservations_table, "Reservations");

    for missing in 0..full.len() {
        let partial: Vec<_> = full
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != missing)
            .map(|(_, pair)| *pair)
            .collect();
        let err = BookingConfig::from_lookup(lookup(&partial)).unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("Configuration error: {} is not set", full[missing].0)
        );
    }
}
