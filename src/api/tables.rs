//! Restaurant table endpoints.

use serde_json::{Map, Value, json};
use tracing::{error, info};

use super::fields::{as_flag, as_int, present};
use super::helpers::{cors_err_response, cors_response};
use crate::core::models::Table;
use crate::storage::TableRepository;

pub async fn list_tables(tables: &dyn TableRepository) -> Value {
    info!("Fetching all tables");
    match tables.list_tables().await {
        Ok(items) => {
            info!(count = items.len(), "Tables fetched");
            cors_response(200, &json!({ "tables": items }))
        }
        Err(e) => {
            error!("Error fetching tables: {}", e);
            cors_err_response(400, "Unable to retrieve tables.")
        }
    }
}

/// Reads a table from the request body. `Ok(None)` means a required field
/// is missing; `Err(())` means a field is present but unusable.
fn table_from_body(body: &Map<String, Value>) -> Result<Option<Table>, ()> {
    let (Some(id), Some(number), Some(places), Some(is_vip)) = (
        present(body, "id"),
        present(body, "number"),
        present(body, "places"),
        present(body, "isVip"),
    ) else {
        return Ok(None);
    };

    let min_order = match present(body, "minOrder") {
        Some(v) => Some(as_int(v).ok_or(())?),
        None => None,
    };

    Ok(Some(Table {
        id: as_int(id).ok_or(())?,
        number: as_int(number).ok_or(())?,
        places: as_int(places).ok_or(())?,
        is_vip: as_flag(is_vip).ok_or(())?,
        min_order,
    }))
}

pub async fn create_table(tables: &dyn TableRepository, body: &Map<String, Value>) -> Value {
    info!("Request to create a new table");
    let table = match table_from_body(body) {
        Ok(Some(table)) => table,
        Ok(None) => {
            error!("Missing required fields for table creation.");
            return cors_err_response(400, "Missing required fields for table creation.");
        }
        Err(()) => {
            error!("Table fields have invalid types: {:?}", body);
            return cors_err_response(400, "Unable to create the table.");
        }
    };

    match tables.put_table(&table).await {
        Ok(()) => {
            info!("Table created successfully with id: {}", table.id);
            cors_response(200, &json!({ "id": table.id }))
        }
        Err(e) => {
            error!("Error creating table: {}", e);
            cors_err_response(400, "Unable to create the table.")
        }
    }
}

pub async fn get_table(tables: &dyn TableRepository, table_id: Option<&str>) -> Value {
    let Some(raw_id) = table_id.map(str::trim).filter(|s| !s.is_empty()) else {
        error!("Missing tableId in path parameters.");
        return cors_err_response(400, "Missing tableId in path parameters.");
    };
    info!("Fetching table by id: {}", raw_id);

    let Ok(id) = raw_id.parse::<i64>() else {
        error!("tableId is not numeric: {}", raw_id);
        return cors_err_response(400, &format!("Unable to retrieve table {raw_id}."));
    };

    match tables.get_table(id).await {
        Ok(Some(table)) => cors_response(200, &table),
        Ok(None) => {
            error!("Table not found with id: {}", id);
            cors_err_response(400, &format!("Table with id {id} not found."))
        }
        Err(e) => {
            error!("Error fetching table by ID {}: {}", id, e);
            cors_err_response(400, &format!("Unable to retrieve table {id}."))
        }
    }
}
