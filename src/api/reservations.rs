//! Reservation endpoints, including the double-booking check.

use rand::Rng;
use serde_json::{Map, Value, json};
use tracing::{error, info};
use uuid::Uuid;

use super::fields::{as_int, non_empty_str, present};
use super::helpers::{cors_err_response, cors_response};
use crate::core::booking::{TimeSlot, find_overlap, parse_date};
use crate::core::models::Reservation;
use crate::storage::{ReservationRepository, TableRepository};

/// Upper bound of the numeric row id.
pub const MAX_NUMERIC_ID: i64 = 999_999_999;

pub async fn list_reservations(reservations: &dyn ReservationRepository) -> Value {
    info!("Fetching all reservations");
    match reservations.list_reservations().await {
        Ok(items) => cors_response(200, &json!({ "reservations": items })),
        Err(e) => {
            error!("Error fetching reservations: {}", e);
            cors_err_response(400, "Unable to retrieve reservations.")
        }
    }
}

struct ReservationRequest<'a> {
    table_number: &'a Value,
    client_name: &'a str,
    phone_number: &'a str,
    date: &'a str,
    slot_start: &'a str,
    slot_end: &'a str,
}

fn read_request(body: &Map<String, Value>) -> Option<ReservationRequest<'_>> {
    Some(ReservationRequest {
        table_number: present(body, "tableNumber")?,
        client_name: non_empty_str(body, "clientName")?,
        phone_number: non_empty_str(body, "phoneNumber")?,
        date: non_empty_str(body, "date")?,
        slot_start: non_empty_str(body, "slotTimeStart")?,
        slot_end: non_empty_str(body, "slotTimeEnd")?,
    })
}

pub async fn create_reservation(
    tables: &dyn TableRepository,
    reservations: &dyn ReservationRepository,
    body: &Map<String, Value>,
) -> Value {
    info!("Request to create a new reservation");
    let Some(request) = read_request(body) else {
        error!("Missing required reservation fields.");
        return cors_err_response(400, "Missing required reservation fields.");
    };

    let (Some(slot), Some(_)) = (
        TimeSlot::parse(request.slot_start, request.slot_end),
        parse_date(request.date),
    ) else {
        error!(
            "Invalid reservation slot: {} {} - {}",
            request.date, request.slot_start, request.slot_end
        );
        return cors_err_response(400, "Invalid reservation date or time slot.");
    };

    let Some(table_number) = as_int(request.table_number) else {
        error!("tableNumber is not an integer: {}", request.table_number);
        return cors_err_response(400, "Error verifying table existence.");
    };

    match tables.table_number_exists(table_number).await {
        Ok(true) => {}
        Ok(false) => {
            error!("Reservation failed. Table number {} does not exist.", table_number);
            return cors_err_response(400, &format!("Table number {table_number} does not exist."));
        }
        Err(e) => {
            error!("Error checking table existence by 'number': {}", e);
            return cors_err_response(400, "Error verifying table existence.");
        }
    }

    match reservations.reservations_for(table_number, request.date).await {
        Ok(existing) => {
            if let Some(clash) = find_overlap(&slot, &existing) {
                error!(
                    "Reservation time overlap. Existing: {} - {}, Requested: {} - {}",
                    clash.slot_time_start, clash.slot_time_end, request.slot_start, request.slot_end
                );
                return cors_err_response(
                    400,
                    &format!("Time overlap for table {table_number} on {}.", request.date),
                );
            }
        }
        Err(e) => {
            error!("Error checking for overlapping reservations: {}", e);
            return cors_err_response(400, "Error checking reservation overlap.");
        }
    }

    let reservation = Reservation {
        id: rand::thread_rng().gen_range(1..=MAX_NUMERIC_ID),
        reservation_id: Uuid::new_v4().to_string(),
        table_number,
        client_name: request.client_name.to_string(),
        phone_number: request.phone_number.to_string(),
        date: request.date.to_string(),
        slot_time_start: request.slot_start.to_string(),
        slot_time_end: request.slot_end.to_string(),
    };

    match reservations.put_reservation(&reservation).await {
        Ok(()) => {
            info!(
                "Reservation created. ID: {}, UUID: {}",
                reservation.id, reservation.reservation_id
            );
            cors_response(200, &json!({ "reservationId": reservation.reservation_id }))
        }
        Err(e) => {
            error!("Error creating reservation: {}", e);
            cors_err_response(400, "Unable to create reservation.")
        }
    }
}
