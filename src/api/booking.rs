//! Booking API router - matches `(resource, method)` and delegates to the
//! auth, table and reservation handlers.

use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;
use tracing::{error, info, warn};

use super::helpers::cors_err_response;
use super::parsing::{parse_json_body, path_param, request_method, resource};
use super::{auth, reservations, tables};
use crate::clients::IdentityProvider;
use crate::core::handler::into_response;
use crate::errors::TaskError;
use crate::storage::{ReservationRepository, TableRepository};

/// Everything the booking routes talk to.
#[derive(Clone, Copy)]
pub struct BookingServices<'a> {
    pub identity: &'a dyn IdentityProvider,
    pub tables: &'a dyn TableRepository,
    pub reservations: &'a dyn ReservationRepository,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    SignUp,
    SignIn,
    ListTables,
    CreateTable,
    GetTable(Option<String>),
    ListReservations,
    CreateReservation,
    Unsupported,
}

/// The id segment of a concrete `/tables/{tableId}` path, possibly empty.
/// Deeper paths such as `/tables/5/extra` do not match.
fn table_id_segment(path: &str) -> Option<&str> {
    let id = path.strip_prefix("/tables/")?.trim_end_matches('/');
    (!id.contains('/')).then_some(id)
}

#[must_use]
pub fn route(event: &Value) -> Route {
    let method = request_method(event);
    let path = resource(event);

    match (method, path) {
        ("POST", "/signup") => Route::SignUp,
        ("POST", "/signin") => Route::SignIn,
        ("GET", "/tables") => Route::ListTables,
        ("POST", "/tables") => Route::CreateTable,
        ("GET", "/tables/{tableId}") => {
            Route::GetTable(path_param(event, "tableId").map(ToString::to_string))
        }
        // HTTP API events carry the concrete path instead of the template.
        ("GET", p) if table_id_segment(p).is_some() => Route::GetTable(
            table_id_segment(p)
                .filter(|id| !id.is_empty())
                .map(ToString::to_string),
        ),
        ("GET", "/reservations") => Route::ListReservations,
        ("POST", "/reservations") => Route::CreateReservation,
        _ => Route::Unsupported,
    }
}

/// # Errors
///
/// Every failure is answered with a 400 response; the `Result` only keeps
/// the signature aligned with the other handlers.
pub async fn handle_request(services: BookingServices<'_>, event: &Value) -> Result<Value, TaskError> {
    let method = request_method(event);
    let path = resource(event);

    let body = match parse_json_body(event) {
        Ok(body) => body,
        Err(e) => {
            error!("Error parsing request body: {}", e);
            return Ok(cors_err_response(400, "Invalid JSON input."));
        }
    };

    info!(path = %path, method = %method, "Received request");

    let response = match route(event) {
        Route::SignUp => auth::signup(services.identity, &body).await,
        Route::SignIn => auth::signin(services.identity, &body).await,
        Route::ListTables => tables::list_tables(services.tables).await,
        Route::CreateTable => tables::create_table(services.tables, &body).await,
        Route::GetTable(id) => tables::get_table(services.tables, id.as_deref()).await,
        Route::ListReservations => reservations::list_reservations(services.reservations).await,
        Route::CreateReservation => {
            reservations::create_reservation(services.tables, services.reservations, &body).await
        }
        Route::Unsupported => {
            warn!("No matching route found for path: {}, method: {}", path, method);
            cors_err_response(400, &format!("Unsupported path {path} or method {method}"))
        }
    };

    Ok(response)
}

#[tracing::instrument(level = "info", skip(services, event))]
pub async fn function_handler(
    services: BookingServices<'_>,
    event: LambdaEvent<Value>,
) -> Result<Value, Error> {
    info!("Booking API received request: {:?}", event.payload);
    Ok(into_response(handle_request(services, &event.payload).await))
}
