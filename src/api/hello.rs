//! `GET /hello` endpoint.

use lambda_runtime::{Error, LambdaEvent};
use serde_json::{Value, json};
use tracing::{error, info};

use super::helpers::json_response;
use super::parsing::{request_method, request_path};
use crate::core::handler::into_response;
use crate::errors::TaskError;

pub const GREETING: &str = "Hello from Lambda";

/// Accepts only `GET /hello`.
///
/// # Errors
///
/// Returns a validation error naming the offending path and method.
pub fn validate_request(event: &Value) -> Result<(), TaskError> {
    let method = request_method(event);
    let path = request_path(event);
    info!(method = %method, path = %path, "Validating request");

    if method == "GET" && path == "/hello" {
        return Ok(());
    }

    let message = format!(
        "Bad request syntax or unsupported method. Request path: {path}. HTTP method: {method}"
    );
    error!("{}", message);
    Err(TaskError::ValidationError(message))
}

/// # Errors
///
/// Returns the validation error for anything but `GET /hello`.
pub fn handle_request(event: &Value) -> Result<Value, TaskError> {
    validate_request(event)?;
    info!("Valid request. Returning 200 response.");
    Ok(json_response(
        200,
        &json!({ "statusCode": 200, "message": GREETING }),
    ))
}

#[tracing::instrument(level = "info", skip(event))]
pub async fn function_handler(event: LambdaEvent<Value>) -> Result<Value, Error> {
    info!("Received event: {:?}", event.payload);
    let response = into_response(handle_request(&event.payload));
    info!("Response: {}", response);
    Ok(response)
}
