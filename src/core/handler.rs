//! Last line of defence for HTTP handlers: turns any `TaskError` into a
//! proxy response so nothing surfaces as an opaque Lambda failure.

use serde_json::Value;
use tracing::{error, warn};

use crate::api::helpers::err_response;
use crate::errors::TaskError;

pub const INTERNAL_ERROR_MESSAGE: &str = "An internal server error occurred.";

#[must_use]
pub fn into_response(result: Result<Value, TaskError>) -> Value {
    match result {
        Ok(response) => response,
        Err(e) if e.is_client_error() => {
            warn!("Rejected request: {}", e);
            err_response(e.status_code(), &e.to_string())
        }
        Err(e) => {
            error!("Unexpected error: {}", e);
            err_response(500, INTERNAL_ERROR_MESSAGE)
        }
    }
}
