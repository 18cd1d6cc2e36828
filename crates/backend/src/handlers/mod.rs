pub mod a001_product;
pub mod a002_voucher;

use axum::{http::StatusCode, Json};
use serde_json::{json, Value};

use crate::shared::errors::is_validation_error;

pub type ApiError = (StatusCode, Json<Value>);

pub fn error_response(status: StatusCode, message: &str) -> ApiError {
    (status, Json(json!({ "error": message })))
}

/// Map a service error: validation failures become 400 with their message,
/// everything else is logged and reported as 500 with `message`.
pub fn service_error(e: anyhow::Error, message: &str) -> ApiError {
    if is_validation_error(&e) {
        return error_response(StatusCode::BAD_REQUEST, &e.to_string());
    }
    tracing::error!("{}: {:#}", message, e);
    error_response(StatusCode::INTERNAL_SERVER_ERROR, message)
}

/// Parse a numeric record id from the path.
pub fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>()
        .map_err(|_| error_response(StatusCode::BAD_REQUEST, "Invalid id"))
}
