use axum::{extract::Path, http::StatusCode, Json};
use contracts::domain::a002_voucher::aggregate::Voucher;
use serde_json::{Map, Value};

use super::{error_response, parse_id, service_error, ApiError};
use crate::domain::a002_voucher;

/// GET /api/vouchers
pub async fn list_all() -> Result<Json<Vec<Voucher>>, ApiError> {
    a002_voucher::service::list_all()
        .await
        .map(Json)
        .map_err(|e| service_error(e, "Failed to read vouchers"))
}

/// POST /api/vouchers
pub async fn create(
    Json(body): Json<Map<String, Value>>,
) -> Result<(StatusCode, Json<Voucher>), ApiError> {
    match a002_voucher::service::create(body).await {
        Ok(voucher) => {
            tracing::info!(
                "A002 Voucher: created #{} grand total {}",
                voucher.id,
                voucher.grand_total
            );
            Ok((StatusCode::CREATED, Json(voucher)))
        }
        Err(e) => Err(service_error(e, "Failed to create voucher")),
    }
}

/// PATCH /api/vouchers/:id
pub async fn patch(
    Path(id): Path<String>,
    Json(changes): Json<Map<String, Value>>,
) -> Result<Json<Voucher>, ApiError> {
    let id = parse_id(&id)?;
    match a002_voucher::service::patch(id, changes).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(error_response(StatusCode::NOT_FOUND, "Voucher not found")),
        Err(e) => Err(service_error(e, "Failed to update voucher")),
    }
}

/// DELETE /api/vouchers/:id
pub async fn delete(Path(id): Path<String>) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    match a002_voucher::service::delete(id).await {
        Ok(true) => Ok(StatusCode::NO_CONTENT),
        Ok(false) => Err(error_response(StatusCode::NOT_FOUND, "Voucher not found")),
        Err(e) => Err(service_error(e, "Failed to delete voucher")),
    }
}
