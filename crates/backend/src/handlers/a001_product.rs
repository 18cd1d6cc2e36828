use axum::{extract::Path, http::StatusCode, Json};
use contracts::domain::a001_product::aggregate::{Product, ProductDto};

use super::{error_response, parse_id, service_error, ApiError};
use crate::domain::a001_product;

/// GET /api/products
pub async fn list_all() -> Result<Json<Vec<Product>>, ApiError> {
    a001_product::service::list_all()
        .await
        .map(Json)
        .map_err(|e| service_error(e, "Failed to read products"))
}

/// GET /api/products/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<Product>, ApiError> {
    let id = parse_id(&id)?;
    match a001_product::service::get_by_id(id).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(error_response(StatusCode::NOT_FOUND, "Product not found")),
        Err(e) => Err(service_error(e, "Failed to read product")),
    }
}

/// POST /api/products
pub async fn create(
    Json(dto): Json<ProductDto>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    match a001_product::service::create(dto).await {
        Ok(product) => {
            tracing::info!("A001 Product: created #{} {}", product.id, product.name);
            Ok((StatusCode::CREATED, Json(product)))
        }
        Err(e) => Err(service_error(e, "Failed to create product")),
    }
}

/// PUT /api/products/:id
pub async fn update(
    Path(id): Path<String>,
    Json(dto): Json<ProductDto>,
) -> Result<Json<Product>, ApiError> {
    let id = parse_id(&id)?;
    match a001_product::service::update(id, dto).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(error_response(StatusCode::NOT_FOUND, "Product not found")),
        Err(e) => Err(service_error(e, "Failed to update product")),
    }
}

/// DELETE /api/products/:id
pub async fn delete(Path(id): Path<String>) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    match a001_product::service::delete(id).await {
        Ok(true) => Ok(StatusCode::NO_CONTENT),
        Ok(false) => Err(error_response(StatusCode::NOT_FOUND, "Product not found")),
        Err(e) => Err(service_error(e, "Failed to delete product")),
    }
}
