use axum::{extract::Query, http::StatusCode, Json};
use contracts::dashboards::d400_sales_forecast::{
    ForecastHorizonOption, SalesForecastRequest, SalesForecastResponse,
};

use crate::dashboards::d400_sales_forecast::service;

/// GET /api/d400/sales_forecast?horizon=next-week
pub async fn get_sales_forecast(
    Query(request): Query<SalesForecastRequest>,
) -> Result<Json<SalesForecastResponse>, StatusCode> {
    tracing::info!("D400 Forecast: computing forecast for {}", request.horizon);

    match service::get_sales_forecast(request).await {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            tracing::error!("D400 Forecast: Failed to compute forecast: {:#}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/d400/horizons
pub async fn get_horizons() -> Json<Vec<ForecastHorizonOption>> {
    Json(service::list_horizons())
}
