use anyhow::Result;
use contracts::dashboards::d400_sales_forecast::{
    ForecastHorizon, ForecastHorizonOption, SaleRecord, SalesForecastRequest,
    SalesForecastResponse,
};
use contracts::domain::a002_voucher::aggregate::Voucher;

use super::{aggregator, engine};
use crate::domain::a002_voucher::repository;
use crate::shared::data::json_store::get_store;
use crate::shared::format::format_money;

/// Get the sales forecast for the requested horizon
pub async fn get_sales_forecast(request: SalesForecastRequest) -> Result<SalesForecastResponse> {
    let vouchers = repository::list_all(get_store()?).await?;
    let response = build_forecast(&vouchers, request.horizon);

    tracing::info!(
        "D400 Forecast: {} vouchers over {} days -> {} for {}",
        vouchers.len(),
        response.daily_totals.len(),
        format_money(response.prediction),
        response.horizon,
    );

    Ok(response)
}

/// Forecast from a voucher snapshot. Soft-deleted vouchers are dropped here,
/// before aggregation.
pub fn build_forecast(vouchers: &[Voucher], horizon: ForecastHorizon) -> SalesForecastResponse {
    let records: Vec<SaleRecord> = vouchers
        .iter()
        .filter(|v| !v.deleted)
        .map(Voucher::as_sale_record)
        .collect();

    let daily_totals = aggregator::aggregate(&records);
    let breakdown = engine::breakdown(&daily_totals);
    let prediction = engine::forecast(&daily_totals, horizon.days());

    SalesForecastResponse {
        horizon,
        horizon_days: horizon.days(),
        latest_total: daily_totals.last().map(|d| d.total),
        daily_totals,
        breakdown,
        prediction,
    }
}

/// Horizons offered by the forecast selector
pub fn list_horizons() -> Vec<ForecastHorizonOption> {
    ForecastHorizon::all()
        .into_iter()
        .map(ForecastHorizonOption::from)
        .collect()
}
