use axum::{
    routing::{get, patch},
    Router,
};

use crate::{api, handlers};

/// Configuration of all application routes
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // A001 PRODUCTS
        // ========================================
        .route(
            "/api/products",
            get(handlers::a001_product::list_all).post(handlers::a001_product::create),
        )
        .route(
            "/api/products/:id",
            get(handlers::a001_product::get_by_id)
                .put(handlers::a001_product::update)
                .delete(handlers::a001_product::delete),
        )
        // ========================================
        // A002 VOUCHERS
        // ========================================
        .route(
            "/api/vouchers",
            get(handlers::a002_voucher::list_all).post(handlers::a002_voucher::create),
        )
        .route(
            "/api/vouchers/:id",
            patch(handlers::a002_voucher::patch)
                .delete(handlers::a002_voucher::delete),
        )
        // ========================================
        // D400 SALES FORECAST
        // ========================================
        .route(
            "/api/d400/sales_forecast",
            get(api::handlers::d400_sales_forecast::get_sales_forecast),
        )
        .route(
            "/api/d400/horizons",
            get(api::handlers::d400_sales_forecast::get_horizons),
        )
}
