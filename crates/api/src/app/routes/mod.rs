use axum::{
    routing::{get, post},
    Router,
};

pub mod catalog;
pub mod stock;
pub mod system;

/// Router for the storefront-facing endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/stock-check", post(stock::check_stock))
        .route("/catalog", get(catalog::list_catalog))
}
