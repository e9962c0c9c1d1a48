use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use stockcheck_availability::{RawStockRequest, ReasonCode, StockCheckReply};

use crate::app::dto::StockCheckResponse;
use crate::app::services::AppServices;

/// `POST /stock-check`: answer whether the requested quantities are in stock.
///
/// Always 200; the outcome is carried by `success` and the message.
pub async fn check_stock(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<RawStockRequest>, JsonRejection>,
) -> axum::response::Response {
    let reply = match body {
        Ok(Json(raw)) => services.check(&raw),
        Err(rejection) => {
            tracing::warn!(error = %rejection, "malformed stock check body");
            StockCheckReply::rejected(&ReasonCode::InvalidRequest)
        }
    };

    (StatusCode::OK, Json(StockCheckResponse::from(reply))).into_response()
}
