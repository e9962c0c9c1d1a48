use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

/// `GET /catalog`: the in-memory inventory snapshot (local runs only).
pub async fn list_catalog(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services.catalog_facts() {
        Some(facts) => {
            let items: Vec<_> = facts.into_iter().map(dto::fact_to_json).collect();
            (
                StatusCode::OK,
                Json(serde_json::json!({
                    "count": items.len(),
                    "items": items,
                })),
            )
                .into_response()
        }
        None => errors::json_error(
            StatusCode::NOT_FOUND,
            "not_found",
            "catalog listing is only available for the in-memory catalog",
        ),
    }
}
