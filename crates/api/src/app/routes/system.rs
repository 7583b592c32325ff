use axum::{Json, http::StatusCode, response::IntoResponse};

use crate::app::errors;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn root() -> impl IntoResponse {
    Json(serde_json::json!({
        "message": "storefront API is running",
    }))
}

pub async fn route_not_found() -> axum::response::Response {
    errors::json_error(StatusCode::NOT_FOUND, "not_found", "route not found")
}
