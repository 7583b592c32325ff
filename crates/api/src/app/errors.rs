use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use storefront_checkout::CheckoutError;
use storefront_infra::StoreError;

pub fn checkout_error_to_response(err: CheckoutError) -> axum::response::Response {
    match err {
        CheckoutError::Validation(msg) => {
            json_error(StatusCode::BAD_REQUEST, "validation_error", msg)
        }
        CheckoutError::ProductNotFound => {
            json_error(StatusCode::NOT_FOUND, "not_found", "product not found")
        }
        CheckoutError::InsufficientInventory => json_error(
            StatusCode::BAD_REQUEST,
            "insufficient_inventory",
            "insufficient quantity available in inventory",
        ),
        CheckoutError::Persistence(msg) => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", msg)
        }
    }
}

pub fn store_error_to_response(err: StoreError) -> axum::response::Response {
    match err {
        StoreError::NotFound => {
            json_error(StatusCode::NOT_FOUND, "not_found", "product not found")
        }
        StoreError::InsufficientStock { .. } => json_error(
            StatusCode::BAD_REQUEST,
            "insufficient_inventory",
            err.to_string(),
        ),
        StoreError::InvalidRecord(msg) => {
            json_error(StatusCode::BAD_REQUEST, "validation_error", msg)
        }
        StoreError::Backend(msg) => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", msg)
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
