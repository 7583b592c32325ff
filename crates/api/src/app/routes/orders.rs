use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use storefront_core::ProductId;
use storefront_orders::OrderRequest;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new().route("/", get(list_orders).post(create_order))
}

pub async fn create_order(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateOrderBody>,
) -> axum::response::Response {
    let product_id: ProductId = match body.product_id.parse() {
        Ok(id) => id,
        Err(_) => {
            return errors::json_error(
                StatusCode::BAD_REQUEST,
                "validation_error",
                "productId is not a valid identifier",
            );
        }
    };
    let (Ok(price), Ok(quantity)) = (u64::try_from(body.price), u32::try_from(body.quantity))
    else {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            "price and quantity must be positive",
        );
    };

    let request = OrderRequest {
        email: body.email,
        product_id,
        price,
        quantity,
    };

    match services.workflow().place_order(request) {
        Ok(order) => (StatusCode::CREATED, Json(order)).into_response(),
        Err(e) => errors::checkout_error_to_response(e),
    }
}

pub async fn list_orders(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::OrderListQuery>,
) -> axum::response::Response {
    let items = match services.workflow().list_orders(query.email.as_deref()) {
        Ok(items) => items,
        Err(e) => return errors::checkout_error_to_response(e),
    };

    // Empty result surfaces as 404 at this boundary; the workflow treats it
    // as an ordinary success.
    if items.is_empty() {
        return errors::json_error(StatusCode::NOT_FOUND, "not_found", "no orders found");
    }
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}
