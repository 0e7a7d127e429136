//! Order placement, lookup, and status updates.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::info;

use platter_core::{NewOrder, Order, OrderDetail, OrderStatus};

use crate::error::ApiError;
use crate::handlers::ApiResult;
use crate::state::AppState;

/// Status update request body. The status arrives as its lowercase
/// wire name; anything unknown is rejected before the workflow runs.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderStatus {
    pub status: String,
}

/// `POST /orders`
///
/// Places an order. All precondition failures surface as 400: a
/// missing customer or restaurant, an unavailable or unknown menu
/// item, and an empty item list. On success the response carries the
/// fully priced order with its items and restaurant.
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<NewOrder>,
) -> Result<(StatusCode, Json<OrderDetail>), ApiError> {
    let detail = state.db.orders().place_order(&req).await?;

    info!(
        order_id = detail.order.id,
        total_cents = detail.order.total_cents,
        "Order placed"
    );

    Ok((StatusCode::CREATED, Json(detail)))
}

/// `GET /orders/{id}`
pub async fn get(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<OrderDetail> {
    let detail = state
        .db
        .orders()
        .get_detail(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Order not found: {id}")))?;

    Ok(Json(detail))
}

/// `PATCH /orders/{id}/status`
///
/// Moves an order through its lifecycle. An unknown status name is a
/// 400, an unknown order a 404, and a legal-status-but-illegal-move a
/// 422.
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateOrderStatus>,
) -> ApiResult<Order> {
    let status: OrderStatus = req.status.parse().map_err(ApiError::from)?;

    let order = state.db.orders().update_status(id, status).await?;

    info!(order_id = id, status = %order.status, "Order status updated");

    Ok(Json(order))
}
