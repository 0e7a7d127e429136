//! Menu management: adding items, listing a menu, partial updates.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::info;

use platter_core::{validation, MenuItem};
use platter_db::MenuItemUpdate;

use crate::error::ApiError;
use crate::handlers::ApiResult;
use crate::state::AppState;

/// New menu item request body. Items start available.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMenuItem {
    pub name: String,
    pub price_cents: i64,
}

/// Partial update body: absent fields keep their current value.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMenuItem {
    pub price_cents: Option<i64>,
    pub is_available: Option<bool>,
}

/// `POST /restaurants/{id}/menu`
pub async fn create(
    State(state): State<AppState>,
    Path(restaurant_id): Path<i64>,
    Json(req): Json<CreateMenuItem>,
) -> Result<(StatusCode, Json<MenuItem>), ApiError> {
    validation::validate_name("name", &req.name)?;
    validation::validate_price_cents(req.price_cents)?;

    if !state.db.restaurants().exists(restaurant_id).await? {
        return Err(ApiError::not_found(format!(
            "Restaurant not found: {restaurant_id}"
        )));
    }

    let item = state
        .db
        .menu_items()
        .insert(restaurant_id, &req.name, req.price_cents)
        .await?;

    info!(menu_item_id = item.id, restaurant_id, "Menu item added");

    Ok((StatusCode::CREATED, Json(item)))
}

/// `GET /restaurants/{id}/menu`
pub async fn list(
    State(state): State<AppState>,
    Path(restaurant_id): Path<i64>,
) -> ApiResult<Vec<MenuItem>> {
    if !state.db.restaurants().exists(restaurant_id).await? {
        return Err(ApiError::not_found(format!(
            "Restaurant not found: {restaurant_id}"
        )));
    }

    let menu = state.db.menu_items().list_for_restaurant(restaurant_id).await?;
    Ok(Json(menu))
}

/// `PATCH /menu/{id}`
///
/// Updates price and/or availability. Supplying only one field leaves
/// the other untouched; historical orders are never affected.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateMenuItem>,
) -> ApiResult<MenuItem> {
    if let Some(price_cents) = req.price_cents {
        validation::validate_price_cents(price_cents)?;
    }

    let item = state
        .db
        .menu_items()
        .update(
            id,
            MenuItemUpdate {
                price_cents: req.price_cents,
                is_available: req.is_available,
            },
        )
        .await?;

    info!(menu_item_id = id, "Menu item updated");

    Ok(Json(item))
}
